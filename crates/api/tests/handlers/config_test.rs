use chrono::NaiveTime;
use pretty_assertions::assert_eq;
use tracing::Level;

use crate::test_utils::config_from;

const DB: (&str, &str) = ("DATABASE_URL", "postgres://localhost/agenda");

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_defaults() {
    let config = config_from(&[DB]).unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.slot_grid.open(), hm(8, 0));
    assert_eq!(config.slot_grid.close(), hm(19, 0));
    assert_eq!(config.slot_grid.step_minutes(), 30);
}

#[test]
fn test_database_url_is_required() {
    let err = config_from(&[]).unwrap_err();

    assert!(err.to_string().contains("DATABASE_URL"));
}

#[test]
fn test_invalid_port_is_an_error() {
    assert!(config_from(&[DB, ("API_PORT", "eighty")]).is_err());
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        DB,
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "http://a.test, http://b.test,"),
        ("AGENDA_OPEN", "07:30"),
        ("AGENDA_CLOSE", "12:00"),
        ("AGENDA_SLOT_MINUTES", "15"),
    ])
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
    );
    assert_eq!(config.slot_grid.open(), hm(7, 30));
    assert_eq!(config.slot_grid.close(), hm(12, 0));
    assert_eq!(config.slot_grid.step_minutes(), 15);
}

#[test]
fn test_agenda_closing_before_opening_is_rejected() {
    let result = config_from(&[DB, ("AGENDA_OPEN", "19:00"), ("AGENDA_CLOSE", "08:00")]);

    assert!(result.is_err());
}

#[test]
fn test_malformed_agenda_time_is_rejected() {
    let err = config_from(&[DB, ("AGENDA_OPEN", "8am")]).unwrap_err();

    assert!(err.to_string().contains("AGENDA_OPEN"));
}
