use std::{collections::HashMap, sync::Arc};

use agenda_api::{ApiState, app, config::ApiConfig};
use agenda_core::{
    models::directory::{Client, Professional, Service},
    scheduler::SlotGrid,
    store::MemoryStore,
};
use axum_test::TestServer;
use chrono::{NaiveDate, NaiveTime};
use serde_json::{Value, json};

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub server: TestServer,
    pub client: Client,
    pub consult: Service,
    pub professional: Professional,
}

impl TestContext {
    /// Server over an in-memory store seeded with one client, one 30 minute
    /// service and one professional.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let client = store.add_client("Ana");
        let consult = store.add_service("Consultation", Some(30));
        let professional = store.add_professional("Dr. Lima");

        let state = Arc::new(ApiState::new(store.clone(), SlotGrid::default()));
        let server = TestServer::new(app(state)).expect("test server");

        Self {
            store,
            server,
            client,
            consult,
            professional,
        }
    }

    pub fn booking_body(&self, start: &str) -> Value {
        json!({
            "client_id": self.client.id,
            "service_id": self.consult.id,
            "professional_id": self.professional.id,
            "date": "2026-10-19",
            "start_time": start,
        })
    }
}

pub fn server_for(state: ApiState) -> TestServer {
    TestServer::new(app(Arc::new(state))).expect("test server")
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn config_from(pairs: &[(&str, &str)]) -> eyre::Result<ApiConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ApiConfig::from_lookup(|key| vars.get(key).cloned())
}
