use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AgendaError, TimeParseError};

/// Layout used for start times at rest.
pub const STORED_TIME_FORMAT: &str = "%H:%M:%S";

/// Accepted when reading; Postgres prints sub-second times as `09:00:00.5`.
const STORED_TIME_PARSE_FORMAT: &str = "%H:%M:%S%.f";

/// Duration applied when a service has no usable duration.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Scheduled => "scheduled",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(BookingStatus::Scheduled),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(AgendaError::Validation(format!(
                "Unknown booking status: {}",
                other
            ))),
        }
    }
}

/// A persisted booking as written by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// A booking as read back from the store, joined with its client and
/// service. The start time keeps the raw stored text so that malformed
/// values surface in the scheduler instead of at the store boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub status: BookingStatus,
    pub client_name: Option<String>,
    pub service_name: Option<String>,
    pub service_duration: Option<i32>,
}

impl BookingRecord {
    pub fn parsed_start(&self) -> Result<NaiveTime, TimeParseError> {
        parse_stored_time(&self.start_time)
    }

    /// Minutes this booking occupies, falling back to the default when the
    /// joined service carries no duration.
    pub fn duration_minutes(&self) -> i64 {
        self.service_duration
            .map(i64::from)
            .unwrap_or(DEFAULT_DURATION_MINUTES)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// One row of the agenda listing, names resolved from the registries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingListing {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Start time as stored, shown even when it cannot be parsed.
    pub start_time: String,
    pub client_name: Option<String>,
    pub service_name: Option<String>,
    pub professional_name: Option<String>,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListResponse {
    pub date: Option<NaiveDate>,
    pub professional_id: Option<Uuid>,
    pub count: usize,
    pub bookings: Vec<BookingListing>,
}

pub fn parse_stored_time(raw: &str) -> Result<NaiveTime, TimeParseError> {
    NaiveTime::parse_from_str(raw, STORED_TIME_PARSE_FORMAT).map_err(|_| TimeParseError {
        raw: raw.to_string(),
    })
}

pub fn format_stored_time(time: NaiveTime) -> String {
    time.format(STORED_TIME_FORMAT).to_string()
}
