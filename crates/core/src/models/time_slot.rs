use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Free,
    Occupied,
}

/// A fixed-width display window on the agenda grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: SlotStatus,
    pub occupying_client: Option<String>,
    pub occupying_service: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotGridResponse {
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub skipped_records: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeHoursResponse {
    pub date: NaiveDate,
    pub professional_id: Option<Uuid>,
    pub free_hours: Vec<NaiveTime>,
    pub skipped_records: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheReloadResponse {
    pub clients: usize,
    pub services: usize,
    pub professionals: usize,
    pub bookings: usize,
    pub loaded_at: DateTime<Utc>,
}
