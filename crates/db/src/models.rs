use agenda_core::{
    errors::AgendaError,
    models::{
        booking::{Booking, BookingRecord},
        directory::{Client, Professional, Service},
    },
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClient {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfessional {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub professional_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Booking joined with client and service; `start_time` is read as text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBookingRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub professional_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub status: String,
    pub client_name: Option<String>,
    pub service_name: Option<String>,
    pub service_duration: Option<i32>,
}

impl From<DbClient> for Client {
    fn from(row: DbClient) -> Self {
        Client {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            name: row.name,
            duration_minutes: row.duration_minutes,
        }
    }
}

impl From<DbProfessional> for Professional {
    fn from(row: DbProfessional) -> Self {
        Professional {
            id: row.id,
            name: row.name,
            active: row.active,
        }
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = AgendaError;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            client_id: row.client_id,
            service_id: row.service_id,
            professional_id: row.professional_id,
            date: row.booking_date,
            start_time: row.start_time,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<DbBookingRow> for BookingRecord {
    type Error = AgendaError;

    fn try_from(row: DbBookingRow) -> Result<Self, Self::Error> {
        Ok(BookingRecord {
            id: row.id,
            client_id: row.client_id,
            service_id: row.service_id,
            professional_id: row.professional_id,
            date: row.booking_date,
            start_time: row.start_time,
            status: row.status.parse()?,
            client_name: row.client_name,
            service_name: row.service_name,
            service_duration: row.service_duration,
        })
    }
}
