use std::{
    sync::{PoisonError, RwLock},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::{BookingStore, Directory};
use crate::{
    errors::AgendaResult,
    models::{
        booking::{Booking, BookingRecord, BookingStatus, NewBooking, format_stored_time},
        directory::{Client, Professional, Service},
    },
};

#[derive(Debug, Clone)]
struct StoredBooking {
    id: Uuid,
    client_id: Uuid,
    service_id: Uuid,
    professional_id: Uuid,
    date: NaiveDate,
    start_time: String,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    clients: Vec<Client>,
    services: Vec<Service>,
    professionals: Vec<Professional>,
    bookings: Vec<StoredBooking>,
}

impl Tables {
    fn join(&self, row: &StoredBooking) -> BookingRecord {
        let client = self.clients.iter().find(|c| c.id == row.client_id);
        let service = self.services.iter().find(|s| s.id == row.service_id);

        BookingRecord {
            id: row.id,
            client_id: row.client_id,
            service_id: row.service_id,
            professional_id: row.professional_id,
            date: row.date,
            start_time: row.start_time.clone(),
            status: row.status,
            client_name: client.map(|c| c.name.clone()),
            service_name: service.map(|s| s.name.clone()),
            service_duration: service.and_then(|s| s.duration_minutes),
        }
    }
}

/// Store kept entirely in process memory.
///
/// Registries are seeded through the `add_*` methods. An optional latency
/// is awaited on every store call to mimic a remote database round trip.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    latency: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            tables: RwLock::default(),
            latency: Some(latency),
        }
    }

    pub fn add_client(&self, name: &str) -> Client {
        let client = Client {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.write().clients.push(client.clone());
        client
    }

    pub fn add_service(&self, name: &str, duration_minutes: Option<i32>) -> Service {
        let service = Service {
            id: Uuid::new_v4(),
            name: name.to_string(),
            duration_minutes,
        };
        self.write().services.push(service.clone());
        service
    }

    pub fn add_professional(&self, name: &str) -> Professional {
        let professional = Professional {
            id: Uuid::new_v4(),
            name: name.to_string(),
            active: true,
        };
        self.write().professionals.push(professional.clone());
        professional
    }

    /// Inserts a booking row with a start time taken verbatim, bypassing
    /// the scheduler. Used to load legacy rows.
    pub fn add_raw_booking(
        &self,
        client_id: Uuid,
        service_id: Uuid,
        professional_id: Uuid,
        date: NaiveDate,
        start_time: &str,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.write().bookings.push(StoredBooking {
            id,
            client_id,
            service_id,
            professional_id,
            date,
            start_time: start_time.to_string(),
            status: BookingStatus::Scheduled,
            created_at: Utc::now(),
        });
        id
    }

    pub fn booking_count(&self) -> usize {
        self.read().bookings.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    async fn round_trip(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn bookings_for_day(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> AgendaResult<Vec<BookingRecord>> {
        self.round_trip().await;
        let tables = self.read();
        Ok(tables
            .bookings
            .iter()
            .filter(|b| b.professional_id == professional_id && b.date == date)
            .map(|b| tables.join(b))
            .collect())
    }

    async fn all_bookings(&self) -> AgendaResult<Vec<BookingRecord>> {
        self.round_trip().await;
        let tables = self.read();
        Ok(tables.bookings.iter().map(|b| tables.join(b)).collect())
    }

    async fn insert_booking(&self, booking: &NewBooking) -> AgendaResult<Booking> {
        self.round_trip().await;
        let stored = StoredBooking {
            id: Uuid::new_v4(),
            client_id: booking.client_id,
            service_id: booking.service_id,
            professional_id: booking.professional_id,
            date: booking.date,
            start_time: format_stored_time(booking.start_time),
            status: booking.status,
            created_at: Utc::now(),
        };
        self.write().bookings.push(stored.clone());

        Ok(Booking {
            id: stored.id,
            client_id: stored.client_id,
            service_id: stored.service_id,
            professional_id: stored.professional_id,
            date: stored.date,
            start_time: booking.start_time,
            status: stored.status,
            created_at: stored.created_at,
        })
    }
}

#[async_trait]
impl Directory for MemoryStore {
    async fn clients(&self) -> AgendaResult<Vec<Client>> {
        self.round_trip().await;
        Ok(self.read().clients.clone())
    }

    async fn services(&self) -> AgendaResult<Vec<Service>> {
        self.round_trip().await;
        Ok(self.read().services.clone())
    }

    async fn professionals(&self) -> AgendaResult<Vec<Professional>> {
        self.round_trip().await;
        Ok(self.read().professionals.clone())
    }
}
