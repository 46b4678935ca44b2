//! Persistence seams consumed by the scheduler and the directory cache.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    errors::AgendaResult,
    models::{
        booking::{Booking, BookingRecord, NewBooking},
        directory::{Client, Professional, Service},
    },
};

/// Reads and writes appointment records.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Bookings of one professional on one day, joined with client and
    /// service details, in store order.
    async fn bookings_for_day(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> AgendaResult<Vec<BookingRecord>>;

    async fn all_bookings(&self) -> AgendaResult<Vec<BookingRecord>>;

    async fn insert_booking(&self, booking: &NewBooking) -> AgendaResult<Booking>;
}

/// Read access to the client, service and professional registries.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn clients(&self) -> AgendaResult<Vec<Client>>;

    async fn services(&self) -> AgendaResult<Vec<Service>>;

    async fn professionals(&self) -> AgendaResult<Vec<Professional>>;
}
