//! PostgreSQL implementation of the scheduler's store traits.

use agenda_core::{
    errors::{AgendaError, AgendaResult},
    models::{
        booking::{Booking, BookingRecord, NewBooking},
        directory::{Client, Professional, Service},
    },
    store::{BookingStore, Directory},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    DbPool,
    repositories::{booking, registry},
};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn bookings_for_day(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> AgendaResult<Vec<BookingRecord>> {
        booking::get_bookings_for_day(&self.pool, professional_id, date)
            .await
            .map_err(AgendaError::Database)?
            .into_iter()
            .map(BookingRecord::try_from)
            .collect()
    }

    async fn all_bookings(&self) -> AgendaResult<Vec<BookingRecord>> {
        booking::get_all_bookings(&self.pool)
            .await
            .map_err(AgendaError::Database)?
            .into_iter()
            .map(BookingRecord::try_from)
            .collect()
    }

    async fn insert_booking(&self, new: &NewBooking) -> AgendaResult<Booking> {
        let row = booking::create_booking(
            &self.pool,
            new.client_id,
            new.service_id,
            new.professional_id,
            new.date,
            new.start_time,
            new.status.as_str(),
        )
        .await
        .map_err(AgendaError::Database)?;

        Booking::try_from(row)
    }
}

#[async_trait]
impl Directory for PgStore {
    async fn clients(&self) -> AgendaResult<Vec<Client>> {
        let rows = registry::get_clients(&self.pool)
            .await
            .map_err(AgendaError::Database)?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn services(&self) -> AgendaResult<Vec<Service>> {
        let rows = registry::get_services(&self.pool)
            .await
            .map_err(AgendaError::Database)?;
        Ok(rows.into_iter().map(Service::from).collect())
    }

    async fn professionals(&self) -> AgendaResult<Vec<Professional>> {
        let rows = registry::get_professionals(&self.pool)
            .await
            .map_err(AgendaError::Database)?;
        Ok(rows.into_iter().map(Professional::from).collect())
    }
}
