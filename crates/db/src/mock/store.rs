use agenda_core::{
    errors::AgendaResult,
    models::{
        booking::{Booking, BookingRecord, NewBooking},
        directory::{Client, Professional, Service},
    },
    store::{BookingStore, Directory},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use uuid::Uuid;

// Mock store for testing
mock! {
    pub Store {}

    #[async_trait]
    impl BookingStore for Store {
        async fn bookings_for_day(
            &self,
            professional_id: Uuid,
            date: NaiveDate,
        ) -> AgendaResult<Vec<BookingRecord>>;

        async fn all_bookings(&self) -> AgendaResult<Vec<BookingRecord>>;

        async fn insert_booking(&self, booking: &NewBooking) -> AgendaResult<Booking>;
    }

    #[async_trait]
    impl Directory for Store {
        async fn clients(&self) -> AgendaResult<Vec<Client>>;

        async fn services(&self) -> AgendaResult<Vec<Service>>;

        async fn professionals(&self) -> AgendaResult<Vec<Professional>>;
    }
}
