//! # Appointment Scheduler
//!
//! Decides whether a proposed appointment may be created and enumerates
//! free capacity for display.
//!
//! The pure operations live in the submodules:
//!
//! - [`check_conflict`]: half-open interval overlap against the day's bookings
//! - [`derive_slot_grid`]: lazy fixed-width grid marked by real booking intervals
//! - [`free_whole_hours`]: whole hours on which no booking starts exactly
//!
//! [`AppointmentScheduler`] wires them to the stores. Booking creation runs
//! fetch, check and insert while holding a lock for the
//! `(professional, date)` pair, so two overlapping requests for the same
//! calendar can never both be written.

mod conflict;
mod grid;

pub use conflict::{Conflict, ConflictCheck, Interval, ProposedBooking, check_conflict};
pub use grid::{SlotGrid, SlotGridIter, WholeHours, derive_slot_grid, free_whole_hours};

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use chrono::{NaiveDate, NaiveTime, Timelike};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    cache::{DirectoryCache, DirectorySnapshot},
    errors::{AgendaError, AgendaResult},
    models::{
        booking::{
            Booking, BookingListResponse, BookingListing, BookingStatus, CreateBookingRequest,
            NewBooking,
        },
        time_slot::{FreeHoursResponse, SlotGridResponse},
    },
    store::BookingStore,
};

/// Outcome of a booking attempt. A conflict is a regular answer, not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingDecision {
    Booked { booking: Booking, end_time: NaiveTime },
    Rejected(Conflict),
}

type DayKey = (Uuid, NaiveDate);

pub struct AppointmentScheduler {
    store: Arc<dyn BookingStore>,
    cache: Arc<DirectoryCache>,
    grid: SlotGrid,
    day_locks: Mutex<HashMap<DayKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl AppointmentScheduler {
    pub fn new(store: Arc<dyn BookingStore>, cache: Arc<DirectoryCache>, grid: SlotGrid) -> Self {
        Self {
            store,
            cache,
            grid,
            day_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn cache(&self) -> &Arc<DirectoryCache> {
        &self.cache
    }

    /// Creates a booking unless it collides with an existing one.
    ///
    /// # Errors
    ///
    /// * `AgendaError::Validation` - a registry is empty, so no booking can be offered
    ///   or the appointment would end past the last representable date
    /// * `AgendaError::Database` - the day's bookings could not be read or the insert failed
    pub async fn book(&self, request: &CreateBookingRequest) -> AgendaResult<BookingDecision> {
        let snapshot = self.cache.snapshot().await?;

        let missing = snapshot.missing_registries();
        if !missing.is_empty() {
            return Err(AgendaError::Validation(format!(
                "Cannot book without registered {}",
                missing.join(", ")
            )));
        }

        if snapshot.service(request.service_id).is_none() {
            debug!(service_id = %request.service_id, "Unknown service, using default duration");
        }
        // Stored times carry whole seconds only.
        let start_time = request
            .start_time
            .with_nanosecond(0)
            .unwrap_or(request.start_time);
        let proposed = ProposedBooking {
            date: request.date,
            start_time,
            duration_minutes: snapshot.service_duration(request.service_id),
        };
        let wanted = proposed.checked_interval().ok_or_else(|| {
            AgendaError::Validation(format!(
                "Booking on {} at {} runs past the end of the calendar",
                request.date,
                start_time.format("%H:%M")
            ))
        })?;

        let lock = self.day_lock((request.professional_id, request.date));
        let _guard = lock.lock().await;

        let existing = self
            .store
            .bookings_for_day(request.professional_id, request.date)
            .await?;

        let check = check_conflict(&existing, &proposed);
        if let Some(conflict) = check.conflict {
            warn!(
                professional_id = %request.professional_id,
                date = %request.date,
                "Booking rejected: {}",
                conflict
            );
            return Ok(BookingDecision::Rejected(conflict));
        }

        let booking = self
            .store
            .insert_booking(&NewBooking {
                client_id: request.client_id,
                service_id: request.service_id,
                professional_id: request.professional_id,
                date: request.date,
                start_time,
                status: BookingStatus::Scheduled,
            })
            .await?;

        self.cache.invalidate().await;

        let end_time = wanted.end.time();
        info!(
            booking_id = %booking.id,
            professional_id = %booking.professional_id,
            date = %booking.date,
            "Booked {} - {}",
            booking.start_time.format("%H:%M"),
            end_time.format("%H:%M")
        );

        Ok(BookingDecision::Booked { booking, end_time })
    }

    /// Display grid for one professional's day, read fresh from the store.
    ///
    /// # Errors
    ///
    /// * `AgendaError::NotFound` - the professional is unknown even after a cache reload
    /// * `AgendaError::Database` - the day's bookings could not be read
    pub async fn slot_grid(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> AgendaResult<SlotGridResponse> {
        self.require_professional(professional_id).await?;

        let existing = self.store.bookings_for_day(professional_id, date).await?;

        let mut slots = derive_slot_grid(&existing, date, &self.grid);
        let collected: Vec<_> = slots.by_ref().collect();

        Ok(SlotGridResponse {
            professional_id,
            date,
            slots: collected,
            skipped_records: slots.skipped(),
        })
    }

    /// Whole-hour free list for a day from the cached snapshot, across all
    /// professionals unless one is given.
    pub async fn free_hours(
        &self,
        date: NaiveDate,
        professional_id: Option<Uuid>,
    ) -> AgendaResult<FreeHoursResponse> {
        let snapshot = self.cache.snapshot().await?;
        let bookings = snapshot.bookings_on(date, professional_id);
        let hours = free_whole_hours(&bookings, &self.grid);

        Ok(FreeHoursResponse {
            date,
            professional_id,
            free_hours: hours.free,
            skipped_records: hours.skipped,
        })
    }

    /// Agenda listing from the cached snapshot. Both filters are optional.
    pub async fn list_bookings(
        &self,
        date: Option<NaiveDate>,
        professional_id: Option<Uuid>,
    ) -> AgendaResult<BookingListResponse> {
        let snapshot = self.cache.snapshot().await?;

        let bookings: Vec<BookingListing> = snapshot
            .bookings_where(date, professional_id)
            .map(|record| BookingListing {
                id: record.id,
                date: record.date,
                start_time: record.start_time.clone(),
                client_name: record.client_name.clone(),
                service_name: record.service_name.clone(),
                professional_name: snapshot
                    .professional(record.professional_id)
                    .map(|p| p.name.clone()),
                status: record.status,
            })
            .collect();

        Ok(BookingListResponse {
            date,
            professional_id,
            count: bookings.len(),
            bookings,
        })
    }

    async fn require_professional(&self, professional_id: Uuid) -> AgendaResult<()> {
        let known =
            |snapshot: &DirectorySnapshot| snapshot.professional(professional_id).is_some();

        if known(&*self.cache.snapshot().await?) {
            return Ok(());
        }
        // The registry is edited elsewhere; refresh once before giving up.
        if known(&*self.cache.reload().await?) {
            return Ok(());
        }

        Err(AgendaError::NotFound(format!(
            "Professional with ID {} not found",
            professional_id
        )))
    }

    fn day_lock(&self, key: DayKey) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.day_locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Entries nobody holds or waits on are only referenced by the map.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(key).or_default())
    }
}
