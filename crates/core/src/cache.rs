//! # Directory Cache
//!
//! Holds one snapshot of the registries and bookings shared by every
//! request. The snapshot is loaded lazily, replaced wholesale by
//! [`DirectoryCache::reload`], and dropped by [`DirectoryCache::invalidate`]
//! so that the next reader fetches fresh data.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    errors::AgendaResult,
    models::{
        booking::{BookingRecord, DEFAULT_DURATION_MINUTES},
        directory::{Client, Professional, Service},
    },
    store::{BookingStore, Directory},
};

#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    pub clients: Vec<Client>,
    pub services: Vec<Service>,
    pub professionals: Vec<Professional>,
    pub bookings: Vec<BookingRecord>,
    pub loaded_at: DateTime<Utc>,
}

impl DirectorySnapshot {
    pub fn service(&self, id: Uuid) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Duration of a service in minutes; unknown services and services
    /// without a duration fall back to the default.
    pub fn service_duration(&self, id: Uuid) -> i64 {
        self.service(id)
            .and_then(|s| s.duration_minutes)
            .map(i64::from)
            .unwrap_or(DEFAULT_DURATION_MINUTES)
    }

    pub fn professional(&self, id: Uuid) -> Option<&Professional> {
        self.professionals.iter().find(|p| p.id == id)
    }

    /// Bookings on `date`, optionally narrowed to one professional.
    pub fn bookings_on(&self, date: NaiveDate, professional_id: Option<Uuid>) -> Vec<BookingRecord> {
        self.bookings_where(Some(date), professional_id)
            .cloned()
            .collect()
    }

    /// Bookings in snapshot order; `None` filters match everything.
    pub fn bookings_where(
        &self,
        date: Option<NaiveDate>,
        professional_id: Option<Uuid>,
    ) -> impl Iterator<Item = &BookingRecord> {
        self.bookings
            .iter()
            .filter(move |b| date.is_none_or(|d| b.date == d))
            .filter(move |b| professional_id.is_none_or(|id| b.professional_id == id))
    }

    /// Names of the registries that are empty. A booking cannot be offered
    /// while any of them is.
    pub fn missing_registries(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.clients.is_empty() {
            missing.push("clients");
        }
        if self.services.is_empty() {
            missing.push("services");
        }
        if self.professionals.is_empty() {
            missing.push("professionals");
        }
        missing
    }
}

pub struct DirectoryCache {
    directory: Arc<dyn Directory>,
    bookings: Arc<dyn BookingStore>,
    snapshot: RwLock<Option<Arc<DirectorySnapshot>>>,
}

impl DirectoryCache {
    pub fn new(directory: Arc<dyn Directory>, bookings: Arc<dyn BookingStore>) -> Self {
        Self {
            directory,
            bookings,
            snapshot: RwLock::new(None),
        }
    }

    /// Returns the current snapshot, loading it first when absent.
    pub async fn snapshot(&self) -> AgendaResult<Arc<DirectorySnapshot>> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let mut guard = self.snapshot.write().await;
        // Another reader may have loaded it while we waited for the write lock.
        if let Some(snapshot) = guard.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let snapshot = Arc::new(self.load().await?);
        *guard = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Fetches a fresh snapshot and swaps it in. On failure the previous
    /// snapshot stays in place.
    ///
    /// The write lock is held for the whole load, so an `invalidate` issued
    /// meanwhile lands after the swap instead of being overwritten by it.
    pub async fn reload(&self) -> AgendaResult<Arc<DirectorySnapshot>> {
        let mut guard = self.snapshot.write().await;
        let snapshot = Arc::new(self.load().await?);
        *guard = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    pub async fn invalidate(&self) {
        debug!("Invalidating directory snapshot");
        *self.snapshot.write().await = None;
    }

    pub async fn is_loaded(&self) -> bool {
        self.snapshot.read().await.is_some()
    }

    async fn load(&self) -> AgendaResult<DirectorySnapshot> {
        let clients = self.directory.clients().await?;
        let services = self.directory.services().await?;
        let professionals = self.directory.professionals().await?;
        let bookings = self.bookings.all_bookings().await?;

        info!(
            clients = clients.len(),
            services = services.len(),
            professionals = professionals.len(),
            bookings = bookings.len(),
            "Directory snapshot loaded"
        );

        Ok(DirectorySnapshot {
            clients,
            services,
            professionals,
            bookings,
            loaded_at: Utc::now(),
        })
    }
}
