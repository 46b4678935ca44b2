//! # Agenda Core
//!
//! Domain types and scheduling logic for the pharmacy appointment agenda.
//!
//! - **models**: bookings, registries and derived display slots
//! - **scheduler**: conflict detection, slot grid and free-hour derivation,
//!   and the serialized booking workflow
//! - **cache**: the explicit directory snapshot shared by the scheduler
//! - **store**: persistence seams plus an in-memory implementation

pub mod cache;
pub mod errors;
pub mod models;
pub mod scheduler;
pub mod store;
