pub mod agenda;
pub mod booking;
pub mod health;
