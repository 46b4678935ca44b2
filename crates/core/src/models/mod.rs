pub mod booking;
pub mod directory;
pub mod time_slot;
