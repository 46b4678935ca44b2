use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use super::conflict::Interval;
use crate::{
    errors::{AgendaError, AgendaResult},
    models::{
        booking::BookingRecord,
        time_slot::{SlotStatus, TimeSlot},
    },
};

/// Opening hours and step of the display grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    open: NaiveTime,
    close: NaiveTime,
    step_minutes: i64,
}

impl SlotGrid {
    pub fn new(open: NaiveTime, close: NaiveTime, step_minutes: i64) -> AgendaResult<Self> {
        if step_minutes <= 0 {
            return Err(AgendaError::Validation(format!(
                "Slot step must be positive, got {} minutes",
                step_minutes
            )));
        }
        if close <= open {
            return Err(AgendaError::Validation(format!(
                "Agenda closes at {} which is not after opening at {}",
                close.format("%H:%M"),
                open.format("%H:%M")
            )));
        }

        Ok(Self {
            open,
            close,
            step_minutes,
        })
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    pub fn step_minutes(&self) -> i64 {
        self.step_minutes
    }

    /// Every whole hour `h:00` with `open <= h:00 < close`.
    pub fn whole_hours(&self) -> impl Iterator<Item = NaiveTime> {
        let (open, close) = (self.open, self.close);
        (0..24)
            .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
            .filter(move |t| *t >= open && *t < close)
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        let midnight = NaiveTime::default();
        Self {
            open: midnight + Duration::hours(8),
            close: midnight + Duration::hours(19),
            step_minutes: 30,
        }
    }
}

struct Occupant<'a> {
    interval: Interval,
    client: &'a str,
    service: &'a str,
}

/// Lazily walks the grid of one day, marking each slot that overlaps a
/// booking's real interval as occupied.
pub struct SlotGridIter<'a> {
    occupants: Vec<Occupant<'a>>,
    cursor: NaiveDateTime,
    close: NaiveDateTime,
    step: Duration,
    skipped: usize,
}

impl SlotGridIter<'_> {
    /// Records ignored because their stored start time could not be parsed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for SlotGridIter<'_> {
    type Item = TimeSlot;

    fn next(&mut self) -> Option<TimeSlot> {
        if self.cursor >= self.close {
            return None;
        }

        let window = Interval {
            start: self.cursor,
            end: self
                .cursor
                .checked_add_signed(self.step)
                .unwrap_or(NaiveDateTime::MAX),
        };
        self.cursor = window.end;

        let occupant = self
            .occupants
            .iter()
            .find(|o| window.overlaps(&o.interval));

        Some(match occupant {
            Some(o) => TimeSlot {
                start_time: window.start.time(),
                end_time: window.end.time(),
                status: SlotStatus::Occupied,
                occupying_client: Some(o.client.to_string()),
                occupying_service: Some(o.service.to_string()),
            },
            None => TimeSlot {
                start_time: window.start.time(),
                end_time: window.end.time(),
                status: SlotStatus::Free,
                occupying_client: None,
                occupying_service: None,
            },
        })
    }
}

/// Builds the display grid for `date`. The grid never blocks a booking; it
/// only reflects which windows overlap existing appointments.
pub fn derive_slot_grid<'a>(
    existing: &'a [BookingRecord],
    date: NaiveDate,
    grid: &SlotGrid,
) -> SlotGridIter<'a> {
    let mut skipped = 0;
    let mut occupants = Vec::with_capacity(existing.len());

    for record in existing {
        match Interval::of_record(record) {
            Ok(interval) => occupants.push(Occupant {
                interval,
                client: record.client_name.as_deref().unwrap_or("?"),
                service: record.service_name.as_deref().unwrap_or("?"),
            }),
            Err(e) => {
                warn!(booking_id = %record.id, "Skipping booking on slot grid: {}", e);
                skipped += 1;
            }
        }
    }

    SlotGridIter {
        occupants,
        cursor: date.and_time(grid.open),
        close: date.and_time(grid.close),
        step: Duration::minutes(grid.step_minutes),
        skipped,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WholeHours {
    pub free: Vec<NaiveTime>,
    pub skipped: usize,
}

/// Whole hours of the grid on which no booking starts exactly.
///
/// Durations are ignored: a 09:00 booking lasting two hours leaves 10:00
/// free here, while the slot grid shows it occupied.
pub fn free_whole_hours(existing: &[BookingRecord], grid: &SlotGrid) -> WholeHours {
    let mut skipped = 0;
    let mut starts = Vec::with_capacity(existing.len());

    for record in existing {
        match record.parsed_start() {
            Ok(start) => starts.push(start),
            Err(e) => {
                warn!(booking_id = %record.id, "Skipping booking in free-hour list: {}", e);
                skipped += 1;
            }
        }
    }

    let free = grid
        .whole_hours()
        .filter(|hour| !starts.contains(hour))
        .collect();

    WholeHours { free, skipped }
}
