use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::{errors::TimeParseError, models::booking::BookingRecord};

/// A half-open `[start, end)` span on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    /// Builds the interval, saturating at the ends of the calendar.
    pub fn new(date: NaiveDate, start: NaiveTime, duration_minutes: i64) -> Self {
        Self::checked(date, start, duration_minutes).unwrap_or_else(|| {
            let start = date.and_time(start);
            let end = if duration_minutes < 0 {
                NaiveDateTime::MIN
            } else {
                NaiveDateTime::MAX
            };
            Self { start, end }
        })
    }

    /// `None` when the end falls outside the representable calendar.
    pub fn checked(date: NaiveDate, start: NaiveTime, duration_minutes: i64) -> Option<Self> {
        let start = date.and_time(start);
        let end = start.checked_add_signed(Duration::minutes(duration_minutes))?;
        Some(Self { start, end })
    }

    /// Touching intervals (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Interval actually occupied by a stored booking.
    pub fn of_record(record: &BookingRecord) -> Result<Self, TimeParseError> {
        let start = record.parsed_start()?;
        Ok(Self::new(record.date, start, record.duration_minutes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedBooking {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
}

impl ProposedBooking {
    pub fn interval(&self) -> Interval {
        Interval::new(self.date, self.start_time, self.duration_minutes)
    }

    pub fn checked_interval(&self) -> Option<Interval> {
        Interval::checked(self.date, self.start_time, self.duration_minutes)
    }
}

/// The existing booking a proposal collided with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub booking_id: Uuid,
    pub client_name: Option<String>,
    pub service_name: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Conflict with {} from {} to {}",
            self.service_name.as_deref().unwrap_or("?"),
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M"),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictCheck {
    pub conflict: Option<Conflict>,
    /// Records ignored because their stored start time could not be parsed.
    pub skipped: usize,
}

impl ConflictCheck {
    pub fn is_clear(&self) -> bool {
        self.conflict.is_none()
    }
}

/// Scans `existing` in order and reports the first booking whose interval
/// overlaps the proposal. Records with malformed start times are skipped
/// and counted.
pub fn check_conflict(existing: &[BookingRecord], proposed: &ProposedBooking) -> ConflictCheck {
    let wanted = proposed.interval();
    let mut skipped = 0;

    for record in existing {
        let interval = match Interval::of_record(record) {
            Ok(interval) => interval,
            Err(e) => {
                warn!(booking_id = %record.id, "Skipping booking during conflict scan: {}", e);
                skipped += 1;
                continue;
            }
        };

        if wanted.overlaps(&interval) {
            return ConflictCheck {
                conflict: Some(Conflict {
                    booking_id: record.id,
                    client_name: record.client_name.clone(),
                    service_name: record.service_name.clone(),
                    start_time: interval.start.time(),
                    end_time: interval.end.time(),
                }),
                skipped,
            };
        }
    }

    ConflictCheck {
        conflict: None,
        skipped,
    }
}
