use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleError;

/// Unix seconds — the only time type. Durations are plain `Sec` too.
pub type Sec = i64;

/// An immutable closed interval `[start, end]`, inclusive on both ends.
///
/// The inclusive convention is applied everywhere: an instant equal to either
/// bound is inside, and two appointments sharing a single boundary instant
/// overlap. `start <= end` is enforced at construction, so every live value
/// is a valid interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "AppointmentRecord", into = "AppointmentRecord")]
pub struct Appointment {
    start: Sec,
    end: Sec,
}

impl Appointment {
    pub fn new(start: Sec, end: Sec) -> Result<Self, ScheduleError> {
        if start > end {
            return Err(ScheduleError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Sec {
        self.start
    }

    pub fn end(&self) -> Sec {
        self.end
    }

    pub fn duration(&self) -> Sec {
        self.end - self.start
    }

    /// True iff `start <= instant <= end`.
    pub fn includes(&self, instant: Sec) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Full closed-interval overlap test: true iff the two intervals share at
    /// least one instant. Symmetric, and catches strict containment as well
    /// as boundary contact.
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Both bounds advanced by `duration` (which may be negative). The
    /// original is unchanged; the result is always a valid interval.
    pub fn shifted(&self, duration: Sec) -> Appointment {
        Appointment {
            start: self.start + duration,
            end: self.end + duration,
        }
    }
}

/// The serialized form of one appointment: two named epoch-second fields.
/// This is the unit of the persistence contract — storage hands the engine
/// ordered sequences of these and receives the same back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub start: Sec,
    pub end: Sec,
}

impl From<Appointment> for AppointmentRecord {
    fn from(a: Appointment) -> Self {
        Self {
            start: a.start,
            end: a.end,
        }
    }
}

impl TryFrom<AppointmentRecord> for Appointment {
    type Error = ScheduleError;

    fn try_from(r: AppointmentRecord) -> Result<Self, ScheduleError> {
        Appointment::new(r.start, r.end)
    }
}

/// Coarse lifecycle of a schedule relative to an instant. Derived on every
/// call from `{now, first.start, last.end}` — nothing is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleStatus {
    /// No appointments.
    Empty,
    /// The instant precedes the first appointment's start.
    Pre,
    /// Between the first start and the last end.
    During,
    /// The instant is at or past the last appointment's end. Post begins the
    /// instant the final appointment ends, even though `includes` still
    /// reports that boundary instant as inside.
    Post,
}
