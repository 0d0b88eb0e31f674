use crate::model::{Appointment, Sec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// An appointment's end precedes its start.
    InvalidInterval { start: Sec, end: Sec },
    /// Inserting would violate the non-overlap invariant; carries the
    /// existing appointment the candidate collided with.
    Overlapping(Appointment),
    /// A nonsensical parameter, e.g. a repeat count of zero.
    InvalidArgument(&'static str),
    /// Cancel/repeat index outside the current appointment sequence.
    IndexOutOfRange { index: usize, len: usize },
    /// A stored record is missing fields or has non-parseable timestamps.
    MalformedRecord(String),
    /// No entity registered under this id.
    NotFound(String),
    /// An entity is already registered under this id.
    AlreadyExists(String),
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::InvalidInterval { start, end } => {
                write!(f, "invalid interval: end {end} precedes start {start}")
            }
            ScheduleError::Overlapping(existing) => write!(
                f,
                "overlaps existing appointment [{}, {}]",
                existing.start(),
                existing.end()
            ),
            ScheduleError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            ScheduleError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} appointments")
            }
            ScheduleError::MalformedRecord(msg) => write!(f, "malformed record: {msg}"),
            ScheduleError::NotFound(id) => write!(f, "not found: {id}"),
            ScheduleError::AlreadyExists(id) => write!(f, "already exists: {id}"),
        }
    }
}

impl std::error::Error for ScheduleError {}
