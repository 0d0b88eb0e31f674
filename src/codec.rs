//! JSON text form of the record contract.
//!
//! A schedule is an ordered array of `{"start": <sec>, "end": <sec>}`
//! objects; a registry snapshot is an object keyed by entity id. This is one
//! concrete rendering of the plain structured data the engine produces and
//! consumes — the persistence layer is free to use another, as long as it
//! feeds records back in the same shape.

use std::collections::BTreeMap;

use crate::model::AppointmentRecord;
use crate::registry::Registry;
use crate::schedule::{Schedule, ScheduleError};

pub fn schedule_to_json(schedule: &Schedule) -> Result<String, ScheduleError> {
    serde_json::to_string(&schedule.to_records())
        .map_err(|e| ScheduleError::MalformedRecord(e.to_string()))
}

/// Parse an ordered array of appointment records and replay it into a
/// schedule. Shape and parse failures report `MalformedRecord`; inverted
/// intervals and overlaps keep their own error kinds.
pub fn schedule_from_json(json: &str) -> Result<Schedule, ScheduleError> {
    let records: Vec<AppointmentRecord> =
        serde_json::from_str(json).map_err(|e| ScheduleError::MalformedRecord(e.to_string()))?;
    Schedule::from_records(records)
}

pub fn snapshot_to_json(
    snapshot: &BTreeMap<String, Vec<AppointmentRecord>>,
) -> Result<String, ScheduleError> {
    serde_json::to_string(snapshot).map_err(|e| ScheduleError::MalformedRecord(e.to_string()))
}

/// Parse a registry snapshot and restore it, re-validating both the
/// per-entity and the cross-entity invariants.
pub fn registry_from_json(json: &str) -> Result<Registry, ScheduleError> {
    let snapshot: BTreeMap<String, Vec<AppointmentRecord>> =
        serde_json::from_str(json).map_err(|e| ScheduleError::MalformedRecord(e.to_string()))?;
    Registry::restore(snapshot)
}
