use std::collections::BTreeMap;

use dashmap::DashMap;
use tracing::debug;

use crate::model::{Appointment, AppointmentRecord, ScheduleStatus, Sec};
use crate::observability;
use crate::schedule::{now_sec, Schedule, ScheduleError};

/// Schedules keyed by entity id (a classroom, a room, a machine).
///
/// The registry owns no scheduling algorithms: every conflict decision is
/// delegated to [`Schedule`]. What it adds is the global invariant — no two
/// entities' schedules may overlap — enforced by a pairwise [`Schedule::overlaps`]
/// sweep before any merge is committed.
///
/// Reads are safe from multiple threads. Multi-step mutations (`book`,
/// `repeat`, `repeat_entry`, `restore`) assume the embedding application
/// serializes writers; the engine provides no transactional locking of its
/// own.
#[derive(Debug, Default)]
pub struct Registry {
    entries: DashMap<String, Schedule>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity with an empty schedule.
    pub fn create(&self, id: &str) -> Result<(), ScheduleError> {
        self.insert(id, Schedule::empty())
    }

    /// Register an entity with a prebuilt schedule, validating it against
    /// every existing entry first.
    pub fn insert(&self, id: &str, schedule: Schedule) -> Result<(), ScheduleError> {
        if self.entries.contains_key(id) {
            return Err(ScheduleError::AlreadyExists(id.to_string()));
        }
        self.check_others(id, &schedule)?;
        self.entries.insert(id.to_string(), schedule);
        metrics::gauge!(observability::ENTRIES_ACTIVE).increment(1.0);
        debug!(id, "entity registered");
        Ok(())
    }

    /// Remove an entity, returning its schedule.
    pub fn remove(&self, id: &str) -> Result<Schedule, ScheduleError> {
        let (_, schedule) = self
            .entries
            .remove(id)
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;
        metrics::gauge!(observability::ENTRIES_ACTIVE).decrement(1.0);
        debug!(id, "entity removed");
        Ok(schedule)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered entity ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// A snapshot of the entity's schedule. A copy: mutating it does not
    /// touch the registry.
    pub fn schedule(&self, id: &str) -> Result<Schedule, ScheduleError> {
        self.entries
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))
    }

    /// Merge `candidate` into the entity's schedule, refusing if it conflicts
    /// with the entity's own appointments or with any other entity's. Checks
    /// run before anything is committed, so a conflict leaves every schedule
    /// untouched.
    pub fn book(&self, id: &str, candidate: &Schedule) -> Result<(), ScheduleError> {
        self.check_others(id, candidate)?;
        let mut entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;
        if let Some(existing) = entry.conflict_with(candidate) {
            metrics::counter!(observability::CONFLICTS_TOTAL).increment(1);
            return Err(ScheduleError::Overlapping(existing));
        }
        entry.add_schedule(candidate)?;
        metrics::counter!(observability::MERGES_TOTAL).increment(1);
        debug!(id, added = candidate.len(), "schedule merged");
        Ok(())
    }

    /// Cancel the appointment at `index` on the entity's schedule.
    pub fn cancel(&self, id: &str, index: usize) -> Result<Appointment, ScheduleError> {
        let mut entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;
        let removed = entry.cancel(index)?;
        metrics::counter!(observability::CANCELS_TOTAL).increment(1);
        debug!(id, index, "appointment cancelled");
        Ok(removed)
    }

    /// Expand the entity's whole schedule into a periodic run. Only allowed
    /// while the schedule is continuous (zero or one appointments), where
    /// "repeat the whole thing" is unambiguous; otherwise the caller must
    /// name an entry via [`Registry::repeat_entry`].
    pub fn repeat(&self, id: &str, period: Sec, count: u32) -> Result<(), ScheduleError> {
        let current = self.schedule(id)?;
        if !current.is_continuous() {
            return Err(ScheduleError::InvalidArgument(
                "schedule has multiple appointments; repeat a single entry instead",
            ));
        }
        let expanded = current.repeat(period, count)?;
        self.replace(id, expanded)
    }

    /// Expand one appointment of the entity's schedule into a periodic run.
    pub fn repeat_entry(
        &self,
        id: &str,
        period: Sec,
        count: u32,
        index: usize,
    ) -> Result<(), ScheduleError> {
        let expanded = self.schedule(id)?.repeat_component(period, count, index)?;
        self.replace(id, expanded)
    }

    /// Entity ids whose schedule includes `now`, sorted.
    pub fn in_session_at(&self, now: Sec) -> Vec<String> {
        let mut ids: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.value().includes(now))
            .map(|e| e.key().clone())
            .collect();
        ids.sort();
        ids
    }

    /// [`Registry::in_session_at`] against the wall clock.
    pub fn in_session(&self) -> Vec<String> {
        self.in_session_at(now_sec())
    }

    pub fn status_at(&self, id: &str, now: Sec) -> Result<ScheduleStatus, ScheduleError> {
        self.entries
            .get(id)
            .map(|e| e.value().status_at(now))
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))
    }

    pub fn status(&self, id: &str) -> Result<ScheduleStatus, ScheduleError> {
        self.status_at(id, now_sec())
    }

    /// Dump every entity's schedule as plain records, keyed by id. Ordered
    /// both ways (sorted ids, ascending appointment starts) so the output is
    /// deterministic for the persistence layer.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<AppointmentRecord>> {
        self.entries
            .iter()
            .map(|e| (e.key().clone(), e.value().to_records()))
            .collect()
    }

    /// Rebuild a registry from a stored snapshot, replaying every record and
    /// re-validating the cross-entity invariant. Externally corrupted data —
    /// overlapping records within an entity or across entities — fails to
    /// load instead of resurrecting an invalid state.
    pub fn restore(
        snapshot: BTreeMap<String, Vec<AppointmentRecord>>,
    ) -> Result<Self, ScheduleError> {
        let registry = Self::new();
        for (id, records) in snapshot {
            let schedule = Schedule::from_records(records)?;
            registry.insert(&id, schedule)?;
        }
        debug!(entities = registry.count(), "registry restored");
        Ok(registry)
    }

    /// Swap in a replacement schedule after validating it against every
    /// other entry. The replacement already contains the entity's previous
    /// appointments, so only other entities need checking.
    fn replace(&self, id: &str, schedule: Schedule) -> Result<(), ScheduleError> {
        self.check_others(id, &schedule)?;
        let mut entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;
        *entry = schedule;
        metrics::counter!(observability::MERGES_TOTAL).increment(1);
        debug!(id, "schedule replaced");
        Ok(())
    }

    /// Pairwise sweep of every entity other than `id`.
    fn check_others(&self, id: &str, candidate: &Schedule) -> Result<(), ScheduleError> {
        for entry in self.entries.iter() {
            if entry.key() == id {
                continue;
            }
            if let Some(conflicting) = entry.value().conflict_with(candidate) {
                metrics::counter!(observability::CONFLICTS_TOTAL).increment(1);
                debug!(id, other = %entry.key(), "cross-entity conflict");
                return Err(ScheduleError::Overlapping(conflicting));
            }
        }
        Ok(())
    }
}
