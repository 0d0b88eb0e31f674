mod error;
mod queries;
mod repeat;

pub use error::ScheduleError;
pub(crate) use queries::now_sec;

use crate::model::{Appointment, AppointmentRecord};

/// An ordered, conflict-free collection of appointments.
///
/// The sequence is always sorted ascending by start and pairwise
/// non-overlapping — the invariant the whole engine exists to protect. Under
/// it, starts and ends are both strictly increasing, which is what makes the
/// binary searches in [`Schedule::add`] and [`Schedule::includes`] valid.
///
/// A schedule has no identity of its own; binding one to an entity is the
/// [`crate::registry::Registry`]'s job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    appointments: Vec<Appointment>,
}

impl Schedule {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(appointment: Appointment) -> Self {
        Self {
            appointments: vec![appointment],
        }
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// A schedule of zero or one appointments, i.e. one where "repeat the
    /// whole thing" is unambiguous.
    pub fn is_continuous(&self) -> bool {
        self.appointments.len() <= 1
    }

    /// Read-only view of the appointments, ascending by start. The slice
    /// cannot be used to mutate the schedule's internal ordering.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Insert one appointment, keeping the sequence sorted. Fails with
    /// [`ScheduleError::Overlapping`] and leaves the schedule untouched if
    /// the candidate shares an instant with any existing appointment.
    pub fn add(&mut self, appointment: Appointment) -> Result<(), ScheduleError> {
        let pos = self
            .appointments
            .partition_point(|a| a.start() <= appointment.start());
        // Starts and ends both increase strictly, so only the two insertion
        // neighbors can reach the candidate's interval.
        if pos > 0 {
            let prev = self.appointments[pos - 1];
            if prev.overlaps(&appointment) {
                return Err(ScheduleError::Overlapping(prev));
            }
        }
        if pos < self.appointments.len() {
            let next = self.appointments[pos];
            if next.overlaps(&appointment) {
                return Err(ScheduleError::Overlapping(next));
            }
        }
        self.appointments.insert(pos, appointment);
        Ok(())
    }

    /// Add every appointment of `other` into `self`, in order, failing fast
    /// at the first conflict. Deliberately non-atomic: a later failure leaves
    /// the earlier inserts in place. Callers needing all-or-nothing must
    /// pre-check with [`Schedule::overlaps`].
    pub fn add_schedule(&mut self, other: &Schedule) -> Result<(), ScheduleError> {
        for &appointment in &other.appointments {
            self.add(appointment)?;
        }
        Ok(())
    }

    /// Remove and return the appointment at `index`.
    pub fn cancel(&mut self, index: usize) -> Result<Appointment, ScheduleError> {
        if index >= self.appointments.len() {
            return Err(ScheduleError::IndexOutOfRange {
                index,
                len: self.appointments.len(),
            });
        }
        Ok(self.appointments.remove(index))
    }

    /// Dump the schedule as an ordered sequence of plain records, ascending
    /// by start. The persistence layer owns the storage format.
    pub fn to_records(&self) -> Vec<AppointmentRecord> {
        self.appointments
            .iter()
            .copied()
            .map(AppointmentRecord::from)
            .collect()
    }

    /// Rebuild a schedule by replaying [`Schedule::add`] for each record in
    /// order. Externally corrupted data — inverted intervals or overlapping
    /// records — fails to load rather than being silently accepted.
    pub fn from_records(
        records: impl IntoIterator<Item = AppointmentRecord>,
    ) -> Result<Self, ScheduleError> {
        let mut out = Schedule::empty();
        for record in records {
            out.add(Appointment::try_from(record)?)?;
        }
        Ok(out)
    }
}

impl TryFrom<Vec<AppointmentRecord>> for Schedule {
    type Error = ScheduleError;

    fn try_from(records: Vec<AppointmentRecord>) -> Result<Self, ScheduleError> {
        Schedule::from_records(records)
    }
}
