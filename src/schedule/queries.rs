use crate::model::{Appointment, ScheduleStatus, Sec};

use super::Schedule;

pub(crate) fn now_sec() -> Sec {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as Sec)
        .unwrap_or(0)
}

impl Schedule {
    /// True iff some appointment includes `instant`.
    ///
    /// Binary search for the latest appointment whose start is at or before
    /// the instant; if none exists the instant precedes every appointment and
    /// the answer is false, otherwise only that one candidate can contain it.
    pub fn includes(&self, instant: Sec) -> bool {
        let candidates = self
            .appointments()
            .partition_point(|a| a.start() <= instant);
        match candidates {
            0 => false,
            n => self.appointments()[n - 1].includes(instant),
        }
    }

    /// First appointment of `self` that overlaps any appointment of `other`,
    /// if one exists. Both sequences are sorted, so a single merge scan
    /// suffices: whichever current appointment ends first can't overlap
    /// anything later in the other sequence.
    pub fn conflict_with(&self, other: &Schedule) -> Option<Appointment> {
        let (mut i, mut j) = (0, 0);
        let (ours, theirs) = (self.appointments(), other.appointments());
        while i < ours.len() && j < theirs.len() {
            if ours[i].overlaps(&theirs[j]) {
                return Some(ours[i]);
            }
            if ours[i].end() < theirs[j].end() {
                i += 1;
            } else {
                j += 1;
            }
        }
        None
    }

    /// True iff any appointment in `self` overlaps any appointment in
    /// `other`. This is the primary conflict-detection entry point: call it
    /// before any `add`/`add_schedule` whose atomicity matters.
    pub fn overlaps(&self, other: &Schedule) -> bool {
        self.conflict_with(other).is_some()
    }

    /// Lifecycle of this schedule at the given instant.
    ///
    /// `Post` starts at exactly the last appointment's end; see
    /// [`ScheduleStatus`] for the boundary convention.
    pub fn status_at(&self, now: Sec) -> ScheduleStatus {
        let (Some(first), Some(last)) =
            (self.appointments().first(), self.appointments().last())
        else {
            return ScheduleStatus::Empty;
        };
        if now < first.start() {
            ScheduleStatus::Pre
        } else if now >= last.end() {
            ScheduleStatus::Post
        } else {
            ScheduleStatus::During
        }
    }

    /// [`Schedule::status_at`] against the wall clock.
    pub fn status(&self) -> ScheduleStatus {
        self.status_at(now_sec())
    }
}
