use crate::model::{Appointment, Sec};

use super::{Schedule, ScheduleError};

impl Schedule {
    /// Generate `count` appointments starting at `first`, each subsequent one
    /// the prior shifted by `period`, adding them one by one. Fails fast on
    /// the first conflict, including self-conflicts among the generated run
    /// (a period shorter than the appointment's duration, or — under closed
    /// intervals — a period exactly equal to it, which makes consecutive
    /// copies share a boundary instant).
    pub fn add_repeating(
        &mut self,
        first: Appointment,
        period: Sec,
        count: u32,
    ) -> Result<(), ScheduleError> {
        if count < 1 {
            return Err(ScheduleError::InvalidArgument("repeat count must be at least 1"));
        }
        let mut cur = first;
        self.add(cur)?;
        for _ in 1..count {
            cur = cur.shifted(period);
            self.add(cur)?;
        }
        Ok(())
    }

    /// A fresh schedule holding a periodic run.
    pub fn repeating(first: Appointment, period: Sec, count: u32) -> Result<Self, ScheduleError> {
        let mut out = Schedule::empty();
        out.add_repeating(first, period, count)?;
        Ok(out)
    }

    /// One schedule holding every appointment of every input, in the
    /// iteration order given, failing at the first cross- or intra-schedule
    /// conflict.
    pub fn combine<'a>(
        schedules: impl IntoIterator<Item = &'a Schedule>,
    ) -> Result<Self, ScheduleError> {
        let mut out = Schedule::empty();
        for schedule in schedules {
            out.add_schedule(schedule)?;
        }
        Ok(out)
    }

    /// Expand every appointment into its own periodic run of `count` copies
    /// spaced by `period`, combined into a new schedule. `self` is unchanged,
    /// also on failure.
    pub fn repeat(&self, period: Sec, count: u32) -> Result<Schedule, ScheduleError> {
        let runs = self
            .appointments()
            .iter()
            .map(|&a| Schedule::repeating(a, period, count))
            .collect::<Result<Vec<_>, _>>()?;
        Schedule::combine(&runs)
    }

    /// Replace the appointment at `index` with its own periodic run of
    /// `count` copies, returning the new schedule. `self` is unchanged, also
    /// on failure.
    pub fn repeat_component(
        &self,
        period: Sec,
        count: u32,
        index: usize,
    ) -> Result<Schedule, ScheduleError> {
        if index >= self.len() {
            return Err(ScheduleError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        let mut out = self.clone();
        let to_repeat = out.cancel(index)?;
        out.add_repeating(to_repeat, period, count)?;
        Ok(out)
    }
}
