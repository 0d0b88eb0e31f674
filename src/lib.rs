//! Appointment scheduling and conflict detection.
//!
//! An [`Appointment`] is an immutable closed time interval; a [`Schedule`] is
//! an ordered, pairwise non-overlapping collection of appointments; a
//! [`Registry`] maps entity ids to schedules and refuses any merge that would
//! let two entities' schedules share an instant. All operations are plain
//! in-memory computations — persistence receives and supplies the record
//! types in [`model`] and owns the storage format itself.

pub mod codec;
pub mod model;
pub mod observability;
pub mod registry;
pub mod schedule;

pub use model::{Appointment, AppointmentRecord, ScheduleStatus, Sec};
pub use registry::Registry;
pub use schedule::{Schedule, ScheduleError};
