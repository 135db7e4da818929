//! Summit - a two-block workshop scheduler
//!
//! Summit seats conference participants into two parallel blocks of workshop
//! sessions from their ranked preferences: popular talks run twice, blocks are
//! chosen to keep competing talks apart, rooms are assigned by size, and an
//! optimizer repairs over- and under-filled sessions.

pub mod domain;
pub mod error;
pub mod id;
pub mod input;
pub mod report;
pub mod scheduler;

pub use domain::{Block, Occurrence, Participant, Room, Schedule, Talk};
pub use error::{Result, SummitError};
pub use input::EventInput;
pub use report::{ReportConfig, ScheduleReport};
pub use scheduler::{RunOutcome, Scheduler, SchedulerConfig};
