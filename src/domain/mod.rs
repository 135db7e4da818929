//! Domain types for Summit
//!
//! This module contains all core domain types:
//! - Block: one of the two parallel time-slots
//! - Talk / Room: workshop topics and the spaces they run in
//! - Participant: an attendee with ranked preferences and one seat per block
//! - Occurrence: one scheduled run of a talk
//! - Schedule: the arena owning all of the above for a single run

pub mod block;
pub mod occurrence;
pub mod participant;
pub mod schedule;
pub mod talk;

pub use block::Block;
pub use occurrence::Occurrence;
pub use participant::Participant;
pub use schedule::Schedule;
pub use talk::{Room, Talk};
