//! Talks and rooms
//!
//! A talk is a workshop topic that runs once or twice; a room is a physical
//! space whose usable headcount is its capacity minus a safety buffer.

use crate::domain::Block;
use crate::error::{Result, SummitError};
use crate::id::OccurrenceIdx;
use serde::{Deserialize, Serialize};

/// A workshop topic that may be scheduled once or twice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Talk {
    //=== Identity ===
    /// Short id used in participant rankings
    pub talk_id: String,

    /// Display title
    pub title: String,

    /// Presenter name
    pub presenter: String,

    //=== Constraints ===
    /// How many times this talk may run (1 or 2)
    pub max_runs: u8,

    /// Block this talk is pinned to, if any
    pub block_restriction: Option<Block>,

    //=== Scheduling state ===
    /// Popularity weight, recomputed each run
    pub demand_score: u32,

    /// Scheduled instances in run order
    pub(crate) occurrences: Vec<OccurrenceIdx>,
}

impl Talk {
    /// Create a talk, validating `max_runs` and the raw block restriction
    pub fn new(talk_id: &str, max_runs: u8, restriction: u8) -> Result<Self> {
        if !(1..=2).contains(&max_runs) {
            return Err(SummitError::InvalidMaxRuns {
                talk_id: talk_id.to_string(),
                value: max_runs,
            });
        }
        let block_restriction = Block::from_restriction(talk_id, restriction)?;

        Ok(Self {
            talk_id: talk_id.to_string(),
            title: talk_id.to_string(),
            presenter: String::new(),
            max_runs,
            block_restriction,
            demand_score: 0,
            occurrences: vec![],
        })
    }

    /// Set the display title
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set the presenter
    pub fn with_presenter(mut self, presenter: &str) -> Self {
        self.presenter = presenter.to_string();
        self
    }

    /// Scheduled instances in run order
    pub fn occurrences(&self) -> &[OccurrenceIdx] {
        &self.occurrences
    }

    /// True once the talk has been granted a second run
    pub fn is_double_run(&self) -> bool {
        self.occurrences.len() == 2
    }

    /// True if the talk may be given a second run at all
    pub fn can_run_twice(&self) -> bool {
        self.max_runs == 2 && self.block_restriction.is_none()
    }
}

/// A physical room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    /// Nominal seat count
    pub capacity: u32,
    /// Seat count after the safety buffer, fixed at load
    pub effective_capacity: u32,
}

impl Room {
    /// Create a room, reserving `buffer` (a fraction in [0, 1)) as headroom
    pub fn new(name: &str, capacity: u32, buffer: f64) -> Self {
        let effective_capacity = (capacity as f64 * (1.0 - buffer)).floor().max(0.0) as u32;
        Self {
            name: name.to_string(),
            capacity,
            effective_capacity,
        }
    }
}
