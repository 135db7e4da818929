//! Scheduler tunables.

use crate::error::{Result, SummitError};
use serde::{Deserialize, Serialize};

/// Default preference window for demand and conflict.
pub const DEFAULT_TOP_K: usize = 5;
/// Default fraction of each room held back as headroom.
pub const DEFAULT_CAPACITY_BUFFER: f64 = 0.10;
/// Default minimum viable session size.
pub const DEFAULT_MIN_SESSION_SIZE: usize = 5;
/// Default cap on optimizer passes.
pub const DEFAULT_MAX_PASSES: u32 = 10;

/// Configuration for a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// How many top-ranked preferences count toward demand and conflict.
    pub top_k: usize,
    /// Fraction of nominal room capacity reserved as headroom, in [0, 1).
    ///
    /// Applied when rooms are built (`EventInput::into_schedule`, `Room::new`);
    /// the phases read each room's stored `effective_capacity` and only
    /// validate this value.
    pub capacity_buffer: f64,
    /// Sessions at or below this headcount are underfull.
    pub min_session_size: usize,
    /// Minimum demand for a second run; None grants second runs by demand order alone.
    pub double_run_min_demand: Option<u32>,
    /// Upper bound on optimizer passes.
    pub max_passes: u32,
    /// Underfull relief only pulls donors who ranked the target talk.
    pub fill_requires_ranking: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            capacity_buffer: DEFAULT_CAPACITY_BUFFER,
            min_session_size: DEFAULT_MIN_SESSION_SIZE,
            double_run_min_demand: None,
            max_passes: DEFAULT_MAX_PASSES,
            fill_requires_ranking: true,
        }
    }
}

impl SchedulerConfig {
    /// Reject values the phases cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.capacity_buffer) {
            return Err(SummitError::InvalidConfig(format!(
                "capacity_buffer must be in [0, 1), got {}",
                self.capacity_buffer
            )));
        }
        Ok(())
    }

    /// Builder-style override for the preference window.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Builder-style override for the pass cap.
    pub fn with_max_passes(mut self, max_passes: u32) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Builder-style override for the underfull threshold.
    pub fn with_min_session_size(mut self, size: usize) -> Self {
        self.min_session_size = size;
        self
    }
}
