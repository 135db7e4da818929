//! Scheduler module: the allocation engine.
//!
//! This module provides, in pipeline order:
//! - **Demand scoring**: popularity per talk from ranked preferences.
//! - **Conflict matrix**: how often two talks compete for the same top picks.
//! - **Occurrence creation**: one run per talk, second runs for the most wanted.
//! - **Block assignment**: conflict-aware placement into block 1 or 2.
//! - **Participant seating**: greedy walk down each ranking.
//! - **Room assignment**: capacity-aware, rooms reused across blocks.
//! - **Capacity optimizer**: iterative repair of over/under-filled sessions.
//!
//! # Example
//!
//! ```ignore
//! use summit::scheduler::{Scheduler, SchedulerConfig};
//!
//! let mut schedule = input.into_schedule(config.capacity_buffer)?;
//! let outcome = Scheduler::new(config).run(&mut schedule)?;
//! ```

mod blocks;
mod config;
mod conflict;
mod demand;
mod occurrences;
mod optimizer;
mod participants;
mod pipeline;
mod rooms;

pub use blocks::{assign_blocks, block_cost};
pub use config::{
    DEFAULT_CAPACITY_BUFFER, DEFAULT_MAX_PASSES, DEFAULT_MIN_SESSION_SIZE, DEFAULT_TOP_K, SchedulerConfig,
};
pub use conflict::{ConflictMatrix, build_conflict_matrix};
pub use demand::compute_demand_scores;
pub use occurrences::create_occurrences;
pub use optimizer::{
    CapacityOptimizer, DONOR_MARGIN, OptimizerOutcome, PassStats, RESCUE_BONUS, UNRANKED_PENALTY, move_cost,
};
pub use participants::assign_participants;
pub use pipeline::{RunOutcome, RunSummary, Scheduler};
pub use rooms::assign_rooms;
