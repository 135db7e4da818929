//! End-to-end scheduling run.

use serde::Serialize;

use crate::domain::Schedule;
use crate::error::Result;
use crate::scheduler::blocks::assign_blocks;
use crate::scheduler::config::SchedulerConfig;
use crate::scheduler::conflict::{ConflictMatrix, build_conflict_matrix};
use crate::scheduler::demand::compute_demand_scores;
use crate::scheduler::occurrences::create_occurrences;
use crate::scheduler::optimizer::{CapacityOptimizer, OptimizerOutcome};
use crate::scheduler::participants::assign_participants;
use crate::scheduler::rooms::assign_rooms;

/// What a run produced besides the mutated schedule.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub conflict: ConflictMatrix,
    pub occurrences_created: usize,
    /// Seats filled by the initial preference walk
    pub initial_seats: usize,
    pub optimizer: OptimizerOutcome,
}

/// Serializable slice of [`RunOutcome`] for exports.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub occurrences_created: usize,
    pub initial_seats: usize,
    pub optimizer: OptimizerOutcome,
}

impl From<&RunOutcome> for RunSummary {
    fn from(outcome: &RunOutcome) -> Self {
        Self {
            occurrences_created: outcome.occurrences_created,
            initial_seats: outcome.initial_seats,
            optimizer: outcome.optimizer.clone(),
        }
    }
}

/// Runs every phase in order over a freshly loaded schedule.
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Demand, conflicts, occurrences, blocks, seating, rooms, then capacity repair.
    ///
    /// Rooms keep the effective capacity they were built with; the config's
    /// `capacity_buffer` is not reapplied here.
    pub fn run(&self, schedule: &mut Schedule) -> Result<RunOutcome> {
        self.config.validate()?;
        let top_k = self.config.top_k;

        log::info!(
            "Scheduling {} talks, {} rooms, {} participants",
            schedule.talks().len(),
            schedule.rooms().len(),
            schedule.participants().len()
        );

        compute_demand_scores(schedule, top_k)?;
        let conflict = build_conflict_matrix(schedule, top_k)?;

        let max_total = schedule.rooms().len() * 2;
        let created = create_occurrences(schedule, max_total, self.config.double_run_min_demand)?;

        assign_blocks(schedule, &conflict)?;
        let initial_seats = assign_participants(schedule)?;
        // The optimizer reassigns rooms each pass, but with max_passes = 0 this is the only room pass
        assign_rooms(schedule);

        let optimizer = CapacityOptimizer::new(&self.config).run(schedule)?;

        Ok(RunOutcome {
            conflict,
            occurrences_created: created.len(),
            initial_seats,
            optimizer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Block, Participant, Room, Talk};
    use crate::error::SummitError;

    fn ranked(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn event() -> Schedule {
        let talks = vec![
            Talk::new("yoga", 2, 0).unwrap(),
            Talk::new("sleep", 1, 0).unwrap(),
            Talk::new("food", 1, 0).unwrap(),
            Talk::new("stress", 1, 2).unwrap(),
        ];
        let rooms = vec![
            Room::new("Gym", 40, 0.1),
            Room::new("Library", 20, 0.1),
            Room::new("Lab", 15, 0.1),
        ];
        let rankings: [&[&str]; 4] = [
            &["yoga", "sleep", "food", "stress"],
            &["sleep", "food", "yoga", "stress"],
            &["stress", "yoga", "food", "sleep"],
            &["food", "stress", "sleep", "yoga"],
        ];
        let participants = (0..24)
            .map(|i| Participant::new(&format!("P{i}"), ranked(rankings[i % 4])))
            .collect();
        Schedule::new(talks, rooms, participants).unwrap()
    }

    #[test]
    fn test_full_run_seats_everyone_twice() {
        let mut schedule = event();
        let outcome = Scheduler::new(SchedulerConfig::default().with_min_session_size(2))
            .run(&mut schedule)
            .unwrap();

        assert_eq!(outcome.occurrences_created, 5);
        for participant in schedule.participants() {
            assert!(participant.is_fully_assigned(), "{} missing a seat", participant.name);
            let one = schedule.occurrence(participant.assignment(Block::One).unwrap()).talk;
            let two = schedule.occurrence(participant.assignment(Block::Two).unwrap()).talk;
            assert_ne!(one, two);
        }
    }

    #[test]
    fn test_run_is_reproducible() {
        let config = SchedulerConfig::default();
        let mut first = event();
        let mut second = event();
        Scheduler::new(config.clone()).run(&mut first).unwrap();
        Scheduler::new(config).run(&mut second).unwrap();
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn test_second_run_on_same_schedule_rejected() {
        let mut schedule = event();
        let scheduler = Scheduler::new(SchedulerConfig::default());
        scheduler.run(&mut schedule).unwrap();
        assert!(matches!(scheduler.run(&mut schedule), Err(SummitError::InvalidState(_))));
    }

    #[test]
    fn test_invalid_config_rejected_before_any_phase() {
        let mut schedule = event();
        let config = SchedulerConfig {
            capacity_buffer: 2.0,
            ..Default::default()
        };
        assert!(Scheduler::new(config).run(&mut schedule).is_err());
        assert!(schedule.occurrences().is_empty());
    }

    #[test]
    fn test_rooms_assigned_without_optimizer_passes() {
        let mut schedule = event();
        let outcome = Scheduler::new(SchedulerConfig::default().with_max_passes(0))
            .run(&mut schedule)
            .unwrap();
        assert_eq!(outcome.optimizer.passes, 0);
        assert!(schedule.occurrences().iter().any(|occ| occ.room().is_some()));
    }

    #[test]
    fn test_room_capacity_comes_from_rooms_not_config() {
        let mut schedule = event();
        let before: Vec<u32> = schedule.rooms().iter().map(|r| r.effective_capacity).collect();
        let config = SchedulerConfig {
            capacity_buffer: 0.5,
            ..Default::default()
        };
        Scheduler::new(config).run(&mut schedule).unwrap();
        let after: Vec<u32> = schedule.rooms().iter().map(|r| r.effective_capacity).collect();
        assert_eq!(before, vec![36, 18, 13]);
        assert_eq!(before, after);
    }

    #[test]
    fn test_run_summary_from_outcome() {
        let mut schedule = event();
        let outcome = Scheduler::new(SchedulerConfig::default()).run(&mut schedule).unwrap();
        let summary = RunSummary::from(&outcome);
        assert_eq!(summary.occurrences_created, outcome.occurrences_created);
        assert_eq!(summary.optimizer, outcome.optimizer);
    }
}
