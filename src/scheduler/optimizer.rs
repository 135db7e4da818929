//! Capacity optimizer.
//!
//! Local search that repairs capacity after the initial seating. Each pass:
//! 1. Reassigns rooms from current headcounts
//! 2. Relieves overfull sessions by cost-ranked moves within the same block
//! 3. Tops up underfull sessions from comfortably large donors
//!
//! The loop stops at the first pass that moves nobody, or after `max_passes`.
//!
//! Move costs are computed against a snapshot of the pass's starting state.
//! Earlier moves can invalidate later ones, so every popped move is checked
//! again against current state and skipped if it no longer applies.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::domain::Schedule;
use crate::error::Result;
use crate::id::{OccurrenceIdx, ParticipantIdx};
use crate::scheduler::config::SchedulerConfig;
use crate::scheduler::rooms::assign_rooms;

/// Added when the participant never ranked the destination talk.
pub const UNRANKED_PENALTY: i64 = 1000;
/// Added (negative) when the destination is at or below the viable size.
pub const RESCUE_BONUS: i64 = -100;
/// Donors must exceed the viable size by more than this to give anyone up.
pub const DONOR_MARGIN: usize = 2;

/// Per-pass counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    /// 1-based pass number
    pub pass: u32,
    pub overfull_moves: usize,
    pub underfull_moves: usize,
    /// Queued moves dropped because an earlier move invalidated them
    pub skipped_stale: usize,
    /// Occurrences with no room at the start of the pass
    pub roomless: usize,
}

impl PassStats {
    pub fn moves(&self) -> usize {
        self.overfull_moves + self.underfull_moves
    }
}

/// Result of an optimizer run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptimizerOutcome {
    pub passes: u32,
    pub total_moves: usize,
    /// True if a pass finished with zero moves
    pub converged: bool,
    pub pass_stats: Vec<PassStats>,
}

/// A queued participant move, ordered by (cost, insertion order).
#[derive(Debug, Clone, PartialEq, Eq)]
struct CandidateMove {
    cost: i64,
    seq: u64,
    participant: ParticipantIdx,
    source: OccurrenceIdx,
    destination: OccurrenceIdx,
}

impl PartialOrd for CandidateMove {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidateMove {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost.cmp(&other.cost).then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Headcount an occurrence must stay under.
///
/// A roomless occurrence is held to the largest room's effective capacity so
/// that it sheds enough people to fit somewhere on the next room pass.
fn capacity_limit(schedule: &Schedule, occ: OccurrenceIdx) -> Option<usize> {
    match schedule.effective_capacity(occ) {
        Some(cap) => Some(cap as usize),
        None => schedule.rooms().iter().map(|r| r.effective_capacity as usize).max(),
    }
}

/// True if the headcount has reached the occurrence's capacity limit.
fn is_overfull(schedule: &Schedule, occ: OccurrenceIdx) -> bool {
    capacity_limit(schedule, occ).is_some_and(|cap| schedule.occurrence(occ).size() >= cap)
}

/// True if the occurrence has a room and at least one free seat.
fn has_room(schedule: &Schedule, occ: OccurrenceIdx) -> bool {
    schedule.occurrence(occ).room().is_some() && !schedule.is_full(occ)
}

/// Cost of moving `participant` from `source` to `destination`; None if the move is not allowed.
pub fn move_cost(
    schedule: &Schedule,
    config: &SchedulerConfig,
    participant: ParticipantIdx,
    source: OccurrenceIdx,
    destination: OccurrenceIdx,
) -> Option<i64> {
    if source == destination || !has_room(schedule, destination) {
        return None;
    }
    let block = schedule.occurrence(source).block()?;
    if schedule.occurrence(destination).block() != Some(block) {
        return None;
    }
    if schedule.other_block_talk(participant, block) == Some(schedule.occurrence(destination).talk) {
        return None;
    }

    let source_rank = schedule.rank_for(participant, source);
    let destination_rank = schedule.rank_for(participant, destination);

    let mut cost = 0;
    if destination_rank.is_none() {
        cost += UNRANKED_PENALTY;
    }
    if schedule.occurrence(destination).size() <= config.min_session_size {
        cost += RESCUE_BONUS;
    }
    if let (Some(dest), Some(src)) = (destination_rank, source_rank) {
        cost += dest as i64 - src as i64;
    }
    Some(cost)
}

/// Runs capacity repair passes over a seated schedule.
pub struct CapacityOptimizer<'a> {
    config: &'a SchedulerConfig,
}

impl<'a> CapacityOptimizer<'a> {
    pub fn new(config: &'a SchedulerConfig) -> Self {
        Self { config }
    }

    /// Run passes until a fixed point or the pass cap.
    pub fn run(&self, schedule: &mut Schedule) -> Result<OptimizerOutcome> {
        let mut outcome = OptimizerOutcome::default();

        for pass in 1..=self.config.max_passes {
            let roomless = assign_rooms(schedule);

            let mut stats = PassStats {
                pass,
                roomless: roomless.len(),
                ..Default::default()
            };
            let (moved, skipped) = self.relieve_overfull(schedule)?;
            stats.overfull_moves = moved;
            stats.skipped_stale = skipped;
            stats.underfull_moves = self.relieve_underfull(schedule)?;

            tracing::debug!(
                pass,
                overfull_moves = stats.overfull_moves,
                underfull_moves = stats.underfull_moves,
                skipped_stale = stats.skipped_stale,
                roomless = stats.roomless,
                "Optimizer pass complete"
            );

            outcome.passes = pass;
            outcome.total_moves += stats.moves();
            let idle = stats.moves() == 0;
            outcome.pass_stats.push(stats);

            if idle {
                outcome.converged = true;
                break;
            }
        }

        if !outcome.converged {
            // Last pass moved people; bring rooms in line with final headcounts
            assign_rooms(schedule);
            log::warn!(
                "Optimizer stopped after {} passes without converging ({} moves)",
                outcome.passes,
                outcome.total_moves
            );
        } else {
            log::info!(
                "Optimizer converged after {} passes ({} moves)",
                outcome.passes,
                outcome.total_moves
            );
        }

        Ok(outcome)
    }

    /// Queue every finite-cost move out of overfull sessions, then apply cheapest first.
    ///
    /// Returns (applied, skipped as stale).
    fn relieve_overfull(&self, schedule: &mut Schedule) -> Result<(usize, usize)> {
        let mut queue: BinaryHeap<Reverse<CandidateMove>> = BinaryHeap::new();
        let mut seq = 0u64;

        let overfull: Vec<OccurrenceIdx> = schedule
            .occurrence_indices()
            .filter(|occ| is_overfull(schedule, *occ))
            .collect();

        for source in &overfull {
            let Some(block) = schedule.occurrence(*source).block() else {
                continue;
            };
            let destinations = schedule.occurrences_in_block(block);
            for participant in schedule.occurrence(*source).participants() {
                for destination in &destinations {
                    if let Some(cost) = move_cost(schedule, self.config, *participant, *source, *destination) {
                        queue.push(Reverse(CandidateMove {
                            cost,
                            seq,
                            participant: *participant,
                            source: *source,
                            destination: *destination,
                        }));
                        seq += 1;
                    }
                }
            }
        }

        let mut applied = 0;
        let mut skipped = 0;
        while let Some(Reverse(candidate)) = queue.pop() {
            let block = schedule.occurrence(candidate.source).block();
            let still_holds = block
                .map(|b| schedule.participant(candidate.participant).assignment(b) == Some(candidate.source))
                .unwrap_or(false);

            // An earlier move may have put the destination's talk in the other block
            let repeats_talk = block.is_some_and(|b| {
                schedule.other_block_talk(candidate.participant, b) == Some(schedule.occurrence(candidate.destination).talk)
            });

            if !is_overfull(schedule, candidate.source)
                || !has_room(schedule, candidate.destination)
                || !still_holds
                || repeats_talk
            {
                skipped += 1;
                continue;
            }

            log::debug!(
                "Move {} {} -> {} (cost {})",
                schedule.participant(candidate.participant).name,
                schedule.occurrence(candidate.source).occ_id,
                schedule.occurrence(candidate.destination).occ_id,
                candidate.cost
            );
            schedule.move_participant(candidate.participant, candidate.source, candidate.destination)?;
            applied += 1;
        }

        Ok((applied, skipped))
    }

    /// Pull participants into sessions at or below the viable size.
    fn relieve_underfull(&self, schedule: &mut Schedule) -> Result<usize> {
        let min = self.config.min_session_size;
        let mut moved = 0;

        let targets: Vec<OccurrenceIdx> = schedule
            .occurrence_indices()
            .filter(|occ| schedule.occurrence(*occ).room().is_some() && schedule.occurrence(*occ).size() <= min)
            .collect();

        for target in targets {
            let Some(block) = schedule.occurrence(target).block() else {
                continue;
            };
            let target_talk = schedule.occurrence(target).talk;

            while schedule.occurrence(target).size() <= min && !schedule.is_full(target) {
                let mut best: Option<(usize, ParticipantIdx, OccurrenceIdx)> = None;

                for donor in schedule.occurrences_in_block(block) {
                    if donor == target || schedule.occurrence(donor).size() <= min + DONOR_MARGIN {
                        continue;
                    }
                    for participant in schedule.occurrence(donor).participants() {
                        if schedule.other_block_talk(*participant, block) == Some(target_talk) {
                            continue;
                        }
                        let rank = schedule.rank_for(*participant, target);
                        if rank.is_none() && self.config.fill_requires_ranking {
                            continue;
                        }
                        let key = rank.unwrap_or(usize::MAX);
                        if best.is_none_or(|(best_key, _, _)| key < best_key) {
                            best = Some((key, *participant, donor));
                        }
                    }
                }

                let Some((_, participant, donor)) = best else {
                    log::debug!(
                        "{} left underfull at {} participants",
                        schedule.occurrence(target).occ_id,
                        schedule.occurrence(target).size()
                    );
                    break;
                };
                schedule.move_participant(participant, donor, target)?;
                moved += 1;
            }
        }

        Ok(moved)
    }
}
