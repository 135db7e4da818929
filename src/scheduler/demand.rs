//! Demand scoring.
//!
//! Each participant's top-k window awards points by rank: the first choice
//! earns `top_k`, the second `top_k - 1`, down to 1 for the k-th choice.

use crate::domain::Schedule;
use crate::error::Result;

/// Recompute every talk's `demand_score` from scratch.
///
/// A `top_k` of 0 leaves every score at 0.
pub fn compute_demand_scores(schedule: &mut Schedule, top_k: usize) -> Result<()> {
    for talk in schedule.talks_mut() {
        talk.demand_score = 0;
    }

    let mut points = vec![0u32; schedule.talks().len()];
    for participant in schedule.participants() {
        for (rank, talk_id) in participant.top(top_k).iter().enumerate() {
            let talk = schedule.resolve_ranked(participant, talk_id)?;
            points[talk.index()] += (top_k - rank) as u32;
        }
    }

    for (talk, score) in schedule.talks_mut().iter_mut().zip(points) {
        talk.demand_score = score;
    }

    log::debug!("Demand scores computed with top_k={}", top_k);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::test_support::abcd_schedule;

    fn score(schedule: &Schedule, id: &str) -> u32 {
        schedule.talk(schedule.talk_idx(id).unwrap()).demand_score
    }

    #[test]
    fn test_demand_top3() {
        let mut schedule = abcd_schedule();
        compute_demand_scores(&mut schedule, 3).unwrap();
        assert_eq!(score(&schedule, "A"), 8);
        assert_eq!(score(&schedule, "B"), 6);
        assert_eq!(score(&schedule, "C"), 3);
        assert_eq!(score(&schedule, "D"), 1);
    }

    #[test]
    fn test_demand_zero_window() {
        let mut schedule = abcd_schedule();
        compute_demand_scores(&mut schedule, 3).unwrap();
        compute_demand_scores(&mut schedule, 0).unwrap();
        for talk in schedule.talks() {
            assert_eq!(talk.demand_score, 0);
        }
    }

    #[test]
    fn test_demand_resets_between_runs() {
        let mut schedule = abcd_schedule();
        compute_demand_scores(&mut schedule, 3).unwrap();
        compute_demand_scores(&mut schedule, 3).unwrap();
        assert_eq!(score(&schedule, "A"), 8);
    }

    #[test]
    fn test_window_larger_than_ranking() {
        let mut schedule = abcd_schedule();
        // Each participant ranks 4 talks; a window of 10 still only scores those.
        compute_demand_scores(&mut schedule, 10).unwrap();
        // P1: A=10, P2: A=10, P3: A=9
        assert_eq!(score(&schedule, "A"), 29);
        // D: 7 + 7 + 8
        assert_eq!(score(&schedule, "D"), 22);
    }
}
