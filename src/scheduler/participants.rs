//! Initial participant seating.
//!
//! Each participant walks their ranking in order and takes the first open
//! block offered by each talk, at most one seat per talk. Room capacity is not
//! enforced here; the optimizer repairs overfull sessions afterwards.

use crate::domain::Schedule;
use crate::error::{Result, SummitError};
use crate::id::ParticipantIdx;

/// Seat every participant by preference. Returns the number of seats filled.
pub fn assign_participants(schedule: &mut Schedule) -> Result<usize> {
    let mut seated = 0;

    for p in 0..schedule.participants().len() {
        let participant = ParticipantIdx(p);
        let ranking = schedule.participant(participant).ranked_talk_ids.clone();

        for talk_id in &ranking {
            if schedule.participant(participant).is_fully_assigned() {
                break;
            }

            let talk = schedule.resolve_ranked(schedule.participant(participant), talk_id)?;

            // Already holds this talk in the other block (repeated ranking entry)
            let holds_talk = schedule
                .participant(participant)
                .assignment
                .iter()
                .flatten()
                .any(|occ| schedule.occurrence(*occ).talk == talk);
            if holds_talk {
                continue;
            }

            let occurrences = schedule.talk(talk).occurrences().to_vec();
            for occ in occurrences {
                let block = schedule.occurrence(occ).block().ok_or_else(|| {
                    SummitError::InvalidState(format!(
                        "occurrence {} has no block before seating",
                        schedule.occurrence(occ).occ_id
                    ))
                })?;
                if schedule.participant(participant).assignment(block).is_none() {
                    schedule.seat(participant, occ)?;
                    seated += 1;
                    break;
                }
            }
        }
    }

    log::info!(
        "Seated {} of {} possible seats",
        seated,
        schedule.participants().len() * 2
    );
    Ok(seated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Block, Participant, Room, Talk};
    use crate::scheduler::blocks::assign_blocks;
    use crate::scheduler::conflict::build_conflict_matrix;
    use crate::scheduler::demand::compute_demand_scores;
    use crate::scheduler::occurrences::create_occurrences;

    fn ranked(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn placed(talks: Vec<Talk>, participants: Vec<Participant>) -> Schedule {
        let rooms = vec![Room::new("R1", 30, 0.1), Room::new("R2", 30, 0.1)];
        let mut schedule = Schedule::new(talks, rooms, participants).unwrap();
        compute_demand_scores(&mut schedule, 3).unwrap();
        let conflict = build_conflict_matrix(&schedule, 3).unwrap();
        create_occurrences(&mut schedule, 4, None).unwrap();
        assign_blocks(&mut schedule, &conflict).unwrap();
        schedule
    }

    fn seat_talk(schedule: &Schedule, p: usize, block: Block) -> Option<String> {
        schedule
            .participant(ParticipantIdx(p))
            .assignment(block)
            .map(|occ| schedule.talk_of(occ).talk_id.clone())
    }

    #[test]
    fn test_seats_follow_ranking() {
        let talks = vec![
            Talk::new("A", 1, 1).unwrap(),
            Talk::new("B", 1, 2).unwrap(),
            Talk::new("C", 1, 1).unwrap(),
        ];
        let participants = vec![Participant::new("P1", ranked(&["A", "C", "B"]))];
        let mut schedule = placed(talks, participants);

        let seated = assign_participants(&mut schedule).unwrap();
        assert_eq!(seated, 2);
        // C is also block 1 and A already took it, so B fills block 2
        assert_eq!(seat_talk(&schedule, 0, Block::One).as_deref(), Some("A"));
        assert_eq!(seat_talk(&schedule, 0, Block::Two).as_deref(), Some("B"));
    }

    #[test]
    fn test_double_run_talk_takes_one_seat_only() {
        let talks = vec![Talk::new("A", 2, 0).unwrap(), Talk::new("B", 1, 0).unwrap()];
        let participants = vec![Participant::new("P1", ranked(&["A", "B"]))];
        let mut schedule = placed(talks, participants);

        assign_participants(&mut schedule).unwrap();
        let one = seat_talk(&schedule, 0, Block::One);
        let two = seat_talk(&schedule, 0, Block::Two);
        assert_eq!(one.as_deref(), Some("A"));
        assert_ne!(one, two);
    }

    #[test]
    fn test_repeated_ranking_entry_is_not_seated_twice() {
        let talks = vec![Talk::new("A", 2, 0).unwrap()];
        let participants = vec![Participant::new("P1", ranked(&["A", "A"]))];
        let mut schedule = placed(talks, participants);

        assign_participants(&mut schedule).unwrap();
        assert_eq!(seat_talk(&schedule, 0, Block::One).as_deref(), Some("A"));
        assert_eq!(seat_talk(&schedule, 0, Block::Two), None);
    }

    #[test]
    fn test_empty_ranking_stays_unassigned() {
        let talks = vec![Talk::new("A", 1, 0).unwrap()];
        let participants = vec![Participant::new("P1", vec![])];
        let mut schedule = placed(talks, participants);

        assert_eq!(assign_participants(&mut schedule).unwrap(), 0);
        assert!(!schedule.participant(ParticipantIdx(0)).is_fully_assigned());
    }

    #[test]
    fn test_capacity_not_enforced() {
        let talks = vec![Talk::new("A", 1, 1).unwrap(), Talk::new("B", 1, 2).unwrap()];
        let participants = (0..50)
            .map(|i| Participant::new(&format!("P{i}"), ranked(&["A", "B"])))
            .collect();
        let mut schedule = placed(talks, participants);

        assign_participants(&mut schedule).unwrap();
        let a = schedule.talk(schedule.talk_idx("A").unwrap()).occurrences()[0];
        assert_eq!(schedule.occurrence(a).size(), 50);
    }
}
