//! Room assignment.
//!
//! Rules:
//! - Each room hosts at most one occurrence per block; rooms are reused across blocks
//! - Both runs of a double-run talk share one room, reserved in both blocks
//! - First fit from the largest room down, biggest sessions first
//!
//! First-fit can leave a small session in an oversized room. Occurrences with
//! no fitting room stay roomless and are reported, never treated as fatal.

use crate::domain::{Block, Schedule};
use crate::id::{OccurrenceIdx, RoomIdx, TalkIdx};

/// Reassign every room from scratch. Returns occurrences left without one.
pub fn assign_rooms(schedule: &mut Schedule) -> Vec<OccurrenceIdx> {
    schedule.clear_rooms();

    let mut used: [Vec<bool>; 2] = [vec![false; schedule.rooms().len()], vec![false; schedule.rooms().len()]];

    // Stable: equal capacity keeps input order
    let mut by_capacity: Vec<RoomIdx> = (0..schedule.rooms().len()).map(RoomIdx).collect();
    by_capacity.sort_by(|a, b| schedule.room(*b).capacity.cmp(&schedule.room(*a).capacity));

    let mut doubles: Vec<(TalkIdx, usize)> = schedule
        .talks()
        .iter()
        .enumerate()
        .filter(|(_, talk)| talk.is_double_run())
        .map(|(i, talk)| {
            let needed = talk
                .occurrences()
                .iter()
                .map(|occ| schedule.occurrence(*occ).size())
                .max()
                .unwrap_or(0);
            (TalkIdx(i), needed)
        })
        .collect();
    doubles.sort_by(|a, b| b.1.cmp(&a.1));

    for (talk, needed) in doubles {
        let fit = by_capacity.iter().copied().find(|room| {
            schedule.room(*room).effective_capacity as usize >= needed
                && !used[0][room.index()]
                && !used[1][room.index()]
        });
        if let Some(room) = fit {
            for occ in schedule.talk(talk).occurrences().to_vec() {
                schedule.set_room(occ, Some(room));
            }
            used[0][room.index()] = true;
            used[1][room.index()] = true;
        }
    }

    for block in Block::ALL {
        let mut singles: Vec<OccurrenceIdx> = schedule
            .occurrences_in_block(block)
            .into_iter()
            .filter(|occ| !schedule.talk_of(*occ).is_double_run())
            .collect();
        singles.sort_by(|a, b| schedule.occurrence(*b).size().cmp(&schedule.occurrence(*a).size()));

        for occ in singles {
            let size = schedule.occurrence(occ).size();
            let fit = by_capacity.iter().copied().find(|room| {
                !used[block.index()][room.index()] && schedule.room(*room).effective_capacity as usize >= size
            });
            if let Some(room) = fit {
                schedule.set_room(occ, Some(room));
                used[block.index()][room.index()] = true;
            }
        }
    }

    let roomless: Vec<OccurrenceIdx> = schedule
        .occurrence_indices()
        .filter(|occ| schedule.occurrence(*occ).room().is_none())
        .collect();
    for occ in &roomless {
        log::warn!(
            "No room fits {} ({} participants)",
            schedule.occurrence(*occ).occ_id,
            schedule.occurrence(*occ).size()
        );
    }
    roomless
}
