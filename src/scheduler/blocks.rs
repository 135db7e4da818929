//! Block assignment.
//!
//! Double-run talks span both blocks. Single-run talks are placed
//! highest-demand-first into whichever block currently holds the least
//! preference overlap with them, unless pinned by a restriction.

use crate::domain::{Block, Schedule};
use crate::error::Result;
use crate::id::TalkIdx;
use crate::scheduler::conflict::ConflictMatrix;

/// Sum of `conflict(talk, other)` over the talks already committed to a block.
pub fn block_cost(talk: TalkIdx, placed: &[TalkIdx], conflict: &ConflictMatrix) -> u64 {
    placed.iter().map(|other| conflict.get(talk, *other) as u64).sum()
}

/// Place every occurrence into block 1 or 2.
pub fn assign_blocks(schedule: &mut Schedule, conflict: &ConflictMatrix) -> Result<()> {
    // Append-only per-block talk lists used for cost lookups
    let mut placed: [Vec<TalkIdx>; 2] = [vec![], vec![]];

    let talk_count = schedule.talks().len();

    for i in 0..talk_count {
        let talk = TalkIdx(i);
        let occs = schedule.talk(talk).occurrences().to_vec();
        if let [first, second] = occs[..] {
            schedule.set_block(first, Block::One)?;
            schedule.set_block(second, Block::Two)?;
            placed[Block::One.index()].push(talk);
            placed[Block::Two.index()].push(talk);
        }
    }

    let mut singles: Vec<TalkIdx> = (0..talk_count)
        .map(TalkIdx)
        .filter(|t| schedule.talk(*t).occurrences().len() == 1)
        .collect();
    // Stable: equal demand keeps talk order
    singles.sort_by(|a, b| {
        let da = schedule.talk(*a).demand_score;
        let db = schedule.talk(*b).demand_score;
        db.cmp(&da)
    });

    for talk in singles {
        let occ = schedule.talk(talk).occurrences()[0];
        let block = match schedule.talk(talk).block_restriction {
            Some(pinned) => pinned,
            None => {
                let cost1 = block_cost(talk, &placed[Block::One.index()], conflict);
                let cost2 = block_cost(talk, &placed[Block::Two.index()], conflict);
                if cost1 <= cost2 { Block::One } else { Block::Two }
            }
        };
        schedule.set_block(occ, block)?;
        placed[block.index()].push(talk);
        log::debug!("{} -> block {}", schedule.occurrence(occ).occ_id, block);
    }

    log::info!(
        "Blocks assigned: {} talks in block 1, {} in block 2",
        placed[0].len(),
        placed[1].len()
    );
    Ok(())
}
