//! Occurrence creation.
//!
//! Every talk gets one run. Second runs go to eligible talks in descending
//! demand order while the total stays under the room-by-block budget.

use crate::domain::Schedule;
use crate::error::{Result, SummitError};
use crate::id::{OccurrenceIdx, TalkIdx};

/// Create occurrences for every talk, returning them in creation order.
///
/// `max_total` is the number of rooms times two: the most sessions both
/// blocks together can host.
///
/// A second run needs `max_runs == 2` and no block restriction: the two runs
/// always span both blocks, which a pinned talk cannot do. Pinned talks with
/// `max_runs == 2` therefore run once.
pub fn create_occurrences(
    schedule: &mut Schedule,
    max_total: usize,
    min_demand: Option<u32>,
) -> Result<Vec<OccurrenceIdx>> {
    if !schedule.occurrences().is_empty() {
        return Err(SummitError::InvalidState(
            "occurrences already created for this schedule".to_string(),
        ));
    }

    let talk_count = schedule.talks().len();
    let mut created: Vec<OccurrenceIdx> = (0..talk_count)
        .map(|i| schedule.add_occurrence(TalkIdx(i)))
        .collect();

    if talk_count > max_total {
        log::warn!(
            "{} talks exceed the session budget of {}; every talk still gets one run",
            talk_count,
            max_total
        );
    }

    let mut eligible: Vec<TalkIdx> = schedule
        .talks()
        .iter()
        .enumerate()
        .filter(|(_, talk)| talk.can_run_twice())
        .filter(|(_, talk)| min_demand.is_none_or(|min| talk.demand_score >= min))
        .map(|(i, _)| TalkIdx(i))
        .collect();

    // Stable: equal demand keeps talk order
    eligible.sort_by(|a, b| {
        let da = schedule.talk(*a).demand_score;
        let db = schedule.talk(*b).demand_score;
        db.cmp(&da)
    });

    for talk in eligible {
        if created.len() >= max_total {
            log::debug!("Session budget reached; no more second runs");
            break;
        }
        let occ = schedule.add_occurrence(talk);
        log::debug!(
            "Second run {} granted (demand {})",
            schedule.occurrence(occ).occ_id,
            schedule.talk(talk).demand_score
        );
        created.push(occ);
    }

    log::info!("Created {} occurrences for {} talks", created.len(), talk_count);
    Ok(created)
}
