//! Conflict matrix.
//!
//! `conflict(a, b)` counts participants holding both `a` and `b` inside their
//! top-k window. Both directions are stored so lookups never care about order.

use crate::domain::Schedule;
use crate::error::Result;
use crate::id::TalkIdx;

/// Dense symmetric talk-by-talk overlap counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictMatrix {
    talk_ids: Vec<String>,
    counts: Vec<u32>,
}

impl ConflictMatrix {
    /// All-zero matrix over the schedule's talks.
    fn zeroed(schedule: &Schedule) -> Self {
        let talk_ids: Vec<String> = schedule.talks().iter().map(|t| t.talk_id.clone()).collect();
        let n = talk_ids.len();
        Self {
            talk_ids,
            counts: vec![0; n * n],
        }
    }

    /// Number of talks on each side.
    pub fn len(&self) -> usize {
        self.talk_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.talk_ids.is_empty()
    }

    /// Overlap count between two talks by index.
    pub fn get(&self, a: TalkIdx, b: TalkIdx) -> u32 {
        self.counts[a.index() * self.len() + b.index()]
    }

    /// Overlap count between two talks by id; unknown ids read as 0.
    pub fn get_by_id(&self, a: &str, b: &str) -> u32 {
        let ai = self.talk_ids.iter().position(|id| id == a);
        let bi = self.talk_ids.iter().position(|id| id == b);
        match (ai, bi) {
            (Some(ai), Some(bi)) => self.get(TalkIdx(ai), TalkIdx(bi)),
            _ => 0,
        }
    }

    fn bump(&mut self, a: TalkIdx, b: TalkIdx) {
        let n = self.len();
        self.counts[a.index() * n + b.index()] += 1;
        self.counts[b.index() * n + a.index()] += 1;
    }

    /// Distinct pairs with a non-zero count, highest first (ties in index order).
    pub fn top_pairs(&self, limit: usize) -> Vec<(String, String, u32)> {
        let mut pairs = vec![];
        for a in 0..self.len() {
            for b in (a + 1)..self.len() {
                let count = self.get(TalkIdx(a), TalkIdx(b));
                if count > 0 {
                    pairs.push((self.talk_ids[a].clone(), self.talk_ids[b].clone(), count));
                }
            }
        }
        pairs.sort_by(|x, y| y.2.cmp(&x.2));
        pairs.truncate(limit);
        pairs
    }
}

/// Build the conflict matrix from each participant's top-k window.
pub fn build_conflict_matrix(schedule: &Schedule, top_k: usize) -> Result<ConflictMatrix> {
    let mut matrix = ConflictMatrix::zeroed(schedule);

    for participant in schedule.participants() {
        let window = participant
            .top(top_k)
            .iter()
            .map(|id| schedule.resolve_ranked(participant, id))
            .collect::<Result<Vec<_>>>()?;

        for i in 0..window.len() {
            for j in (i + 1)..window.len() {
                matrix.bump(window[i], window[j]);
            }
        }
    }

    log::debug!("Conflict matrix built over {} talks with top_k={}", matrix.len(), top_k);
    Ok(matrix)
}
