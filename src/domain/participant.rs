//! Participants and their ranked preferences

use crate::domain::Block;
use crate::id::OccurrenceIdx;
use serde::{Deserialize, Serialize};

/// A conference attendee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub school: String,
    pub email: String,

    /// Talk ids, best preference first
    pub ranked_talk_ids: Vec<String>,

    /// Seat held in each block
    pub(crate) assignment: [Option<OccurrenceIdx>; 2],
}

impl Participant {
    /// Create a participant with the given ranking
    pub fn new(name: &str, ranked_talk_ids: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            school: String::new(),
            email: String::new(),
            ranked_talk_ids,
            assignment: [None, None],
        }
    }

    /// Set the email address
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    /// Set the school
    pub fn with_school(mut self, school: &str) -> Self {
        self.school = school.to_string();
        self
    }

    /// Rank index of a talk (0 is best), None if not ranked
    pub fn rank_of(&self, talk_id: &str) -> Option<usize> {
        self.ranked_talk_ids.iter().position(|id| id == talk_id)
    }

    /// The first `k` ranked talk ids (fewer if the ranking is shorter)
    pub fn top(&self, k: usize) -> &[String] {
        let k = k.min(self.ranked_talk_ids.len());
        &self.ranked_talk_ids[..k]
    }

    /// Seat held in `block`, if any
    pub fn assignment(&self, block: Block) -> Option<OccurrenceIdx> {
        self.assignment[block.index()]
    }

    /// True once both blocks hold a seat
    pub fn is_fully_assigned(&self) -> bool {
        self.assignment.iter().all(Option::is_some)
    }

    /// Blocks still without a seat
    pub fn missing_blocks(&self) -> Vec<Block> {
        Block::ALL
            .into_iter()
            .filter(|b| self.assignment(*b).is_none())
            .collect()
    }
}
