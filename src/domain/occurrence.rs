//! Occurrences: concrete scheduled instances of a talk

use crate::domain::Block;
use crate::error::{Result, SummitError};
use crate::id::{OccurrenceIdx, ParticipantIdx, RoomIdx, TalkIdx};
use serde::{Deserialize, Serialize};

/// One scheduled run of a talk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occurrence {
    /// Public id, e.g. `yoga_2`
    pub occ_id: String,

    /// Owning talk
    pub talk: TalkIdx,

    /// Set once by block assignment, then fixed
    pub(crate) block: Option<Block>,

    /// Reassigned on every room pass
    pub(crate) room: Option<RoomIdx>,

    /// Seated participants, unique, in seating order
    pub(crate) participants: Vec<ParticipantIdx>,
}

impl Occurrence {
    pub(crate) fn new(occ_id: String, talk: TalkIdx) -> Self {
        Self {
            occ_id,
            talk,
            block: None,
            room: None,
            participants: vec![],
        }
    }

    pub fn block(&self) -> Option<Block> {
        self.block
    }

    pub fn room(&self) -> Option<RoomIdx> {
        self.room
    }

    /// Roster in seating order
    pub fn participants(&self) -> &[ParticipantIdx] {
        &self.participants
    }

    /// Headcount
    pub fn size(&self) -> usize {
        self.participants.len()
    }

    pub fn contains(&self, participant: ParticipantIdx) -> bool {
        self.participants.contains(&participant)
    }

    /// Fix the block; a second assignment is rejected
    pub(crate) fn set_block(&mut self, idx: OccurrenceIdx, block: Block) -> Result<()> {
        if let Some(existing) = self.block {
            return Err(SummitError::InvalidState(format!(
                "occurrence {} ({}) already in block {}",
                self.occ_id, idx, existing
            )));
        }
        self.block = Some(block);
        Ok(())
    }
}
