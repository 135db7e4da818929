//! Time blocks
//!
//! The event runs exactly two parallel time blocks. Restrictions from input
//! records use `0` for "either block".

use crate::error::{Result, SummitError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two parallel scheduling time-slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Block {
    One,
    Two,
}

impl Block {
    /// Both blocks in schedule order
    pub const ALL: [Block; 2] = [Block::One, Block::Two];

    /// Slot position for per-block arrays
    pub fn index(self) -> usize {
        match self {
            Block::One => 0,
            Block::Two => 1,
        }
    }

    /// Human-facing block number (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            Block::One => 1,
            Block::Two => 2,
        }
    }

    /// The opposite block
    pub fn other(self) -> Block {
        match self {
            Block::One => Block::Two,
            Block::Two => Block::One,
        }
    }

    /// Parse a talk's block restriction: 0 means either block
    pub fn from_restriction(talk_id: &str, value: u8) -> Result<Option<Block>> {
        match value {
            0 => Ok(None),
            1 => Ok(Some(Block::One)),
            2 => Ok(Some(Block::Two)),
            _ => Err(SummitError::InvalidBlockRestriction {
                talk_id: talk_id.to_string(),
                value,
            }),
        }
    }
}

impl TryFrom<u8> for Block {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Block::One),
            2 => Ok(Block::Two),
            other => Err(format!("block must be 1 or 2, got {}", other)),
        }
    }
}

impl From<Block> for u8 {
    fn from(block: Block) -> u8 {
        block.number()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_block() {
        assert_eq!(Block::One.other(), Block::Two);
        assert_eq!(Block::Two.other(), Block::One);
    }

    #[test]
    fn test_index_and_number() {
        assert_eq!(Block::One.index(), 0);
        assert_eq!(Block::Two.index(), 1);
        assert_eq!(Block::One.number(), 1);
        assert_eq!(Block::Two.to_string(), "2");
    }

    #[test]
    fn test_from_restriction() {
        assert_eq!(Block::from_restriction("t", 0).unwrap(), None);
        assert_eq!(Block::from_restriction("t", 1).unwrap(), Some(Block::One));
        assert_eq!(Block::from_restriction("t", 2).unwrap(), Some(Block::Two));
    }

    #[test]
    fn test_from_restriction_out_of_range() {
        let err = Block::from_restriction("late-talk", 3).unwrap_err();
        assert!(matches!(
            err,
            SummitError::InvalidBlockRestriction { ref talk_id, value: 3 } if talk_id == "late-talk"
        ));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&Block::Two).unwrap();
        assert_eq!(json, "2");
        let block: Block = serde_json::from_str("1").unwrap();
        assert_eq!(block, Block::One);
        assert!(serde_json::from_str::<Block>("3").is_err());
    }
}
