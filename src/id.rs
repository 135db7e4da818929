//! Identifier utilities for Summit
//!
//! Entities live in flat arenas owned by [`crate::domain::Schedule`]; these
//! newtypes index into them so a participant index can never be mistaken for
//! an occurrence index.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! arena_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub usize);

        impl $name {
            /// Position in the owning arena
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

arena_index!(
    /// Index of a talk in the schedule
    TalkIdx
);
arena_index!(
    /// Index of a room in the schedule
    RoomIdx
);
arena_index!(
    /// Index of a participant in the schedule
    ParticipantIdx
);
arena_index!(
    /// Index of an occurrence in the schedule
    OccurrenceIdx
);

/// Generate the public id for the n-th run of a talk
///
/// Format: `{talk_id}_{run}` with runs counted from 1
/// Example: `mindful-eating_2`
pub fn occurrence_id(talk_id: &str, run: usize) -> String {
    format!("{}_{}", talk_id, run)
}
