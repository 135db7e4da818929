//! Schedule: the run's top-level state
//!
//! Owns every talk, room, participant and occurrence of a run in flat arenas.
//! Cross references (talk -> occurrences, occurrence -> roster, participant ->
//! seats) are arena indices, and every mutation that must keep two sides in
//! step goes through a method here.

use crate::domain::{Block, Occurrence, Participant, Room, Talk};
use crate::error::{Result, SummitError};
use crate::id::{OccurrenceIdx, ParticipantIdx, RoomIdx, TalkIdx, occurrence_id};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct Schedule {
    talks: Vec<Talk>,
    rooms: Vec<Room>,
    participants: Vec<Participant>,
    occurrences: Vec<Occurrence>,
    talk_index: HashMap<String, TalkIdx>,
}

impl Schedule {
    /// Build a schedule from loaded records
    ///
    /// Fails on duplicate talk ids, duplicate room names, or a ranking that
    /// names an unknown talk.
    pub fn new(talks: Vec<Talk>, rooms: Vec<Room>, participants: Vec<Participant>) -> Result<Self> {
        let mut talk_index = HashMap::with_capacity(talks.len());
        for (i, talk) in talks.iter().enumerate() {
            if talk_index.insert(talk.talk_id.clone(), TalkIdx(i)).is_some() {
                return Err(SummitError::DuplicateTalk(talk.talk_id.clone()));
            }
        }

        let mut room_names = HashSet::with_capacity(rooms.len());
        for room in &rooms {
            if !room_names.insert(room.name.as_str()) {
                return Err(SummitError::DuplicateRoom(room.name.clone()));
            }
        }

        for participant in &participants {
            for talk_id in &participant.ranked_talk_ids {
                if !talk_index.contains_key(talk_id) {
                    return Err(SummitError::UnknownTalk {
                        participant: participant.name.clone(),
                        talk_id: talk_id.clone(),
                    });
                }
            }
        }

        log::debug!(
            "Schedule built: {} talks, {} rooms, {} participants",
            talks.len(),
            rooms.len(),
            participants.len()
        );

        Ok(Self {
            talks,
            rooms,
            participants,
            occurrences: vec![],
            talk_index,
        })
    }

    //=== Read access ===

    pub fn talks(&self) -> &[Talk] {
        &self.talks
    }

    pub fn talk(&self, idx: TalkIdx) -> &Talk {
        &self.talks[idx.index()]
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, idx: RoomIdx) -> &Room {
        &self.rooms[idx.index()]
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, idx: ParticipantIdx) -> &Participant {
        &self.participants[idx.index()]
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn occurrence(&self, idx: OccurrenceIdx) -> &Occurrence {
        &self.occurrences[idx.index()]
    }

    /// Look up a talk by its id
    pub fn talk_idx(&self, talk_id: &str) -> Option<TalkIdx> {
        self.talk_index.get(talk_id).copied()
    }

    /// Resolve a talk id ranked by `participant`, failing on unknown ids
    pub fn resolve_ranked(&self, participant: &Participant, talk_id: &str) -> Result<TalkIdx> {
        self.talk_idx(talk_id).ok_or_else(|| SummitError::UnknownTalk {
            participant: participant.name.clone(),
            talk_id: talk_id.to_string(),
        })
    }

    /// The talk an occurrence belongs to
    pub fn talk_of(&self, occ: OccurrenceIdx) -> &Talk {
        self.talk(self.occurrence(occ).talk)
    }

    /// Occurrence indices in arena order
    pub fn occurrence_indices(&self) -> impl Iterator<Item = OccurrenceIdx> + '_ {
        (0..self.occurrences.len()).map(OccurrenceIdx)
    }

    /// Occurrences placed in `block`, in arena order
    pub fn occurrences_in_block(&self, block: Block) -> Vec<OccurrenceIdx> {
        self.occurrence_indices()
            .filter(|idx| self.occurrence(*idx).block == Some(block))
            .collect()
    }

    /// Effective capacity of the occurrence's room; None while roomless
    pub fn effective_capacity(&self, occ: OccurrenceIdx) -> Option<u32> {
        self.occurrence(occ)
            .room
            .map(|room| self.room(room).effective_capacity)
    }

    /// True if the headcount has reached the room's effective capacity
    ///
    /// A roomless occurrence has no defined capacity and is never full.
    pub fn is_full(&self, occ: OccurrenceIdx) -> bool {
        match self.effective_capacity(occ) {
            Some(cap) => self.occurrence(occ).size() >= cap as usize,
            None => false,
        }
    }

    /// The talk a participant holds in the block opposite to `block`
    pub fn other_block_talk(&self, participant: ParticipantIdx, block: Block) -> Option<TalkIdx> {
        self.participant(participant)
            .assignment(block.other())
            .map(|occ| self.occurrence(occ).talk)
    }

    /// Rank of the occurrence's talk in the participant's list
    pub fn rank_for(&self, participant: ParticipantIdx, occ: OccurrenceIdx) -> Option<usize> {
        let talk_id = &self.talk_of(occ).talk_id;
        self.participant(participant).rank_of(talk_id)
    }

    /// Occurrence map of room indices, in arena order
    pub fn room_map(&self) -> Vec<Option<RoomIdx>> {
        self.occurrences.iter().map(|o| o.room).collect()
    }

    /// sha256 over every occurrence's block, room and roster
    ///
    /// Two runs over identical input must produce identical fingerprints.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for occ in &self.occurrences {
            hasher.update(occ.occ_id.as_bytes());
            hasher.update([occ.block.map(Block::number).unwrap_or(0)]);
            match occ.room {
                Some(room) => hasher.update(self.room(room).name.as_bytes()),
                None => hasher.update(b"-"),
            }
            for p in &occ.participants {
                hasher.update(self.participant(*p).name.as_bytes());
                hasher.update([0u8]);
            }
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }

    //=== Mutation (scheduler phases only) ===

    pub(crate) fn talks_mut(&mut self) -> &mut [Talk] {
        &mut self.talks
    }

    /// Append a new occurrence to `talk`
    pub(crate) fn add_occurrence(&mut self, talk: TalkIdx) -> OccurrenceIdx {
        let idx = OccurrenceIdx(self.occurrences.len());
        let run = self.talks[talk.index()].occurrences.len() + 1;
        let occ_id = occurrence_id(&self.talks[talk.index()].talk_id, run);
        self.occurrences.push(Occurrence::new(occ_id, talk));
        self.talks[talk.index()].occurrences.push(idx);
        idx
    }

    pub(crate) fn set_block(&mut self, occ: OccurrenceIdx, block: Block) -> Result<()> {
        self.occurrences[occ.index()].set_block(occ, block)
    }

    pub(crate) fn set_room(&mut self, occ: OccurrenceIdx, room: Option<RoomIdx>) {
        self.occurrences[occ.index()].room = room;
    }

    pub(crate) fn clear_rooms(&mut self) {
        for occ in &mut self.occurrences {
            occ.room = None;
        }
    }

    /// Seat a participant, updating both the roster and the participant's block slot
    ///
    /// Returns false if the participant is already on the roster.
    pub(crate) fn seat(&mut self, participant: ParticipantIdx, occ: OccurrenceIdx) -> Result<bool> {
        let occurrence = &mut self.occurrences[occ.index()];
        let block = occurrence.block.ok_or_else(|| {
            SummitError::InvalidState(format!("cannot seat into {} before its block is set", occurrence.occ_id))
        })?;
        if occurrence.participants.contains(&participant) {
            return Ok(false);
        }
        occurrence.participants.push(participant);
        self.participants[participant.index()].assignment[block.index()] = Some(occ);
        Ok(true)
    }

    /// Remove a participant from a roster and clear their slot for that block
    pub(crate) fn unseat(&mut self, participant: ParticipantIdx, occ: OccurrenceIdx) {
        let occurrence = &mut self.occurrences[occ.index()];
        let block = occurrence.block;
        if let Some(pos) = occurrence.participants.iter().position(|p| *p == participant) {
            occurrence.participants.remove(pos);
            if let Some(block) = block {
                let slot = &mut self.participants[participant.index()].assignment[block.index()];
                if *slot == Some(occ) {
                    *slot = None;
                }
            }
        }
    }

    /// Move a participant between two occurrences of the same block
    pub(crate) fn move_participant(
        &mut self,
        participant: ParticipantIdx,
        from: OccurrenceIdx,
        to: OccurrenceIdx,
    ) -> Result<()> {
        let from_block = self.occurrence(from).block;
        let to_block = self.occurrence(to).block;
        if from_block != to_block {
            return Err(SummitError::InvalidState(format!(
                "cannot move {} from {} to {} across blocks",
                self.participant(participant).name,
                self.occurrence(from).occ_id,
                self.occurrence(to).occ_id
            )));
        }
        self.unseat(participant, from);
        self.seat(participant, to)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn small_schedule() -> Schedule {
        let talks = vec![Talk::new("A", 2, 0).unwrap(), Talk::new("B", 1, 0).unwrap()];
        let rooms = vec![Room::new("Gym", 10, 0.0), Room::new("Lab", 3, 0.0)];
        let participants = vec![
            Participant::new("P1", ranked(&["A", "B"])),
            Participant::new("P2", ranked(&["B"])),
        ];
        Schedule::new(talks, rooms, participants).unwrap()
    }

    #[test]
    fn test_duplicate_talk_rejected() {
        let talks = vec![Talk::new("A", 1, 0).unwrap(), Talk::new("A", 2, 0).unwrap()];
        let err = Schedule::new(talks, vec![], vec![]).unwrap_err();
        assert!(matches!(err, SummitError::DuplicateTalk(ref id) if id == "A"));
    }

    #[test]
    fn test_duplicate_room_rejected() {
        let rooms = vec![Room::new("Gym", 10, 0.0), Room::new("Gym", 20, 0.0)];
        let err = Schedule::new(vec![], rooms, vec![]).unwrap_err();
        assert!(matches!(err, SummitError::DuplicateRoom(_)));
    }

    #[test]
    fn test_unknown_ranked_talk_rejected() {
        let talks = vec![Talk::new("A", 1, 0).unwrap()];
        let participants = vec![Participant::new("Ada", ranked(&["A", "Ghost"]))];
        let err = Schedule::new(talks, vec![], participants).unwrap_err();
        match err {
            SummitError::UnknownTalk { participant, talk_id } => {
                assert_eq!(participant, "Ada");
                assert_eq!(talk_id, "Ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_add_occurrence_numbers_runs() {
        let mut schedule = small_schedule();
        let first = schedule.add_occurrence(TalkIdx(0));
        let second = schedule.add_occurrence(TalkIdx(0));
        assert_eq!(schedule.occurrence(first).occ_id, "A_1");
        assert_eq!(schedule.occurrence(second).occ_id, "A_2");
        assert_eq!(schedule.talk(TalkIdx(0)).occurrences(), &[first, second]);
        assert!(schedule.talk(TalkIdx(0)).is_double_run());
    }

    #[test]
    fn test_seat_requires_block() {
        let mut schedule = small_schedule();
        let occ = schedule.add_occurrence(TalkIdx(0));
        assert!(schedule.seat(ParticipantIdx(0), occ).is_err());
    }

    #[test]
    fn test_seat_is_unique_and_updates_both_sides() {
        let mut schedule = small_schedule();
        let occ = schedule.add_occurrence(TalkIdx(1));
        schedule.set_block(occ, Block::Two).unwrap();

        assert!(schedule.seat(ParticipantIdx(1), occ).unwrap());
        assert!(!schedule.seat(ParticipantIdx(1), occ).unwrap());
        assert_eq!(schedule.occurrence(occ).size(), 1);
        assert_eq!(schedule.participant(ParticipantIdx(1)).assignment(Block::Two), Some(occ));

        schedule.unseat(ParticipantIdx(1), occ);
        assert_eq!(schedule.occurrence(occ).size(), 0);
        assert_eq!(schedule.participant(ParticipantIdx(1)).assignment(Block::Two), None);
    }

    #[test]
    fn test_move_participant_within_block() {
        let mut schedule = small_schedule();
        let a = schedule.add_occurrence(TalkIdx(0));
        let b = schedule.add_occurrence(TalkIdx(1));
        schedule.set_block(a, Block::One).unwrap();
        schedule.set_block(b, Block::One).unwrap();
        schedule.seat(ParticipantIdx(0), a).unwrap();

        schedule.move_participant(ParticipantIdx(0), a, b).unwrap();
        assert!(!schedule.occurrence(a).contains(ParticipantIdx(0)));
        assert!(schedule.occurrence(b).contains(ParticipantIdx(0)));
        assert_eq!(schedule.participant(ParticipantIdx(0)).assignment(Block::One), Some(b));
    }

    #[test]
    fn test_move_participant_across_blocks_rejected() {
        let mut schedule = small_schedule();
        let a = schedule.add_occurrence(TalkIdx(0));
        let b = schedule.add_occurrence(TalkIdx(1));
        schedule.set_block(a, Block::One).unwrap();
        schedule.set_block(b, Block::Two).unwrap();
        schedule.seat(ParticipantIdx(0), a).unwrap();

        assert!(schedule.move_participant(ParticipantIdx(0), a, b).is_err());
        assert!(schedule.occurrence(a).contains(ParticipantIdx(0)));
    }

    #[test]
    fn test_roomless_occurrence_is_never_full() {
        let mut schedule = small_schedule();
        let occ = schedule.add_occurrence(TalkIdx(1));
        schedule.set_block(occ, Block::One).unwrap();
        schedule.seat(ParticipantIdx(0), occ).unwrap();
        schedule.seat(ParticipantIdx(1), occ).unwrap();
        assert_eq!(schedule.effective_capacity(occ), None);
        assert!(!schedule.is_full(occ));

        schedule.set_room(occ, Some(RoomIdx(1)));
        assert_eq!(schedule.effective_capacity(occ), Some(3));
        assert!(!schedule.is_full(occ));
    }

    #[test]
    fn test_fingerprint_changes_with_roster() {
        let mut schedule = small_schedule();
        let occ = schedule.add_occurrence(TalkIdx(1));
        schedule.set_block(occ, Block::One).unwrap();
        let before = schedule.fingerprint();
        assert_eq!(before.len(), 64);

        schedule.seat(ParticipantIdx(0), occ).unwrap();
        assert_ne!(before, schedule.fingerprint());
        assert_eq!(schedule.fingerprint(), schedule.clone().fingerprint());
    }
}
