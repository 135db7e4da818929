//! Event file loader.
//!
//! Reads talks, rooms and participants from YAML or JSON (picked by file
//! extension) and turns them into a validated [`Schedule`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Participant, Room, Schedule, Talk};
use crate::error::Result;

fn default_max_runs() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkRecord {
    pub talk_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub presenter: String,
    #[serde(default = "default_max_runs")]
    pub max_runs: u8,
    /// 0 = either block, 1 or 2 = pinned
    #[serde(default)]
    pub restriction: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub name: String,
    pub capacity: u32,
}

/// A ranking written either as a list or as one `;`-separated string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ranking {
    List(Vec<String>),
    Joined(String),
}

impl Default for Ranking {
    fn default() -> Self {
        Ranking::List(vec![])
    }
}

impl Ranking {
    /// Talk ids best first, trimmed, blanks dropped.
    pub fn talk_ids(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Ranking::List(ids) => ids.iter().map(String::as_str).collect(),
            Ranking::Joined(joined) => joined.split(';').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub name: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub ranking: Ranking,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventInput {
    pub talks: Vec<TalkRecord>,
    pub rooms: Vec<RoomRecord>,
    pub participants: Vec<ParticipantRecord>,
}

impl EventInput {
    /// Load from a `.json` file, or YAML for anything else.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let input = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };
        log::info!(
            "Loaded {} talks, {} rooms, {} participants from {}",
            input.talks.len(),
            input.rooms.len(),
            input.participants.len(),
            path.display()
        );
        Ok(input)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate and build the arena. `capacity_buffer` shrinks every room.
    pub fn into_schedule(self, capacity_buffer: f64) -> Result<Schedule> {
        let talks = self
            .talks
            .into_iter()
            .map(|t| {
                let talk = Talk::new(&t.talk_id, t.max_runs, t.restriction)?.with_presenter(&t.presenter);
                // Untitled talks keep their id as title
                Ok(if t.title.is_empty() { talk } else { talk.with_title(&t.title) })
            })
            .collect::<Result<Vec<_>>>()?;

        let rooms = self
            .rooms
            .into_iter()
            .map(|r| Room::new(&r.name, r.capacity, capacity_buffer))
            .collect();

        let participants = self
            .participants
            .into_iter()
            .map(|p| {
                Participant::new(&p.name, p.ranking.talk_ids())
                    .with_school(&p.school)
                    .with_email(&p.email)
            })
            .collect();

        Schedule::new(talks, rooms, participants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Block;
    use crate::error::SummitError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EVENT_YAML: &str = r#"
talks:
  - talk_id: yoga
    title: Morning Yoga
    presenter: Dana
    max_runs: 2
  - talk_id: sleep
    title: Sleep Hygiene
    restriction: 2
rooms:
  - name: Gym
    capacity: 40
participants:
  - name: Ann
    email: ann@example.org
    ranking: "yoga; sleep;"
  - name: Bob
    school: North
    ranking: [sleep, yoga]
  - name: Cat
"#;

    #[test]
    fn test_joined_ranking_split() {
        let ranking = Ranking::Joined(" A ;B;;C ".to_string());
        assert_eq!(ranking.talk_ids(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_list_ranking_drops_blanks() {
        let ranking = Ranking::List(vec!["A".to_string(), " ".to_string(), "B".to_string()]);
        assert_eq!(ranking.talk_ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_from_yaml_defaults() {
        let input = EventInput::from_yaml(EVENT_YAML).unwrap();
        assert_eq!(input.talks.len(), 2);
        assert_eq!(input.talks[1].max_runs, 1);
        assert_eq!(input.talks[0].restriction, 0);
        assert_eq!(input.participants[2].ranking, Ranking::default());
    }

    #[test]
    fn test_into_schedule() {
        let schedule = EventInput::from_yaml(EVENT_YAML).unwrap().into_schedule(0.1).unwrap();

        assert_eq!(schedule.talks()[0].title, "Morning Yoga");
        assert_eq!(schedule.talks()[0].presenter, "Dana");
        assert_eq!(schedule.talks()[1].title, "Sleep Hygiene");
        assert!(schedule.talks()[0].can_run_twice());
        assert_eq!(schedule.talks()[1].block_restriction, Some(Block::Two));
        assert_eq!(schedule.rooms()[0].effective_capacity, 36);
        assert_eq!(schedule.participants()[0].ranked_talk_ids, vec!["yoga", "sleep"]);
        assert_eq!(schedule.participants()[0].email, "ann@example.org");
        assert_eq!(schedule.participants()[1].school, "North");
        assert!(schedule.participants()[2].ranked_talk_ids.is_empty());
    }

    #[test]
    fn test_unknown_ranked_talk_rejected() {
        let yaml = "talks: [{talk_id: A}]\nparticipants: [{name: Ann, ranking: \"A;Z\"}]\n";
        let err = EventInput::from_yaml(yaml).unwrap().into_schedule(0.1).unwrap_err();
        assert!(matches!(err, SummitError::UnknownTalk { ref talk_id, .. } if talk_id == "Z"));
    }

    #[test]
    fn test_bad_restriction_rejected() {
        let yaml = "talks: [{talk_id: A, restriction: 3}]\n";
        let err = EventInput::from_yaml(yaml).unwrap().into_schedule(0.1).unwrap_err();
        assert!(matches!(err, SummitError::InvalidBlockRestriction { value: 3, .. }));
    }

    #[test]
    fn test_from_path_json() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(
            file,
            r#"{{"talks":[{{"talk_id":"A","max_runs":2}}],"rooms":[{{"name":"R","capacity":10}}],"participants":[{{"name":"Ann","ranking":["A"]}}]}}"#
        )
        .unwrap();

        let input = EventInput::from_path(file.path()).unwrap();
        assert_eq!(input.talks[0].max_runs, 2);
        assert_eq!(input.participants[0].ranking.talk_ids(), vec!["A"]);
    }

    #[test]
    fn test_from_path_yaml() {
        let mut file = NamedTempFile::with_suffix(".yml").unwrap();
        file.write_all(EVENT_YAML.as_bytes()).unwrap();
        let input = EventInput::from_path(file.path()).unwrap();
        assert_eq!(input.participants.len(), 3);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = EventInput::from_path("/nonexistent/event.yml").unwrap_err();
        assert!(matches!(err, SummitError::Io(_)));
    }
}
