//! Read-only summary of a finished schedule.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Block, Schedule};
use crate::id::ParticipantIdx;
use crate::scheduler::SchedulerConfig;

/// Default 0-based rank at or beyond which a seat is flagged.
pub const DEFAULT_LOW_SATISFACTION_RANK: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Seats at this 0-based rank or worse are flagged as low satisfaction
    pub low_satisfaction_rank: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            low_satisfaction_rank: DEFAULT_LOW_SATISFACTION_RANK,
        }
    }
}

/// One scheduled session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRow {
    pub occ_id: String,
    pub talk_id: String,
    pub title: String,
    pub block: Option<Block>,
    pub room: Option<String>,
    pub capacity: Option<u32>,
    pub effective_capacity: Option<u32>,
    pub headcount: usize,
}

/// How well seats matched rankings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SatisfactionSummary {
    /// 0-based rank -> number of seats
    pub by_rank: BTreeMap<usize, usize>,
    /// Seats in talks the participant never ranked
    pub unranked: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnassignedParticipant {
    pub name: String,
    pub missing_blocks: Vec<Block>,
}

/// A seat at a poor rank, or in an unranked talk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowSatisfaction {
    pub name: String,
    pub block: Block,
    pub talk_id: String,
    /// None if the talk was never ranked
    pub rank: Option<usize>,
}

/// Non-fatal shortfalls left after scheduling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleWarning {
    Roomless { occ_id: String, headcount: usize },
    Underfull { occ_id: String, headcount: usize, minimum: usize },
    OverCapacity { occ_id: String, headcount: usize, effective_capacity: u32 },
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleWarning::Roomless { occ_id, headcount } => {
                write!(f, "{} has no room ({} participants)", occ_id, headcount)
            }
            ScheduleWarning::Underfull {
                occ_id,
                headcount,
                minimum,
            } => write!(f, "{} is underfull ({} <= {})", occ_id, headcount, minimum),
            ScheduleWarning::OverCapacity {
                occ_id,
                headcount,
                effective_capacity,
            } => write!(
                f,
                "{} is over capacity ({} > {})",
                occ_id, headcount, effective_capacity
            ),
        }
    }
}

/// Everything a reporting or export layer needs about a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleReport {
    pub sessions: Vec<SessionRow>,
    pub satisfaction: SatisfactionSummary,
    pub unassigned: Vec<UnassignedParticipant>,
    pub low_satisfaction: Vec<LowSatisfaction>,
    pub warnings: Vec<ScheduleWarning>,
}

impl ScheduleReport {
    pub fn build(schedule: &Schedule, config: &ReportConfig, scheduler: &SchedulerConfig) -> Self {
        let mut sessions = vec![];
        let mut warnings = vec![];

        for occ in schedule.occurrence_indices() {
            let occurrence = schedule.occurrence(occ);
            let talk = schedule.talk_of(occ);
            let room = occurrence.room().map(|r| schedule.room(r));
            let headcount = occurrence.size();

            match room {
                None => warnings.push(ScheduleWarning::Roomless {
                    occ_id: occurrence.occ_id.clone(),
                    headcount,
                }),
                Some(room) if headcount > room.effective_capacity as usize => {
                    warnings.push(ScheduleWarning::OverCapacity {
                        occ_id: occurrence.occ_id.clone(),
                        headcount,
                        effective_capacity: room.effective_capacity,
                    })
                }
                Some(_) => {}
            }
            if headcount <= scheduler.min_session_size {
                warnings.push(ScheduleWarning::Underfull {
                    occ_id: occurrence.occ_id.clone(),
                    headcount,
                    minimum: scheduler.min_session_size,
                });
            }

            sessions.push(SessionRow {
                occ_id: occurrence.occ_id.clone(),
                talk_id: talk.talk_id.clone(),
                title: talk.title.clone(),
                block: occurrence.block(),
                room: room.map(|r| r.name.clone()),
                capacity: room.map(|r| r.capacity),
                effective_capacity: room.map(|r| r.effective_capacity),
                headcount,
            });
        }

        let mut satisfaction = SatisfactionSummary::default();
        let mut unassigned = vec![];
        let mut low_satisfaction = vec![];

        for (p, participant) in schedule.participants().iter().enumerate() {
            let missing = participant.missing_blocks();
            if !missing.is_empty() {
                unassigned.push(UnassignedParticipant {
                    name: participant.name.clone(),
                    missing_blocks: missing,
                });
            }

            for block in Block::ALL {
                let Some(occ) = participant.assignment(block) else {
                    continue;
                };
                let rank = schedule.rank_for(ParticipantIdx(p), occ);
                satisfaction.total += 1;
                match rank {
                    Some(r) => *satisfaction.by_rank.entry(r).or_insert(0) += 1,
                    None => satisfaction.unranked += 1,
                }
                if rank.is_none_or(|r| r >= config.low_satisfaction_rank) {
                    low_satisfaction.push(LowSatisfaction {
                        name: participant.name.clone(),
                        block,
                        talk_id: schedule.talk_of(occ).talk_id.clone(),
                        rank,
                    });
                }
            }
        }

        Self {
            sessions,
            satisfaction,
            unassigned,
            low_satisfaction,
            warnings,
        }
    }

    /// True if nothing needs a human look.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.unassigned.is_empty()
    }
}
