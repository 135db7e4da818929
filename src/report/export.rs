//! Per-participant assignment export.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Block, Participant, Schedule};
use crate::error::Result;
use crate::report::summary::ScheduleReport;
use crate::scheduler::RunSummary;

/// One line of the roster: who goes where in each block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRow {
    pub name: String,
    pub email: String,
    pub session_1: Option<String>,
    pub session_2: Option<String>,
}

/// Participants in input order with their occurrence id per block.
pub fn assignment_rows(schedule: &Schedule) -> Vec<AssignmentRow> {
    let session = |p: &Participant, block: Block| {
        p.assignment(block)
            .map(|occ| schedule.occurrence(occ).occ_id.clone())
    };
    schedule
        .participants()
        .iter()
        .map(|p| AssignmentRow {
            name: p.name.clone(),
            email: p.email.clone(),
            session_1: session(p, Block::One),
            session_2: session(p, Block::Two),
        })
        .collect()
}

/// Everything written by `summit run --export`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub generated_at: DateTime<Utc>,
    pub fingerprint: String,
    pub run: RunSummary,
    pub report: ScheduleReport,
    pub assignments: Vec<AssignmentRow>,
}

impl ExportDocument {
    pub fn new(schedule: &Schedule, run: RunSummary, report: ScheduleReport) -> Self {
        Self {
            generated_at: Utc::now(),
            fingerprint: schedule.fingerprint(),
            run,
            report,
            assignments: assignment_rows(schedule),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
