//! Read-only views over a finished schedule: summary report and roster export.

mod export;
mod summary;

pub use export::{AssignmentRow, ExportDocument, assignment_rows};
pub use summary::{
    DEFAULT_LOW_SATISFACTION_RANK, LowSatisfaction, ReportConfig, SatisfactionSummary, ScheduleReport,
    ScheduleWarning, SessionRow, UnassignedParticipant,
};
