use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::models::conflict::ConflictReport;
use crate::domain::models::session::CandidateSession;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// Pipeline stages in execution order. A fatal issue halts at its stage;
/// `Done` means every stage ran.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PreviewStage {
    ValidatingStructure,
    ValidatingDomain,
    GeneratingSessions,
    ApplyingHolidays,
    Reindexing,
    DetectingConflicts,
    Done,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PreviewIssue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub details: Value,
}

impl PreviewIssue {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            message: message.into(),
            details: Value::Null,
        }
    }

    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message: message.into(),
            details: Value::Null,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }
}

/// The explicit old-date to new-date mapping of one holiday relocation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HolidayImpact {
    pub old_date: NaiveDate,
    pub new_date: NaiveDate,
    pub holiday_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PreviewResult {
    pub can_create: bool,
    pub stage_reached: PreviewStage,
    pub issues: Vec<PreviewIssue>,
    pub session_preview: Vec<CandidateSession>,
    pub holiday_impacts: Vec<HolidayImpact>,
    pub conflict_report: ConflictReport,
    /// Recomputed from the shifted session range; None when generation never ran.
    pub estimated_end_date: Option<NaiveDate>,
}

impl PreviewResult {
    pub fn halted(stage: PreviewStage, issues: Vec<PreviewIssue>) -> Self {
        Self {
            can_create: false,
            stage_reached: stage,
            issues,
            session_preview: Vec::new(),
            holiday_impacts: Vec::new(),
            conflict_report: ConflictReport::default(),
            estimated_end_date: None,
        }
    }
}
