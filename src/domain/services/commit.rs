use std::sync::Arc;

use tracing::info;

use crate::domain::models::conflict::ConflictReport;
use crate::domain::models::preview::{PreviewIssue, Severity};
use crate::domain::models::schedule::{ScheduleDefinition, ScheduleRecord};
use crate::domain::models::session::CandidateSession;
use crate::domain::ports::SessionStore;
use crate::domain::services::preview::PreviewService;
use crate::error::AppError;

/// What the commit pipeline produced: the schedule row, its sessions and the
/// (empty) conflict report that cleared the gate.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    pub schedule: ScheduleRecord,
    pub sessions: Vec<CandidateSession>,
    pub conflict_report: ConflictReport,
}

/// Re-runs the full pipeline immediately before a transactional write.
///
/// Conflict detection is only as fresh as the last read; the store must keep
/// the re-check and the insert inside one transaction so two concurrent
/// creations cannot both observe "no conflict" and both commit.
pub struct CommitService {
    preview: Arc<PreviewService>,
    store: Arc<dyn SessionStore>,
}

impl CommitService {
    pub fn new(preview: Arc<PreviewService>, store: Arc<dyn SessionStore>) -> Self {
        Self { preview, store }
    }

    /// Runs generation and detection without writing. Fails outright on any
    /// fatal error or unresolved error-severity issue.
    pub async fn generate_for_commit(
        &self,
        definition: &ScheduleDefinition,
    ) -> Result<CommitOutcome, AppError> {
        let result = self.preview.preview(definition).await?;

        if !result.can_create {
            let blocking = result
                .issues
                .iter()
                .find(|i| i.severity == Severity::Error)
                .ok_or(AppError::Internal)?;
            return Err(commit_error(blocking));
        }

        let end_date = result
            .estimated_end_date
            .unwrap_or(definition.start_date);

        Ok(CommitOutcome {
            schedule: ScheduleRecord::from_definition(definition, end_date),
            sessions: result.session_preview,
            conflict_report: result.conflict_report,
        })
    }

    /// The full commit path: re-validate, re-detect, then hand the rows to
    /// the store for an atomic insert. No partial writes.
    pub async fn commit(&self, definition: &ScheduleDefinition) -> Result<CommitOutcome, AppError> {
        let outcome = self.generate_for_commit(definition).await?;
        self.store
            .insert_schedule(&outcome.schedule, &outcome.sessions)
            .await?;
        info!(
            schedule_id = %outcome.schedule.id,
            sessions = outcome.sessions.len(),
            "schedule committed"
        );
        Ok(outcome)
    }
}

/// Maps the first blocking preview issue onto the commit error taxonomy.
fn commit_error(issue: &PreviewIssue) -> AppError {
    match issue.code.as_str() {
        "group_schedule_conflict" | "room_conflict" | "teacher_conflict"
        | "participant_conflict" | "student_conflict" => {
            AppError::Conflict(issue.message.clone())
        }
        "generation_failed" => AppError::Generation(issue.message.clone()),
        "branch_not_found" | "invalid_branch_hours" | "teacher_not_found"
        | "teacher_not_authorized" | "room_not_found" | "group_not_found"
        | "group_member_unpaid" => AppError::DomainValidation(issue.message.clone()),
        _ => AppError::Validation(issue.message.clone()),
    }
}
