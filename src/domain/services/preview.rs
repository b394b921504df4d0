use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde_json::json;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::models::branch::BranchHours;
use crate::domain::models::conflict::ConflictReport;
use crate::domain::models::directory::Group;
use crate::domain::models::preview::{
    PreviewIssue, PreviewResult, PreviewStage, Severity,
};
use crate::domain::models::schedule::ScheduleDefinition;
use crate::domain::models::session::CandidateSession;
use crate::domain::ports::{DirectoryProvider, HolidayProvider, SessionStore};
use crate::domain::services::conflict::{ConflictDetector, ConflictScope};
use crate::domain::services::generator::{build_plan, generate};
use crate::domain::services::holiday::reschedule;
use crate::domain::services::reindex::reindex;
use crate::domain::services::timeparse::resolve_branch_hours;
use crate::error::AppError;

/// Runs the full pipeline without persisting anything: structural and domain
/// validation, generation, holiday shifting, reindexing and conflict
/// detection, accumulating severity-tagged issues along the way.
///
/// Pure with respect to a store snapshot; safe to call repeatedly and
/// concurrently. Only infrastructure failures surface as Err; every
/// validation outcome is reported through the result.
pub struct PreviewService {
    config: Config,
    directory: Arc<dyn DirectoryProvider>,
    holidays: Arc<dyn HolidayProvider>,
    detector: ConflictDetector,
}

impl PreviewService {
    pub fn new(
        config: Config,
        store: Arc<dyn SessionStore>,
        directory: Arc<dyn DirectoryProvider>,
        holidays: Arc<dyn HolidayProvider>,
    ) -> Self {
        Self {
            config,
            directory,
            holidays,
            detector: ConflictDetector::new(store),
        }
    }

    pub async fn preview(
        &self,
        definition: &ScheduleDefinition,
    ) -> Result<PreviewResult, AppError> {
        let mut issues = Vec::new();

        // Stage 1: structure. Every issue here is fatal.
        validate_structure(definition, &self.config, &mut issues);
        if !issues.is_empty() {
            return Ok(PreviewResult::halted(
                PreviewStage::ValidatingStructure,
                issues,
            ));
        }

        // Stage 2: domain. Missing branch or an unusable operating window is
        // fatal (nothing can be generated); payment and authorization issues
        // are advisory here and only gate can_create.
        let domain = self.validate_domain(definition, &mut issues).await?;
        let (branch_hours, group) = match domain {
            Some(ok) => ok,
            None => {
                return Ok(PreviewResult::halted(PreviewStage::ValidatingDomain, issues));
            }
        };

        // Stage 3: generation, all-or-nothing.
        let plan = match build_plan(definition) {
            Ok(plan) => plan,
            Err(e) => {
                issues.push(generation_issue(&e));
                return Ok(PreviewResult::halted(PreviewStage::GeneratingSessions, issues));
            }
        };
        let sessions = match generate(
            definition,
            &plan,
            definition.total_sessions(),
            definition.hours_per_session,
            branch_hours,
        ) {
            Ok(sessions) => sessions,
            Err(e) => {
                issues.push(generation_issue(&e));
                return Ok(PreviewResult::halted(PreviewStage::GeneratingSessions, issues));
            }
        };

        // Stage 4: holidays. A failing provider downgrades to "no holidays".
        let holidays = self.load_holidays(&sessions, &mut issues).await;
        let (mut sessions, holiday_impacts) = reschedule(&sessions, &holidays);

        // Stage 5: reindex.
        reindex(&mut sessions, definition.start_date);
        let estimated_end_date = sessions.iter().map(|s| s.date).max();

        // Stage 6: conflicts. Structured data plus one issue per dimension.
        let scope = ConflictScope::from_definition(definition, group.as_ref());
        let conflict_report = self.detector.detect(&scope, &sessions).await?;
        push_conflict_issues(&conflict_report, &mut issues);

        let can_create = issues.iter().all(|i| i.severity != Severity::Error);
        info!(
            schedule = %definition.name,
            sessions = sessions.len(),
            shifted = holiday_impacts.len(),
            can_create,
            "schedule preview complete"
        );

        Ok(PreviewResult {
            can_create,
            stage_reached: PreviewStage::Done,
            issues,
            session_preview: sessions,
            holiday_impacts,
            conflict_report,
            estimated_end_date,
        })
    }

    /// Ok(Some(..)) to continue, Ok(None) when a fatal domain issue was
    /// recorded, Err only on directory failure.
    async fn validate_domain(
        &self,
        definition: &ScheduleDefinition,
        issues: &mut Vec<PreviewIssue>,
    ) -> Result<Option<(BranchHours, Option<Group>)>, AppError> {
        let branch = match self.directory.find_branch(&definition.branch_id).await? {
            Some(branch) => branch,
            None => {
                issues.push(PreviewIssue::error(
                    "branch_not_found",
                    format!("Branch {} does not exist", definition.branch_id),
                ));
                return Ok(None);
            }
        };

        let branch_hours = match resolve_branch_hours(&branch, &self.config) {
            Ok(hours) => hours,
            Err(e) => {
                issues.push(
                    PreviewIssue::error("invalid_branch_hours", e.to_string())
                        .with_details(json!({ "branch_id": branch.id })),
                );
                return Ok(None);
            }
        };

        if let Some(teacher_id) = &definition.default_teacher_id {
            match self.directory.find_teacher(teacher_id).await? {
                Some(teacher) if teacher.active => {}
                Some(teacher) => {
                    issues.push(
                        PreviewIssue::error(
                            "teacher_not_authorized",
                            format!("Teacher {} is not active", teacher.name),
                        )
                        .with_details(json!({ "teacher_id": teacher.id })),
                    );
                }
                None => {
                    issues.push(PreviewIssue::error(
                        "teacher_not_found",
                        format!("Teacher {} does not exist", teacher_id),
                    ));
                }
            }
        }

        if let Some(room_id) = &definition.default_room_id
            && self.directory.find_room(room_id).await?.is_none()
        {
            issues.push(PreviewIssue::error(
                "room_not_found",
                format!("Room {} does not exist", room_id),
            ));
        }

        let group = match &definition.group_id {
            Some(group_id) => match self.directory.find_group(group_id).await? {
                Some(group) => {
                    let unpaid: Vec<&str> = group
                        .members
                        .iter()
                        .filter(|m| !m.payment_status.is_eligible())
                        .map(|m| m.student_id.as_str())
                        .collect();
                    if !unpaid.is_empty() {
                        issues.push(
                            PreviewIssue::error(
                                "group_member_unpaid",
                                format!(
                                    "{} group member(s) are not payment-eligible",
                                    unpaid.len()
                                ),
                            )
                            .with_details(json!({ "student_ids": unpaid })),
                        );
                    }
                    Some(group)
                }
                None => {
                    issues.push(PreviewIssue::error(
                        "group_not_found",
                        format!("Group {} does not exist", group_id),
                    ));
                    return Ok(None);
                }
            },
            None => None,
        };

        Ok(Some((branch_hours, group)))
    }

    async fn load_holidays(
        &self,
        sessions: &[CandidateSession],
        issues: &mut Vec<PreviewIssue>,
    ) -> HashMap<NaiveDate, Option<String>> {
        let from_year = sessions.iter().map(|s| s.date.year()).min().unwrap_or(0);
        // Shifted replacements may spill into the following year.
        let to_year = sessions.iter().map(|s| s.date.year()).max().unwrap_or(0) + 1;

        match self.holidays.holidays(from_year, to_year).await {
            Ok(holidays) => holidays.into_iter().map(|h| (h.date, h.name)).collect(),
            Err(e) => {
                warn!("holiday provider unavailable, assuming no holidays: {}", e);
                issues.push(PreviewIssue::warning(
                    "holiday_provider_unavailable",
                    "Holiday calendar could not be loaded; sessions were not checked against holidays",
                ));
                HashMap::new()
            }
        }
    }
}

fn generation_issue(error: &AppError) -> PreviewIssue {
    PreviewIssue::error("generation_failed", error.to_string())
}

fn validate_structure(
    definition: &ScheduleDefinition,
    config: &Config,
    issues: &mut Vec<PreviewIssue>,
) {
    if definition.name.trim().is_empty() {
        issues.push(PreviewIssue::error("name_missing", "Schedule name is required"));
    }
    if definition.total_hours <= 0 {
        issues.push(PreviewIssue::error(
            "total_hours_invalid",
            format!("total_hours must be positive, got {}", definition.total_hours),
        ));
    }
    if definition.hours_per_session <= 0 {
        issues.push(PreviewIssue::error(
            "hours_per_session_invalid",
            format!(
                "hours_per_session must be positive, got {}",
                definition.hours_per_session
            ),
        ));
        return;
    }
    if definition.total_hours > 0 && definition.total_hours % definition.hours_per_session != 0 {
        issues.push(
            PreviewIssue::error(
                "total_hours_not_divisible",
                format!(
                    "total_hours {} is not a multiple of hours_per_session {}",
                    definition.total_hours, definition.hours_per_session
                ),
            )
            .with_details(json!({
                "total_hours": definition.total_hours,
                "hours_per_session": definition.hours_per_session,
            })),
        );
    }
    if definition.total_sessions() > config.max_total_sessions {
        issues.push(PreviewIssue::error(
            "too_many_sessions",
            format!(
                "{} sessions exceed the limit of {}",
                definition.total_sessions(),
                config.max_total_sessions
            ),
        ));
    }
    if let Some(end) = definition.estimated_end_date
        && end < definition.start_date
    {
        issues.push(PreviewIssue::error(
            "end_before_start",
            "estimated_end_date precedes start_date",
        ));
    }

    if definition.slots.is_empty() {
        if definition.legacy_start_time.is_none() {
            issues.push(PreviewIssue::error(
                "slots_missing",
                "Schedule supplies neither session slots nor a legacy start time",
            ));
        }
    } else {
        let mut weekdays = HashSet::new();
        for slot in &definition.slots {
            if slot.weekday > 6 {
                issues.push(PreviewIssue::error(
                    "slot_weekday_invalid",
                    format!("Slot weekday {} is out of range 0-6", slot.weekday),
                ));
            }
            if slot.start_hour > 23 || slot.start_minute > 59 {
                issues.push(PreviewIssue::error(
                    "slot_time_invalid",
                    format!(
                        "Slot time {:02}:{:02} is not a valid time of day",
                        slot.start_hour, slot.start_minute
                    ),
                ));
            }
            if !weekdays.insert(slot.weekday) {
                issues.push(PreviewIssue::error(
                    "slot_weekday_duplicate",
                    format!("More than one slot on weekday {}", slot.weekday),
                ));
            }
        }
        if definition.session_per_week > 0
            && definition.slots.len() != definition.session_per_week as usize
        {
            issues.push(PreviewIssue::error(
                "slot_count_mismatch",
                format!(
                    "Schedule declares {} sessions per week but supplies {} slots",
                    definition.session_per_week,
                    definition.slots.len()
                ),
            ));
        }
    }

    if !definition.is_class() && definition.participant_user_ids.is_empty() {
        issues.push(PreviewIssue::error(
            "participants_missing",
            "Non-class schedules must list at least one participant",
        ));
    }
}

fn push_conflict_issues(report: &ConflictReport, issues: &mut Vec<PreviewIssue>) {
    if let Some(group) = &report.group_conflict {
        issues.push(
            PreviewIssue::error(
                "group_schedule_conflict",
                format!(
                    "Group already holds active schedule \"{}\"",
                    group.existing_schedule_name
                ),
            )
            .with_details(json!({
                "group_id": group.group_id,
                "existing_schedule_id": group.existing_schedule_id,
            })),
        );
    }

    let dims = [
        ("room_conflict", &report.room_conflicts),
        ("teacher_conflict", &report.teacher_conflicts),
        ("participant_conflict", &report.participant_conflicts),
        ("student_conflict", &report.student_conflicts),
    ];
    for (code, conflicts) in dims {
        for conflict in conflicts {
            issues.push(
                PreviewIssue::error(
                    code,
                    format!(
                        "{} overlapping session(s) for {}",
                        conflict.hits.len(),
                        conflict.entity_id
                    ),
                )
                .with_details(json!({
                    "entity_id": conflict.entity_id,
                    "hits": conflict.hits.len(),
                })),
            );
        }
    }
}
