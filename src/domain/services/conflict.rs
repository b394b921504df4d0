use std::sync::Arc;

use tracing::debug;

use crate::domain::models::conflict::{
    ConflictReport, DimensionConflict, GroupConflict, OverlapHit,
};
use crate::domain::models::directory::Group;
use crate::domain::models::schedule::ScheduleDefinition;
use crate::domain::models::session::{CandidateSession, CommittedSession};
use crate::domain::ports::{DimensionFilter, SessionQuery, SessionStore};
use crate::error::AppError;

/// What a detection run checks the candidates against. Derived from the
/// definition once the directory lookups have resolved.
#[derive(Debug, Clone)]
pub struct ConflictScope {
    pub exclude_schedule_id: Option<String>,
    pub room_id: Option<String>,
    pub teacher_id: Option<String>,
    pub participant_user_ids: Vec<String>,
    pub group: Option<GroupScope>,
}

#[derive(Debug, Clone)]
pub struct GroupScope {
    pub group_id: String,
    pub student_ids: Vec<String>,
}

impl ConflictScope {
    pub fn from_definition(definition: &ScheduleDefinition, group: Option<&Group>) -> Self {
        Self {
            exclude_schedule_id: definition.id.clone(),
            room_id: definition.default_room_id.clone(),
            teacher_id: definition.default_teacher_id.clone(),
            participant_user_ids: definition.participant_user_ids.clone(),
            group: group.map(|g| GroupScope {
                group_id: g.id.clone(),
                student_ids: g.student_ids(),
            }),
        }
    }
}

/// Two sessions conflict iff they fall on the same calendar day and their
/// half-open time intervals overlap.
fn overlaps(candidate: &CandidateSession, existing: &CommittedSession) -> bool {
    candidate.date == existing.date
        && candidate.start_time < existing.end_time
        && existing.start_time < candidate.end_time
}

fn hit(candidate: &CandidateSession, existing: &CommittedSession) -> OverlapHit {
    OverlapHit {
        candidate_session_number: candidate.session_number,
        candidate_date: candidate.date,
        candidate_start: candidate.start_time,
        candidate_end: candidate.end_time,
        existing_schedule_id: existing.schedule_id.clone(),
        existing_schedule_name: existing.schedule_name.clone(),
        existing_session_id: existing.id.clone(),
        existing_date: existing.date,
        existing_start: existing.start_time,
        existing_end: existing.end_time,
    }
}

/// All overlaps of the candidates against one resource entity (a room or a
/// teacher), matched through the session's effective assignment.
fn resource_conflicts(
    entity_id: &str,
    candidates: &[CandidateSession],
    existing: &[CommittedSession],
    effective: impl Fn(&CommittedSession) -> Option<&str>,
) -> Vec<DimensionConflict> {
    let mut hits = Vec::new();
    for candidate in candidates {
        for session in existing {
            if effective(session) == Some(entity_id) && overlaps(candidate, session) {
                hits.push(hit(candidate, session));
            }
        }
    }
    if hits.is_empty() {
        Vec::new()
    } else {
        vec![DimensionConflict {
            entity_id: entity_id.to_string(),
            hits,
        }]
    }
}

fn participant_ids(session: &CommittedSession) -> &[String] {
    &session.participant_user_ids
}

fn student_ids(session: &CommittedSession) -> &[String] {
    &session.student_ids
}

/// Per-person overlaps, one entry per affected person, in the order the
/// caller listed them. People with zero hits are omitted.
fn person_conflicts(
    person_ids: &[String],
    candidates: &[CandidateSession],
    existing: &[CommittedSession],
    membership: impl Fn(&CommittedSession) -> &[String],
) -> Vec<DimensionConflict> {
    let mut out = Vec::new();
    for person in person_ids {
        let mut hits = Vec::new();
        for candidate in candidates {
            for session in existing {
                if membership(session).iter().any(|id| id == person)
                    && overlaps(candidate, session)
                {
                    hits.push(hit(candidate, session));
                }
            }
        }
        if !hits.is_empty() {
            out.push(DimensionConflict {
                entity_id: person.clone(),
                hits,
            });
        }
    }
    out
}

/// Checks candidate sessions against committed sessions across four
/// independent dimensions, plus the coarse one-active-schedule-per-group
/// rule. Read-only; safe to run concurrently across unrelated requests.
pub struct ConflictDetector {
    store: Arc<dyn SessionStore>,
}

impl ConflictDetector {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    async fn fetch(
        &self,
        scope: &ConflictScope,
        candidates: &[CandidateSession],
        filter: DimensionFilter,
    ) -> Result<Vec<CommittedSession>, AppError> {
        let date_from = candidates.iter().map(|s| s.date).min().ok_or(AppError::Internal)?;
        let date_to = candidates.iter().map(|s| s.date).max().ok_or(AppError::Internal)?;
        self.store
            .find_bookable_sessions(&SessionQuery {
                date_from,
                date_to,
                exclude_schedule_id: scope.exclude_schedule_id.clone(),
                filter,
            })
            .await
    }

    pub async fn detect(
        &self,
        scope: &ConflictScope,
        candidates: &[CandidateSession],
    ) -> Result<ConflictReport, AppError> {
        let mut report = ConflictReport::default();

        // Group exclusivity is independent of the candidate dates.
        if let Some(group) = &scope.group
            && let Some(existing) = self
                .store
                .find_active_group_schedule(&group.group_id, scope.exclude_schedule_id.as_deref())
                .await?
        {
            report.group_conflict = Some(GroupConflict {
                group_id: group.group_id.clone(),
                existing_schedule_id: existing.id,
                existing_schedule_name: existing.name,
            });
        }

        if candidates.is_empty() {
            return Ok(report);
        }

        if let Some(room_id) = &scope.room_id {
            let existing = self
                .fetch(scope, candidates, DimensionFilter::Room(room_id.clone()))
                .await?;
            report.room_conflicts = resource_conflicts(
                room_id,
                candidates,
                &existing,
                CommittedSession::effective_room,
            );
        }

        if let Some(teacher_id) = &scope.teacher_id {
            let existing = self
                .fetch(scope, candidates, DimensionFilter::Teacher(teacher_id.clone()))
                .await?;
            report.teacher_conflicts = resource_conflicts(
                teacher_id,
                candidates,
                &existing,
                CommittedSession::effective_teacher,
            );
        }

        if !scope.participant_user_ids.is_empty() {
            let existing = self
                .fetch(
                    scope,
                    candidates,
                    DimensionFilter::Participants(scope.participant_user_ids.clone()),
                )
                .await?;
            report.participant_conflicts = person_conflicts(
                &scope.participant_user_ids,
                candidates,
                &existing,
                participant_ids,
            );
        }

        if let Some(group) = &scope.group
            && !group.student_ids.is_empty()
        {
            let existing = self
                .fetch(
                    scope,
                    candidates,
                    DimensionFilter::Students(group.student_ids.clone()),
                )
                .await?;
            report.student_conflicts =
                person_conflicts(&group.student_ids, candidates, &existing, student_ids);
        }

        debug!(
            hits = report.total_hits(),
            group_conflict = report.group_conflict.is_some(),
            "conflict detection finished"
        );
        Ok(report)
    }
}
