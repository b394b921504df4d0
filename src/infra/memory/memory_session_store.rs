use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::models::schedule::{ScheduleRecord, ScheduleRef};
use crate::domain::models::session::{CandidateSession, CommittedSession, SessionStatus};
use crate::domain::ports::{DimensionFilter, SessionQuery, SessionStore};
use crate::error::AppError;

#[derive(Clone)]
struct SessionRow {
    id: String,
    schedule_id: String,
    date: NaiveDate,
    start_time: chrono::NaiveTime,
    end_time: chrono::NaiveTime,
    status: SessionStatus,
    room_id: Option<String>,
    teacher_id: Option<String>,
}

#[derive(Default)]
struct StoreInner {
    schedules: HashMap<String, ScheduleRecord>,
    sessions: Vec<SessionRow>,
    /// group_id -> member student ids, standing in for the group_members join
    /// table a SQL store would use.
    rosters: HashMap<String, Vec<String>>,
}

/// In-memory session store. The single mutex makes every call atomic, which
/// is the same isolation contract a SQL implementation provides with a
/// serializable transaction around the re-check and the insert.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<StoreInner>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_group_roster(&self, group_id: &str, student_ids: Vec<String>) {
        let mut inner = self.inner.lock().expect("store poisoned");
        inner.rosters.insert(group_id.to_string(), student_ids);
    }

    /// Assigns a room directly to one committed session, overriding the
    /// schedule default (keyed by date since a schedule holds at most one
    /// session per date-and-start in these fixtures).
    pub fn pin_session_room(&self, schedule_id: &str, date: NaiveDate, room_id: &str) {
        let mut inner = self.inner.lock().expect("store poisoned");
        for row in &mut inner.sessions {
            if row.schedule_id == schedule_id && row.date == date {
                row.room_id = Some(room_id.to_string());
            }
        }
    }

    pub fn pin_session_teacher(&self, schedule_id: &str, date: NaiveDate, teacher_id: &str) {
        let mut inner = self.inner.lock().expect("store poisoned");
        for row in &mut inner.sessions {
            if row.schedule_id == schedule_id && row.date == date {
                row.teacher_id = Some(teacher_id.to_string());
            }
        }
    }

    pub fn set_session_status(&self, schedule_id: &str, date: NaiveDate, status: SessionStatus) {
        let mut inner = self.inner.lock().expect("store poisoned");
        for row in &mut inner.sessions {
            if row.schedule_id == schedule_id && row.date == date {
                row.status = status;
            }
        }
    }

    pub fn session_count(&self, schedule_id: &str) -> usize {
        let inner = self.inner.lock().expect("store poisoned");
        inner
            .sessions
            .iter()
            .filter(|s| s.schedule_id == schedule_id)
            .count()
    }

    pub fn schedule_count(&self) -> usize {
        let inner = self.inner.lock().expect("store poisoned");
        inner.schedules.len()
    }
}

fn matches_filter(
    filter: &DimensionFilter,
    row: &SessionRow,
    schedule: &ScheduleRecord,
    roster: &[String],
) -> bool {
    match filter {
        DimensionFilter::Room(room_id) => match &row.room_id {
            Some(direct) => direct == room_id,
            None => schedule.default_room_id.as_deref() == Some(room_id),
        },
        DimensionFilter::Teacher(teacher_id) => match &row.teacher_id {
            Some(direct) => direct == teacher_id,
            None => schedule.default_teacher_id.as_deref() == Some(teacher_id),
        },
        DimensionFilter::Participants(user_ids) => schedule
            .participant_user_ids
            .iter()
            .any(|id| user_ids.contains(id)),
        DimensionFilter::Students(student_ids) => {
            roster.iter().any(|id| student_ids.contains(id))
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn find_bookable_sessions(
        &self,
        query: &SessionQuery,
    ) -> Result<Vec<CommittedSession>, AppError> {
        let inner = self.inner.lock().map_err(|_| AppError::Store("store poisoned".into()))?;

        let mut out = Vec::new();
        for row in &inner.sessions {
            if Some(row.schedule_id.as_str()) == query.exclude_schedule_id.as_deref() {
                continue;
            }
            if !row.status.blocks_bookings() {
                continue;
            }
            if row.date < query.date_from || row.date > query.date_to {
                continue;
            }
            let Some(schedule) = inner.schedules.get(&row.schedule_id) else {
                continue;
            };
            if !schedule.status.is_bookable() {
                continue;
            }
            let roster: &[String] = schedule
                .group_id
                .as_ref()
                .and_then(|gid| inner.rosters.get(gid))
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            if !matches_filter(&query.filter, row, schedule, roster) {
                continue;
            }
            out.push(CommittedSession {
                id: row.id.clone(),
                schedule_id: schedule.id.clone(),
                schedule_name: schedule.name.clone(),
                date: row.date,
                start_time: row.start_time,
                end_time: row.end_time,
                status: row.status,
                room_id: row.room_id.clone(),
                teacher_id: row.teacher_id.clone(),
                default_room_id: schedule.default_room_id.clone(),
                default_teacher_id: schedule.default_teacher_id.clone(),
                participant_user_ids: schedule.participant_user_ids.clone(),
                student_ids: roster.to_vec(),
            });
        }
        out.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
        Ok(out)
    }

    async fn find_active_group_schedule(
        &self,
        group_id: &str,
        exclude_schedule_id: Option<&str>,
    ) -> Result<Option<ScheduleRef>, AppError> {
        let inner = self.inner.lock().map_err(|_| AppError::Store("store poisoned".into()))?;
        let found = inner
            .schedules
            .values()
            .filter(|s| Some(s.id.as_str()) != exclude_schedule_id)
            .find(|s| s.status.is_bookable() && s.group_id.as_deref() == Some(group_id));
        Ok(found.map(|s| ScheduleRef {
            id: s.id.clone(),
            name: s.name.clone(),
        }))
    }

    async fn insert_schedule(
        &self,
        schedule: &ScheduleRecord,
        sessions: &[CandidateSession],
    ) -> Result<(), AppError> {
        let mut inner = self.inner.lock().map_err(|_| AppError::Store("store poisoned".into()))?;
        if inner.schedules.contains_key(&schedule.id) {
            return Err(AppError::Store(format!(
                "schedule {} already exists",
                schedule.id
            )));
        }
        inner.schedules.insert(schedule.id.clone(), schedule.clone());
        for session in sessions {
            inner.sessions.push(SessionRow {
                id: Uuid::new_v4().to_string(),
                schedule_id: schedule.id.clone(),
                date: session.date,
                start_time: session.start_time,
                end_time: session.end_time,
                status: session.status,
                room_id: None,
                teacher_id: None,
            });
        }
        Ok(())
    }
}
