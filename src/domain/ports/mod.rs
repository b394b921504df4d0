use crate::domain::models::{
    branch::Branch,
    directory::{Group, Holiday, Room, Teacher},
    schedule::{ScheduleRecord, ScheduleRef},
    session::{CandidateSession, CommittedSession},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Dimension filter of a conflict query. The store applies it the way the
/// backing SQL would: direct assignment or schedule default for resources,
/// membership intersection for people.
#[derive(Debug, Clone)]
pub enum DimensionFilter {
    Room(String),
    Teacher(String),
    Participants(Vec<String>),
    Students(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct SessionQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    /// The schedule being edited, whose own sessions never conflict with themselves.
    pub exclude_schedule_id: Option<String>,
    pub filter: DimensionFilter,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Committed sessions of bookable (assigned/scheduled) schedules matching
    /// the filter, excluding cancelled and no-show sessions, within the date
    /// range, joined to schedule identity, defaults and membership.
    async fn find_bookable_sessions(
        &self,
        query: &SessionQuery,
    ) -> Result<Vec<CommittedSession>, AppError>;

    /// The active (assigned/scheduled) class schedule currently held by a
    /// group, if any.
    async fn find_active_group_schedule(
        &self,
        group_id: &str,
        exclude_schedule_id: Option<&str>,
    ) -> Result<Option<ScheduleRef>, AppError>;

    /// Insert the schedule row plus all session rows atomically. The commit
    /// orchestrator re-runs conflict detection immediately before calling
    /// this; implementations must keep that read and this write inside one
    /// transaction so two concurrent creations cannot both commit.
    async fn insert_schedule(
        &self,
        schedule: &ScheduleRecord,
        sessions: &[CandidateSession],
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    async fn find_branch(&self, branch_id: &str) -> Result<Option<Branch>, AppError>;
    async fn find_room(&self, room_id: &str) -> Result<Option<Room>, AppError>;
    async fn find_teacher(&self, teacher_id: &str) -> Result<Option<Teacher>, AppError>;
    async fn find_group(&self, group_id: &str) -> Result<Option<Group>, AppError>;
}

#[async_trait]
pub trait HolidayProvider: Send + Sync {
    /// Holidays falling inside the inclusive year range. Failures are
    /// non-fatal to callers and treated as "no holidays".
    async fn holidays(&self, from_year: i32, to_year: i32) -> Result<Vec<Holiday>, AppError>;
}
