use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl SessionStatus {
    /// Cancelled and no-show sessions release their time window.
    pub fn blocks_bookings(self) -> bool {
        !matches!(self, SessionStatus::Cancelled | SessionStatus::NoShow)
    }
}

/// An in-memory, not-yet-persisted proposed occurrence.
///
/// Created by the generator; the date is mutated only by the holiday shifter
/// and the numbering only by the reindexer. Read-only afterward.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CandidateSession {
    pub session_number: i32,
    pub week_number: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: SessionStatus,
    pub notes: Option<String>,
}

impl CandidateSession {
    pub fn new(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            session_number: 0,
            week_number: 0,
            date,
            start_time,
            end_time,
            status: SessionStatus::Scheduled,
            notes: None,
        }
    }
}

/// A persisted session row joined to its owning schedule's identity, defaults
/// and membership, as returned by the session store for conflict queries.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommittedSession {
    pub id: String,
    pub schedule_id: String,
    pub schedule_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: SessionStatus,
    pub room_id: Option<String>,
    pub teacher_id: Option<String>,
    pub default_room_id: Option<String>,
    pub default_teacher_id: Option<String>,
    pub participant_user_ids: Vec<String>,
    pub student_ids: Vec<String>,
}

impl CommittedSession {
    /// Directly assigned room, falling back to the owning schedule's default
    /// (a null-room session implicitly books the default room).
    pub fn effective_room(&self) -> Option<&str> {
        self.room_id.as_deref().or(self.default_room_id.as_deref())
    }

    pub fn effective_teacher(&self) -> Option<&str> {
        self.teacher_id.as_deref().or(self.default_teacher_id.as_deref())
    }
}
