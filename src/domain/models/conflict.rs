use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One overlapping pair: a candidate window against a committed session's window.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OverlapHit {
    pub candidate_session_number: i32,
    pub candidate_date: NaiveDate,
    pub candidate_start: NaiveTime,
    pub candidate_end: NaiveTime,
    pub existing_schedule_id: String,
    pub existing_schedule_name: String,
    pub existing_session_id: String,
    pub existing_date: NaiveDate,
    pub existing_start: NaiveTime,
    pub existing_end: NaiveTime,
}

/// All hits for one entity (room, teacher, participant or group-member student).
/// Entities with zero hits never appear in the report.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DimensionConflict {
    pub entity_id: String,
    pub hits: Vec<OverlapHit>,
}

/// A group already holds an active class schedule, independent of date overlap.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroupConflict {
    pub group_id: String,
    pub existing_schedule_id: String,
    pub existing_schedule_name: String,
}

/// Built fresh per detection call, never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ConflictReport {
    pub group_conflict: Option<GroupConflict>,
    pub room_conflicts: Vec<DimensionConflict>,
    pub teacher_conflicts: Vec<DimensionConflict>,
    pub participant_conflicts: Vec<DimensionConflict>,
    pub student_conflicts: Vec<DimensionConflict>,
}

impl ConflictReport {
    pub fn is_empty(&self) -> bool {
        self.group_conflict.is_none()
            && self.room_conflicts.is_empty()
            && self.teacher_conflicts.is_empty()
            && self.participant_conflicts.is_empty()
            && self.student_conflicts.is_empty()
    }

    pub fn total_hits(&self) -> usize {
        let dims = [
            &self.room_conflicts,
            &self.teacher_conflicts,
            &self.participant_conflicts,
            &self.student_conflicts,
        ];
        dims.iter()
            .flat_map(|d| d.iter())
            .map(|c| c.hits.len())
            .sum()
    }
}
