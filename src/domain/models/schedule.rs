use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RecurringPattern {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Yearly,
    Custom,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Pending,
    Assigned,
    Scheduled,
    Completed,
    Cancelled,
}

impl ScheduleStatus {
    /// Schedules in these states own sessions that block other bookings.
    pub fn is_bookable(self) -> bool {
        matches!(self, ScheduleStatus::Assigned | ScheduleStatus::Scheduled)
    }
}

/// One weekly recurrence point. Weekday 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SessionSlot {
    pub weekday: u8,
    pub start_hour: u8,
    pub start_minute: u8,
}

impl SessionSlot {
    pub fn start_minutes(&self) -> u32 {
        self.start_hour as u32 * 60 + self.start_minute as u32
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScheduleDefinition {
    /// Set when previewing an edit of an existing schedule; its own committed
    /// sessions are then excluded from conflict queries.
    pub id: Option<String>,
    pub branch_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub estimated_end_date: Option<NaiveDate>,
    pub recurring_pattern: RecurringPattern,
    pub total_hours: i32,
    pub hours_per_session: i32,
    pub session_per_week: i32,
    pub default_teacher_id: Option<String>,
    pub default_room_id: Option<String>,
    /// Class schedules book a whole group.
    pub group_id: Option<String>,
    /// Individual participants for non-class schedules.
    pub participant_user_ids: Vec<String>,
    pub slots: Vec<SessionSlot>,
    /// Single start time of the legacy (pre-slot) definition shape, e.g. "14:00".
    pub legacy_start_time: Option<String>,
    /// Optional weekday list for the legacy shape; absent means every calendar day.
    pub explicit_weekdays: Option<Vec<u8>>,
}

impl ScheduleDefinition {
    /// total_hours / hours_per_session. Callers validate divisibility first.
    pub fn total_sessions(&self) -> i32 {
        if self.hours_per_session <= 0 {
            return 0;
        }
        self.total_hours / self.hours_per_session
    }

    pub fn is_class(&self) -> bool {
        self.group_id.is_some()
    }
}

/// Identity of an already-committed schedule, as surfaced in conflict reports.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScheduleRef {
    pub id: String,
    pub name: String,
}

/// The schedule row handed to the store on commit.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScheduleRecord {
    pub id: String,
    pub branch_id: String,
    pub name: String,
    pub status: ScheduleStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub default_teacher_id: Option<String>,
    pub default_room_id: Option<String>,
    pub group_id: Option<String>,
    pub participant_user_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ScheduleRecord {
    pub fn from_definition(definition: &ScheduleDefinition, end_date: NaiveDate) -> Self {
        Self {
            id: definition
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            branch_id: definition.branch_id.clone(),
            name: definition.name.clone(),
            status: ScheduleStatus::Scheduled,
            start_date: definition.start_date,
            end_date,
            default_teacher_id: definition.default_teacher_id.clone(),
            default_room_id: definition.default_room_id.clone(),
            group_id: definition.group_id.clone(),
            participant_user_ids: definition.participant_user_ids.clone(),
            created_at: Utc::now(),
        }
    }
}
