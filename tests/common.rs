#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use schedule_core::config::Config;
use schedule_core::domain::models::branch::Branch;
use schedule_core::domain::models::directory::{
    Group, GroupMember, PaymentStatus, Room, Teacher,
};
use schedule_core::domain::models::schedule::{
    RecurringPattern, ScheduleDefinition, SessionSlot,
};
use schedule_core::infra::factory::bootstrap_with;
use schedule_core::infra::memory::{
    MemoryDirectory, MemoryHolidayProvider, MemorySessionStore,
};
use schedule_core::state::AppState;

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemorySessionStore>,
    pub directory: Arc<MemoryDirectory>,
    pub holidays: Arc<MemoryHolidayProvider>,
}

impl TestApp {
    /// Fresh state over in-memory infra, seeded with one branch (08:00-21:00),
    /// two rooms and one active teacher.
    pub fn new() -> Self {
        let store = Arc::new(MemorySessionStore::new());
        let directory = Arc::new(MemoryDirectory::new());
        let holidays = Arc::new(MemoryHolidayProvider::new());

        let state = bootstrap_with(
            Config::from_env(),
            store.clone(),
            directory.clone(),
            holidays.clone(),
        );

        directory.add_branch(Branch {
            id: "b1".to_string(),
            name: "Main Branch".to_string(),
            open_time: Some("08:00".to_string()),
            close_time: Some("21:00".to_string()),
        });
        directory.add_room(Room {
            id: "r1".to_string(),
            name: "Room 1".to_string(),
        });
        directory.add_room(Room {
            id: "r2".to_string(),
            name: "Room 2".to_string(),
        });
        directory.add_teacher(Teacher {
            id: "t1".to_string(),
            name: "Kim".to_string(),
            active: true,
        });

        Self {
            state,
            store,
            directory,
            holidays,
        }
    }

    pub fn add_group(&self, id: &str, paid_students: &[&str], unpaid_students: &[&str]) {
        let mut members: Vec<GroupMember> = paid_students
            .iter()
            .map(|s| GroupMember {
                student_id: s.to_string(),
                payment_status: PaymentStatus::Paid,
            })
            .collect();
        members.extend(unpaid_students.iter().map(|s| GroupMember {
            student_id: s.to_string(),
            payment_status: PaymentStatus::Unpaid,
        }));
        self.directory.add_group(Group {
            id: id.to_string(),
            name: format!("Group {}", id),
            members,
        });
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn slot(weekday: u8, hour: u8, minute: u8) -> SessionSlot {
    SessionSlot {
        weekday,
        start_hour: hour,
        start_minute: minute,
    }
}

/// A weekly slot-mode definition on branch b1 with a single participant.
pub fn weekly_definition(
    name: &str,
    start: NaiveDate,
    slots: Vec<SessionSlot>,
    total_hours: i32,
    hours_per_session: i32,
) -> ScheduleDefinition {
    ScheduleDefinition {
        id: None,
        branch_id: "b1".to_string(),
        name: name.to_string(),
        start_date: start,
        estimated_end_date: None,
        recurring_pattern: RecurringPattern::Weekly,
        total_hours,
        hours_per_session,
        session_per_week: slots.len() as i32,
        default_teacher_id: None,
        default_room_id: None,
        group_id: None,
        participant_user_ids: vec!["u1".to_string()],
        slots,
        legacy_start_time: None,
        explicit_weekdays: None,
    }
}
