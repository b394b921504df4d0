use std::collections::BTreeMap;

use chrono::{Datelike, NaiveTime};

use crate::domain::models::branch::BranchHours;
use crate::domain::models::schedule::{ScheduleDefinition, SessionSlot};
use crate::domain::models::session::CandidateSession;
use crate::domain::services::timeparse::parse_time;
use crate::error::AppError;

/// Hard bound on the day-by-day walk. A weekly template always matches within
/// seven days, so hitting this means the plan cannot produce sessions at all.
const WALK_CAP_DAYS: u32 = 3700;

/// How the recurrence expands into concrete dates.
#[derive(Debug, Clone)]
pub enum GenerationPlan {
    /// One slot per weekday, Sunday-first.
    Slots(Vec<SessionSlot>),
    /// Single start time with an optional weekday list; no list means every
    /// calendar day.
    Legacy {
        start_minutes: u32,
        weekdays: Option<Vec<u8>>,
    },
}

/// Derives the generation plan from a definition: template slots when
/// present, otherwise the legacy single start time.
pub fn build_plan(definition: &ScheduleDefinition) -> Result<GenerationPlan, AppError> {
    if !definition.slots.is_empty() {
        let mut slots = definition.slots.clone();
        slots.sort_by_key(|s| (s.weekday, s.start_minutes()));
        return Ok(GenerationPlan::Slots(slots));
    }

    match &definition.legacy_start_time {
        Some(raw) => {
            let (hour, minute) = parse_time(raw)?;
            if let Some(weekdays) = &definition.explicit_weekdays {
                if weekdays.is_empty() {
                    return Err(AppError::Generation(
                        "explicit weekday list is empty".to_string(),
                    ));
                }
                if let Some(bad) = weekdays.iter().find(|w| **w > 6) {
                    return Err(AppError::Generation(format!(
                        "invalid weekday {} (expected 0=Sunday..6=Saturday)",
                        bad
                    )));
                }
            }
            Ok(GenerationPlan::Legacy {
                start_minutes: hour * 60 + minute,
                weekdays: definition.explicit_weekdays.clone(),
            })
        }
        None => Err(AppError::Generation(
            "schedule has no session slots and no legacy start time".to_string(),
        )),
    }
}

fn minutes_to_time(minutes: u32) -> Result<NaiveTime, AppError> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).ok_or(AppError::Internal)
}

fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Expands a plan into an ordered candidate session sequence.
///
/// Walks forward day by day from start_date, emitting one session on every
/// day whose weekday the plan covers, until `total_sessions` sessions exist.
/// Generation is all-or-nothing: any slot whose window falls outside branch
/// hours aborts before partial results are returned.
pub fn generate(
    definition: &ScheduleDefinition,
    plan: &GenerationPlan,
    total_sessions: i32,
    hours_per_session: i32,
    branch_hours: BranchHours,
) -> Result<Vec<CandidateSession>, AppError> {
    if total_sessions <= 0 {
        return Err(AppError::Generation(format!(
            "total session count must be positive, got {}",
            total_sessions
        )));
    }
    if hours_per_session <= 0 {
        return Err(AppError::Generation(format!(
            "hours per session must be positive, got {}",
            hours_per_session
        )));
    }
    let duration_minutes = hours_per_session as u32 * 60;

    // Weekday -> start minutes. Built up front so out-of-hours slots abort
    // before any session is emitted.
    let starts_by_weekday: BTreeMap<u8, u32> = match plan {
        GenerationPlan::Slots(slots) => slots
            .iter()
            .map(|s| (s.weekday, s.start_minutes()))
            .collect(),
        GenerationPlan::Legacy {
            start_minutes,
            weekdays,
        } => {
            let days: Vec<u8> = match weekdays {
                Some(list) => list.clone(),
                None => (0..7).collect(),
            };
            days.into_iter().map(|wd| (wd, *start_minutes)).collect()
        }
    };

    if starts_by_weekday.is_empty() {
        return Err(AppError::Generation(
            "generation plan covers no weekdays".to_string(),
        ));
    }

    for (weekday, start_minutes) in &starts_by_weekday {
        if !branch_hours.contains(*start_minutes, duration_minutes) {
            return Err(AppError::Generation(format!(
                "slot {} on weekday {} runs until {} which is outside branch hours {}-{}",
                format_minutes(*start_minutes),
                weekday,
                format_minutes(*start_minutes + duration_minutes),
                format_minutes(branch_hours.open_minutes),
                format_minutes(branch_hours.close_minutes),
            )));
        }
    }

    let mut sessions = Vec::with_capacity(total_sessions as usize);
    let mut date = definition.start_date;
    let mut walked = 0u32;

    while sessions.len() < total_sessions as usize {
        walked += 1;
        if walked > WALK_CAP_DAYS {
            return Err(AppError::Generation(
                "generation walked too far without filling the schedule".to_string(),
            ));
        }

        let weekday = date.weekday().num_days_from_sunday() as u8;
        if let Some(start_minutes) = starts_by_weekday.get(&weekday) {
            let start_time = minutes_to_time(*start_minutes)?;
            let end_time = minutes_to_time(*start_minutes + duration_minutes)?;
            sessions.push(CandidateSession::new(date, start_time, end_time));
        }

        date = date.succ_opt().ok_or(AppError::Internal)?;
    }

    Ok(sessions)
}
