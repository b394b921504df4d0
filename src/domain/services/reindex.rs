use chrono::NaiveDate;

use crate::domain::models::session::CandidateSession;

/// Finalizes numbering after generation and holiday shifting: sorts by
/// (date, start_time), assigns session_number from 1, and sets week_number
/// relative to the schedule start, floored at 1. Idempotent.
pub fn reindex(sessions: &mut [CandidateSession], schedule_start: NaiveDate) {
    sessions.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));

    for (idx, session) in sessions.iter_mut().enumerate() {
        session.session_number = idx as i32 + 1;
        let days = (session.date - schedule_start).num_days();
        session.week_number = (days.div_euclid(7) + 1).max(1) as i32;
    }
}
