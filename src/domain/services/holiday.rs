use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::domain::models::preview::HolidayImpact;
use crate::domain::models::session::CandidateSession;

/// Relocates holiday-landing sessions to later slots. Pure: the input is
/// never mutated and `out.len() == sessions.len()` for any holiday set.
///
/// Non-holiday sessions keep their position. Each displaced session is
/// replaced by an appended session that continues the weekly template forward
/// from the current last session until a non-holiday, non-duplicate slot is
/// found. Replacements appear in the order their holidays were encountered,
/// and the old-date to new-date mapping is produced in the same pass.
///
/// Callers recompute estimated_end_date from the new range afterward;
/// shifting past the original end date is not an error here.
pub fn reschedule(
    sessions: &[CandidateSession],
    holidays: &HashMap<NaiveDate, Option<String>>,
) -> (Vec<CandidateSession>, Vec<HolidayImpact>) {
    let mut kept: Vec<CandidateSession> = Vec::with_capacity(sessions.len());
    let mut displaced: Vec<&CandidateSession> = Vec::new();

    for session in sessions {
        if holidays.contains_key(&session.date) {
            displaced.push(session);
        } else {
            kept.push(session.clone());
        }
    }

    if displaced.is_empty() {
        return (kept, Vec::new());
    }

    // The weekly template, recovered from the generated sequence itself.
    let template: BTreeSet<(u8, NaiveTime, NaiveTime)> = sessions
        .iter()
        .map(|s| {
            (
                s.date.weekday().num_days_from_sunday() as u8,
                s.start_time,
                s.end_time,
            )
        })
        .collect();

    let mut occupied: HashSet<(NaiveDate, NaiveTime)> =
        kept.iter().map(|s| (s.date, s.start_time)).collect();

    // Walk begins after the current schedule tail, holiday-landing or not.
    let mut tail = sessions
        .iter()
        .map(|s| s.date)
        .max()
        .expect("displaced is non-empty");

    let mut out = kept;
    let mut impacts = Vec::with_capacity(displaced.len());

    for old in displaced {
        let mut date = tail.succ_opt().expect("date overflow");
        let replacement = 'search: loop {
            if !holidays.contains_key(&date) {
                let weekday = date.weekday().num_days_from_sunday() as u8;
                for (wd, start, end) in &template {
                    if *wd == weekday && !occupied.contains(&(date, *start)) {
                        break 'search (date, *start, *end);
                    }
                }
            }
            date = date.succ_opt().expect("date overflow");
        };

        let (new_date, start, end) = replacement;
        let mut shifted = old.clone();
        shifted.date = new_date;
        shifted.start_time = start;
        shifted.end_time = end;

        occupied.insert((new_date, start));
        impacts.push(HolidayImpact {
            old_date: old.date,
            new_date,
            holiday_name: holidays.get(&old.date).cloned().flatten(),
        });
        out.push(shifted);
        tail = new_date;
    }

    (out, impacts)
}
