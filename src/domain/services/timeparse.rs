use chrono::{NaiveTime, Timelike};

use crate::config::Config;
use crate::domain::models::branch::{Branch, BranchHours};
use crate::error::AppError;

/// Parses a time-of-day string into (hour, minute).
///
/// Tries the usual full-string layouts first, then falls back to scanning for
/// an HH:MM(:SS) pattern embedded anywhere in the value. Legacy imports carry
/// times like "14:00:00.000" or "Starts at 9:30 sharp".
pub fn parse_time(value: &str) -> Result<(u32, u32), AppError> {
    let trimmed = value.trim();

    for layout in ["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(trimmed, layout) {
            return Ok((t.hour(), t.minute()));
        }
    }

    scan_embedded(trimmed).ok_or_else(|| AppError::InvalidTimeFormat(value.to_string()))
}

fn scan_embedded(s: &str) -> Option<(u32, u32)> {
    let b = s.as_bytes();
    for i in 0..b.len() {
        if !b[i].is_ascii_digit() {
            continue;
        }
        // Anchor on the first digit of a run.
        if i > 0 && b[i - 1].is_ascii_digit() {
            continue;
        }
        let h_end = if i + 1 < b.len() && b[i + 1].is_ascii_digit() {
            i + 2
        } else {
            i + 1
        };
        if h_end >= b.len() || b[h_end] != b':' {
            continue;
        }
        let m_start = h_end + 1;
        let m_end = m_start + 2;
        if m_end > b.len() || !b[m_start].is_ascii_digit() || !b[m_start + 1].is_ascii_digit() {
            continue;
        }
        let hour: u32 = s[i..h_end].parse().ok()?;
        let minute: u32 = s[m_start..m_end].parse().ok()?;
        if hour < 24 && minute < 60 {
            return Some((hour, minute));
        }
    }
    None
}

/// Resolves a branch's operating window, falling back to the configured
/// defaults when the branch carries no explicit times.
pub fn resolve_branch_hours(branch: &Branch, config: &Config) -> Result<BranchHours, AppError> {
    let open_minutes = match &branch.open_time {
        Some(raw) => {
            let (h, m) = parse_time(raw)?;
            h * 60 + m
        }
        None => config.default_open_minutes,
    };
    let close_minutes = match &branch.close_time {
        Some(raw) => {
            let (h, m) = parse_time(raw)?;
            h * 60 + m
        }
        None => config.default_close_minutes,
    };

    if close_minutes <= open_minutes {
        return Err(AppError::InvalidBranchHours {
            open_minutes,
            close_minutes,
        });
    }

    Ok(BranchHours {
        open_minutes,
        close_minutes,
    })
}
