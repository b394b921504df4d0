use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Datelike;

use crate::domain::models::directory::Holiday;
use crate::domain::ports::HolidayProvider;
use crate::error::AppError;

/// In-memory holiday calendar. `set_failing` simulates an unreachable
/// upstream calendar, which callers must treat as "no holidays".
#[derive(Default)]
pub struct MemoryHolidayProvider {
    holidays: Mutex<Vec<Holiday>>,
    failing: AtomicBool,
}

impl MemoryHolidayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_holiday(&self, holiday: Holiday) {
        let mut holidays = self.holidays.lock().expect("holidays poisoned");
        holidays.push(holiday);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl HolidayProvider for MemoryHolidayProvider {
    async fn holidays(&self, from_year: i32, to_year: i32) -> Result<Vec<Holiday>, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Store("holiday calendar unreachable".to_string()));
        }
        let holidays = self.holidays.lock().map_err(|_| AppError::Internal)?;
        Ok(holidays
            .iter()
            .filter(|h| h.date.year() >= from_year && h.date.year() <= to_year)
            .cloned()
            .collect())
    }
}
