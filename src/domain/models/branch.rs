use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Branch {
    pub id: String,
    pub name: String,
    /// Configured opening time, e.g. "09:00". None falls back to the configured default.
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

/// The operating window a branch enforces for scheduling, resolved once per schedule.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct BranchHours {
    pub open_minutes: u32,
    pub close_minutes: u32,
}

impl BranchHours {
    /// Whether a session starting at `start_minutes` and running
    /// `duration_minutes` fits entirely inside the operating window.
    pub fn contains(&self, start_minutes: u32, duration_minutes: u32) -> bool {
        start_minutes >= self.open_minutes
            && start_minutes + duration_minutes <= self.close_minutes
    }
}
