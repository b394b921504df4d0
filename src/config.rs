use std::env;

#[derive(Clone)]
pub struct Config {
    /// Fallback opening time (minutes since midnight) when a branch has none configured.
    pub default_open_minutes: u32,
    /// Fallback closing time (minutes since midnight).
    pub default_close_minutes: u32,
    /// Upper bound on total_sessions accepted from a single definition.
    pub max_total_sessions: i32,
}

fn env_u32(key: &str, fallback: u32) -> u32 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(fallback)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            default_open_minutes: env_u32("DEFAULT_BRANCH_OPEN_MINUTES", 480),
            default_close_minutes: env_u32("DEFAULT_BRANCH_CLOSE_MINUTES", 1260),
            max_total_sessions: env_u32("MAX_TOTAL_SESSIONS", 366) as i32,
        }
    }
}
