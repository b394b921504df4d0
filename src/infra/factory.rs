use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::domain::ports::{DirectoryProvider, HolidayProvider, SessionStore};
use crate::domain::services::commit::CommitService;
use crate::domain::services::preview::PreviewService;
use crate::infra::memory::{MemoryDirectory, MemoryHolidayProvider, MemorySessionStore};
use crate::state::AppState;

/// Wires services on top of caller-provided port implementations. The
/// embedding application passes its own store and directory here.
pub fn bootstrap_with(
    config: Config,
    session_store: Arc<dyn SessionStore>,
    directory: Arc<dyn DirectoryProvider>,
    holiday_provider: Arc<dyn HolidayProvider>,
) -> AppState {
    let preview_service = Arc::new(PreviewService::new(
        config.clone(),
        session_store.clone(),
        directory.clone(),
        holiday_provider.clone(),
    ));
    let commit_service = Arc::new(CommitService::new(
        preview_service.clone(),
        session_store.clone(),
    ));

    AppState {
        config,
        session_store,
        directory,
        holiday_provider,
        preview_service,
        commit_service,
    }
}

/// Standalone state backed by the in-memory infrastructure.
pub fn bootstrap_state(config: &Config) -> AppState {
    info!("Bootstrapping with in-memory store and directory");
    bootstrap_with(
        config.clone(),
        Arc::new(MemorySessionStore::new()),
        Arc::new(MemoryDirectory::new()),
        Arc::new(MemoryHolidayProvider::new()),
    )
}
