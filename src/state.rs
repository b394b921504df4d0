use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{DirectoryProvider, HolidayProvider, SessionStore};
use crate::domain::services::commit::CommitService;
use crate::domain::services::preview::PreviewService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub session_store: Arc<dyn SessionStore>,
    pub directory: Arc<dyn DirectoryProvider>,
    pub holiday_provider: Arc<dyn HolidayProvider>,
    pub preview_service: Arc<PreviewService>,
    pub commit_service: Arc<CommitService>,
}
