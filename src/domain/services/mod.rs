pub mod commit;
pub mod conflict;
pub mod generator;
pub mod holiday;
pub mod preview;
pub mod reindex;
pub mod timeparse;
