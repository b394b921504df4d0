pub mod branch;
pub mod conflict;
pub mod directory;
pub mod preview;
pub mod schedule;
pub mod session;
