pub mod memory_directory;
pub mod memory_holiday_provider;
pub mod memory_session_store;

pub use memory_directory::MemoryDirectory;
pub use memory_holiday_provider::MemoryHolidayProvider;
pub use memory_session_store::MemorySessionStore;
