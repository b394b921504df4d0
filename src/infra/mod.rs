pub mod factory;
pub mod memory;
