//! Storage module (roster store adapters)

pub mod json_store;
pub mod memory_store;

pub use json_store::JsonFileStore;
pub use memory_store::MemoryRosterStore;
