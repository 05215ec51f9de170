//! # Roster Infrastructure
//! 
//! Store implementations (adapters).

pub mod storage;

pub use storage::{JsonFileStore, MemoryRosterStore};
