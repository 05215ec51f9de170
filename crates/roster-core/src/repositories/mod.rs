//! Store traits (ports)

pub mod roster_store;

pub use roster_store::RosterStore;
#[cfg(test)]
pub use roster_store::MockRosterStore;
