//! Domain services (business logic)

pub mod assignment;
pub mod grouping;
pub mod pacing;
pub mod admin_gate;
pub mod export;
pub mod roster_service;

pub use assignment::{assign, RandomSource, SeededRandom, ThreadRandom};
pub use grouping::{partition, stale_participants};
pub use pacing::{InstantPacer, Pacer, TokioPacer};
pub use admin_gate::{AdminGate, GateStatus, GateTimings};
pub use export::render_roster_csv;
pub use roster_service::RosterService;
