//! Adapter implementations (hexagonal architecture)
//!
//! Concrete collaborators behind the port traits: the in-memory bank used
//! by tests and demos, and the HTTP quote feed client.

pub mod cbr;
pub mod memory;

pub use cbr::CbrQuotes;
pub use memory::{FixedRates, MemoryBank};
