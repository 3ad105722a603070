//! Core domain logic for the Glowdesk salon backend client: the domain
//! model, the reactive entity store, and the admin session gate.

pub mod error;
pub mod gate;
pub mod model;
pub mod store;

pub use error::CoreError;
pub use gate::{GateDecision, SessionGate};
pub use store::Store;
