//! # Rota core
//!
//! Domain model and state machine for rotation schedules: who takes the next
//! turn, how the list of schedules is edited, and how it is persisted into a
//! single key-value slot.

pub mod controller;
pub mod errors;
pub mod id;
pub mod models;
pub mod store;

pub use controller::RotationController;
pub use errors::{RotaError, RotaResult};
