//! Deterministic simulation harness for the lock screen.
//!
//! Virtual-time implementation of the [`keyguard_core::env::Environment`]
//! trait, a fake device standing in for every collaborator, and a driver that
//! replays scenario scripts through the production
//! [`keyguard_app::Runtime`].
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the lock
//! screen invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod display;
pub mod invariants;
pub mod scenario;
pub mod sim_device;
pub mod sim_driver;
pub mod sim_env;

pub use display::{DisplayModel, HandleState, RegionState};
pub use invariants::{
    DisplaySnapshot, EmergencyPlacement, Invariant, InvariantRegistry, InvariantResult,
    LabelFollowsStatus, SelectorGate, SinglePendingPair, StatusLinesRespectStatus, Violation,
};
pub use scenario::{ScenarioError, Step};
pub use sim_device::SimDevice;
pub use sim_driver::{SimDriver, SimDriverError, SimObserver};
pub use sim_env::{SimEnv, SimInstant};
