//! Error types for raw signal boundaries.
//!
//! The decision functions in this crate are total and never fail. Errors only
//! exist where raw values enter from collaborators or scripts: integers that
//! must fit a closed range, and names that must match a closed enumeration.

use thiserror::Error;

/// A raw device signal could not be converted into its typed form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// Battery level outside `0..=100`.
    #[error("battery level out of range: {0} (expected 0..=100)")]
    BatteryLevelOutOfRange(i32),

    /// Ringer mode code not known to the ringer subsystem.
    #[error("unknown ringer mode code: {0}")]
    UnknownRingerMode(i32),

    /// Name does not match any ringer mode.
    #[error("unknown ringer mode: {0:?}")]
    UnknownRingerModeName(String),

    /// Name does not match any SIM state.
    #[error("unknown SIM state: {0:?}")]
    UnknownSimState(String),

    /// Name does not match any selector handle.
    #[error("unknown selector handle: {0:?}")]
    UnknownHandle(String),

    /// Name does not match any key and is not a raw key code.
    #[error("unknown key: {0:?}")]
    UnknownKey(String),
}
