//! Lock screen core logic.
//!
//! Pure, deterministic building blocks that map raw device signals to what the
//! lock screen shows. Nothing in this crate performs I/O or reads the clock:
//! time is passed in as a parameter and side effects are returned as values
//! for the caller to execute.
//!
//! # Components
//!
//! - [`status::resolve`]: SIM state and provisioning to a lock [`Status`]
//! - [`carrier::carrier_text`]: network and service provider names to one
//!   display string
//! - [`status_lines`]: charging and next-alarm descriptions to at most two
//!   [`StatusLine`]s
//! - [`layout::project`]: a [`Status`] to per-region [`LayoutDirectives`]
//! - [`SilentModeController`]: the silent/vibrate/normal toggle
//! - [`MessageScheduler`]: cancel-and-reschedule show/clear timer pairs
//! - [`env::Environment`]: time abstraction for simulation and production

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod carrier;
pub mod env;
pub mod error;
pub mod layout;
pub mod resources;
pub mod ringer;
pub mod scheduler;
pub mod status;
pub mod status_lines;

pub use carrier::{CarrierInfo, carrier_text};
pub use error::SignalError;
pub use layout::{LayoutDirectives, Placement, Region, RegionDirective, Visibility};
pub use resources::{Handle, HandleResources, Icon, Strings};
pub use ringer::{RingerMode, SilentModeAction, SilentModeController};
pub use scheduler::{MessageScheduler, RegionContent, TimerId, TimerKind};
pub use status::{SimState, Status};
pub use status_lines::{BatteryInfo, BatteryLevel, StatusLine};
