//! Application layer for the lock screen.
//!
//! Pure coordinator state machine and generic runtime, enabling deterministic
//! simulation testing with the same code that runs against a real device.
//!
//! # Components
//!
//! - [`LockScreenCoordinator`]: owns the lock status and cached device
//!   signals, turns [`KeyguardEvent`]s into [`KeyguardAction`]s
//! - [`DeviceServices`]: pull interface to telephony, power, alarm, ringer
//!   and time collaborators
//! - [`UpdateMonitor`] and [`Subscriptions`]: scoped callback registration
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic event loop using a [`Driver`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod config;
mod coordinator;
mod driver;
mod event;
mod input;
mod runtime;
mod services;
mod signals;
mod subscription;

pub use action::KeyguardAction;
pub use config::{KeyguardConfig, MenuKeyPolicy};
pub use coordinator::LockScreenCoordinator;
pub use driver::Driver;
pub use event::KeyguardEvent;
pub use input::KeyCode;
pub use runtime::Runtime;
pub use services::DeviceServices;
pub use signals::DeviceSignals;
pub use subscription::{Channel, SubscriptionId, Subscriptions, UpdateMonitor};
