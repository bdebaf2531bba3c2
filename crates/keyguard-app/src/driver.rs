//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the lock screen runtime from the device it
//! runs on. Each platform implements the trait to deliver callbacks and
//! execute directives, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::{future::Future, ops::Add, time::Duration};

use crate::{DeviceServices, KeyguardAction, KeyguardEvent};

/// Abstracts device I/O for the lock screen runtime.
///
/// # Implementations
///
/// - **Simulation**: scripted callbacks and a virtual clock
/// - **Device**: platform callbacks, view updates and the audio service
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): Platform-specific error type
/// - [`Instant`](Driver::Instant): Time representation (real or virtual)
/// - [`Services`](Driver::Services): Pull interface to the collaborators
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in simulation.
    type Instant: Copy + Ord + Send + Sync + Add<Duration, Output = Self::Instant>;

    /// Collaborators read by the coordinator.
    type Services: DeviceServices;

    /// Wait for the next event.
    ///
    /// When `deadline` is reached before any other event arrives, returns
    /// [`KeyguardEvent::TimerFired`]. Returns `None` once the host has torn
    /// the lock screen down.
    fn poll_event(
        &mut self,
        deadline: Option<Self::Instant>,
    ) -> impl Future<Output = Result<Option<KeyguardEvent>, Self::Error>> + Send;

    /// Current time instant.
    fn now(&self) -> Self::Instant;

    /// Current collaborator values.
    fn services(&self) -> &Self::Services;

    /// Execute one action.
    ///
    /// # Errors
    ///
    /// Returns an error if the display surface or the ringer rejects it.
    fn apply(&mut self, action: KeyguardAction) -> Result<(), Self::Error>;

    /// Release platform resources.
    fn stop(&mut self);
}
