//! Generic runtime for lock screen orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`LockScreenCoordinator`]: lock screen state machine
//! - [`Subscriptions`]: callback registrations on the update monitor
//! - [`Driver`]: platform-specific I/O

use std::sync::Arc;

use crate::{
    Driver, KeyguardAction, KeyguardConfig, LockScreenCoordinator, Subscriptions, UpdateMonitor,
};

/// Generic runtime that orchestrates the coordinator and a driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    coordinator: LockScreenCoordinator<D::Instant>,
    subscriptions: Subscriptions,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Build the lock screen from the driver's current collaborator values
    /// and subscribe to every update channel.
    pub fn new(driver: D, config: KeyguardConfig, monitor: Arc<dyn UpdateMonitor>) -> Self {
        let coordinator = LockScreenCoordinator::new(config, driver.services());
        let subscriptions = Subscriptions::acquire(monitor);
        Self { driver, coordinator, subscriptions }
    }

    /// Run the main event loop.
    ///
    /// Draws the initial screen, then feeds every event to the coordinator
    /// and executes the resulting actions until the driver reports teardown.
    /// Teardown cancels pending timers and unsubscribes before the driver is
    /// stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error. Subscriptions
    /// are still released.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.event_loop().await;

        self.coordinator.shutdown();
        self.subscriptions.release();
        self.driver.stop();
        tracing::debug!("lock screen torn down");

        result
    }

    async fn event_loop(&mut self) -> Result<(), D::Error> {
        let actions = self.coordinator.present();
        self.apply_all(actions)?;

        while let Some(event) = self.driver.poll_event(self.coordinator.next_deadline()).await? {
            let now = self.driver.now();
            let actions = self.coordinator.handle(event, self.driver.services(), now);
            self.apply_all(actions)?;
        }
        Ok(())
    }

    fn apply_all(&mut self, actions: Vec<KeyguardAction>) -> Result<(), D::Error> {
        for action in actions {
            if action.is_host_request() {
                tracing::info!(?action, "host request");
            }
            self.driver.apply(action)?;
        }
        Ok(())
    }

    /// Get a reference to the coordinator.
    pub fn coordinator(&self) -> &LockScreenCoordinator<D::Instant> {
        &self.coordinator
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
