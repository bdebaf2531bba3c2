//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` replays a scenario against a [`SimDevice`] under any
//! [`Environment`]. It implements [`Driver`] so the same
//! [`keyguard_app::Runtime`] orchestration code runs in both production and
//! simulation. Display directives land in a [`DisplayModel`]; host requests
//! are logged in order.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use keyguard_app::{Driver, KeyguardAction, KeyguardEvent};
use keyguard_core::env::Environment;

use crate::{display::DisplayModel, scenario::Step, sim_device::SimDevice};

/// Error type for simulation driver.
#[derive(Debug, Clone, thiserror::Error)]
#[error("SimDriverError: {0}")]
pub struct SimDriverError(pub String);

/// State observable from outside the runtime.
#[derive(Debug, Default)]
struct SharedState {
    display: DisplayModel,
    host_calls: Vec<KeyguardAction>,
    stopped: bool,
}

/// Read access to what the driver recorded.
///
/// Stays valid after the runtime has consumed the driver.
#[derive(Debug, Clone)]
pub struct SimObserver {
    state: Arc<Mutex<SharedState>>,
}

impl SimObserver {
    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the display model.
    pub fn display(&self) -> DisplayModel {
        self.lock().display.clone()
    }

    /// Host requests, in order.
    pub fn host_calls(&self) -> Vec<KeyguardAction> {
        self.lock().host_calls.clone()
    }

    /// Whether the driver was stopped.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }
}

/// Simulation driver for deterministic testing.
pub struct SimDriver<E: Environment> {
    env: E,
    device: SimDevice,
    script: VecDeque<Step>,
    advance_until: Option<E::Instant>,
    state: Arc<Mutex<SharedState>>,
}

impl<E: Environment> SimDriver<E> {
    /// Driver replaying `script` against `device`.
    pub fn new(env: E, device: SimDevice, script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            env,
            device,
            script: script.into_iter().collect(),
            advance_until: None,
            state: Arc::new(Mutex::new(SharedState::default())),
        }
    }

    /// Handle for inspecting the display and host calls.
    pub fn observer(&self) -> SimObserver {
        SimObserver { state: Arc::clone(&self.state) }
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Environment> Driver for SimDriver<E> {
    type Error = SimDriverError;
    type Instant = E::Instant;
    type Services = SimDevice;

    async fn poll_event(
        &mut self,
        deadline: Option<E::Instant>,
    ) -> Result<Option<KeyguardEvent>, Self::Error> {
        loop {
            if let Some(event) = self.device.pop_event() {
                return Ok(Some(event));
            }

            let now = self.env.now();
            if deadline.is_some_and(|d| d <= now) {
                return Ok(Some(KeyguardEvent::TimerFired));
            }

            if let Some(target) = self.advance_until {
                let until = deadline.map_or(target, |d| d.min(target));
                self.env.sleep(until - now).await;
                if self.env.now() >= target {
                    self.advance_until = None;
                }
                continue;
            }

            match self.script.pop_front() {
                Some(Step::Advance(duration)) => self.advance_until = Some(now + duration),
                Some(step) => {
                    tracing::debug!(?step, "scenario step");
                    self.device.apply(step);
                },
                None => return Ok(None),
            }
        }
    }

    fn now(&self) -> E::Instant {
        self.env.now()
    }

    fn services(&self) -> &SimDevice {
        &self.device
    }

    fn apply(&mut self, action: KeyguardAction) -> Result<(), Self::Error> {
        if let KeyguardAction::SetRingerMode(mode) = action {
            self.device.write_ringer(mode);
            return Ok(());
        }

        let mut state = self.lock();
        if !state.display.apply(&action) {
            state.host_calls.push(action);
        }
        Ok(())
    }

    fn stop(&mut self) {
        let pending = self.script.len();
        if pending > 0 {
            tracing::warn!(pending, "driver stopped with scenario steps left");
        }
        self.lock().stopped = true;
    }
}
