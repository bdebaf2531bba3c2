//! Cached device signals.
//!
//! The coordinator keeps the latest value of every signal it projects from.
//! The cache is mutated only inside event handlers and read by the pure
//! composer and projector functions.

use keyguard_core::{BatteryInfo, CarrierInfo, SimState};

use crate::DeviceServices;

/// Latest known device signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSignals {
    /// SIM state.
    pub sim_state: SimState,
    /// Provisioning flag.
    pub provisioned: bool,
    /// Orientation when the lock screen was built.
    pub portrait_at_creation: bool,
    /// Power snapshot.
    pub battery: BatteryInfo,
    /// Next alarm text.
    pub next_alarm: Option<String>,
    /// Carrier names.
    pub carrier: CarrierInfo,
    /// Date text.
    pub date: String,
}

impl DeviceSignals {
    /// Read every signal from the collaborators.
    pub fn capture(services: &impl DeviceServices) -> Self {
        Self {
            sim_state: services.sim_state(),
            provisioned: services.is_provisioned(),
            portrait_at_creation: services.is_portrait(),
            battery: services.battery(),
            next_alarm: services.next_alarm(),
            carrier: services.carrier(),
            date: services.formatted_date(),
        }
    }

    /// Re-read every signal except the creation orientation.
    pub fn refresh(&mut self, services: &impl DeviceServices) {
        let portrait_at_creation = self.portrait_at_creation;
        *self = Self { portrait_at_creation, ..Self::capture(services) };
    }
}
