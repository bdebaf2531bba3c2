//! Pull interface to device collaborators.

use keyguard_core::{BatteryInfo, CarrierInfo, RingerMode, SimState};

/// Current values from the telephony, provisioning, power, alarm, ringer,
/// orientation and time collaborators.
///
/// The coordinator reads through this trait when it (re)builds its cache and
/// when a handler needs a live value. Implementations must be cheap: calls
/// happen inside event handlers.
pub trait DeviceServices {
    /// Current SIM state.
    fn sim_state(&self) -> SimState;

    /// Whether the device has completed setup.
    fn is_provisioned(&self) -> bool;

    /// Current carrier names.
    fn carrier(&self) -> CarrierInfo;

    /// Current power snapshot.
    fn battery(&self) -> BatteryInfo;

    /// Display text of the next alarm, if one is set.
    fn next_alarm(&self) -> Option<String>;

    /// Live ringer mode.
    fn ringer_mode(&self) -> RingerMode;

    /// Whether the ringer vibrates instead of going fully silent.
    fn vibrate_on_ring(&self) -> bool;

    /// Whether the device is in portrait.
    fn is_portrait(&self) -> bool;

    /// Current date formatted for the locale.
    fn formatted_date(&self) -> String;
}
