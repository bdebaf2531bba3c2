//! Lock screen input events.
//!
//! This module defines [`KeyguardEvent`], the complete set of inputs that
//! drive the [`crate::LockScreenCoordinator`].
//!
//! Events originate from three sources:
//! - Device callbacks (SIM, battery, carrier, time, ringer, orientation,
//!   keyboard) delivered through the update monitor.
//! - User gestures on the display surface (selector, keys, emergency).
//! - The host lifecycle (pause, resume) and the runtime's timer deadline.

use keyguard_core::{BatteryInfo, Handle, RingerMode, SimState};

use crate::KeyCode;

/// Events processed by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyguardEvent {
    /// Telephony reported a new SIM state.
    SimStateChanged(SimState),

    /// Power source snapshot.
    BatteryChanged(BatteryInfo),

    /// Carrier names refreshed. Re-projects the layout without changing the
    /// status.
    CarrierInfoChanged {
        /// Network name.
        plmn: Option<String>,
        /// Service provider name.
        spn: Option<String>,
    },

    /// Periodic time tick; the date text is pulled again.
    TimeChanged,

    /// Ringer mode changed outside the lock screen.
    RingerModeChanged(RingerMode),

    /// Device orientation changed.
    OrientationChanged {
        /// Whether the device is now in portrait.
        portrait: bool,
    },

    /// Hardware keyboard opened or closed.
    KeyboardChanged {
        /// Whether the keyboard is now open.
        open: bool,
    },

    /// A selector handle was dragged onto its target.
    Trigger(Handle),

    /// A selector handle was grabbed (`Some`) or released (`None`).
    GrabStateChanged {
        /// Grabbed handle.
        handle: Option<Handle>,
    },

    /// Key pressed.
    KeyDown(KeyCode),

    /// Emergency call action tapped.
    EmergencyTapped,

    /// Lock screen hidden.
    Paused,

    /// Lock screen shown again; everything is re-read.
    Resumed,

    /// The deadline passed to the driver was reached.
    TimerFired,
}
