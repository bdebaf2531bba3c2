//! Lock screen configuration.
//!
//! User preferences and device policy that gate input handling, plus the
//! fixed text table. Everything has a default so partial configuration files
//! deserialize.

use std::time::Duration;

use keyguard_core::{Strings, scheduler::DEFAULT_MESSAGE_DURATION};
use serde::{Deserialize, Serialize};

use crate::KeyCode;

/// Device policy for whether the menu key may be used on the lock screen.
///
/// Some devices disable it because the key placement is prone to false
/// presses. Test automation and an explicit override re-enable it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuKeyPolicy {
    /// Device configuration disables the menu key.
    pub config_disabled: bool,
    /// Running under automated UI exercising.
    pub monkey_mode: bool,
    /// Explicit override marker is present on the device.
    pub override_present: bool,
}

impl MenuKeyPolicy {
    /// Whether the menu key is enabled on the lock screen.
    pub const fn enabled(self) -> bool {
        !self.config_disabled || self.monkey_mode || self.override_present
    }
}

/// Lock screen configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyguardConfig {
    /// Menu key goes to the unlock screen.
    pub menu_unlock: bool,
    /// Confirm key goes to the unlock screen.
    pub trackball_unlock: bool,
    /// Opening a hardware keyboard goes straight to the unlock screen.
    pub keyguard_bypass: bool,
    /// Menu key device policy.
    pub menu_key_policy: MenuKeyPolicy,
    /// Milliseconds a transient message stays up.
    pub toast_duration_ms: u64,
    /// Fixed text table.
    pub strings: Strings,
}

impl Default for KeyguardConfig {
    fn default() -> Self {
        Self {
            menu_unlock: false,
            trackball_unlock: false,
            keyguard_bypass: false,
            menu_key_policy: MenuKeyPolicy::default(),
            toast_duration_ms: DEFAULT_MESSAGE_DURATION.as_millis() as u64,
            strings: Strings::default(),
        }
    }
}

impl KeyguardConfig {
    /// How long a transient message stays up.
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Whether the menu key is enabled by device policy.
    ///
    /// Reported for diagnostics. Menu-key unlock is gated by
    /// [`KeyguardConfig::menu_unlock`] alone.
    pub fn menu_key_enabled(&self) -> bool {
        self.menu_key_policy.enabled()
    }

    /// Whether pressing `key` goes to the unlock screen.
    pub fn unlocks_on(&self, key: KeyCode) -> bool {
        match key {
            KeyCode::Menu => self.menu_unlock,
            KeyCode::DpadCenter => self.trackball_unlock,
            KeyCode::Other(_) => false,
        }
    }
}
