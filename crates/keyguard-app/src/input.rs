//! Platform-agnostic key input.

use std::str::FromStr;

use keyguard_core::SignalError;

/// Raw code of the menu key.
pub const KEYCODE_MENU: u32 = 82;

/// Raw code of the confirm (D-pad center / trackball press) key.
pub const KEYCODE_DPAD_CENTER: u32 = 23;

/// Key pressed while the lock screen has focus.
///
/// Decouples the coordinator from platform key event types, enabling
/// deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Menu key.
    Menu,
    /// Confirm key (D-pad center, trackball press).
    DpadCenter,
    /// Any other key, by raw code.
    Other(u32),
}

impl KeyCode {
    /// Key for a raw platform code.
    pub const fn from_raw(code: u32) -> Self {
        match code {
            KEYCODE_MENU => KeyCode::Menu,
            KEYCODE_DPAD_CENTER => KeyCode::DpadCenter,
            other => KeyCode::Other(other),
        }
    }
}

impl FromStr for KeyCode {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "menu" => Ok(KeyCode::Menu),
            "center" | "dpad_center" | "dpad-center" | "confirm" => Ok(KeyCode::DpadCenter),
            other => other
                .parse::<u32>()
                .map(KeyCode::from_raw)
                .map_err(|_| SignalError::UnknownKey(s.to_string())),
        }
    }
}
