//! Silent mode toggle.
//!
//! The sound handle on the selector flips the ringer between audible and
//! silent. Externally the controller only tracks a boolean: silent and vibrate
//! both count as silent.
//!
//! Uses the action pattern: methods return [`SilentModeAction`]s and the
//! caller pushes the ringer write, updates the handle and shows the message.
//! A user toggle produces a confirmation message; an external ringer change
//! never does.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::SignalError,
    resources::{Handle, HandleResources, Icon, Strings},
};

/// Ringer mode of the ringer subsystem.
///
/// Raw codes follow the ringer subsystem: 0 silent, 1 vibrate, 2 normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RingerMode {
    /// No sound, no vibration.
    Silent,
    /// No sound, vibrate on ring.
    Vibrate,
    /// Audible ringer.
    Normal,
}

impl RingerMode {
    /// Whether this mode counts as silent.
    pub const fn is_silent(self) -> bool {
        matches!(self, RingerMode::Silent | RingerMode::Vibrate)
    }

    /// Raw ringer subsystem code.
    pub const fn code(self) -> i32 {
        match self {
            RingerMode::Silent => 0,
            RingerMode::Vibrate => 1,
            RingerMode::Normal => 2,
        }
    }
}

impl TryFrom<i32> for RingerMode {
    type Error = SignalError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RingerMode::Silent),
            1 => Ok(RingerMode::Vibrate),
            2 => Ok(RingerMode::Normal),
            other => Err(SignalError::UnknownRingerMode(other)),
        }
    }
}

impl FromStr for RingerMode {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" => Ok(RingerMode::Silent),
            "vibrate" => Ok(RingerMode::Vibrate),
            "normal" => Ok(RingerMode::Normal),
            _ => Err(SignalError::UnknownRingerModeName(s.to_string())),
        }
    }
}

impl fmt::Display for RingerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingerMode::Silent => f.write_str("silent"),
            RingerMode::Vibrate => f.write_str("vibrate"),
            RingerMode::Normal => f.write_str("normal"),
        }
    }
}

/// Side effects requested by [`SilentModeController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SilentModeAction {
    /// Write this mode to the ringer subsystem.
    SetRingerMode(RingerMode),
    /// Replace the sound handle's resources.
    UpdateResources(HandleResources),
    /// Replace the sound handle's hint text.
    UpdateHint(String),
    /// Show a transient confirmation message.
    ShowMessage {
        /// Message text.
        text: String,
        /// Icon beside the message.
        icon: Icon,
    },
    /// Tell the host the user is active so the screen stays on.
    PokeWakelock,
}

/// Silent mode state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SilentModeController {
    silent: bool,
}

impl SilentModeController {
    /// Controller seeded from the live ringer mode.
    pub fn new(current: RingerMode) -> Self {
        Self { silent: current.is_silent() }
    }

    /// Cached silent flag.
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Current sound handle resources.
    pub fn resources(&self) -> HandleResources {
        HandleResources::sound(self.silent)
    }

    /// User toggled silent mode from the sound handle.
    ///
    /// Entering silent mode vibrates instead when the vibrate-on-ring
    /// preference is set. Always writes the ringer exactly once.
    pub fn toggle(&mut self, vibrate_on_ring: bool, strings: &Strings) -> Vec<SilentModeAction> {
        self.silent = !self.silent;

        let mode = match (self.silent, vibrate_on_ring) {
            (false, _) => RingerMode::Normal,
            (true, true) => RingerMode::Vibrate,
            (true, false) => RingerMode::Silent,
        };
        let icon = if self.silent { Icon::RingerOff } else { Icon::RingerOn };
        tracing::debug!(%mode, silent = self.silent, "silent mode toggled");

        vec![
            SilentModeAction::SetRingerMode(mode),
            SilentModeAction::UpdateResources(self.resources()),
            SilentModeAction::ShowMessage {
                text: strings.silent_mode_message(self.silent).to_string(),
                icon,
            },
            SilentModeAction::PokeWakelock,
        ]
    }

    /// The ringer mode changed outside the lock screen.
    ///
    /// Only the cache and the handle resources follow; no message is shown.
    pub fn on_external_ringer_change(&mut self, mode: RingerMode) -> Vec<SilentModeAction> {
        if mode.is_silent() == self.silent {
            return Vec::new();
        }

        self.silent = mode.is_silent();
        tracing::debug!(%mode, silent = self.silent, "external ringer change");
        vec![SilentModeAction::UpdateResources(self.resources())]
    }

    /// The user grabbed (`Some`) or released (`None`) a selector handle.
    ///
    /// Grabbing the sound handle refreshes the cache from the live ringer so
    /// the hint describes what releasing on the target will do.
    pub fn on_grab_state_change(
        &mut self,
        grabbed: Option<Handle>,
        live: RingerMode,
        strings: &Strings,
    ) -> Vec<SilentModeAction> {
        let mut actions = Vec::with_capacity(2);
        if grabbed == Some(Handle::Sound) {
            self.silent = live.is_silent();
            actions.push(SilentModeAction::UpdateHint(strings.sound_hint(self.silent).to_string()));
        }
        actions.push(SilentModeAction::PokeWakelock);
        actions
    }
}
