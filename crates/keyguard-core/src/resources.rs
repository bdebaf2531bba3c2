//! Fixed text and icon references.
//!
//! The lock screen never renders anything itself. It refers to icons through
//! opaque [`Icon`] identifiers and to fixed messages through a [`Strings`]
//! table that the display surface renders verbatim.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SignalError;

/// Opaque icon identifier understood by the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    /// Battery charging indicator for the status line.
    Charging,
    /// Next-alarm indicator for the status line.
    Alarm,
    /// Ringer muted, shown with the "silent mode on" message.
    RingerOff,
    /// Ringer audible, shown with the "silent mode off" message.
    RingerOn,
    /// Unlock handle icon.
    DialUnlock,
    /// Unlock handle target.
    TargetGreen,
    /// Unlock handle bar.
    BarLeftUnlock,
    /// Unlock handle tab.
    TabLeftUnlock,
    /// Sound handle icon while silent.
    DialSoundOff,
    /// Sound handle icon while audible.
    DialSoundOn,
    /// Sound handle target while silent.
    TargetYellow,
    /// Sound handle target while audible.
    TargetGray,
    /// Sound handle bar offering "sound on".
    BarRightSoundOn,
    /// Sound handle bar offering "sound off".
    BarRightSoundOff,
    /// Sound handle tab offering "sound on".
    TabRightSoundOn,
    /// Sound handle tab offering "sound off".
    TabRightSoundOff,
}

/// One of the two handles on the unlock selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    /// Primary action: go to the unlock screen.
    Unlock,
    /// Secondary action: toggle silent mode.
    Sound,
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::Unlock => f.write_str("unlock"),
            Handle::Sound => f.write_str("sound"),
        }
    }
}

impl FromStr for Handle {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unlock" | "left" => Ok(Handle::Unlock),
            "sound" | "right" => Ok(Handle::Sound),
            _ => Err(SignalError::UnknownHandle(s.to_string())),
        }
    }
}

/// The four drawables a selector handle is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleResources {
    /// Icon drawn on the handle.
    pub icon: Icon,
    /// Drop target shown while dragging.
    pub target: Icon,
    /// Bar behind the handle.
    pub bar: Icon,
    /// Tab the user grabs.
    pub tab: Icon,
}

impl HandleResources {
    /// Static resources of the unlock handle.
    pub const UNLOCK: HandleResources = HandleResources {
        icon: Icon::DialUnlock,
        target: Icon::TargetGreen,
        bar: Icon::BarLeftUnlock,
        tab: Icon::TabLeftUnlock,
    };

    /// Resources of the sound handle for the given silent flag.
    ///
    /// While silent, the handle offers turning sound back on.
    pub const fn sound(silent: bool) -> HandleResources {
        if silent {
            HandleResources {
                icon: Icon::DialSoundOff,
                target: Icon::TargetYellow,
                bar: Icon::BarRightSoundOn,
                tab: Icon::TabRightSoundOn,
            }
        } else {
            HandleResources {
                icon: Icon::DialSoundOn,
                target: Icon::TargetGray,
                bar: Icon::BarRightSoundOff,
                tab: Icon::TabRightSoundOff,
            }
        }
    }
}

/// Fixed messages shown by the lock screen.
///
/// Defaults are the stock English texts. Localization is out of scope; the
/// table exists so deployments can override wording through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strings {
    /// Carrier suffix for [`crate::Status::NetworkLocked`].
    pub network_locked: String,
    /// Carrier suffix when the SIM is missing.
    pub missing_sim: String,
    /// Carrier suffix for [`crate::Status::SimLocked`].
    pub sim_locked: String,
    /// Carrier suffix for [`crate::Status::SimPukLocked`].
    pub sim_puk_locked: String,
    /// "Locked" label text for network-locked and SIM-missing statuses.
    pub unlock_instructions: String,
    /// "Locked" label text when the SIM is missing on an unprovisioned
    /// device.
    pub missing_sim_instructions: String,
    /// "Locked" label text for [`crate::Status::SimPukLocked`].
    pub puk_locked_instructions: String,
    /// Status line while plugged in at full charge.
    pub charged: String,
    /// Status line while plugged in below full charge. `{level}` is replaced
    /// by the battery percentage.
    pub plugged_in: String,
    /// Status line while unplugged with battery info relevant.
    pub low_battery: String,
    /// Transient message after muting.
    pub silent_mode_on: String,
    /// Transient message after unmuting.
    pub silent_mode_off: String,
    /// Hint on the unlock handle.
    pub unlock_label: String,
    /// Hint on the sound handle while silent.
    pub sound_on_label: String,
    /// Hint on the sound handle while audible.
    pub sound_off_label: String,
    /// Label of the emergency call action.
    pub emergency_call: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            network_locked: "Network locked".into(),
            missing_sim: "No SIM card.".into(),
            sim_locked: "SIM card is locked.".into(),
            sim_puk_locked: "SIM card is PUK-locked.".into(),
            unlock_instructions: "Press Menu to unlock or place emergency call.".into(),
            missing_sim_instructions: "Please insert a SIM card.".into(),
            puk_locked_instructions: "Please see the User Guide or contact Customer Care.".into(),
            charged: "Charged.".into(),
            plugged_in: "Charging ({level}%)".into(),
            low_battery: "Connect your charger.".into(),
            silent_mode_on: "Sound is OFF".into(),
            silent_mode_off: "Sound is ON".into(),
            unlock_label: "Unlock".into(),
            sound_on_label: "Sound on".into(),
            sound_off_label: "Sound off".into(),
            emergency_call: "Emergency call".into(),
        }
    }
}

impl Strings {
    /// "Plugged in" message for the given battery percentage.
    pub fn plugged_in_at(&self, level: u8) -> String {
        self.plugged_in.replace("{level}", &level.to_string())
    }

    /// Hint text for the sound handle.
    pub fn sound_hint(&self, silent: bool) -> &str {
        if silent { &self.sound_on_label } else { &self.sound_off_label }
    }

    /// Confirmation message after toggling silent mode.
    pub fn silent_mode_message(&self, silent: bool) -> &str {
        if silent { &self.silent_mode_on } else { &self.silent_mode_off }
    }
}
