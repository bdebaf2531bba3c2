//! Lock status resolution.
//!
//! The lock screen classifies why (and how hard) the device is locked into a
//! [`Status`]. The status is derived only from the SIM state reported by
//! telephony and whether the device has been provisioned. Every status change
//! goes through [`resolve`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SignalError;

/// SIM card state as reported by the telephony collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimState {
    /// No SIM card inserted.
    Absent,
    /// SIM is locked to a different network.
    NetworkLocked,
    /// SIM present but not yet ready.
    NotReady,
    /// SIM requires its PIN.
    PinRequired,
    /// SIM requires its PUK after too many wrong PINs.
    PukRequired,
    /// SIM ready for use.
    Ready,
    /// Telephony has not reported a state.
    Unknown,
}

impl SimState {
    /// Every SIM state, in declaration order.
    pub const ALL: [SimState; 7] = [
        SimState::Absent,
        SimState::NetworkLocked,
        SimState::NotReady,
        SimState::PinRequired,
        SimState::PukRequired,
        SimState::Ready,
        SimState::Unknown,
    ];

    /// Script/config name for this state.
    pub const fn name(self) -> &'static str {
        match self {
            SimState::Absent => "absent",
            SimState::NetworkLocked => "network_locked",
            SimState::NotReady => "not_ready",
            SimState::PinRequired => "pin_required",
            SimState::PukRequired => "puk_required",
            SimState::Ready => "ready",
            SimState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimState {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        SimState::ALL
            .into_iter()
            .find(|state| state.name() == normalized)
            .ok_or_else(|| SignalError::UnknownSimState(s.to_string()))
    }
}

/// Discrete lock status driving which affordances are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// SIM present and not locked.
    Normal,
    /// SIM is network locked.
    NetworkLocked,
    /// SIM is missing.
    SimMissing,
    /// SIM is missing and the device is not provisioned, so the user cannot
    /// get past the lock screen.
    SimMissingLocked,
    /// SIM is PUK locked after too many wrong unlock codes.
    SimPukLocked,
    /// SIM is PIN locked.
    SimLocked,
}

/// Whether the battery/alarm status lines are shown, indexed by
/// [`Status::index`]. Mostly dictated by whether there is room for them.
const SHOWS_STATUS_LINES: [bool; 6] = [
    true,  // Normal
    true,  // NetworkLocked
    false, // SimMissing
    false, // SimMissingLocked
    false, // SimPukLocked
    true,  // SimLocked
];

impl Status {
    /// Every status, in declaration order.
    pub const ALL: [Status; 6] = [
        Status::Normal,
        Status::NetworkLocked,
        Status::SimMissing,
        Status::SimMissingLocked,
        Status::SimPukLocked,
        Status::SimLocked,
    ];

    const fn index(self) -> usize {
        match self {
            Status::Normal => 0,
            Status::NetworkLocked => 1,
            Status::SimMissing => 2,
            Status::SimMissingLocked => 3,
            Status::SimPukLocked => 4,
            Status::SimLocked => 5,
        }
    }

    /// Whether the battery and next-alarm status lines are shown.
    pub const fn shows_status_lines(self) -> bool {
        SHOWS_STATUS_LINES[self.index()]
    }

    /// Statuses where the emergency call action is offered below the
    /// "locked" label.
    pub const fn offers_emergency_call(self) -> bool {
        matches!(self, Status::SimMissing | Status::SimMissingLocked | Status::SimPukLocked)
    }

    /// Statuses where the unlock selector is removed entirely.
    pub const fn blocks_selector(self) -> bool {
        matches!(self, Status::SimMissingLocked | Status::SimPukLocked)
    }
}

/// Resolve the lock status from the SIM state and provisioning flag.
///
/// An unprovisioned device without a SIM takes precedence over the plain
/// "absent" mapping: it must not be unlockable.
pub fn resolve(sim_state: SimState, is_provisioned: bool) -> Status {
    if !is_provisioned && sim_state == SimState::Absent {
        return Status::SimMissingLocked;
    }

    match sim_state {
        SimState::Absent | SimState::NotReady | SimState::Unknown => Status::SimMissing,
        SimState::NetworkLocked => Status::SimMissingLocked,
        SimState::PinRequired => Status::SimLocked,
        SimState::PukRequired => Status::SimPukLocked,
        SimState::Ready => Status::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_depends_on_provisioning() {
        assert_eq!(resolve(SimState::Absent, false), Status::SimMissingLocked);
        assert_eq!(resolve(SimState::Absent, true), Status::SimMissing);
    }

    #[test]
    fn provisioning_only_matters_when_absent() {
        for state in SimState::ALL.into_iter().filter(|s| *s != SimState::Absent) {
            assert_eq!(resolve(state, true), resolve(state, false), "{state}");
        }
    }

    #[test]
    fn mapping_table() {
        let expected = [
            (SimState::NetworkLocked, Status::SimMissingLocked),
            (SimState::NotReady, Status::SimMissing),
            (SimState::PinRequired, Status::SimLocked),
            (SimState::PukRequired, Status::SimPukLocked),
            (SimState::Ready, Status::Normal),
            (SimState::Unknown, Status::SimMissing),
        ];
        for (state, status) in expected {
            assert_eq!(resolve(state, true), status, "{state}");
        }
    }

    #[test]
    fn status_line_table() {
        let shown: Vec<_> = Status::ALL.into_iter().filter(|s| s.shows_status_lines()).collect();
        assert_eq!(shown, vec![Status::Normal, Status::NetworkLocked, Status::SimLocked]);
    }

    #[test]
    fn parse_sim_state_names() {
        assert_eq!("puk_required".parse::<SimState>(), Ok(SimState::PukRequired));
        assert_eq!("Network-Locked".parse::<SimState>(), Ok(SimState::NetworkLocked));
        assert_eq!(
            "lost".parse::<SimState>(),
            Err(SignalError::UnknownSimState("lost".to_string()))
        );
    }
}
