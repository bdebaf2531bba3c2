//! Lock screen side effects.
//!
//! This module defines [`KeyguardAction`], instructions produced by the
//! [`crate::LockScreenCoordinator`] for the runtime to execute. Actions fall
//! into three groups: display directives, ringer writes, and host requests.

use keyguard_core::{
    Handle, HandleResources, RegionDirective, RingerMode, StatusLine, scheduler::RegionContent,
};

/// Actions produced by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyguardAction {
    /// Replace the carrier text.
    SetCarrierText(String),

    /// Apply visibility, text and placement to a region.
    SetRegion(RegionDirective),

    /// Replace the status lines. Empty hides both line regions; a single line
    /// shows the first region only.
    SetStatusLines(Vec<StatusLine>),

    /// Replace the date text.
    SetDate(String),

    /// Show or clear a transient message.
    SetRegionContent(RegionContent),

    /// Replace a selector handle's drawables.
    SetHandleResources {
        /// Target handle.
        handle: Handle,
        /// New drawables.
        resources: HandleResources,
    },

    /// Replace a selector handle's hint text.
    SetHint {
        /// Target handle.
        handle: Handle,
        /// Hint text.
        text: String,
    },

    /// Write the ringer mode.
    SetRingerMode(RingerMode),

    /// Host: leave the lock screen for the unlock screen.
    GoToUnlockScreen,

    /// Host: start an emergency call.
    TakeEmergencyCallAction,

    /// Host: user activity, keep the screen on.
    PokeWakelock,

    /// Host: tear down and rebuild the lock screen.
    RecreateMe,
}

impl KeyguardAction {
    /// Whether this action is a request to the host.
    pub fn is_host_request(&self) -> bool {
        matches!(
            self,
            KeyguardAction::GoToUnlockScreen
                | KeyguardAction::TakeEmergencyCallAction
                | KeyguardAction::PokeWakelock
                | KeyguardAction::RecreateMe
        )
    }
}
