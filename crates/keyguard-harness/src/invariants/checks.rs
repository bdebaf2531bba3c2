//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use keyguard_core::{Placement, Region, TimerKind, Visibility};

use super::{DisplaySnapshot, Invariant, InvariantResult, Violation};

/// Status lines are hidden whenever the status has no room for them.
pub struct StatusLinesRespectStatus;

impl Invariant for StatusLinesRespectStatus {
    fn name(&self) -> &'static str {
        "StatusLinesRespectStatus"
    }

    fn check(&self, state: &DisplaySnapshot) -> InvariantResult {
        if state.status.shows_status_lines() {
            return Ok(());
        }

        for region in [Region::StatusLine1, Region::StatusLine2] {
            let line = state.region(region);
            if line.is_visible() {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("{region} shows {:?} in {:?}", line.text, state.status),
                });
            }
        }
        Ok(())
    }
}

/// Emergency action is offered, below the label, exactly for the
/// SIM-missing and PUK statuses.
pub struct EmergencyPlacement;

impl Invariant for EmergencyPlacement {
    fn name(&self) -> &'static str {
        "EmergencyPlacement"
    }

    fn check(&self, state: &DisplaySnapshot) -> InvariantResult {
        let emergency = state.region(Region::EmergencyCall);
        let offered = state.status.offers_emergency_call();

        if emergency.is_visible() != offered {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "emergency call {:?} in {:?}",
                    emergency.visibility, state.status
                ),
            });
        }
        if offered && emergency.placement != Some(Placement::Below(Region::ScreenLocked)) {
            return Err(Violation {
                invariant: self.name(),
                message: format!("emergency call placed {:?}", emergency.placement),
            });
        }
        Ok(())
    }
}

/// The selector is gone exactly when the SIM blocks it.
pub struct SelectorGate;

impl Invariant for SelectorGate {
    fn name(&self) -> &'static str {
        "SelectorGate"
    }

    fn check(&self, state: &DisplaySnapshot) -> InvariantResult {
        let selector = state.region(Region::Selector);
        if (selector.visibility == Visibility::Gone) != state.status.blocks_selector() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("selector {:?} in {:?}", selector.visibility, state.status),
            });
        }
        Ok(())
    }
}

/// Once no message is pending, the "locked" label shows the text its status
/// projects.
pub struct LabelFollowsStatus;

impl Invariant for LabelFollowsStatus {
    fn name(&self) -> &'static str {
        "LabelFollowsStatus"
    }

    fn check(&self, state: &DisplaySnapshot) -> InvariantResult {
        let Some(expected) = &state.projected_label else { return Ok(()) };
        if state.pending.contains_key(&Region::ScreenLocked) {
            return Ok(());
        }

        let label = state.region(Region::ScreenLocked);
        if label.text != *expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "label shows {:?} in {:?}, expected {expected:?}",
                    label.text, state.status
                ),
            });
        }
        Ok(())
    }
}

/// At most one show and one clear timer are pending per region.
pub struct SinglePendingPair;

impl Invariant for SinglePendingPair {
    fn name(&self) -> &'static str {
        "SinglePendingPair"
    }

    fn check(&self, state: &DisplaySnapshot) -> InvariantResult {
        for (region, kinds) in &state.pending {
            let shows = kinds.iter().filter(|k| **k == TimerKind::Show).count();
            let clears = kinds.len() - shows;
            if shows > 1 || clears > 1 {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("{region}: {shows} show and {clears} clear timers pending"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use keyguard_core::Status;

    use super::*;
    use crate::display::RegionState;

    fn shown(text: &str) -> RegionState {
        RegionState { text: text.into(), ..RegionState::default() }
    }

    fn hidden(visibility: Visibility) -> RegionState {
        RegionState { visibility, ..RegionState::default() }
    }

    #[test]
    fn status_lines_visible_under_puk_lock() {
        let snapshot = DisplaySnapshot::blank(Status::SimPukLocked)
            .with_region(Region::StatusLine1, shown("Charged."));

        assert!(StatusLinesRespectStatus.check(&snapshot).is_err());
    }

    #[test]
    fn emergency_requires_placement() {
        let unplaced = DisplaySnapshot::blank(Status::SimMissing)
            .with_region(Region::StatusLine1, hidden(Visibility::Invisible));
        assert!(EmergencyPlacement.check(&unplaced).is_err());

        let placed = unplaced.with_region(Region::EmergencyCall, RegionState {
            placement: Some(Placement::Below(Region::ScreenLocked)),
            ..RegionState::default()
        });
        assert!(EmergencyPlacement.check(&placed).is_ok());
    }

    #[test]
    fn emergency_hidden_when_normal() {
        let snapshot = DisplaySnapshot::blank(Status::Normal);
        assert!(EmergencyPlacement.check(&snapshot).is_err());

        let gone = snapshot.with_region(Region::EmergencyCall, hidden(Visibility::Gone));
        assert!(EmergencyPlacement.check(&gone).is_ok());
    }

    #[test]
    fn selector_gate_both_ways() {
        let visible = DisplaySnapshot::blank(Status::SimMissingLocked);
        assert!(SelectorGate.check(&visible).is_err());

        let gone = DisplaySnapshot::blank(Status::Normal)
            .with_region(Region::Selector, hidden(Visibility::Gone));
        assert!(SelectorGate.check(&gone).is_err());
    }

    #[test]
    fn blank_label_violates_projection_once_idle() {
        let puk = "Please enter PUK code.";
        let blank = DisplaySnapshot::blank(Status::SimPukLocked).with_projected_label(puk);
        assert!(LabelFollowsStatus.check(&blank).is_err());

        let messaging = blank.clone().with_pending(Region::ScreenLocked, TimerKind::Clear);
        assert!(LabelFollowsStatus.check(&messaging).is_ok());

        let labelled = blank.with_region(Region::ScreenLocked, shown(puk));
        assert!(LabelFollowsStatus.check(&labelled).is_ok());
    }

    #[test]
    fn two_clears_violate_single_pair() {
        let snapshot = DisplaySnapshot::blank(Status::Normal)
            .with_pending(Region::ScreenLocked, TimerKind::Show)
            .with_pending(Region::ScreenLocked, TimerKind::Clear);
        assert!(SinglePendingPair.check(&snapshot).is_ok());

        let doubled = snapshot.with_pending(Region::ScreenLocked, TimerKind::Clear);
        assert!(SinglePendingPair.check(&doubled).is_err());
    }
}
