//! Layout projection.
//!
//! Maps a [`Status`] to declarative directives for the named display regions.
//! Projection is a pure function of its inputs: projecting the same status
//! with the same carrier info twice yields identical directives.
//!
//! | Status           | carrier suffix  | "locked" label            | selector | emergency     |
//! |------------------|-----------------|---------------------------|----------|---------------|
//! | Normal           | spn             | invisible, text unchanged | visible  | gone          |
//! | NetworkLocked    | network locked  | visible, instructions     | visible  | gone          |
//! | SimMissing       | missing sim     | invisible, instructions   | visible  | below label   |
//! | SimMissingLocked | missing sim     | visible, insert sim       | gone     | below label   |
//! | SimLocked        | sim locked      | invisible, text unchanged | visible  | gone          |
//! | SimPukLocked     | puk locked      | visible, puk instructions | gone     | below label   |
//!
//! The label is invisible but still reserves its space for `SimMissing`, so
//! the emergency action placed below it keeps its position.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CarrierInfo, Status, carrier::carrier_text, resources::Strings};

/// Named display region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Carrier text (marquee).
    Carrier,
    /// Date line.
    Date,
    /// First status line.
    StatusLine1,
    /// Second status line.
    StatusLine2,
    /// "Locked" label. Also hosts transient messages.
    ScreenLocked,
    /// Unlock selector with its unlock and sound handles.
    Selector,
    /// Emergency call action.
    EmergencyCall,
}

impl Region {
    /// Every region, top to bottom.
    pub const ALL: [Region; 7] = [
        Region::Carrier,
        Region::Date,
        Region::StatusLine1,
        Region::StatusLine2,
        Region::ScreenLocked,
        Region::Selector,
        Region::EmergencyCall,
    ];
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Region visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Drawn.
    Visible,
    /// Not drawn, but still occupies its space.
    Invisible,
    /// Not drawn and takes no space.
    Gone,
}

/// Relative placement of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    /// Immediately below the given region.
    Below(Region),
}

/// Directive for a single region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDirective {
    /// Target region.
    pub region: Region,
    /// Visibility to apply.
    pub visibility: Visibility,
    /// Text to set. `None` leaves the current text untouched.
    pub text: Option<String>,
    /// Relative placement to add. `None` leaves placement untouched.
    pub placement: Option<Placement>,
}

impl RegionDirective {
    fn new(region: Region, visibility: Visibility) -> Self {
        Self { region, visibility, text: None, placement: None }
    }

    fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    fn below(mut self, anchor: Region) -> Self {
        self.placement = Some(Placement::Below(anchor));
        self
    }

    /// Whether the region is drawn.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

/// Full set of layout directives for one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDirectives {
    /// Status these directives were projected from.
    pub status: Status,
    /// Composed carrier text.
    pub carrier_text: String,
    /// "Locked" label region.
    pub screen_locked: RegionDirective,
    /// Unlock selector region.
    pub selector: RegionDirective,
    /// Emergency call region.
    pub emergency: RegionDirective,
}

impl LayoutDirectives {
    /// Region directives in application order. The anchor region comes
    /// before anything placed relative to it.
    pub fn regions(&self) -> [&RegionDirective; 3] {
        [&self.screen_locked, &self.selector, &self.emergency]
    }

    /// Directive for `region`, if this projection covers it.
    pub fn directive(&self, region: Region) -> Option<&RegionDirective> {
        self.regions().into_iter().find(|d| d.region == region)
    }
}

/// Project the layout for `status`.
///
/// Outside [`Status::Normal`], the service provider name is replaced by a
/// fixed message describing the SIM condition.
pub fn project(status: Status, carrier: &CarrierInfo, strings: &Strings) -> LayoutDirectives {
    use Region::{EmergencyCall, ScreenLocked, Selector};
    use Visibility::{Gone, Invisible, Visible};

    let plmn = carrier.plmn.as_deref();
    let with_suffix = |suffix: &str| carrier_text(plmn, Some(suffix));
    let emergency_below_label = RegionDirective::new(EmergencyCall, Visible).below(ScreenLocked);

    let (carrier_text, screen_locked, selector, emergency) = match status {
        Status::Normal => (
            carrier_text(plmn, carrier.spn.as_deref()),
            RegionDirective::new(ScreenLocked, Invisible),
            RegionDirective::new(Selector, Visible),
            RegionDirective::new(EmergencyCall, Gone),
        ),
        Status::NetworkLocked => (
            with_suffix(&strings.network_locked),
            RegionDirective::new(ScreenLocked, Visible).with_text(&strings.unlock_instructions),
            RegionDirective::new(Selector, Visible),
            RegionDirective::new(EmergencyCall, Gone),
        ),
        Status::SimMissing => (
            with_suffix(&strings.missing_sim),
            RegionDirective::new(ScreenLocked, Invisible).with_text(&strings.unlock_instructions),
            RegionDirective::new(Selector, Visible),
            emergency_below_label,
        ),
        Status::SimMissingLocked => (
            with_suffix(&strings.missing_sim),
            RegionDirective::new(ScreenLocked, Visible)
                .with_text(&strings.missing_sim_instructions),
            RegionDirective::new(Selector, Gone),
            emergency_below_label,
        ),
        Status::SimLocked => (
            with_suffix(&strings.sim_locked),
            RegionDirective::new(ScreenLocked, Invisible),
            RegionDirective::new(Selector, Visible),
            RegionDirective::new(EmergencyCall, Gone),
        ),
        Status::SimPukLocked => (
            with_suffix(&strings.sim_puk_locked),
            RegionDirective::new(ScreenLocked, Visible)
                .with_text(&strings.puk_locked_instructions),
            RegionDirective::new(Selector, Gone),
            emergency_below_label,
        ),
    };

    LayoutDirectives { status, carrier_text, screen_locked, selector, emergency }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier() -> CarrierInfo {
        CarrierInfo::new(Some("Carrier"), Some("Provider"))
    }

    #[test]
    fn projection_is_idempotent() {
        let strings = Strings::default();
        for status in Status::ALL {
            assert_eq!(
                project(status, &carrier(), &strings),
                project(status, &carrier(), &strings)
            );
        }
    }

    #[test]
    fn emergency_only_for_sim_missing_family() {
        let strings = Strings::default();
        for status in Status::ALL {
            let layout = project(status, &carrier(), &strings);
            if status.offers_emergency_call() {
                assert_eq!(layout.emergency.visibility, Visibility::Visible, "{status:?}");
                assert_eq!(
                    layout.emergency.placement,
                    Some(Placement::Below(Region::ScreenLocked)),
                    "{status:?}"
                );
            } else {
                assert_eq!(layout.emergency.visibility, Visibility::Gone, "{status:?}");
                assert_eq!(layout.emergency.placement, None, "{status:?}");
            }
        }
    }

    #[test]
    fn label_visibility_asymmetry() {
        let strings = Strings::default();
        let label = |status| project(status, &carrier(), &strings).screen_locked.visibility;

        assert_eq!(label(Status::SimMissing), Visibility::Invisible);
        assert_eq!(label(Status::SimMissingLocked), Visibility::Visible);
        assert_eq!(label(Status::SimPukLocked), Visibility::Visible);
        assert_eq!(label(Status::NetworkLocked), Visibility::Visible);
        assert_eq!(label(Status::Normal), Visibility::Invisible);
        assert_eq!(label(Status::SimLocked), Visibility::Invisible);
    }

    #[test]
    fn carrier_suffixes() {
        let strings = Strings::default();
        let text = |status| project(status, &carrier(), &strings).carrier_text;

        assert_eq!(text(Status::Normal), "Carrier|Provider");
        assert_eq!(text(Status::NetworkLocked), "Carrier|Network locked");
        assert_eq!(text(Status::SimMissing), "Carrier|No SIM card.");
        assert_eq!(text(Status::SimMissingLocked), "Carrier|No SIM card.");
        assert_eq!(text(Status::SimLocked), "Carrier|SIM card is locked.");
        assert_eq!(text(Status::SimPukLocked), "Carrier|SIM card is PUK-locked.");

        let no_plmn = project(Status::SimLocked, &CarrierInfo::default(), &strings);
        assert_eq!(no_plmn.carrier_text, "SIM card is locked.");
    }

    #[test]
    fn puk_locked_layout() {
        let strings = Strings::default();
        let layout = project(Status::SimPukLocked, &carrier(), &strings);

        assert_eq!(layout.selector.visibility, Visibility::Gone);
        assert_eq!(
            layout.screen_locked.text.as_deref(),
            Some(strings.puk_locked_instructions.as_str())
        );
        assert_eq!(layout.directive(Region::EmergencyCall), Some(&layout.emergency));
        assert_eq!(layout.directive(Region::Carrier), None);
    }

    #[test]
    fn untouched_label_text() {
        let strings = Strings::default();
        assert_eq!(project(Status::Normal, &carrier(), &strings).screen_locked.text, None);
        assert_eq!(project(Status::SimLocked, &carrier(), &strings).screen_locked.text, None);
    }
}
