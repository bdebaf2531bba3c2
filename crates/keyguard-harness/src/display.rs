//! Region-level display model.
//!
//! Records what a real display surface would show after executing display
//! directives. Only the parts the lock screen controls are modeled: text,
//! icon, visibility and relative placement per region, plus the selector
//! handles.

use std::collections::BTreeMap;

use keyguard_app::KeyguardAction;
use keyguard_core::{Handle, HandleResources, Icon, Placement, Region, Visibility};

/// What one region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionState {
    /// Visibility.
    pub visibility: Visibility,
    /// Text.
    pub text: String,
    /// Leading icon.
    pub icon: Option<Icon>,
    /// Relative placement. Once added it stays.
    pub placement: Option<Placement>,
}

impl Default for RegionState {
    fn default() -> Self {
        Self { visibility: Visibility::Visible, text: String::new(), icon: None, placement: None }
    }
}

impl RegionState {
    /// Whether the region is drawn.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

/// What one selector handle shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandleState {
    /// Drawables, once set.
    pub resources: Option<HandleResources>,
    /// Hint text, once set.
    pub hint: Option<String>,
}

/// Display surface model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayModel {
    regions: BTreeMap<Region, RegionState>,
    unlock: HandleState,
    sound: HandleState,
}

impl DisplayModel {
    /// Blank display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a display directive. Returns `false` for actions that are not
    /// display directives.
    pub fn apply(&mut self, action: &KeyguardAction) -> bool {
        match action {
            KeyguardAction::SetCarrierText(text) => {
                self.region_mut(Region::Carrier).text.clone_from(text);
            },
            KeyguardAction::SetDate(text) => {
                self.region_mut(Region::Date).text.clone_from(text);
            },
            KeyguardAction::SetRegion(directive) => {
                let region = self.region_mut(directive.region);
                region.visibility = directive.visibility;
                if let Some(text) = &directive.text {
                    region.text.clone_from(text);
                }
                if directive.placement.is_some() {
                    region.placement = directive.placement;
                }
            },
            KeyguardAction::SetStatusLines(lines) => {
                let targets = [Region::StatusLine1, Region::StatusLine2];
                for (index, target) in targets.into_iter().enumerate() {
                    let region = self.region_mut(target);
                    match lines.get(index) {
                        Some(line) => {
                            region.visibility = Visibility::Visible;
                            region.text.clone_from(&line.text);
                            region.icon = Some(line.icon);
                        },
                        None => region.visibility = Visibility::Invisible,
                    }
                }
            },
            KeyguardAction::SetRegionContent(content) => {
                let region = self.region_mut(content.region);
                region.text.clone_from(&content.text);
                region.icon = content.icon;
            },
            KeyguardAction::SetHandleResources { handle, resources } => {
                self.handle_mut(*handle).resources = Some(*resources);
            },
            KeyguardAction::SetHint { handle, text } => {
                self.handle_mut(*handle).hint = Some(text.clone());
            },
            KeyguardAction::SetRingerMode(_)
            | KeyguardAction::GoToUnlockScreen
            | KeyguardAction::TakeEmergencyCallAction
            | KeyguardAction::PokeWakelock
            | KeyguardAction::RecreateMe => return false,
        }
        true
    }

    fn region_mut(&mut self, region: Region) -> &mut RegionState {
        self.regions.entry(region).or_default()
    }

    fn handle_mut(&mut self, handle: Handle) -> &mut HandleState {
        match handle {
            Handle::Unlock => &mut self.unlock,
            Handle::Sound => &mut self.sound,
        }
    }

    /// Current state of `region`.
    pub fn region(&self, region: Region) -> RegionState {
        self.regions.get(&region).cloned().unwrap_or_default()
    }

    /// Current state of every region.
    pub fn regions(&self) -> BTreeMap<Region, RegionState> {
        Region::ALL.into_iter().map(|region| (region, self.region(region))).collect()
    }

    /// Current state of a selector handle.
    pub fn handle(&self, handle: Handle) -> &HandleState {
        match handle {
            Handle::Unlock => &self.unlock,
            Handle::Sound => &self.sound,
        }
    }

    /// Texts of the visible status lines, top first.
    pub fn status_lines(&self) -> Vec<String> {
        [Region::StatusLine1, Region::StatusLine2]
            .into_iter()
            .map(|region| self.region(region))
            .filter(RegionState::is_visible)
            .map(|state| state.text)
            .collect()
    }
}
