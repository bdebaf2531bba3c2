//! Display invariants.
//!
//! Each check looks at a [`DisplaySnapshot`]: the coordinator's status and
//! pending timers next to what the display model shows. Property tests
//! capture a snapshot after every handled event and run the whole registry.
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! registry.assert_all(&DisplaySnapshot::capture(&coordinator, &display), "after resume");
//! ```

mod checks;
mod snapshot;

pub use checks::{
    EmergencyPlacement, LabelFollowsStatus, SelectorGate, SinglePendingPair,
    StatusLinesRespectStatus,
};
pub use snapshot::DisplaySnapshot;

/// Outcome of one check.
pub type InvariantResult = Result<(), Violation>;

/// A display property that did not hold.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Failed check.
    pub invariant: &'static str,
    /// What the display showed instead.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property of the lock screen display.
pub trait Invariant: Send + Sync {
    /// Name reported in violations.
    fn name(&self) -> &'static str;

    /// Check the property against one snapshot.
    fn check(&self, state: &DisplaySnapshot) -> InvariantResult;
}

/// Set of display checks run together.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// No checks.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Every lock screen check:
    /// - [`StatusLinesRespectStatus`]: hidden lines when the status has no room
    /// - [`EmergencyPlacement`]: emergency action offered below the label
    /// - [`SelectorGate`]: selector gone only when the SIM blocks it
    /// - [`LabelFollowsStatus`]: projected label text survives messages
    /// - [`SinglePendingPair`]: one show/clear pair per region
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(StatusLinesRespectStatus);
        registry.add(EmergencyPlacement);
        registry.add(SelectorGate);
        registry.add(LabelFollowsStatus);
        registry.add(SinglePendingPair);
        registry
    }

    /// Register a check.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Run every check. Collects all violations rather than stopping at the
    /// first.
    pub fn check_all(&self, state: &DisplaySnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Run every check and panic with `context` on any violation.
    #[allow(clippy::panic, reason = "test assertion helper")]
    pub fn assert_all(&self, state: &DisplaySnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of checks.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Whether no check is registered.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use keyguard_core::{Region, Status, Visibility};

    use super::*;
    use crate::display::RegionState;

    #[test]
    fn standard_registry_covers_every_check() {
        let registry = InvariantRegistry::standard();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn violations_are_collected() {
        let registry = InvariantRegistry::standard();
        let hidden = |visibility| RegionState { visibility, ..RegionState::default() };

        // Blank display under PUK lock: selector and emergency are both wrong.
        let snapshot = DisplaySnapshot::blank(Status::SimPukLocked)
            .with_region(Region::StatusLine1, hidden(Visibility::Invisible))
            .with_region(Region::StatusLine2, hidden(Visibility::Invisible));
        let violations = registry.check_all(&snapshot).unwrap_err();

        let names: Vec<_> = violations.iter().map(|v| v.invariant).collect();
        assert_eq!(names, vec!["EmergencyPlacement", "SelectorGate"]);
    }
}
