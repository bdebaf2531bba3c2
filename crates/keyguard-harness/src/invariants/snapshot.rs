//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the lock screen at a point in
//! time: the coordinator's status, what the display shows, and which
//! transient message timers are pending. Invariants operate on snapshots
//! rather than live state to ensure consistent, atomic checks.

use std::{collections::BTreeMap, ops::Add, time::Duration};

use keyguard_app::LockScreenCoordinator;
use keyguard_core::{Region, Status, TimerKind};

use crate::display::{DisplayModel, RegionState};

/// Snapshot of the lock screen.
#[derive(Debug, Clone)]
pub struct DisplaySnapshot {
    /// Current lock status.
    pub status: Status,
    /// What every region shows.
    pub regions: BTreeMap<Region, RegionState>,
    /// Pending timer kinds per region.
    pub pending: BTreeMap<Region, Vec<TimerKind>>,
    /// Label text the current status projects, if it sets one.
    pub projected_label: Option<String>,
}

impl DisplaySnapshot {
    /// Snapshot of a blank display for `status` with nothing pending.
    pub fn blank(status: Status) -> Self {
        Self {
            status,
            regions: DisplayModel::new().regions(),
            pending: BTreeMap::new(),
            projected_label: None,
        }
    }

    /// Capture the coordinator's state and the display it drove.
    pub fn capture<I>(coordinator: &LockScreenCoordinator<I>, display: &DisplayModel) -> Self
    where
        I: Copy + Ord + Add<Duration, Output = I>,
    {
        let pending = Region::ALL
            .into_iter()
            .map(|region| {
                let kinds = coordinator.pending_timers(region).into_iter().map(|(_, k)| k);
                (region, kinds.collect::<Vec<_>>())
            })
            .filter(|(_, kinds)| !kinds.is_empty())
            .collect();

        Self {
            status: coordinator.status(),
            regions: display.regions(),
            pending,
            projected_label: coordinator.layout().screen_locked.text,
        }
    }

    /// State of `region`.
    pub fn region(&self, region: Region) -> RegionState {
        self.regions.get(&region).cloned().unwrap_or_default()
    }

    /// Set the state of `region`.
    #[must_use]
    pub fn with_region(mut self, region: Region, state: RegionState) -> Self {
        self.regions.insert(region, state);
        self
    }

    /// Set the label text the status projects.
    #[must_use]
    pub fn with_projected_label(mut self, text: &str) -> Self {
        self.projected_label = Some(text.to_string());
        self
    }

    /// Record a pending timer.
    #[must_use]
    pub fn with_pending(mut self, region: Region, kind: TimerKind) -> Self {
        self.pending.entry(region).or_default().push(kind);
        self
    }
}
