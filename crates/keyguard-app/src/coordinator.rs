//! Lock screen coordinator.
//!
//! This module defines the [`LockScreenCoordinator`] state machine, which
//! decides what the lock screen shows completely decoupled from rendering and
//! device I/O.
//!
//! It consumes [`KeyguardEvent`]s and produces [`KeyguardAction`]s. Time is
//! passed in with every event and collaborators are read through
//! [`DeviceServices`], so the same code runs under a virtual clock in tests.
//!
//! # Transitions
//!
//! The lock [`Status`] changes only through [`status::resolve`], on:
//! - construction
//! - a SIM state callback
//! - resume, which re-reads every signal
//!
//! A carrier refresh re-projects the layout for the current status. Battery
//! updates recompose the status lines only, time ticks the date only.
//!
//! # Label sharing
//!
//! Transient messages and the status instructions share the "locked" label.
//! A projection that writes label text cancels any pending message, and a
//! message clear puts the projected text back.

use std::{ops::Add, time::Duration};

use keyguard_core::{
    Handle, HandleResources, LayoutDirectives, MessageScheduler, Region, RegionContent,
    SilentModeAction, SilentModeController, Status, StatusLine, TimerId, TimerKind, layout,
    status, status_lines,
};

use crate::{DeviceServices, DeviceSignals, KeyguardAction, KeyguardConfig, KeyguardEvent};

/// Lock screen state machine.
///
/// Owns the current status, the signal cache, the silent mode toggle and the
/// transient message timers. No I/O dependencies.
#[derive(Debug, Clone)]
pub struct LockScreenCoordinator<I> {
    config: KeyguardConfig,
    status: Status,
    signals: DeviceSignals,
    silent_mode: SilentModeController,
    scheduler: MessageScheduler<I>,
}

impl<I> LockScreenCoordinator<I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    /// Build the coordinator from the collaborators' current values.
    pub fn new(config: KeyguardConfig, services: &impl DeviceServices) -> Self {
        let signals = DeviceSignals::capture(services);
        let status = status::resolve(signals.sim_state, signals.provisioned);
        let scheduler = MessageScheduler::new(config.toast_duration());
        tracing::debug!(
            ?status,
            menu_key_enabled = config.menu_key_enabled(),
            "lock screen created"
        );

        Self {
            silent_mode: SilentModeController::new(services.ringer_mode()),
            config,
            status,
            signals,
            scheduler,
        }
    }

    /// Every directive needed to draw the lock screen from scratch.
    pub fn present(&self) -> Vec<KeyguardAction> {
        let mut actions = self.layout_actions();
        actions.push(KeyguardAction::SetRegionContent(RegionContent {
            region: Region::EmergencyCall,
            text: self.config.strings.emergency_call.clone(),
            icon: None,
        }));
        actions.push(KeyguardAction::SetStatusLines(self.status_lines()));
        actions.push(KeyguardAction::SetDate(self.signals.date.clone()));
        actions.push(KeyguardAction::SetHandleResources {
            handle: Handle::Unlock,
            resources: HandleResources::UNLOCK,
        });
        actions.push(KeyguardAction::SetHint {
            handle: Handle::Unlock,
            text: self.config.strings.unlock_label.clone(),
        });
        actions.push(KeyguardAction::SetHandleResources {
            handle: Handle::Sound,
            resources: self.silent_mode.resources(),
        });
        actions
    }

    /// Process an event at `now` and return actions.
    ///
    /// Transient message timers due at `now` fire after the event itself has
    /// been handled.
    pub fn handle(
        &mut self,
        event: KeyguardEvent,
        services: &impl DeviceServices,
        now: I,
    ) -> Vec<KeyguardAction> {
        tracing::debug!(?event, status = ?self.status, "handling event");

        let mut actions = match event {
            KeyguardEvent::SimStateChanged(sim_state) => {
                self.signals.sim_state = sim_state;
                self.signals.provisioned = services.is_provisioned();
                self.resolve_status();
                self.drop_stale_message();
                let mut actions = self.layout_actions();
                actions.push(KeyguardAction::SetStatusLines(self.status_lines()));
                actions
            },
            KeyguardEvent::BatteryChanged(battery) => {
                self.signals.battery = battery;
                vec![KeyguardAction::SetStatusLines(self.status_lines())]
            },
            KeyguardEvent::CarrierInfoChanged { plmn, spn } => {
                self.signals.carrier.plmn = plmn;
                self.signals.carrier.spn = spn;
                self.drop_stale_message();
                self.layout_actions()
            },
            KeyguardEvent::TimeChanged => {
                self.signals.date = services.formatted_date();
                vec![KeyguardAction::SetDate(self.signals.date.clone())]
            },
            KeyguardEvent::RingerModeChanged(mode) => {
                let effects = self.silent_mode.on_external_ringer_change(mode);
                self.apply_silent_mode(effects, now)
            },
            KeyguardEvent::OrientationChanged { portrait } => {
                if portrait == self.signals.portrait_at_creation {
                    vec![]
                } else {
                    tracing::info!(portrait, "orientation changed, recreating lock screen");
                    vec![KeyguardAction::RecreateMe]
                }
            },
            KeyguardEvent::KeyboardChanged { open } => {
                if open && self.config.keyguard_bypass {
                    tracing::info!("keyboard opened with bypass enabled");
                    vec![KeyguardAction::GoToUnlockScreen]
                } else {
                    vec![]
                }
            },
            KeyguardEvent::Trigger(Handle::Unlock) => {
                tracing::info!("unlock handle triggered");
                vec![KeyguardAction::GoToUnlockScreen]
            },
            KeyguardEvent::Trigger(Handle::Sound) => {
                let effects =
                    self.silent_mode.toggle(services.vibrate_on_ring(), &self.config.strings);
                self.apply_silent_mode(effects, now)
            },
            KeyguardEvent::GrabStateChanged { handle } => {
                let effects = self.silent_mode.on_grab_state_change(
                    handle,
                    services.ringer_mode(),
                    &self.config.strings,
                );
                self.apply_silent_mode(effects, now)
            },
            KeyguardEvent::KeyDown(key) => {
                if self.config.unlocks_on(key) {
                    tracing::info!(?key, "unlock shortcut pressed");
                    vec![KeyguardAction::GoToUnlockScreen]
                } else {
                    vec![]
                }
            },
            KeyguardEvent::EmergencyTapped => {
                tracing::info!("emergency call requested");
                vec![KeyguardAction::TakeEmergencyCallAction]
            },
            KeyguardEvent::Paused | KeyguardEvent::TimerFired => vec![],
            KeyguardEvent::Resumed => {
                self.signals.refresh(services);
                self.resolve_status();
                self.drop_stale_message();
                self.present()
            },
        };

        let fired = self.scheduler.poll(now);
        if !fired.is_empty() {
            let label = self.layout().screen_locked.text;
            actions.extend(fired.into_iter().map(|mut content| {
                if let Some(text) = &label
                    && content.region == Region::ScreenLocked
                    && content.is_cleared()
                {
                    content.text.clone_from(text);
                }
                KeyguardAction::SetRegionContent(content)
            }));
        }
        actions
    }

    fn resolve_status(&mut self) {
        let next = status::resolve(self.signals.sim_state, self.signals.provisioned);
        if next != self.status {
            tracing::debug!(
                from = ?self.status,
                to = ?next,
                sim_state = %self.signals.sim_state,
                "status transition"
            );
        }
        self.status = next;
    }

    // Must run before the layout is emitted, or a pending clear wipes its text.
    fn drop_stale_message(&mut self) {
        if self.layout().screen_locked.text.is_some()
            && self.scheduler.cancel_region(Region::ScreenLocked)
        {
            tracing::debug!(status = ?self.status, "label text replaces transient message");
        }
    }

    fn layout_actions(&self) -> Vec<KeyguardAction> {
        let layout = self.layout();
        let mut actions = vec![KeyguardAction::SetCarrierText(layout.carrier_text.clone())];
        actions.extend(layout.regions().into_iter().cloned().map(KeyguardAction::SetRegion));
        actions
    }

    fn apply_silent_mode(&mut self, effects: Vec<SilentModeAction>, now: I) -> Vec<KeyguardAction> {
        let mut actions = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                SilentModeAction::SetRingerMode(mode) => {
                    tracing::info!(%mode, "writing ringer mode");
                    actions.push(KeyguardAction::SetRingerMode(mode));
                },
                SilentModeAction::UpdateResources(resources) => {
                    actions.push(KeyguardAction::SetHandleResources {
                        handle: Handle::Sound,
                        resources,
                    });
                },
                SilentModeAction::UpdateHint(text) => {
                    actions.push(KeyguardAction::SetHint { handle: Handle::Sound, text });
                },
                SilentModeAction::ShowMessage { text, icon } => {
                    self.scheduler.show(now, Region::ScreenLocked, &text, icon);
                },
                SilentModeAction::PokeWakelock => actions.push(KeyguardAction::PokeWakelock),
            }
        }
        actions
    }

    /// Cancel every pending timer. Called on teardown.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel_all();
    }

    /// Current lock status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Cached device signals.
    pub fn signals(&self) -> &DeviceSignals {
        &self.signals
    }

    /// Cached silent flag.
    pub fn is_silent(&self) -> bool {
        self.silent_mode.is_silent()
    }

    /// Configuration in use.
    pub fn config(&self) -> &KeyguardConfig {
        &self.config
    }

    /// Layout projected from the current status and carrier names.
    pub fn layout(&self) -> LayoutDirectives {
        layout::project(self.status, &self.signals.carrier, &self.config.strings)
    }

    /// Status lines composed from the current signals.
    pub fn status_lines(&self) -> Vec<StatusLine> {
        let charging = status_lines::charging_text(&self.signals.battery, &self.config.strings);
        status_lines::for_status(
            self.status,
            charging.as_deref(),
            self.signals.next_alarm.as_deref(),
        )
    }

    /// Earliest transient message deadline.
    pub fn next_deadline(&self) -> Option<I> {
        self.scheduler.next_deadline()
    }

    /// Pending transient message timers for `region`.
    pub fn pending_timers(&self, region: Region) -> Vec<(TimerId, TimerKind)> {
        self.scheduler.pending(region)
    }

    /// The lock screen never takes text input.
    pub fn needs_input(&self) -> bool {
        false
    }
}
