//! Fake device collaborators.
//!
//! `SimDevice` stands in for telephony, provisioning, power, alarm, ringer,
//! orientation and time. It implements [`DeviceServices`] for the coordinator
//! to read and [`UpdateMonitor`] for callback registration. Setters change the
//! device state and queue the matching callback, which is only delivered while
//! its channel has a live subscription.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::{BTreeMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use keyguard_app::{Channel, DeviceServices, KeyguardEvent, SubscriptionId, UpdateMonitor};
use keyguard_core::{BatteryInfo, CarrierInfo, RingerMode, SimState};

use crate::scenario::Step;

#[derive(Debug)]
struct DeviceState {
    sim_state: SimState,
    provisioned: bool,
    carrier: CarrierInfo,
    battery: BatteryInfo,
    next_alarm: Option<String>,
    ringer: RingerMode,
    vibrate_on_ring: bool,
    portrait: bool,
    keyboard_open: bool,
    date: String,

    next_subscription: u64,
    subscriptions: BTreeMap<SubscriptionId, Channel>,
    events: VecDeque<KeyguardEvent>,
    ringer_writes: Vec<RingerMode>,
    dropped: usize,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            sim_state: SimState::Ready,
            provisioned: true,
            carrier: CarrierInfo::default(),
            battery: BatteryInfo::default(),
            next_alarm: None,
            ringer: RingerMode::Normal,
            vibrate_on_ring: false,
            portrait: true,
            keyboard_open: false,
            date: "Thursday, January 1".into(),
            next_subscription: 0,
            subscriptions: BTreeMap::new(),
            events: VecDeque::new(),
            ringer_writes: Vec::new(),
            dropped: 0,
        }
    }
}

impl DeviceState {
    fn emit(&mut self, channel: Channel, event: KeyguardEvent) {
        if self.subscriptions.values().any(|c| *c == channel) {
            self.events.push_back(event);
        } else {
            tracing::debug!(?channel, ?event, "no subscriber, dropping callback");
            self.dropped += 1;
        }
    }
}

/// Fake device shared between the driver, the runtime and the test.
///
/// Clones observe the same device.
#[derive(Debug, Clone, Default)]
pub struct SimDevice {
    state: Arc<Mutex<DeviceState>>,
}

impl SimDevice {
    /// Ready SIM, provisioned, unplugged, ringer audible, portrait.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, DeviceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Telephony reports a new SIM state.
    pub fn set_sim_state(&self, sim_state: SimState) {
        let mut state = self.lock();
        state.sim_state = sim_state;
        state.emit(Channel::SimState, KeyguardEvent::SimStateChanged(sim_state));
    }

    /// Change the provisioning flag. Provisioning has no callback of its own;
    /// it is read on the next SIM change or resume.
    pub fn set_provisioned(&self, provisioned: bool) {
        self.lock().provisioned = provisioned;
    }

    /// Carrier names refreshed.
    pub fn set_carrier(&self, plmn: Option<String>, spn: Option<String>) {
        let mut state = self.lock();
        state.carrier = CarrierInfo { plmn: plmn.clone(), spn: spn.clone() };
        state.emit(Channel::Info, KeyguardEvent::CarrierInfoChanged { plmn, spn });
    }

    /// Power source changed.
    pub fn set_battery(&self, battery: BatteryInfo) {
        let mut state = self.lock();
        state.battery = battery;
        state.emit(Channel::Info, KeyguardEvent::BatteryChanged(battery));
    }

    /// Change the next alarm. Read on construction and resume only.
    pub fn set_next_alarm(&self, next_alarm: Option<String>) {
        self.lock().next_alarm = next_alarm;
    }

    /// Ringer changed by something other than the lock screen.
    pub fn set_ringer_mode(&self, mode: RingerMode) {
        let mut state = self.lock();
        state.ringer = mode;
        state.emit(Channel::Info, KeyguardEvent::RingerModeChanged(mode));
    }

    /// Change the vibrate-on-ring preference.
    pub fn set_vibrate_on_ring(&self, vibrate: bool) {
        self.lock().vibrate_on_ring = vibrate;
    }

    /// Device rotated.
    pub fn set_orientation(&self, portrait: bool) {
        let mut state = self.lock();
        state.portrait = portrait;
        state.emit(Channel::Configuration, KeyguardEvent::OrientationChanged { portrait });
    }

    /// Hardware keyboard opened or closed.
    pub fn set_keyboard(&self, open: bool) {
        let mut state = self.lock();
        state.keyboard_open = open;
        state.emit(Channel::Configuration, KeyguardEvent::KeyboardChanged { open });
    }

    /// Change the formatted date without a tick.
    pub fn set_date(&self, date: impl Into<String>) {
        self.lock().date = date.into();
    }

    /// Periodic time tick.
    pub fn tick(&self) {
        self.lock().emit(Channel::Info, KeyguardEvent::TimeChanged);
    }

    /// Queue a user gesture or lifecycle event. Not routed through the update
    /// monitor, so always delivered.
    pub fn push_input(&self, event: KeyguardEvent) {
        self.lock().events.push_back(event);
    }

    /// Apply a scenario step. Time steps are handled by the driver.
    pub fn apply(&self, step: Step) {
        match step {
            Step::SimState(sim_state) => self.set_sim_state(sim_state),
            Step::Provisioned(provisioned) => self.set_provisioned(provisioned),
            Step::Carrier { plmn, spn } => self.set_carrier(plmn, spn),
            Step::Battery(battery) => self.set_battery(battery),
            Step::Alarm(alarm) => self.set_next_alarm(alarm),
            Step::Ringer(mode) => self.set_ringer_mode(mode),
            Step::VibrateOnRing(vibrate) => self.set_vibrate_on_ring(vibrate),
            Step::Orientation { portrait } => self.set_orientation(portrait),
            Step::Keyboard { open } => self.set_keyboard(open),
            Step::Tick => self.tick(),
            Step::Input(event) => self.push_input(event),
            Step::Advance(_) => {},
        }
    }

    /// Next queued event.
    pub fn pop_event(&self) -> Option<KeyguardEvent> {
        self.lock().events.pop_front()
    }

    /// Take every queued event.
    pub fn drain_events(&self) -> Vec<KeyguardEvent> {
        self.lock().events.drain(..).collect()
    }

    /// The lock screen writes the ringer mode. The ringer subsystem then
    /// broadcasts the change like any other.
    pub fn write_ringer(&self, mode: RingerMode) {
        let mut state = self.lock();
        state.ringer_writes.push(mode);
        state.ringer = mode;
        state.emit(Channel::Info, KeyguardEvent::RingerModeChanged(mode));
    }

    /// Every ringer write by the lock screen, in order.
    pub fn ringer_writes(&self) -> Vec<RingerMode> {
        self.lock().ringer_writes.clone()
    }

    /// Channels with a live subscription.
    pub fn active_subscriptions(&self) -> Vec<Channel> {
        self.lock().subscriptions.values().copied().collect()
    }

    /// Callbacks dropped because nobody was subscribed.
    pub fn dropped_callbacks(&self) -> usize {
        self.lock().dropped
    }

    /// Whether a hardware keyboard is open.
    pub fn keyboard_open(&self) -> bool {
        self.lock().keyboard_open
    }
}

impl DeviceServices for SimDevice {
    fn sim_state(&self) -> SimState {
        self.lock().sim_state
    }

    fn is_provisioned(&self) -> bool {
        self.lock().provisioned
    }

    fn carrier(&self) -> CarrierInfo {
        self.lock().carrier.clone()
    }

    fn battery(&self) -> BatteryInfo {
        self.lock().battery
    }

    fn next_alarm(&self) -> Option<String> {
        self.lock().next_alarm.clone()
    }

    fn ringer_mode(&self) -> RingerMode {
        self.lock().ringer
    }

    fn vibrate_on_ring(&self) -> bool {
        self.lock().vibrate_on_ring
    }

    fn is_portrait(&self) -> bool {
        self.lock().portrait
    }

    fn formatted_date(&self) -> String {
        self.lock().date.clone()
    }
}

impl UpdateMonitor for SimDevice {
    fn subscribe(&self, channel: Channel) -> SubscriptionId {
        let mut state = self.lock();
        state.next_subscription += 1;
        let id = SubscriptionId(state.next_subscription);
        state.subscriptions.insert(id, channel);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().subscriptions.remove(&id);
    }
}
