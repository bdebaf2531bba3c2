//! End-to-end tests for lock screen behavior.
//!
//! # Test Strategy
//!
//! Each test replays a scenario script through the production [`Runtime`]
//! with a [`SimDriver`] on a virtual clock:
//! 1. Set up the fake device
//! 2. Run the script to completion, which tears the lock screen down
//! 3. Verify the display model, host calls and ringer writes
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks on what a user would see and what the host
//! and ringer subsystem would have been asked to do.

use std::sync::Arc;

use keyguard_app::{KeyguardAction, KeyguardConfig, Runtime};
use keyguard_core::{
    Handle, HandleResources, Icon, Placement, Region, RingerMode, SimState, Strings, Visibility,
};
use keyguard_harness::{SimDevice, SimDriver, SimEnv, SimObserver, scenario};

/// Replay `script` against `device` and return what the driver recorded.
async fn replay(device: &SimDevice, config: KeyguardConfig, script: &str) -> SimObserver {
    let steps = scenario::parse(script).unwrap();
    let driver = SimDriver::new(SimEnv::new(), device.clone(), steps);
    let observer = driver.observer();

    Runtime::new(driver, config, Arc::new(device.clone())).run().await.unwrap();
    observer
}

async fn replay_default(script: &str) -> (SimDevice, SimObserver) {
    let device = SimDevice::new();
    let observer = replay(&device, KeyguardConfig::default(), script).await;
    (device, observer)
}

#[tokio::test]
async fn ready_and_provisioned_shows_normal_screen() {
    let (_, observer) = replay_default("carrier Carrier Provider").await;
    let display = observer.display();

    assert_eq!(display.region(Region::Carrier).text, "Carrier|Provider");
    assert_eq!(display.region(Region::Selector).visibility, Visibility::Visible);
    assert_eq!(display.region(Region::EmergencyCall).visibility, Visibility::Gone);
    assert_eq!(display.region(Region::ScreenLocked).visibility, Visibility::Invisible);
    assert!(display.status_lines().is_empty());
    assert_eq!(display.region(Region::Date).text, "Thursday, January 1");
}

#[tokio::test]
async fn puk_required_blocks_selector() {
    let (_, observer) = replay_default("carrier Carrier -\nsim puk_required").await;
    let display = observer.display();
    let strings = Strings::default();

    assert_eq!(display.region(Region::Carrier).text, "Carrier|SIM card is PUK-locked.");
    assert_eq!(display.region(Region::Selector).visibility, Visibility::Gone);

    let label = display.region(Region::ScreenLocked);
    assert_eq!(label.visibility, Visibility::Visible);
    assert_eq!(label.text, strings.puk_locked_instructions);

    let emergency = display.region(Region::EmergencyCall);
    assert_eq!(emergency.visibility, Visibility::Visible);
    assert_eq!(emergency.placement, Some(Placement::Below(Region::ScreenLocked)));
}

#[tokio::test]
async fn missing_sim_reserves_label_space() {
    let (_, observer) = replay_default("sim absent").await;
    let label = observer.display().region(Region::ScreenLocked);

    assert_eq!(label.visibility, Visibility::Invisible);
    assert_eq!(label.text, Strings::default().unlock_instructions);
}

#[tokio::test]
async fn unprovisioned_missing_sim_is_locked() {
    let (_, observer) = replay_default("provisioned false\nsim absent").await;
    let display = observer.display();

    assert_eq!(display.region(Region::Selector).visibility, Visibility::Gone);
    let label = display.region(Region::ScreenLocked);
    assert_eq!(label.text, Strings::default().missing_sim_instructions);
}

#[tokio::test]
async fn status_lines_charging_first() {
    let (_, observer) = replay_default("alarm Sat 7:00 AM\nresume\nbattery true true 40").await;

    assert_eq!(observer.display().status_lines(), vec![
        "Charging (40%)".to_string(),
        "Sat 7:00 AM".to_string()
    ]);
    assert_eq!(observer.display().region(Region::StatusLine2).icon, Some(Icon::Alarm));
}

#[tokio::test]
async fn status_lines_hidden_while_puk_locked() {
    let (_, observer) = replay_default("sim puk_required\nbattery true false 5").await;
    assert!(observer.display().status_lines().is_empty());
}

#[tokio::test]
async fn toggle_writes_ringer_once_and_shows_message() {
    let (device, observer) = replay_default("trigger sound").await;
    let display = observer.display();

    assert_eq!(device.ringer_writes(), vec![RingerMode::Silent]);
    assert_eq!(display.region(Region::ScreenLocked).text, "Sound is OFF");
    assert_eq!(display.region(Region::ScreenLocked).icon, Some(Icon::RingerOff));
    assert_eq!(display.handle(Handle::Sound).resources, Some(HandleResources::sound(true)));
    assert_eq!(observer.host_calls(), vec![KeyguardAction::PokeWakelock]);
}

#[tokio::test]
async fn toggle_with_vibrate_on_ring() {
    let (device, _) = replay_default("vibrate-on-ring true\ntrigger sound\ntrigger sound").await;
    assert_eq!(device.ringer_writes(), vec![RingerMode::Vibrate, RingerMode::Normal]);
}

#[tokio::test]
async fn message_clears_after_delay() {
    let (_, observer) = replay_default("trigger sound\nadvance 3499").await;
    assert_eq!(observer.display().region(Region::ScreenLocked).text, "Sound is OFF");

    let (_, observer) = replay_default("trigger sound\nadvance 3500").await;
    let label = observer.display().region(Region::ScreenLocked);
    assert_eq!(label.text, "");
    assert_eq!(label.icon, None);
}

#[tokio::test]
async fn second_toggle_reschedules_clear() {
    // The first clear would fire at 3500 and wipe the second message.
    let script = "trigger sound\nadvance 3000\ntrigger sound\nadvance 600";
    let (_, observer) = replay_default(script).await;
    assert_eq!(observer.display().region(Region::ScreenLocked).text, "Sound is ON");

    let (_, observer) = replay_default(&format!("{script}\nadvance 2900")).await;
    assert_eq!(observer.display().region(Region::ScreenLocked).text, "");
}

#[tokio::test]
async fn sim_change_keeps_puk_label_past_old_clear() {
    let script = "trigger sound\nadvance 100\nsim puk_required\nadvance 3500";
    let (_, observer) = replay_default(script).await;
    let label = observer.display().region(Region::ScreenLocked);

    assert_eq!(label.visibility, Visibility::Visible);
    assert_eq!(label.text, Strings::default().puk_locked_instructions);
}

#[tokio::test]
async fn message_clear_restores_missing_sim_label() {
    let (_, observer) = replay_default("sim absent\ntrigger sound\nadvance 3500").await;
    let label = observer.display().region(Region::ScreenLocked);

    assert_eq!(label.text, Strings::default().unlock_instructions);
    assert_eq!(label.icon, None);
}

#[tokio::test]
async fn emergency_button_is_labelled() {
    let device = SimDevice::new();
    let mut config = KeyguardConfig::default();
    config.strings.emergency_call = "Call 112".into();
    let observer = replay(&device, config, "sim absent").await;

    assert_eq!(observer.display().region(Region::EmergencyCall).text, "Call 112");
}

#[tokio::test]
async fn external_ringer_change_updates_handle_silently() {
    let (device, observer) = replay_default("ringer vibrate").await;
    let display = observer.display();

    assert!(device.ringer_writes().is_empty());
    assert_eq!(display.handle(Handle::Sound).resources, Some(HandleResources::sound(true)));
    assert_eq!(display.region(Region::ScreenLocked).text, "");
}

#[tokio::test]
async fn grabbing_sound_handle_sets_hint() {
    let (_, observer) = replay_default("ringer silent\ngrab sound\ngrab none").await;

    assert_eq!(observer.display().handle(Handle::Sound).hint.as_deref(), Some("Sound on"));
    assert_eq!(observer.display().handle(Handle::Unlock).hint.as_deref(), Some("Unlock"));
    assert_eq!(observer.host_calls(), vec![KeyguardAction::PokeWakelock; 2]);
}

#[tokio::test]
async fn unlock_requests() {
    let device = SimDevice::new();
    let config =
        KeyguardConfig { menu_unlock: true, keyguard_bypass: true, ..KeyguardConfig::default() };
    let script = "key menu\nkey center\nkeyboard open\ntrigger unlock";
    let observer = replay(&device, config, script).await;

    assert_eq!(observer.host_calls(), vec![KeyguardAction::GoToUnlockScreen; 3]);
    assert!(device.keyboard_open());
}

#[tokio::test]
async fn shortcuts_disabled_by_default() {
    let (_, observer) = replay_default("key menu\nkey center\nkeyboard open").await;
    assert!(observer.host_calls().is_empty());
}

#[tokio::test]
async fn emergency_and_rotation_are_host_requests() {
    let (_, observer) =
        replay_default("sim absent\nemergency\norientation portrait\norientation landscape").await;

    assert_eq!(observer.host_calls(), vec![
        KeyguardAction::TakeEmergencyCallAction,
        KeyguardAction::RecreateMe
    ]);
}

#[tokio::test]
async fn resume_rereads_everything() {
    let device = SimDevice::new();
    device.set_sim_state(SimState::Absent);
    let script = "pause\nprovisioned false\nalarm Sat 7:00 AM\nresume";
    let observer = replay(&device, KeyguardConfig::default(), script).await;
    let display = observer.display();

    // Provisioning has no callback of its own; only resume picks it up.
    assert_eq!(display.region(Region::Selector).visibility, Visibility::Gone);
    let label = display.region(Region::ScreenLocked);
    assert_eq!(label.text, Strings::default().missing_sim_instructions);
    assert!(display.status_lines().is_empty());
}

#[tokio::test]
async fn tick_refreshes_date_only() {
    let device = SimDevice::new();
    let observer = replay(&device, KeyguardConfig::default(), "tick").await;
    assert_eq!(observer.display().region(Region::Date).text, "Thursday, January 1");

    device.set_date("Friday, January 2");
    let observer = replay(&device, KeyguardConfig::default(), "tick").await;
    assert_eq!(observer.display().region(Region::Date).text, "Friday, January 2");
}

#[tokio::test]
async fn teardown_unsubscribes_every_channel() {
    let (device, observer) = replay_default("trigger sound").await;

    assert!(observer.is_stopped());
    assert!(device.active_subscriptions().is_empty());

    device.set_sim_state(SimState::PukRequired);
    assert_eq!(device.pop_event(), None);
}
