//! Replays the bundled scenarios and config files end to end.

use std::{io::Write, path::Path};

use keyguard_app::KeyguardAction;
use keyguard_core::{Region, RingerMode, Visibility};
use keyguard_sim::{SimError, load_config, read, replay};

fn scenario(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name);
    read(&path).unwrap()
}

#[tokio::test]
async fn puk_scenario_offers_emergency_call() {
    let report = replay(&scenario("puk_locked.keyguard"), load_config(None).unwrap(), false)
        .await
        .unwrap();

    assert_eq!(report.display.region(Region::Selector).visibility, Visibility::Gone);
    assert_eq!(report.display.region(Region::EmergencyCall).visibility, Visibility::Visible);
    assert!(report.display.status_lines().is_empty());
    assert_eq!(report.host_calls, vec![KeyguardAction::TakeEmergencyCallAction]);
}

#[tokio::test]
async fn silent_toggle_scenario_clears_last_message() {
    let report = replay(&scenario("silent_toggle.keyguard"), load_config(None).unwrap(), false)
        .await
        .unwrap();

    assert_eq!(report.ringer_writes, vec![RingerMode::Vibrate, RingerMode::Normal]);
    assert_eq!(report.display.region(Region::ScreenLocked).text, "");
}

#[tokio::test]
async fn config_file_overrides_strings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "strings": {{ "silent_mode_on": "Shh" }} }}"#).unwrap();

    let config = load_config(Some(file.path())).unwrap();
    let report = replay("trigger sound", config, false).await.unwrap();

    assert_eq!(report.display.region(Region::ScreenLocked).text, "Shh");
}

#[tokio::test]
async fn realtime_replay_paces_short_advances() {
    let config = load_config(None).unwrap();
    let report = replay("trigger sound\nadvance 20", config, true).await.unwrap();
    assert_eq!(report.ringer_writes, vec![RingerMode::Silent]);
}

#[test]
fn bad_inputs_are_reported() {
    let missing = load_config(Some(Path::new("/nonexistent/keyguard.json")));
    assert!(matches!(missing, Err(SimError::Io { .. })));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(matches!(load_config(Some(file.path())), Err(SimError::Config(_))));
}

#[tokio::test]
async fn bad_script_is_reported() {
    let result = replay("wiggle 3", load_config(None).unwrap(), false).await;
    assert!(matches!(result, Err(SimError::Scenario(_))));
}
