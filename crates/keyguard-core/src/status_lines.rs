//! Status line composition.
//!
//! Up to two auxiliary lines are shown below the carrier text: a charging
//! description and the next alarm. When both are present, charging always
//! comes first.

use serde::{Deserialize, Serialize};

use crate::{Status, error::SignalError, resources::Icon, resources::Strings};

/// Battery charge percentage, `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct BatteryLevel(u8);

impl BatteryLevel {
    /// Full charge.
    pub const FULL: BatteryLevel = BatteryLevel(100);

    /// Level from a raw reading, clamping out-of-range values.
    pub fn saturating(raw: i32) -> Self {
        match Self::try_from(raw) {
            Ok(level) => level,
            Err(err) => {
                tracing::warn!(%err, "clamping battery level");
                Self(raw.clamp(0, 100) as u8)
            },
        }
    }

    /// Percentage value.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether the battery is fully charged.
    pub const fn is_full(self) -> bool {
        self.0 >= 100
    }
}

impl Default for BatteryLevel {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<i32> for BatteryLevel {
    type Error = SignalError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        u8::try_from(raw)
            .ok()
            .filter(|level| *level <= 100)
            .map(BatteryLevel)
            .ok_or(SignalError::BatteryLevelOutOfRange(raw))
    }
}

impl From<BatteryLevel> for i32 {
    fn from(level: BatteryLevel) -> Self {
        i32::from(level.0)
    }
}

/// Power source snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryInfo {
    /// Whether battery information is currently relevant to show.
    pub showable: bool,
    /// Whether external power is connected.
    pub plugged_in: bool,
    /// Charge level.
    pub level: BatteryLevel,
}

impl BatteryInfo {
    /// Snapshot from raw values.
    pub fn new(showable: bool, plugged_in: bool, level: BatteryLevel) -> Self {
        Self { showable, plugged_in, level }
    }
}

/// One auxiliary informational line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    /// Text to show.
    pub text: String,
    /// Icon drawn beside the text.
    pub icon: Icon,
}

impl StatusLine {
    fn charging(text: &str) -> Self {
        Self { text: text.to_string(), icon: Icon::Charging }
    }

    fn alarm(text: &str) -> Self {
        Self { text: text.to_string(), icon: Icon::Alarm }
    }
}

/// Charging description for a power snapshot.
///
/// `None` when battery info is not relevant. Unplugged with relevant info
/// always means a low battery, whatever the level.
pub fn charging_text(battery: &BatteryInfo, strings: &Strings) -> Option<String> {
    if !battery.showable {
        return None;
    }

    let text = if !battery.plugged_in {
        strings.low_battery.clone()
    } else if battery.level.is_full() {
        strings.charged.clone()
    } else {
        strings.plugged_in_at(battery.level.get())
    };
    Some(text)
}

/// Compose the ordered status lines, charging first.
pub fn compose(charging: Option<&str>, alarm: Option<&str>) -> Vec<StatusLine> {
    charging
        .map(StatusLine::charging)
        .into_iter()
        .chain(alarm.map(StatusLine::alarm))
        .collect()
}

/// Status lines to show for `status`. Empty when the status has no room for
/// them.
pub fn for_status(status: Status, charging: Option<&str>, alarm: Option<&str>) -> Vec<StatusLine> {
    if status.shows_status_lines() { compose(charging, alarm) } else { Vec::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery(showable: bool, plugged_in: bool, level: i32) -> BatteryInfo {
        BatteryInfo::new(showable, plugged_in, BatteryLevel::saturating(level))
    }

    #[test]
    fn composition_order() {
        assert!(compose(None, None).is_empty());
        assert_eq!(compose(Some("X"), None), vec![StatusLine::charging("X")]);
        assert_eq!(compose(None, Some("Y")), vec![StatusLine::alarm("Y")]);
        assert_eq!(compose(Some("X"), Some("Y")), vec![
            StatusLine { text: "X".into(), icon: Icon::Charging },
            StatusLine { text: "Y".into(), icon: Icon::Alarm },
        ]);
    }

    #[test]
    fn hidden_statuses_have_no_lines() {
        for status in Status::ALL {
            let lines = for_status(status, Some("X"), Some("Y"));
            assert_eq!(lines.is_empty(), !status.shows_status_lines(), "{status:?}");
        }
    }

    #[test]
    fn charging_sub_rule() {
        let strings = Strings::default();
        assert_eq!(charging_text(&battery(false, true, 50), &strings), None);
        assert_eq!(charging_text(&battery(true, true, 100), &strings).as_deref(), Some("Charged."));
        assert_eq!(
            charging_text(&battery(true, true, 99), &strings).as_deref(),
            Some("Charging (99%)")
        );
        assert_eq!(
            charging_text(&battery(true, false, 100), &strings).as_deref(),
            Some("Connect your charger.")
        );
        assert_eq!(
            charging_text(&battery(true, false, 3), &strings).as_deref(),
            Some("Connect your charger.")
        );
    }

    #[test]
    fn battery_level_bounds() {
        assert_eq!(BatteryLevel::try_from(0).map(BatteryLevel::get), Ok(0));
        assert_eq!(BatteryLevel::try_from(100).map(BatteryLevel::get), Ok(100));
        assert_eq!(BatteryLevel::try_from(101), Err(SignalError::BatteryLevelOutOfRange(101)));
        assert_eq!(BatteryLevel::try_from(-1), Err(SignalError::BatteryLevelOutOfRange(-1)));
        assert_eq!(BatteryLevel::saturating(250).get(), 100);
        assert_eq!(BatteryLevel::saturating(-4).get(), 0);
    }
}
