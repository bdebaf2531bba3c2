//! Carrier text composition.

use serde::{Deserialize, Serialize};

/// Separator between network and service provider names. Downstream marquee
/// truncation relies on it.
pub const CARRIER_SEPARATOR: char = '|';

/// Network (PLMN) and service provider (SPN) names as last reported by
/// telephony. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierInfo {
    /// Public land mobile network name.
    pub plmn: Option<String>,
    /// Service provider name.
    pub spn: Option<String>,
}

impl CarrierInfo {
    /// Carrier info with both names.
    pub fn new(plmn: Option<impl Into<String>>, spn: Option<impl Into<String>>) -> Self {
        Self { plmn: plmn.map(Into::into), spn: spn.map(Into::into) }
    }

    /// Composed display string for these names.
    pub fn text(&self) -> String {
        carrier_text(self.plmn.as_deref(), self.spn.as_deref())
    }
}

/// Compose the carrier display string.
///
/// Both names are joined as `plmn|spn`; a single name is used as-is; no names
/// yield the empty string.
pub fn carrier_text(plmn: Option<&str>, spn: Option<&str>) -> String {
    match (plmn, spn) {
        (Some(plmn), Some(spn)) => format!("{plmn}{CARRIER_SEPARATOR}{spn}"),
        (Some(name), None) | (None, Some(name)) => name.to_string(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition() {
        assert_eq!(carrier_text(Some("A"), Some("B")), "A|B");
        assert_eq!(carrier_text(Some("A"), None), "A");
        assert_eq!(carrier_text(None, Some("B")), "B");
        assert_eq!(carrier_text(None, None), "");
    }

    #[test]
    fn empty_names_are_still_present() {
        assert_eq!(carrier_text(Some(""), Some("B")), "|B");
    }

    #[test]
    fn carrier_info_text() {
        let info = CarrierInfo::new(Some("Carrier"), None::<String>);
        assert_eq!(info.text(), "Carrier");
        assert_eq!(CarrierInfo::default().text(), "");
    }
}
