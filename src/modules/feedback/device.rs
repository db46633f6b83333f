//! User-agent based device classification.

use std::sync::LazyLock;

use regex::Regex;

use super::model::DeviceType;

static TABLET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tablet|ipad|playbook|silk").expect("valid tablet pattern"));

static MOBILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)mobile|iphone|ipod|android|blackberry|opera|mini|windows\sce|palm|smartphone|iemobile",
    )
    .expect("valid mobile pattern")
});

/// Tablet patterns win over mobile ones, anything unrecognised is a desktop.
pub fn classify_device(user_agent: &str) -> DeviceType {
    if TABLET_PATTERN.is_match(user_agent) {
        return DeviceType::Tablet;
    }
    if MOBILE_PATTERN.is_match(user_agent) {
        return DeviceType::Mobile;
    }
    DeviceType::Desktop
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipad_is_tablet_even_though_mobile_matches() {
        let ua = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
        assert_eq!(classify_device(ua), DeviceType::Tablet);
    }

    #[test]
    fn test_kindle_silk_is_tablet() {
        assert_eq!(
            classify_device("Mozilla/5.0 (Linux; Android 9; KFTRWI) Silk/120.2.4"),
            DeviceType::Tablet
        );
    }

    #[test]
    fn test_android_phone_is_mobile() {
        let ua = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/124.0 Mobile Safari/537.36";
        assert_eq!(classify_device(ua), DeviceType::Mobile);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify_device("SOME IPHONE CLIENT"), DeviceType::Mobile);
        assert_eq!(classify_device("Windows CE device"), DeviceType::Mobile);
    }

    #[test]
    fn test_desktop_default() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/124.0 Safari/537.36";
        assert_eq!(classify_device(ua), DeviceType::Desktop);
        assert_eq!(classify_device(""), DeviceType::Desktop);
    }
}
