//! Fixed endpoints, timeouts and default paths.

use std::time::Duration;

pub const BASE_URL: &str = "https://gametora.com";

/// Support card pages live at `<SUPPORT_BASE_URL><slug>`.
pub const SUPPORT_BASE_URL: &str = "https://gametora.com/umamusume/supports/";

pub const SKILL_ICON_BASE_URL: &str = "https://gametora.com/images/umamusume/skill_icons";

/// Timeout for the skill list JSON and support card pages.
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for card image downloads.
pub const IMAGE_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_SKILLS_OUT: &str = "skills.json";
pub const DEFAULT_SUPPORTS_OUT: &str = "supports_events.json";
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Builds the page URL for a support card slug such as `30062-silence-suzuka`.
pub fn support_url(slug: &str) -> String {
    format!("{SUPPORT_BASE_URL}{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_url() {
        assert_eq!(
            support_url("30062-silence-suzuka"),
            "https://gametora.com/umamusume/supports/30062-silence-suzuka"
        );
    }
}
