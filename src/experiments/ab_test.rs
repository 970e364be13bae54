//! A/B experiments the app asks the experiment platform about.

use tracing::debug;

use crate::config::AppFlavor;
use crate::traits::{ExperimentPlatform, Variation};

/// Known experiments. Experiments only run in the WordPress app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbTest {
    Unknown,
    SiteNameV1,
}

impl AbTest {
    pub const ALL: [AbTest; 2] = [AbTest::Unknown, AbTest::SiteNameV1];

    /// Experiment name on the platform
    pub fn name(&self) -> &'static str {
        match self {
            AbTest::Unknown => "unknown",
            AbTest::SiteNameV1 => "wpios_site_name_v1",
        }
    }

    /// Assigned variation, [`Variation::Control`] until the platform knows
    pub fn variation(&self, platform: &dyn ExperimentPlatform) -> Variation {
        platform.experiment(self.name()).unwrap_or_default()
    }

    /// Register every real experiment and fetch assignments.
    ///
    /// Does nothing unless an experiment besides `Unknown` exists, the user
    /// is logged in, and this is the WordPress app. Returns whether it ran.
    pub fn start(platform: &dyn ExperimentPlatform, is_logged_in: bool, flavor: AppFlavor) -> bool {
        if Self::ALL.len() <= 1 || !is_logged_in || flavor != AppFlavor::WordPress {
            debug!(is_logged_in, ?flavor, "Experiments not started");
            return false;
        }

        let names: Vec<&str> = Self::ALL
            .iter()
            .filter(|test| **test != AbTest::Unknown)
            .map(AbTest::name)
            .collect();
        platform.register(&names);
        platform.refresh();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::RecordingExperimentPlatform;

    #[test]
    fn test_names() {
        assert_eq!(AbTest::Unknown.name(), "unknown");
        assert_eq!(AbTest::SiteNameV1.name(), "wpios_site_name_v1");
    }

    #[test]
    fn test_variation_defaults_to_control() {
        let platform = RecordingExperimentPlatform::new();
        assert_eq!(AbTest::SiteNameV1.variation(&platform), Variation::Control);

        platform.assign(
            "wpios_site_name_v1",
            Variation::Treatment(Some("short".to_string())),
        );
        assert_eq!(
            AbTest::SiteNameV1.variation(&platform),
            Variation::Treatment(Some("short".to_string()))
        );
    }

    #[test]
    fn test_start_registers_known_experiments() {
        let platform = RecordingExperimentPlatform::new();
        assert!(AbTest::start(&platform, true, AppFlavor::WordPress));
        assert_eq!(platform.registered(), vec!["wpios_site_name_v1".to_string()]);
        assert_eq!(platform.refresh_count(), 1);
    }

    #[test]
    fn test_start_requires_login() {
        let platform = RecordingExperimentPlatform::new();
        assert!(!AbTest::start(&platform, false, AppFlavor::WordPress));
        assert!(platform.registered().is_empty());
        assert_eq!(platform.refresh_count(), 0);
    }

    #[test]
    fn test_start_skipped_in_jetpack() {
        let platform = RecordingExperimentPlatform::new();
        assert!(!AbTest::start(&platform, true, AppFlavor::Jetpack));
        assert_eq!(platform.refresh_count(), 0);
    }
}
