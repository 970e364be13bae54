//! A/B experiment platform abstraction.

use serde::{Deserialize, Serialize};

/// Arm of an experiment a user is assigned to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variation {
    #[default]
    Control,
    Treatment(Option<String>),
}

/// Remote experiment assignment service.
///
/// `experiment` returns `None` when the platform has no assignment yet;
/// callers treat that as [`Variation::Control`].
pub trait ExperimentPlatform: Send + Sync {
    /// Register the experiment names the app wants assignments for.
    fn register(&self, experiment_names: &[&str]);

    /// Fetch fresh assignments for the registered experiments.
    fn refresh(&self);

    /// Current assignment for an experiment.
    fn experiment(&self, name: &str) -> Option<Variation>;
}
