//! Experiment platform double that records registrations and refreshes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ExperimentPlatform, Variation};

#[derive(Debug, Clone, Default)]
pub struct RecordingExperimentPlatform {
    registered: Arc<Mutex<Vec<String>>>,
    refresh_count: Arc<Mutex<usize>>,
    assignments: Arc<Mutex<HashMap<String, Variation>>>,
}

impl RecordingExperimentPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a variation that `experiment` will report.
    pub fn assign(&self, name: &str, variation: Variation) {
        self.assignments
            .lock()
            .unwrap()
            .insert(name.to_string(), variation);
    }

    pub fn registered(&self) -> Vec<String> {
        self.registered.lock().unwrap().clone()
    }

    pub fn refresh_count(&self) -> usize {
        *self.refresh_count.lock().unwrap()
    }
}

impl ExperimentPlatform for RecordingExperimentPlatform {
    fn register(&self, experiment_names: &[&str]) {
        let mut registered = self.registered.lock().unwrap();
        registered.extend(experiment_names.iter().map(|n| n.to_string()));
    }

    fn refresh(&self) {
        *self.refresh_count.lock().unwrap() += 1;
    }

    fn experiment(&self, name: &str) -> Option<Variation> {
        self.assignments.lock().unwrap().get(name).cloned()
    }
}
