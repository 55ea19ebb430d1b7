//! Shared test utilities for `lineage-core`.

use lineage_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// Keeps property suites aligned on the same `PROGTEST_CASES` and
/// `LINEAGE_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Naive connectivity oracle: labels every node with its component id by
/// flooding merges through a flat label table.
#[derive(Clone, Debug)]
pub(crate) struct LabelOracle {
    labels: Vec<usize>,
}

impl LabelOracle {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            labels: (0..node_count).collect(),
        }
    }

    pub(crate) fn merge(&mut self, left: usize, right: usize) {
        let from = self.labels[left];
        let to = self.labels[right];
        if from == to {
            return;
        }
        for label in &mut self.labels {
            if *label == from {
                *label = to;
            }
        }
    }

    pub(crate) fn connected(&self, left: usize, right: usize) -> bool {
        self.labels[left] == self.labels[right]
    }
}
