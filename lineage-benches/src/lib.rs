//! Synthetic workloads shared by the lineage benchmarks.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// A layered ancestry: each element names up to `max_parents` elements from
/// the previous layer as its parents.
#[derive(Clone, Debug)]
pub struct LayeredLineage {
    /// `(element, parents)` pairs in registration order.
    pub elements: Vec<(usize, Vec<usize>)>,
}

impl LayeredLineage {
    /// Generates `layers` layers of `width` elements each.
    ///
    /// Identifiers are unique across layers, so parent lists only ever point
    /// backwards and the ancestry is acyclic.
    #[must_use]
    pub fn generate(layers: usize, width: usize, max_parents: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut elements = Vec::with_capacity(layers * width);
        for layer in 0..layers {
            for offset in 0..width {
                let element = layer * width + offset;
                let parents = if layer == 0 || width == 0 {
                    Vec::new()
                } else {
                    let count = rng.gen_range(1..=max_parents.max(1));
                    let base = (layer - 1) * width;
                    (0..count).map(|_| base + rng.gen_range(0..width)).collect()
                };
                elements.push((element, parents));
            }
        }
        Self { elements }
    }

    /// Number of elements in the workload.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` when the workload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
