//! Lineage core library.
//!
//! A union-find backed node hierarchy that drives a lineage-keyed lazy cache.
//! Elements register their direct parents once; every element whose ordered
//! direct-parent list is identical shares a single cached payload.
//!
//! The crate is layered, each layer depending only on the one below:
//!
//! - [`DisjointForest`]: path-halving union-find over integer node ids.
//! - [`NodeHierarchy`]: explicit direct-parent edges over a strict forest,
//!   rejecting cyclic edges.
//! - [`LineageCache`]: maps serializable element identifiers onto hierarchy
//!   nodes and stores payloads by [`LineageKey`].
//!
//! # Cache metrics
//!
//! When the `metrics` feature is enabled the cache emits:
//!
//! - `lineage_cache_hits` (counter)
//! - `lineage_cache_misses` (counter)
//! - `lineage_cache_writes` (counter)
//!
//! # Examples
//! ```
//! use lineage_core::LineageCache;
//!
//! let mut cache = LineageCache::new();
//! cache.add_root("root")?;
//! cache.add_element("leaf_a", &["root"])?;
//! cache.add_element("leaf_b", &["root"])?;
//!
//! cache.set_data("leaf_a", 42)?;
//! assert_eq!(cache.get_data("leaf_b")?, Some(&42));
//! # Ok::<(), lineage_core::LineageError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cache;
mod error;
mod forest;
mod hierarchy;

#[cfg(test)]
mod test_utils;

pub use crate::{
    cache::{
        ElementKey, LineageCache, LineageCacheConfig, LineageKey, NodeState, to_key,
    },
    error::{HierarchyError, HierarchyErrorCode, LineageError, LineageErrorCode, Result},
    forest::{DisjointForest, NodeId, UnionStrategy},
    hierarchy::{CycleCheck, NodeHierarchy},
};
