//! Lineage-keyed lazy cache over a [`NodeHierarchy`].
//!
//! Caller identifiers are encoded into [`ElementKey`]s and mapped onto
//! hierarchy nodes allocated from a monotonic counter. An element named only
//! as somebody else's parent is created [`NodeState::Provisional`]; it becomes
//! [`NodeState::Enabled`] once the caller adds it explicitly. Provisional
//! nodes take part in ancestry bookkeeping straight away but cannot receive
//! cached data.
//!
//! Payloads are stored under the [`LineageKey`] of an element's ordered direct
//! parents rather than under the element itself, so siblings share one slot.
//! Entries never expire; build a fresh cache to invalidate.

mod config;
mod key;

use std::collections::{HashMap, hash_map::Entry};

use serde::Serialize;
use tracing::{instrument, trace};

use crate::{
    Result,
    error::LineageError,
    forest::NodeId,
    hierarchy::NodeHierarchy,
};

pub use self::{
    config::LineageCacheConfig,
    key::{ElementKey, LineageKey, to_key},
};

/// Registration state of an element's node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeState {
    /// Known only because another element named it as a parent.
    Provisional,
    /// Explicitly added through [`LineageCache::add_element`].
    Enabled,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct NodeEntry {
    node: NodeId,
    state: NodeState,
}

/// Shares cached payloads among elements with identical direct parents.
///
/// # Examples
/// ```
/// use lineage_core::{LineageCache, LineageError};
///
/// let mut cache = LineageCache::new();
/// cache.add_element("x", &["p", "q"])?;
/// cache.add_element("y", &["p", "q"])?;
/// cache.add_element("z", &["q"])?;
///
/// cache.set_data("x", "layout")?;
/// assert_eq!(cache.get_data("y")?, Some(&"layout"));
/// assert_eq!(cache.get_data("z")?, None);
///
/// // "p" is only provisional until it is added itself.
/// assert!(matches!(
///     cache.set_data("p", "root"),
///     Err(LineageError::ElementNotRegistered { .. })
/// ));
/// # Ok::<(), LineageError>(())
/// ```
#[derive(Clone, Debug)]
pub struct LineageCache<V> {
    hierarchy: NodeHierarchy,
    elements: HashMap<ElementKey, NodeEntry>,
    next_node: NodeId,
    data: HashMap<LineageKey, V>,
    config: LineageCacheConfig,
}

impl<V> Default for LineageCache<V> {
    fn default() -> Self {
        Self::with_config(LineageCacheConfig::default())
    }
}

impl<V> LineageCache<V> {
    /// Creates an empty cache with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache using `config`.
    #[must_use]
    pub fn with_config(config: LineageCacheConfig) -> Self {
        Self {
            hierarchy: NodeHierarchy::with_cycle_check(config.cycle_check()),
            elements: HashMap::with_capacity(config.capacity()),
            next_node: 0,
            data: HashMap::new(),
            config,
        }
    }

    /// Returns the configuration the cache was built with.
    #[must_use]
    pub fn config(&self) -> &LineageCacheConfig {
        &self.config
    }

    /// Read-only view of the backing hierarchy.
    #[must_use]
    pub fn hierarchy(&self) -> &NodeHierarchy {
        &self.hierarchy
    }

    /// Number of known elements, provisional ones included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of populated lineage slots.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.data.len()
    }

    /// Returns the node assigned to `element`, provisional or enabled.
    ///
    /// # Errors
    /// Returns [`LineageError::KeyEncoding`] if `element` cannot be encoded.
    pub fn node_of<E>(&self, element: &E) -> Result<Option<NodeId>>
    where
        E: Serialize + ?Sized,
    {
        let key = to_key(element)?;
        Ok(self.elements.get(&key).map(|entry| entry.node))
    }

    /// Returns the registration state of `element`, if known.
    ///
    /// # Errors
    /// Returns [`LineageError::KeyEncoding`] if `element` cannot be encoded.
    pub fn state<E>(&self, element: &E) -> Result<Option<NodeState>>
    where
        E: Serialize + ?Sized,
    {
        let key = to_key(element)?;
        Ok(self.elements.get(&key).map(|entry| entry.state))
    }

    /// Returns `true` if `element` has been seen, even provisionally.
    ///
    /// # Errors
    /// Returns [`LineageError::KeyEncoding`] if `element` cannot be encoded.
    pub fn contains<E>(&self, element: &E) -> Result<bool>
    where
        E: Serialize + ?Sized,
    {
        Ok(self.node_of(element)?.is_some())
    }

    /// Adds `element` with no parents.
    ///
    /// # Errors
    /// Returns [`LineageError::KeyEncoding`] if `element` cannot be encoded.
    pub fn add_root<E>(&mut self, element: &E) -> Result<()>
    where
        E: Serialize + ?Sized,
    {
        let key = to_key(element)?;
        self.add_element_with_keys(key, Vec::new())
    }

    /// Adds `element` and records each of `parents` as a direct parent.
    ///
    /// Parents that have not been seen before are created provisionally.
    /// Adding an element again only appends parents it does not have yet.
    ///
    /// # Errors
    /// Returns [`LineageError::KeyEncoding`] if an identifier cannot be
    /// encoded, or [`LineageError::Hierarchy`] when a parent edge would close
    /// a cycle. Edges registered before the rejected one are kept.
    pub fn add_element<E, P>(&mut self, element: &E, parents: &[P]) -> Result<()>
    where
        E: Serialize + ?Sized,
        P: Serialize,
    {
        let key = to_key(element)?;
        let parent_keys = parents.iter().map(to_key).collect::<Result<Vec<_>>>()?;
        self.add_element_with_keys(key, parent_keys)
    }

    #[instrument(
        name = "lineage.add_element",
        err,
        skip_all,
        fields(element = %key, parents = parents.len()),
    )]
    fn add_element_with_keys(&mut self, key: ElementKey, parents: Vec<ElementKey>) -> Result<()> {
        let node = self.resolve_or_create(key.clone());
        self.enable_node(&key);
        // All parents are resolved before the first edge is added.
        let parent_nodes: Vec<NodeId> = parents
            .into_iter()
            .map(|parent_key| self.resolve_or_create(parent_key))
            .collect();
        for parent in parent_nodes {
            self.hierarchy.add_parent(node, parent)?;
        }
        Ok(())
    }

    /// Returns `true` if `ancestor` is a direct or transitive parent of
    /// `element`.
    ///
    /// # Errors
    /// Returns [`LineageError::ElementNotRegistered`] if either identifier has
    /// never been seen.
    pub fn is_ancestor<E, A>(&self, element: &E, ancestor: &A) -> Result<bool>
    where
        E: Serialize + ?Sized,
        A: Serialize + ?Sized,
    {
        let node = self.known_entry(to_key(element)?)?.node;
        let ancestor = self.known_entry(to_key(ancestor)?)?.node;
        Ok(self.hierarchy.is_ancestor(node, ancestor))
    }

    /// Returns the lineage key addressing `element`'s cache slot.
    ///
    /// # Errors
    /// Returns [`LineageError::ElementNotRegistered`] if `element` has never
    /// been seen.
    pub fn lineage_key<E>(&self, element: &E) -> Result<LineageKey>
    where
        E: Serialize + ?Sized,
    {
        let entry = self.known_entry(to_key(element)?)?;
        self.lineage_of(entry.node)
    }

    /// Returns the payload cached for `element`'s lineage.
    ///
    /// `Ok(None)` means nothing has been computed for the lineage yet.
    /// Provisional elements may be queried.
    ///
    /// # Errors
    /// Returns [`LineageError::ElementNotRegistered`] if `element` has never
    /// been seen.
    pub fn get_data<E>(&self, element: &E) -> Result<Option<&V>>
    where
        E: Serialize + ?Sized,
    {
        let lineage = self.lineage_key(element)?;
        let found = self.data.get(&lineage);
        if found.is_some() {
            trace!(lineage = %lineage, "lineage cache hit");
            record_hit();
        } else {
            trace!(lineage = %lineage, "lineage cache miss");
            record_miss();
        }
        Ok(found)
    }

    /// Stores `value` for `element`'s lineage, returning the payload it
    /// replaced.
    ///
    /// # Errors
    /// Returns [`LineageError::ElementNotRegistered`] if `element` is unseen
    /// or still provisional.
    pub fn set_data<E>(&mut self, element: &E, value: V) -> Result<Option<V>>
    where
        E: Serialize + ?Sized,
    {
        let key = to_key(element)?;
        self.set_data_with_key(key, value)
    }

    #[instrument(name = "lineage.set_data", err, skip_all, fields(element = %key))]
    fn set_data_with_key(&mut self, key: ElementKey, value: V) -> Result<Option<V>> {
        let lineage = self.enabled_lineage(key)?;
        record_write();
        Ok(self.data.insert(lineage, value))
    }

    /// Returns the payload for `element`'s lineage, computing and storing it
    /// with `compute` on a miss.
    ///
    /// # Errors
    /// Returns [`LineageError::ElementNotRegistered`] if `element` is unseen
    /// or still provisional.
    pub fn get_or_insert_with<E, F>(&mut self, element: &E, compute: F) -> Result<&V>
    where
        E: Serialize + ?Sized,
        F: FnOnce() -> V,
    {
        let key = to_key(element)?;
        let lineage = self.fill_lineage(key.clone(), compute)?;
        self.data
            .get(&lineage)
            .ok_or(LineageError::ElementNotRegistered { key })
    }

    #[instrument(
        name = "lineage.get_or_insert_with",
        err,
        skip_all,
        fields(element = %key),
    )]
    fn fill_lineage<F>(&mut self, key: ElementKey, compute: F) -> Result<LineageKey>
    where
        F: FnOnce() -> V,
    {
        let lineage = self.enabled_lineage(key)?;
        match self.data.entry(lineage.clone()) {
            Entry::Occupied(_) => {
                trace!(lineage = %lineage, "lineage cache hit");
                record_hit();
            }
            Entry::Vacant(slot) => {
                trace!(lineage = %lineage, "lineage cache miss, computing payload");
                record_miss();
                record_write();
                slot.insert(compute());
            }
        }
        Ok(lineage)
    }

    fn known_entry(&self, key: ElementKey) -> Result<NodeEntry> {
        self.elements
            .get(&key)
            .copied()
            .ok_or(LineageError::ElementNotRegistered { key })
    }

    fn enabled_lineage(&self, key: ElementKey) -> Result<LineageKey> {
        match self.elements.get(&key) {
            Some(entry) if entry.state == NodeState::Enabled => self.lineage_of(entry.node),
            _ => Err(LineageError::ElementNotRegistered { key }),
        }
    }

    fn lineage_of(&self, node: NodeId) -> Result<LineageKey> {
        LineageKey::from_parents(self.hierarchy.get_parents(node))
    }

    fn resolve_or_create(&mut self, key: ElementKey) -> NodeId {
        match self.elements.get(&key) {
            Some(entry) => entry.node,
            None => self.create_node(key),
        }
    }

    fn create_node(&mut self, key: ElementKey) -> NodeId {
        let node = self.next_node;
        self.next_node += 1;
        self.hierarchy.add_node(node);
        trace!(element = %key, node, "created provisional node");
        self.elements.insert(
            key,
            NodeEntry {
                node,
                state: NodeState::Provisional,
            },
        );
        node
    }

    fn enable_node(&mut self, key: &ElementKey) {
        if let Some(entry) = self.elements.get_mut(key)
            && entry.state == NodeState::Provisional
        {
            entry.state = NodeState::Enabled;
            trace!(element = %key, node = entry.node, "enabled node");
        }
    }
}

#[cfg(feature = "metrics")]
fn record_hit() {
    metrics::counter!("lineage_cache_hits").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_hit() {}

#[cfg(feature = "metrics")]
fn record_miss() {
    metrics::counter!("lineage_cache_misses").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_miss() {}

#[cfg(feature = "metrics")]
fn record_write() {
    metrics::counter!("lineage_cache_writes").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_write() {}
