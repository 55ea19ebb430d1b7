//! Node hierarchy with explicit direct-parent edges.
//!
//! The hierarchy layers ordered, queryable parent edges over a strict
//! [`DisjointForest`]: every accepted edge also joins the child's tree under
//! the parent's root, so connectivity queries stay cheap while the direct
//! edges remain available for lineage lookups.
//!
//! Edges only grow. An edge is rejected with
//! [`HierarchyError::CycleDetected`] when the proposed parent already descends
//! from the child; [`CycleCheck`] selects whether only direct mutual parents
//! or the full ancestry is inspected.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use tracing::debug;

use crate::{
    error::HierarchyError,
    forest::{DisjointForest, NodeId, UnionStrategy},
};

/// How far [`NodeHierarchy::add_parent`] looks for an existing reverse path.
///
/// # Examples
/// ```
/// use lineage_core::{CycleCheck, HierarchyError, NodeHierarchy};
///
/// let mut direct = NodeHierarchy::default();
/// direct.add_parent(1, 2)?;
/// direct.add_parent(2, 3)?;
/// // Only two-node cycles are caught by the direct check.
/// assert!(direct.add_parent(3, 1).is_ok());
///
/// let mut transitive = NodeHierarchy::with_cycle_check(CycleCheck::Transitive);
/// transitive.add_parent(1, 2)?;
/// transitive.add_parent(2, 3)?;
/// assert!(transitive.add_parent(3, 1).is_err());
/// # Ok::<(), HierarchyError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CycleCheck {
    /// Reject an edge only when the child is already a direct parent of the
    /// proposed parent.
    #[default]
    Direct,
    /// Reject an edge whenever the child is any ancestor of the proposed
    /// parent.
    Transitive,
}

/// Multi-parent ancestry graph backed by a strict union-find forest.
#[derive(Clone, Debug)]
pub struct NodeHierarchy {
    forest: DisjointForest,
    direct_parents: HashMap<NodeId, IndexSet<NodeId>>,
    cycle_check: CycleCheck,
    empty: IndexSet<NodeId>,
}

impl Default for NodeHierarchy {
    fn default() -> Self {
        Self::with_cycle_check(CycleCheck::default())
    }
}

impl NodeHierarchy {
    /// Creates an empty hierarchy with direct cycle detection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty hierarchy using the supplied cycle policy.
    #[must_use]
    pub fn with_cycle_check(cycle_check: CycleCheck) -> Self {
        Self {
            forest: DisjointForest::new(UnionStrategy::Strict),
            direct_parents: HashMap::new(),
            cycle_check,
            empty: IndexSet::new(),
        }
    }

    /// Returns the cycle policy applied to new edges.
    #[must_use]
    pub fn cycle_check(&self) -> CycleCheck {
        self.cycle_check
    }

    /// Read-only view of the underlying forest.
    #[must_use]
    pub fn forest(&self) -> &DisjointForest {
        &self.forest
    }

    /// Number of nodes registered in the hierarchy.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forest.len()
    }

    /// Returns `true` when no node has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// Returns `true` if `node` has been registered.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.forest.contains(node)
    }

    /// Registers `node` without creating any parent edge.
    ///
    /// Equivalent to `add_parent(node, node)`, which can never be rejected
    /// because a node is never recorded as its own parent.
    pub fn add_node(&mut self, node: NodeId) {
        self.forest.is_new_tree(node);
    }

    /// Records `parent` as a direct parent of `child`.
    ///
    /// Registering an existing edge again is a no-op. Passing the same node as
    /// both arguments only registers it.
    ///
    /// # Errors
    /// Returns [`HierarchyError::CycleDetected`] when `child` is already a
    /// direct parent of `parent` (or, under [`CycleCheck::Transitive`], any
    /// ancestor of it). The hierarchy is left unchanged.
    pub fn add_parent(&mut self, child: NodeId, parent: NodeId) -> Result<(), HierarchyError> {
        if self.is_child(child, parent) {
            return Ok(());
        }
        if self.closes_cycle(child, parent) {
            debug!(child, parent, "rejecting edge that would close a cycle");
            return Err(HierarchyError::CycleDetected { child, parent });
        }

        self.forest.is_new_tree(child);
        self.forest.is_new_tree(parent);
        if child != parent {
            self.direct_parents.entry(child).or_default().insert(parent);
        }
        self.forest.join(child, parent);
        Ok(())
    }

    /// Returns `true` if `parent` is a registered direct parent of `node`.
    ///
    /// Transitive ancestry is not considered; see
    /// [`NodeHierarchy::is_ancestor`].
    #[must_use]
    pub fn is_child(&self, node: NodeId, parent: NodeId) -> bool {
        self.direct_parents
            .get(&node)
            .is_some_and(|parents| parents.contains(&parent))
    }

    /// Direct parents of `node` in registration order.
    ///
    /// Unseen nodes and nodes without parents yield an empty set.
    #[must_use]
    pub fn get_parents(&self, node: NodeId) -> &IndexSet<NodeId> {
        self.direct_parents.get(&node).unwrap_or(&self.empty)
    }

    /// Returns `true` if `ancestor` is reachable from `node` by following
    /// direct-parent edges one or more times.
    #[must_use]
    pub fn is_ancestor(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut pending: Vec<NodeId> = self.get_parents(node).iter().copied().collect();
        let mut visited = HashSet::new();
        while let Some(current) = pending.pop() {
            if current == ancestor {
                return true;
            }
            if visited.insert(current) {
                pending.extend(self.get_parents(current).iter().copied());
            }
        }
        false
    }

    /// Returns the canonical root of the tree containing `node`.
    pub fn find_root(&mut self, node: NodeId) -> NodeId {
        self.forest.find_root(node)
    }

    /// Returns `true` if both nodes belong to the same tree.
    pub fn is_connected(&mut self, left: NodeId, right: NodeId) -> bool {
        self.forest.is_connected(left, right)
    }

    fn closes_cycle(&self, child: NodeId, parent: NodeId) -> bool {
        match self.cycle_check {
            CycleCheck::Direct => self.is_child(parent, child),
            CycleCheck::Transitive => child != parent && self.is_ancestor(parent, child),
        }
    }
}
