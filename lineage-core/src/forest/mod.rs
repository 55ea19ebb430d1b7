//! Disjoint-set forest over lazily created integer nodes.
//!
//! Nodes are created on first reference, so callers never have to size the
//! structure up front. Root lookup applies path halving: every visited node is
//! re-pointed at its grandparent before the walk advances, flattening chains
//! over repeated queries without changing which component a node belongs to.
//!
//! Unions either keep the larger tree's root ([`UnionStrategy::BySize`]) or
//! always keep the parent's root ([`UnionStrategy::Strict`]). The strict form
//! sacrifices balance so the caller-specified parent always ends up above the
//! child in the canonical structure.

use std::collections::HashMap;

/// Canonical integer identity of a node.
pub type NodeId = usize;

/// Selects which root survives when two trees are joined.
///
/// # Examples
/// ```
/// use lineage_core::{DisjointForest, UnionStrategy};
///
/// let mut forest = DisjointForest::new(UnionStrategy::Strict);
/// forest.join(1, 2);
/// forest.join(3, 2);
/// // A single-node tree still absorbs the larger one under strict unions.
/// assert_eq!(forest.join(2, 9), 9);
/// assert_eq!(forest.find_root(1), 9);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum UnionStrategy {
    /// The larger tree absorbs the smaller one; ties keep the parent's root.
    #[default]
    BySize,
    /// The parent's root always survives, regardless of tree sizes.
    Strict,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Slot {
    root: NodeId,
    size: usize,
}

impl Slot {
    const fn singleton(node: NodeId) -> Self {
        Self {
            root: node,
            size: 1,
        }
    }
}

/// Path-halving union-find over sparse node ids.
///
/// # Examples
/// ```
/// use lineage_core::DisjointForest;
///
/// let mut forest = DisjointForest::default();
/// forest.join(0, 1);
/// assert!(forest.is_connected(0, 1));
/// assert!(!forest.is_connected(0, 2));
/// assert_eq!(forest.tree_size(1), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DisjointForest {
    slots: HashMap<NodeId, Slot>,
    strategy: UnionStrategy,
}

impl DisjointForest {
    /// Creates an empty forest using `strategy` for every union.
    #[must_use]
    pub fn new(strategy: UnionStrategy) -> Self {
        Self {
            slots: HashMap::new(),
            strategy,
        }
    }

    /// Returns the union strategy fixed at construction.
    #[must_use]
    pub fn strategy(&self) -> UnionStrategy {
        self.strategy
    }

    /// Number of nodes known to the forest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when no node has been referenced yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if `node` has been referenced before.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.slots.contains_key(&node)
    }

    /// Registers `node` as a singleton tree if it is unseen.
    ///
    /// Returns `true` when the node was created by this call and `false` when
    /// it already existed. Never fails on a known node.
    pub fn is_new_tree(&mut self, node: NodeId) -> bool {
        if self.slots.contains_key(&node) {
            return false;
        }
        self.slots.insert(node, Slot::singleton(node));
        true
    }

    /// Returns the canonical root of the tree containing `node`.
    ///
    /// Unseen nodes are created as their own root.
    pub fn find_root(&mut self, node: NodeId) -> NodeId {
        if self.is_new_tree(node) {
            return node;
        }
        let mut current = node;
        loop {
            let parent = self.root_of(current);
            if parent == current {
                return current;
            }
            let grandparent = self.root_of(parent);
            if let Some(slot) = self.slots.get_mut(&current) {
                slot.root = grandparent;
            }
            current = grandparent;
        }
    }

    /// Returns `true` if `left` and `right` share a root.
    pub fn is_connected(&mut self, left: NodeId, right: NodeId) -> bool {
        self.find_root(left) == self.find_root(right)
    }

    /// Merges the trees of `child` and `parent`, returning the surviving root.
    ///
    /// Joining two nodes that are already connected is a no-op.
    pub fn join(&mut self, child: NodeId, parent: NodeId) -> NodeId {
        let child_root = self.find_root(child);
        let parent_root = self.find_root(parent);
        if child_root == parent_root {
            return parent_root;
        }

        let (surviving, absorbed) = match self.strategy {
            UnionStrategy::Strict => (parent_root, child_root),
            UnionStrategy::BySize if self.size_at(parent_root) < self.size_at(child_root) => {
                (child_root, parent_root)
            }
            UnionStrategy::BySize => (parent_root, child_root),
        };

        let absorbed_size = self.size_at(absorbed);
        if let Some(slot) = self.slots.get_mut(&absorbed) {
            slot.root = surviving;
        }
        if let Some(slot) = self.slots.get_mut(&surviving) {
            slot.size += absorbed_size;
        }
        surviving
    }

    /// Size of the tree containing `node`, or `0` for unseen nodes.
    ///
    /// Read-only: no path halving is applied.
    #[must_use]
    pub fn tree_size(&self, node: NodeId) -> usize {
        if !self.contains(node) {
            return 0;
        }
        let mut current = node;
        loop {
            let parent = self.root_of(current);
            if parent == current {
                return self.size_at(current);
            }
            current = parent;
        }
    }

    /// Number of distinct trees in the forest.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|(node, slot)| **node == slot.root)
            .count()
    }

    fn root_of(&self, node: NodeId) -> NodeId {
        self.slots.get(&node).map_or(node, |slot| slot.root)
    }

    fn size_at(&self, root: NodeId) -> usize {
        self.slots.get(&root).map_or(0, |slot| slot.size)
    }
}
