//! Structural key encoding for element identifiers and lineages.
//!
//! Identifiers are encoded with `serde_json`, so two values that serialize
//! identically resolve to the same key. Identifiers containing maps should use
//! ordered maps (`BTreeMap`) to keep the encoding deterministic.

use std::fmt;

use serde::Serialize;

use crate::{Result, forest::NodeId};

/// Deterministic encoding of a caller-supplied element identifier.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ElementKey(String);

impl ElementKey {
    /// Returns the encoded form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deterministic encoding of a node's ordered direct-parent list.
///
/// Elements whose direct parents match in content and order share a key and
/// therefore a cache slot.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LineageKey(String);

impl LineageKey {
    pub(crate) fn from_parents<'a, I>(parents: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let parents: Vec<NodeId> = parents.into_iter().copied().collect();
        Ok(Self(serde_json::to_string(&parents)?))
    }

    /// Returns the encoded form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encodes `value` into an [`ElementKey`].
///
/// # Errors
/// Returns [`crate::LineageError::KeyEncoding`] when the value cannot be
/// serialized, for example a map with non-string keys.
///
/// # Examples
/// ```
/// use lineage_core::to_key;
///
/// let left = to_key(&("row", 3))?;
/// let right = to_key(&("row", 3))?;
/// assert_eq!(left, right);
/// assert_ne!(left, to_key(&("row", 4))?);
/// # Ok::<(), lineage_core::LineageError>(())
/// ```
pub fn to_key<T>(value: &T) -> Result<ElementKey>
where
    T: Serialize + ?Sized,
{
    Ok(ElementKey(serde_json::to_string(value)?))
}
