//! Error types for the lineage core library.
//!
//! Defines the error enums exposed by the hierarchy and cache layers, their
//! stable machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::{cache::ElementKey, forest::NodeId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $pattern:tt => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $pattern => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors raised by [`crate::NodeHierarchy`] when registering edges.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HierarchyError {
    /// Adding the edge would make `child` an ancestor of itself.
    #[error("adding parent {parent} to node {child} would create a cycle")]
    CycleDetected {
        /// Node that was to receive the new parent.
        child: NodeId,
        /// Proposed parent that already descends from `child`.
        parent: NodeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`HierarchyError`] variants.
    enum HierarchyErrorCode for HierarchyError {
        /// Adding the edge would create a cycle.
        CycleDetected => CycleDetected { .. } => "HIERARCHY_CYCLE_DETECTED",
    }
}

/// Error type produced by [`crate::LineageCache`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LineageError {
    /// The element was never added, or only appeared as another element's
    /// parent when explicit registration is required.
    #[error("element {key} has not been registered")]
    ElementNotRegistered {
        /// Encoded identifier of the offending element.
        key: ElementKey,
    },
    /// An element identifier could not be encoded into a key.
    #[error("failed to encode element identifier: {reason}")]
    KeyEncoding {
        /// Message reported by the encoder.
        reason: String,
    },
    /// The underlying hierarchy rejected a parent edge.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

define_error_codes! {
    /// Stable codes describing [`LineageError`] variants.
    enum LineageErrorCode for LineageError {
        /// The element has not been registered.
        ElementNotRegistered => ElementNotRegistered { .. } => "LINEAGE_ELEMENT_NOT_REGISTERED",
        /// An element identifier could not be encoded.
        KeyEncoding => KeyEncoding { .. } => "LINEAGE_KEY_ENCODING",
        /// The hierarchy rejected a parent edge.
        Hierarchy => Hierarchy(..) => "LINEAGE_HIERARCHY",
    }
}

impl From<serde_json::Error> for LineageError {
    fn from(error: serde_json::Error) -> Self {
        Self::KeyEncoding {
            reason: error.to_string(),
        }
    }
}

/// Convenient result alias for cache operations.
pub type Result<T, E = LineageError> = core::result::Result<T, E>;
