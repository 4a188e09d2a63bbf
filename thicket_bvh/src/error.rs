// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by [`build`](crate::build) before any work is done.

use core::fmt;

/// A [`BuildConfig`](crate::BuildConfig) that violates its invariants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `min_primitives` is larger than `max_primitives`.
    MinAboveMax {
        /// The offending minimum.
        min_primitives: u32,
        /// The offending maximum.
        max_primitives: u32,
    },
    /// `max_primitives` is zero.
    ZeroMaxPrimitives,
    /// `traversal_cost` is negative, infinite or NaN.
    InvalidTraversalCost(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinAboveMax {
                min_primitives,
                max_primitives,
            } => write!(
                f,
                "min_primitives ({min_primitives}) exceeds max_primitives ({max_primitives})"
            ),
            Self::ZeroMaxPrimitives => f.write_str("max_primitives must be at least 1"),
            Self::InvalidTraversalCost(cost) => {
                write!(f, "traversal_cost must be finite and non-negative, got {cost}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Reasons a hierarchy could not be built.
///
/// No partial hierarchy is ever produced: every check runs before the build starts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BuildError {
    /// The configuration is invalid.
    InvalidConfiguration(ConfigError),
    /// `count` is too large for 32-bit node and primitive indices.
    CapacityOverflow {
        /// Requested primitive count.
        count: usize,
    },
    /// The input slices hold fewer than `count` entries.
    InputTooShort {
        /// Requested primitive count.
        count: usize,
        /// Length of the boxes slice.
        boxes: usize,
        /// Length of the centroids slice.
        centers: usize,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(_) => f.write_str("invalid build configuration"),
            Self::CapacityOverflow { count } => {
                write!(f, "{count} primitives exceed the 32-bit node index range")
            }
            Self::InputTooShort {
                count,
                boxes,
                centers,
            } => write!(
                f,
                "expected at least {count} boxes and centroids, got {boxes} boxes and {centers} centroids"
            ),
        }
    }
}

impl core::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidConfiguration(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for BuildError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfiguration(e)
    }
}
