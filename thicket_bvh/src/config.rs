// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build parameters and the named presets.

use crate::error::ConfigError;

/// Parameters controlling when the builder stops subdividing.
///
/// Construct one from a preset and adjust it with the `with_*` setters:
///
/// ```rust
/// use thicket_bvh::BuildConfig;
///
/// let config = BuildConfig::TOP_LEVEL.with_max_primitives(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildConfig {
    /// Ranges with at most this many primitives always become leaves.
    pub min_primitives: u32,
    /// Ranges with more primitives than this are split even when the SAH finds
    /// no profitable split.
    pub max_primitives: u32,
    /// Cost of visiting an internal node relative to testing one primitive.
    pub traversal_cost: f32,
}

impl BuildConfig {
    /// Profile for per-mesh (bottom-level) hierarchies: `2 / 8 / 20.0`.
    pub const BOTTOM_LEVEL: Self = Self {
        min_primitives: 2,
        max_primitives: 8,
        traversal_cost: 20.0,
    };

    /// Profile for hierarchies over instances (top-level): `2 / 8 / 1.0`.
    pub const TOP_LEVEL: Self = Self {
        min_primitives: 2,
        max_primitives: 8,
        traversal_cost: 1.0,
    };

    /// Create a config from explicit parameters. See [`BuildConfig::validate`].
    pub const fn new(min_primitives: u32, max_primitives: u32, traversal_cost: f32) -> Self {
        Self {
            min_primitives,
            max_primitives,
            traversal_cost,
        }
    }

    /// Replace `min_primitives`.
    #[must_use]
    pub const fn with_min_primitives(mut self, min_primitives: u32) -> Self {
        self.min_primitives = min_primitives;
        self
    }

    /// Replace `max_primitives`.
    #[must_use]
    pub const fn with_max_primitives(mut self, max_primitives: u32) -> Self {
        self.max_primitives = max_primitives;
        self
    }

    /// Replace `traversal_cost`.
    #[must_use]
    pub const fn with_traversal_cost(mut self, traversal_cost: f32) -> Self {
        self.traversal_cost = traversal_cost;
        self
    }

    /// Check the invariants the builder relies on.
    ///
    /// - `min_primitives <= max_primitives`
    /// - `max_primitives >= 1`, since a median split cannot shrink a single primitive
    /// - `traversal_cost` is finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_primitives == 0 {
            return Err(ConfigError::ZeroMaxPrimitives);
        }
        if self.min_primitives > self.max_primitives {
            return Err(ConfigError::MinAboveMax {
                min_primitives: self.min_primitives,
                max_primitives: self.max_primitives,
            });
        }
        if !self.traversal_cost.is_finite() || self.traversal_cost < 0.0 {
            return Err(ConfigError::InvalidTraversalCost(self.traversal_cost));
        }
        Ok(())
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::BOTTOM_LEVEL
    }
}
