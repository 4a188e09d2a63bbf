// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bins, split candidates, and the centroid-to-bin mapping used by the SAH search.
//!
//! Costs are plain `f32` and the empty bin deliberately costs `NaN`
//! (`+inf` half-area times zero primitives). Every minimum search compares with `<`,
//! and `NaN < x` is false, so a candidate with an empty side never wins.

use glam::Vec3;

use crate::types::Aabb;

/// Number of bins per axis.
pub const BIN_COUNT: usize = 16;

/// Per-bucket accumulator: the union of the boxes that fell in, and how many.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bin {
    /// Union of the primitive boxes in this bin.
    pub bounds: Aabb,
    /// Number of primitives in this bin.
    pub count: u32,
}

impl Default for Bin {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bin {
    /// A bin with the empty box and no primitives.
    pub const EMPTY: Self = Self {
        bounds: Aabb::EMPTY,
        count: 0,
    };

    /// Add one primitive.
    #[inline]
    pub fn insert(&mut self, aabb: &Aabb) {
        self.bounds.extend(aabb);
        self.count += 1;
    }

    /// Merge another bin into this one.
    #[inline]
    pub fn extend(&mut self, other: &Self) {
        self.bounds.extend(&other.bounds);
        self.count += other.count;
    }

    /// SAH cost of this bin: half-area times primitive count. `NaN` when empty.
    #[inline]
    pub fn cost(&self) -> f32 {
        self.bounds.half_area() * self.count as f32
    }
}

/// A candidate partition: bins `[0, right_bin)` go left, the rest go right.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Split {
    /// Axis the bins were laid along (0 = x, 1 = y, 2 = z).
    pub axis: usize,
    /// Estimated SAH cost of the partition.
    pub cost: f32,
    /// First bin on the right side. Zero means no usable split.
    pub right_bin: usize,
}

impl Default for Split {
    fn default() -> Self {
        Self {
            axis: 0,
            cost: f32::INFINITY,
            right_bin: 0,
        }
    }
}

impl Split {
    /// The cheaper of two splits, keeping `self` when the costs are equal.
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if other.cost < self.cost { other } else { self }
    }

    /// Whether this split separates anything at all.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.right_bin == 0
    }
}

/// Map a centroid to its bin along `axis` within `bounds`.
///
/// The coordinate is mapped linearly from `[min, max]` onto `[0, BIN_COUNT - 1]`,
/// truncated, and clamped. When the extent along `axis` is not strictly positive
/// (a flat or empty box, or NaN), every centroid maps to bin 0, as does a NaN
/// centroid. The result is always a valid bin index.
#[inline]
pub fn bin_index(axis: usize, bounds: &Aabb, centroid: Vec3) -> usize {
    const LAST: f32 = (BIN_COUNT - 1) as f32;

    let min = bounds.min[axis];
    let extent = bounds.max[axis] - min;
    if !(extent > 0.0) {
        return 0;
    }
    let t = (centroid[axis] - min) * LAST / extent;
    if !(t > 0.0) {
        0
    } else if t >= LAST {
        BIN_COUNT - 1
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "t is finite and within (0, BIN_COUNT - 1); truncation picks the bin."
        )]
        let b = t as usize;
        b
    }
}
