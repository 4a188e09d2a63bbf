// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use glam::Vec3;

/// Axis-aligned bounding box in 3D.
///
/// The empty box ([`Aabb::EMPTY`]) has `min = +inf` and `max = -inf` so that it is
/// the identity for [`Aabb::union`]. Its [`half_area`](Aabb::half_area) is `+inf`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::Pod, bytemuck::Zeroable))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// The empty box, identity for union.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create a new AABB from min/max corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from two arbitrary corners.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// A zero-extent box at `p`.
    pub const fn from_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    /// Grow this box in place to also cover `other`.
    #[inline]
    pub fn extend(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// The union of two boxes.
    #[inline]
    pub fn union(mut self, other: &Self) -> Self {
        self.extend(other);
        self
    }

    /// Edge lengths. Negative on every axis for [`Aabb::EMPTY`].
    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half of the surface area: `dx*dy + dy*dz + dz*dx`.
    ///
    /// Not clamped, so the empty box reports `+inf`.
    #[inline]
    pub fn half_area(&self) -> f32 {
        let d = self.extent();
        d.x * d.y + d.y * d.z + d.z * d.x
    }

    /// Index of the axis with the largest extent. Ties prefer the lower axis.
    #[inline]
    pub fn largest_axis(&self) -> usize {
        let d = self.extent();
        if d.x >= d.y && d.x >= d.z {
            0
        } else if d.y >= d.z {
            1
        } else {
            2
        }
    }

    /// True if the box is inverted on any axis (the empty box is).
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Whether `other` lies entirely within this box.
    pub fn contains(&self, other: &Self) -> bool {
        self.min.cmple(other.min).all() && other.max.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_union_identity() {
        let a = Aabb::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(Aabb::EMPTY.union(&a), a);
        assert_eq!(a.union(&Aabb::EMPTY), a);
        assert!(Aabb::EMPTY.is_empty());
        assert!(!a.is_empty());
    }

    #[test]
    fn empty_half_area_is_infinite() {
        let h = Aabb::EMPTY.half_area();
        assert!(h.is_infinite() && h > 0.0);
        // Relied upon by bin costs: an empty bin costs NaN.
        assert!((h * 0.0).is_nan());
    }

    #[test]
    fn half_area_of_unit_cube() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(a.half_area(), 3.0);
        let flat = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 3.0, 0.0));
        assert_eq!(flat.half_area(), 6.0);
    }

    #[test]
    fn largest_axis_prefers_lower_on_ties() {
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::ONE).largest_axis(), 0);
        assert_eq!(
            Aabb::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 2.0)).largest_axis(),
            1
        );
        assert_eq!(
            Aabb::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0)).largest_axis(),
            2
        );
    }

    #[test]
    fn from_corners_orders_components() {
        let a = Aabb::from_corners(Vec3::new(1.0, -1.0, 5.0), Vec3::new(-1.0, 1.0, 2.0));
        assert_eq!(a.min, Vec3::new(-1.0, -1.0, 2.0));
        assert_eq!(a.max, Vec3::new(1.0, 1.0, 5.0));
        assert!(a.contains(&Aabb::from_point(Vec3::new(0.0, 0.0, 3.0))));
        assert_eq!(a.center(), Vec3::new(0.0, 0.0, 3.5));
    }
}
