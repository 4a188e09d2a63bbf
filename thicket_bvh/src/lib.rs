// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket BVH: a top-down binned-SAH bounding volume hierarchy builder.
//!
//! Give it one axis-aligned box and one centroid per primitive and it returns a
//! binary [`Hierarchy`]:
//!
//! - a flat array of fixed-size [`Node`] records, root at index 0, siblings adjacent;
//! - a permutation of the primitive indices in which every leaf owns a contiguous range.
//!
//! The node array is meant to be handed to a renderer as-is (see the `bytemuck`
//! feature); traversal and refitting are left to the consumer.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use thicket_bvh::{Aabb, BuildConfig, build};
//!
//! let boxes: Vec<Aabb> = (0..64)
//!     .map(|i| {
//!         let p = Vec3::new(i as f32 * 3.0, 0.0, 0.0);
//!         Aabb::new(p, p + Vec3::ONE)
//!     })
//!     .collect();
//! let centers: Vec<Vec3> = boxes.iter().map(Aabb::center).collect();
//!
//! let bvh = build(&boxes, &centers, boxes.len(), &BuildConfig::TOP_LEVEL).unwrap();
//! assert!(!bvh.root().is_leaf());
//! assert!(bvh.len() <= 2 * boxes.len() - 1);
//!
//! // Leaves cover every primitive exactly once.
//! let covered: usize = bvh.leaves().map(|(_, n)| n.primitive_count as usize).sum();
//! assert_eq!(covered, boxes.len());
//! ```
//!
//! ## How splits are chosen
//!
//! Each node's primitives are scattered into [`BIN_COUNT`] bins per axis by centroid.
//! Every boundary between bins is scored with the surface area heuristic,
//!
//! `cost = half_area(L) * |L| + half_area(R) * |R|`
//!
//! and the cheapest boundary over all three axes wins if it beats the leaf cost
//! `half_area(node) * (n - traversal_cost)`. When nothing wins but the node still holds
//! more than `max_primitives`, the range is sorted along the node's largest axis and
//! cut in half. See [`BuildConfig`] for the parameters and presets.
//!
//! ### Float semantics
//!
//! Flat boxes, coincident centroids, and empty bins are expected. An empty bin costs
//! `NaN`, and comparisons are arranged so that `NaN` never wins a split. A centroid
//! on a zero-extent axis always falls into bin 0.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: math backend for `glam`.
//! - `bytemuck`: `Pod` node records and `Hierarchy::node_bytes` for uploads.
//! - `serde`: serialization for [`BuildConfig`], [`Aabb`], and [`Node`].

#![no_std]

extern crate alloc;

pub mod binning;
pub mod builder;
pub mod config;
pub mod error;
pub mod node;
pub mod types;

pub use binning::{BIN_COUNT, Bin, Split, bin_index};
pub use builder::{build, build_from_boxes};
pub use config::BuildConfig;
pub use error::{BuildError, ConfigError};
pub use node::{Hierarchy, HierarchyStats, Leaves, Node};
pub use types::Aabb;
