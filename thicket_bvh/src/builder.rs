// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-down binned SAH construction.
//!
//! Each pending node owns a contiguous range of the permutation array. Processing a
//! node computes its bounds, then either keeps it as a leaf or partitions the range
//! in place and appends two children to the node array. Pending nodes live on an
//! explicit stack, left child on top, so node numbering matches a recursive
//! pre-order build while the call stack stays flat for degenerate inputs.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use glam::Vec3;

use crate::binning::{BIN_COUNT, Bin, Split, bin_index};
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::node::{Hierarchy, Node};
use crate::types::Aabb;

/// Build a hierarchy over the first `count` entries of `boxes` and `centers`.
///
/// `centers[i]` is the centroid used to bin primitive `i`; it is normally the
/// center of `boxes[i]` but any point inside works.
///
/// Fails without allocating if the configuration is invalid, if either slice is
/// shorter than `count`, or if `count` does not fit 32-bit node indices.
pub fn build(
    boxes: &[Aabb],
    centers: &[Vec3],
    count: usize,
    config: &BuildConfig,
) -> Result<Hierarchy, BuildError> {
    if let Err(e) = config.validate() {
        log::warn!("rejecting build configuration {config:?}: {e}");
        return Err(e.into());
    }
    if boxes.len() < count || centers.len() < count {
        return Err(BuildError::InputTooShort {
            count,
            boxes: boxes.len(),
            centers: centers.len(),
        });
    }
    let (count32, node_capacity) = capacity_for(count)?;

    let mut builder = Builder {
        boxes: &boxes[..count],
        centers: &centers[..count],
        config,
        nodes: vec![Node::default(); node_capacity],
        primitive_indices: (0..count32).collect(),
        next_node: 1,
        median_splits: 0,
    };
    builder.nodes[0] = Node::leaf(Aabb::EMPTY, 0, count32);
    builder.run();

    let median_splits = builder.median_splits;
    let mut nodes = builder.nodes;
    nodes.truncate(builder.next_node);
    let hierarchy = Hierarchy::from_parts(nodes, builder.primitive_indices);
    log::debug!(
        "built BVH over {count} primitives: {} nodes, depth {}, {median_splits} median splits",
        hierarchy.len(),
        hierarchy.max_depth(),
    );
    Ok(hierarchy)
}

/// Build a hierarchy over all of `boxes`, binning each by its center.
pub fn build_from_boxes(boxes: &[Aabb], config: &BuildConfig) -> Result<Hierarchy, BuildError> {
    let centers: Vec<Vec3> = boxes.iter().map(Aabb::center).collect();
    build(boxes, &centers, boxes.len(), config)
}

impl Hierarchy {
    /// Same as [`build`].
    pub fn build(
        boxes: &[Aabb],
        centers: &[Vec3],
        count: usize,
        config: &BuildConfig,
    ) -> Result<Self, BuildError> {
        build(boxes, centers, count, config)
    }
}

/// `count` as a `u32` and the worst-case node count `max(1, 2 * count - 1)`,
/// both checked against the 32-bit index range.
fn capacity_for(count: usize) -> Result<(u32, usize), BuildError> {
    let overflow = BuildError::CapacityOverflow { count };
    let nodes = count.checked_mul(2).ok_or(overflow)?.saturating_sub(1).max(1);
    u32::try_from(nodes).map_err(|_| overflow)?;
    let count32 = u32::try_from(count).map_err(|_| overflow)?;
    Ok((count32, nodes))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Every index is bounded by the node capacity checked in `capacity_for`."
)]
#[inline]
fn to_index(v: usize) -> u32 {
    v as u32
}

/// Scratch state for one build call.
struct Builder<'a> {
    boxes: &'a [Aabb],
    centers: &'a [Vec3],
    config: &'a BuildConfig,
    nodes: Vec<Node>,
    primitive_indices: Vec<u32>,
    next_node: usize,
    median_splits: usize,
}

impl Builder<'_> {
    fn run(&mut self) {
        let mut pending = vec![0_usize];
        while let Some(index) = pending.pop() {
            if let Some((left, right)) = self.subdivide(index) {
                pending.push(right);
                pending.push(left);
            }
        }
    }

    /// Finalize `nodes[index]`, returning its children if it was split.
    fn subdivide(&mut self, index: usize) -> Option<(usize, usize)> {
        let node = self.nodes[index];
        let first = node.first_index as usize;
        let range = first..first + node.primitive_count as usize;
        let bounds = self.range_bounds(range.clone());
        self.nodes[index].bounds = bounds;

        if node.primitive_count <= self.config.min_primitives {
            return None;
        }

        let split = (0..3).fold(Split::default(), |best, axis| {
            best.min(self.find_best_split(axis, &bounds, range.clone()))
        });
        #[allow(
            clippy::cast_precision_loss,
            reason = "Leaf cost is an estimate; counts above 2^24 only lose precision."
        )]
        let leaf_cost = bounds.half_area() * (node.primitive_count as f32 - self.config.traversal_cost);

        let first_right = if split.is_degenerate() || !(split.cost < leaf_cost) {
            if node.primitive_count <= self.config.max_primitives {
                return None;
            }
            self.median_split(&bounds, range.clone())
        } else {
            self.partition(&split, &bounds, range.clone())
        };

        let left = self.next_node;
        self.next_node += 2;
        self.nodes[left] = Node::leaf(Aabb::EMPTY, to_index(first), to_index(first_right - first));
        self.nodes[left + 1] = Node::leaf(
            Aabb::EMPTY,
            to_index(first_right),
            to_index(range.end - first_right),
        );
        self.nodes[index].first_index = to_index(left);
        self.nodes[index].primitive_count = 0;
        Some((left, left + 1))
    }

    fn range_bounds(&self, range: Range<usize>) -> Aabb {
        self.primitive_indices[range]
            .iter()
            .fold(Aabb::EMPTY, |acc, &p| acc.union(&self.boxes[p as usize]))
    }

    /// Cheapest binned split of `range` along `axis`.
    ///
    /// Returns a split with `right_bin == 0` and infinite cost when every
    /// candidate leaves one side empty.
    fn find_best_split(&self, axis: usize, bounds: &Aabb, range: Range<usize>) -> Split {
        let mut bins = [Bin::EMPTY; BIN_COUNT];
        for &p in &self.primitive_indices[range] {
            let p = p as usize;
            bins[bin_index(axis, bounds, self.centers[p])].insert(&self.boxes[p]);
        }

        // right_cost[i] is the cost of bins [i, BIN_COUNT); slot 0 is never read.
        let mut right_cost = [f32::NAN; BIN_COUNT];
        let mut right = Bin::EMPTY;
        for i in (1..BIN_COUNT).rev() {
            right.extend(&bins[i]);
            right_cost[i] = right.cost();
        }

        let mut best = Split {
            axis,
            ..Split::default()
        };
        let mut left = Bin::EMPTY;
        for i in 0..BIN_COUNT - 1 {
            left.extend(&bins[i]);
            let cost = left.cost() + right_cost[i + 1];
            if cost < best.cost {
                best.cost = cost;
                best.right_bin = i + 1;
            }
        }
        best
    }

    /// Move primitives binned left of `split.right_bin` to the front of `range`.
    fn partition(&mut self, split: &Split, bounds: &Aabb, range: Range<usize>) -> usize {
        let centers = self.centers;
        let (axis, right_bin) = (split.axis, split.right_bin);
        let start = range.start;
        start
            + partition_in_place(&mut self.primitive_indices[range], |p| {
                bin_index(axis, bounds, centers[p as usize]) < right_bin
            })
    }

    /// Sort `range` by centroid along the largest axis of `bounds` and cut it in half.
    fn median_split(&mut self, bounds: &Aabb, range: Range<usize>) -> usize {
        let axis = bounds.largest_axis();
        let mid = range.start + range.len() / 2;
        log::trace!(
            "median split of {} primitives along axis {axis}",
            range.len()
        );
        let centers = self.centers;
        self.primitive_indices[range].sort_unstable_by(|&a, &b| {
            centers[a as usize][axis].total_cmp(&centers[b as usize][axis])
        });
        self.median_splits += 1;
        mid
    }
}

/// Reorder `items` so every element matching `pred` precedes every element that
/// does not. Returns the number of matching elements.
pub(crate) fn partition_in_place<F>(items: &mut [u32], mut pred: F) -> usize
where
    F: FnMut(u32) -> bool,
{
    let mut front = 0;
    let mut back = items.len();
    loop {
        while front < back && pred(items[front]) {
            front += 1;
        }
        while front < back && !pred(items[back - 1]) {
            back -= 1;
        }
        if front >= back {
            return front;
        }
        items.swap(front, back - 1);
        front += 1;
        back -= 1;
    }
}
