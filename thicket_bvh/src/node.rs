// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat node records and the built [`Hierarchy`].

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::types::Aabb;

/// One element of the flat node array.
///
/// A node with `primitive_count > 0` is a leaf and owns
/// `primitive_indices[first_index..first_index + primitive_count]`.
/// Otherwise it is internal: its children live at `first_index` and `first_index + 1`.
///
/// The layout is `#[repr(C)]` and 32 bytes so the array can be uploaded as-is.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::Pod, bytemuck::Zeroable))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Node {
    /// Bounds of everything below this node.
    pub bounds: Aabb,
    /// First primitive (leaf) or left child (internal).
    pub first_index: u32,
    /// Number of primitives; zero for internal nodes.
    pub primitive_count: u32,
}

const _: () = assert!(size_of::<Node>() == 32, "Node must stay a 32-byte record");

impl Default for Node {
    fn default() -> Self {
        Self {
            bounds: Aabb::EMPTY,
            first_index: 0,
            primitive_count: 0,
        }
    }
}

impl Node {
    /// A leaf covering `count` primitives starting at `first`.
    pub const fn leaf(bounds: Aabb, first: u32, count: u32) -> Self {
        Self {
            bounds,
            first_index: first,
            primitive_count: count,
        }
    }

    /// Whether this node owns primitives directly.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        self.primitive_count > 0
    }

    /// Index of the left child, if internal.
    #[inline]
    pub const fn left_child(&self) -> Option<usize> {
        if self.is_leaf() {
            None
        } else {
            Some(self.first_index as usize)
        }
    }

    /// Index of the right child, if internal.
    #[inline]
    pub const fn right_child(&self) -> Option<usize> {
        if self.is_leaf() {
            None
        } else {
            Some(self.first_index as usize + 1)
        }
    }

    /// The slice of the permutation array this leaf owns. Empty for internal nodes.
    #[inline]
    pub const fn primitive_range(&self) -> Range<usize> {
        let start = self.first_index as usize;
        if self.is_leaf() {
            start..start + self.primitive_count as usize
        } else {
            start..start
        }
    }
}

/// Children of `nodes[index]`, if it is internal and well formed.
///
/// Children are always allocated after their parent, so a child index at or below
/// the parent's, or past the end of the array, is treated as "no children". This
/// keeps walks over externally edited arrays finite, and makes the zero-primitive
/// root of an empty hierarchy a terminal node.
pub(crate) fn children_of(nodes: &[Node], index: usize) -> Option<(usize, usize)> {
    let left = nodes.get(index)?.left_child()?;
    if left <= index || left + 1 >= nodes.len() {
        return None;
    }
    Some((left, left + 1))
}

fn compute_max_depth(nodes: &[Node]) -> u32 {
    if nodes.is_empty() {
        return 0;
    }
    let mut max = 0;
    let mut stack = vec![(0_usize, 1_u32)];
    while let Some((index, depth)) = stack.pop() {
        max = max.max(depth);
        if let Some((left, right)) = children_of(nodes, index) {
            stack.push((right, depth + 1));
            stack.push((left, depth + 1));
        }
    }
    max
}

/// Summary numbers for a built hierarchy.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HierarchyStats {
    /// Entries in the node array.
    pub node_count: usize,
    /// Terminal nodes reachable from the root.
    pub leaf_count: usize,
    /// Internal nodes reachable from the root.
    pub internal_count: usize,
    /// Same as [`Hierarchy::max_depth`].
    pub max_depth: u32,
    /// Smallest leaf primitive count.
    pub min_leaf_size: u32,
    /// Largest leaf primitive count.
    pub max_leaf_size: u32,
    /// Mean leaf primitive count.
    pub average_leaf_size: f32,
}

/// A built bounding volume hierarchy.
///
/// `nodes[0]` is the root. `primitive_indices` is a permutation of `0..N` arranged
/// so that every leaf's primitives are contiguous.
#[derive(Clone, Debug)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    primitive_indices: Vec<u32>,
    max_depth: u32,
}

impl Hierarchy {
    pub(crate) fn from_parts(nodes: Vec<Node>, primitive_indices: Vec<u32>) -> Self {
        let max_depth = compute_max_depth(&nodes);
        Self {
            nodes,
            primitive_indices,
            max_depth,
        }
    }

    /// The flat node array, root first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable access to the node array.
    ///
    /// Call [`Hierarchy::refresh`] afterwards; the cached depth is not updated.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// The primitive permutation that leaf ranges index into.
    pub fn primitive_indices(&self) -> &[u32] {
        &self.primitive_indices
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a hierarchy has at least a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of primitives the hierarchy was built over.
    pub fn primitive_count(&self) -> usize {
        self.primitive_indices.len()
    }

    /// Depth of the deepest leaf; a lone root has depth 1.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Recompute cached values after editing [`Hierarchy::nodes_mut`].
    pub fn refresh(&mut self) {
        self.max_depth = compute_max_depth(&self.nodes);
    }

    /// Primitive indices owned by `node`.
    ///
    /// Empty for internal nodes and for ranges that fall outside the permutation.
    pub fn leaf_primitives(&self, node: &Node) -> &[u32] {
        self.primitive_indices
            .get(node.primitive_range())
            .unwrap_or(&[])
    }

    /// Terminal nodes in left-to-right order, with their node index.
    ///
    /// Walking the leaves in this order visits `primitive_indices` front to back.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            nodes: &self.nodes,
            stack: if self.nodes.is_empty() {
                Vec::new()
            } else {
                vec![0]
            },
        }
    }

    /// Counts and leaf-size figures for the reachable tree.
    #[allow(
        clippy::cast_precision_loss,
        reason = "Average leaf size is informational."
    )]
    pub fn stats(&self) -> HierarchyStats {
        let mut stats = HierarchyStats {
            node_count: self.nodes.len(),
            max_depth: self.max_depth,
            min_leaf_size: u32::MAX,
            ..HierarchyStats::default()
        };
        let mut total = 0_u64;
        for (_, leaf) in self.leaves() {
            stats.leaf_count += 1;
            stats.min_leaf_size = stats.min_leaf_size.min(leaf.primitive_count);
            stats.max_leaf_size = stats.max_leaf_size.max(leaf.primitive_count);
            total += u64::from(leaf.primitive_count);
        }
        if stats.leaf_count == 0 {
            stats.min_leaf_size = 0;
        } else {
            stats.average_leaf_size = total as f32 / stats.leaf_count as f32;
        }
        stats.internal_count = self.reachable_count() - stats.leaf_count;
        stats
    }

    fn reachable_count(&self) -> usize {
        let mut count = 0;
        let mut stack = if self.nodes.is_empty() {
            Vec::new()
        } else {
            vec![0]
        };
        while let Some(index) = stack.pop() {
            count += 1;
            if let Some((left, right)) = children_of(&self.nodes, index) {
                stack.push(right);
                stack.push(left);
            }
        }
        count
    }

    /// The node array as raw bytes, ready for a buffer upload.
    #[cfg(feature = "bytemuck")]
    pub fn node_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    /// Take the node array and permutation apart.
    pub fn into_parts(self) -> (Vec<Node>, Vec<u32>) {
        (self.nodes, self.primitive_indices)
    }
}

/// Iterator over terminal nodes, see [`Hierarchy::leaves`].
#[derive(Clone, Debug)]
pub struct Leaves<'a> {
    nodes: &'a [Node],
    stack: Vec<usize>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.stack.pop() {
            match children_of(self.nodes, index) {
                Some((left, right)) => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
                None => return Some((index, &self.nodes[index])),
            }
        }
        None
    }
}
