// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node upload layout.
//!
//! Build a hierarchy and view the node array and permutation as raw bytes, the way
//! a renderer would copy them into storage buffers.
//!
//! Run:
//! - `cargo run -p thicket_demos --example bvh_node_upload`

use glam::Vec3;
use thicket_bvh::{Aabb, BuildConfig, Node, build_from_boxes};

fn main() {
    env_logger::init();

    let boxes: Vec<Aabb> = (0..1000)
        .map(|i| {
            let p = Vec3::new((i % 10) as f32, ((i / 10) % 10) as f32, (i / 100) as f32) * 3.0;
            Aabb::new(p, p + Vec3::ONE)
        })
        .collect();
    let bvh = build_from_boxes(&boxes, &BuildConfig::BOTTOM_LEVEL).expect("valid preset");

    let node_bytes = bvh.node_bytes();
    assert_eq!(node_bytes.len(), bvh.len() * size_of::<Node>());
    println!(
        "{} nodes -> {} bytes ({} bytes per node), {} primitive indices",
        bvh.len(),
        node_bytes.len(),
        size_of::<Node>(),
        bvh.primitive_indices().len(),
    );
    log::info!("root bounds {:?}, depth {}", bvh.root().bounds, bvh.max_depth());

    // The first record is the root: 6 floats of bounds, then the two u32 fields.
    let root_words: &[u32] = bytemuck::cast_slice(&node_bytes[..size_of::<Node>()]);
    println!("root record words: {root_words:?}");
    assert_eq!(root_words[6], bvh.root().first_index);
    assert_eq!(root_words[7], bvh.root().primitive_count);
}
