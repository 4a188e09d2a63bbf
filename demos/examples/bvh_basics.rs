// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! BVH basics.
//!
//! Build a hierarchy over a small scene with both presets and print what came out.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p thicket_demos --example bvh_basics`

use glam::Vec3;
use thicket_bvh::{Aabb, BuildConfig, build};

fn main() {
    env_logger::init();

    // Two rows of crates and one tall pillar.
    let mut boxes = Vec::new();
    for i in 0..12 {
        let x = i as f32 * 2.0;
        boxes.push(Aabb::new(Vec3::new(x, 0.0, 0.0), Vec3::new(x + 1.0, 1.0, 1.0)));
        boxes.push(Aabb::new(Vec3::new(x, 0.0, 10.0), Vec3::new(x + 1.0, 1.0, 11.0)));
    }
    boxes.push(Aabb::new(Vec3::new(11.0, 0.0, 5.0), Vec3::new(12.0, 30.0, 6.0)));
    let centers: Vec<Vec3> = boxes.iter().map(Aabb::center).collect();

    for (name, config) in [
        ("bottom-level", BuildConfig::BOTTOM_LEVEL),
        ("top-level", BuildConfig::TOP_LEVEL),
    ] {
        let bvh = build(&boxes, &centers, boxes.len(), &config).expect("valid preset");
        let stats = bvh.stats();
        println!(
            "{name}: {} nodes, {} leaves, depth {}, leaf sizes {}..={} (avg {:.2})",
            stats.node_count,
            stats.leaf_count,
            stats.max_depth,
            stats.min_leaf_size,
            stats.max_leaf_size,
            stats.average_leaf_size,
        );
        for (index, leaf) in bvh.leaves() {
            println!(
                "  leaf {index:>3}: {:?} -> {:?}",
                bvh.leaf_primitives(leaf),
                leaf.bounds
            );
        }
        assert!(stats.max_leaf_size <= config.max_primitives);
    }

    // Rejected configurations never start a build.
    let err = build(&boxes, &centers, boxes.len(), &BuildConfig::new(9, 4, 1.0)).unwrap_err();
    println!("rejected: {err} ({})", core::error::Error::source(&err).unwrap());
}
