// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::Vec3;
use thicket_bvh::{Aabb, BuildConfig, build};

use rstar::RTree;
use rstar::primitives::Rectangle;

fn gen_grid_boxes(n: usize, cell: f32) -> Vec<Aabb> {
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let min = Vec3::new(x as f32, y as f32, z as f32) * cell;
                out.push(Aabb::new(min, min + Vec3::splat(cell)));
            }
        }
    }
    out
}

fn to_rstar_rects(v: &[Aabb]) -> Vec<Rectangle<[f32; 3]>> {
    v.iter()
        .map(|b| Rectangle::from_corners(b.min.to_array(), b.max.to_array()))
        .collect()
}

fn bench_bulk_build_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_build_compare");
    for &n in &[16usize, 32] {
        let boxes = gen_grid_boxes(n, 10.0);
        let centers: Vec<Vec3> = boxes.iter().map(Aabb::center).collect();
        group.throughput(Throughput::Elements(boxes.len() as u64));

        group.bench_function(format!("thicket_build_n{}", n), |b| {
            b.iter(|| {
                let bvh = build(&boxes, &centers, boxes.len(), &BuildConfig::TOP_LEVEL).unwrap();
                black_box(bvh.len());
            })
        });

        group.bench_function(format!("rstar_bulk_load_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&boxes),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    black_box(tree.size());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bulk_build_compare);
criterion_main!(benches);
