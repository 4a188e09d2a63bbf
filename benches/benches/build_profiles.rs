// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::Vec3;
use thicket_bvh::{Aabb, BuildConfig, build};

fn gen_grid_boxes(n: usize, cell: f32) -> Vec<Aabb> {
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let min = Vec3::new(x as f32, y as f32, z as f32) * cell;
                out.push(Aabb::new(min, min + Vec3::splat(cell * 0.8)));
            }
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32)
    }
    fn next_vec3(&mut self) -> Vec3 {
        Vec3::new(self.next_f32(), self.next_f32(), self.next_f32())
    }
}

fn gen_random_boxes(count: usize, world: f32, size: f32) -> Vec<Aabb> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let min = rng.next_vec3() * world;
            Aabb::new(min, min + rng.next_vec3() * size)
        })
        .collect()
}

fn gen_clustered_boxes(n_clusters: usize, per_cluster: usize, spread: f32) -> Vec<Aabb> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let centers: Vec<Vec3> = (0..n_clusters).map(|_| rng.next_vec3() * 2000.0).collect();
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for c in centers {
        for _ in 0..per_cluster {
            let p = c + (rng.next_vec3() - Vec3::splat(0.5)) * spread;
            out.push(Aabb::new(p, p + Vec3::splat(4.0)));
        }
    }
    out
}

// Thin triangles along a line: every split is borderline, lots of median fallbacks.
fn gen_degenerate_boxes(count: usize) -> Vec<Aabb> {
    (0..count)
        .map(|i| {
            let p = Vec3::new(i as f32 * 0.01, 0.0, 0.0);
            Aabb::new(p, p + Vec3::new(0.0, 1.0, 0.0))
        })
        .collect()
}

fn centers_of(boxes: &[Aabb]) -> Vec<Vec3> {
    boxes.iter().map(Aabb::center).collect()
}

fn bench_presets(c: &mut Criterion, name: &str, boxes: &[Aabb]) {
    let centers = centers_of(boxes);
    let mut group = c.benchmark_group(name);
    group.throughput(Throughput::Elements(boxes.len() as u64));
    for (label, config) in [
        ("bottom_level", BuildConfig::BOTTOM_LEVEL),
        ("top_level", BuildConfig::TOP_LEVEL),
    ] {
        group.bench_function(format!("build_{label}_n{}", boxes.len()), |b| {
            b.iter(|| {
                let bvh = build(black_box(boxes), &centers, boxes.len(), &config).unwrap();
                black_box(bvh.len());
            })
        });
    }
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    for &n in &[8usize, 16, 32] {
        bench_presets(c, "grid", &gen_grid_boxes(n, 2.0));
    }
}

fn bench_random(c: &mut Criterion) {
    for &count in &[1_000usize, 10_000, 100_000] {
        bench_presets(c, "random", &gen_random_boxes(count, 1000.0, 8.0));
    }
}

fn bench_clustered(c: &mut Criterion) {
    bench_presets(c, "clustered", &gen_clustered_boxes(16, 1024, 64.0));
}

fn bench_degenerate(c: &mut Criterion) {
    bench_presets(c, "degenerate", &gen_degenerate_boxes(16_384));
}

fn bench_build_then_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_then_stats");
    let boxes = gen_random_boxes(20_000, 500.0, 4.0);
    group.bench_function("build_and_walk_leaves", |b| {
        b.iter_batched(
            || centers_of(&boxes),
            |centers| {
                let bvh = build(&boxes, &centers, boxes.len(), &BuildConfig::TOP_LEVEL).unwrap();
                let stats = bvh.stats();
                black_box((stats.leaf_count, bvh.max_depth()));
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_grid,
    bench_random,
    bench_clustered,
    bench_degenerate,
    bench_build_then_stats,
);
criterion_main!(benches);
