// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use panolens::domain::Position;
use panolens::engine::equirect::render_viewport;
use panolens::engine::{Panorama, ViewerContainer};
use std::hint::black_box;
use std::sync::Arc;

fn gradient_panorama(width: u32, height: u32) -> Panorama {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 96, 255]);
        }
    }
    Panorama {
        width,
        height,
        pixels: Arc::new(pixels),
    }
}

fn viewport_render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport_render");
    let panorama = gradient_panorama(4096, 2048);
    let container = ViewerContainer::default();

    group.bench_function("center", |b| {
        b.iter(|| {
            black_box(render_viewport(
                black_box(&panorama),
                Position::new(0.0, 0.0),
                &container,
            ))
        });
    });

    // Crosses the seam, so every row is copied in two runs.
    group.bench_function("wrap_around_seam", |b| {
        b.iter(|| {
            black_box(render_viewport(
                black_box(&panorama),
                Position::new(std::f32::consts::PI, 0.3),
                &container,
            ))
        });
    });

    group.finish();
}

criterion_group!(benches, viewport_render_benchmark);
criterion_main!(benches);
