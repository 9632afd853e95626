//! Benchmarks for the per-frame focus path

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use anchor_core::{CameraPose, FrameSnapshot, FrameTime, SceneVector, TrackingState};
use anchor_focus::{
    compute_frame, scene_update, FocusPlacement, IndicatorStyle, RaycastResult, SurfaceQuery,
};
use anchor_runtime::{FrameLoop, HeadlessRenderer};
use anchor_test::{NoiseConfig, NoisyTracker};

fn bench_compute_frame(c: &mut Criterion) {
    let snapshot = FrameSnapshot::new(
        1,
        FrameTime::from_millis(16),
        CameraPose::identity(),
        TrackingState::Normal,
    );
    let query = SurfaceQuery::default();
    let hits: Vec<RaycastResult> = (0..4)
        .map(|i| RaycastResult::horizontal(SceneVector::new(0.0, 0.0, -1.0 - i as f32)))
        .collect();

    c.bench_function("compute_frame_hit", |b| {
        b.iter(|| {
            black_box(compute_frame(
                black_box(&snapshot),
                |_| hits.clone(),
                false,
                &query,
            ))
        })
    });

    c.bench_function("compute_frame_suppressed", |b| {
        b.iter(|| black_box(compute_frame(black_box(&snapshot), |_| hits.clone(), true, &query)))
    });
}

fn bench_scene_update(c: &mut Criterion) {
    let style = IndicatorStyle::default();

    c.bench_function("scene_update_initializing", |b| {
        b.iter(|| black_box(scene_update(black_box(&FocusPlacement::Initializing), &style)))
    });
}

fn bench_frame_loop_tick(c: &mut Criterion) {
    let mut frame_loop = FrameLoop::new(
        NoisyTracker::new(NoiseConfig::shaky(), 1),
        anchor_focus::StaticOverlay(false),
        HeadlessRenderer::default(),
    );

    c.bench_function("frame_loop_tick_shaky", |b| {
        b.iter(|| black_box(frame_loop.tick()))
    });
}

criterion_group!(
    benches,
    bench_compute_frame,
    bench_scene_update,
    bench_frame_loop_tick
);
criterion_main!(benches);
