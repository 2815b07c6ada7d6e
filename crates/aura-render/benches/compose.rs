use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aura_core::{BoundingBox, ModuleConfig, NormalizedLandmark, ObjectDetection};
use aura_render::{compose, SourceDims, ViewTransform, Viewport};
use aura_snapshot::SceneSnapshot;

fn full_snapshot() -> SceneSnapshot {
    let mut snapshot = SceneSnapshot::empty();
    snapshot.face_landmarks = Some(
        (0..aura_core::FACE_WITH_IRIS_COUNT)
            .map(|i| {
                NormalizedLandmark::new(
                    0.3 + 0.4 * (i as f32 / 478.0),
                    0.2 + 0.5 * ((i * 7 % 478) as f32 / 478.0),
                )
            })
            .collect(),
    );
    snapshot.pose_landmarks = Some(
        (0..aura_core::POSE_LANDMARK_COUNT)
            .map(|i| {
                NormalizedLandmark::new(0.5, 0.1 + i as f32 / 40.0).with_visibility(0.95)
            })
            .collect(),
    );
    snapshot.hands = vec![aura_core::HandData::new(
        (0..aura_core::HAND_LANDMARK_COUNT)
            .map(|i| NormalizedLandmark::new(0.6 + i as f32 / 100.0, 0.6))
            .collect(),
    )];
    snapshot.objects = (0..3)
        .map(|i| {
            ObjectDetection::new(
                "person",
                0.9,
                BoundingBox::new(0.1 + 0.25 * i as f32, 0.1, 0.2, 0.4),
            )
        })
        .collect();
    snapshot
}

fn bench_transform(c: &mut Criterion) {
    let t = ViewTransform::cover(
        Viewport::new(1920.0, 1080.0),
        SourceDims::new(1280, 720),
        true,
    );
    let landmarks: Vec<_> = (0..aura_core::FACE_LANDMARK_COUNT)
        .map(|i| NormalizedLandmark::new(i as f32 / 468.0, 0.5))
        .collect();

    c.bench_function("transform_face_mesh", |b| {
        b.iter(|| {
            for lm in &landmarks {
                black_box(t.point(black_box(lm)));
            }
        })
    });
}

fn bench_compose(c: &mut Criterion) {
    let snapshot = full_snapshot();
    let config = ModuleConfig::default();
    let t = ViewTransform::cover(
        Viewport::new(1920.0, 1080.0),
        SourceDims::new(1280, 720),
        true,
    );

    c.bench_function("compose_full_snapshot", |b| {
        b.iter(|| {
            black_box(compose(
                black_box(&snapshot),
                &config,
                &t,
                SourceDims::new(1280, 720),
            ))
        })
    });
}

criterion_group!(benches, bench_transform, bench_compose);
criterion_main!(benches);
