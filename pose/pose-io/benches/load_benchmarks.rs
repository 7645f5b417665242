//! Benchmarks for keypoint loading.
//!
//! Run with: cargo bench -p pose-io
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p pose-io -- --save-baseline main
//! 2. After changes: cargo bench -p pose-io -- --baseline main

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use ndarray::{Array2, Array3, Axis};
use ndarray_npy::write_npy;
use pose_io::{LoadParams, load_keypoints, load_keypoints_with};
use pose_types::Axis3;
use tempfile::tempdir;

const FRAMES: usize = 1000;
const KEYPOINTS: usize = 17;

// =============================================================================
// Test Data Generation
// =============================================================================

/// Smooth synthetic trajectories, one sine per coordinate.
fn create_sequence(frames: usize, keypoints: usize) -> Array3<f64> {
    Array3::from_shape_fn((frames, keypoints, 3), |(f, k, c)| {
        let t = f as f64 * 0.01;
        let phase = (k * 3 + c) as f64;
        (t + phase).sin() * 100.0 + phase
    })
}

fn csv_text(sequence: &Array3<f64>, frame_column: bool) -> String {
    let (frames, keypoints, _) = sequence.dim();
    let mut header: Vec<String> = Vec::with_capacity(keypoints * 3 + 1);
    if frame_column {
        header.push("frame".to_string());
    }
    for k in 0..keypoints {
        header.extend(Axis3::ALL.map(|axis| format!("kp{k}_{}", axis.name())));
    }
    let mut text = header.join(",");
    text.push('\n');

    for f in 0..frames {
        if frame_column {
            text.push_str(&format!("{f},"));
        }
        let row: Vec<String> = sequence
            .index_axis(Axis(0), f)
            .iter()
            .map(|v| format!("{v:?}"))
            .collect();
        text.push_str(&row.join(","));
        text.push('\n');
    }
    text
}

// =============================================================================
// Load Benchmarks
// =============================================================================

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("Load");

    let sequence = create_sequence(FRAMES, KEYPOINTS);
    let temp_dir = tempdir().expect("failed to create temp dir");

    let npy_path = temp_dir.path().join("bench_seq.npy");
    let flat_path = temp_dir.path().join("bench_flat.npy");
    let csv_path = temp_dir.path().join("bench_seq.csv");
    let indexed_path = temp_dir.path().join("bench_indexed.csv");

    write_npy(&npy_path, &sequence).expect("failed to write npy");
    let flat = Array2::from_shape_vec(
        (FRAMES, KEYPOINTS * 3),
        sequence.iter().copied().collect(),
    )
    .expect("flat shape");
    write_npy(&flat_path, &flat).expect("failed to write flat npy");
    std::fs::write(&csv_path, csv_text(&sequence, false)).expect("failed to write csv");
    std::fs::write(&indexed_path, csv_text(&sequence, true)).expect("failed to write csv");

    group.throughput(Throughput::Elements(FRAMES as u64));

    group.bench_function("npy_3d", |b| b.iter(|| load_keypoints(black_box(&npy_path))));

    group.bench_function("npy_2d", |b| b.iter(|| load_keypoints(black_box(&flat_path))));

    group.bench_function("csv_header", |b| {
        b.iter(|| load_keypoints(black_box(&csv_path)));
    });

    group.bench_function("csv_frame_column", |b| {
        b.iter(|| load_keypoints(black_box(&indexed_path)));
    });

    let keep_all = LoadParams::keep_all_columns();
    group.bench_function("csv_header_no_detection", |b| {
        b.iter(|| load_keypoints_with(black_box(&csv_path), black_box(&keep_all)));
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_load);
criterion_main!(benches);
