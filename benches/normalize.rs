//! Normalization benchmark: response extraction ladder and classification.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use diarisk::parse;
use diarisk::risk::Classification;
use serde_json::json;

fn bench_parse_shapes(c: &mut Criterion) {
    let shapes = vec![
        json!({"risk": 73}),
        json!({"risk_level": "24.46%"}),
        json!({"probability": 0.446}),
        json!({"score": 87, "result": "positive"}),
        json!({"message": "no signal here"}),
    ];

    c.bench_function("parse_known_shapes", |b| {
        b.iter(|| {
            for payload in &shapes {
                black_box(parse::parse(black_box(payload)));
            }
        })
    });
}

fn bench_classify_sweep(c: &mut Criterion) {
    c.bench_function("classify_0_to_100", |b| {
        b.iter(|| {
            for percent in 0..=100u8 {
                black_box(Classification::from_percent(black_box(percent), 50));
            }
        })
    });
}

criterion_group!(benches, bench_parse_shapes, bench_classify_sweep);
criterion_main!(benches);
