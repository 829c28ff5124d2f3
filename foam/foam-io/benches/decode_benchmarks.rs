//! Decoder benchmarks.
//!
//! Compares the ASCII lexer path against the binary slice path on
//! synthetic point lists sized like a small production case.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

const POINT_COUNT: usize = 50_000;

fn ascii_points(count: usize) -> String {
    let mut body = format!("{count}\n(\n");
    for i in 0..count {
        let x = i as f64 * 0.001;
        body.push_str(&format!("({x} {} {})\n", x * 2.0, x * 3.0));
    }
    body.push_str(")\n");
    body
}

fn binary_points(count: usize) -> Vec<u8> {
    let mut body = format!("{count}\n(").into_bytes();
    for i in 0..count {
        let x = i as f64 * 0.001;
        for c in [x, x * 2.0, x * 3.0] {
            body.extend_from_slice(&c.to_le_bytes());
        }
    }
    body.extend_from_slice(b")\n");
    body
}

fn bench_ascii_vector_list(c: &mut Criterion) {
    let body = ascii_points(POINT_COUNT);
    c.bench_function("ascii_vector_list_50k", |b| {
        b.iter(|| foam_io::ascii::decode_vector_list(black_box(&body)));
    });
}

fn bench_binary_vector_list(c: &mut Criterion) {
    let body = binary_points(POINT_COUNT);
    c.bench_function("binary_vector_list_50k", |b| {
        b.iter(|| foam_io::binary::decode_vector_list(black_box(&body)));
    });
}

fn bench_ascii_face_list(c: &mut Criterion) {
    let mut body = format!("{POINT_COUNT}\n(\n");
    for i in 0..POINT_COUNT as u32 {
        body.push_str(&format!("4({i} {} {} {})\n", i + 1, i + 2, i + 3));
    }
    body.push_str(")\n");
    c.bench_function("ascii_face_list_50k", |b| {
        b.iter(|| foam_io::ascii::decode_face_list(black_box(&body)));
    });
}

criterion_group!(
    benches,
    bench_ascii_vector_list,
    bench_binary_vector_list,
    bench_ascii_face_list
);
criterion_main!(benches);
