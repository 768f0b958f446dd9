use commonware_scale::{compact, Compact, DecodeExt, Encode};
use criterion::{criterion_group, Criterion};
use num_bigint::BigUint;
use std::hint::black_box;

fn benchmark_compact(c: &mut Criterion) {
    for value in [42u64, 16_383, 1 << 29, 1 << 40, u64::MAX] {
        let mut buf: Vec<u8> = Vec::with_capacity(compact::size(&value));
        c.bench_function(&format!("{}/write/value={}", module_path!(), value), |b| {
            b.iter(|| {
                buf.clear();
                compact::write(black_box(&value), &mut buf);
            });
        });

        let encoded = Compact(value).encode().freeze();
        c.bench_function(&format!("{}/read/value={}", module_path!(), value), |b| {
            b.iter(|| Compact::<u64>::decode(black_box(encoded.clone())).unwrap());
        });
    }

    let big = (BigUint::from(1u8) << 500usize) - 1u8;
    let encoded = Compact(big.clone()).encode().freeze();
    c.bench_function(&format!("{}/write/bits=500", module_path!()), |b| {
        b.iter(|| black_box(&Compact(big.clone())).encode());
    });
    c.bench_function(&format!("{}/read/bits=500", module_path!()), |b| {
        b.iter(|| Compact::<BigUint>::decode(black_box(encoded.clone())).unwrap());
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_compact
}
