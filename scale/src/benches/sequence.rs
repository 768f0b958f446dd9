use commonware_scale::{DecodeExt, Encode};
use criterion::{criterion_group, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn benchmark_sequence(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for len in [10, 1_000, 100_000] {
        let value: Vec<u64> = (0..len).map(|_| rng.gen()).collect();
        c.bench_function(&format!("{}/encode/len={}", module_path!(), len), |b| {
            b.iter(|| black_box(&value).encode());
        });

        let encoded = value.encode().freeze();
        c.bench_function(&format!("{}/decode/len={}", module_path!(), len), |b| {
            b.iter_batched(
                || encoded.clone(),
                |buf| Vec::<u64>::decode(buf).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_sequence
}
