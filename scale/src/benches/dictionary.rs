use commonware_scale::{DecodeExt, Encode};
use criterion::{criterion_group, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{
    collections::{BTreeMap, HashMap},
    hint::black_box,
};

fn benchmark_dictionary(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for len in [10, 1_000, 100_000] {
        let entries: Vec<(u64, [u8; 32])> = (0..len).map(|_| (rng.gen(), rng.gen())).collect();
        let btree: BTreeMap<_, _> = entries.iter().copied().collect();
        let hash: HashMap<_, _> = entries.iter().copied().collect();

        // A `BTreeMap` is already sorted, a `HashMap` is sorted on every encode.
        c.bench_function(&format!("{}/encode/map=btree len={}", module_path!(), len), |b| {
            b.iter(|| black_box(&btree).encode());
        });
        c.bench_function(&format!("{}/encode/map=hash len={}", module_path!(), len), |b| {
            b.iter(|| black_box(&hash).encode());
        });

        let encoded = btree.encode().freeze();
        c.bench_function(&format!("{}/decode/map=btree len={}", module_path!(), len), |b| {
            b.iter_batched(
                || encoded.clone(),
                |buf| BTreeMap::<u64, [u8; 32]>::decode(buf).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_dictionary
}
