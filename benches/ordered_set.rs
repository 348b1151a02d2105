use classic_collections::avl_tree::AvlSet;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 1_000;

fn bench_avl_set_insert(c: &mut Criterion) {
    c.bench_function("bench avl_set insert", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            let mut set = AvlSet::new();
            for _ in 0..NUM_OF_OPERATIONS {
                set.insert(rng.gen::<u32>());
            }
        })
    });
}

fn bench_avl_set_contains(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut set = AvlSet::new();
    let mut values = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let value = rng.gen::<u32>();
        set.insert(value);
        values.push(value);
    }

    c.bench_function("bench avl_set contains", move |b| {
        b.iter(|| {
            for value in &values {
                black_box(set.contains(value));
            }
        })
    });
}

fn bench_btreeset_insert(c: &mut Criterion) {
    c.bench_function("bench btreeset insert", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            let mut set = BTreeSet::new();
            for _ in 0..NUM_OF_OPERATIONS {
                set.insert(rng.gen::<u32>());
            }
        })
    });
}

fn bench_btreeset_contains(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut set = BTreeSet::new();
    let mut values = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let value = rng.gen::<u32>();
        set.insert(value);
        values.push(value);
    }

    c.bench_function("bench btreeset contains", move |b| {
        b.iter(|| {
            for value in &values {
                black_box(set.contains(value));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_avl_set_insert,
    bench_avl_set_contains,
    bench_btreeset_insert,
    bench_btreeset_contains,
);
criterion_main!(benches);
