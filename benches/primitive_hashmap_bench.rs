use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use primitive_hashmap::{IntHashMap, LongHashMap, PrimitiveHashMap, PrimitiveKey};
use std::cmp::Ordering;
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

/// Every key shares one bucket, so lookups hit the red-black tree.
#[derive(Copy, Clone, Debug)]
struct Colliding(u64);

impl PrimitiveKey for Colliding {
    fn hash_code(&self) -> u32 {
        0
    }
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    c.bench_function("primitive::insert_fresh_100k", |b| {
        b.iter_batched(
            LongHashMap::<u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert(x as i64, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_presized_100k(c: &mut Criterion) {
    c.bench_function("primitive::insert_presized_100k", |b| {
        b.iter_batched(
            || LongHashMap::<u64>::with_capacity(140_000),
            |mut m| {
                for (i, x) in lcg(2).take(100_000).enumerate() {
                    m.insert(x as i64, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_and_miss(c: &mut Criterion) {
    let m: IntHashMap<u32> = (0..100_000).map(|k| (k, k as u32)).collect();
    c.bench_function("primitive::get_hit_10k", |b| {
        b.iter(|| {
            let mut sum = 0u32;
            for k in (0..100_000).step_by(10) {
                sum = sum.wrapping_add(*m.get(black_box(k)).unwrap_or(&0));
            }
            black_box(sum)
        })
    });
    c.bench_function("primitive::get_miss_10k", |b| {
        b.iter(|| {
            let mut hits = 0u32;
            for k in (100_000..200_000).step_by(10) {
                hits += m.contains_key(black_box(k)) as u32;
            }
            black_box(hits)
        })
    });
}

fn bench_tree_bucket(c: &mut Criterion) {
    let mut m: PrimitiveHashMap<Colliding, u64> = PrimitiveHashMap::with_capacity(64);
    for x in lcg(3).take(2_000) {
        m.insert(Colliding(x), x);
    }
    let probes: Vec<u64> = lcg(3).take(2_000).step_by(7).collect();
    c.bench_function("primitive::tree_bucket_get_2k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &p in &probes {
                sum = sum.wrapping_add(*m.get(Colliding(black_box(p))).unwrap_or(&0));
            }
            black_box(sum)
        })
    });
    c.bench_function("primitive::tree_bucket_insert_remove_500", |b| {
        b.iter_batched(
            || m.clone(),
            |mut m| {
                for x in lcg(4).take(500) {
                    m.insert(Colliding(x), x);
                }
                for x in lcg(4).take(500) {
                    m.remove(Colliding(x));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iter(c: &mut Criterion) {
    let m: IntHashMap<u64> = (0..100_000).map(|k| (k, k as u64)).collect();
    c.bench_function("primitive::iter_100k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in m.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_insert_fresh_100k, bench_insert_presized_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_get_hit_and_miss,
              bench_tree_bucket,
              bench_iter
}
criterion_main!(benches_insert, benches_ops);
