use core::hash::BuildHasher;
use core::hash::Hash;
use core::hint::black_box;
use std::collections::HashMap as StdHashMap;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownHashMap;
use quad_hash::HashMap as QuadHashMap;
use quad_hash::Hashable;
use quad_hash::digest::BuildHasherProvider;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::distr;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

trait BenchKey: Clone + Eq + Hash + Hashable {
    fn new(key: u64) -> Self;
}

impl BenchKey for u64 {
    fn new(key: u64) -> Self {
        black_box(key)
    }
}

impl BenchKey for String {
    fn new(key: u64) -> Self {
        black_box(format!("key_{:016X}", key))
    }
}

#[derive(Clone, Copy)]
struct SipBuilder {
    k0: u64,
    k1: u64,
}

impl SipBuilder {
    fn random() -> Self {
        let mut rng = OsRng;
        Self {
            k0: rng.try_next_u64().unwrap(),
            k1: rng.try_next_u64().unwrap(),
        }
    }
}

impl BuildHasher for SipBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new_with_keys(self.k0, self.k1)
    }
}

type SipProvider = BuildHasherProvider<SipBuilder>;

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 11),
    (1 << 12),
    (1 << 13),
    (1 << 14),
    (1 << 15),
    (1 << 16),
];

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Remove,
    Find,
}

fn random_keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| K::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut items = items.to_vec();
    items.shuffle(&mut SmallRng::from_os_rng());
    items
}

fn quad_filled<K: BenchKey>(keys: &[K]) -> QuadHashMap<K, u64> {
    let mut map = QuadHashMap::new();
    for (value, key) in keys.iter().enumerate() {
        map.put(key.clone(), value as u64);
    }
    map
}

fn quad_sip_filled<K: BenchKey>(
    keys: &[K],
    builder: SipBuilder,
) -> QuadHashMap<K, u64, SipProvider> {
    let mut map = QuadHashMap::with_provider(SipProvider::new(builder));
    for (value, key) in keys.iter().enumerate() {
        map.put(key.clone(), value as u64);
    }
    map
}

fn hashbrown_filled<K: BenchKey>(
    keys: &[K],
    builder: SipBuilder,
) -> HashbrownHashMap<K, u64, SipBuilder> {
    let mut map = HashbrownHashMap::with_hasher(builder);
    for (value, key) in keys.iter().enumerate() {
        map.insert(key.clone(), value as u64);
    }
    map
}

fn std_filled<K: BenchKey>(keys: &[K], builder: SipBuilder) -> StdHashMap<K, u64, SipBuilder> {
    let mut map = StdHashMap::with_hasher(builder);
    for (value, key) in keys.iter().enumerate() {
        map.insert(key.clone(), value as u64);
    }
    map
}

fn bench_insert_random<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("insert_random_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        let builder = SipBuilder::random();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| black_box(quad_filled(&keys)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("quad_hash_sip/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| black_box(quad_sip_filled(&keys, builder)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| black_box(hashbrown_filled(&keys, builder)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| black_box(std_filled(&keys, builder)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        let builder = SipBuilder::random();
        let lookups = shuffled(&keys);
        group.throughput(Throughput::Elements(size as u64));

        let quad = quad_filled(&keys);
        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter(|| {
                for key in &lookups {
                    black_box(quad.get(key));
                }
            })
        });

        let quad_sip = quad_sip_filled(&keys, builder);
        group.bench_function(format!("quad_hash_sip/{size}"), |b| {
            b.iter(|| {
                for key in &lookups {
                    black_box(quad_sip.get(key));
                }
            })
        });

        let hashbrown = hashbrown_filled(&keys, builder);
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in &lookups {
                    black_box(hashbrown.get(key));
                }
            })
        });

        let std = std_filled(&keys, builder);
        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| {
                for key in &lookups {
                    black_box(std.get(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_find_miss<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_miss_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        let misses = random_keys::<K>(size);
        let builder = SipBuilder::random();
        group.throughput(Throughput::Elements(size as u64));

        let quad = quad_filled(&keys);
        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter(|| {
                for key in &misses {
                    black_box(quad.get(key));
                }
            })
        });

        let hashbrown = hashbrown_filled(&keys, builder);
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in &misses {
                    black_box(hashbrown.get(key));
                }
            })
        });

        let std = std_filled(&keys, builder);
        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| {
                for key in &misses {
                    black_box(std.get(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_remove<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        let builder = SipBuilder::random();
        let removals = shuffled(&keys);
        group.throughput(Throughput::Elements(size as u64));

        let quad = quad_filled(&keys);
        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter_batched(
                || quad.clone(),
                |mut map| {
                    for key in &removals {
                        black_box(map.remove(key));
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });

        let hashbrown = hashbrown_filled(&keys, builder);
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || hashbrown.clone(),
                |mut map| {
                    for key in &removals {
                        black_box(map.remove(key));
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });

        let std = std_filled(&keys, builder);
        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || std.clone(),
                |mut map| {
                    for key in &removals {
                        black_box(map.remove(key));
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iteration_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        let builder = SipBuilder::random();
        group.throughput(Throughput::Elements(size as u64));

        let quad = quad_filled(&keys);
        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter(|| {
                for pair in quad.iter() {
                    black_box(pair);
                }
            })
        });

        let hashbrown = hashbrown_filled(&keys, builder);
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for pair in hashbrown.iter() {
                    black_box(pair);
                }
            })
        });

        let std = std_filled(&keys, builder);
        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| {
                for pair in std.iter() {
                    black_box(pair);
                }
            })
        });
    }

    group.finish();
}

fn bench_drain<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("drain_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        let builder = SipBuilder::random();
        group.throughput(Throughput::Elements(size as u64));

        let quad = quad_filled(&keys);
        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter_batched(
                || quad.clone(),
                |mut map| {
                    for pair in map.drain() {
                        black_box(pair);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });

        let hashbrown = hashbrown_filled(&keys, builder);
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || hashbrown.clone(),
                |mut map| {
                    for pair in map.drain() {
                        black_box(pair);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_mixed_probabilistic_zipf<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "mixed_probabilistic_zipf_{}",
        core::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    const KEY_SPACE_MULTIPLIER: f32 = 2.0;

    for &size in SIZES[..=MAX_SIZE].iter() {
        let mut rng = SmallRng::from_os_rng();
        let operations = (0..size * 3)
            .map(|_| {
                let op_choice: f64 = rng.sample(distr::Uniform::new(0.0, 1.0).unwrap());
                if op_choice < 0.5 {
                    Operation::Find
                } else if op_choice < 0.75 {
                    Operation::Insert
                } else {
                    Operation::Remove
                }
            })
            .collect::<Vec<Operation>>();

        let insert_distr = Zipf::new(size as f32 - 1.0, 1.0).unwrap();
        let find_remove_distr = Zipf::new(size as f32 * KEY_SPACE_MULTIPLIER - 1.0, 1.0).unwrap();
        let keyed_operations = operations
            .into_iter()
            .map(|operation| {
                let key = match operation {
                    Operation::Insert => rng.sample(insert_distr),
                    Operation::Remove | Operation::Find => rng.sample(find_remove_distr),
                };
                (operation, K::new(key as u64))
            })
            .collect::<Vec<(Operation, K)>>();
        let builder = SipBuilder::random();

        group.throughput(Throughput::Elements(size as u64 * 3));
        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter(|| {
                let mut map = QuadHashMap::new();
                for (operation, key) in &keyed_operations {
                    match operation {
                        Operation::Insert => map.put(key.clone(), 0u64),
                        Operation::Remove => {
                            black_box(map.remove(key));
                        }
                        Operation::Find => {
                            black_box(map.get(key));
                        }
                    }
                }
                black_box(map)
            })
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                let mut map = HashbrownHashMap::with_hasher(builder);
                for (operation, key) in &keyed_operations {
                    match operation {
                        Operation::Insert => {
                            map.insert(key.clone(), 0u64);
                        }
                        Operation::Remove => {
                            black_box(map.remove(key));
                        }
                        Operation::Find => {
                            black_box(map.get(key));
                        }
                    }
                }
                black_box(map)
            })
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| {
                let mut map = StdHashMap::with_hasher(builder);
                for (operation, key) in &keyed_operations {
                    match operation {
                        Operation::Insert => {
                            map.insert(key.clone(), 0u64);
                        }
                        Operation::Remove => {
                            black_box(map.remove(key));
                        }
                        Operation::Find => {
                            black_box(map.get(key));
                        }
                    }
                }
                black_box(map)
            })
        });
    }

    group.finish();
}

fn bench_churn<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("churn_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        // Every key appears twice: the first visit inserts, the second removes.
        let insertions_and_removals = (0..size as u64)
            .flat_map(|i| {
                let key = K::new(i);
                [key.clone(), key]
            })
            .collect::<Vec<K>>();
        let builder = SipBuilder::random();

        group.throughput(Throughput::Elements(size as u64 * 2));
        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter_batched(
                || shuffled(&insertions_and_removals),
                |keys| {
                    let mut map = QuadHashMap::new();
                    for key in keys {
                        match map.entry(key) {
                            quad_hash::Entry::Vacant(entry) => {
                                entry.insert(0u64);
                            }
                            quad_hash::Entry::Occupied(entry) => {
                                black_box(entry.remove());
                            }
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&insertions_and_removals),
                |keys| {
                    let mut map = HashbrownHashMap::with_hasher(builder);
                    for key in keys {
                        match map.entry(key) {
                            hashbrown::hash_map::Entry::Vacant(entry) => {
                                entry.insert(0u64);
                            }
                            hashbrown::hash_map::Entry::Occupied(entry) => {
                                black_box(entry.remove());
                            }
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_mixed_probabilistic_zipf::<u64, 6>,
    bench_mixed_probabilistic_zipf::<String, 6>,
    bench_churn::<u64, 6>,
    bench_churn::<String, 6>,
    bench_insert_random::<u64, 6>,
    bench_insert_random::<String, 6>,
    bench_find_hit::<u64, 6>,
    bench_find_hit::<String, 6>,
    bench_find_miss::<u64, 6>,
    bench_find_miss::<String, 6>,
    bench_remove::<u64, 6>,
    bench_remove::<String, 6>,
    bench_iteration::<u64, 6>,
    bench_iteration::<String, 6>,
    bench_drain::<u64, 6>,
    bench_drain::<String, 6>,
);

criterion_main!(benches);
