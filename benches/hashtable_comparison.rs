use core::hint::black_box;

use chain_hash::Chain;
use chain_hash::HashTable;
use chain_hash::LinkedChain;
use chain_hash::VecChain;
use chain_hash::hasher::CharCodeSum;
use chain_hash::hasher::FoldKeyHasher;
use chain_hash::hasher::KeyHasher;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Distribution;
use rand_distr::Zipf;

const SIZES: &[usize] = &[(1 << 8), (1 << 10), (1 << 12), (1 << 14)];

fn make_keys(count: usize, rng: &mut SmallRng) -> Vec<String> {
    (0..count)
        .map(|_| format!("key_{:016X}", rng.random::<u64>()))
        .collect()
}

fn fill<S: KeyHasher + Default, C: Chain<u64>>(keys: &[String]) -> HashTable<u64, S, C> {
    let mut table = HashTable::default();
    for (i, key) in keys.iter().enumerate() {
        table.set(key.as_str(), i as u64);
    }
    table
}

fn bench_insert_case<S: KeyHasher + Default, C: Chain<u64>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    name: &str,
    keys: &[String],
) {
    group.bench_function(name, |b| {
        b.iter_batched(
            || {
                let mut keys = keys.to_vec();
                keys.shuffle(&mut SmallRng::from_os_rng());
                keys
            },
            |keys| {
                let mut table = HashTable::<u64, S, C>::default();
                for (i, key) in keys.into_iter().enumerate() {
                    black_box(table.set(key, i as u64));
                }
                black_box(table)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    let mut rng = SmallRng::seed_from_u64(0xC0FFEE);

    for &size in SIZES {
        let keys = make_keys(size, &mut rng);
        group.throughput(Throughput::Elements(size as u64));

        bench_insert_case::<CharCodeSum, VecChain<u64>>(
            &mut group,
            &format!("char_sum_vec/{size}"),
            &keys,
        );
        bench_insert_case::<FoldKeyHasher, VecChain<u64>>(
            &mut group,
            &format!("fold_vec/{size}"),
            &keys,
        );
        bench_insert_case::<FoldKeyHasher, LinkedChain<u64>>(
            &mut group,
            &format!("fold_linked/{size}"),
            &keys,
        );

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut map = HashbrownMap::new();
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i as u64));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_lookup_case<S: KeyHasher + Default, C: Chain<u64>>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    name: &str,
    keys: &[String],
    lookups: &[usize],
) {
    let table = fill::<S, C>(keys);
    group.bench_function(name, |b| {
        b.iter(|| {
            for &i in lookups {
                black_box(table.get(&keys[i]));
            }
        })
    });
}

fn bench_lookup_zipf(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_zipf");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    let mut rng = SmallRng::seed_from_u64(0xBEEF);

    for &size in SIZES {
        let keys = make_keys(size, &mut rng);
        let zipf = Zipf::new(size as f64, 1.1).unwrap();
        let lookups: Vec<usize> = (0..size)
            .map(|_| zipf.sample(&mut rng) as usize - 1)
            .collect();
        group.throughput(Throughput::Elements(lookups.len() as u64));

        bench_lookup_case::<CharCodeSum, VecChain<u64>>(
            &mut group,
            &format!("char_sum_vec/{size}"),
            &keys,
            &lookups,
        );
        bench_lookup_case::<FoldKeyHasher, VecChain<u64>>(
            &mut group,
            &format!("fold_vec/{size}"),
            &keys,
            &lookups,
        );
        bench_lookup_case::<FoldKeyHasher, LinkedChain<u64>>(
            &mut group,
            &format!("fold_linked/{size}"),
            &keys,
            &lookups,
        );

        let map: HashbrownMap<String, u64> = keys
            .iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), i as u64))
            .collect();
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for &i in &lookups {
                    black_box(map.get(keys[i].as_str()));
                }
            })
        });
    }

    group.finish();
}

fn bench_remove_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_all");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    let mut rng = SmallRng::seed_from_u64(0xDEAD);

    for &size in SIZES {
        let keys = make_keys(size, &mut rng);
        group.throughput(Throughput::Elements(size as u64));

        let table = fill::<FoldKeyHasher, VecChain<u64>>(&keys);
        group.bench_function(format!("fold_vec/{size}"), |b| {
            b.iter_batched(
                || table.clone(),
                |mut table| {
                    for key in &keys {
                        black_box(table.remove(key));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        let map: HashbrownMap<String, u64> = keys
            .iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), i as u64))
            .collect();
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || map.clone(),
                |mut map| {
                    for key in &keys {
                        black_box(map.remove(key.as_str()));
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
    bench_insert_random,
    bench_lookup_zipf,
    bench_remove_all
);
criterion_main!(benches);
