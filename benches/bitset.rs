use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;
use zero_alloc_bitset::FixedBitSet;

const SIZES: [usize; 3] = [300, 1 << 12, 1 << 20];

fn random_indexes(size: usize, count: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(size as u64);
    (0..count).map(|_| rng.gen_range(0..size)).collect()
}

fn bench_set(c: &mut Criterion) {
    for size in SIZES {
        let mut bits = FixedBitSet::new(size);
        let indexes = random_indexes(size, 1024);
        c.bench_function(&format!("{}/fn=set size={size}", module_path!()), |b| {
            b.iter(|| {
                for idx in &indexes {
                    bits.set(*idx).unwrap();
                }
            });
        });
    }
}

fn bench_get(c: &mut Criterion) {
    for size in SIZES {
        let bits = FixedBitSet::from_ones(size, random_indexes(size, size / 2)).unwrap();
        let indexes = random_indexes(size, 1024);
        c.bench_function(&format!("{}/fn=get size={size}", module_path!()), |b| {
            b.iter(|| {
                indexes
                    .iter()
                    .filter(|idx| black_box(&bits).get(**idx).unwrap())
                    .count()
            });
        });
    }
}

fn bench_and(c: &mut Criterion) {
    for size in SIZES {
        let mut bits = FixedBitSet::from_ones(size, [size - 1, size - 2, size - 3]).unwrap();
        let other = FixedBitSet::from_ones(size, [size - 3]).unwrap();
        c.bench_function(&format!("{}/fn=and size={size}", module_path!()), |b| {
            b.iter(|| bits.and(black_box(&other)).unwrap());
        });
    }
}

fn bench_popcount(c: &mut Criterion) {
    for size in SIZES {
        let bits = FixedBitSet::from_ones(size, random_indexes(size, size / 2)).unwrap();
        c.bench_function(&format!("{}/fn=popcount size={size}", module_path!()), |b| {
            b.iter(|| black_box(&bits).popcount());
        });
    }
}

fn bench_iter_ones(c: &mut Criterion) {
    for size in SIZES {
        let bits = FixedBitSet::from_ones(size, random_indexes(size, size / 64)).unwrap();
        c.bench_function(&format!("{}/fn=iter_ones size={size}", module_path!()), |b| {
            b.iter(|| black_box(&bits).iter_ones().sum::<usize>());
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_set, bench_get, bench_and, bench_popcount, bench_iter_ones,
}
criterion_main!(benches);
