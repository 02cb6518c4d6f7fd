// benches/arithmetic.rs

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use safeprime::integer_math::multiplication::{fft_multiply, schoolbook_multiply};
use safeprime::{mod_pow, BigInteger, StaticRandom};
use std::hint::black_box;

fn random_limbs(rng: &mut StaticRandom, limbs: usize) -> BigInteger {
    // ~29.9 bits per base-10^9 limb
    rng.next_bits(limbs * 29)
}

pub fn bench_multiply(c: &mut Criterion) {
    let mut rng = StaticRandom::from_seed_u64(1);
    let mut group = c.benchmark_group("multiply");
    for limbs in [32usize, 150, 600] {
        let a = random_limbs(&mut rng, limbs);
        let b = random_limbs(&mut rng, limbs);
        group.bench_with_input(BenchmarkId::new("schoolbook", limbs), &limbs, |bench, _| {
            bench.iter(|| schoolbook_multiply(black_box(a.limbs()), black_box(b.limbs())))
        });
        group.bench_with_input(BenchmarkId::new("fft", limbs), &limbs, |bench, _| {
            bench.iter(|| fft_multiply(black_box(a.limbs()), black_box(b.limbs())))
        });
    }
    group.finish();
}

pub fn bench_mod_pow(c: &mut Criterion) {
    let mut rng = StaticRandom::from_seed_u64(2);
    let mut group = c.benchmark_group("mod_pow");
    group.sample_size(20);
    for bits in [256usize, 512, 1024] {
        let modulus = rng.next_bits(bits) * 2 + 1;
        let base = rng.next_bits(bits - 1);
        let exponent = rng.next_bits(bits);
        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |bench, _| {
            bench.iter(|| mod_pow(black_box(&base), black_box(&exponent), black_box(&modulus)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_multiply, bench_mod_pow);
criterion_main!(benches);
