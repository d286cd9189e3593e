use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use giftcard_core::{checksum, CardEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_generate(c: &mut Criterion) {
    let engine = CardEngine::new();
    let mut group = c.benchmark_group("generate");

    for name in ["Costco Shop Card", "Vanilla Visa Gift Card", "Target eGift Card"] {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| engine.generate_with(black_box(name), 100, &mut rng).unwrap())
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let engine = CardEngine::new();
    c.bench_function("validate/checksum", |b| {
        b.iter(|| {
            engine
                .validate(
                    black_box("Vanilla Visa Gift Card"),
                    black_box("4532015112830366"),
                    black_box("123"),
                )
                .unwrap()
        })
    });
}

fn bench_check_digit(c: &mut Criterion) {
    c.bench_function("checksum/check_digit", |b| {
        b.iter(|| checksum::check_digit(black_box("453201511283036")))
    });
}

criterion_group!(benches, bench_generate, bench_validate, bench_check_digit);
criterion_main!(benches);
