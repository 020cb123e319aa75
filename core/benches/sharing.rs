use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keyshard_core::{reconstruct, split};

const SECRET: &[u8] = b"benchmark secret payload spanning a realistic length";
const CONFIGURATIONS: &[(usize, usize)] = &[(2, 3), (3, 5), (4, 7)];

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");

    for &(threshold, shares) in CONFIGURATIONS {
        group.bench_function(format!("{threshold}-of-{shares}"), |b| {
            b.iter(|| {
                let encoded = split(black_box(SECRET), shares, threshold)
                    .expect("split succeeds");
                assert_eq!(encoded.len(), shares);
                encoded
            })
        });
    }

    group.finish();
}

fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");

    for &(threshold, shares) in CONFIGURATIONS {
        let encoded = split(SECRET, shares, threshold).expect("split succeeds");
        group.bench_function(format!("{threshold}-of-{shares}"), |b| {
            b.iter(|| {
                let secret = reconstruct(black_box(&encoded[..threshold]))
                    .expect("reconstruct succeeds");
                assert_eq!(secret, SECRET);
                secret
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_split, bench_reconstruct);
criterion_main!(benches);
