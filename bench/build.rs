use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use merkle_audit::{DoubleSha256, MerkleTree};

pub fn generate_random_leaves(num_leaves: usize) -> Vec<[u8; 32]> {
    (0..num_leaves).map(|_| rand::random()).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Merkle Tree Build");

    // odd counts exercise the padding path
    for num_leaves in [1_000, 1_025, 65_536] {
        let leaves = generate_random_leaves(num_leaves);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_leaves),
            &leaves,
            |b, leaves| b.iter(|| black_box(MerkleTree::<32, DoubleSha256>::from_hashes(leaves)).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
