use criterion::{black_box, criterion_group, criterion_main, Criterion};
use merkle_audit::{DoubleSha256, MerkleTree, Proof};

pub fn generate_random_leaves(num_leaves: usize) -> Vec<[u8; 32]> {
    (0..num_leaves).map(|_| rand::random()).collect()
}

fn bench_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Merkle Proof Generation");

    for num_leaves in [100, 10_000] {
        let leaves = generate_random_leaves(num_leaves);
        let tree = MerkleTree::<32, DoubleSha256>::from_hashes(&leaves).unwrap();

        group.bench_function(format!("{} leaves", num_leaves), |b| {
            b.iter(|| {
                for leaf in leaves.iter().take(100) {
                    black_box(tree.merkle_proof(leaf)).unwrap();
                }
            })
        });
    }

    group.finish();
}

fn bench_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Merkle Proof Verification");

    for num_leaves in [100, 10_000] {
        let leaves = generate_random_leaves(num_leaves);
        let tree = MerkleTree::<32, DoubleSha256>::from_hashes(&leaves).unwrap();
        let proofs = leaves
            .iter()
            .take(100)
            .map(|leaf| (*leaf, tree.merkle_proof(leaf).unwrap()))
            .collect::<Vec<_>>();

        group.bench_function(format!("{} leaves", num_leaves), |b| {
            b.iter(|| {
                for (leaf, proof) in &proofs {
                    assert!(black_box(proof.verify(leaf)).unwrap());
                }
            })
        });
    }

    group.finish();
}

fn bench_proof_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Merkle Proof Encoding");

    let leaves = generate_random_leaves(10_000);
    let tree = MerkleTree::<32, DoubleSha256>::from_hashes(&leaves).unwrap();
    let proof = tree.merkle_proof(&leaves[4_321]).unwrap();
    let encoded = proof.encode().unwrap();

    group.bench_function("Encode", |b| b.iter(|| black_box(proof.encode()).unwrap()));
    group.bench_function("Decode", |b| {
        b.iter(|| black_box(Proof::<32, DoubleSha256>::decode(&encoded)).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_proof_generation,
    bench_proof_verification,
    bench_proof_encoding
);
criterion_main!(benches);
