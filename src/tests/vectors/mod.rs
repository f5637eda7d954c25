use std::fs;
use std::path::PathBuf;

mod types;

use crate::{
    parse_hash, tests::vectors::types::TestVectors, DoubleSha256, MerkleTree, Proof, TreeError,
};

fn run_test_vectors(test_vectors: &TestVectors) {
    if let Some(valid_cases) = &test_vectors.valid_test_cases {
        for valid_case in valid_cases {
            let comment = valid_case.comment.as_deref().unwrap_or("unnamed test");
            println!("Running test case: {}", comment);

            let leaves = valid_case.leaves.to_nodes().unwrap();
            let tree = MerkleTree::<32, DoubleSha256>::build(&leaves).unwrap();
            assert_eq!(tree.nodes().len(), 2 * leaves.len().next_power_of_two() - 1);

            if let Some(root_hash) = &valid_case.root_hash {
                let expected = parse_hash::<32>(root_hash).unwrap();
                assert_eq!(tree.root().hash(), Some(&expected), "{}", comment);
            }

            if let Some(inclusion_proofs) = &valid_case.inclusion_proofs {
                for proof_case in inclusion_proofs {
                    let leaf = proof_case.leaf_as_bytes().unwrap();
                    let proof = tree.merkle_proof(&leaf).unwrap();
                    assert_eq!(
                        proof.positions(),
                        proof_case.positions.as_slice(),
                        "{}",
                        comment
                    );
                    assert_eq!(proof.verify(&leaf), Ok(true), "{}", comment);

                    let encoded = proof.encode().unwrap();
                    let decoded = Proof::<32, DoubleSha256>::decode(&encoded).unwrap();
                    assert_eq!(decoded.verify(&leaf), Ok(true), "{}", comment);
                }
            }
        }
    }

    if let Some(error_cases) = &test_vectors.error_test_cases {
        for error_case in error_cases {
            let comment = error_case
                .comment
                .as_deref()
                .unwrap_or("unnamed error test");
            println!("Running error test case: {}", comment);

            let leaves = error_case.leaves.to_nodes().unwrap();
            let tree = MerkleTree::<32, DoubleSha256>::build(&leaves).unwrap();
            let leaf = parse_hash::<32>(&error_case.proof_leaf).unwrap();
            assert_eq!(
                tree.merkle_proof(&leaf).unwrap_err(),
                TreeError::LeafNotFound,
                "{}",
                comment
            );
        }
    }

    if let Some(invalid_digests) = &test_vectors.invalid_digests {
        for digest in invalid_digests {
            assert!(
                matches!(parse_hash::<32>(digest), Err(TreeError::InvalidEncoding(_))),
                "{:?} should be rejected",
                digest
            );
        }
    }
}

#[test]
fn test_merkle_tree_vectors() {
    let path = PathBuf::from("src/tests/vectors/testdata/merkle_tree_vectors.json");
    let json = fs::read_to_string(&path).unwrap();
    let test_vectors = serde_json::from_str::<TestVectors>(&json).unwrap();
    run_test_vectors(&test_vectors);
}
