//! Basic usage of the Merkle audit tree
//!
//! This example demonstrates:
//! - Parsing leaf digests from their hex form
//! - Building a tree and printing its levels
//! - Generating and verifying an audit path

use merkle_audit::{parse_hash, DoubleSha256, MerkleTree, TreeError};

fn main() -> Result<(), TreeError> {
    let leaves = [
        "5fd362bb7fe89969942cafdeaa0b71e726b759e52a256a1d33ef613410d71aaa",
        "e5f44aafcc241093201d5e67955d562089bf9374bf0313b4947fd3023e85a0ff",
        "00a8269382dc8d931583e7722f07dc56ee42e2c913d4fd571336966c47b2e115",
        "fe703d4b44f8116142115cd36e54b591ff20f471c6349fe4ab47915a13fceea8",
        "711453e26062ced8919b10264660d983664c5e5f0a6c5dbb4cd65ae58cb381f1",
    ]
    .iter()
    .map(|s| parse_hash::<32>(s))
    .collect::<Result<Vec<_>, _>>()?;

    let tree = MerkleTree::<32, DoubleSha256>::from_hashes(&leaves)?;
    println!("Merkle tree ({} leaves, {} slots)", tree.leaf_count(), tree.leaf_width());
    let mut index = 0;
    for (height, level) in tree.levels().enumerate() {
        println!("level {}", height);
        for node in level {
            println!("  {}: {}", index, node);
            index += 1;
        }
    }

    let target = leaves[4];
    let proof = tree.merkle_proof(&target)?;
    println!("\nAudit path for leaf {}", proof.leaf_position().unwrap_or_default());
    for (position, sibling) in proof.positions().iter().zip(proof.siblings()) {
        println!("  {}: {}", position, sibling);
    }

    let verified = proof.verify_with(&target, |step, current, _sibling, parent| {
        println!(
            "  step {}: {} -> {}",
            step,
            hex::encode(current),
            hex::encode(parent)
        )
    })?;
    println!("Verified: {}", verified);

    // a malformed digest is rejected instead of being padded
    if let Err(e) = parse_hash::<32>("5fd362bb") {
        println!("\n{}", e);
    }
    Ok(())
}
