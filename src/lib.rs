//! Binary Merkle tree with audit paths
//!
//! This crate builds a binary Merkle tree over an ordered list of leaf digests, produces
//! an inclusion proof (audit path) for any leaf and verifies such a proof against a root
//! without access to the full tree.
//!
//! The tree supports:
//! - Power-of-two padding, an unpaired left node being hashed with itself
//! - Flat storage of every level in one array
//! - Pluggable hashing through the `Hasher` trait (double SHA-256 by default)
//! - Parallel level reduction behind the `multi-thread` feature

mod error;
mod node;
mod proof;
mod tree;

pub use error::TreeError;
pub use node::{branch_hash, parse_hash, DoubleSha256, Hasher, Node};
pub use proof::Proof;
pub use tree::{walk_up, MerkleTree};

#[cfg(test)]
mod tests;
