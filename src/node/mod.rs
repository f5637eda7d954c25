mod branch;

use sha2::{Digest, Sha256};
use std::fmt::Debug;
use std::fmt::Display;

use crate::TreeError;

pub use branch::branch_hash;

/// Simple hash trait required to hash the nodes in the tree
///
/// # Type Parameters
/// * `HASH_SIZE` - The size of the hash digest in bytes
pub trait Hasher<const HASH_SIZE: usize> {
    fn hash(data: &[u8]) -> [u8; HASH_SIZE];
}

/// SHA-256 applied twice: `sha256(sha256(data))`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoubleSha256;

impl Hasher<32> for DoubleSha256 {
    fn hash(data: &[u8]) -> [u8; 32] {
        let first = Sha256::digest(data);
        Sha256::digest(first).into()
    }
}

/// Parses the textual form of a digest.
///
/// The input must be exactly `2 * HASH_SIZE` hex digits. Anything else is rejected
/// instead of being truncated or padded.
pub fn parse_hash<const HASH_SIZE: usize>(s: &str) -> Result<[u8; HASH_SIZE], TreeError> {
    let mut out = [0u8; HASH_SIZE];
    hex::decode_to_slice(s, &mut out)?;
    Ok(out)
}

/// A slot of the flat tree: either a digest or an absent padding node.
///
/// # Type Parameters
/// * `HASH_SIZE` - The size of the hash digest in bytes
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Node<const HASH_SIZE: usize> {
    /// A present digest
    Hash([u8; HASH_SIZE]),
    /// Padding produced by a leaf count that is not a power of two
    Absent,
}

impl<const HASH_SIZE: usize> Node<HASH_SIZE> {
    /// Returns the digest held by the node, if any. NO HASHING IS DONE HERE.
    pub fn hash(&self) -> Option<&[u8; HASH_SIZE]> {
        match self {
            Self::Hash(hash) => Some(hash),
            Self::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Lowercase hex of the digest, `None` for an absent node.
    pub fn to_hex(&self) -> Option<String> {
        self.hash().map(hex::encode)
    }
}

impl<const HASH_SIZE: usize> Default for Node<HASH_SIZE> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<const HASH_SIZE: usize> From<[u8; HASH_SIZE]> for Node<HASH_SIZE> {
    fn from(hash: [u8; HASH_SIZE]) -> Self {
        Self::Hash(hash)
    }
}

impl<const HASH_SIZE: usize> From<Option<[u8; HASH_SIZE]>> for Node<HASH_SIZE> {
    fn from(hash: Option<[u8; HASH_SIZE]>) -> Self {
        hash.map_or(Self::Absent, Self::Hash)
    }
}

impl<const HASH_SIZE: usize> Debug for Node<HASH_SIZE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(hash) => write!(f, "Hash({})", hex::encode(hash)),
            Self::Absent => write!(f, "Absent"),
        }
    }
}

impl<const HASH_SIZE: usize> Display for Node<HASH_SIZE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(hash) => f.write_str(&hex::encode(hash)),
            Self::Absent => f.write_str("absent"),
        }
    }
}
