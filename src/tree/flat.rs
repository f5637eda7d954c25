//! Flat, bottom-up binary Merkle tree

use std::{collections::HashMap, marker::PhantomData};

use log::{debug, trace};

use super::level_ranges;
use crate::{
    node::{Hasher, Node},
    Proof, TreeError,
};

/// Binary Merkle tree stored as one contiguous array of slots.
///
/// For `P` leaf slots (the smallest power of two holding every leaf) the array has
/// `2 * P - 1` entries: the leaves first, then each level above, the root last.
/// * `HASH_SIZE` - size of the hash digest in bytes.
/// * `H` - Hasher that will be used to hash nodes.
#[derive(Debug, Clone)]
pub struct MerkleTree<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    nodes: Vec<Node<HASH_SIZE>>,
    leaf_count: usize,
    leaf_index: HashMap<[u8; HASH_SIZE], usize>,
    _phantom: PhantomData<H>,
}

#[cfg(feature = "multi-thread")]
fn reduce_level<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone>(
    level: &[Node<HASH_SIZE>],
) -> Vec<Node<HASH_SIZE>> {
    use rayon::prelude::*;

    level
        .par_chunks_exact(2)
        .map(|pair| Node::parent::<H>(&pair[0], &pair[1]))
        .collect()
}

#[cfg(not(feature = "multi-thread"))]
fn reduce_level<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone>(
    level: &[Node<HASH_SIZE>],
) -> Vec<Node<HASH_SIZE>> {
    level
        .chunks_exact(2)
        .map(|pair| Node::parent::<H>(&pair[0], &pair[1]))
        .collect()
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> MerkleTree<HASH_SIZE, H> {
    /// Builds the tree from an ordered list of leaf slots. Slots past the last leaf
    /// are padded with [`Node::Absent`].
    pub fn build(leaves: &[Node<HASH_SIZE>]) -> Result<Self, TreeError> {
        if leaves.is_empty() {
            return Err(TreeError::EmptyInput);
        }
        let leaf_width = leaves.len().next_power_of_two();
        debug!(
            "building merkle tree from {} leaves over {} slots",
            leaves.len(),
            leaf_width
        );

        let mut nodes = Vec::with_capacity(leaf_width * 2 - 1);
        nodes.extend_from_slice(leaves);
        nodes.resize(leaf_width, Node::Absent);

        let mut start = 0;
        let mut width = leaf_width;
        while width > 1 {
            let parents = reduce_level::<HASH_SIZE, H>(&nodes[start..start + width]);
            start += width;
            width /= 2;
            trace!("level at offset {} holds {} nodes", start, parents.len());
            nodes.extend(parents);
        }

        // first match wins for duplicated leaves
        let mut leaf_index = HashMap::with_capacity(leaves.len());
        for (index, leaf) in leaves.iter().enumerate() {
            if let Node::Hash(hash) = leaf {
                leaf_index.entry(*hash).or_insert(index);
            }
        }

        Ok(Self {
            nodes,
            leaf_count: leaves.len(),
            leaf_index,
            _phantom: PhantomData,
        })
    }

    /// Builds the tree from present leaf digests only.
    pub fn from_hashes(leaves: &[[u8; HASH_SIZE]]) -> Result<Self, TreeError> {
        Self::build(&leaves.iter().copied().map(Node::Hash).collect::<Vec<_>>())
    }

    /// Every slot of the tree, leaves first and root last.
    pub fn nodes(&self) -> &[Node<HASH_SIZE>] {
        &self.nodes
    }

    /// Root node of the tree.
    pub fn root(&self) -> &Node<HASH_SIZE> {
        // a built tree holds at least one node
        &self.nodes[self.nodes.len() - 1]
    }

    /// Number of leaf slots, padding included. Always a power of two.
    pub fn leaf_width(&self) -> usize {
        (self.nodes.len() + 1) / 2
    }

    /// Number of leaves the tree was built from.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of levels above the leaves.
    pub fn depth(&self) -> usize {
        self.leaf_width().trailing_zeros() as usize
    }

    /// Leaf level, padding included.
    pub fn leaves(&self) -> &[Node<HASH_SIZE>] {
        &self.nodes[..self.leaf_width()]
    }

    /// Each level of the tree from the leaves up to the root.
    pub fn levels(&self) -> impl Iterator<Item = &[Node<HASH_SIZE>]> {
        level_ranges(self.leaf_width()).map(|level| &self.nodes[level])
    }

    /// Index of the first leaf holding `hash`.
    pub fn leaf_index(&self, hash: &[u8; HASH_SIZE]) -> Option<usize> {
        self.leaf_index.get(hash).copied()
    }

    /// Collects the audit path of a leaf: the sibling met at each level on the way up,
    /// followed by the root.
    pub fn merkle_proof(&self, target: &[u8; HASH_SIZE]) -> Result<Proof<HASH_SIZE, H>, TreeError> {
        let index = self.leaf_index(target).ok_or(TreeError::LeafNotFound)?;
        let mut positions = Vec::with_capacity(self.depth() + 1);
        let mut siblings = Vec::with_capacity(self.depth() + 1);

        let mut index_in_level = index;
        for level in level_ranges(self.leaf_width()).take(self.depth()) {
            let sibling = if index_in_level % 2 == 0 {
                index_in_level + 1
            } else {
                index_in_level - 1
            };
            positions.push(level.start + sibling);
            siblings.push(self.nodes[level.start + sibling]);
            index_in_level /= 2;
        }
        positions.push(self.nodes.len() - 1);
        siblings.push(*self.root());

        Ok(Proof::new(positions, siblings))
    }
}
