//! Proofs are used to verify that a leaf belongs to a tree.
//!
//! A proof is the list of siblings met on the way from a leaf up to the root, each
//! tagged with its index in the flat tree, followed by the root itself.
//!
//! A proof can be encoded into bytes, absent siblings being marked in a bitvector.
use std::marker::PhantomData;

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use log::trace;

use crate::{tree::level_ranges, walk_up, Hasher, Node, TreeError};

/// A merkle proof (audit path) for a given leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    positions: Vec<usize>,
    siblings: Vec<Node<HASH_SIZE>>,
    _phantom: PhantomData<H>,
}

/// Splits `len` bytes off the front of `data`.
fn take<'a>(data: &mut &'a [u8], len: usize) -> Result<&'a [u8], TreeError> {
    if data.len() < len {
        return Err(TreeError::MalformedProof);
    }
    let (head, tail) = data.split_at(len);
    *data = tail;
    Ok(head)
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Proof<HASH_SIZE, H> {
    /// Creates a new proof from its positions and siblings. The last entry is the root.
    /// Nothing is checked here, see [`Proof::validate`].
    pub fn new(positions: Vec<usize>, siblings: Vec<Node<HASH_SIZE>>) -> Self {
        Self {
            positions,
            siblings,
            _phantom: PhantomData,
        }
    }

    /// Flat tree index of each entry.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Slot found at each position, the root being the last one.
    pub fn siblings(&self) -> &[Node<HASH_SIZE>] {
        &self.siblings
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// The root this proof claims to lead to.
    pub fn root(&self) -> Option<&Node<HASH_SIZE>> {
        self.siblings.last()
    }

    /// Index of the proven leaf, derived from its first sibling.
    pub fn leaf_position(&self) -> Option<usize> {
        match self.positions.as_slice() {
            [] => None,
            [_root] => Some(0),
            [sibling, ..] => Some(sibling ^ 1),
        }
    }

    /// Checks that the proof describes a path of a tree with `2^(len - 1)` leaf slots.
    ///
    /// Positions must climb one level per entry, each one being the sibling of the
    /// parent of the previous pair, and the last one must be the root index.
    pub fn validate(&self) -> Result<(), TreeError> {
        let len = self.positions.len();
        if len == 0 || len != self.siblings.len() || len >= usize::BITS as usize {
            return Err(TreeError::MalformedProof);
        }
        let leaf_width = 1usize << (len - 1);

        let mut path_in_level = None;
        for (position, level) in self.positions[..len - 1]
            .iter()
            .zip(level_ranges(leaf_width))
        {
            if !level.contains(position) {
                return Err(TreeError::MalformedProof);
            }
            let sibling_in_level = position - level.start;
            if path_in_level.is_some_and(|path: usize| path ^ 1 != sibling_in_level) {
                return Err(TreeError::MalformedProof);
            }
            path_in_level = Some((sibling_in_level ^ 1) / 2);
        }

        if self.positions[len - 1] != leaf_width * 2 - 2 {
            return Err(TreeError::MalformedProof);
        }
        Ok(())
    }

    /// Verifies that `leaf` leads to the proof's root.
    ///
    /// A mismatch is `Ok(false)`. A proof that doesn't have the shape of an audit path
    /// is rejected with [`TreeError::MalformedProof`].
    pub fn verify(&self, leaf: &[u8; HASH_SIZE]) -> Result<bool, TreeError> {
        self.verify_with(leaf, |step, current, sibling, parent| {
            trace!(
                "step {}: {} with sibling {} gives {}",
                step,
                hex::encode(current),
                sibling,
                hex::encode(parent)
            )
        })
    }

    /// Same as [`Proof::verify`], calling `for_each` at each step of the walk up.
    /// See [`walk_up`] for the closure arguments.
    pub fn verify_with(
        &self,
        leaf: &[u8; HASH_SIZE],
        for_each: impl FnMut(usize, &[u8; HASH_SIZE], &Node<HASH_SIZE>, &[u8; HASH_SIZE]),
    ) -> Result<bool, TreeError> {
        self.validate()?;
        let last = self.len() - 1;
        let got_root = walk_up::<HASH_SIZE, H>(
            leaf,
            &self.positions[..last],
            &self.siblings[..last],
            for_each,
        );
        Ok(self.siblings[last].hash() == Some(&got_root))
    }

    /// Encodes the proof into a byte vector.
    ///
    /// Layout: entry count (`u16` BE), each position (`u64` BE), one bit per entry
    /// set when the slot is absent, then the present digests in order.
    pub fn encode(&self) -> Result<Vec<u8>, TreeError> {
        self.validate()?;
        let count = u16::try_from(self.len()).map_err(|_| TreeError::MalformedProof)?;
        let mut absent: BitVec<u8, Lsb0> = self.siblings.iter().map(Node::is_absent).collect();
        absent.set_uninitialized(false);

        let mut encoded = Vec::with_capacity(2 + self.len() * (9 + HASH_SIZE));
        encoded.extend_from_slice(&count.to_be_bytes());
        for position in self.positions.iter() {
            encoded.extend_from_slice(&(*position as u64).to_be_bytes());
        }
        encoded.extend_from_slice(absent.as_raw_slice());
        for node in self.siblings.iter() {
            if let Some(hash) = node.hash() {
                encoded.extend_from_slice(hash);
            }
        }
        Ok(encoded)
    }

    /// Decodes a proof from a byte vector produced by [`Proof::encode`].
    pub fn decode(mut data: &[u8]) -> Result<Self, TreeError> {
        let raw_count = take(&mut data, 2)?;
        let count = u16::from_be_bytes([raw_count[0], raw_count[1]]) as usize;

        let mut positions = Vec::with_capacity(count);
        for _ in 0..count {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(take(&mut data, 8)?);
            let position =
                usize::try_from(u64::from_be_bytes(raw)).map_err(|_| TreeError::MalformedProof)?;
            positions.push(position);
        }

        let absent = BitVec::<u8, Lsb0>::from_slice(take(&mut data, count.div_ceil(8))?);
        // padding bits of the last flag byte must be clear
        if absent[count..].any() {
            return Err(TreeError::MalformedProof);
        }
        let mut siblings = Vec::with_capacity(count);
        for i in 0..count {
            if absent[i] {
                siblings.push(Node::Absent);
            } else {
                let mut hash = [0u8; HASH_SIZE];
                hash.copy_from_slice(take(&mut data, HASH_SIZE)?);
                siblings.push(Node::Hash(hash));
            }
        }
        if !data.is_empty() {
            return Err(TreeError::MalformedProof);
        }

        let proof = Self::new(positions, siblings);
        proof.validate()?;
        Ok(proof)
    }
}
