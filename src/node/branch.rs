use super::{Hasher, Node};

/// Hashes two child digests into their parent: `H(left ++ right)`.
pub fn branch_hash<const HASH_SIZE: usize, H: Hasher<HASH_SIZE>>(
    left: &[u8; HASH_SIZE],
    right: &[u8; HASH_SIZE],
) -> [u8; HASH_SIZE] {
    H::hash([left.as_slice(), right.as_slice()].concat().as_slice())
}

impl<const HASH_SIZE: usize> Node<HASH_SIZE> {
    /// Creates the parent of two sibling slots. This function performs at most one hash.
    ///
    /// An absent left child gives an absent parent. A present left child next to an
    /// absent right child is paired with itself.
    pub fn parent<H: Hasher<HASH_SIZE>>(left: &Self, right: &Self) -> Self {
        match (left, right) {
            (Self::Absent, _) => Self::Absent,
            (Self::Hash(left), Self::Absent) => Self::Hash(branch_hash::<HASH_SIZE, H>(left, left)),
            (Self::Hash(left), Self::Hash(right)) => {
                Self::Hash(branch_hash::<HASH_SIZE, H>(left, right))
            }
        }
    }
}
