mod flat;

use std::ops::Range;

pub use flat::MerkleTree;

use crate::node::{branch_hash, Hasher, Node};

/// Index ranges of each level of a flat tree, from the leaves up to the root.
///
/// `leaf_width` must be a power of two.
pub(crate) fn level_ranges(leaf_width: usize) -> impl Iterator<Item = Range<usize>> {
    let mut offset = 0;
    let mut width = leaf_width;
    std::iter::from_fn(move || {
        if width == 0 {
            return None;
        }
        let level = offset..offset + width;
        offset += width;
        width /= 2;
        Some(level)
    })
}

/// Walk up the tree from a leaf, recomputing each parent from the sibling path.
/// Returns the digest reached after the last step.
/// * `leaf` - starting leaf digest.
/// * `positions` - flat tree index of each sibling (from the leaf level upward).
/// * `siblings` - sibling slot found at each position.
/// * `for_each` - Closure that is executed at each step of the traversal of the tree.
///     * `step: usize` - current step, 0 being the leaf level
///     * `current: &[u8; HASH_SIZE]` - current digest on the way to the root
///     * `sibling: &Node<HASH_SIZE>` - sibling slot of the current digest
///     * `parent: &[u8; HASH_SIZE]` - parent digest computed at this step
pub fn walk_up<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone>(
    leaf: &[u8; HASH_SIZE],
    positions: &[usize],
    siblings: &[Node<HASH_SIZE>],
    mut for_each: impl FnMut(usize, &[u8; HASH_SIZE], &Node<HASH_SIZE>, &[u8; HASH_SIZE]),
) -> [u8; HASH_SIZE] {
    let mut current = *leaf;
    for (step, (position, sibling)) in positions.iter().zip(siblings).enumerate() {
        // an even sibling sits on the left
        let parent = match sibling {
            Node::Absent => branch_hash::<HASH_SIZE, H>(&current, &current),
            Node::Hash(hash) if position % 2 == 0 => branch_hash::<HASH_SIZE, H>(hash, &current),
            Node::Hash(hash) => branch_hash::<HASH_SIZE, H>(&current, hash),
        };
        for_each(step, &current, sibling, &parent);
        current = parent;
    }
    current
}

#[cfg(test)]
mod test {
    use hex_literal::hex;

    use super::{level_ranges, walk_up};
    use crate::node::{branch_hash, DoubleSha256, Node};

    const A: [u8; 32] = hex!("5fd362bb7fe89969942cafdeaa0b71e726b759e52a256a1d33ef613410d71aaa");
    const B: [u8; 32] = hex!("e5f44aafcc241093201d5e67955d562089bf9374bf0313b4947fd3023e85a0ff");

    #[test]
    fn test_level_ranges() {
        assert_eq!(level_ranges(1).collect::<Vec<_>>(), vec![0..1]);
        assert_eq!(
            level_ranges(8).collect::<Vec<_>>(),
            vec![0..8, 8..12, 12..14, 14..15]
        );
    }

    #[test]
    fn test_walk_up_orders_children_by_position() {
        // sibling on the right of the leaf
        let got = walk_up::<32, DoubleSha256>(&A, &[1], &[Node::Hash(B)], |_, _, _, _| {});
        assert_eq!(got, branch_hash::<32, DoubleSha256>(&A, &B));
        // sibling on the left of the leaf
        let got = walk_up::<32, DoubleSha256>(&A, &[0], &[Node::Hash(B)], |_, _, _, _| {});
        assert_eq!(got, branch_hash::<32, DoubleSha256>(&B, &A));
    }

    #[test]
    fn test_walk_up_duplicates_on_absent_sibling() {
        let got = walk_up::<32, DoubleSha256>(&A, &[1], &[Node::Absent], |_, _, _, _| {});
        assert_eq!(got, branch_hash::<32, DoubleSha256>(&A, &A));
    }

    #[test]
    fn test_walk_up_without_steps_returns_leaf() {
        let got = walk_up::<32, DoubleSha256>(&A, &[], &[], |_, _, _, _| {
            panic!("no step expected")
        });
        assert_eq!(got, A);
    }

    #[test]
    fn test_walk_up_reports_each_step() {
        let mut steps = Vec::new();
        let got = walk_up::<32, DoubleSha256>(
            &A,
            &[1, 5],
            &[Node::Hash(B), Node::Absent],
            |step, current, sibling, parent| steps.push((step, *current, *sibling, *parent)),
        );
        let first = branch_hash::<32, DoubleSha256>(&A, &B);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0], (0, A, Node::Hash(B), first));
        assert_eq!(steps[1].0, 1);
        assert_eq!(steps[1].1, first);
        assert_eq!(steps[1].3, got);
    }
}
