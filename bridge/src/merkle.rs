//! Withdrawal Merkle trees
//!
//! Leaves and inner nodes are hashed with distinct one-byte domain tags so an
//! inner node can never be presented as a leaf.

use crate::hash::keccak256;

/// Prefix of every leaf preimage
pub const LEAF_TAG: u8 = 0x00;

/// Prefix of every inner node preimage
pub const NODE_TAG: u8 = 0x01;

/// Hash of an inner node: keccak256(0x01 ‖ left ‖ right)
pub fn node_hash(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut data = [0u8; 65];
    data[0] = NODE_TAG;
    data[1..33].copy_from_slice(left);
    data[33..65].copy_from_slice(right);
    keccak256(&data)
}

/// One step of an inclusion proof
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MerklePathNode {
    pub hash: [u8; 32],
    /// The sibling is the left operand at this level
    pub is_left_side: bool,
}

/// Fold `path` over `leaf` and compare against `root`.
///
/// Side flags are taken as supplied; the verifier does not derive them from
/// a leaf index.
pub fn verify_proof(leaf: &[u8; 32], path: &[MerklePathNode], root: &[u8; 32]) -> bool {
    let computed = path.iter().fold(*leaf, |current, sibling| {
        if sibling.is_left_side {
            node_hash(&sibling.hash, &current)
        } else {
            node_hash(&current, &sibling.hash)
        }
    });
    computed == *root
}

/// Binary tree over withdrawal leaves, as the subnet builds it.
///
/// Odd levels pair their last node with itself. An empty tree has the
/// all-zero root.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    pub fn new(leaves: Vec<[u8; 32]>) -> Self {
        let mut levels = vec![leaves];
        while levels[levels.len() - 1].len() > 1 {
            let next = levels[levels.len() - 1]
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    node_hash(left, pair.get(1).unwrap_or(left))
                })
                .collect();
            levels.push(next);
        }
        MerkleTree { levels }
    }

    pub fn root(&self) -> [u8; 32] {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or([0u8; 32])
    }

    /// Sibling path for the leaf at `index`, bottom-up
    pub fn proof(&self, index: usize) -> Option<Vec<MerklePathNode>> {
        if index >= self.levels[0].len() {
            return None;
        }

        let mut path = Vec::with_capacity(self.levels.len().saturating_sub(1));
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let is_right_child = position % 2 == 1;
            let sibling_position = if is_right_child {
                position - 1
            } else {
                position + 1
            };
            let sibling = level.get(sibling_position).unwrap_or(&level[position]);
            path.push(MerklePathNode {
                hash: *sibling,
                is_left_side: is_right_child,
            });
            position /= 2;
        }
        Some(path)
    }
}
