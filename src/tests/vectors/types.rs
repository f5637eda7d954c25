use serde::{Deserialize, Serialize};

use crate::{parse_hash, Node, TreeError};

/// Represents a full vector file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVectors {
    pub valid_test_cases: Option<Vec<ValidTestCase>>,
    pub error_test_cases: Option<Vec<ErrorTestCase>>,
    pub invalid_digests: Option<Vec<String>>,
}

/// Leaves of a tree, `null` standing for an absent slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestLeaves(pub Vec<Option<String>>);

impl TestLeaves {
    /// Convert to tree slots
    pub fn to_nodes(&self) -> Result<Vec<Node<32>>, TreeError> {
        self.0
            .iter()
            .map(|leaf| match leaf {
                Some(hash) => parse_hash(hash).map(Node::Hash),
                None => Ok(Node::Absent),
            })
            .collect()
    }
}

/// Represents a case where every listed proof must verify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidTestCase {
    pub comment: Option<String>,
    pub leaves: TestLeaves,
    pub root_hash: Option<String>,
    pub inclusion_proofs: Option<Vec<TestProof>>,
}

/// Represents an expected inclusion proof
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestProof {
    pub leaf: String,
    pub positions: Vec<usize>,
}

impl TestProof {
    /// Get the leaf as bytes
    pub fn leaf_as_bytes(&self) -> Result<[u8; 32], TreeError> {
        parse_hash(&self.leaf)
    }
}

/// Represents a case where proof generation must fail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorTestCase {
    pub comment: Option<String>,
    pub leaves: TestLeaves,
    pub proof_leaf: String,
}
