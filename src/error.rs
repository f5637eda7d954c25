//! Error types for the Merkle audit tree

use std::error::Error;
use std::fmt::Display;

/// Error type for tree, proof and digest operations
#[derive(Debug, PartialEq, Clone)]
pub enum TreeError {
    /// Tree was built from zero leaves
    EmptyInput,
    /// Requested digest is not one of the tree's leaves
    LeafNotFound,
    /// Proof is empty or its positions and siblings don't describe a tree path
    MalformedProof,
    /// Digest text is not hex or has the wrong length
    InvalidEncoding(hex::FromHexError),
}

impl Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::EmptyInput => write!(f, "Cannot build a tree from zero leaves"),
            TreeError::LeafNotFound => write!(f, "Leaf not found in tree"),
            TreeError::MalformedProof => write!(f, "Malformed merkle proof"),
            TreeError::InvalidEncoding(e) => write!(f, "Invalid digest encoding: {}", e),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TreeError::InvalidEncoding(e) => Some(e),
            _ => None,
        }
    }
}

impl From<hex::FromHexError> for TreeError {
    fn from(e: hex::FromHexError) -> Self {
        TreeError::InvalidEncoding(e)
    }
}
