//! MagicTree: an auto-vivifying, path-addressable tree.
//!
//! Build nested structure by navigating into it, then render it as a plain
//! nested value, a JSON document, or an indented ASCII outline.

pub mod config;
pub mod file;
pub mod tree;

pub use tree::{
    Branch, KeyPath, Leaf, Node, Number, Read, Scalar, TreeError, TreeNode, TreeResult, Value,
};
