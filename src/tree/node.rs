//! The node capability shared by branches and leaves.
//!
//! Every element of a tree is a [`Node`]: either a [`Branch`] owning named
//! children or a [`Leaf`] holding a scalar. Both variants, and the enum
//! itself, implement [`TreeNode`], which covers the three projections
//! (nested value, JSON, ASCII outline) plus emptiness and path queries.
//!
//! # Example
//!
//! ```
//! use magictree::{Branch, Node, TreeNode, Value};
//!
//! let mut root = Branch::new();
//! root.get("answer").unwrap().assign("value", 42);
//!
//! let node: &Node = root.find("answer.value").unwrap();
//! assert!(node.is_leaf());
//! assert!(!node.is_empty());
//! assert_eq!(node.to_value(), Value::from(42));
//! ```

use super::branch::Branch;
use super::leaf::Leaf;
use super::path::KeyPath;
use super::scalar::Scalar;
use super::value::Value;
use serde::{Serialize, Serializer};

/// Projections and queries every tree element supports.
pub trait TreeNode {
    /// Plain nested representation: leaves become scalars, branches mappings.
    fn to_value(&self) -> Value;

    /// JSON projection with insertion-ordered objects.
    fn to_json(&self) -> serde_json::Value;

    /// ASCII outline at the given depth.
    fn to_ascii(&self, indent: usize) -> String;

    /// Leaves are never empty; branches are empty when all children are.
    fn is_empty(&self) -> bool;

    /// Returns true if every part of `path` resolves below this node.
    fn has_path(&self, path: &KeyPath) -> bool;
}

/// A tree element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Branch(Branch),
    Leaf(Leaf),
}

impl Node {
    /// Classifies `value`: scalars become leaves, mappings become branches.
    pub fn from_value(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Scalar(scalar) => Node::Leaf(Leaf::new(scalar)),
            Value::Mapping(mapping) => Node::Branch(Branch::from_mapping(mapping)),
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(b) => Some(b),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_branch_mut(&mut self) -> Option<&mut Branch> {
        match self {
            Node::Branch(b) => Some(b),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(l) => Some(l),
            Node::Branch(_) => None,
        }
    }

    /// The scalar held by a leaf.
    pub fn scalar(&self) -> Option<&Scalar> {
        self.as_leaf().map(Leaf::value)
    }

    /// Non-vivifying existence check; always false on a leaf.
    pub fn has(&self, path: impl Into<KeyPath>) -> bool {
        self.has_path(&path.into())
    }

    /// Non-vivifying lookup below this node.
    pub fn find(&self, path: impl Into<KeyPath>) -> Option<&Node> {
        match self {
            Node::Branch(b) => b.find(path),
            Node::Leaf(_) => None,
        }
    }
}

impl TreeNode for Node {
    fn to_value(&self) -> Value {
        match self {
            Node::Branch(b) => b.to_value(),
            Node::Leaf(l) => l.to_value(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Node::Branch(b) => b.to_json(),
            Node::Leaf(l) => l.to_json(),
        }
    }

    fn to_ascii(&self, indent: usize) -> String {
        match self {
            Node::Branch(b) => b.to_ascii(indent),
            Node::Leaf(l) => l.to_ascii(indent),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Node::Branch(b) => TreeNode::is_empty(b),
            Node::Leaf(l) => TreeNode::is_empty(l),
        }
    }

    fn has_path(&self, path: &KeyPath) -> bool {
        match self {
            Node::Branch(b) => b.has_path(path),
            Node::Leaf(l) => l.has_path(path),
        }
    }
}

impl TreeNode for Leaf {
    fn to_value(&self) -> Value {
        Value::Scalar(self.value().clone())
    }

    fn to_json(&self) -> serde_json::Value {
        match self.value() {
            Scalar::String(s) => serde_json::Value::String(s.clone()),
            Scalar::Number(n) => match n.to_json_number() {
                Some(number) => serde_json::Value::Number(number),
                None => serde_json::Value::String(n.to_string()),
            },
            Scalar::Boolean(b) => serde_json::Value::Bool(*b),
        }
    }

    fn to_ascii(&self, _indent: usize) -> String {
        self.render()
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn has_path(&self, _path: &KeyPath) -> bool {
        false
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Branch(b) => b.serialize(serializer),
            Node::Leaf(l) => l.serialize(serializer),
        }
    }
}

impl From<Branch> for Node {
    fn from(branch: Branch) -> Self {
        Node::Branch(branch)
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value_classifies_scalars_as_leaves() {
        let node = Node::from_value("gasfly");
        assert!(node.is_leaf());
        assert_eq!(node.scalar(), Some(&Scalar::from("gasfly")));
    }

    #[test]
    fn test_from_value_classifies_mappings_as_branches() {
        let mut mapping = indexmap::IndexMap::new();
        mapping.insert("a".to_string(), Value::from(1));
        let node = Node::from_value(mapping);
        assert!(node.is_branch());
        assert!(node.has("a"));
    }

    #[test]
    fn test_leaf_has_no_descendants() {
        let node = Node::from_value(true);
        assert!(!node.has("anything"));
        assert!(node.find("anything").is_none());
    }

    #[test]
    fn test_falsy_leaves_are_not_empty() {
        assert!(!Node::from_value(false).is_empty());
        assert!(!Node::from_value("").is_empty());
        assert!(!Node::from_value(0).is_empty());
    }

    #[test]
    fn test_leaf_json() {
        assert_eq!(Leaf::new(3).to_json(), serde_json::json!(3));
        assert_eq!(Leaf::new(true).to_json(), serde_json::json!(true));
        assert_eq!(Leaf::new("x").to_json(), serde_json::json!("x"));
    }

    #[test]
    fn test_leaf_json_never_emits_null() {
        use crate::tree::scalar::Number;

        assert_eq!(Leaf::new(f64::NAN).to_json(), serde_json::json!("NaN"));
        let raw = Leaf::new(Scalar::Number(Number::Float(f64::NEG_INFINITY)));
        assert_eq!(raw.to_json(), serde_json::json!("-inf"));
        assert_eq!(
            Leaf::new(u64::MAX).to_json(),
            serde_json::json!(18446744073709551615u64)
        );
    }
}
