//! Internal tree nodes with auto-vivifying navigation.
//!
//! A [`Branch`] owns an insertion-ordered map of named children. Navigating to
//! a key that does not exist yet inserts an empty branch there, so nested
//! structure can be built by navigation alone:
//!
//! ```
//! use magictree::Branch;
//!
//! let mut root = Branch::new();
//! root.get("colors")?
//!     .get("red")?
//!     .get("mars")?
//!     .assign("discovered", "on a sunday")
//!     .assign("isNice", true);
//!
//! assert!(root.has("colors.red.mars.discovered"));
//! assert_eq!(
//!     root.to_string(),
//!     "- colors\n  |- red\n  |  |- mars\n  |  |  |- discovered: \"on a sunday\"\n  |  |  |- isNice: true\n"
//! );
//! # Ok::<(), magictree::TreeError>(())
//! ```
//!
//! Navigation (`get`, `child`, `read`, `get_path`) mutates; queries (`has`,
//! `find`, `get_child`) never do.

use super::error::{TreeError, TreeResult};
use super::node::{Node, TreeNode};
use super::path::KeyPath;
use super::scalar::Scalar;
use super::value::Value;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, instrument, trace};

/// Marker repeated once per depth level in the ASCII outline.
const OUTLINE_INDENT: &str = "  |";

/// An internal node owning an ordered set of named children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Branch {
    children: IndexMap<String, Node>,
}

/// Result of [`Branch::read`]: a leaf's scalar, or the branch itself.
#[derive(Debug)]
pub enum Read<'a> {
    Value(&'a Scalar),
    Branch(&'a mut Branch),
}

impl<'a> Read<'a> {
    /// The scalar, if the read landed on a leaf.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Read::Value(scalar) => Some(scalar),
            Read::Branch(_) => None,
        }
    }

    /// The branch, if the read landed on one.
    pub fn into_branch(self) -> Option<&'a mut Branch> {
        match self {
            Read::Branch(branch) => Some(branch),
            Read::Value(_) => None,
        }
    }
}

impl Branch {
    /// An empty branch with no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a branch from a nested mapping, classifying every value.
    pub fn from_mapping(mapping: IndexMap<String, Value>) -> Self {
        Self {
            children: mapping
                .into_iter()
                .map(|(key, value)| (key, Node::from_value(value)))
                .collect(),
        }
    }

    /// Number of immediate children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when no leaf exists anywhere below, same as
    /// [`TreeNode::is_empty`]. A branch holding only empty branches is empty.
    pub fn is_empty(&self) -> bool {
        TreeNode::is_empty(self)
    }

    /// Whether `key` is an immediate child. Never creates anything.
    pub fn contains_key(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    /// Returns the child at `key`, inserting an empty branch if it is absent.
    pub fn child(&mut self, key: &str) -> &mut Node {
        if !self.children.contains_key(key) {
            trace!(key, "auto-vivifying branch");
        }
        self.children
            .entry(key.to_string())
            .or_insert_with(|| Node::Branch(Branch::new()))
    }

    /// Fluent navigation: the branch at `key`, created if absent.
    ///
    /// Fails with [`TreeError::InvalidPath`] when `key` holds a leaf; the leaf
    /// is left untouched.
    pub fn get(&mut self, key: &str) -> TreeResult<&mut Branch> {
        match self.child(key) {
            Node::Branch(branch) => Ok(branch),
            Node::Leaf(_) => Err(TreeError::InvalidPath {
                path: key.to_string(),
                reason: format!("'{}' is a leaf", key),
            }),
        }
    }

    /// Walks `path` with [`Branch::get`] semantics, creating every missing step.
    pub fn get_path(&mut self, path: impl Into<KeyPath>) -> TreeResult<&mut Branch> {
        let path = path.into();
        let mut current = self;
        for (depth, key) in path.parts().iter().enumerate() {
            current = match current.child(key) {
                Node::Branch(branch) => branch,
                Node::Leaf(_) => return Err(leaf_in_path(&path, depth)),
            };
        }
        Ok(current)
    }

    /// Like [`Branch::child`], but a leaf is returned as its scalar.
    pub fn read(&mut self, key: &str) -> Read<'_> {
        match self.child(key) {
            Node::Leaf(leaf) => Read::Value(leaf.value()),
            Node::Branch(branch) => Read::Branch(branch),
        }
    }

    /// Non-vivifying access to an immediate child.
    pub fn get_child(&self, key: &str) -> Option<&Node> {
        self.children.get(key)
    }

    /// Sets `key` to `value`, replacing whatever was there.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.children.insert(key.into(), Node::from_value(value));
    }

    /// Sets `key` from a value that may not be representable, e.g. JSON `null`.
    pub fn try_set<V>(&mut self, key: impl Into<String>, value: V) -> TreeResult<()>
    where
        V: TryInto<Value>,
        V::Error: Into<TreeError>,
    {
        let value = value.try_into().map_err(Into::into)?;
        self.set(key, value);
        Ok(())
    }

    /// Sets `key` and returns this same branch, so calls can be chained.
    pub fn assign(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.set(key, value);
        self
    }

    /// Chaining form of [`Branch::try_set`].
    pub fn try_assign<V>(&mut self, key: impl Into<String>, value: V) -> TreeResult<&mut Self>
    where
        V: TryInto<Value>,
        V::Error: Into<TreeError>,
    {
        self.try_set(key, value)?;
        Ok(self)
    }

    /// Attaches an existing node at `key` as-is.
    pub fn set_node(&mut self, key: impl Into<String>, node: impl Into<Node>) {
        self.children.insert(key.into(), node.into());
    }

    /// Removes the immediate child at `key`; absent keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let removed = self.children.shift_remove(key);
        if removed.is_none() {
            debug!(key, "remove: key not present");
        }
        removed
    }

    /// Removes the node at `path`; absent paths are ignored.
    pub fn remove_path(&mut self, path: impl Into<KeyPath>) -> Option<Node> {
        let path = path.into();
        let (key, parent) = path.split_last()?;
        let parent = if parent.is_empty() {
            self
        } else {
            self.lookup_mut(parent)?.as_branch_mut()?
        };
        parent.children.shift_remove(key)
    }

    /// Returns true if every part of `path` exists. Never creates anything.
    pub fn has(&self, path: impl Into<KeyPath>) -> bool {
        self.has_path(&path.into())
    }

    /// Non-vivifying lookup of the node at `path`.
    pub fn find(&self, path: impl Into<KeyPath>) -> Option<&Node> {
        self.lookup(path.into().parts())
    }

    /// Mutable form of [`Branch::find`]; also never creates anything.
    pub fn find_mut(&mut self, path: impl Into<KeyPath>) -> Option<&mut Node> {
        self.lookup_mut(path.into().parts())
    }

    fn lookup(&self, parts: &[String]) -> Option<&Node> {
        let (first, rest) = parts.split_first()?;
        let mut node = self.children.get(first)?;
        for key in rest {
            node = node.as_branch()?.children.get(key)?;
        }
        Some(node)
    }

    fn lookup_mut(&mut self, parts: &[String]) -> Option<&mut Node> {
        let (first, rest) = parts.split_first()?;
        let mut node = self.children.get_mut(first)?;
        for key in rest {
            node = node.as_branch_mut()?.children.get_mut(key)?;
        }
        Some(node)
    }

    /// Moves the node at `from` to `to`, creating missing branches along `to`.
    ///
    /// A missing source is a no-op, as is moving a node onto itself. A
    /// destination beneath the source is rejected with
    /// [`TreeError::MoveIntoDescendant`], and a leaf on the way to the
    /// destination with [`TreeError::InvalidPath`]; in both cases the tree is
    /// left unchanged. An existing destination is overwritten in place.
    #[instrument(level = "trace", skip_all)]
    pub fn move_node(
        &mut self,
        from: impl Into<KeyPath>,
        to: impl Into<KeyPath>,
    ) -> TreeResult<()> {
        let from = from.into();
        let to = to.into();
        debug!(%from, %to, "move");

        if from.is_empty() || to.is_empty() {
            return Err(TreeError::EmptyPath);
        }
        if !self.has_path(&from) {
            debug!(%from, "move: source not found, nothing to do");
            return Ok(());
        }
        if from == to {
            return Ok(());
        }
        if to.is_descendant_of(&from) {
            return Err(TreeError::MoveIntoDescendant {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.check_destination(&to)?;

        let Some(node) = self.remove_path(&from) else {
            return Ok(());
        };
        let (key, parent) = to.split_last().ok_or(TreeError::EmptyPath)?;
        self.get_path(parent)?.children.insert(key.to_string(), node);
        Ok(())
    }

    /// Fails if an existing leaf sits on the parent part of `to`.
    fn check_destination(&self, to: &KeyPath) -> TreeResult<()> {
        let Some((_, parent)) = to.split_last() else {
            return Err(TreeError::EmptyPath);
        };
        let mut current = self;
        for (depth, key) in parent.iter().enumerate() {
            match current.children.get(key) {
                None => return Ok(()),
                Some(Node::Branch(branch)) => current = branch,
                Some(Node::Leaf(_)) => return Err(leaf_in_path(to, depth)),
            }
        }
        Ok(())
    }

    /// Calls `visit` on every branch stored under `key`, anywhere below.
    ///
    /// Depth-first in insertion order; a matching branch is visited before its
    /// own children are searched.
    #[instrument(level = "trace", skip(self, visit))]
    pub fn where_key<F>(&mut self, key: &str, mut visit: F)
    where
        F: FnMut(&mut Branch),
    {
        self.where_key_with(key, &mut visit);
    }

    fn where_key_with<F>(&mut self, key: &str, visit: &mut F)
    where
        F: FnMut(&mut Branch),
    {
        for (child_key, child) in self.children.iter_mut() {
            if let Node::Branch(branch) = child {
                if child_key == key {
                    visit(branch);
                }
                branch.where_key_with(key, visit);
            }
        }
    }

    /// Removes every child for which `decide` returns true, recursively.
    ///
    /// A removed subtree is dropped without consulting `decide` on its
    /// descendants.
    #[instrument(level = "trace", skip_all)]
    pub fn filter<F>(&mut self, mut decide: F)
    where
        F: FnMut(&Node) -> bool,
    {
        self.filter_with(&mut decide);
    }

    fn filter_with<F>(&mut self, decide: &mut F)
    where
        F: FnMut(&Node) -> bool,
    {
        self.children.retain(|key, child| {
            if decide(&*child) {
                debug!(key = key.as_str(), "filter: removing");
                return false;
            }
            if let Node::Branch(branch) = child {
                branch.filter_with(decide);
            }
            true
        });
    }

    /// Drops every child that reports empty, at every depth.
    pub fn prune_empty(&mut self) {
        self.children.retain(|_, child| {
            if child.is_empty() {
                return false;
            }
            if let Node::Branch(branch) = child {
                branch.prune_empty();
            }
            true
        });
    }

    /// Reorders the immediate children by key. Stable.
    #[instrument(level = "trace", skip_all)]
    pub fn sort_keys_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        self.children.sort_by(|k1, _, k2, _| cmp(k1, k2));
    }

    /// Reorders the immediate children by comparing the nodes. Stable.
    #[instrument(level = "trace", skip_all)]
    pub fn sort_values_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&Node, &Node) -> Ordering,
    {
        self.children.sort_by(|_, v1, _, v2| cmp(v1, v2));
    }

    /// [`Branch::sort_keys_by`] applied to this branch and every branch below.
    pub fn sort_keys_recursive_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        self.sort_keys_recursive_with(&mut cmp);
    }

    fn sort_keys_recursive_with<F>(&mut self, cmp: &mut F)
    where
        F: FnMut(&str, &str) -> Ordering,
    {
        self.children.sort_by(|k1, _, k2, _| cmp(k1, k2));
        for child in self.children.values_mut() {
            if let Node::Branch(branch) = child {
                branch.sort_keys_recursive_with(cmp);
            }
        }
    }

    /// Immediate child keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Fresh iterator over `(key, child)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Like [`Branch::iter`], with mutable access to each child.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Node)> {
        self.children.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// The nested mapping this branch projects to.
    pub fn to_mapping(&self) -> IndexMap<String, Value> {
        self.children
            .iter()
            .map(|(key, child)| (key.clone(), child.to_value()))
            .collect()
    }
}

fn leaf_in_path(path: &KeyPath, depth: usize) -> TreeError {
    TreeError::InvalidPath {
        path: path.to_string(),
        reason: format!("'{}' is a leaf", KeyPath::from(&path.parts()[..=depth])),
    }
}

impl TreeNode for Branch {
    fn to_value(&self) -> Value {
        Value::Mapping(self.to_mapping())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.children
                .iter()
                .map(|(key, child)| (key.clone(), child.to_json()))
                .collect(),
        )
    }

    fn to_ascii(&self, indent: usize) -> String {
        let mut output = String::new();
        for (key, child) in &self.children {
            output.push_str(&OUTLINE_INDENT.repeat(indent));
            output.push_str("- ");
            output.push_str(key);
            match child {
                Node::Branch(branch) => {
                    output.push('\n');
                    output.push_str(&branch.to_ascii(indent + 1));
                }
                Node::Leaf(leaf) => {
                    output.push_str(&leaf.render());
                    output.push('\n');
                }
            }
        }
        output
    }

    fn is_empty(&self) -> bool {
        self.children.values().all(TreeNode::is_empty)
    }

    fn has_path(&self, path: &KeyPath) -> bool {
        self.lookup(path.parts()).is_some()
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii(0))
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len()))?;
        for (key, child) in &self.children {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Branch {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl From<IndexMap<String, Value>> for Branch {
    fn from(mapping: IndexMap<String, Value>) -> Self {
        Self::from_mapping(mapping)
    }
}

impl TryFrom<Value> for Branch {
    type Error = TreeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(mapping) => Ok(Self::from_mapping(mapping)),
            Value::Scalar(scalar) => Err(TreeError::InvalidValue(format!(
                "expected a mapping, found scalar '{}'",
                scalar
            ))),
        }
    }
}

impl TryFrom<serde_json::Value> for Branch {
    type Error = TreeError;

    #[instrument(level = "trace", skip_all)]
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Branch::try_from(Value::try_from(value)?)
    }
}

impl TryFrom<serde_yaml::Value> for Branch {
    type Error = TreeError;

    #[instrument(level = "trace", skip_all)]
    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        Branch::try_from(Value::try_from(value)?)
    }
}
