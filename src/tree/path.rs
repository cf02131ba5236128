//! Key paths addressing descendants of a branch.
//!
//! A path is an ordered list of key parts. It can be built from a single
//! `.`-separated string or from parts that are already split:
//!
//! ```
//! use magictree::tree::path::KeyPath;
//!
//! let dotted = KeyPath::from("colors.red.mars");
//! let split = KeyPath::from(["colors", "red", "mars"]);
//! assert_eq!(dotted, split);
//!
//! // Only the pre-split form can address a key that contains the separator.
//! let literal = KeyPath::from(["version", "1.2"]);
//! assert_eq!(literal.len(), 2);
//! ```

use std::fmt;

/// Separator used when a path is given as one string.
pub const SEPARATOR: char = '.';

/// An ordered sequence of keys, resolved left to right.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    parts: Vec<String>,
}

impl KeyPath {
    /// Creates a path from parts taken verbatim.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits `dotted` on [`SEPARATOR`]. The empty string is the empty path.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::default();
        }
        Self::from_parts(dotted.split(SEPARATOR))
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The last key and the path of its parent.
    pub fn split_last(&self) -> Option<(&str, &[String])> {
        self.parts
            .split_last()
            .map(|(last, parent)| (last.as_str(), parent))
    }

    /// Returns true if `self` is `prefix` or lies beneath it.
    pub fn starts_with(&self, prefix: &KeyPath) -> bool {
        self.parts.starts_with(&prefix.parts)
    }

    /// Returns true if `self` lies strictly beneath `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &KeyPath) -> bool {
        self.len() > ancestor.len() && self.starts_with(ancestor)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join(&SEPARATOR.to_string()))
    }
}

impl From<&str> for KeyPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<String> for KeyPath {
    fn from(dotted: String) -> Self {
        Self::parse(&dotted)
    }
}

impl From<&String> for KeyPath {
    fn from(dotted: &String) -> Self {
        Self::parse(dotted)
    }
}

impl From<&[&str]> for KeyPath {
    fn from(parts: &[&str]) -> Self {
        Self::from_parts(parts.iter().copied())
    }
}

impl From<&[String]> for KeyPath {
    fn from(parts: &[String]) -> Self {
        Self::from_parts(parts.iter().cloned())
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(parts: [&str; N]) -> Self {
        Self::from_parts(parts)
    }
}

impl From<Vec<&str>> for KeyPath {
    fn from(parts: Vec<&str>) -> Self {
        Self::from_parts(parts)
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(parts: Vec<String>) -> Self {
        Self { parts }
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}
