//! Terminal nodes.

use super::scalar::Scalar;
use serde::{Serialize, Serializer};

/// A terminal node holding one immutable scalar.
///
/// Reassigning the key that owns a leaf replaces the leaf; its value is never
/// changed in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    value: Scalar,
}

impl Leaf {
    pub fn new(value: impl Into<Scalar>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &Scalar {
        &self.value
    }

    pub fn into_value(self) -> Scalar {
        self.value
    }

    /// The outline suffix for this leaf, e.g. `: "gasfly"` or `: true`.
    pub fn render(&self) -> String {
        self.value.outline_suffix()
    }
}

impl Serialize for Leaf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}
