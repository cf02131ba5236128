//! Plain nested values: the input accepted by assignment and the output of
//! [`TreeNode::to_value`](super::node::TreeNode::to_value).
//!
//! Conversions from `serde_json::Value` and `serde_yaml::Value` classify each
//! element the same way assignment does: scalars stay scalars, objects become
//! mappings, and sequences become mappings keyed by element index. `null` is
//! rejected.

use super::error::TreeError;
use super::scalar::{Number, Scalar};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A scalar or an ordered mapping of further values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Mapping(IndexMap<String, Value>),
}

impl Value {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Mapping(m) => Some(m),
            Value::Scalar(_) => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(s) => s.serialize(serializer),
            Value::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

macro_rules! value_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

value_from_scalar!(&str, String, bool, f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(mapping: IndexMap<String, Value>) -> Self {
        Value::Mapping(mapping)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = TreeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;

        match value {
            Json::Null => Err(TreeError::InvalidValue(
                "null is neither a scalar nor a mapping".to_string(),
            )),
            Json::Bool(b) => Ok(Value::from(b)),
            Json::Number(n) => Ok(Value::Scalar(Scalar::Number(json_number(&n)?))),
            Json::String(s) => Ok(Value::from(s)),
            Json::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| Ok((index.to_string(), Value::try_from(item)?)))
                .collect::<Result<IndexMap<_, _>, TreeError>>()
                .map(Value::Mapping),
            Json::Object(fields) => fields
                .into_iter()
                .map(|(key, item)| Ok((key, Value::try_from(item)?)))
                .collect::<Result<IndexMap<_, _>, TreeError>>()
                .map(Value::Mapping),
        }
    }
}

fn json_number(n: &serde_json::Number) -> Result<Number, TreeError> {
    if let Some(i) = n.as_i64() {
        Ok(Number::Integer(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Number::Unsigned(u))
    } else if let Some(f) = n.as_f64() {
        Ok(Number::Float(f))
    } else {
        Err(TreeError::InvalidValue(format!("unrepresentable number {}", n)))
    }
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = TreeError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value as Yaml;

        match value {
            Yaml::Null => Err(TreeError::InvalidValue(
                "null is neither a scalar nor a mapping".to_string(),
            )),
            Yaml::Bool(b) => Ok(Value::from(b)),
            Yaml::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::from(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Value::from(u))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::from(f))
                } else {
                    Err(TreeError::InvalidValue(format!("unrepresentable number {}", n)))
                }
            }
            Yaml::String(s) => Ok(Value::from(s)),
            Yaml::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| Ok((index.to_string(), Value::try_from(item)?)))
                .collect::<Result<IndexMap<_, _>, TreeError>>()
                .map(Value::Mapping),
            Yaml::Mapping(fields) => fields
                .into_iter()
                .map(|(key, item)| Ok((yaml_key(key)?, Value::try_from(item)?)))
                .collect::<Result<IndexMap<_, _>, TreeError>>()
                .map(Value::Mapping),
            Yaml::Tagged(tagged) => Err(TreeError::InvalidValue(format!(
                "tagged value {} is not supported",
                tagged.tag
            ))),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, TreeError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        other => Err(TreeError::InvalidValue(format!(
            "unsupported mapping key {:?}",
            other
        ))),
    }
}
