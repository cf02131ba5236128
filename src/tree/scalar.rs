//! Scalar values held by leaves.

use serde::{Serialize, Serializer};
use std::fmt;

/// A number, kept as an integer when it came in as one.
///
/// `Unsigned` only holds values above `i64::MAX`; smaller unsigned inputs are
/// stored as `Integer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Number {
    /// Picks `Integer` when `u` fits in an `i64`.
    pub fn from_u64(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::Unsigned(u),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Unsigned(u) => *u as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::Unsigned(_))
    }

    /// The JSON number for this value, or `None` for NaN and infinities.
    pub fn to_json_number(&self) -> Option<serde_json::Number> {
        match self {
            Number::Integer(i) => Some(serde_json::Number::from(*i)),
            Number::Unsigned(u) => Some(serde_json::Number::from(*u)),
            Number::Float(f) => serde_json::Number::from_f64(*f),
        }
    }
}

/// A terminal value: string, number or boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Boolean(bool),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Number(Number::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Scalar::Number(Number::Integer(i)) => u64::try_from(*i).ok(),
            Scalar::Number(Number::Unsigned(u)) => Some(*u),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// Suffix used by the ASCII outline: booleans bare, everything else quoted.
    pub fn outline_suffix(&self) -> String {
        match self {
            Scalar::Boolean(b) => format!(": {}", b),
            other => format!(": \"{}\"", other),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{}", s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Scalar::Number(Number::Unsigned(u)) => serializer.serialize_u64(*u),
            Scalar::Number(Number::Float(f)) if f.is_finite() => serializer.serialize_f64(*f),
            Scalar::Number(Number::Float(f)) => serializer.collect_str(f),
            Scalar::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

/// NaN and the infinities have no JSON number form, so they are stored as
/// their display strings (`"NaN"`, `"inf"`, `"-inf"`).
impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        if f.is_finite() {
            Scalar::Number(Number::Float(f))
        } else {
            Scalar::String(f.to_string())
        }
    }
}

impl From<f32> for Scalar {
    fn from(f: f32) -> Self {
        Scalar::from(f as f64)
    }
}

impl From<u64> for Scalar {
    fn from(u: u64) -> Self {
        Scalar::Number(Number::from_u64(u))
    }
}

impl From<usize> for Scalar {
    fn from(u: usize) -> Self {
        Scalar::Number(Number::from_u64(u as u64))
    }
}

macro_rules! scalar_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(i: $t) -> Self {
                    Scalar::Number(Number::Integer(i as i64))
                }
            }
        )*
    };
}

scalar_from_integer!(i8, i16, i32, i64, u8, u16, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_suffix_quotes_strings_and_numbers() {
        assert_eq!(Scalar::from("gasfly").outline_suffix(), ": \"gasfly\"");
        assert_eq!(Scalar::from(5).outline_suffix(), ": \"5\"");
        assert_eq!(Scalar::from(1.5).outline_suffix(), ": \"1.5\"");
    }

    #[test]
    fn test_outline_suffix_leaves_booleans_bare() {
        assert_eq!(Scalar::from(true).outline_suffix(), ": true");
        assert_eq!(Scalar::from(false).outline_suffix(), ": false");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Scalar::from(7).as_i64(), Some(7));
        assert_eq!(Scalar::from(7).as_f64(), Some(7.0));
        assert_eq!(Scalar::from("x").as_str(), Some("x"));
        assert_eq!(Scalar::from("x").as_bool(), None);
        assert!(Number::Integer(3).is_integer());
        assert!(Number::Unsigned(u64::MAX).is_integer());
        assert_eq!(Scalar::from(u64::MAX).as_u64(), Some(u64::MAX));
        assert_eq!(Scalar::from(u64::MAX).as_i64(), None);
    }

    #[test]
    fn test_unsigned_narrows_to_integer_when_it_fits() {
        assert_eq!(Scalar::from(7u64), Scalar::from(7));
        assert_eq!(Scalar::from(3usize), Scalar::from(3));
        assert_eq!(
            Scalar::from(u64::MAX),
            Scalar::Number(Number::Unsigned(u64::MAX))
        );
        assert_eq!(Scalar::from(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn test_non_finite_floats_become_strings() {
        assert_eq!(Scalar::from(f64::NAN), Scalar::from("NaN"));
        assert_eq!(Scalar::from(f64::INFINITY), Scalar::from("inf"));
        assert_eq!(Scalar::from(f32::NEG_INFINITY), Scalar::from("-inf"));
        assert_eq!(Scalar::from(f64::NAN).outline_suffix(), ": \"NaN\"");
    }

    #[test]
    fn test_non_finite_float_serializes_as_string() {
        let raw = Scalar::Number(Number::Float(f64::INFINITY));
        assert_eq!(serde_json::to_string(&raw).unwrap(), r#""inf""#);
        assert_eq!(Number::Float(f64::NAN).to_json_number(), None);
    }
}
