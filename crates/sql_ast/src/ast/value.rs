use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize, Serializer};

/// Literal values as they appear in property clauses and expressions.
///
/// In serialized form literals are plain scalars: a float becomes a
/// [`Literal::Decimal`] and is written back as a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(from = "LiteralRepr"))]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    String(String),
    /// Decimal kept in its source spelling so formatting is lossless.
    Decimal(String),
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Literal::String(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Literal::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(untagged)]
enum LiteralRepr {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

#[cfg(feature = "serde")]
impl From<LiteralRepr> for Literal {
    fn from(repr: LiteralRepr) -> Self {
        match repr {
            LiteralRepr::Null => Literal::Null,
            LiteralRepr::Boolean(b) => Literal::Boolean(b),
            LiteralRepr::Integer(n) => Literal::Integer(n),
            LiteralRepr::Float(f) => Literal::Decimal(f.to_string()),
            LiteralRepr::String(s) => Literal::String(s),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Literal::Null => serializer.serialize_unit(),
            Literal::Boolean(b) => serializer.serialize_bool(*b),
            Literal::Integer(n) => serializer.serialize_i64(*n),
            Literal::String(s) => serializer.serialize_str(s),
            Literal::Decimal(d) => match d.parse::<f64>() {
                Ok(f) => serializer.serialize_f64(f),
                Err(_) => serializer.serialize_str(d),
            },
        }
    }
}

pub fn escape_single_quote_string(s: &str) -> String {
    s.replace('\'', "''")
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("NULL"),
            Literal::Boolean(true) => f.write_str("true"),
            Literal::Boolean(false) => f.write_str("false"),
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::String(s) => write!(f, "'{}'", escape_single_quote_string(s)),
            Literal::Decimal(d) => f.write_str(d),
        }
    }
}
