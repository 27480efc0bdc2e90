//! # ClickHouse Type AST
//!
//! The backend-neutral representation produced by the type parser. Nodes are
//! immutable values; composite nodes own their children.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar ClickHouse types that take no parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Bool,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt256,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Int256,
    Float32,
    Float64,
    String,
    Date32,
    DateTime,
    IPv4,
    IPv6,
    Enum8,
    Enum16,
}

/// Name lookup table for the primitive vocabulary
pub(crate) static PRIMITIVE_TYPES: &[(&str, PrimitiveType)] = &[
    ("Bool", PrimitiveType::Bool),
    ("UInt8", PrimitiveType::UInt8),
    ("UInt16", PrimitiveType::UInt16),
    ("UInt32", PrimitiveType::UInt32),
    ("UInt64", PrimitiveType::UInt64),
    ("UInt128", PrimitiveType::UInt128),
    ("UInt256", PrimitiveType::UInt256),
    ("Int8", PrimitiveType::Int8),
    ("Int16", PrimitiveType::Int16),
    ("Int32", PrimitiveType::Int32),
    ("Int64", PrimitiveType::Int64),
    ("Int128", PrimitiveType::Int128),
    ("Int256", PrimitiveType::Int256),
    ("Float32", PrimitiveType::Float32),
    ("Float64", PrimitiveType::Float64),
    ("String", PrimitiveType::String),
    ("Date32", PrimitiveType::Date32),
    ("DateTime", PrimitiveType::DateTime),
    ("IPv4", PrimitiveType::IPv4),
    ("IPv6", PrimitiveType::IPv6),
    ("Enum8", PrimitiveType::Enum8),
    ("Enum16", PrimitiveType::Enum16),
];

impl PrimitiveType {
    /// Looks up a primitive by its exact ClickHouse name
    pub fn from_name(name: &str) -> Option<Self> {
        PRIMITIVE_TYPES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, primitive)| *primitive)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Bool => "Bool",
            PrimitiveType::UInt8 => "UInt8",
            PrimitiveType::UInt16 => "UInt16",
            PrimitiveType::UInt32 => "UInt32",
            PrimitiveType::UInt64 => "UInt64",
            PrimitiveType::UInt128 => "UInt128",
            PrimitiveType::UInt256 => "UInt256",
            PrimitiveType::Int8 => "Int8",
            PrimitiveType::Int16 => "Int16",
            PrimitiveType::Int32 => "Int32",
            PrimitiveType::Int64 => "Int64",
            PrimitiveType::Int128 => "Int128",
            PrimitiveType::Int256 => "Int256",
            PrimitiveType::Float32 => "Float32",
            PrimitiveType::Float64 => "Float64",
            PrimitiveType::String => "String",
            PrimitiveType::Date32 => "Date32",
            PrimitiveType::DateTime => "DateTime",
            PrimitiveType::IPv4 => "IPv4",
            PrimitiveType::IPv6 => "IPv6",
            PrimitiveType::Enum8 => "Enum8",
            PrimitiveType::Enum16 => "Enum16",
        }
    }

    /// Every primitive in the vocabulary, in table order
    pub fn all() -> impl Iterator<Item = PrimitiveType> {
        PRIMITIVE_TYPES.iter().map(|(_, primitive)| *primitive)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolution class of a `DateTime64` precision code
///
/// See <https://clickhouse.com/docs/en/sql-reference/data-types/datetime64>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl TimeUnit {
    /// Maps a precision code (0-9) to its resolution class
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TimeUnit::Second),
            1..=3 => Some(TimeUnit::Millisecond),
            4..=6 => Some(TimeUnit::Microsecond),
            7..=9 => Some(TimeUnit::Nanosecond),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Second => "s",
            TimeUnit::Millisecond => "ms",
            TimeUnit::Microsecond => "us",
            TimeUnit::Nanosecond => "ns",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed ClickHouse type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypeNode {
    /// Parameterless scalar (UInt8, String, ...)
    Primitive(PrimitiveType),

    /// FixedString(N)
    FixedString(u64),

    /// Decimal(P, S)
    Decimal { precision: u32, scale: u32 },

    /// Decimal256(P, S)
    Decimal256 { precision: u32, scale: u32 },

    /// DateTime64(P) or DateTime64(P, TZ)
    ///
    /// `precision` is the 0-9 unit code. The timezone is kept verbatim,
    /// including any quotes, and `None` means a naive timestamp.
    DateTime64 {
        precision: u8,
        timezone: Option<String>,
    },

    /// Array(T)
    Array(Box<TypeNode>),

    /// Tuple(T1, T2, ...), positional
    Tuple(Vec<TypeNode>),

    /// Map(K, V)
    Map {
        key: Box<TypeNode>,
        value: Box<TypeNode>,
    },

    /// Nullable(T)
    Nullable(Box<TypeNode>),
}

impl TypeNode {
    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeNode::Nullable(_))
    }

    /// Resolution class for `DateTime64` nodes, `None` for every other variant
    pub fn time_unit(&self) -> Option<TimeUnit> {
        match self {
            TypeNode::DateTime64 { precision, .. } => TimeUnit::from_code(*precision),
            _ => None,
        }
    }

    /// Nesting depth, a leaf counts as 1
    pub fn depth(&self) -> usize {
        match self {
            TypeNode::Primitive(_)
            | TypeNode::FixedString(_)
            | TypeNode::Decimal { .. }
            | TypeNode::Decimal256 { .. }
            | TypeNode::DateTime64 { .. } => 1,
            TypeNode::Array(inner) | TypeNode::Nullable(inner) => 1 + inner.depth(),
            TypeNode::Tuple(elements) => {
                1 + elements.iter().map(TypeNode::depth).max().unwrap_or(0)
            }
            TypeNode::Map { key, value } => 1 + key.depth().max(value.depth()),
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Primitive(primitive) => write!(f, "{primitive}"),
            TypeNode::FixedString(length) => write!(f, "FixedString({length})"),
            TypeNode::Decimal { precision, scale } => {
                write!(f, "Decimal({precision}, {scale})")
            }
            TypeNode::Decimal256 { precision, scale } => {
                write!(f, "Decimal256({precision}, {scale})")
            }
            TypeNode::DateTime64 {
                precision,
                timezone,
            } => match timezone {
                Some(tz) => write!(f, "DateTime64({precision}, {tz})"),
                None => write!(f, "DateTime64({precision})"),
            },
            TypeNode::Array(element) => write!(f, "Array({element})"),
            TypeNode::Tuple(elements) => {
                write!(f, "Tuple(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, ")")
            }
            TypeNode::Map { key, value } => write!(f, "Map({key}, {value})"),
            TypeNode::Nullable(inner) => write!(f, "Nullable({inner})"),
        }
    }
}
