//! # clickhouse-types
//!
//! Parses ClickHouse type strings (`Nullable(Array(Decimal(18, 4)))`) and column
//! lists (`id UInt64, name String`) into a backend-neutral AST.
//!
//! ```
//! use clickhouse_types::{parse_type, PrimitiveType, TypeNode};
//!
//! let node = parse_type("Array(Nullable(String))").unwrap();
//! assert_eq!(
//!     node,
//!     TypeNode::Array(Box::new(TypeNode::Nullable(Box::new(TypeNode::Primitive(
//!         PrimitiveType::String
//!     )))))
//! );
//! ```
//!
//! Backends translate the AST by implementing [`TypeVisitor`].

pub mod errors;
pub mod node;
pub mod schema;
pub mod splitter;
pub mod type_parser;
pub mod visitor;

pub use errors::{ArityError, ParseError};
pub use node::{PrimitiveType, TimeUnit, TypeNode};
pub use schema::{parse_field, parse_schema, Schema, SchemaField};
pub use splitter::{
    is_balanced, split_padded, split_padded_on, split_top_level, split_top_level_on,
};
pub use type_parser::{parse_type, MAX_NESTING_DEPTH};
pub use visitor::TypeVisitor;
