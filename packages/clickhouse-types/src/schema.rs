//! Column list parsing: `name Type, name Type, ...` into an ordered [`Schema`].

use crate::errors::ParseError;
use crate::node::TypeNode;
use crate::splitter::split_top_level;
use crate::type_parser::parse_type;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One named column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_node: TypeNode,
}

impl fmt::Display for SchemaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.type_node)
    }
}

/// Columns in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<SchemaField>,
}

impl Schema {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemaField> {
        self.fields.iter()
    }

    /// First field with the given name
    pub fn get(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl IntoIterator for Schema {
    type Item = SchemaField;
    type IntoIter = std::vec::IntoIter<SchemaField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a SchemaField;
    type IntoIter = std::slice::Iter<'a, SchemaField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

impl FromStr for Schema {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_schema(s)
    }
}

/// Parses a single `name Type` entry.
///
/// The name runs from the first non-whitespace character to the next whitespace
/// character; everything after that one separator is the type string.
pub fn parse_field(text: &str) -> Result<SchemaField, ParseError> {
    let start = text
        .find(|c: char| !c.is_whitespace())
        .ok_or_else(|| ParseError::malformed_field(text, "missing field name"))?;
    let rest = &text[start..];

    let (name_end, separator) = rest
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .ok_or_else(|| ParseError::malformed_field(text, "missing type after field name"))?;

    let name = &rest[..name_end];
    let type_str = &rest[name_end + separator.len_utf8()..];

    Ok(SchemaField {
        name: name.to_string(),
        type_node: parse_type(type_str)?,
    })
}

/// Parses a comma separated column list, optionally wrapped in one pair of parentheses.
///
/// Empty (or whitespace-only) input is an empty schema.
pub fn parse_schema(text: &str) -> Result<Schema, ParseError> {
    let trimmed = unwrap_parenthesized(text.trim()).trim();
    if trimmed.is_empty() {
        return Ok(Schema::default());
    }

    let fields = split_top_level(trimmed)
        .into_iter()
        .map(parse_field)
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Parsed schema with {} fields", fields.len());
    Ok(Schema { fields })
}

/// Strips one outer `( ... )` pair when the opening parenthesis closes at the very end
fn unwrap_parenthesized(text: &str) -> &str {
    let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) else {
        return text;
    };

    // `(a Int32), (b Int32)` must not be unwrapped: the first `(` closes early
    let mut depth: i64 = 0;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return text;
                }
            }
            _ => {}
        }
    }
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::PrimitiveType;

    #[test]
    fn test_parse_field() {
        let field = parse_field("id UInt64").unwrap();
        assert_eq!(field.name, "id");
        assert_eq!(field.type_node, TypeNode::Primitive(PrimitiveType::UInt64));

        let field = parse_field("  price Nullable(Decimal(18, 4))").unwrap();
        assert_eq!(field.name, "price");
        assert_eq!(
            field.type_node,
            TypeNode::Nullable(Box::new(TypeNode::Decimal {
                precision: 18,
                scale: 4
            }))
        );
    }

    #[test]
    fn test_parse_field_extra_whitespace_before_type() {
        let field = parse_field("tags   Array(String)").unwrap();
        assert_eq!(field.name, "tags");
        assert_eq!(
            field.type_node,
            TypeNode::Array(Box::new(TypeNode::Primitive(PrimitiveType::String)))
        );
    }

    #[test]
    fn test_parse_field_errors() {
        assert!(matches!(
            parse_field("onlyname"),
            Err(ParseError::MalformedField { .. })
        ));
        assert!(matches!(
            parse_field(""),
            Err(ParseError::MalformedField { .. })
        ));
        assert!(matches!(
            parse_field("   "),
            Err(ParseError::MalformedField { .. })
        ));
        // A separator with nothing after it reaches the type parser
        assert!(matches!(
            parse_field("name "),
            Err(ParseError::MalformedType { .. })
        ));
        assert!(matches!(
            parse_field("name NotAType"),
            Err(ParseError::MalformedType { .. })
        ));
    }

    #[test]
    fn test_parse_schema() {
        let schema = parse_schema("id UInt64, name String, tags Array(String)").unwrap();
        assert_eq!(schema.len(), 3);

        let names: Vec<&str> = schema.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "tags"]);

        assert_eq!(
            schema.fields[0].type_node,
            TypeNode::Primitive(PrimitiveType::UInt64)
        );
        assert_eq!(
            schema.fields[1].type_node,
            TypeNode::Primitive(PrimitiveType::String)
        );
        assert_eq!(
            schema.fields[2].type_node,
            TypeNode::Array(Box::new(TypeNode::Primitive(PrimitiveType::String)))
        );
    }

    #[test]
    fn test_parse_schema_nested_commas_do_not_split_fields() {
        let schema =
            parse_schema("attrs Map(String, Tuple(Int32, Float64)), amount Decimal(10, 2)")
                .unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.fields[0].name, "attrs");
        assert_eq!(schema.fields[1].name, "amount");
        assert_eq!(
            schema.get("amount").unwrap().type_node,
            TypeNode::Decimal {
                precision: 10,
                scale: 2
            }
        );
        assert!(schema.get("missing").is_none());
    }

    #[test]
    fn test_parse_schema_empty_input() {
        assert!(parse_schema("").unwrap().is_empty());
        assert!(parse_schema("   ").unwrap().is_empty());
        assert!(parse_schema("()").unwrap().is_empty());
    }

    #[test]
    fn test_parse_schema_parenthesized() {
        let wrapped = parse_schema("(id UInt64, ts DateTime64(3, 'UTC'))").unwrap();
        let bare = parse_schema("id UInt64, ts DateTime64(3, 'UTC')").unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn test_unwrap_parenthesized_only_strips_matching_pair() {
        assert_eq!(unwrap_parenthesized("(a Int32)"), "a Int32");
        assert_eq!(unwrap_parenthesized("(a), (b)"), "(a), (b)");
        assert_eq!(unwrap_parenthesized("a Array(Int32)"), "a Array(Int32)");
    }

    #[test]
    fn test_parse_schema_errors_propagate() {
        assert!(matches!(
            parse_schema("id UInt64, broken"),
            Err(ParseError::MalformedField { .. })
        ));
        assert!(matches!(
            parse_schema("id UInt64, name NotAType"),
            Err(ParseError::MalformedType { .. })
        ));
        assert!(matches!(
            parse_schema("id UInt64,"),
            Err(ParseError::MalformedField { .. })
        ));
    }

    #[test]
    fn test_schema_display_roundtrip() {
        let text = "id UInt64, attrs Map(String, Array(Int32)), ts Nullable(DateTime64(6))";
        let schema: Schema = text.parse().unwrap();
        assert_eq!(schema.to_string(), text);
        assert_eq!(parse_schema(&schema.to_string()).unwrap(), schema);
    }

    #[test]
    fn test_schema_serializes_fields_in_order() {
        let schema = parse_schema("b Int8, a Bool").unwrap();
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fields": [
                    {"name": "b", "type": {"kind": "primitive", "value": "Int8"}},
                    {"name": "a", "type": {"kind": "primitive", "value": "Bool"}},
                ]
            })
        );
    }
}
