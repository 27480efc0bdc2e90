//! Visitor interface for backends that translate a [`TypeNode`] into their own
//! type system (an Arrow data type, an ORM column type, a wire encoder, ...).
//!
//! Every variant has a required method, so an implementation stops compiling when
//! a construct is added to the grammar. Visitors recurse by calling
//! [`TypeNode::accept`] on the children they receive.

use crate::node::{PrimitiveType, TypeNode};

pub trait TypeVisitor {
    type Output;

    fn visit_primitive(&mut self, primitive: PrimitiveType) -> Self::Output;

    fn visit_fixed_string(&mut self, length: u64) -> Self::Output;

    fn visit_decimal(&mut self, precision: u32, scale: u32) -> Self::Output;

    fn visit_decimal256(&mut self, precision: u32, scale: u32) -> Self::Output;

    fn visit_datetime64(&mut self, precision: u8, timezone: Option<&str>) -> Self::Output;

    fn visit_array(&mut self, element: &TypeNode) -> Self::Output;

    fn visit_tuple(&mut self, elements: &[TypeNode]) -> Self::Output;

    fn visit_map(&mut self, key: &TypeNode, value: &TypeNode) -> Self::Output;

    fn visit_nullable(&mut self, inner: &TypeNode) -> Self::Output;
}

impl TypeNode {
    /// Dispatches to the visitor method matching this node's variant
    pub fn accept<V: TypeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            TypeNode::Primitive(primitive) => visitor.visit_primitive(*primitive),
            TypeNode::FixedString(length) => visitor.visit_fixed_string(*length),
            TypeNode::Decimal { precision, scale } => visitor.visit_decimal(*precision, *scale),
            TypeNode::Decimal256 { precision, scale } => {
                visitor.visit_decimal256(*precision, *scale)
            }
            TypeNode::DateTime64 {
                precision,
                timezone,
            } => visitor.visit_datetime64(*precision, timezone.as_deref()),
            TypeNode::Array(element) => visitor.visit_array(element),
            TypeNode::Tuple(elements) => visitor.visit_tuple(elements),
            TypeNode::Map { key, value } => visitor.visit_map(key, value),
            TypeNode::Nullable(inner) => visitor.visit_nullable(inner),
        }
    }
}
