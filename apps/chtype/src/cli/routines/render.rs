//! Output formats for parsed types and schemas.

use clap::ValueEnum;
use clickhouse_types::{PrimitiveType, Schema, TimeUnit, TypeNode, TypeVisitor};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Canonical ClickHouse spelling, e.g. `Map(String, Array(Int32))`
    #[default]
    Canonical,
    /// Pretty-printed JSON of the parsed tree
    Json,
    /// Indented tree, one node per line
    Tree,
}

/// Renders a [`TypeNode`] as an indented tree, labelling map and tuple children
#[derive(Default)]
pub struct TreeRenderer {
    depth: usize,
    label: Option<String>,
    lines: Vec<String>,
}

impl TreeRenderer {
    pub fn render(node: &TypeNode) -> String {
        let mut renderer = TreeRenderer::default();
        node.accept(&mut renderer);
        renderer.lines.join("\n")
    }

    fn line(&mut self, text: String) {
        let indent = "  ".repeat(self.depth);
        let line = match self.label.take() {
            Some(label) => format!("{indent}{label}: {text}"),
            None => format!("{indent}{text}"),
        };
        self.lines.push(line);
    }

    fn child(&mut self, label: Option<String>, node: &TypeNode) {
        self.depth += 1;
        self.label = label;
        node.accept(self);
        self.depth -= 1;
    }
}

impl TypeVisitor for TreeRenderer {
    type Output = ();

    fn visit_primitive(&mut self, primitive: PrimitiveType) {
        self.line(primitive.to_string());
    }

    fn visit_fixed_string(&mut self, length: u64) {
        self.line(format!("FixedString(length={length})"));
    }

    fn visit_decimal(&mut self, precision: u32, scale: u32) {
        self.line(format!("Decimal(precision={precision}, scale={scale})"));
    }

    fn visit_decimal256(&mut self, precision: u32, scale: u32) {
        self.line(format!("Decimal256(precision={precision}, scale={scale})"));
    }

    fn visit_datetime64(&mut self, precision: u8, timezone: Option<&str>) {
        let unit = TimeUnit::from_code(precision)
            .map(|unit| unit.as_str())
            .unwrap_or("?");
        let text = match timezone {
            Some(tz) => format!("DateTime64(precision={precision}, unit={unit}, timezone={tz})"),
            None => format!("DateTime64(precision={precision}, unit={unit})"),
        };
        self.line(text);
    }

    fn visit_array(&mut self, element: &TypeNode) {
        self.line("Array".to_string());
        self.child(None, element);
    }

    fn visit_tuple(&mut self, elements: &[TypeNode]) {
        self.line("Tuple".to_string());
        for (i, element) in elements.iter().enumerate() {
            self.child(Some(i.to_string()), element);
        }
    }

    fn visit_map(&mut self, key: &TypeNode, value: &TypeNode) {
        self.line("Map".to_string());
        self.child(Some("key".to_string()), key);
        self.child(Some("value".to_string()), value);
    }

    fn visit_nullable(&mut self, inner: &TypeNode) {
        self.line("Nullable".to_string());
        self.child(None, inner);
    }
}

pub fn render_type(node: &TypeNode, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Canonical => node.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(node)?,
        OutputFormat::Tree => TreeRenderer::render(node),
    })
}

/// Renders a schema; without an explicit format the columns are shown as a table
pub fn render_schema(schema: &Schema, format: Option<OutputFormat>) -> anyhow::Result<String> {
    Ok(match format {
        None => schema_table(schema).to_string(),
        Some(OutputFormat::Canonical) => schema.to_string(),
        Some(OutputFormat::Json) => serde_json::to_string_pretty(schema)?,
        Some(OutputFormat::Tree) => schema
            .iter()
            .map(|field| {
                let mut renderer = TreeRenderer {
                    depth: 1,
                    ..TreeRenderer::default()
                };
                field.type_node.accept(&mut renderer);
                format!("{}\n{}", field.name, renderer.lines.join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

fn schema_table(schema: &Schema) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Name", "Type", "Nullable"]);

    for (i, field) in schema.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            field.name.clone(),
            field.type_node.to_string(),
            field.type_node.is_nullable().to_string(),
        ]);
    }

    table
}
