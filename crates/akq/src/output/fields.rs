//! Field listing output formatting.

use armonik_filter_rs::{FieldEntry, FieldRegistry};
use serde::Serialize;

use super::helpers::{format_field_type, format_header, format_operators, truncate_str};

/// JSON output structure for the fields command.
#[derive(Serialize)]
pub struct FieldsOutput<'a> {
    pub entity: &'static str,
    pub fields: Vec<FieldOutput<'a>>,
    /// Prefixes that accept arbitrary keys, e.g. `options`.
    pub generic_prefixes: Vec<&'static str>,
}

/// JSON output structure for a single field.
#[derive(Serialize)]
pub struct FieldOutput<'a> {
    pub path: &'a str,
    pub filterable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire_family: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire_name: Option<&'a str>,
    pub operators: Vec<&'static str>,
}

impl<'a> From<&'a FieldEntry> for FieldOutput<'a> {
    fn from(entry: &'a FieldEntry) -> Self {
        let field_type = entry.spec.field_type();
        let descriptor = entry.spec.descriptor();
        Self {
            path: &entry.path,
            filterable: field_type.is_some(),
            field_type: field_type.map(|t| t.name()),
            wire_family: descriptor.map(|d| d.family()),
            wire_name: descriptor.map(|d| d.name()),
            operators: field_type
                .map(|t| t.operators().iter().map(|op| op.symbol()).collect())
                .unwrap_or_default(),
        }
    }
}

/// Formats the fields of a registry as JSON.
pub fn format_fields_json(
    registry: &FieldRegistry,
    entries: &[FieldEntry],
) -> Result<String, serde_json::Error> {
    let output = FieldsOutput {
        entity: registry.entity().name(),
        fields: entries.iter().map(FieldOutput::from).collect(),
        generic_prefixes: registry.generic_prefixes().collect(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats the fields of a registry as a table.
pub fn format_fields_table(
    registry: &FieldRegistry,
    entries: &[FieldEntry],
    use_colors: bool,
) -> String {
    let mut output = String::new();

    let header = format!("{:<32} {:<9} {}", "Field", "Type", "Operators");
    output.push_str(&format_header(&header, use_colors));

    for entry in entries {
        let field_type = entry.spec.field_type();
        let operators = field_type
            .map(|t| format_operators(t.operators()))
            .unwrap_or_else(|| "(not filterable)".to_string());
        output.push_str(&format!(
            "{:<32} {} {}\n",
            truncate_str(&entry.path, 32),
            format_field_type(field_type, 9, use_colors),
            operators
        ));
    }

    for prefix in registry.generic_prefixes() {
        output.push_str(&format!(
            "\n{prefix}.<key> accepts any key as a STRING field.\n"
        ));
    }

    output
}
