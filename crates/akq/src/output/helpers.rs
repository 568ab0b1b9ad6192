//! Common helper functions for output formatting.

use armonik_filter_rs::{FieldType, Operator};
use owo_colors::OwoColorize;

/// Truncates a string to a maximum length.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a table header line.
pub fn format_header(header: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", header.dimmed())
    } else {
        format!("{header}\n")
    }
}

/// Formats a field type tag, padded to `width` before coloring.
pub fn format_field_type(field_type: Option<FieldType>, width: usize, use_colors: bool) -> String {
    let Some(field_type) = field_type else {
        let label = format!("{:<width$}", "-");
        return if use_colors {
            label.dimmed().to_string()
        } else {
            label
        };
    };

    let label = format!("{:<width$}", field_type.name());
    if !use_colors {
        return label;
    }
    match field_type {
        FieldType::String | FieldType::Array => label.green().to_string(),
        FieldType::Number => label.blue().to_string(),
        FieldType::Date | FieldType::Duration => label.magenta().to_string(),
        FieldType::Status => label.yellow().to_string(),
        FieldType::Boolean => label.cyan().to_string(),
    }
}

/// Formats the operator symbols of a field type, e.g. `== != < <= > >=`.
pub fn format_operators(operators: &[Operator]) -> String {
    operators
        .iter()
        .map(|op| op.symbol())
        .collect::<Vec<_>>()
        .join(" ")
}
