//! Compiled filter output formatting.

use armonik_api_rs::filters::Filters;
use armonik_filter_rs::Filter;
use serde::Serialize;

/// JSON output structure for the compile command with `--json`.
#[derive(Serialize)]
pub struct CompileOutput<'a> {
    pub entity: &'static str,
    pub expression: &'a str,
    /// Display form of the normalized expression.
    pub normalized: String,
    pub conjunctions: usize,
    pub leaves: usize,
    pub filters: &'a Filters,
}

/// Formats the bare wire message.
pub fn format_message(message: &Filters, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(message)
    } else {
        serde_json::to_string(message)
    }
}

/// Formats the wire message together with the normalized expression.
pub fn format_compiled_json(
    expression: &str,
    filter: &Filter,
    message: &Filters,
) -> Result<String, serde_json::Error> {
    let output = CompileOutput {
        entity: filter.entity().name(),
        expression,
        normalized: filter.to_string(),
        conjunctions: filter.conjunction_count(),
        leaves: filter.leaf_count(),
        filters: message,
    };
    serde_json::to_string_pretty(&output)
}

#[cfg(test)]
mod tests {
    use armonik_api_rs::models::TaskStatus;
    use armonik_filter_rs::Task;

    use super::*;

    #[test]
    fn test_format_message_compact() {
        let filter = Task::status().eq(TaskStatus::Completed);
        let message = filter.to_message().unwrap();
        let compact = format_message(&message, false).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.starts_with("{\"or\":[{\"and\":["));
    }

    #[test]
    fn test_format_compiled_json() {
        let filter = (Task::status().eq(TaskStatus::Error) | Task::id().eq("t1")).unwrap();
        let message = filter.to_message().unwrap();
        let json = format_compiled_json("status == ERROR | id == t1", &filter, &message).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["entity"], "Task");
        assert_eq!(parsed["normalized"], "status == ERROR | id == \"t1\"");
        assert_eq!(parsed["conjunctions"], 2);
        assert_eq!(parsed["leaves"], 2);
        assert_eq!(parsed["filters"]["or"].as_array().unwrap().len(), 2);
    }
}
