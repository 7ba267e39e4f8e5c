//! Output formats of the CLI commands
//!
//! Tabular formats print one row per table, family or status field. The JSON
//! formats print the underlying values instead of the rows.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rounded table
    #[default]
    Table,
    Markdown,
    /// Compact JSON
    Json,
    JsonPretty,
    /// One JSON value per line, arrays are split into their elements
    JsonLine,
    /// `|`-separated rows after a header line
    Psv,
}

/// Accepted spellings, canonical name first
const SPELLINGS: [(OutputFormat, &[&str]); 6] = [
    (OutputFormat::Table, &["table", "pretty"]),
    (OutputFormat::Markdown, &["markdown", "md"]),
    (OutputFormat::Json, &["json"]),
    (OutputFormat::JsonPretty, &["json-pretty", "jsonpretty"]),
    (OutputFormat::JsonLine, &["json-line", "jsonline", "jsonl", "ndjson"]),
    (OutputFormat::Psv, &["psv", "pipe"]),
];

impl OutputFormat {
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::JsonPretty | Self::JsonLine)
    }

    /// Canonical name, as shown in help and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::JsonPretty => "json-pretty",
            Self::JsonLine => "json-line",
            Self::Psv => "psv",
        }
    }

    /// Serialize `value` for this format; non-JSON formats get compact JSON
    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, serde_json::Error> {
        match self {
            Self::JsonPretty => serde_json::to_string_pretty(value),
            Self::JsonLine => match serde_json::to_value(value)? {
                serde_json::Value::Array(items) => Ok(items
                    .iter()
                    .map(serde_json::Value::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")),
                other => Ok(other.to_string()),
            },
            _ => serde_json::to_string(value),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        SPELLINGS
            .iter()
            .find(|(_, spellings)| spellings.contains(&wanted.as_str()))
            .map(|(format, _)| *format)
            .ok_or_else(|| {
                let names: Vec<&str> = SPELLINGS.iter().map(|(f, _)| f.name()).collect();
                format!("unknown output format '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spellings() {
        assert_eq!("pretty".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("MD".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("ndjson".parse::<OutputFormat>().unwrap(), OutputFormat::JsonLine);
        assert_eq!("pipe".parse::<OutputFormat>().unwrap(), OutputFormat::Psv);

        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(err.starts_with("unknown output format 'xml'"));
        assert!(err.ends_with("table, markdown, json, json-pretty, json-line, psv"));
    }

    #[test]
    fn test_canonical_names_parse_back() {
        for (format, spellings) in SPELLINGS {
            assert_eq!(format.to_string(), spellings[0]);
            assert_eq!(spellings[0].parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_to_json() {
        let tables = vec!["users", "events"];
        assert_eq!(OutputFormat::Json.to_json(&tables).unwrap(), r#"["users","events"]"#);
        assert!(OutputFormat::JsonPretty
            .to_json(&tables)
            .unwrap()
            .contains("\n  \"users\""));
        assert!(!OutputFormat::Psv.is_json());
    }

    #[test]
    fn test_to_json_accepts_unsized_values() {
        let families: &[&str] = &["info", "meta"];
        assert_eq!(
            OutputFormat::JsonLine.to_json(families).unwrap(),
            "\"info\"\n\"meta\""
        );
        assert_eq!(OutputFormat::Json.to_json("users").unwrap(), "\"users\"");
    }
}
