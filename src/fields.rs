//! Enumerations and field types for issues.
//!
//! This module defines the structured values used to categorise issues and the
//! options offered by the list header selectors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Priority classification for issue importance.
///
/// Parsing is total: any value outside the four known levels is kept verbatim
/// as `Other` so loading a file never fails on an unexpected priority. Numbers,
/// booleans and other JSON values keep their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPriority", into = "String")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    /// Parse a priority value. Matching is exact, so `"Urgent"` is `Other`.
    pub fn parse(s: &str) -> Self {
        match s {
            "urgent" => Priority::Urgent,
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            other => Priority::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Other(raw) => raw,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPriority {
    Text(String),
    Other(serde_json::Value),
}

impl From<RawPriority> for Priority {
    fn from(raw: RawPriority) -> Self {
        match raw {
            RawPriority::Text(s) => Priority::parse(&s),
            RawPriority::Other(value) => Priority::Other(value.to_string()),
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        Priority::parse(&s)
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grouping options shown in the list header. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    None,
    Status,
    Priority,
    Assignee,
}

impl GroupBy {
    pub const ALL: [GroupBy; 4] = [GroupBy::None, GroupBy::Status, GroupBy::Priority, GroupBy::Assignee];

    pub fn label(self) -> &'static str {
        match self {
            GroupBy::None => "No grouping",
            GroupBy::Status => "Status",
            GroupBy::Priority => "Priority",
            GroupBy::Assignee => "Assignee",
        }
    }
}

/// Sorting options shown in the list header. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Manual,
    Priority,
    DueDate,
    Title,
}

impl SortBy {
    pub const ALL: [SortBy; 4] = [SortBy::Manual, SortBy::Priority, SortBy::DueDate, SortBy::Title];

    pub fn label(self) -> &'static str {
        match self {
            SortBy::Manual => "Manual",
            SortBy::Priority => "Priority",
            SortBy::DueDate => "Due date",
            SortBy::Title => "Title",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_priority() {
        assert_eq!(Priority::parse("urgent"), Priority::Urgent);
        assert_eq!(Priority::parse("high"), Priority::High);
        assert_eq!(Priority::parse("medium"), Priority::Medium);
        assert_eq!(Priority::parse("low"), Priority::Low);
        assert_eq!(Priority::parse("Urgent"), Priority::Other("Urgent".into()));
        assert_eq!(Priority::parse(""), Priority::Other(String::new()));
    }

    #[test]
    fn test_priority_serde_keeps_unknown_values() {
        let p: Priority = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(p, Priority::Other("critical".into()));
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"critical\"");
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_priority_accepts_any_json_value() {
        let p: Priority = serde_json::from_str("3").unwrap();
        assert_eq!(p, Priority::Other("3".into()));
        let p: Priority = serde_json::from_str("true").unwrap();
        assert_eq!(p, Priority::Other("true".into()));
        let p: Priority = serde_json::from_str(r#"{"level": 1}"#).unwrap();
        assert_eq!(p, Priority::Other(r#"{"level":1}"#.into()));
    }
}
