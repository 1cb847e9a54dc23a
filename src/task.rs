//! Issue data structure and related functionality.
//!
//! This module defines the `Task` tree read by the renderer. Every field apart
//! from `id` and `title` is optional, and the JSON shape is forgiving: ids may
//! be strings or numbers, dates may be RFC 3339 timestamps, plain dates or
//! epoch milliseconds, and unknown priorities are kept rather than rejected.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::Priority;

/// A unit of trackable work, optionally carrying nested subtasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub dependencies: Option<Vec<Dependency>>,
    pub assignees: Option<Vec<Assignee>>,
    /// Estimated effort in hours.
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
    pub subtasks: Option<Vec<Task>>,
}

/// Workflow status attached to an issue. `color` is a `#rrggbb` hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub name: String,
    pub color: Option<String>,
}

/// A display-only reference to another issue this one waits on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub title: String,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub name: String,
}

impl Task {
    /// Create a task with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            description: None,
            status: None,
            priority: None,
            dependencies: None,
            assignees: None,
            duration: None,
            start_date: None,
            due_date: None,
            subtasks: None,
        }
    }

    /// Direct children, empty when the field is absent.
    pub fn subtasks(&self) -> &[Task] {
        self.subtasks.as_deref().unwrap_or(&[])
    }

    pub fn dependencies(&self) -> &[Dependency] {
        self.dependencies.as_deref().unwrap_or(&[])
    }

    pub fn assignees(&self) -> &[Assignee] {
        self.assignees.as_deref().unwrap_or(&[])
    }
}

impl TaskStatus {
    pub fn new(name: impl Into<String>, color: Option<&str>) -> Self {
        TaskStatus {
            name: name.into(),
            color: color.map(str::to_string),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Unsigned(n) => n.to_string(),
        RawId::Signed(n) => n.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
}

fn de_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<RawTimestamp>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawTimestamp::Millis(ms)) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
        Some(RawTimestamp::Text(s)) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {s}"))),
    }
}

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
