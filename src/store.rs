//! Issue file loading and in-memory edits.
//!
//! The store owns the issue tree handed to the presenter. Files are JSON,
//! either a bare array of issues or an object with a `tasks` array. Edits made
//! from the viewer only touch memory.

use std::fs;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use crate::task::Task;

const UNEXPECTED_SHAPE: &str = "expected an issue array or an object with a `tasks` array";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueStore {
    pub tasks: Vec<Task>,
}

impl IssueStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        IssueStore { tasks }
    }

    /// Load issues from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let buf = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json(&buf).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), issues = store.tasks.len(), "loaded issues");
        Ok(store)
    }

    /// Parse a bare issue array or an object with a `tasks` array.
    ///
    /// Errors inside an issue keep serde's own message, e.g. `invalid timestamp: soon`.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let list = match serde_json::from_str::<Value>(json)? {
            list @ Value::Array(_) => Some(list),
            Value::Object(mut map) => map.remove("tasks"),
            _ => None,
        }
        .ok_or_else(|| serde_json::Error::custom(UNEXPECTED_SHAPE))?;
        let tasks = serde_json::from_value::<Vec<Task>>(list)?;
        Ok(IssueStore { tasks })
    }

    /// Find an issue by id at any depth.
    pub fn get(&self, id: &str) -> Option<&Task> {
        fn find<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
            tasks.iter().find_map(|t| {
                if t.id == id {
                    Some(t)
                } else {
                    find(t.subtasks(), id)
                }
            })
        }
        find(&self.tasks, id)
    }

    /// Get a mutable reference to an issue by id at any depth.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        fn find<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
            for t in tasks.iter_mut() {
                if t.id == id {
                    return Some(t);
                }
                if let Some(found) = t.subtasks.as_deref_mut().and_then(|subs| find(subs, id)) {
                    return Some(found);
                }
            }
            None
        }
        find(&mut self.tasks, id)
    }

    /// Remove an issue, and with it its whole subtree. Returns the removed issue.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        fn remove_from(tasks: &mut Vec<Task>, id: &str) -> Option<Task> {
            if let Some(pos) = tasks.iter().position(|t| t.id == id) {
                return Some(tasks.remove(pos));
            }
            tasks
                .iter_mut()
                .filter_map(|t| t.subtasks.as_mut())
                .find_map(|subs| remove_from(subs, id))
        }
        remove_from(&mut self.tasks, id)
    }

    /// Append `child` under `parent_id`. Returns false if the parent is unknown.
    pub fn add_subtask(&mut self, parent_id: &str, child: Task) -> bool {
        match self.get_mut(parent_id) {
            Some(parent) => {
                parent.subtasks.get_or_insert_with(Vec::new).push(child);
                true
            }
            None => false,
        }
    }

    /// Number of issues at every depth.
    pub fn len_deep(&self) -> usize {
        fn count(tasks: &[Task]) -> usize {
            tasks.iter().map(|t| 1 + count(t.subtasks())).sum()
        }
        count(&self.tasks)
    }

    /// An id not used anywhere in the tree, of the form `new-N`.
    pub fn next_id(&self) -> String {
        (1..)
            .map(|n| format!("new-{n}"))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;

    fn sample() -> IssueStore {
        IssueStore::from_json(
            r#"{"tasks": [
                {"id": "1", "title": "root", "subtasks": [
                    {"id": "1.1", "title": "child", "subtasks": [
                        {"id": "1.1.1", "title": "grandchild"}
                    ]}
                ]},
                {"id": "2", "title": "second"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_bare_and_wrapped_files() {
        let bare = IssueStore::from_json(r#"[{"id": "a", "title": "A"}]"#).unwrap();
        let wrapped = IssueStore::from_json(r#"{"tasks": [{"id": "a", "title": "A"}]}"#).unwrap();
        assert_eq!(bare, wrapped);
        assert!(IssueStore::from_json(r#"{"issues": []}"#).is_err());
    }

    #[test]
    fn test_numeric_priority_loads() {
        let store = IssueStore::from_json(r#"[{"id": "1", "title": "x", "priority": 3}]"#).unwrap();
        assert_eq!(store.tasks[0].priority, Some(Priority::Other("3".into())));
    }

    #[test]
    fn test_bad_field_error_names_the_problem() {
        let err = IssueStore::from_json(r#"[{"id": "1", "title": "x", "dueDate": "soon"}]"#).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp: soon"), "{err}");

        let err = IssueStore::from_json(r#"{"tasks": [{"id": "1"}]}"#).unwrap_err();
        assert!(err.to_string().contains("title"), "{err}");

        let err = IssueStore::from_json("42").unwrap_err();
        assert!(err.to_string().contains("tasks"), "{err}");
    }

    #[test]
    fn test_get_at_any_depth() {
        let store = sample();
        assert_eq!(store.get("1.1.1").map(|t| t.title.as_str()), Some("grandchild"));
        assert!(store.get("9").is_none());
        assert_eq!(store.len_deep(), 4);
    }

    #[test]
    fn test_remove_nested_takes_subtree() {
        let mut store = sample();
        let removed = store.remove("1.1").unwrap();
        assert_eq!(removed.subtasks().len(), 1);
        assert!(store.get("1.1.1").is_none());
        assert_eq!(store.len_deep(), 2);
        assert!(store.remove("1.1").is_none());
    }

    #[test]
    fn test_add_subtask() {
        let mut store = sample();
        let id = store.next_id();
        assert_eq!(id, "new-1");
        assert!(store.add_subtask("2", Task::new(id.clone(), "New subtask")));
        assert_eq!(store.get("2").unwrap().subtasks()[0].id, "new-1");
        assert_eq!(store.next_id(), "new-2");
        assert!(!store.add_subtask("missing", Task::new("x", "x")));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = IssueStore::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
