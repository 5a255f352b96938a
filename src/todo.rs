//! Todo records.
//!
//! A `Todo` is a passive record; every mutation goes through
//! [`Collection`](crate::collection::Collection).

use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};

pub const PENDING: &str = "pending";
pub const WIP: &str = "wip";
pub const DONE: &str = "done";

/// Status of a todo.
///
/// Values written by hand into the backing file that are not one of the
/// three known statuses are kept verbatim in `Other` so a load/save cycle
/// never rewrites them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Pending,
    Wip,
    Done,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Pending => PENDING,
            Status::Wip => WIP,
            Status::Done => DONE,
            Status::Other(value) => value,
        }
    }

    /// Next status in the `pending -> wip -> done -> pending` cycle.
    /// Foreign values advance like `done`.
    pub fn next(&self) -> Status {
        match self {
            Status::Pending => Status::Wip,
            Status::Wip => Status::Done,
            Status::Done | Status::Other(_) => Status::Pending,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Status::Done)
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.as_str() {
            PENDING => Status::Pending,
            WIP => Status::Wip,
            DONE => Status::Done,
            _ => Status::Other(value),
        }
    }
}

impl From<&str> for Status {
    fn from(value: &str) -> Self {
        Status::from(value.to_string())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single task record, serialized as `{"id", "desc", "status", "modified"}`.
///
/// Missing fields in a hand-edited file load as their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Todo {
    pub id: i64,
    pub desc: String,
    pub status: Status,
    pub modified: String,
}

impl Todo {
    /// A pending todo with an unset id (`0`) and empty fields.
    pub fn new() -> Self {
        Self {
            id: 0,
            desc: String::new(),
            status: Status::Pending,
            modified: String::new(),
        }
    }

    /// A pending todo carrying a description.
    pub fn with_desc(desc: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            ..Self::new()
        }
    }

    pub(crate) fn touch(&mut self) {
        self.modified = timestamp();
    }
}

impl Default for Todo {
    fn default() -> Self {
        Self::new()
    }
}

/// Local time stamp written into `modified`.
pub fn timestamp() -> String {
    Local::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_is_pending_and_unset() {
        let todo = Todo::new();
        assert_eq!(todo.id, 0);
        assert_eq!(todo.status, Status::Pending);
        assert!(todo.desc.is_empty());
        assert!(todo.modified.is_empty());
    }

    #[test]
    fn status_cycles_through_three_values() {
        assert_eq!(Status::Pending.next(), Status::Wip);
        assert_eq!(Status::Wip.next(), Status::Done);
        assert_eq!(Status::Done.next(), Status::Pending);
        assert_eq!(Status::Other("blocked".to_string()).next(), Status::Pending);
    }

    #[test]
    fn foreign_status_survives_serde() {
        let json = r#"{"id":1,"desc":"x","status":"blocked","modified":""}"#;
        let todo: Todo = serde_json::from_str(json).expect("parse");
        assert_eq!(todo.status, Status::Other("blocked".to_string()));

        let written = serde_json::to_string(&todo).expect("serialize");
        assert!(written.contains("\"status\":\"blocked\""));
    }

    #[test]
    fn serialized_field_order_is_stable() {
        let mut todo = Todo::with_desc("call mum");
        todo.id = 1;
        let written = serde_json::to_string(&todo).expect("serialize");
        assert_eq!(
            written,
            r#"{"id":1,"desc":"call mum","status":"pending","modified":""}"#
        );
    }
}
