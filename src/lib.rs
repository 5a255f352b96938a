//! td - Todo List Library
//!
//! This library provides the core functionality for the td CLI tool,
//! a personal task-list manager backed by a single JSON file.
//!
//! # Core Concepts
//!
//! - **Todo**: one task record (id, description, status, modified stamp)
//! - **Store**: the resolved backing file and its initialization
//! - **Collection**: the in-memory list of todos for one invocation, with
//!   id assignment, status transitions, filtering, search and reordering
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `collection`: Todo collection and its id/ordering operations
//! - `config`: Configuration loading from `.td.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output envelopes
//! - `printer`: Line rendering of todos
//! - `storage`: Backing file resolution and atomic JSON persistence
//! - `todo`: Todo record and status

pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod output;
pub mod printer;
pub mod storage;
pub mod todo;

pub use collection::Collection;
pub use error::{Error, Result};
pub use storage::Store;
pub use todo::{Status, Todo};
