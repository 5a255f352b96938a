#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use td::{Store, Todo};
use tempfile::TempDir;

pub fn td_cmd() -> Command {
    let mut cmd = Command::cargo_bin("td").expect("binary");
    cmd.env_remove("TODO_DB_PATH")
        .env_remove("TD_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// A scratch directory holding one `.todos` file
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    /// Scratch directory without a backing file
    pub fn empty() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Scratch directory with an initialized backing file
    pub fn init() -> Result<Self, Box<dyn std::error::Error>> {
        let store = Self::empty()?;
        Store::new(store.db_path()).initialize()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join(".todos")
    }

    /// `td` running inside the scratch directory with TODO_DB_PATH pointing at it
    pub fn cmd(&self) -> Command {
        let mut cmd = td_cmd();
        cmd.current_dir(self.path()).env("TODO_DB_PATH", self.db_path());
        cmd
    }

    pub fn write_raw(&self, contents: &str) -> std::io::Result<()> {
        fs::write(self.db_path(), contents)
    }

    pub fn read_raw(&self) -> std::io::Result<String> {
        fs::read_to_string(self.db_path())
    }

    pub fn read_todos(&self) -> Result<Vec<Todo>, Box<dyn std::error::Error>> {
        Ok(serde_json::from_str(&self.read_raw()?)?)
    }

    /// `(id, desc)` pairs in file order
    pub fn entries(&self) -> Result<Vec<(i64, String)>, Box<dyn std::error::Error>> {
        Ok(self
            .read_todos()?
            .into_iter()
            .map(|todo| (todo.id, todo.desc))
            .collect())
    }
}
