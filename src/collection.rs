//! In-memory todo collection.
//!
//! A command loads the whole file into a [`Collection`], applies one
//! mutation, and writes the whole collection back when the mutation changes
//! state. Filtering operations narrow the collection in place; callers that
//! need the unfiltered set must load again.
//!
//! Ids are unique at rest. Renumbering (`reorder`, the tail of
//! `reorder_by_ids`) reassigns them densely as `1..=N` in sequence order.

use std::collections::{HashMap, HashSet};

use regex::RegexBuilder;

use crate::error::{Error, Result};
use crate::storage::Store;
use crate::todo::{Status, Todo};

#[derive(Debug, Clone, Default)]
pub struct Collection {
    todos: Vec<Todo>,
    /// Highest id ever seen by this instance; removals never lower it.
    highest_id: i64,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_todos(todos: Vec<Todo>) -> Self {
        let highest_id = max_id(&todos);
        Self { todos, highest_id }
    }

    /// Load the full collection from `store`
    ///
    /// # Errors
    /// * `StoreUnavailable` - If the backing file does not exist
    /// * `MalformedData` - If the backing file does not decode
    pub fn load(store: &Store) -> Result<Self> {
        store.check()?;
        let todos: Vec<Todo> = store.read_json()?;
        tracing::debug!(path = %store.path().display(), count = todos.len(), "loaded todos");
        Ok(Self::from_todos(todos))
    }

    /// Overwrite `store` with the full collection
    pub fn save(&self, store: &Store) -> Result<()> {
        store.write_json(&self.todos)?;
        tracing::debug!(path = %store.path().display(), count = self.todos.len(), "saved todos");
        Ok(())
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn into_todos(self) -> Vec<Todo> {
        self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Find a todo by id.
    ///
    /// If a corrupted file holds the same id twice, the last match wins.
    pub fn find(&self, id: i64) -> Result<&Todo> {
        self.todos
            .iter()
            .rev()
            .find(|todo| todo.id == id)
            .ok_or(Error::NotFound(id))
    }

    fn find_mut(&mut self, id: i64) -> Result<&mut Todo> {
        self.todos
            .iter_mut()
            .rev()
            .find(|todo| todo.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// Keep only the todos matching `keep`, preserving their relative order
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Todo) -> bool,
    {
        self.todos.retain(keep);
    }

    pub fn list_pending(&mut self) {
        self.retain(|todo| todo.status == Status::Pending);
    }

    pub fn list_wip(&mut self) {
        self.retain(|todo| todo.status == Status::Wip);
    }

    pub fn list_done(&mut self) {
        self.retain(|todo| todo.status.is_done());
    }

    pub fn list_undone(&mut self) {
        self.retain(|todo| !todo.status.is_done());
    }

    /// Append `todo` under the next free id and return that id
    ///
    /// # Errors
    /// * `InvalidArgument` - If the highest id in use is already `i64::MAX`
    pub fn create_todo(&mut self, mut todo: Todo) -> Result<i64> {
        let highest = self.highest_id.max(max_id(&self.todos));
        let id = highest.checked_add(1).ok_or_else(|| {
            Error::InvalidArgument(format!("no id left after {highest}; run `td reorder`"))
        })?;
        todo.id = id;
        todo.touch();
        self.todos.push(todo);
        self.highest_id = id;
        Ok(id)
    }

    pub fn set_status(&mut self, id: i64, status: Status) -> Result<&Todo> {
        let todo = self.find_mut(id)?;
        todo.status = status;
        todo.touch();
        Ok(&*todo)
    }

    /// Advance the status of `id` one step through `pending -> wip -> done`
    pub fn toggle(&mut self, id: i64) -> Result<&Todo> {
        let next = self.find(id)?.status.next();
        self.set_status(id, next)
    }

    pub fn modify(&mut self, id: i64, desc: impl Into<String>) -> Result<&Todo> {
        let todo = self.find_mut(id)?;
        todo.desc = desc.into();
        todo.touch();
        Ok(&*todo)
    }

    /// Drop every done todo and return how many were removed
    pub fn remove_finished(&mut self) -> usize {
        let before = self.todos.len();
        self.list_undone();
        before - self.todos.len()
    }

    /// Renumber ids densely from 1 in the current sequence order
    pub fn reorder(&mut self) {
        renumber(&mut self.todos);
    }

    /// Exchange the ids and the sequence slots of `id_a` and `id_b`
    ///
    /// # Errors
    /// * `NotFound` - If either id is absent; the collection is untouched
    pub fn swap(&mut self, id_a: i64, id_b: i64) -> Result<()> {
        let position_a = self.position(id_a)?;
        let position_b = self.position(id_b)?;

        for todo in &mut self.todos {
            if todo.id == id_a {
                todo.id = id_b;
            } else if todo.id == id_b {
                todo.id = id_a;
            }
        }
        self.todos.swap(position_a, position_b);
        Ok(())
    }

    /// Move the todos named in `ids` to the front, in that order, then renumber
    ///
    /// Todos not named keep their relative order after the named ones. The ids
    /// in `ids` are positional hints: every todo ends up renumbered `1..=N`.
    ///
    /// # Errors
    /// * `DuplicateId` - If `ids` repeats an id
    /// * `NotFound` - If `ids` names an id not in the collection
    ///
    /// The collection is untouched on error.
    pub fn reorder_by_ids(&mut self, ids: &[i64]) -> Result<()> {
        let mut slots: HashMap<i64, usize> = HashMap::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            if slots.insert(*id, index).is_some() {
                return Err(Error::DuplicateId(*id));
            }
        }

        let present: HashSet<i64> = self.todos.iter().map(|todo| todo.id).collect();
        if let Some(missing) = ids.iter().find(|id| !present.contains(*id)) {
            return Err(Error::NotFound(*missing));
        }

        let mut ordered: Vec<Option<Todo>> = vec![None; ids.len()];
        let mut rest = Vec::with_capacity(self.todos.len());
        for todo in self.todos.drain(..) {
            match slots.get(&todo.id) {
                Some(&index) if ordered[index].is_none() => ordered[index] = Some(todo),
                _ => rest.push(todo),
            }
        }

        self.todos = ordered.into_iter().flatten().chain(rest).collect();
        renumber(&mut self.todos);
        Ok(())
    }

    /// Keep only the todos whose description contains `text`, ignoring case
    ///
    /// `text` is matched literally; regex metacharacters have no meaning.
    pub fn search(&mut self, text: &str) -> Result<()> {
        let pattern = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()
            .map_err(|err| Error::InvalidArgument(format!("invalid search '{text}': {err}")))?;
        self.retain(|todo| pattern.is_match(&todo.desc));
        Ok(())
    }

    fn position(&self, id: i64) -> Result<usize> {
        self.todos
            .iter()
            .rposition(|todo| todo.id == id)
            .ok_or(Error::NotFound(id))
    }
}

fn max_id(todos: &[Todo]) -> i64 {
    todos.iter().map(|todo| todo.id).max().unwrap_or(0).max(0)
}

fn renumber(todos: &mut [Todo]) {
    for (id, todo) in (1..).zip(todos.iter_mut()) {
        todo.id = id;
    }
}
