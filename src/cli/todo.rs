//! td todo command implementations.
//!
//! Every command loads the full collection, applies one operation and, when
//! the operation mutates state, saves the whole collection back.

use serde::Serialize;

use crate::cli::Context;
use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::printer;
use crate::todo::{Status, Todo};

/// Which todos the default listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFilter {
    Undone,
    Pending,
    Wip,
    Done,
    All,
}

impl ListFilter {
    fn apply(self, collection: &mut Collection) {
        match self {
            ListFilter::Undone => collection.list_undone(),
            ListFilter::Pending => collection.list_pending(),
            ListFilter::Wip => collection.list_wip(),
            ListFilter::Done => collection.list_done(),
            ListFilter::All => {}
        }
    }
}

#[derive(Serialize)]
struct TodoListOutput<'a> {
    filter: ListFilter,
    total: usize,
    todos: &'a [Todo],
}

#[derive(Serialize)]
struct TodoSearchOutput<'a> {
    query: &'a str,
    total: usize,
    todos: &'a [Todo],
}

#[derive(Serialize)]
struct TodoCleanOutput {
    removed: usize,
    remaining: usize,
}

#[derive(Serialize)]
struct TodoReorderOutput {
    exact: bool,
    total: usize,
}

#[derive(Serialize)]
struct TodoSwapOutput {
    swapped: [i64; 2],
}

fn load(ctx: &Context) -> Result<Collection> {
    Collection::load(&ctx.store)
}

fn validate_desc(desc: &str) -> Result<&str> {
    let desc = desc.trim();
    if desc.is_empty() {
        return Err(Error::InvalidArgument(
            "You must provide a name to your todo".to_string(),
        ));
    }
    Ok(desc)
}

fn status_phrase(status: &Status) -> String {
    match status {
        Status::Wip => "marked as work in progress".to_string(),
        other => other.to_string(),
    }
}

pub fn run_list(ctx: &Context, filter: ListFilter) -> Result<()> {
    let mut collection = load(ctx)?;
    filter.apply(&mut collection);

    if ctx.output.json {
        let output = TodoListOutput {
            filter,
            total: collection.len(),
            todos: collection.todos(),
        };
        return emit_success(ctx.output, "list", &output, None);
    }

    if ctx.output.quiet {
        return Ok(());
    }

    if collection.is_empty() {
        println!("There's no todo to show.");
    } else {
        print_todos(ctx, collection.todos());
    }
    Ok(())
}

pub fn run_add(ctx: &Context, desc: &str) -> Result<()> {
    let desc = validate_desc(desc)?;
    let mut collection = load(ctx)?;

    let id = collection.create_todo(Todo::with_desc(desc))?;
    collection.save(&ctx.store)?;

    let todo = collection.find(id)?;
    let human = HumanOutput::new(format!("#{id} \"{desc}\" is now added to your todos."));
    emit_success(ctx.output, "add", todo, Some(&human))
}

pub fn run_modify(ctx: &Context, id: i64, desc: &str) -> Result<()> {
    let desc = validate_desc(desc)?;
    let mut collection = load(ctx)?;

    collection.modify(id, desc)?;
    collection.save(&ctx.store)?;

    let todo = collection.find(id)?;
    let human = HumanOutput::new(format!("\"{id}\" has now a new description: {desc}"));
    emit_success(ctx.output, "modify", todo, Some(&human))
}

pub fn run_toggle(ctx: &Context, id: i64) -> Result<()> {
    let mut collection = load(ctx)?;

    collection.toggle(id)?;
    collection.save(&ctx.store)?;

    let todo = collection.find(id)?;
    let human = HumanOutput::new(format!(
        "Your todo {id} is now {}.",
        status_phrase(&todo.status)
    ));
    emit_success(ctx.output, "toggle", todo, Some(&human))
}

pub fn run_wip(ctx: &Context, id: i64) -> Result<()> {
    let mut collection = load(ctx)?;

    collection.set_status(id, Status::Wip)?;
    collection.save(&ctx.store)?;

    let todo = collection.find(id)?;
    let human = HumanOutput::new(format!(
        "Your todo {id} is now {}.",
        status_phrase(&todo.status)
    ));
    emit_success(ctx.output, "wip", todo, Some(&human))
}

pub fn run_clean(ctx: &Context) -> Result<()> {
    let mut collection = load(ctx)?;

    let removed = collection.remove_finished();
    collection.save(&ctx.store)?;

    let output = TodoCleanOutput {
        removed,
        remaining: collection.len(),
    };
    let mut human = HumanOutput::new("Your list is now flushed of finished todos.");
    human.push_summary("removed", removed.to_string());
    human.push_summary("remaining", collection.len().to_string());
    if removed == 0 {
        human.push_warning("no finished todo to remove");
    }
    emit_success(ctx.output, "clean", &output, Some(&human))
}

pub fn run_reorder(ctx: &Context, exact: bool, ids: &[i64]) -> Result<()> {
    let mut collection = load(ctx)?;

    if exact {
        collection.reorder_by_ids(ids)?;
    }
    collection.reorder();
    collection.save(&ctx.store)?;

    let output = TodoReorderOutput {
        exact,
        total: collection.len(),
    };
    let human = HumanOutput::new("Your list is now reordered.");
    emit_success(ctx.output, "reorder", &output, Some(&human))
}

pub fn run_swap(ctx: &Context, id_a: i64, id_b: i64) -> Result<()> {
    let mut collection = load(ctx)?;

    collection.swap(id_a, id_b)?;
    collection.reorder();
    collection.save(&ctx.store)?;

    let output = TodoSwapOutput {
        swapped: [id_a, id_b],
    };
    let human = HumanOutput::new(format!("\"{id_a}\" and \"{id_b}\" have been swapped."));
    emit_success(ctx.output, "swap", &output, Some(&human))
}

pub fn run_search(ctx: &Context, text: &str) -> Result<()> {
    let mut collection = load(ctx)?;
    collection.search(text)?;

    if ctx.output.json {
        let output = TodoSearchOutput {
            query: text,
            total: collection.len(),
            todos: collection.todos(),
        };
        return emit_success(ctx.output, "search", &output, None);
    }

    if ctx.output.quiet {
        return Ok(());
    }

    if collection.is_empty() {
        println!("Sorry, there's no todos containing \"{text}\".");
    } else {
        print_todos(ctx, collection.todos());
    }
    Ok(())
}

fn print_todos(ctx: &Context, todos: &[Todo]) {
    println!();
    for line in printer::render_all(todos, ctx.color) {
        println!("{line}");
    }
    println!();
}
