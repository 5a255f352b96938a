//! Command-line interface for td
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in the `init` and `todo` submodules.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::printer;
use crate::storage::{Store, DB_PATH_ENV};

mod init;
mod todo;

pub use todo::ListFilter;

/// td - Your todos manager
///
/// Keeps a list of todos in a single JSON file. Set TODO_DB_PATH (or pass
/// --db) to choose the file; it defaults to `.todos` in the current directory.
#[derive(Parser, Debug)]
#[command(name = "td")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the todo file, or the directory holding `.todos`
    #[arg(long, global = true, env = DB_PATH_ENV)]
    pub db: Option<PathBuf>,

    /// Path to a configuration file (defaults to `.td.toml` in the current directory)
    #[arg(long, global = true, env = "TD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub list: ListArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Listing filters used when no subcommand is given
#[derive(Args, Debug, Default, Clone, Copy)]
#[group(multiple = false)]
pub struct ListArgs {
    /// Print done todos
    #[arg(short, long)]
    pub done: bool,

    /// Print work in progress todos
    #[arg(short, long)]
    pub wip: bool,

    /// Print pending todos only
    #[arg(short, long)]
    pub pending: bool,

    /// Print all todos
    #[arg(short, long)]
    pub all: bool,
}

impl ListArgs {
    pub fn filter(&self) -> ListFilter {
        if self.all {
            ListFilter::All
        } else if self.done {
            ListFilter::Done
        } else if self.wip {
            ListFilter::Wip
        } else if self.pending {
            ListFilter::Pending
        } else {
            ListFilter::Undone
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a collection of todos. Without a path it creates `.todos` in the current directory
    #[command(visible_alias = "i")]
    Init,

    /// Add a new todo
    #[command(visible_alias = "a")]
    Add {
        /// Description, e.g. "call mum #family"
        desc: String,
    },

    /// Modify the text of an existing todo
    #[command(visible_alias = "m")]
    Modify {
        /// Todo id
        id: i64,

        /// New description
        desc: String,
    },

    /// Toggle the status of a todo: pending, wip, done, pending
    #[command(visible_alias = "t")]
    Toggle {
        /// Todo id
        id: i64,
    },

    /// Mark a todo as work in progress
    #[command(visible_alias = "w")]
    Wip {
        /// Todo id
        id: i64,
    },

    /// Remove finished todos from the list
    #[command(visible_alias = "c")]
    Clean,

    /// Reset ids of todos to 1..N
    #[command(visible_alias = "r")]
    Reorder {
        /// Put the given ids first, in order, and append the remaining todos
        #[arg(short, long)]
        exact: bool,

        /// Ids in the wanted order (with --exact)
        #[arg(requires = "exact")]
        ids: Vec<i64>,
    },

    /// Swap the position of two todos
    #[command(visible_alias = "sw")]
    Swap {
        /// First todo id
        id_a: i64,

        /// Second todo id
        id_b: i64,
    },

    /// Search a string in all todos
    #[command(visible_alias = "s")]
    Search {
        /// Text to look for (case-insensitive, literal)
        text: String,
    },
}

/// Resolved settings shared by every command of one invocation
#[derive(Debug, Clone)]
pub struct Context {
    pub store: Store,
    pub config: Config,
    pub output: OutputOptions,
    pub color: bool,
}

impl Context {
    /// Resolve configuration and the backing file
    ///
    /// The store location is `db` when set, then `store.path` from the
    /// configuration, then `.todos` in the working directory.
    pub fn resolve(
        db: Option<&Path>,
        config_path: Option<&Path>,
        output: OutputOptions,
        no_color: bool,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load(path)?,
            None => match std::env::current_dir() {
                Ok(cwd) => Config::load_from_dir(&cwd),
                Err(_) => Config::default(),
            },
        };

        let override_path = db
            .filter(|path| !path.as_os_str().is_empty())
            .or(config.store.path.as_deref());
        let store = Store::resolve(override_path)?;
        let color = config.display.color && !no_color && std::io::stdout().is_terminal();

        Ok(Self {
            store,
            config,
            output,
            color,
        })
    }

    fn print_footer(&self) {
        if self.output.json || self.output.quiet || !self.config.display.show_path {
            return;
        }
        println!("{}", printer::render_path(self.store.path(), self.color));
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };
        let ctx = Context::resolve(
            self.db.as_deref(),
            self.config.as_deref(),
            output,
            self.no_color,
        )?;

        match self.command {
            None => todo::run_list(&ctx, self.list.filter())?,
            Some(Commands::Init) => init::run(&ctx)?,
            Some(Commands::Add { desc }) => todo::run_add(&ctx, &desc)?,
            Some(Commands::Modify { id, desc }) => todo::run_modify(&ctx, id, &desc)?,
            Some(Commands::Toggle { id }) => todo::run_toggle(&ctx, id)?,
            Some(Commands::Wip { id }) => todo::run_wip(&ctx, id)?,
            Some(Commands::Clean) => todo::run_clean(&ctx)?,
            Some(Commands::Reorder { exact, ids }) => todo::run_reorder(&ctx, exact, &ids)?,
            Some(Commands::Swap { id_a, id_b }) => todo::run_swap(&ctx, id_a, id_b)?,
            Some(Commands::Search { text }) => todo::run_search(&ctx, &text)?,
        }

        ctx.print_footer();
        Ok(())
    }
}
