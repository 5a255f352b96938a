//! td init command implementation
//!
//! Creates the backing file holding an empty todo list.

use std::path::PathBuf;

use crate::cli::Context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};

#[derive(serde::Serialize)]
struct InitReport {
    path: PathBuf,
}

pub fn run(ctx: &Context) -> Result<()> {
    ctx.store.initialize()?;

    let report = InitReport {
        path: ctx.store.path().to_path_buf(),
    };

    let mut human = HumanOutput::new(format!(
        "Initialized empty to-do file as \"{}\".",
        ctx.store.path().display()
    ));
    human.push_next_step("td add \"call mum\"");

    emit_success(ctx.output, "init", &report, Some(&human))
}
