//! Line rendering for todos.

use std::sync::OnceLock;

use crossterm::style::{Color, Stylize};
use regex::Regex;

use crate::todo::{Status, Todo};

#[cfg(not(windows))]
mod signs {
    pub const OK: &str = "✓";
    pub const KO: &str = "✕";
    pub const WIP: &str = "✦";
}

#[cfg(windows)]
mod signs {
    pub const OK: &str = "v";
    pub const KO: &str = "x";
    pub const WIP: &str = "*";
}

pub use signs::{KO as KO_SIGN, OK as OK_SIGN, WIP as WIP_SIGN};

const ID_WIDTH: usize = 6;

fn hashtag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#\S*").expect("hashtag pattern is valid"))
}

fn sign_and_color(status: &Status) -> (&'static str, Color) {
    match status {
        Status::Done => (OK_SIGN, Color::Green),
        Status::Wip => (WIP_SIGN, Color::Blue),
        Status::Pending | Status::Other(_) => (KO_SIGN, Color::Red),
    }
}

/// Render one todo as `"     3 | ✕ call mum #family"`.
///
/// With `use_color` the sign takes the status colour and every `#token` in
/// the description is yellow; without it the line is plain text.
pub fn render(todo: &Todo, use_color: bool) -> String {
    let (sign, color) = sign_and_color(&todo.status);
    let mut line = format!("{:>width$} | ", todo.id, width = ID_WIDTH);

    if use_color {
        line.push_str(&sign.with(color).to_string());
    } else {
        line.push_str(sign);
    }
    line.push(' ');

    let mut pos = 0;
    for token in hashtag_pattern().find_iter(&todo.desc) {
        line.push_str(&todo.desc[pos..token.start()]);
        if use_color {
            line.push_str(&token.as_str().with(Color::Yellow).to_string());
        } else {
            line.push_str(token.as_str());
        }
        pos = token.end();
    }
    line.push_str(&todo.desc[pos..]);
    line
}

/// Render every todo, one per line.
pub fn render_all(todos: &[Todo], use_color: bool) -> Vec<String> {
    todos.iter().map(|todo| render(todo, use_color)).collect()
}

/// Style the store path footer.
pub fn render_path(path: &std::path::Path, use_color: bool) -> String {
    let text = path.display().to_string();
    if use_color {
        text.magenta().to_string()
    } else {
        text
    }
}
