//! `metashell render <path>`: render one path to stdout.

use crate::cli::load_shell;
use anyhow::Result;
use metashell::Status;
use std::io::Write;
use std::path::Path;

/// Run the render command. Returns the render status for the exit code.
pub fn run(config: &Path, path: &str, lang: Option<&str>) -> Result<Status> {
    let (shell, _) = load_shell(config)?;
    let rendered = match lang {
        Some(lang) => shell.render_in(path, lang),
        None => shell.render(path),
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.html.as_bytes())?;
    stdout.flush()?;
    eprintln!("{} {path}", rendered.status.code());

    Ok(rendered.status)
}
