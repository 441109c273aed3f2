//! `metashell serve`: serve the shell over HTTP.

use crate::cli::load_shell;
use crate::server::{serve, AppState};
use anyhow::Result;
use std::net::SocketAddr;
use std::path::Path;
use tracing::info;

/// Run the serve command.
pub async fn run(config: &Path, listen: SocketAddr, reload_template: bool) -> Result<()> {
    let (shell, template_path) = load_shell(config)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        domain = %shell.settings().domain,
        reload_template,
        "starting metashell"
    );

    let mut state = AppState::new(shell);
    if reload_template {
        state = state.reload_template_from(template_path);
    }
    serve(state, listen).await
}
