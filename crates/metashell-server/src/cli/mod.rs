//! CLI subcommand implementations for the `metashell` binary.

pub mod render_cmd;
pub mod serve_cmd;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use metashell::{MetaShell, SiteConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Serve one HTML shell with per-route social and SEO metadata.
#[derive(Debug, Parser)]
#[command(name = "metashell", version, about)]
pub struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the shell over HTTP for every path.
    Serve {
        /// Site configuration file (JSON).
        #[arg(short, long)]
        config: PathBuf,

        /// Address to listen on.
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        listen: SocketAddr,

        /// Re-read the template from disk on every request.
        #[arg(long)]
        reload_template: bool,
    },
    /// Render the shell for one path and print it to stdout.
    Render {
        /// Site configuration file (JSON).
        #[arg(short, long)]
        config: PathBuf,

        /// Request path, e.g. `/about`.
        path: String,

        /// Language for localized values.
        #[arg(long)]
        lang: Option<String>,
    },
}

/// Install the tracing subscriber. Logs go to stderr.
pub fn init_tracing(json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("metashell=info".parse()?)
        .add_directive("metashell_server=info".parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

/// Load the site configuration and its template into a shell.
///
/// Returns the template path alongside so callers can re-read it later.
pub fn load_shell(config_path: &Path) -> Result<(MetaShell, PathBuf)> {
    let config = SiteConfig::from_path(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let Some(template_path) = config.template.clone() else {
        bail!(
            "{} does not name a `template` file",
            config_path.display()
        );
    };
    let template = config
        .load_template()
        .context("loading template")?
        .unwrap_or_default();

    let shell = MetaShell::new(config, template).context("building shell")?;
    Ok((shell, template_path))
}
