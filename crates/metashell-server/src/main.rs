use anyhow::Result;
use clap::Parser;
use metashell::Status;
use metashell_server::cli::{self, Cli, Command};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    cli::init_tracing(args.json_logs)?;

    match args.command {
        Command::Serve {
            config,
            listen,
            reload_template,
        } => {
            cli::serve_cmd::run(&config, listen, reload_template).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Render { config, path, lang } => {
            match cli::render_cmd::run(&config, &path, lang.as_deref())? {
                Status::Found => Ok(ExitCode::SUCCESS),
                Status::NotFound => Ok(ExitCode::FAILURE),
            }
        }
    }
}
