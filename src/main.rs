//! Grappler entrypoint.

use anyhow::{Context, Result};
use clap::Parser;
use grappler::config::Config;
use grappler::exec::Command;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "grappler", version, about = "A modal terminal notebook")]
struct Args {
    /// Configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Program that runs shell cells.
    #[arg(long)]
    shell: Option<String>,
    /// Argument placed before the cell content for shell cells (repeatable).
    #[arg(long = "shell-arg", allow_hyphen_values = true)]
    shell_args: Vec<String>,
    /// Program that renders markdown cells.
    #[arg(long = "markdown-cmd")]
    markdown_cmd: Option<String>,
    /// Argument placed before the cell content for markdown cells (repeatable).
    #[arg(long = "markdown-arg", allow_hyphen_values = true)]
    markdown_args: Vec<String>,
    /// Log file path.
    #[arg(long, default_value = "grappler.log")]
    log_file: PathBuf,
    /// Log filter directive (overridden by `RUST_LOG`).
    #[arg(long, default_value = "grappler=info")]
    log_filter: String,
}

impl Args {
    /// Build the session config: defaults, then the file, then flags.
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        override_command(&mut config.interpreters.shell, self.shell.as_ref(), &self.shell_args);
        override_command(
            &mut config.interpreters.markdown,
            self.markdown_cmd.as_ref(),
            &self.markdown_args,
        );
        Ok(config)
    }
}

/// Replace the program and/or arguments of `command` when given on the
/// command line. A new program without arguments drops the old arguments.
fn override_command(command: &mut Command, program: Option<&String>, args: &[String]) {
    if let Some(program) = program {
        command.program.clone_from(program);
        command.args.clear();
    }
    if !args.is_empty() {
        command.args = args.to_vec();
    }
}

fn configure_logging(path: &Path, filter: &str) -> Result<WorkerGuard> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(guard)
}

fn install_panic_hook(alternate_screen: bool) {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        grappler::terminal::restore(alternate_screen);
        tracing::error!(%info, "panic");
        default_panic(info);
    }));
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging(&args.log_file, &args.log_filter)?;
    let config = args.config()?;

    install_panic_hook(config.terminal.alternate_screen);
    grappler::app::run(config).context("notebook exited with an error")?;
    Ok(())
}
