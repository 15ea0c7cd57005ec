//! Gateway: the process boundary.
//!
//! Invocation is `{program} {args...} {content}`, with stdout and stderr
//! sharing a single pipe so their interleaving is preserved.

use super::error::ExecutionError;
use crate::notebook::CellKind;
use serde::Deserialize;
use std::io::{self, Read};
use std::process::Stdio;

/// A program plus the fixed arguments placed before the cell content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Command {
    /// Program path or name (resolved through `PATH`).
    pub program: String,
    /// Leading arguments.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Command {
    /// Create a command.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Full argument vector for `content`, without the program.
    pub fn argv(&self, content: &str) -> Vec<String> {
        let mut argv = self.args.clone();
        argv.push(content.to_string());
        argv
    }
}

/// Interpreters for each cell kind. Fixed for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Runs shell cells.
    pub shell: Command,
    /// Renders markdown cells.
    pub markdown: Command,
}

impl InterpreterConfig {
    /// The interpreter for a cell kind.
    pub const fn for_kind(&self, kind: CellKind) -> &Command {
        match kind {
            CellKind::Shell => &self.shell,
            CellKind::Markdown => &self.markdown,
        }
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            shell: Command::new("sh", ["-c"]),
            markdown: Command::new("echo", ["-e"]),
        }
    }
}

/// Result of one execution.
///
/// `output` is kept even on failure; consumers show `error` instead when set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionOutcome {
    /// Combined stdout/stderr, trimmed.
    pub output: String,
    /// Failure, if any.
    pub error: Option<ExecutionError>,
}

impl ExecutionOutcome {
    /// A successful outcome.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: None,
        }
    }

    /// A failed outcome with captured output.
    pub fn failure(output: impl Into<String>, error: ExecutionError) -> Self {
        Self {
            output: output.into(),
            error: Some(error),
        }
    }

    /// Check if the execution succeeded.
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Turns cell content into captured output.
///
/// Implementations block; the dispatcher runs them off the event loop.
pub trait Executor: Send + Sync + 'static {
    /// Run `content` as a cell of `kind`.
    fn execute(&self, kind: CellKind, content: &str) -> ExecutionOutcome;
}

/// Executor that spawns the configured interpreter processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    config: InterpreterConfig,
}

impl ProcessExecutor {
    /// Create an executor for the given interpreters.
    pub const fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    /// The interpreter configuration.
    pub const fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Run `command` with `content` appended, capturing combined output.
    fn run(command: &Command, content: &str) -> ExecutionOutcome {
        let program = command.program.as_str();

        let (mut reader, writer) = match io::pipe() {
            Ok(pipe) => pipe,
            Err(e) => return ExecutionOutcome::failure("", ExecutionError::capture(program, &e)),
        };
        let writer_err = match writer.try_clone() {
            Ok(w) => w,
            Err(e) => return ExecutionOutcome::failure("", ExecutionError::capture(program, &e)),
        };

        let mut process = std::process::Command::new(program);
        process
            .args(command.argv(content))
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(writer_err);

        let mut child = match process.spawn() {
            Ok(child) => child,
            Err(e) => return ExecutionOutcome::failure("", ExecutionError::spawn(program, &e)),
        };
        // The command still owns our copies of the write end; the read below
        // only sees EOF once they are closed.
        drop(process);

        let mut bytes = Vec::new();
        let read = reader.read_to_end(&mut bytes);
        let status = child.wait();
        let output = String::from_utf8_lossy(&bytes).trim().to_string();

        if let Err(e) = read {
            return ExecutionOutcome::failure(output, ExecutionError::capture(program, &e));
        }

        match status {
            Ok(status) if status.success() => ExecutionOutcome::success(output),
            Ok(status) => {
                let error = status.code().map_or_else(
                    || ExecutionError::Terminated {
                        status: status.to_string(),
                    },
                    |code| ExecutionError::Exit { code },
                );
                ExecutionOutcome::failure(output, error)
            }
            Err(e) => ExecutionOutcome::failure(output, ExecutionError::capture(program, &e)),
        }
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, kind: CellKind, content: &str) -> ExecutionOutcome {
        Self::run(self.config.for_kind(kind), content)
    }
}
