//! Execution failures.

use thiserror::Error;

/// Why an execution did not succeed.
///
/// Stored on the cell as display data. It never ends the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The interpreter could not be started.
    #[error("failed to start `{program}`: {reason}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// OS error text.
        reason: String,
    },
    /// The interpreter ran and exited non-zero.
    #[error("exit status {code}")]
    Exit {
        /// Process exit code.
        code: i32,
    },
    /// The interpreter was terminated without an exit code (e.g. by a signal).
    #[error("{status}")]
    Terminated {
        /// Platform description of the exit status.
        status: String,
    },
    /// Output could not be captured or the process could not be waited on.
    #[error("failed to capture output of `{program}`: {reason}")]
    Capture {
        /// Program that was invoked.
        program: String,
        /// OS error text.
        reason: String,
    },
}

impl ExecutionError {
    pub(crate) fn spawn(program: &str, err: &std::io::Error) -> Self {
        Self::Spawn {
            program: program.to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn capture(program: &str, err: &std::io::Error) -> Self {
        Self::Capture {
            program: program.to_string(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ExecutionError::Exit { code: 2 }.to_string(), "exit status 2");

        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        assert_eq!(
            ExecutionError::spawn("zsh", &err).to_string(),
            "failed to start `zsh`: not found"
        );
    }
}
