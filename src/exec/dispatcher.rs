//! Dispatcher: runs each execution on its own thread.

use super::error::ExecutionError;
use super::gateway::{ExecutionOutcome, Executor};
use crate::notebook::{CellId, CellKind};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// A request to run one cell, captured by value at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    /// Identity of the target cell.
    pub cell: CellId,
    /// Kind of the target cell.
    pub kind: CellKind,
    /// Content to run.
    pub content: String,
}

/// Result of an execution, addressed to the cell that requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Identity of the target cell.
    pub cell: CellId,
    /// What the execution produced.
    pub outcome: ExecutionOutcome,
}

/// Spawns one worker thread per request and reports back on a channel.
///
/// Workers are detached: there is no cancellation, and dropping the
/// dispatcher does not wait for them.
pub struct ExecutionDispatcher<E: Executor> {
    executor: Arc<E>,
    completions: Sender<Completion>,
}

impl<E: Executor> ExecutionDispatcher<E> {
    /// Create a dispatcher that reports completions on `completions`.
    pub fn new(executor: E, completions: Sender<Completion>) -> Self {
        Self {
            executor: Arc::new(executor),
            completions,
        }
    }

    /// Create a dispatcher along with the receiving end of its channel.
    pub fn with_channel(executor: E) -> (Self, Receiver<Completion>) {
        let (tx, rx) = unbounded();
        (Self::new(executor, tx), rx)
    }

    /// Run `request` in the background.
    ///
    /// If the worker thread cannot be spawned, a failed completion is sent
    /// right away so the cell still gets a result.
    pub fn dispatch(&self, request: ExecutionRequest) {
        let cell = request.cell;
        tracing::debug!(cell = %cell, kind = request.kind.as_str(), "dispatching execution");

        let executor = Arc::clone(&self.executor);
        let completions = self.completions.clone();

        let spawned = thread::Builder::new()
            .name(format!("grappler-exec-{}", cell.get()))
            .spawn(move || {
                let outcome = executor.execute(request.kind, &request.content);
                // Receiver dropped means the notebook is shutting down.
                let _ = completions.send(Completion {
                    cell: request.cell,
                    outcome,
                });
            });

        if let Err(e) = spawned {
            tracing::warn!(cell = %cell, error = %e, "failed to spawn execution thread");
            let _ = self.completions.send(Completion {
                cell,
                outcome: ExecutionOutcome::failure(
                    "",
                    ExecutionError::Spawn {
                        program: "worker thread".to_string(),
                        reason: e.to_string(),
                    },
                ),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{InterpreterConfig, ProcessExecutor};
    use crossbeam_channel::bounded;
    use std::time::Duration;

    /// Executor that waits for a go-ahead before answering.
    struct GatedExecutor {
        gate: Receiver<()>,
    }

    impl Executor for GatedExecutor {
        fn execute(&self, _kind: CellKind, content: &str) -> ExecutionOutcome {
            let _ = self.gate.recv_timeout(Duration::from_secs(5));
            ExecutionOutcome::success(content.to_uppercase())
        }
    }

    #[test]
    fn test_dispatch_delivers_completion() {
        let (dispatcher, rx) =
            ExecutionDispatcher::with_channel(ProcessExecutor::new(InterpreterConfig::default()));
        let cell = CellId::fresh();
        dispatcher.dispatch(ExecutionRequest {
            cell,
            kind: CellKind::Shell,
            content: "echo hi".to_string(),
        });

        let completion = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(completion.cell, cell);
        assert_eq!(completion.outcome, ExecutionOutcome::success("hi"));
    }

    #[test]
    fn test_dispatch_does_not_block() {
        let (go_tx, go_rx) = bounded(0);
        let (dispatcher, rx) = ExecutionDispatcher::with_channel(GatedExecutor { gate: go_rx });
        let cell = CellId::fresh();
        dispatcher.dispatch(ExecutionRequest {
            cell,
            kind: CellKind::Shell,
            content: "slow".to_string(),
        });

        // Returned before the executor was allowed to finish.
        assert!(rx.try_recv().is_err());

        go_tx.send(()).unwrap();
        let completion = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(completion.outcome.output, "SLOW");
    }
}
