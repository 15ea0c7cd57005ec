//! App: the event loop that ties the actors, the controller and the view
//! together.
//!
//! All notebook state lives on the loop thread. Terminal input and execution
//! results arrive over channels and are applied one at a time in delivery
//! order.

use crate::actor::{InputActor, InputEvent, LoopEvent};
use crate::config::Config;
use crate::controller::{Controller, Effect, KeyMap};
use crate::exec::{Completion, ExecutionDispatcher, Executor, ProcessExecutor};
use crate::terminal::Terminal;
use crate::view;
use crossbeam_channel::{bounded, select, Receiver};
use std::io;
use thiserror::Error;

/// Errors that end the notebook.
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal setup, input or output failed.
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
}

/// What the loop does after handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Nothing visible changed.
    Idle,
    /// Draw a new frame.
    Redraw,
    /// Leave the loop.
    Quit,
}

/// Notebook state plus the means to run cells.
pub struct Session<E: Executor> {
    controller: Controller,
    dispatcher: ExecutionDispatcher<E>,
    completions: Receiver<Completion>,
}

impl<E: Executor> Session<E> {
    /// Create a session with an empty notebook.
    pub fn new(executor: E, keys: KeyMap) -> Self {
        let (dispatcher, completions) = ExecutionDispatcher::with_channel(executor);
        Self {
            controller: Controller::new(keys),
            dispatcher,
            completions,
        }
    }

    /// The notebook state.
    pub const fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Receiver for execution results.
    pub const fn completions(&self) -> &Receiver<Completion> {
        &self.completions
    }

    /// Apply one event.
    pub fn handle(&mut self, event: LoopEvent) -> Flow {
        match event {
            LoopEvent::Executed(completion) => {
                if self.controller.apply_completion(completion) {
                    Flow::Redraw
                } else {
                    Flow::Idle
                }
            }
            LoopEvent::Input(InputEvent::Resize { .. }) => Flow::Redraw,
            LoopEvent::Input(InputEvent::Shutdown) => Flow::Quit,
            LoopEvent::Input(InputEvent::Error(message)) => {
                tracing::warn!(%message, "input error");
                Flow::Idle
            }
            LoopEvent::Input(input) => match self.controller.handle_event(&input) {
                Effect::Ignored => Flow::Idle,
                Effect::Updated => Flow::Redraw,
                Effect::Execute(request) => {
                    self.dispatcher.dispatch(request);
                    Flow::Redraw
                }
                Effect::Quit => Flow::Quit,
            },
        }
    }
}

/// Run the notebook until the user quits.
pub fn run(config: Config) -> Result<(), AppError> {
    let Config {
        interpreters,
        theme,
        terminal: terminal_config,
        keys,
    } = config;

    tracing::info!(
        shell = %interpreters.shell.program,
        markdown = %interpreters.markdown.program,
        "starting notebook"
    );

    let mut terminal = Terminal::enter(terminal_config.clone())?;
    let (input_tx, input_rx) = bounded::<InputEvent>(64);
    let input = InputActor::spawn(input_tx, terminal_config.input_poll_timeout)?;
    let mut session = Session::new(ProcessExecutor::new(interpreters), keys);

    terminal.draw(&view::render(
        session.controller(),
        &theme,
        terminal.width(),
        terminal.height(),
    ))?;

    loop {
        let event = select! {
            recv(input_rx) -> msg => match msg {
                Ok(event) => LoopEvent::Input(event),
                Err(_) => break,
            },
            recv(session.completions()) -> msg => match msg {
                Ok(completion) => LoopEvent::Executed(completion),
                Err(_) => break,
            },
        };

        if let LoopEvent::Input(InputEvent::Resize { width, height }) = event {
            terminal.handle_resize(width, height);
        }

        match session.handle(event) {
            Flow::Idle => {}
            Flow::Redraw => {
                let frame = view::render(
                    session.controller(),
                    &theme,
                    terminal.width(),
                    terminal.height(),
                );
                terminal.draw(&frame)?;
            }
            Flow::Quit => break,
        }
    }

    tracing::info!("quitting");
    // The actor's final Shutdown send must not block on a full channel.
    drop(input_rx);
    input.join();
    Ok(())
}
