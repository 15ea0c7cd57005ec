//! Terminal: RAII ownership of the terminal and frame output.
//!
//! [`Terminal::enter`] switches to raw mode (and the alternate screen when
//! configured); dropping the guard restores everything. Frames are written
//! inside a synchronized update and flushed in a single write.

use crate::view::{Frame, Style};
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Terminal options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(10),
            alternate_screen: true,
        }
    }
}

/// Owns the terminal for the lifetime of the notebook.
pub struct Terminal {
    config: TerminalConfig,
    stdout: Stdout,
    width: u16,
    height: u16,
}

impl Terminal {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn enter(config: TerminalConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, terminal::EnterAlternateScreen)?;
        }
        execute!(stdout, EnableBracketedPaste)?;

        Ok(Self {
            config,
            stdout,
            width,
            height,
        })
    }

    /// Terminal width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Terminal height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Record a new terminal size.
    pub const fn handle_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Write a full frame.
    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let out = &mut self.stdout;
        queue!(out, BeginSynchronizedUpdate, cursor::Hide)?;

        for (row, line) in frame.lines.iter().enumerate() {
            let Ok(row) = u16::try_from(row) else { break };
            queue!(out, cursor::MoveTo(0, row))?;
            for span in &line.spans {
                apply_style(out, span.style)?;
                queue!(out, Print(&span.text), SetAttribute(Attribute::Reset), ResetColor)?;
            }
            queue!(out, Clear(ClearType::UntilNewLine))?;
        }

        let below = u16::try_from(frame.lines.len()).unwrap_or(u16::MAX);
        if below < self.height {
            queue!(out, cursor::MoveTo(0, below), Clear(ClearType::FromCursorDown))?;
        }

        if let Some((x, y)) = frame.cursor {
            queue!(out, cursor::MoveTo(x, y), cursor::Show)?;
        }
        queue!(out, EndSynchronizedUpdate)?;
        out.flush()
    }
}

fn apply_style(out: &mut Stdout, style: Style) -> io::Result<()> {
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(fg))?;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(bg))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

/// Put the terminal back into its normal state.
///
/// Safe to call more than once; used by [`Terminal`]'s drop and the panic hook.
pub fn restore(alternate_screen: bool) {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableBracketedPaste, cursor::Show);
    if alternate_screen {
        let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    }
    let _ = terminal::disable_raw_mode();
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore(self.config.alternate_screen);
    }
}
