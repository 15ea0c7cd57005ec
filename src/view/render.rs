//! Render: maps controller state to a [`Frame`].
//!
//! Read-only: nothing here mutates the controller.

use super::frame::{fit, sanitize, wrap, Frame, Line, Style};
use super::theme::Theme;
use crate::controller::{Controller, Mode};
use crate::notebook::{Cell, CellKind};
use crossterm::style::Color;
use unicode_width::UnicodeWidthStr;

/// Columns taken by the border and one column of padding on each side.
const BOX_CHROME: usize = 4;

/// Body rows of one cell, without the box.
fn cell_body(cell: &Cell) -> Vec<(String, bool)> {
    let mut rows = Vec::new();
    let mut push_text = |text: &str, is_error: bool| {
        for line in text.lines() {
            rows.push((sanitize(line), is_error));
        }
    };

    let result = cell.display_output();
    let is_error = cell.error.is_some();
    match (cell.kind(), cell.editing) {
        (_, true) => push_text(&cell.content, false),
        (CellKind::Shell, false) => {
            push_text(&format!("> {}", cell.content), false);
            push_text(&result, is_error);
        }
        (CellKind::Markdown, false) => push_text(&result, is_error),
    }
    if rows.is_empty() {
        rows.push((String::new(), false));
    }
    rows
}

/// Draw `body` inside a rounded box `width` columns wide.
fn boxed(body: &[(String, bool)], width: usize, border: Color, theme: &Theme) -> Vec<Line> {
    let inner = width.saturating_sub(BOX_CHROME);
    let rule = "─".repeat(width.saturating_sub(2));
    let border_style = Style::fg(border);

    let mut lines = vec![Line::new().push(format!("╭{rule}╮"), border_style)];
    for (text, is_error) in body {
        let fg = if *is_error { theme.error } else { theme.text };
        for row in wrap(text, inner) {
            lines.push(
                Line::new()
                    .push("│ ", border_style)
                    .push(fit(&row, inner), Style::fg(fg))
                    .push(" │", border_style),
            );
        }
    }
    lines.push(Line::new().push(format!("╰{rule}╯"), border_style));
    lines
}

fn border_color(cell: &Cell, selected: bool, theme: &Theme) -> Color {
    match (selected, cell.visible, cell.kind()) {
        (true, true, _) => theme.highlight_border,
        (true, false, _) => theme.hidden_highlight_border,
        (false, _, CellKind::Shell) => theme.input_border,
        (false, _, CellKind::Markdown) => theme.markdown_border,
    }
}

/// Input box for Insert mode, plus the cursor position relative to its top.
fn input_box(ctl: &Controller, theme: &Theme, width: usize) -> (Vec<Line>, Option<(usize, usize)>) {
    let Some(buffer) = ctl.edit_buffer() else {
        return (Vec::new(), None);
    };
    let inner = width.saturating_sub(BOX_CHROME);
    let prompt = fit(&theme.prompt, inner.min(theme.prompt.width()));
    let text_width = inner.saturating_sub(prompt.width());
    let border_style = Style::fg(theme.input_border);
    let rule = "─".repeat(width.saturating_sub(2));

    let (text, style, cursor_col) = if buffer.is_empty() {
        (theme.placeholder.as_str(), Style::fg(theme.placeholder_fg), 0)
    } else {
        let (visible, col) = buffer.window(text_width);
        (visible, Style::fg(theme.text), col)
    };

    let lines = vec![
        Line::new().push(format!("╭{rule}╮"), border_style),
        Line::new()
            .push("│ ", border_style)
            .push(prompt.clone(), Style::fg(theme.text))
            .push(fit(&sanitize(text), text_width), style)
            .push(" │", border_style),
        Line::new().push(format!("╰{rule}╯"), border_style),
    ];
    let cursor = (2 + prompt.width() + cursor_col.min(text_width), 1);
    (lines, Some(cursor))
}

fn status_line(ctl: &Controller, theme: &Theme, width: usize) -> Line {
    let mut status = String::from("NORMAL MODE");
    if let Some(cell) = ctl.selected_cell() {
        status.push_str(" | ");
        status.push_str(&sanitize(cell.content.lines().next().unwrap_or_default()));
        if !cell.visible {
            status.push_str(" (hidden)");
        }
    }
    let text = fit(&format!(" {status}"), width);
    Line::new().push(text, Style::fg(theme.status_fg).with_bg(theme.status_bg).bold())
}

/// Render the notebook into a `width` x `height` frame.
///
/// Hidden cells are skipped. When the cells do not fit, the newest rows are
/// shown, scrolled back as far as needed to keep the selected cell in view.
pub fn render(ctl: &Controller, theme: &Theme, width: u16, height: u16) -> Frame {
    let width = usize::from(width);
    let height = usize::from(height);
    let normal = matches!(ctl.mode(), Mode::Normal);

    let mut body: Vec<Line> = Vec::new();
    let mut selected_start = None;
    for (i, cell) in ctl.cells().iter().enumerate() {
        if !cell.visible {
            continue;
        }
        let selected = normal && ctl.selected() == Some(i);
        if !body.is_empty() {
            body.push(Line::new());
        }
        if selected {
            selected_start = Some(body.len());
        }
        let border = border_color(cell, selected, theme);
        body.extend(boxed(&cell_body(cell), width, border, theme));
    }

    let (footer, footer_cursor) = if normal {
        (vec![status_line(ctl, theme, width)], None)
    } else {
        input_box(ctl, theme, width)
    };
    let gap = usize::from(!body.is_empty() && !footer.is_empty());

    let available = height.saturating_sub(footer.len() + gap);
    let mut offset = body.len().saturating_sub(available);
    if let Some(start) = selected_start {
        offset = offset.min(start);
    }

    let mut lines: Vec<Line> = body.into_iter().skip(offset).take(available).collect();
    if gap == 1 && height > footer.len() {
        lines.push(Line::new());
    }
    let footer_top = lines.len();
    lines.extend(footer);
    lines.truncate(height);

    let cursor = footer_cursor.and_then(|(col, row)| {
        let row = footer_top + row;
        if row < lines.len() && col < width {
            Some((u16::try_from(col).ok()?, u16::try_from(row).ok()?))
        } else {
            None
        }
    });

    Frame { lines, cursor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{InputEvent, KeyCode};
    use crate::controller::Effect;
    use crate::exec::{Completion, ExecutionError, ExecutionOutcome};

    fn type_and_run(ctl: &mut Controller, text: &str, outcome: ExecutionOutcome) {
        for c in text.chars() {
            ctl.handle_event(&InputEvent::char(c));
        }
        let Effect::Execute(request) = ctl.handle_event(&InputEvent::key(KeyCode::Enter)) else {
            panic!("expected execution");
        };
        ctl.apply_completion(Completion {
            cell: request.cell,
            outcome,
        });
    }

    fn text_of(frame: &Frame) -> String {
        frame.text().join("\n")
    }

    #[test]
    fn test_empty_notebook_shows_placeholder() {
        let ctl = Controller::default();
        let frame = render(&ctl, &Theme::default(), 40, 10);
        assert_eq!(frame.lines.len(), 3);
        assert!(frame.text()[1].contains("> Enter command..."));
        assert_eq!(frame.cursor, Some((4, 1)));
        for line in &frame.lines {
            assert_eq!(line.width(), 40);
        }
    }

    #[test]
    fn test_shell_cell_shows_echo_and_output() {
        let mut ctl = Controller::default();
        type_and_run(&mut ctl, "echo hi", ExecutionOutcome::success("hi"));
        let frame = render(&ctl, &Theme::default(), 40, 20);
        let text = text_of(&frame);
        assert!(text.contains("│ > echo hi"));
        assert!(text.contains("│ hi "));
    }

    #[test]
    fn test_error_replaces_output() {
        let mut ctl = Controller::default();
        type_and_run(
            &mut ctl,
            "false",
            ExecutionOutcome::failure("noise", ExecutionError::Exit { code: 1 }),
        );
        let text = text_of(&render(&ctl, &Theme::default(), 40, 20));
        assert!(text.contains("exit status 1"));
        assert!(!text.contains("noise"));
    }

    #[test]
    fn test_hidden_cell_skipped_and_flagged_in_status() {
        let mut ctl = Controller::default();
        type_and_run(&mut ctl, "echo secret", ExecutionOutcome::success("secret"));
        ctl.handle_event(&InputEvent::key(KeyCode::Esc));
        ctl.handle_event(&InputEvent::char('s'));

        let frame = render(&ctl, &Theme::default(), 60, 20);
        assert_eq!(frame.lines.len(), 1);
        assert!(frame.text()[0].contains("NORMAL MODE | echo secret (hidden)"));
        assert_eq!(frame.cursor, None);
    }

    #[test]
    fn test_editing_markdown_shows_raw_content() {
        let mut ctl = Controller::default();
        ctl.handle_event(&InputEvent::key(KeyCode::Esc));
        ctl.handle_event(&InputEvent::char('m'));
        let text = text_of(&render(&ctl, &Theme::default(), 60, 20));
        assert!(text.contains("│ Type your markdown here..."));
    }

    #[test]
    fn test_selected_cell_highlighted() {
        let theme = Theme::default();
        let mut ctl = Controller::default();
        type_and_run(&mut ctl, "a", ExecutionOutcome::success(""));
        type_and_run(&mut ctl, "b", ExecutionOutcome::success(""));
        ctl.handle_event(&InputEvent::key(KeyCode::Esc));
        ctl.handle_event(&InputEvent::key(KeyCode::Up));

        let frame = render(&ctl, &theme, 30, 20);
        let top = &frame.lines[0].spans[0];
        assert_eq!(top.style.fg, Some(theme.highlight_border));
        let second_top = frame.lines.iter().filter(|l| l.text().starts_with('╭')).nth(1).unwrap();
        assert_eq!(second_top.spans[0].style.fg, Some(theme.input_border));
    }

    #[test]
    fn test_frame_fits_height_and_keeps_selection_visible() {
        let mut ctl = Controller::default();
        for i in 0..10 {
            type_and_run(&mut ctl, &format!("echo {i}"), ExecutionOutcome::success(i.to_string()));
        }
        let frame = render(&ctl, &Theme::default(), 30, 12);
        assert_eq!(frame.lines.len(), 12);
        assert!(text_of(&frame).contains("echo 9"));

        ctl.handle_event(&InputEvent::key(KeyCode::Esc));
        for _ in 0..9 {
            ctl.handle_event(&InputEvent::key(KeyCode::Up));
        }
        let frame = render(&ctl, &Theme::default(), 30, 12);
        assert!(frame.text()[1].contains("> echo 0"));
    }

    #[test]
    fn test_long_output_wraps() {
        let mut ctl = Controller::default();
        type_and_run(&mut ctl, "x", ExecutionOutcome::success("a".repeat(30)));
        let frame = render(&ctl, &Theme::default(), 14, 20);
        let rows: Vec<String> = frame.text().into_iter().filter(|l| l.contains("aaaa")).collect();
        assert_eq!(rows.len(), 3);
    }
}
