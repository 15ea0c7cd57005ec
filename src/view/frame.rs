//! Frame: styled lines ready to be written to the terminal.

use crossterm::style::Color;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Text style for a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color (`None` = terminal default).
    pub fg: Option<Color>,
    /// Background color (`None` = terminal default).
    pub bg: Option<Color>,
    /// Bold text.
    pub bold: bool,
}

impl Style {
    /// A style with only a foreground color.
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            bold: false,
        }
    }

    /// Builder: set the background color.
    #[must_use]
    pub const fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Builder: make bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A run of text in one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// The text (no line breaks).
    pub text: String,
    /// Its style.
    pub style: Style,
}

/// One terminal row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// Spans, left to right.
    pub spans: Vec<Span>,
}

impl Line {
    /// An empty line.
    pub const fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// Builder: append a span.
    #[must_use]
    pub fn push(mut self, text: impl Into<String>, style: Style) -> Self {
        self.spans.push(Span {
            text: text.into(),
            style,
        });
        self
    }

    /// The line's text without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Display width in columns.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }
}

/// A complete screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// Rows from the top of the screen.
    pub lines: Vec<Line>,
    /// Cursor position `(column, row)`; `None` hides it.
    pub cursor: Option<(u16, u16)>,
}

impl Frame {
    /// The frame's text, one string per row (for tests and logging).
    pub fn text(&self) -> Vec<String> {
        self.lines.iter().map(Line::text).collect()
    }
}

/// Make `text` safe to draw: tabs become spaces, other control characters
/// are dropped.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.push_str("    "),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Hard-wrap one line of text at `width` columns on grapheme boundaries.
///
/// Always returns at least one (possibly empty) row.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = vec![String::new()];
    if width == 0 {
        return rows;
    }
    let mut used = 0;
    for g in text.graphemes(true) {
        let w = g.width();
        if used + w > width && used > 0 {
            rows.push(String::new());
            used = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push_str(g);
        }
        used += w;
    }
    rows
}

/// Pad `text` with spaces to exactly `width` columns, truncating if longer.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for g in text.graphemes(true) {
        let w = g.width();
        if used + w > width {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(wrap("", 3), vec![""]);
        // Wide characters are never split across rows.
        assert_eq!(wrap("日本語", 5), vec!["日本", "語"]);
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abcd");
        assert_eq!(fit("日本", 3), "日 ");
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("a\tb\x1b[0m"), "a    b[0m");
    }

    #[test]
    fn test_line_text_and_width() {
        let line = Line::new().push("ab", Style::default()).push("日", Style::default());
        assert_eq!(line.text(), "ab日");
        assert_eq!(line.width(), 4);
    }
}
