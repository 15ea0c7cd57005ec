//! Edit Buffer: Single-line text editing with a cursor.
//!
//! Holds the text being composed in Insert mode. Cursor movement and
//! deletion step over whole grapheme clusters, so combining sequences and
//! emoji are edited as one unit.

use crate::actor::{InputEvent, KeyCode};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A single-line text buffer with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    /// Current text content.
    content: String,
    /// Cursor position (byte offset, always on a grapheme boundary).
    cursor: usize,
}

impl EditBuffer {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
        }
    }

    /// Create a buffer holding `content`, cursor at the end.
    pub fn with_content(content: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_content(content);
        buffer
    }

    /// Get the current text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor byte offset.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Set the content, moving cursor to end.
    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.cursor = self.content.len();
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Insert text at the cursor. Line breaks become spaces.
    pub fn insert_str(&mut self, text: &str) {
        let text: String = text
            .chars()
            .filter(|c| *c != '\r')
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        self.content.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Byte offset of the grapheme boundary before the cursor.
    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    /// Byte offset of the grapheme boundary after the cursor.
    fn next_boundary(&self) -> usize {
        self.content[self.cursor..]
            .graphemes(true)
            .next()
            .map_or(self.cursor, |g| self.cursor + g.len())
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.content.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.next_boundary();
            self.content.replace_range(self.cursor..next, "");
        }
    }

    fn cursor_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    fn cursor_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    const fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    const fn cursor_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Apply an editing event.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key { code, modifiers } => {
                match code {
                    KeyCode::Char(c) if !modifiers.control && !modifiers.alt => self.insert_char(*c),
                    KeyCode::Backspace => self.backspace(),
                    KeyCode::Delete => self.delete(),
                    KeyCode::Left => self.cursor_left(),
                    KeyCode::Right => self.cursor_right(),
                    KeyCode::Home => self.cursor_home(),
                    KeyCode::End => self.cursor_end(),
                    _ => return false,
                }
                true
            }
            InputEvent::Paste(text) => {
                self.insert_str(text);
                true
            }
            _ => false,
        }
    }

    /// The slice of content that fits in `width` columns with the cursor
    /// in view, and the cursor's column within that slice.
    pub fn window(&self, width: usize) -> (&str, usize) {
        if width == 0 {
            return ("", 0);
        }

        // Scroll so the cursor (plus one cell for it) fits.
        let mut start = 0;
        let before = &self.content[..self.cursor];
        let mut cursor_col = before.width();
        for (i, g) in before.grapheme_indices(true) {
            if cursor_col < width {
                break;
            }
            cursor_col -= g.width();
            start = i + g.len();
        }

        let mut end = start;
        let mut used = 0;
        for g in self.content[start..].graphemes(true) {
            let w = g.width();
            if used + w > width {
                break;
            }
            used += w;
            end += g.len();
        }

        (&self.content[start..end], cursor_col)
    }
}
