//! Theme: colors and prompt text for the presentation layer.

use crossterm::style::Color;

/// Build a true-color value from a 24-bit hex number (e.g. `0xCBA6F7`).
pub const fn hex(rgb: u32) -> Color {
    Color::Rgb {
        r: ((rgb >> 16) & 0xFF) as u8,
        g: ((rgb >> 8) & 0xFF) as u8,
        b: (rgb & 0xFF) as u8,
    }
}

/// Colors and prompt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Border of shell cells and the input box.
    pub input_border: Color,
    /// Border of markdown cells.
    pub markdown_border: Color,
    /// Border of the selected cell.
    pub highlight_border: Color,
    /// Border of the selected cell while it is hidden.
    pub hidden_highlight_border: Color,
    /// Body text.
    pub text: Color,
    /// Placeholder text in an empty input box.
    pub placeholder_fg: Color,
    /// Error text.
    pub error: Color,
    /// Status line foreground.
    pub status_fg: Color,
    /// Status line background.
    pub status_bg: Color,
    /// Prompt before the edit buffer.
    pub prompt: String,
    /// Shown when the edit buffer is empty.
    pub placeholder: String,
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin Mocha
        Self {
            input_border: hex(0xCBA6F7),
            markdown_border: hex(0x89B4FA),
            highlight_border: hex(0x89DCEB),
            hidden_highlight_border: hex(0x6C7086),
            text: hex(0xCDD6F4),
            placeholder_fg: hex(0x6C7086),
            error: hex(0xF38BA8),
            status_fg: hex(0xCDD6F4),
            status_bg: hex(0x1E1E2E),
            prompt: String::from("> "),
            placeholder: String::from("Enter command..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xFF5500), Color::Rgb { r: 255, g: 85, b: 0 });
    }
}
