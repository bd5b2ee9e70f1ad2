//! Single-line filter input using tui-textarea.

use ratatui::{Frame, layout::Rect, style::Style};
use tui_textarea::{Input, Key, TextArea};

/// A single-line text input widget
pub struct FilterInput<'a> {
    textarea: TextArea<'a>,
}

impl<'a> FilterInput<'a> {
    /// Create a new filter input with optional initial text
    pub fn new(initial_text: impl Into<String>) -> Self {
        let mut input = Self {
            textarea: TextArea::default(),
        };
        input.set_text(initial_text);
        input
    }

    /// Feed a key to the textarea. Keys that would insert a newline are
    /// ignored. Returns whether the text changed.
    pub fn input(&mut self, input: impl Into<Input>) -> bool {
        let input = input.into();
        match input {
            Input {
                key: Key::Char('m'),
                ctrl: true,
                alt: false,
                ..
            }
            | Input {
                key: Key::Enter, ..
            } => false,
            _ => {
                let before = self.text().to_owned();
                self.textarea.input(input);
                before != self.text()
            }
        }
    }

    /// Get the current input text
    pub fn text(&self) -> &str {
        self.textarea.lines()[0].as_str()
    }

    /// Set the input text
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into().replace(['\n', '\r'], " ");
        self.textarea = TextArea::new(vec![text]);
        self.textarea.remove_line_number();
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea.move_cursor(tui_textarea::CursorMove::End);
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}

impl Default for FilterInput<'_> {
    fn default() -> Self {
        Self::new("")
    }
}
