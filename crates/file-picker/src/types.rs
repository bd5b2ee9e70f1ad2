use std::mem;

use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Cell;

/// One file in the checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub path: String,
    /// Free-form text shown next to the path, such as the file size.
    pub detail: String,
    pub selected: bool,
}

impl FileRow {
    /// A row that starts out selected.
    #[must_use]
    pub fn new(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            detail: detail.into(),
            selected: true,
        }
    }

    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// Result of a picker session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickOutcome {
    accepted: bool,
    selected: Vec<String>,
}

impl PickOutcome {
    #[must_use]
    pub fn accepted(selected: Vec<String>) -> Self {
        Self {
            accepted: true,
            selected,
        }
    }

    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            accepted: false,
            selected: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Selected paths in their original order. Empty when cancelled.
    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }
}

pub(crate) fn highlight_cell(text: &str, indices: Option<Vec<usize>>, style: Style) -> Cell<'_> {
    let Some(mut sorted_indices) = indices.filter(|indices| !indices.is_empty()) else {
        return Cell::from(text.to_string());
    };
    sorted_indices.sort_unstable();
    let mut next = sorted_indices.into_iter().peekable();
    let mut buffer = String::new();
    let mut highlighted = false;
    let mut spans = Vec::new();

    for (idx, ch) in text.chars().enumerate() {
        let should_highlight = next.peek().copied() == Some(idx);
        if should_highlight {
            next.next();
        }
        if should_highlight != highlighted {
            if !buffer.is_empty() {
                let span_style = if highlighted { style } else { Style::default() };
                spans.push(Span::styled(mem::take(&mut buffer), span_style));
            }
            highlighted = should_highlight;
        }
        buffer.push(ch);
    }

    if !buffer.is_empty() {
        let span_style = if highlighted { style } else { Style::default() };
        spans.push(Span::styled(buffer, span_style));
    }

    Cell::from(Text::from(Line::from(spans)))
}
