use frizbee::{Config, match_indices};
use ratatui::widgets::{Cell, Row};

use crate::theme::Theme;
use crate::types::{FileRow, highlight_cell};

const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";

/// Character positions in `text` matched by `needle`, for highlighting.
pub fn highlight_for_refs(needle: &str, config: &Config, text: &str) -> Option<Vec<usize>> {
    match_indices(needle, text, config).map(|m| m.indices)
}

pub fn checkbox(selected: bool) -> &'static str {
    if selected { CHECKED } else { UNCHECKED }
}

pub fn build_file_rows<'a>(
    filtered: &'a [usize],
    files: &'a [FileRow],
    highlight_state: Option<(&'a str, &'a Config)>,
    theme: &Theme,
) -> Vec<Row<'a>> {
    filtered
        .iter()
        .map(|&actual_index| {
            let entry = &files[actual_index];
            let highlight = highlight_state
                .and_then(|(needle, config)| highlight_for_refs(needle, config, &entry.path));
            let mark = if entry.selected {
                Cell::from(checkbox(true)).style(theme.checked_style())
            } else {
                Cell::from(checkbox(false)).style(theme.empty_style())
            };
            Row::new([
                mark,
                highlight_cell(&entry.path, highlight, theme.match_style()),
                Cell::from(entry.detail.as_str()),
            ])
        })
        .collect()
}
