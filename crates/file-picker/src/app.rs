use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table, TableState,
    },
};

use crate::input::FilterInput;
use crate::theme::Theme;
use crate::types::{FileRow, PickOutcome};
use crate::utils::build_file_rows;
use frizbee::{Config, match_list};

const PREFILTER_ENABLE_THRESHOLD: usize = 1_000;

pub struct App {
    pub rows: Vec<FileRow>,
    pub filter: FilterInput<'static>,
    pub table_state: TableState,
    pub filtered: Vec<usize>,
    pub matcher_config: Config,
    pub(crate) title: String,
    pub(crate) context: Option<String>,
    pub(crate) theme: Theme,
}

impl App {
    pub fn new(rows: Vec<FileRow>) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        let matcher_config = Config {
            prefilter: false,
            ..Config::default()
        };
        let mut app = Self {
            rows,
            filter: FilterInput::default(),
            table_state,
            filtered: Vec::new(),
            matcher_config,
            title: "Select files".to_string(),
            context: None,
            theme: Theme::default(),
        };
        app.refresh();
        app
    }

    /// Run the interactive checklist until the user accepts or cancels.
    pub fn run(&mut self) -> Result<PickOutcome> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<PickOutcome> {
        terminal.clear()?;
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()?
                    && key.kind == KeyEventKind::Press
                    && let Some(outcome) = self.handle_key(key)
                {
                    return Ok(outcome);
                }
            }
        }
    }

    /// Paths currently checked, in original order.
    pub fn selected_paths(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| row.selected)
            .map(|row| row.path.clone())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.rows.iter().filter(|row| row.selected).count()
    }

    /// Replace the filter text and re-run matching.
    pub fn set_query(&mut self, query: &str) {
        self.filter.set_text(query);
        self.refresh();
    }

    /// Flip the row under the cursor.
    pub fn toggle_current(&mut self) {
        if let Some(&index) = self
            .table_state
            .selected()
            .and_then(|idx| self.filtered.get(idx))
        {
            let row = &mut self.rows[index];
            row.selected = !row.selected;
        }
    }

    /// Check or uncheck every visible row.
    pub fn set_visible(&mut self, selected: bool) {
        for &index in &self.filtered {
            self.rows[index].selected = selected;
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Option<PickOutcome> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Some(PickOutcome::cancelled()),
            KeyCode::Enter => return Some(PickOutcome::accepted(self.selected_paths())),
            KeyCode::Char('c') if ctrl => return Some(PickOutcome::cancelled()),
            KeyCode::Char('a') if ctrl => self.set_visible(true),
            KeyCode::Char('x') if ctrl => self.set_visible(false),
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Up => self.move_selection_up(),
            KeyCode::Down => self.move_selection_down(),
            _ => {
                if self.filter.input(key) {
                    self.refresh();
                }
            }
        }
        None
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area().inner(Margin {
            vertical: 1,
            horizontal: 2,
        });

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(frame, layout[0]);
        self.render_input(frame, layout[1]);
        self.render_table(frame, layout[2]);
        self.render_footer(frame, layout[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut first = vec![Span::styled(
            self.title.as_str(),
            self.theme.prompt_style().add_modifier(Modifier::BOLD),
        )];
        if let Some(context) = &self.context {
            first.push(Span::raw("  •  "));
            first.push(Span::styled(context.as_str(), self.theme.empty_style()));
        }
        let counts = Line::from(vec![
            Span::raw("Selected: "),
            Span::styled(
                self.selected_count().to_string(),
                self.theme.checked_style(),
            ),
            Span::raw(format!(" of {}", self.rows.len())),
            Span::raw("  •  "),
            Span::raw(format!("Showing: {}", self.filtered.len())),
        ]);
        let header = Paragraph::new(Text::from(vec![Line::from(first), counts]))
            .alignment(Alignment::Left);
        frame.render_widget(header, area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let prompt = "Filter > ";
        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(prompt.len() as u16), Constraint::Min(1)])
            .split(area);
        frame.render_widget(
            Paragraph::new(prompt).style(self.theme.prompt_style()),
            parts[0],
        );
        self.filter.render(frame, parts[1]);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .border_style(self.theme.empty_style());

        if self.filtered.is_empty() {
            let empty = Paragraph::new("No files match the filter")
                .alignment(Alignment::Center)
                .style(self.theme.empty_style())
                .block(block);
            frame.render_widget(Clear, area);
            frame.render_widget(empty, area);
            return;
        }

        let query = self.filter.text().trim().to_string();
        let config = self.config_for_query(&query);
        let highlight_state = if query.is_empty() {
            None
        } else {
            Some((query.as_str(), &config))
        };
        let rows = build_file_rows(&self.filtered, &self.rows, highlight_state, &self.theme);

        let header = Row::new(["", "Path", "Size"].map(Cell::from))
            .style(self.theme.header_style())
            .height(1);
        let widths = [
            Constraint::Length(3),
            Constraint::Min(20),
            Constraint::Length(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(block)
            .row_highlight_style(self.theme.row_highlight_style())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(table, area, &mut self.table_state);

        let mut scrollbar_state = ScrollbarState::default()
            .content_length(self.filtered.len())
            .position(self.table_state.selected().unwrap_or(0));
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .thumb_style(Style::new().bg(self.theme.highlight_fg));
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let key = |label: &'static str| {
            Span::styled(label, self.theme.prompt_style().add_modifier(Modifier::BOLD))
        };
        let footer = Paragraph::new(Line::from(vec![
            key("Space"),
            Span::raw(" toggle  •  "),
            key("Ctrl-A"),
            Span::raw(" select all  •  "),
            key("Ctrl-X"),
            Span::raw(" clear  •  "),
            key("Enter"),
            Span::raw(" accept  •  "),
            key("Esc"),
            Span::raw(" cancel"),
        ]))
        .style(self.theme.empty_style());
        frame.render_widget(footer, area);
    }

    fn move_selection_up(&mut self) {
        if let Some(selected) = self.table_state.selected()
            && selected > 0
        {
            self.table_state.select(Some(selected - 1));
        }
    }

    fn move_selection_down(&mut self) {
        if let Some(selected) = self.table_state.selected()
            && selected + 1 < self.filtered.len()
        {
            self.table_state.select(Some(selected + 1));
        }
    }

    pub(crate) fn refresh(&mut self) {
        self.refresh_files();
        if self.filtered.is_empty() {
            self.table_state.select(None);
        } else if let Some(selected) = self.table_state.selected() {
            if selected >= self.filtered.len() {
                self.table_state.select(Some(self.filtered.len() - 1));
            }
        } else {
            self.table_state.select(Some(0));
        }
    }

    pub(crate) fn refresh_files(&mut self) {
        let query = self.filter.text().trim().to_string();
        if query.is_empty() {
            self.filtered = (0..self.rows.len()).collect();
            return;
        }

        let config = self.config_for_query(&query);
        let haystacks: Vec<&str> = self.rows.iter().map(|row| row.path.as_str()).collect();
        let ranked = match_list(&query, &haystacks, &config);
        self.filtered = Vec::new();
        for entry in ranked {
            if entry.score == 0 {
                continue;
            }
            self.filtered.push(entry.index as usize);
        }
    }

    pub(crate) fn config_for_query(&self, query: &str) -> Config {
        let mut config = self.matcher_config.clone();

        let length = query.chars().count();
        let mut allowed_typos: u16 = match length {
            0 | 1 => 0,
            2..=4 => 1,
            5..=7 => 2,
            8..=12 => 3,
            _ => 4,
        };
        if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
            allowed_typos = allowed_typos.min(max_reasonable);
        }

        if self.rows.len() >= PREFILTER_ENABLE_THRESHOLD {
            config.prefilter = true;
            config.max_typos = Some(allowed_typos);
        } else {
            config.prefilter = false;
            config.max_typos = None;
        }

        config
    }
}
