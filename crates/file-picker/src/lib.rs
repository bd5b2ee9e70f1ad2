pub mod app;
pub mod input;
pub mod theme;
pub mod types;
pub mod utils;


pub use theme::Theme;
pub use types::{FileRow, PickOutcome};

/// A small builder for configuring the file checklist before running it.
pub struct Picker {
    rows: Vec<FileRow>,
    title: Option<String>,
    context: Option<String>,
    theme: Theme,
}

impl Picker {
    /// Create a picker over `rows`.
    pub fn new(rows: Vec<FileRow>) -> Self {
        Self {
            rows,
            title: None,
            context: None,
            theme: Theme::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Secondary text in the header, such as the folder being committed.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Pick a theme by name; unknown names keep the default.
    pub fn with_theme_name(mut self, name: &str) -> Self {
        if let Some(theme) = theme::by_name(name) {
            self.theme = theme;
        }
        self
    }

    fn into_app(self) -> app::App {
        let mut app = app::App::new(self.rows);
        if let Some(title) = self.title {
            app.title = title;
        }
        app.context = self.context;
        app.theme = self.theme;
        app
    }

    /// Run the interactive checklist with the configured options.
    pub fn run(self) -> anyhow::Result<PickOutcome> {
        self.into_app().run()
    }
}
