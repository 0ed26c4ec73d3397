/// Startup settings for a render session.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// CSS selector for the drawing surface; the first match is used.
    pub canvas_selector: String,
    /// Context identifiers requested in order until one is granted.
    pub context_ids: Vec<String>,
    /// RGBA color the surface is cleared to before the first frame.
    pub clear_color: [f32; 4],
    /// Maximum level routed to the browser console.
    pub log_level: log::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_selector: "canvas".to_owned(),
            context_ids: vec!["webgl".to_owned(), "experimental-webgl".to_owned()],
            clear_color: [0.0, 0.0, 0.0, 1.0],
            log_level: log::Level::Info,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_canvas_selector(mut self, selector: impl Into<String>) -> Self {
        self.canvas_selector = selector.into();
        self
    }

    #[must_use]
    pub fn with_context_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_clear_color(mut self, rgba: [f32; 4]) -> Self {
        self.clear_color = rgba;
        self
    }

    #[must_use]
    pub const fn with_log_level(mut self, level: log::Level) -> Self {
        self.log_level = level;
        self
    }
}
