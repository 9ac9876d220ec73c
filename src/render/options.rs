//! Rendering options.

/// Break marker inserted between paragraphs in the HTML buffer.
pub const DEFAULT_LINE_BREAK: &str = "<br/>";

/// Options for rendering table cells.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Marker placed between paragraphs in HTML output
    pub line_break: String,

    /// Text substituted for unresolved equations and images
    pub placeholder: String,

    /// Render tables on the rayon pool
    pub parallel: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTML paragraph break marker.
    pub fn with_line_break(mut self, marker: impl Into<String>) -> Self {
        self.line_break = marker.into();
        self
    }

    /// Set the placeholder for unresolved objects.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Enable or disable parallel table rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_break: DEFAULT_LINE_BREAK.to_string(),
            placeholder: String::new(),
            parallel: true,
        }
    }
}
