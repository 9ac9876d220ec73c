//! Parsing options and configuration.

/// Options for parsing DOCX packages.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to load the bytes of embedded image and object parts
    pub extract_parts: bool,

    /// Whether to read document metadata (`docProps/core.xml`)
    pub read_metadata: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip missing parts).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable loading of embedded part bytes.
    pub fn with_parts(mut self, extract: bool) -> Self {
        self.extract_parts = extract;
        self
    }

    /// Parse table structure only, without embedded part bytes or metadata.
    pub fn structure_only(mut self) -> Self {
        self.extract_parts = false;
        self.read_metadata = false;
        self
    }

    /// Enable or disable metadata reading.
    pub fn with_metadata(mut self, read: bool) -> Self {
        self.read_metadata = read;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            extract_parts: true,
            read_metadata: true,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail when a relationship points at a missing part
    #[default]
    Strict,
    /// Log missing parts and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().lenient().structure_only();

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.extract_parts);
        assert!(!options.read_metadata);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.extract_parts);
        assert!(options.read_metadata);
    }
}
