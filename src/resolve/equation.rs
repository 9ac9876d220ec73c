//! Equation conversion collaborators.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

use super::ObjectPayload;

/// Converts an embedded equation object into LaTeX.
///
/// Implementations receive the raw bytes of the OLE object part and return
/// LaTeX, typically delimited with `$$`. The pipeline rewrites the
/// delimiters afterwards, see [`bracket_display_math`].
pub trait EquationConverter: Send + Sync {
    /// Convert one equation object.
    fn convert(&self, object: &ObjectPayload<'_>) -> Result<String>;
}

/// Replace the first `$$` with `[` and the following `$$` with `]`.
///
/// Any further `$$` pairs are left untouched.
///
/// ```
/// use undocx::resolve::bracket_display_math;
///
/// assert_eq!(bracket_display_math("$$x^2$$"), "[x^2]");
/// assert_eq!(bracket_display_math("x^2"), "x^2");
/// ```
pub fn bracket_display_math(latex: &str) -> String {
    latex.replacen("$$", "[", 1).replacen("$$", "]", 1)
}

/// Adapter turning a closure into an [`EquationConverter`].
pub struct FnConverter<F>(pub F);

impl<F> EquationConverter for FnConverter<F>
where
    F: Fn(&ObjectPayload<'_>) -> Result<String> + Send + Sync,
{
    fn convert(&self, object: &ObjectPayload<'_>) -> Result<String> {
        (self.0)(object)
    }
}

/// Runs an external program per equation object.
///
/// The object bytes are written to the program's stdin; its stdout, trimmed,
/// is the LaTeX. A non-zero exit status is a conversion failure.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    /// Create a converter for a program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Parse a whitespace-separated command line (`mtef2tex --display`).
    pub fn from_command_line(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| Error::Other("Empty equation command".into()))?;
        Ok(Self::new(program).with_args(parts))
    }

    /// Append arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program name.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl EquationConverter for CommandConverter {
    fn convert(&self, object: &ObjectPayload<'_>) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Conversion(format!("cannot run {}: {}", self.program, e)))?;

        // Feed stdin from a separate thread so a chatty child cannot deadlock
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Conversion("stdin unavailable".into()))?;
        let data = object.data.to_vec();
        let writer = std::thread::spawn(move || stdin.write_all(&data));

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Conversion(e.to_string()))?;
        match writer.join() {
            Ok(Ok(())) => {}
            // A converter may exit without reading all input
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(Error::Conversion(e.to_string())),
            Err(_) => return Err(Error::Conversion("stdin writer panicked".into())),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Conversion(format!(
                "{} exited with {} for {}: {}",
                self.program,
                output.status,
                object.reference.id,
                stderr.trim()
            )));
        }

        let latex = String::from_utf8(output.stdout)
            .map_err(|e| Error::Conversion(format!("non UTF-8 output: {}", e)))?;
        Ok(latex.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectReference;

    #[test]
    fn test_bracket_display_math() {
        assert_eq!(bracket_display_math("$$x^2$$"), "[x^2]");
        assert_eq!(bracket_display_math("a $$b$$ c $$d$$"), "a [b] c $$d$$");
        assert_eq!(bracket_display_math("$$open"), "[open");
        assert_eq!(bracket_display_math(""), "");
    }

    #[test]
    fn test_fn_converter() {
        let converter = FnConverter(|object: &ObjectPayload<'_>| -> Result<String> {
            Ok(format!("$${}$$", object.data.len()))
        });
        let reference = ObjectReference::new("rId1", "word/embeddings/oleObject1.bin");
        let payload = ObjectPayload::new(&reference, b"abc");
        assert_eq!(converter.convert(&payload).unwrap(), "$$3$$");
    }

    #[test]
    fn test_command_line_parsing() {
        let converter = CommandConverter::from_command_line("mtef2tex --display  -q").unwrap();
        assert_eq!(converter.program(), "mtef2tex");
        assert_eq!(converter.args, ["--display", "-q"]);
        assert!(CommandConverter::from_command_line("   ").is_err());
    }

    #[test]
    fn test_missing_program_fails() {
        let converter = CommandConverter::new("undocx-no-such-converter-program");
        let reference = ObjectReference::new("rId1", "word/embeddings/oleObject1.bin");
        let result = converter.convert(&ObjectPayload::new(&reference, b"data"));
        assert!(matches!(result, Err(Error::Conversion(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_converter_reads_stdout() {
        let converter = CommandConverter::new("sh").with_args(["-c", "cat >/dev/null; echo '$$y$$'"]);
        let reference = ObjectReference::new("rId1", "word/embeddings/oleObject1.bin");
        let latex = converter
            .convert(&ObjectPayload::new(&reference, b"binary"))
            .unwrap();
        assert_eq!(latex, "$$y$$");
    }
}
