//! Paragraph and run types.

use serde::{Deserialize, Serialize};

/// EMUs per CSS pixel at 96 DPI.
const EMU_PER_PIXEL: f64 = 9525.0;

/// A paragraph inside a table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Runs in document order
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with a single text run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::text(text)],
        }
    }

    /// Create a paragraph from runs.
    pub fn with_runs(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// Add a run.
    pub fn add_run(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Literal text of all runs, ignoring drawings and objects.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph has no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// The smallest unit of content within a paragraph.
///
/// A run normally carries either text, one inline drawing, or one embedded
/// object. The parser keeps everything it sees so that the renderer can
/// apply its classification rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Literal text (`w:t`, tabs and breaks)
    pub text: String,

    /// Inline drawings (`w:drawing/wp:inline`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drawings: Vec<InlineDrawing>,

    /// Embedded OLE objects (`w:object/o:OLEObject`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<EmbeddedObject>,
}

impl Run {
    /// Create a text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create a run holding one inline drawing.
    pub fn drawing(drawing: InlineDrawing) -> Self {
        Self {
            drawings: vec![drawing],
            ..Self::default()
        }
    }

    /// Create a run holding one embedded object.
    pub fn object(object: EmbeddedObject) -> Self {
        Self {
            objects: vec![object],
            ..Self::default()
        }
    }

    /// Classify the run for rendering.
    ///
    /// Drawings take precedence over embedded objects, which take
    /// precedence over text. When a run holds several drawings (or
    /// several objects) the last one is the one rendered.
    pub fn kind(&self) -> RunKind<'_> {
        if let Some(drawing) = self.drawings.last() {
            RunKind::Image(drawing)
        } else if let Some(object) = self.objects.last() {
            RunKind::Equation(object)
        } else {
            RunKind::Text(&self.text)
        }
    }

    /// Whether the run carries more than one drawing or object.
    pub fn is_ambiguous(&self) -> bool {
        self.drawings.len() > 1 || (self.drawings.is_empty() && self.objects.len() > 1)
    }
}

/// Rendering class of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunKind<'a> {
    /// Inline image
    Image(&'a InlineDrawing),
    /// Embedded equation object
    Equation(&'a EmbeddedObject),
    /// Literal text
    Text(&'a str),
}

/// An inline drawing referencing an image part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineDrawing {
    /// Relationship identifier of the image (`a:blip r:embed`)
    pub id: String,

    /// Declared display size
    pub extent: Extent,
}

impl InlineDrawing {
    /// Create a drawing reference.
    pub fn new(id: impl Into<String>, extent: Extent) -> Self {
        Self {
            id: id.into(),
            extent,
        }
    }
}

/// Declared display size of a drawing, in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    /// Width in EMU
    pub cx: i64,
    /// Height in EMU
    pub cy: i64,
}

impl Extent {
    /// Create an extent from EMU values.
    pub fn new(cx: i64, cy: i64) -> Self {
        Self { cx, cy }
    }

    /// Create an extent from CSS pixels.
    pub fn from_pixels(width: i64, height: i64) -> Self {
        Self {
            cx: width * EMU_PER_PIXEL as i64,
            cy: height * EMU_PER_PIXEL as i64,
        }
    }

    /// Width as a CSS length, e.g. `100px`.
    pub fn width_css(&self) -> String {
        emu_to_css(self.cx)
    }

    /// Height as a CSS length, e.g. `50px`.
    pub fn height_css(&self) -> String {
        emu_to_css(self.cy)
    }
}

fn emu_to_css(emu: i64) -> String {
    format!("{}px", (emu as f64 / EMU_PER_PIXEL).round() as i64)
}

/// An embedded OLE object, usually an equation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedObject {
    /// Relationship identifier of the object binary (`o:OLEObject r:id`)
    pub id: String,

    /// OLE program identifier, e.g. `Equation.DSMT4`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prog_id: Option<String>,
}

impl EmbeddedObject {
    /// Create an object reference.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prog_id: None,
        }
    }

    /// Set the program identifier.
    pub fn with_prog_id(mut self, prog_id: impl Into<String>) -> Self {
        self.prog_id = Some(prog_id.into());
        self
    }
}
