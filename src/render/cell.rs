//! Rendering of a single table cell into plain text and HTML.

use crate::model::{InlineDrawing, Run, RunKind, TableCell};
use crate::resolve::ResolutionMap;

use super::{CellContent, RenderOptions};

/// Renders cells against frozen resolution maps.
///
/// Rendering is pure: it only reads the maps and the cell.
#[derive(Debug, Clone, Copy)]
pub struct CellRenderer<'a> {
    equations: &'a ResolutionMap,
    images: &'a ResolutionMap,
    options: &'a RenderOptions,
}

impl<'a> CellRenderer<'a> {
    /// Create a renderer over the equation and image maps.
    pub fn new(
        equations: &'a ResolutionMap,
        images: &'a ResolutionMap,
        options: &'a RenderOptions,
    ) -> Self {
        Self {
            equations,
            images,
            options,
        }
    }

    /// Render one cell.
    ///
    /// Every run's output goes into both buffers. The HTML buffer also
    /// receives the break marker between consecutive paragraphs, so a cell
    /// with N paragraphs carries N-1 markers.
    pub fn render(&self, cell: &TableCell) -> CellContent {
        let mut text = String::new();
        let mut html = String::new();

        for (index, paragraph) in cell.paragraphs.iter().enumerate() {
            if index > 0 {
                html.push_str(&self.options.line_break);
            }
            for run in &paragraph.runs {
                let fragment = self.render_run(run);
                text.push_str(&fragment);
                html.push_str(&fragment);
            }
        }

        CellContent { text, html }
    }

    fn render_run(&self, run: &Run) -> String {
        if run.is_ambiguous() {
            log::debug!(
                "Run holds {} drawings and {} objects; rendering the last",
                run.drawings.len(),
                run.objects.len()
            );
        }

        match run.kind() {
            RunKind::Image(drawing) => self.render_image(drawing),
            RunKind::Equation(object) => self.lookup(self.equations, &object.id).to_string(),
            RunKind::Text(text) => text.to_string(),
        }
    }

    fn render_image(&self, drawing: &InlineDrawing) -> String {
        format!(
            "<img src='{}' style='width:{};height:{}'/>",
            self.lookup(self.images, &drawing.id),
            drawing.extent.width_css(),
            drawing.extent.height_css()
        )
    }

    fn lookup<'m>(&'m self, map: &'m ResolutionMap, id: &str) -> &'m str {
        map.get(id).unwrap_or(self.options.placeholder.as_str())
    }
}

/// Render one cell with the given maps and options.
pub fn render_cell(
    cell: &TableCell,
    equations: &ResolutionMap,
    images: &ResolutionMap,
    options: &RenderOptions,
) -> CellContent {
    CellRenderer::new(equations, images, options).render(cell)
}
