//! Walks tables, rows and cells in document order.

use rayon::prelude::*;

use crate::model::{Table, TableRow};
use crate::resolve::ResolutionMap;

use super::{CellRenderer, RenderOptions, RowData, TableData};

/// Render every table of a document.
///
/// Produces exactly one [`CellContent`](super::CellContent) per cell, with
/// no filtering. Tables are rendered on the rayon pool when
/// [`RenderOptions::parallel`] is set; output order always follows the
/// document.
pub fn render_tables(
    tables: &[Table],
    equations: &ResolutionMap,
    images: &ResolutionMap,
    options: &RenderOptions,
) -> Vec<TableData> {
    let renderer = CellRenderer::new(equations, images, options);

    if options.parallel {
        tables
            .par_iter()
            .map(|table| render_table(&renderer, table))
            .collect()
    } else {
        tables
            .iter()
            .map(|table| render_table(&renderer, table))
            .collect()
    }
}

fn render_table(renderer: &CellRenderer<'_>, table: &Table) -> TableData {
    TableData {
        rows: table.rows.iter().map(|row| render_row(renderer, row)).collect(),
    }
}

fn render_row(renderer: &CellRenderer<'_>, row: &TableRow) -> RowData {
    RowData {
        cells: row.cells.iter().map(|cell| renderer.render(cell)).collect(),
    }
}
