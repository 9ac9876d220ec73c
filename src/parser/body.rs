//! Main document part reader: body-level tables down to runs.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Result;
use crate::model::{EmbeddedObject, Extent, InlineDrawing, Paragraph, Run, Table, TableCell, TableRow};

use super::xml::{attr_value, is_word_element, xml_error};

/// Parse `word/document.xml` and return its body-level tables.
///
/// Tables nested inside a cell are skipped together with their content;
/// they do not leak paragraphs into the enclosing cell.
pub fn parse_tables(data: &[u8], part: &str) -> Result<Vec<Table>> {
    let mut reader = Reader::from_reader(data);
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut state = BodyState::default();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => state.open(&reader, e),
            Ok(Event::Empty(ref e)) => {
                state.open(&reader, e);
                state.close(e.local_name().as_ref(), is_word_element(e.name()));
            }
            Ok(Event::End(ref e)) => state.close(e.local_name().as_ref(), is_word_element(e.name())),
            Ok(Event::Text(ref e)) => {
                if state.in_text() {
                    match e.unescape() {
                        Ok(text) => state.push_text(&text),
                        Err(err) => log::debug!("Skipping undecodable text in {}: {}", part, err),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e, reader.buffer_position())),
            _ => {}
        }
    }

    log::debug!("Parsed {} tables from {}", state.tables.len(), part);
    Ok(state.tables)
}

/// Pending inline drawing between `wp:inline` start and end.
#[derive(Default)]
struct PendingDrawing {
    extent: Extent,
    embed: Option<String>,
}

#[derive(Default)]
struct BodyState {
    tables: Vec<Table>,
    table_depth: usize,
    fallback_depth: usize,
    textbox_depth: usize,

    table: Option<Table>,
    row: Option<TableRow>,
    cell: Option<TableCell>,
    paragraph: Option<Paragraph>,
    run: Option<Run>,

    in_text: bool,
    drawing: Option<PendingDrawing>,
}

impl BodyState {
    fn in_text(&self) -> bool {
        self.in_text && self.run.is_some()
    }

    /// Whether content at this point belongs to a body-level table.
    fn collecting(&self) -> bool {
        self.table_depth == 1 && self.fallback_depth == 0 && self.textbox_depth == 0
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }

    fn open<B>(&mut self, reader: &Reader<B>, e: &BytesStart) {
        let local = e.local_name();
        let word = is_word_element(e.name());

        match local.as_ref() {
            b"Fallback" => {
                self.fallback_depth += 1;
                return;
            }
            // Text boxes carry their own paragraphs inside a run
            b"txbxContent" => {
                self.textbox_depth += 1;
                return;
            }
            b"tbl" if word => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.table = Some(Table::new());
                }
                return;
            }
            _ => {}
        }

        if !self.collecting() {
            return;
        }

        match local.as_ref() {
            b"tr" if word => self.row = Some(TableRow::default()),
            b"tc" if word && self.row.is_some() => self.cell = Some(TableCell::default()),
            b"p" if word && self.cell.is_some() => self.paragraph = Some(Paragraph::new()),
            b"r" if word && self.paragraph.is_some() => self.run = Some(Run::default()),
            b"t" if word => self.in_text = true,
            b"tab" if word => self.push_text("\t"),
            b"br" | b"cr" if word => self.push_text("\n"),
            b"inline" if self.run.is_some() => self.drawing = Some(PendingDrawing::default()),
            b"extent" => {
                if let Some(drawing) = self.drawing.as_mut() {
                    let cx = attr_value(reader, e, b"cx").and_then(|v| v.parse().ok());
                    let cy = attr_value(reader, e, b"cy").and_then(|v| v.parse().ok());
                    drawing.extent = Extent::new(cx.unwrap_or(0), cy.unwrap_or(0));
                }
            }
            b"blip" => {
                if let Some(drawing) = self.drawing.as_mut() {
                    drawing.embed = attr_value(reader, e, b"embed");
                }
            }
            b"OLEObject" => {
                if let Some(run) = self.run.as_mut() {
                    match attr_value(reader, e, b"id") {
                        Some(id) => {
                            let mut object = EmbeddedObject::new(id);
                            object.prog_id = attr_value(reader, e, b"ProgID");
                            run.objects.push(object);
                        }
                        None => log::debug!("OLE object without relationship id"),
                    }
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, local: &[u8], word: bool) {
        match local {
            b"Fallback" => {
                self.fallback_depth = self.fallback_depth.saturating_sub(1);
                return;
            }
            b"txbxContent" => {
                self.textbox_depth = self.textbox_depth.saturating_sub(1);
                return;
            }
            b"tbl" if word => {
                if self.table_depth == 1 {
                    if let Some(table) = self.table.take() {
                        self.tables.push(table);
                    }
                }
                self.table_depth = self.table_depth.saturating_sub(1);
                return;
            }
            _ => {}
        }

        if !self.collecting() {
            return;
        }

        match local {
            b"tr" if word => {
                if let (Some(row), Some(table)) = (self.row.take(), self.table.as_mut()) {
                    table.add_row(row);
                }
            }
            b"tc" if word => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.cells.push(cell);
                }
            }
            b"p" if word => {
                if let (Some(paragraph), Some(cell)) = (self.paragraph.take(), self.cell.as_mut()) {
                    cell.paragraphs.push(paragraph);
                }
            }
            b"r" if word => {
                if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
                    if run.is_ambiguous() {
                        log::debug!(
                            "Run holds {} drawings and {} objects; the last one is kept",
                            run.drawings.len(),
                            run.objects.len()
                        );
                    }
                    paragraph.add_run(run);
                }
            }
            b"t" if word => self.in_text = false,
            b"inline" => {
                if let Some(pending) = self.drawing.take() {
                    match (pending.embed, self.run.as_mut()) {
                        (Some(id), Some(run)) => {
                            run.drawings.push(InlineDrawing::new(id, pending.extent))
                        }
                        _ => log::debug!("Inline drawing without embedded image skipped"),
                    }
                }
            }
            _ => {}
        }
    }
}
