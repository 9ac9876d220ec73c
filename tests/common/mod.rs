//! DOCX fixtures built in memory.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::ZipWriter;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Builds a minimal DOCX package.
#[derive(Default)]
pub struct DocxBuilder {
    body: String,
    rels: Vec<(String, String, String)>,
    parts: Vec<(String, Vec<u8>)>,
    core: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw body XML (tables, paragraphs).
    pub fn body(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    /// Register an image relationship and its part under `word/media/`.
    pub fn image(mut self, id: &str, name: &str, data: &[u8]) -> Self {
        self.rels
            .push((id.into(), format!("{}/image", REL_BASE), format!("media/{}", name)));
        self.parts.push((format!("word/media/{}", name), data.to_vec()));
        self
    }

    /// Register an OLE-object relationship and its part under `word/embeddings/`.
    pub fn equation(mut self, id: &str, name: &str, data: &[u8]) -> Self {
        self.rels.push((
            id.into(),
            format!("{}/oleObject", REL_BASE),
            format!("embeddings/{}", name),
        ));
        self.parts
            .push((format!("word/embeddings/{}", name), data.to_vec()));
        self
    }

    /// Register a relationship whose target is absent from the package.
    pub fn dangling_image(mut self, id: &str, name: &str) -> Self {
        self.rels
            .push((id.into(), format!("{}/image", REL_BASE), format!("media/{}", name)));
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.core = Some(title.to_string());
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#,
        )
        .unwrap();

        zip.start_file("word/document.xml", options).unwrap();
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:o="urn:schemas-microsoft-com:office:office"><w:body>{}</w:body></w:document>"#,
            W_NS, R_NS, self.body
        );
        zip.write_all(document.as_bytes()).unwrap();

        zip.start_file("word/_rels/document.xml.rels", options)
            .unwrap();
        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (id, kind, target) in &self.rels {
            rels.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id, kind, target
            ));
        }
        rels.push_str("</Relationships>");
        zip.write_all(rels.as_bytes()).unwrap();

        if let Some(title) = &self.core {
            zip.start_file("docProps/core.xml", options).unwrap();
            let core = format!(
                r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title></cp:coreProperties>"#,
                title
            );
            zip.write_all(core.as_bytes()).unwrap();
        }

        for (name, data) in &self.parts {
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(data).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }
}

/// `<w:tbl>` from rows of cell XML.
pub fn table(rows: &[Vec<String>]) -> String {
    let mut xml = String::from("<w:tbl>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in row {
            xml.push_str("<w:tc>");
            xml.push_str(cell);
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// Paragraph holding the given runs.
pub fn para(runs: &[String]) -> String {
    format!("<w:p>{}</w:p>", runs.concat())
}

/// Literal text run.
pub fn text_run(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, text)
}

/// Run holding an embedded equation object.
pub fn equation_run(id: &str) -> String {
    format!(
        r#"<w:r><w:object><o:OLEObject Type="Embed" ProgID="Equation.DSMT4" r:id="{}"/></w:object></w:r>"#,
        id
    )
}

/// Run holding an inline image of `width`x`height` pixels.
pub fn image_run(id: &str, width: i64, height: i64) -> String {
    format!(
        r#"<w:r><w:drawing><wp:inline><wp:extent cx="{}" cy="{}"/><a:graphic><a:graphicData><a:blip r:embed="{}"/></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#,
        width * 9525,
        height * 9525,
        id
    )
}

/// Cell with one paragraph of text.
pub fn text_cell(text: &str) -> String {
    para(&[text_run(text)])
}
