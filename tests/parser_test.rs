//! Integration tests for the DOCX package reader.

mod common;

use std::io::Cursor;

use common::*;
use undocx::model::RelationshipKind;
use undocx::{parse_bytes, parse_file, parse_reader, DocxParser, Error, ParseOptions};

#[test]
fn test_parse_counts() {
    let data = DocxBuilder::new()
        .body(&table(&[
            vec![text_cell("1"), text_cell("2")],
            vec![text_cell("3"), text_cell("4")],
            vec![text_cell("5"), text_cell("6")],
        ]))
        .build();

    let doc = parse_bytes(&data).unwrap();
    assert_eq!(doc.table_count(), 1);
    assert_eq!(doc.tables[0].row_count(), 3);
    assert_eq!(doc.tables[0].column_count(), 2);
    assert_eq!(doc.cell_count(), 6);
    assert_eq!(doc.tables[0].rows[2].cells[1].plain_text(), "6");
}

#[test]
fn test_relationships_and_parts() {
    let data = DocxBuilder::new()
        .image("rId7", "image1.PNG", b"png")
        .equation("rId4", "oleObject1.bin", b"ole")
        .body(&table(&[vec![text_cell("x")]]))
        .build();

    let doc = parse_bytes(&data).unwrap();

    let image = doc.relationships.get("rId7").unwrap();
    assert_eq!(image.kind, RelationshipKind::Image);
    assert_eq!(image.target, "word/media/image1.PNG");
    assert_eq!(image.target_extension().as_deref(), Some("png"));
    assert_eq!(doc.part("word/embeddings/oleObject1.bin"), Some(&b"ole"[..]));

    let refs = undocx::collect_references(&doc);
    assert_eq!(refs.equations.len(), 1);
    assert_eq!(refs.images[0].format.as_deref(), Some("png"));
}

#[test]
fn test_structure_only_skips_parts() {
    let data = DocxBuilder::new()
        .image("rId7", "image1.png", b"png")
        .body(&table(&[vec![text_cell("x")]]))
        .build();

    let doc = DocxParser::from_bytes_with_options(&data, ParseOptions::new().structure_only())
        .unwrap()
        .parse()
        .unwrap();
    assert!(doc.part("word/media/image1.png").is_none());
    assert_eq!(doc.table_count(), 1);
}

#[test]
fn test_metadata() {
    let data = DocxBuilder::new()
        .title("Quarterly figures")
        .body(&table(&[vec![text_cell("x")]]))
        .build();

    let doc = parse_reader(Cursor::new(data)).unwrap();
    assert_eq!(doc.metadata.title.as_deref(), Some("Quarterly figures"));
}

#[test]
fn test_parse_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.docx");
    std::fs::write(
        &path,
        DocxBuilder::new().body(&table(&[vec![text_cell("x")]])).build(),
    )
    .unwrap();

    assert!(undocx::is_docx(&path));
    assert_eq!(parse_file(&path).unwrap().table_count(), 1);
}

#[test]
fn test_zip_without_main_part() {
    use std::io::Write;
    use zip::write::FileOptions;

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("xl/workbook.xml", FileOptions::default())
        .unwrap();
    zip.write_all(b"<workbook/>").unwrap();
    let data = zip.finish().unwrap().into_inner();

    assert!(matches!(parse_bytes(&data), Err(Error::UnknownFormat)));
}
