//! Benchmarks for undocx extraction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks build synthetic DOCX packages in memory.

use std::io::{Cursor, Write};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use undocx::{Extractor, FnConverter, FnUploader, ObjectPayload, Result};
use zip::write::FileOptions;

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Creates a DOCX with `tables` tables of 10x4 cells. Every fourth cell
/// holds an equation, every seventh an image.
fn create_test_docx(tables: usize) -> Vec<u8> {
    let mut body = String::new();
    let mut rels = String::new();
    let mut parts = Vec::new();
    let mut next_id = 1;

    for t in 0..tables {
        body.push_str("<w:tbl>");
        for r in 0..10 {
            body.push_str("<w:tr>");
            for c in 0..4 {
                let n = (t * 10 + r) * 4 + c;
                body.push_str("<w:tc><w:p>");
                body.push_str(&format!("<w:r><w:t>Cell {} </w:t></w:r>", n));
                if n % 4 == 0 || n % 7 == 0 {
                    let id = format!("rId{}", next_id);
                    next_id += 1;
                    if n % 4 == 0 {
                        body.push_str(&format!(
                            r#"<w:r><w:object><o:OLEObject ProgID="Equation.DSMT4" r:id="{}"/></w:object></w:r>"#,
                            id
                        ));
                        rels.push_str(&format!(
                            r#"<Relationship Id="{}" Type="{}/oleObject" Target="embeddings/ole{}.bin"/>"#,
                            id, REL_BASE, n
                        ));
                        parts.push((format!("word/embeddings/ole{}.bin", n), vec![0u8; 256]));
                    } else {
                        body.push_str(&format!(
                            r#"<w:r><w:drawing><wp:inline><wp:extent cx="952500" cy="476250"/><a:blip r:embed="{}"/></wp:inline></w:drawing></w:r>"#,
                            id
                        ));
                        rels.push_str(&format!(
                            r#"<Relationship Id="{}" Type="{}/image" Target="media/image{}.png"/>"#,
                            id, REL_BASE, n
                        ));
                        parts.push((format!("word/media/image{}.png", n), vec![1u8; 1024]));
                    }
                }
                body.push_str("</w:p><w:p><w:r><w:t>second line</w:t></w:r></w:p></w:tc>");
            }
            body.push_str("</w:tr>");
        }
        body.push_str("</w:tbl>");
    }

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(
        format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="{}" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:o="urn:schemas-microsoft-com:office:office"><w:body>{}</w:body></w:document>"#,
            REL_BASE, body
        )
        .as_bytes(),
    )
    .unwrap();

    zip.start_file("word/_rels/document.xml.rels", options)
        .unwrap();
    zip.write_all(
        format!(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            rels
        )
        .as_bytes(),
    )
    .unwrap();

    for (name, data) in parts {
        zip.start_file(name, options).unwrap();
        zip.write_all(&data).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

fn extractor() -> Extractor {
    Extractor::new()
        .with_converter(FnConverter(|object: &ObjectPayload<'_>| -> Result<String> {
            Ok(format!("$$x_{{{}}}$$", object.data.len()))
        }))
        .with_uploader(FnUploader(|key: &str, _: &ObjectPayload<'_>| -> Result<String> {
            Ok(format!("https://cdn.example.com/{}", key))
        }))
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for tables in [1, 10, 50] {
        let data = create_test_docx(tables);
        group.bench_with_input(BenchmarkId::from_parameter(tables), &data, |b, data| {
            b.iter(|| undocx::parse_bytes(black_box(data)))
        });
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let data = create_test_docx(20);

    let parallel = extractor();
    group.bench_function("parallel", |b| {
        b.iter(|| parallel.extract_bytes(black_box(&data)))
    });

    let sequential = extractor().sequential();
    group.bench_function("sequential", |b| {
        b.iter(|| sequential.extract_bytes(black_box(&data)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_extract);
criterion_main!(benches);
