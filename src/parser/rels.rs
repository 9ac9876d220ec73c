//! Relationship part reader.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;
use crate::model::{Relationship, RelationshipKind, Relationships};

use super::xml::{attr_value, xml_error};

/// Relationship part of the main document.
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

/// Parse a relationship part. Internal targets are resolved against
/// `base_dir` into package part names.
pub fn parse_relationships(data: &[u8], base_dir: &str) -> Result<Relationships> {
    let mut reader = Reader::from_reader(data);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut rels = Relationships::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let id = attr_value(&reader, e, b"Id").unwrap_or_default();
                let rel_type = attr_value(&reader, e, b"Type").unwrap_or_default();
                let target = attr_value(&reader, e, b"Target").unwrap_or_default();
                let external = attr_value(&reader, e, b"TargetMode")
                    .is_some_and(|mode| mode.eq_ignore_ascii_case("external"));

                if id.is_empty() || target.is_empty() {
                    log::debug!("Skipping relationship without id or target");
                    continue;
                }

                let kind = RelationshipKind::from_type_uri(&rel_type);
                let rel = if external {
                    Relationship::new(id, kind, target).external()
                } else {
                    Relationship::new(id, kind, resolve_target(base_dir, &target))
                };
                rels.add(rel);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(xml_error(
                    DOCUMENT_RELS_PART,
                    e,
                    reader.buffer_position(),
                ))
            }
            _ => {}
        }
    }

    Ok(rels)
}

/// Resolve a relationship target into a package part name.
///
/// Targets starting with `/` are package-rooted; others are relative to
/// `base_dir`. `.` and `..` segments are normalised away.
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let joined;
    let path = if let Some(rooted) = target.strip_prefix('/') {
        rooted
    } else {
        joined = format!("{}/{}", base_dir.trim_end_matches('/'), target);
        joined.as_str()
    };

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
