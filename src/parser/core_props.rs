//! Core properties reader (`docProps/core.xml`).

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::model::Metadata;

/// Core properties part.
pub const CORE_PROPS_PART: &str = "docProps/core.xml";

/// Parse core properties. Malformed input yields whatever was read before
/// the error; metadata never fails a document.
pub fn parse_core_properties(data: &[u8]) -> Metadata {
    let mut reader = Reader::from_reader(data);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut metadata = Metadata::default();
    let mut current: Option<Vec<u8>> = None;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => current = Some(e.local_name().as_ref().to_vec()),
            Ok(Event::End(_)) => current = None,
            Ok(Event::Text(ref e)) => {
                let Some(field) = current.as_deref() else {
                    continue;
                };
                let Ok(value) = e.unescape() else {
                    continue;
                };
                let value = Some(value.into_owned());
                match field {
                    b"title" => metadata.title = value,
                    b"creator" => metadata.creator = value,
                    b"lastModifiedBy" => metadata.last_modified_by = value,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", CORE_PROPS_PART, e);
                break;
            }
            _ => {}
        }
    }

    metadata
}
