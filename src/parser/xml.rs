//! Small helpers shared by the quick-xml based part readers.

use quick_xml::events::BytesStart;
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::error::Error;

/// Value of the first attribute whose local name matches `key`.
pub(crate) fn attr_value<B>(reader: &Reader<B>, element: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in element.attributes().with_checks(false) {
        let attr = attr.ok()?;
        if attr.key.local_name().as_ref() == key {
            if let Ok(value) = attr.decode_and_unescape_value(reader) {
                return Some(value.into_owned());
            }
        }
    }
    None
}

/// Whether a qualified name is a WordprocessingML element.
///
/// Math runs (`m:r`, `m:t`) share local names with text runs, so run and
/// text handling is restricted to the `w` prefix (or no prefix).
pub(crate) fn is_word_element(name: QName) -> bool {
    match name.prefix() {
        None => true,
        Some(prefix) => prefix.as_ref() == b"w",
    }
}

/// Wrap a quick-xml failure with the part it occurred in.
pub(crate) fn xml_error(part: &str, err: quick_xml::Error, position: usize) -> Error {
    Error::Xml {
        part: part.to_string(),
        message: format!("{} at byte {}", err, position),
    }
}
