//! # XML Element Plumbing
//!
//! Small helpers shared by the element codecs. Reading goes through
//! `quick_xml`'s pull parser; writing is plain string assembly with
//! entity escaping, since the elements are tiny and always well-formed.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::TransitionError;

/// Escape a string for safe inclusion in XML text content.
///
/// Replaces the five XML special characters with their entity references,
/// so a storage class like `A&B` cannot break out of its element.
pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Append `<name>text</name>` to `out`, escaping `text`.
pub(crate) fn push_element(out: &mut String, name: &str, text: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&xml_escape(text));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Local (prefix-free) name of an element, for messages.
pub(crate) fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

/// Collect the character data of the element opened by `start`.
///
/// The reader must be positioned just after `start`. Consumes up to and
/// including the matching end tag. Nested elements are skipped, and only
/// the element's own text and CDATA are kept.
pub(crate) fn read_text(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<String, TransitionError> {
    let mut text = String::new();
    loop {
        match reader.read_event().map_err(TransitionError::decode)? {
            Event::Text(t) => text.push_str(&t.unescape().map_err(TransitionError::decode)?),
            Event::CData(c) => {
                text.push_str(std::str::from_utf8(&c).map_err(TransitionError::decode)?)
            }
            Event::Start(nested) => skip_element(reader, &nested)?,
            Event::End(_) => return Ok(text),
            Event::Eof => {
                return Err(TransitionError::decode(format!(
                    "unexpected EOF inside <{}>",
                    local_name(start)
                )))
            }
            _ => {}
        }
    }
}

/// Consume everything up to and including the end tag matching `start`.
///
/// Skipped text is still unescaped so that bad entity references are
/// reported wherever they appear.
pub(crate) fn skip_element(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<(), TransitionError> {
    let mut depth = 0usize;
    loop {
        match reader.read_event().map_err(TransitionError::decode)? {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(()),
            Event::End(_) => depth -= 1,
            Event::Text(t) => {
                t.unescape().map_err(TransitionError::decode)?;
            }
            Event::Eof => {
                return Err(TransitionError::decode(format!(
                    "unexpected EOF inside <{}>",
                    local_name(start)
                )))
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(xml: &str) -> (Reader<&[u8]>, BytesStart<'_>) {
        let mut reader = Reader::from_str(xml);
        match reader.read_event().unwrap() {
            Event::Start(start) => (reader, start),
            other => panic!("expected start tag, got {other:?}"),
        }
    }

    #[test]
    fn xml_escape_handles_empty_and_normal() {
        assert_eq!(xml_escape(""), "");
        assert_eq!(xml_escape("STANDARD_IA"), "STANDARD_IA");
        assert_eq!(xml_escape("a&b"), "a&amp;b");
        assert_eq!(xml_escape("<tag>"), "&lt;tag&gt;");
        assert_eq!(xml_escape("'\""), "&apos;&quot;");
    }

    #[test]
    fn push_element_escapes_text() {
        let mut out = String::new();
        push_element(&mut out, "StorageClass", "A&B");
        assert_eq!(out, "<StorageClass>A&amp;B</StorageClass>");
    }

    #[test]
    fn read_text_unescapes_entities() {
        let (mut reader, start) = open("<StorageClass>A&amp;B</StorageClass>");
        assert_eq!(read_text(&mut reader, &start).unwrap(), "A&B");
    }

    #[test]
    fn read_text_keeps_cdata() {
        let (mut reader, start) = open("<StorageClass><![CDATA[<GLACIER>]]></StorageClass>");
        assert_eq!(read_text(&mut reader, &start).unwrap(), "<GLACIER>");
    }

    #[test]
    fn read_text_skips_nested_elements() {
        let (mut reader, start) = open("<Days>1<Extra>junk</Extra>2</Days>");
        assert_eq!(read_text(&mut reader, &start).unwrap(), "12");
    }

    #[test]
    fn read_text_empty_element() {
        let (mut reader, start) = open("<Days></Days>");
        assert_eq!(read_text(&mut reader, &start).unwrap(), "");
    }

    #[test]
    fn read_text_unterminated_is_decode_error() {
        let (mut reader, start) = open("<Days>5");
        assert!(matches!(
            read_text(&mut reader, &start),
            Err(TransitionError::Decode(_))
        ));
    }

    #[test]
    fn skip_element_stops_at_matching_end() {
        let (mut reader, start) = open("<Extra><A><B/>x</A>y</Extra><Days>1</Days>");
        skip_element(&mut reader, &start).unwrap();
        match reader.read_event().unwrap() {
            Event::Start(next) => assert_eq!(local_name(&next), "Days"),
            other => panic!("expected <Days>, got {other:?}"),
        }
    }

    #[test]
    fn skip_element_rejects_bad_entity() {
        let (mut reader, start) = open("<Extra><A>&bogus;</A></Extra>");
        assert!(matches!(
            skip_element(&mut reader, &start),
            Err(TransitionError::Decode(_))
        ));
    }

    #[test]
    fn local_name_strips_prefix() {
        let (_, start) = open("<s3:Transition xmlns:s3=\"urn:x\"></s3:Transition>");
        assert_eq!(local_name(&start), "Transition");
    }
}
