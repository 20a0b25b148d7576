//! # Transition Rule
//!
//! `Transition` is the `<Transition>` element of a lifecycle rule: move
//! objects to `StorageClass` either `Days` after creation or on `Date`.
//!
//! ## Two-phase contract
//!
//! 1. **Decode** ([`Transition::from_xml`], [`Transition::decode_element`])
//!    checks each sub-field in isolation. A bad field fails the whole decode
//!    and no rule is produced.
//! 2. **Validate** ([`Transition::validate`]) checks the cross-field rules.
//!    The caller runs it explicitly, which lets a parent decode untrusted input,
//!    inspect it, and decide later whether to reject it.
//!
//! ## Presence
//!
//! A default `Transition` is *unset*: it encodes to nothing and always
//! validates. Only a successful decode marks it present. This lets a parent
//! rule keep a `Transition` field unconditionally and call [`Transition::encode_into`]
//! without checking whether the element was ever in the source document.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize, Serializer};

use crate::date::TransitionDate;
use crate::days::TransitionDays;
use crate::error::TransitionError;
use crate::xml;

/// Element name on the wire.
pub const TRANSITION_ELEMENT: &str = "Transition";

/// A storage-class transition rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "TransitionFields")]
pub struct Transition {
    days: TransitionDays,
    date: TransitionDate,
    storage_class: String,
    present: bool,
}

impl Transition {
    // -----------------------------------------------------------------------
    // Decode
    // -----------------------------------------------------------------------

    /// Decode a standalone `<Transition>` fragment.
    ///
    /// Leading declarations, comments and whitespace are skipped. Anything
    /// after the element's end tag is ignored.
    ///
    /// # Errors
    ///
    /// Returns the first field error unchanged, or [`TransitionError::Decode`]
    /// for malformed markup, a missing element, or a root element with a
    /// different name.
    pub fn from_xml(fragment: &str) -> Result<Self, TransitionError> {
        let mut reader = Reader::from_str(fragment);
        loop {
            match reader.read_event().map_err(TransitionError::decode)? {
                Event::Start(start) => return Self::decode_element(&mut reader, &start),
                Event::Empty(start) => return Self::decode_empty_element(&start),
                Event::Eof => {
                    return Err(TransitionError::decode(
                        "no <Transition> element in document",
                    ))
                }
                _ => {}
            }
        }
    }

    /// Re-decode `self` from `fragment`.
    ///
    /// On error `self` is left exactly as it was.
    pub fn decode(&mut self, fragment: &str) -> Result<(), TransitionError> {
        *self = Self::from_xml(fragment)?;
        Ok(())
    }

    /// Decode the element opened by `start`, for parents driving their own
    /// reader.
    ///
    /// The reader must be positioned just after `start`; on success it is
    /// positioned just after the matching end tag. Unknown child elements
    /// are skipped. If a child repeats, the last one wins.
    pub fn decode_element(
        reader: &mut Reader<&[u8]>,
        start: &BytesStart<'_>,
    ) -> Result<Self, TransitionError> {
        check_element_name(start)?;
        let mut decoded = Self::default();
        loop {
            match reader.read_event().map_err(TransitionError::decode)? {
                Event::Start(child) => {
                    let text = xml::read_text(reader, &child)?;
                    decoded.apply_child(&child, &text)?;
                }
                Event::Empty(child) => decoded.apply_child(&child, "")?,
                Event::End(_) => break,
                Event::Text(t) => {
                    t.unescape().map_err(TransitionError::decode)?;
                }
                Event::Eof => {
                    return Err(TransitionError::decode(
                        "unexpected EOF inside <Transition>",
                    ))
                }
                _ => {}
            }
        }
        decoded.present = true;
        tracing::trace!(
            days = %decoded.days,
            date = %decoded.date,
            storage_class = %decoded.storage_class,
            "decoded Transition element"
        );
        Ok(decoded)
    }

    /// Decode a self-closing `<Transition/>`: present, with every field absent.
    pub fn decode_empty_element(start: &BytesStart<'_>) -> Result<Self, TransitionError> {
        check_element_name(start)?;
        Ok(Self {
            present: true,
            ..Self::default()
        })
    }

    fn apply_child(&mut self, child: &BytesStart<'_>, text: &str) -> Result<(), TransitionError> {
        match child.local_name().as_ref() {
            b"Days" => self.days = TransitionDays::decode(text)?,
            b"Date" => self.date = TransitionDate::decode(text)?,
            b"StorageClass" => self.storage_class = text.to_string(),
            _ => {
                tracing::debug!(
                    element = %xml::local_name(child),
                    "skipping unknown child of <Transition>"
                );
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Encode
    // -----------------------------------------------------------------------

    /// Encode to XML. An unset rule encodes to the empty string.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        self.encode_into(&mut out);
        out
    }

    /// Append the XML form to a parent document buffer. Writes nothing when
    /// the rule is unset; absent sub-fields are omitted.
    pub fn encode_into(&self, out: &mut String) {
        if !self.present {
            return;
        }
        out.push('<');
        out.push_str(TRANSITION_ELEMENT);
        out.push('>');
        if let Some(days) = self.days.encode() {
            xml::push_element(out, "Days", &days);
        }
        if let Some(date) = self.date.encode() {
            xml::push_element(out, "Date", &date);
        }
        if !self.storage_class.is_empty() {
            xml::push_element(out, "StorageClass", &self.storage_class);
        }
        out.push_str("</");
        out.push_str(TRANSITION_ELEMENT);
        out.push('>');
    }

    // -----------------------------------------------------------------------
    // Validate
    // -----------------------------------------------------------------------

    /// Check the cross-field rules. An unset rule is always valid.
    ///
    /// Rules, checked in order:
    ///
    /// | condition | error |
    /// |---|---|
    /// | neither `Days` nor `Date` | [`TransitionError::MalformedRule`] |
    /// | both `Days` and `Date` | [`TransitionError::ConflictingTransitionSpec`] |
    /// | empty `StorageClass` | [`TransitionError::MalformedRule`] |
    pub fn validate(&self) -> Result<(), TransitionError> {
        if !self.present {
            return Ok(());
        }
        if self.is_fully_absent() {
            return Err(TransitionError::MalformedRule);
        }
        if !self.is_days_absent() && !self.is_date_absent() {
            return Err(TransitionError::ConflictingTransitionSpec);
        }
        if self.storage_class.is_empty() {
            return Err(TransitionError::MalformedRule);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether the day count is the zero sentinel.
    pub fn is_days_absent(&self) -> bool {
        self.days.is_absent()
    }

    /// Whether the date is the absent sentinel.
    pub fn is_date_absent(&self) -> bool {
        self.date.is_absent()
    }

    /// Whether both `Days` and `Date` are absent.
    pub fn is_fully_absent(&self) -> bool {
        self.is_days_absent() && self.is_date_absent()
    }

    /// Whether this rule came from a successful decode.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// The `<Days>` field.
    pub fn days(&self) -> TransitionDays {
        self.days
    }

    /// The `<Date>` field.
    pub fn date(&self) -> TransitionDate {
        self.date
    }

    /// The target storage class, empty if none was given.
    pub fn storage_class(&self) -> &str {
        &self.storage_class
    }

    /// `Some(self)` if present, `None` if unset.
    pub fn into_option(self) -> Option<Self> {
        self.present.then_some(self)
    }
}

fn check_element_name(start: &BytesStart<'_>) -> Result<(), TransitionError> {
    if start.local_name().as_ref() == TRANSITION_ELEMENT.as_bytes() {
        Ok(())
    } else {
        Err(TransitionError::decode(format!(
            "expected element type <{TRANSITION_ELEMENT}> but have <{}>",
            xml::local_name(start)
        )))
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

/// JSON view of a rule. Field names follow the XML element names.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TransitionFields {
    #[serde(default, skip_serializing_if = "TransitionDays::is_absent")]
    days: TransitionDays,
    #[serde(default, skip_serializing_if = "TransitionDate::is_absent")]
    date: TransitionDate,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    storage_class: String,
}

impl From<TransitionFields> for Transition {
    fn from(fields: TransitionFields) -> Self {
        Self {
            days: fields.days,
            date: fields.date,
            storage_class: fields.storage_class,
            present: true,
        }
    }
}

impl Serialize for Transition {
    /// Unset rules serialize as `null`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.present {
            return serializer.serialize_none();
        }
        TransitionFields {
            days: self.days,
            date: self.date,
            storage_class: self.storage_class.clone(),
        }
        .serialize(serializer)
    }
}
