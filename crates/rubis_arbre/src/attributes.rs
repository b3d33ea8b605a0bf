//! Dynamic attribute source location.
//!
//! HAML tags can carry code-valued attributes in three syntaxes, all of
//! which may appear on one tag in any order:
//!
//! - `html`: `%tag(three=3 four=4)`
//! - `hash`: `%tag{ one: 1, two: 2 }`
//! - `object_ref`: `%tag[my_object]`
//!
//! [`locate`] recovers the exact verbatim span of each style from the
//! "decoration" region of a tag line (the text between the tag
//! name/class/id shorthand and the tag's inline content). Spans are
//! found with an explicit depth-counting scan per delimiter pair, so
//! nested delimiters and multi-line attribute lists are handled
//! exactly; whitespace inside a span, line breaks included, is
//! preserved as written.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Attribute list location error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// A span opener was never closed. Returning a truncated span would
    /// corrupt downstream line attribution, so this is fatal for the
    /// tag's locate call.
    #[error("unbalanced `{delimiter}` in attribute list at byte offset {offset}")]
    UnbalancedDelimiter { delimiter: char, offset: usize },
}

/// The three dynamic attribute syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeStyle {
    /// Parenthesized HTML-style list: `(three=3 four=4)`.
    Html,
    /// Brace-delimited Ruby hash: `{ one: 1, two: 2 }`.
    Hash,
    /// Bracketed object reference: `[my_object]`.
    ObjectRef,
}

impl AttributeStyle {
    fn for_opener(byte: u8) -> Self {
        match byte {
            b'(' => AttributeStyle::Html,
            b'{' => AttributeStyle::Hash,
            _ => AttributeStyle::ObjectRef,
        }
    }
}

/// Verbatim dynamic attribute spans for one tag, in appearance order.
///
/// At most one entry per style; a style that does not occur on the tag
/// is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicAttributes {
    entries: Vec<(AttributeStyle, String)>,
}

impl DynamicAttributes {
    pub fn html(&self) -> Option<&str> {
        self.get(AttributeStyle::Html)
    }

    pub fn hash(&self) -> Option<&str> {
        self.get(AttributeStyle::Hash)
    }

    pub fn object_ref(&self) -> Option<&str> {
        self.get(AttributeStyle::ObjectRef)
    }

    fn get(&self, style: AttributeStyle) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| *s == style)
            .map(|(_, span)| span.as_str())
    }

    /// Spans in appearance order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, span)| span.as_str())
    }

    /// Spans with their styles, in appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeStyle, &str)> {
        self.entries.iter().map(|(s, span)| (*s, span.as_str()))
    }

    /// Consume into the ordered span list stored on tag nodes.
    pub fn into_sources(self) -> Vec<String> {
        self.entries.into_iter().map(|(_, span)| span).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Locate the dynamic attribute spans in a tag's decoration region.
///
/// Spans chain only while the next opener follows on the same physical
/// line (spaces and tabs in between are allowed). A newline between
/// spans, any non-opener character, or a repeated style ends the scan,
/// so nested template content on following lines is never mistaken for
/// a continuation of a multi-line attribute list.
pub fn locate(decoration: &str) -> Result<DynamicAttributes, AttributeError> {
    let bytes = decoration.as_bytes();
    let mut entries: Vec<(AttributeStyle, String)> = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b' ' | b'\t' => pos += 1,
            opener @ (b'(' | b'{' | b'[') => {
                let style = AttributeStyle::for_opener(opener);
                if entries.iter().any(|(s, _)| *s == style) {
                    break;
                }
                let end = balanced_end(decoration, pos)?;
                entries.push((style, decoration[pos..end].to_string()));
                pos = end;
            }
            _ => break,
        }
    }

    Ok(DynamicAttributes { entries })
}

/// Byte offset one past the close delimiter matching the opener at
/// `start`, tracking nesting depth for that delimiter pair only.
fn balanced_end(text: &str, start: usize) -> Result<usize, AttributeError> {
    let bytes = text.as_bytes();
    let open = bytes[start];
    let close = match open {
        b'(' => b')',
        b'{' => b'}',
        _ => b']',
    };

    let mut depth = 0usize;
    for (i, &byte) in bytes.iter().enumerate().skip(start) {
        if byte == open {
            depth += 1;
        } else if byte == close {
            depth -= 1;
            if depth == 0 {
                return Ok(i + 1);
            }
        }
    }

    Err(AttributeError::UnbalancedDelimiter {
        delimiter: open as char,
        offset: start,
    })
}
