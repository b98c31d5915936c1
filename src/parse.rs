//! XBEL parsing.
//!
//! Reads one XBEL document into a [`Folder`] tree. XBEL is a small XML
//! vocabulary: a root element with an optional `<title>`, then any mix of
//! `<folder>` elements (recursive, same shape) and `<bookmark>` elements
//! carrying an `href` attribute plus optional `<title>`/`<desc>` children
//! and `added`/`modified` timestamp attributes.
//!
//! ## Tolerance rules
//!
//! - A bookmark with a missing or empty `href` is dropped from its
//!   parent's child list. Malformed entries are common in real exports
//!   and are not worth failing a build over.
//! - Blank titles and descriptions normalize to absent; folder titles
//!   fall back to a caller-supplied default.
//! - Elements this generator doesn't render (`info`, `metadata`,
//!   `separator`, `alias`) are skipped wholesale.
//!
//! A document that is not well-formed XML is a different matter: that is
//! a [`ParseError`] and aborts the whole build. No partial trees.

use crate::tree::{Bookmark, Folder, Node};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed XBEL: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed XBEL: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
    #[error("malformed XBEL: {0}")]
    Malformed(String),
}

/// Title used for nested folders whose `<title>` is absent or blank.
const UNTITLED_FOLDER: &str = "Untitled folder";

/// Parse one XBEL file into a folder.
///
/// The file's base name (stem) is the fallback title when the document
/// has no top-level `<title>`.
pub fn parse_xbel_file(path: &Path) -> Result<Folder, ParseError> {
    let xml = fs::read_to_string(path)?;
    let fallback = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("bookmarks");
    parse_xbel(&xml, fallback)
}

/// Parse an XBEL document from a string.
pub fn parse_xbel(xml: &str, fallback_title: &str) -> Result<Folder, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // Scan past the prolog (declaration, doctype, comments) to the root
    // element, then parse its contents as a folder body.
    loop {
        match reader.read_event()? {
            Event::Start(_) => return parse_folder(&mut reader, fallback_title),
            Event::Empty(_) => return Ok(Folder::new(fallback_title)),
            Event::Eof => {
                return Err(ParseError::Malformed("document has no root element".into()));
            }
            _ => {}
        }
    }
}

/// Parse the body of an already-opened folder element up to its end tag.
fn parse_folder(reader: &mut Reader<&[u8]>, fallback_title: &str) -> Result<Folder, ParseError> {
    let mut title: Option<String> = None;
    let mut children: Vec<Node> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"title" => {
                    let text = read_element_text(reader)?;
                    if title.is_none() {
                        title = non_blank(text);
                    }
                }
                b"folder" => {
                    children.push(Node::Folder(parse_folder(reader, UNTITLED_FOLDER)?));
                }
                b"bookmark" => {
                    let attrs = BookmarkAttrs::from_start(&e);
                    if let Some(bookmark) = parse_bookmark(reader, attrs)? {
                        children.push(Node::Bookmark(bookmark));
                    }
                }
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"folder" => children.push(Node::Folder(Folder::new(UNTITLED_FOLDER))),
                b"bookmark" => {
                    if let Some(bookmark) = BookmarkAttrs::from_start(&e).into_bookmark(None, None)
                    {
                        children.push(Node::Bookmark(bookmark));
                    }
                }
                _ => {}
            },
            Event::End(_) => break,
            Event::Eof => {
                return Err(ParseError::Malformed("unclosed element in document".into()));
            }
            _ => {}
        }
    }

    Ok(Folder {
        title: title.unwrap_or_else(|| fallback_title.to_string()),
        children,
        slug: None,
    })
}

/// Attributes lifted off a `<bookmark>` start tag.
struct BookmarkAttrs {
    href: Option<String>,
    added: Option<String>,
    modified: Option<String>,
}

impl BookmarkAttrs {
    fn from_start(e: &BytesStart) -> Self {
        let mut href = None;
        let mut added = None;
        let mut modified = None;
        for attr in e.attributes().flatten() {
            let value = attr
                .unescape_value()
                .map_or_else(
                    |_| String::from_utf8_lossy(&attr.value).into_owned(),
                    Cow::into_owned,
                );
            match attr.key.as_ref() {
                b"href" => href = Some(value),
                b"added" => added = Some(value),
                b"modified" => modified = Some(value),
                _ => {}
            }
        }
        BookmarkAttrs {
            href,
            added,
            modified,
        }
    }

    /// Build the bookmark, or `None` when the href is missing or empty.
    fn into_bookmark(self, title: Option<String>, description: Option<String>) -> Option<Bookmark> {
        let href = self.href.and_then(non_blank)?;
        Some(Bookmark {
            title: title.unwrap_or_else(|| href.clone()),
            href,
            description,
            added: self.added.and_then(non_blank),
            modified: self.modified.and_then(non_blank),
        })
    }
}

/// Parse a `<bookmark>` body (title, desc) up to its end tag.
///
/// The body is consumed even when the bookmark is discarded for lacking
/// an href, so the reader stays positioned correctly.
fn parse_bookmark(
    reader: &mut Reader<&[u8]>,
    attrs: BookmarkAttrs,
) -> Result<Option<Bookmark>, ParseError> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"title" => {
                    let text = read_element_text(reader)?;
                    if title.is_none() {
                        title = non_blank(text);
                    }
                }
                b"desc" => {
                    let text = read_element_text(reader)?;
                    if description.is_none() {
                        description = non_blank(text);
                    }
                }
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::End(_) => break,
            Event::Eof => {
                return Err(ParseError::Malformed("unclosed bookmark element".into()));
            }
            _ => {}
        }
    }

    Ok(attrs.into_bookmark(title, description))
}

/// Collect the text content of the current element up to its end tag.
///
/// Handles plain text, CDATA, and entity references; nested markup inside
/// the element is ignored (its text is not collected).
fn read_element_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut text = String::new();
    let mut depth = 1usize;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Text(e) => {
                if depth == 1 {
                    text.push_str(&reader.decoder().decode(&e)?);
                }
            }
            Event::CData(e) => {
                if depth == 1 {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::GeneralRef(e) => {
                if depth == 1 {
                    let name = reader.decoder().decode(&e)?;
                    text.push_str(&resolve_entity(&name));
                }
            }
            Event::Eof => {
                return Err(ParseError::Malformed("unclosed element in document".into()));
            }
            _ => {}
        }
    }
    Ok(text)
}

/// Resolve an XML entity reference to its character value.
///
/// The five predefined entities plus numeric character references;
/// anything else is preserved verbatim.
fn resolve_entity(name: &str) -> String {
    match name {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "apos" => "'".to_string(),
        "quot" => "\"".to_string(),
        s if s.starts_with('#') => {
            let code = if let Some(hex) = s.strip_prefix("#x").or_else(|| s.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{name};"), |c| c.to_string())
        }
        _ => format!("&{name};"),
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == s.len() {
        Some(s)
    } else {
        Some(trimmed.to_string())
    }
}
