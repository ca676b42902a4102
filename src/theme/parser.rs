//! XML theme document parsing.
//!
//! A theme document looks like:
//!
//! ```xml
//! <Theme dir="classic">
//!   <page name="COMMON">
//!     <Resource tag="LOGO" language="EN">~/images/logo.png</Resource>
//!     <Resource tag="LOGO">~/images/logo_generic.png</Resource>
//!   </page>
//! </Theme>
//! ```
//!
//! The root element name is not checked. `page` elements may sit at any depth
//! below the root, but a `Resource` belongs to a page only as its direct child;
//! resources anywhere else are ignored. A resource's value is its inner text,
//! including CDATA and the text of any nested markup.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::types::{Page, Resource, ThemeDocument};
use crate::error::{Result, ThemeError};

const PAGE_ELEMENT: &[u8] = b"page";
const RESOURCE_ELEMENT: &[u8] = b"Resource";

/// Parse a theme document. `path` is only used for error reporting.
pub fn parse_theme_document(source: &str, path: &Path) -> Result<ThemeDocument> {
    parse(source).map_err(|message| ThemeError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

struct OpenPage {
    /// Slot in the page list, reserved when the page opens so pages keep
    /// document order even when nested.
    index: usize,
    name: String,
    resources: Vec<Resource>,
    depth: usize,
}

impl OpenPage {
    /// Resources count only as direct children of their page.
    fn owns_child_at(&self, depth: usize) -> bool {
        depth == self.depth + 1
    }
}

struct OpenResource {
    tag: String,
    language: Option<String>,
    value: String,
    depth: usize,
}

fn parse(source: &str) -> std::result::Result<ThemeDocument, String> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(false);

    let mut depth = 0usize;
    let mut saw_root = false;
    let mut dir = None;
    let mut pages: Vec<Page> = Vec::new();
    let mut open_pages: Vec<OpenPage> = Vec::new();
    let mut resource: Option<OpenResource> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("{} at byte {}", e, reader.buffer_position()))?;

        match event {
            Event::Start(ref e) => {
                if !saw_root {
                    saw_root = true;
                    dir = attribute(e, b"dir")?;
                } else if depth == 0 {
                    return Err("multiple root elements".to_string());
                } else if resource.is_some() {
                    // Nested markup inside a value; only its text is kept.
                } else if e.name().as_ref() == PAGE_ELEMENT {
                    let name = attribute(e, b"name")?.unwrap_or_default();
                    pages.push(Page::new(&name, Vec::new()));
                    open_pages.push(OpenPage {
                        index: pages.len() - 1,
                        name,
                        resources: Vec::new(),
                        depth,
                    });
                } else if e.name().as_ref() == RESOURCE_ELEMENT
                    && open_pages.last().is_some_and(|p| p.owns_child_at(depth))
                {
                    resource = Some(OpenResource {
                        tag: attribute(e, b"tag")?.unwrap_or_default(),
                        language: attribute(e, b"language")?,
                        value: String::new(),
                        depth,
                    });
                }
                depth += 1;
            }
            Event::Empty(ref e) => {
                if !saw_root {
                    saw_root = true;
                    dir = attribute(e, b"dir")?;
                } else if depth == 0 {
                    return Err("multiple root elements".to_string());
                } else if resource.is_some() {
                    // Empty markup inside a value contributes no text.
                } else if e.name().as_ref() == PAGE_ELEMENT {
                    let name = attribute(e, b"name")?.unwrap_or_default();
                    pages.push(Page::new(&name, Vec::new()));
                } else if e.name().as_ref() == RESOURCE_ELEMENT {
                    if let Some(open) = open_pages
                        .last_mut()
                        .filter(|p| p.owns_child_at(depth))
                    {
                        let tag = attribute(e, b"tag")?.unwrap_or_default();
                        let language = attribute(e, b"language")?;
                        open.resources
                            .push(Resource::new(&tag, language.as_deref(), String::new()));
                    }
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced closing tag".to_string())?;

                if resource.as_ref().is_some_and(|r| r.depth == depth) {
                    if let (Some(done), Some(open)) = (resource.take(), open_pages.last_mut()) {
                        open.resources.push(Resource::new(
                            &done.tag,
                            done.language.as_deref(),
                            done.value,
                        ));
                    }
                } else if open_pages.last().is_some_and(|p| p.depth == depth) {
                    if let Some(done) = open_pages.pop() {
                        pages[done.index] = Page::new(&done.name, done.resources);
                    }
                }
            }
            Event::Text(ref t) => {
                if let Some(open) = resource.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| format!("{} at byte {}", e, reader.buffer_position()))?;
                    open.value.push_str(&text);
                }
            }
            Event::CData(t) => {
                if let Some(open) = resource.as_mut() {
                    open.value
                        .push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::Eof => {
                if !saw_root {
                    return Err("document has no root element".to_string());
                }
                if depth != 0 {
                    return Err("unexpected end of document".to_string());
                }
                break;
            }
            _ => {}
        }
    }

    Ok(ThemeDocument::new(dir, pages))
}

fn attribute(element: &BytesStart, name: &[u8]) -> std::result::Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.as_ref() == name {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
