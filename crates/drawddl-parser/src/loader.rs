//! Diagram loader: markup text to [`DiagramDocument`].
//!
//! Only `mxCell` elements become nodes. Every other element (`mxfile`,
//! `diagram`, `mxGraphModel`, `root`, `mxGeometry`, ...) is checked for
//! well-formedness and otherwise ignored.

use log::{debug, info, trace};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use drawddl_core::identifier::Id;

use crate::{
    document::{DiagramDocument, DiagramNode},
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

const CELL_TAG: &[u8] = b"mxCell";

/// Decodes raw diagram bytes as UTF-8.
///
/// # Errors
///
/// Returns an [`ErrorCode::E001`] diagnostic pointing at the first byte that
/// is not part of a valid UTF-8 sequence.
pub fn decode(bytes: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes).map_err(|err| {
        Diagnostic::new(
            ErrorCode::E001,
            format!("diagram document is not valid UTF-8: {err}"),
        )
        .at(Span::point(err.valid_up_to()), "invalid byte sequence starts here")
        .hint("save the diagram with UTF-8 encoding")
        .into()
    })
}

/// Parses diagram markup into a [`DiagramDocument`].
///
/// The markup must be a well-formed document: exactly one root element, no
/// text outside it, known entities only and no duplicate attributes.
///
/// # Errors
///
/// Returns a [`ParseError`] with an [`ErrorCode::E001`] diagnostic when the
/// markup is malformed and [`ErrorCode::E002`] when it is empty or ends with
/// elements still open. No partial document is returned.
pub fn load(source: &str) -> Result<DiagramDocument, ParseError> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut nodes = Vec::new();
    let mut open_elements: Vec<usize> = Vec::new();
    let mut saw_root = false;

    loop {
        buf.clear();
        let start = reader.buffer_position();
        let event = reader.read_event_into(&mut buf).map_err(|err| {
            malformed(
                format!("malformed diagram document: {err}"),
                Span::new(start..reader.buffer_position()),
                "parsing failed here",
            )
        })?;
        let end = reader.buffer_position();
        let span = trimmed_span(source, start, end);

        match event {
            Event::Start(element) => {
                check_single_root(saw_root, &open_elements, span)?;
                saw_root = true;
                open_elements.push(span.start());
                if let Some(node) = read_element(&element, span)? {
                    nodes.push(node);
                }
            }
            Event::Empty(element) => {
                check_single_root(saw_root, &open_elements, span)?;
                saw_root = true;
                if let Some(node) = read_element(&element, span)? {
                    nodes.push(node);
                }
            }
            Event::End(_) => {
                open_elements.pop();
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|err| {
                    malformed(format!("malformed text: {err}"), span, "in this text")
                })?;
                let blank = text
                    .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
                    .is_empty();
                if open_elements.is_empty() && !blank {
                    return Err(malformed(
                        "text outside the root element",
                        span,
                        "not inside any element",
                    ));
                }
            }
            Event::CData(_) if open_elements.is_empty() => {
                return Err(malformed(
                    "character data outside the root element",
                    span,
                    "not inside any element",
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(&unclosed) = open_elements.last() {
        return Err(Diagnostic::new(
            ErrorCode::E002,
            "diagram document ended before all elements were closed",
        )
        .at(Span::point(unclosed), "element opened here is never closed")
        .into());
    }

    if !saw_root {
        return Err(
            Diagnostic::new(ErrorCode::E002, "diagram document has no root element")
                .at(Span::point(source.len()), "expected an element")
                .hint("export the diagram as uncompressed XML")
                .into(),
        );
    }

    info!(nodes_count = nodes.len(); "Diagram loaded");
    let document = DiagramDocument::new(nodes);
    trace!(document:?; "Loaded document");
    Ok(document)
}

/// Rejects a top-level element once the root element has been read.
fn check_single_root(saw_root: bool, open_elements: &[usize], span: Span) -> Result<(), ParseError> {
    if saw_root && open_elements.is_empty() {
        return Err(malformed(
            "diagram document has more than one root element",
            span,
            "second root element",
        ));
    }
    Ok(())
}

/// Attribute values of an `mxCell` that the pipeline reads.
#[derive(Debug, Default)]
struct CellAttributes {
    id: Option<String>,
    parent: Option<String>,
    style: Option<String>,
    value: Option<String>,
    source: Option<String>,
    target: Option<String>,
}

impl CellAttributes {
    fn set(&mut self, key: &[u8], text: String) {
        match key {
            b"id" => self.id = Some(text),
            b"parent" => self.parent = Some(text),
            b"style" => self.style = Some(text),
            b"value" => self.value = Some(text),
            b"source" => self.source = Some(text),
            b"target" => self.target = Some(text),
            _ => {}
        }
    }

    fn into_node(self, span: Span) -> Option<DiagramNode> {
        let Some(id) = self.id else {
            debug!(span:% = span; "Skipping mxCell without id");
            return None;
        };

        let mut node = DiagramNode::new(Id::new(&id), span);
        if let Some(parent) = self.parent {
            node = node.with_parent(Id::new(&parent));
        }
        if let Some(style) = self.style {
            node = node.with_style(style);
        }
        if let Some(value) = self.value {
            node = node.with_value(value);
        }
        if let Some(source) = self.source {
            node = node.with_source(Id::new(&source));
        }
        if let Some(target) = self.target {
            node = node.with_target(Id::new(&target));
        }
        Some(node)
    }
}

/// Validates every attribute of a start tag and converts `mxCell` tags into
/// nodes. Other tags yield `None`.
fn read_element(element: &BytesStart<'_>, span: Span) -> Result<Option<DiagramNode>, ParseError> {
    let is_cell = element.name().as_ref() == CELL_TAG;
    let mut cell = CellAttributes::default();

    for attr in element.attributes() {
        let attr = attr.map_err(|err| attribute_error(err.to_string(), span))?;
        if attr.value.contains(&b'<') {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            return Err(attribute_error(
                format!("`<` in the value of `{key}`"),
                span,
            ));
        }
        let text = attr
            .unescape_value()
            .map_err(|err| attribute_error(err.to_string(), span))?;

        if is_cell {
            cell.set(attr.key.as_ref(), text.into_owned());
        }
    }

    Ok(if is_cell { cell.into_node(span) } else { None })
}

/// Narrows `start..end` to skip whitespace the reader consumed before the
/// event.
fn trimmed_span(source: &str, start: usize, end: usize) -> Span {
    let first = source
        .as_bytes()
        .get(start..end)
        .and_then(|bytes| bytes.iter().position(|b| !b.is_ascii_whitespace()))
        .map_or(start, |offset| start + offset);
    Span::new(first..end)
}

fn malformed(message: impl Into<String>, span: Span, label: &str) -> ParseError {
    Diagnostic::new(ErrorCode::E001, message).at(span, label).into()
}

fn attribute_error(message: String, span: Span) -> ParseError {
    malformed(format!("malformed attribute: {message}"), span, "in this element")
}
