//! XML helpers for the ticket-export shape: pretty-printing a document
//! and flattening a header/body document into CSV.

use super::{ExportError, ExportResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A parsed XML element: tag, attributes, concatenated text, children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child with the given tag.
    pub fn find(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All direct children with the given tag.
    pub fn find_all(&self, tag: &str) -> Vec<&XmlElement> {
        self.children
            .iter()
            .filter(|child| child.tag == tag)
            .collect()
    }
}

fn element_from_start(start: &BytesStart<'_>) -> ExportResult<XmlElement> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(XmlElement {
        tag,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

/// Parse a document into its root element.
pub fn parse_xml(xml: &str) -> ExportResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    ExportError::InvalidData("closing tag without opening tag".to_string())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ExportError::InvalidData(
            "document ended with unclosed elements".to_string(),
        ));
    }
    root.ok_or_else(|| ExportError::InvalidData("document has no root element".to_string()))
}

fn attach(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> ExportResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_some() {
                return Err(ExportError::InvalidData(
                    "document has multiple root elements".to_string(),
                ));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

/// Re-serialize a document with two-space indentation.
pub fn pretty_xml(xml: &str) -> ExportResult<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    let bytes = writer.into_inner();
    String::from_utf8(bytes)
        .map_err(|_| ExportError::InvalidData("document is not valid UTF-8".to_string()))
}

/// Pretty-print a document and write it to a file.
pub fn save_xml<P: AsRef<Path>>(xml: &str, path: P) -> ExportResult<()> {
    let pretty = pretty_xml(xml)?;
    let mut file = File::create(path)?;
    file.write_all(pretty.as_bytes())?;
    Ok(())
}

/// Flatten a header/body document into CSV.
///
/// The `header_key` child of the root lists the columns: each child's tag
/// is the per-row lookup key and its `name` attribute is the CSV header
/// label. Each `body_key` child of the root becomes one row; missing or
/// empty cells are written as empty strings. The output starts with a
/// UTF-8 BOM.
pub fn xml_to_csv<P: AsRef<Path>>(
    xml: &str,
    path: P,
    header_key: &str,
    body_key: &str,
) -> ExportResult<()> {
    let document = parse_xml(xml)?;

    let header = document.find(header_key).ok_or_else(|| {
        ExportError::InvalidData(format!("document has no {header_key} element"))
    })?;

    let mut labels = Vec::with_capacity(header.children.len());
    let mut tags = Vec::with_capacity(header.children.len());
    for column in &header.children {
        let label = column.attribute("name").ok_or_else(|| {
            ExportError::InvalidData(format!(
                "header column {} has no name attribute",
                column.tag
            ))
        })?;
        labels.push(label.to_string());
        tags.push(column.tag.clone());
    }

    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(&labels)?;

    let rows = document.find_all(body_key);
    for row in &rows {
        let mut record = Vec::with_capacity(tags.len());
        for tag in &tags {
            let cell = row.find(tag).map(|cell| cell.text.as_str()).unwrap_or("");
            record.push(cell);
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    debug!(rows = rows.len(), columns = tags.len(), "wrote csv from xml");
    Ok(())
}
