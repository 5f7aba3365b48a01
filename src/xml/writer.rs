//! Serialize an [`XmlDocument`] with quick-xml.

use super::document::{NodeId, NodeKind, XmlDocument};
use crate::error::XmlError;
use quick_xml::{
    Writer,
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

/// Indentation used for pretty output.
const INDENT: usize = 2;

/// Serialize the document, including the XML declaration.
///
/// `pretty` indents nested elements; compact output has no whitespace
/// between tags.
pub fn to_bytes(doc: &XmlDocument, pretty: bool) -> Result<Vec<u8>, XmlError> {
    let root = doc.root().ok_or(XmlError::NoRoot)?;

    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', INDENT)
    } else {
        Writer::new(Vec::new())
    };

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new(doc.version(), Some(doc.encoding()), None)),
    )?;
    write_node(&mut writer, doc, root)?;

    let mut bytes = writer.into_inner();
    if pretty {
        bytes.push(b'\n');
    }
    Ok(bytes)
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    doc: &XmlDocument,
    node: NodeId,
) -> Result<(), XmlError> {
    match doc.kind(node) {
        NodeKind::Element { name, attributes } => {
            let mut start = BytesStart::new(name.as_str());
            for (key, value) in attributes {
                check_chars(value)?;
                start.push_attribute((key.as_str(), value.as_str()));
            }

            let children = doc.children(node);
            if children.is_empty() {
                return emit(writer, Event::Empty(start));
            }

            emit(writer, Event::Start(start))?;
            for child in children {
                write_node(writer, doc, *child)?;
            }
            emit(writer, Event::End(BytesEnd::new(name.as_str())))
        }
        NodeKind::Text(text) => {
            check_chars(text)?;
            emit(writer, Event::Text(BytesText::new(text)))
        }
        NodeKind::CData(text) => {
            check_chars(text)?;
            for section in split_cdata(text) {
                emit(writer, Event::CData(BytesCData::new(section)))?;
            }
            Ok(())
        }
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), XmlError> {
    writer
        .write_event(event)
        .map_err(|e| XmlError::Serialize(e.to_string()))
}

/// Reject characters outside the XML 1.0 `Char` production.
fn check_chars(value: &str) -> Result<(), XmlError> {
    match value.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(XmlError::Serialize(format!(
            "character U+{:04X} is not allowed in XML 1.0",
            c as u32
        ))),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
        || c >= '\u{10000}'
}

/// Split CDATA content so no section contains the `]]>` terminator.
///
/// `a]]>b` becomes `a]]` and `>b`, which concatenate back to the input.
fn split_cdata(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        sections.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    sections.push(rest);
    sections
}
