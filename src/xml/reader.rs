//! Parse XML text into an [`XmlDocument`].
//!
//! Keeps elements, attributes, text, CDATA and entity references.
//! Comments, processing instructions, doctypes and whitespace-only text
//! are dropped.

use super::document::{NodeId, XmlDocument};
use crate::error::XmlError;
use quick_xml::{
    Reader,
    escape::unescape,
    events::{BytesStart, Event},
};
use std::path::Path;

/// Parse `source`; `path` is only used for error messages.
pub fn parse(source: &str, path: &Path) -> Result<XmlDocument, XmlError> {
    let fail = |message: String| XmlError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = Reader::from_str(source);
    let mut doc = XmlDocument::default();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut pending = String::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| fail(format!("{e} at byte {}", reader.buffer_position())))?;

        match event {
            Event::Decl(decl) => {
                let version = decl
                    .version()
                    .map_err(|e| fail(e.to_string()))
                    .and_then(|v| utf8(&v).map(str::to_string).map_err(&fail))?;
                let encoding = match decl.encoding() {
                    Some(enc) => {
                        let enc = enc.map_err(|e| fail(e.to_string()))?;
                        utf8(&enc).map_err(&fail)?.to_string()
                    }
                    None => "utf-8".to_string(),
                };
                doc = XmlDocument::new(version, encoding);
            }
            Event::Start(start) => {
                flush_text(&mut doc, &stack, &mut pending)?;
                let node = open_element(&mut doc, &start, &stack).map_err(&fail)?;
                stack.push(node);
            }
            Event::Empty(start) => {
                flush_text(&mut doc, &stack, &mut pending)?;
                open_element(&mut doc, &start, &stack).map_err(&fail)?;
            }
            Event::End(_) => {
                flush_text(&mut doc, &stack, &mut pending)?;
                stack.pop();
            }
            Event::Text(text) => {
                pending.push_str(utf8(&text).map_err(&fail)?);
            }
            Event::GeneralRef(reference) => {
                let name = utf8(&reference).map_err(&fail)?;
                let resolved = resolve_entity(name)
                    .ok_or_else(|| fail(format!("unknown entity `&{name};`")))?;
                pending.push(resolved);
            }
            Event::CData(cdata) => {
                flush_text(&mut doc, &stack, &mut pending)?;
                if let Some(parent) = stack.last().copied() {
                    let content = utf8(&cdata).map_err(&fail)?;
                    let node = doc.create_cdata_section(content);
                    doc.append_child(parent, node)?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if doc.root().is_none() {
        return Err(fail("document has no root element".to_string()));
    }
    if !stack.is_empty() {
        return Err(fail("unexpected end of document".to_string()));
    }
    Ok(doc)
}

/// Create an element for `start` and attach it to the current parent, or
/// install it as the root.
fn open_element(
    doc: &mut XmlDocument,
    start: &BytesStart<'_>,
    stack: &[NodeId],
) -> Result<NodeId, String> {
    let name = utf8(start.name().as_ref())?.to_string();
    let node = doc.create_element(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = utf8(attr.key.as_ref())?;
        let value = unescape(utf8(&attr.value)?).map_err(|e| e.to_string())?;
        doc.set_attribute(node, key, value)
            .map_err(|e| e.to_string())?;
    }

    let attached = match stack.last() {
        Some(parent) => doc.append_child(*parent, node),
        None if doc.root().is_some() => return Err("multiple root elements".to_string()),
        None => doc.set_root(node),
    };
    attached.map_err(|e| e.to_string())
}

/// Attach accumulated character data to the open element.
fn flush_text(
    doc: &mut XmlDocument,
    stack: &[NodeId],
    pending: &mut String,
) -> Result<(), XmlError> {
    if pending.is_empty() {
        return Ok(());
    }
    let text = std::mem::take(pending);
    if text.trim().is_empty() {
        return Ok(());
    }
    if let Some(parent) = stack.last().copied() {
        let node = doc.create_text_node(text);
        doc.append_child(parent, node)?;
    }
    Ok(())
}

fn utf8(bytes: &[u8]) -> Result<&str, String> {
    std::str::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Resolve a predefined or numeric entity name (without `&` and `;`).
fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse_str(source: &str) -> Result<XmlDocument, XmlError> {
        parse(source, &PathBuf::from("test.xml"))
    }

    #[test]
    fn test_parse_basic_tree() {
        let doc = parse_str(
            r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0">
  <channel>
    <title>Blog</title>
    <item><guid>1</guid></item>
    <item><guid>2</guid></item>
  </channel>
</rss>"#,
        )
        .unwrap();

        let root = doc.root().unwrap();
        assert_eq!(doc.name(root), Some("rss"));
        assert_eq!(doc.attribute(root, "version"), Some("2.0"));

        let items = doc.elements_by_tag_name("item");
        assert_eq!(items.len(), 2);
        assert_eq!(doc.text(items[1]), "2");

        let channel = doc.elements_by_tag_name("channel")[0];
        // whitespace-only text between tags is dropped
        assert_eq!(doc.children(channel).len(), 3);
    }

    #[test]
    fn test_parse_declaration() {
        let doc = parse_str(r#"<?xml version="1.1" encoding="ISO-8859-1"?><a/>"#).unwrap();
        assert_eq!(doc.version(), "1.1");
        assert_eq!(doc.encoding(), "ISO-8859-1");

        let doc = parse_str("<a/>").unwrap();
        assert_eq!(doc.encoding(), "utf-8");
    }

    #[test]
    fn test_parse_entities_and_cdata() {
        let doc = parse_str(concat!(
            r#"<r><t>Tom &amp; Jerry &#60;3 &#x41;</t>"#,
            r#"<d><![CDATA[<b>raw</b>]]></d><e u="a&amp;b"/></r>"#,
        ))
        .unwrap();

        let t = doc.elements_by_tag_name("t")[0];
        assert_eq!(doc.text(t), "Tom & Jerry <3 A");

        let d = doc.elements_by_tag_name("d")[0];
        assert_eq!(doc.text(d), "<b>raw</b>");

        let e = doc.elements_by_tag_name("e")[0];
        assert_eq!(doc.attribute(e, "u"), Some("a&b"));
    }

    #[test]
    fn test_parse_ignores_comments() {
        let doc = parse_str("<r><!-- note --><a>1</a></r>").unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc.children(root).len(), 1);
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_str("<rss><channel></rss>").unwrap_err();
        assert!(matches!(err, XmlError::Parse { .. }));
        assert!(err.to_string().contains("test.xml"));
    }

    #[test]
    fn test_parse_no_root() {
        assert!(parse_str("").is_err());
        assert!(parse_str("<?xml version=\"1.0\"?>").is_err());
    }

    #[test]
    fn test_parse_unclosed() {
        assert!(parse_str("<rss><channel>").is_err());
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("quot"), Some('"'));
        assert_eq!(resolve_entity("#233"), Some('é'));
        assert_eq!(resolve_entity("#xE9"), Some('é'));
        assert_eq!(resolve_entity("nbsp"), None);
        assert_eq!(resolve_entity("#xZZ"), None);
    }
}
