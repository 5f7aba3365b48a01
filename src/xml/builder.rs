//! File-backed XML document.
//!
//! [`XmlDocumentBuilder`] owns one [`XmlDocument`] bound to a path. If the
//! file already exists it is loaded, otherwise an empty UTF-8 document is
//! started. `save` always overwrites the file.

use super::{
    document::{NodeId, XmlDocument},
    reader, writer,
};
use crate::error::XmlError;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub struct XmlDocumentBuilder {
    filename: PathBuf,
    doc: XmlDocument,
    new: bool,
    pretty: bool,
}

impl XmlDocumentBuilder {
    /// Open `filename`, loading and parsing it when it exists.
    pub fn new(filename: impl Into<PathBuf>) -> Result<Self, XmlError> {
        let filename = filename.into();

        let (doc, new) = if filename.is_file() {
            let source = fs::read_to_string(&filename)
                .map_err(|e| XmlError::Io(filename.clone(), e))?;
            (reader::parse(&source, &filename)?, false)
        } else {
            (XmlDocument::new("1.0", "utf-8"), true)
        };

        Ok(Self {
            filename,
            doc,
            new,
            pretty: true,
        })
    }

    /// Indent output on save (default) or write it compact.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Append `<name>content</name>` to `parent` and return the new element.
    ///
    /// With `wrap_in_cdata` the content is stored as a CDATA section instead
    /// of escaped text.
    pub fn add_text_node(
        &mut self,
        name: &str,
        content: &str,
        parent: NodeId,
        wrap_in_cdata: bool,
    ) -> Result<NodeId, XmlError> {
        let node = self.doc.create_element(name);
        self.doc.append_child(parent, node)?;

        let text = if wrap_in_cdata {
            self.doc.create_cdata_section(content)
        } else {
            self.doc.create_text_node(content)
        };
        self.doc.append_child(node, text)?;

        Ok(node)
    }

    /// Serialize the document to `filename`, overwriting it.
    pub fn save(&self) -> Result<(), XmlError> {
        let bytes = writer::to_bytes(&self.doc, self.pretty)?;
        fs::write(&self.filename, bytes).map_err(|e| XmlError::Io(self.filename.clone(), e))
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// `true` when no file existed at construction time.
    pub fn is_new(&self) -> bool {
        self.new
    }

    pub fn document(&self) -> &XmlDocument {
        &self.doc
    }

    /// Raw tree access for elements the text helper cannot build.
    pub fn document_mut(&mut self) -> &mut XmlDocument {
        &mut self.doc
    }
}
