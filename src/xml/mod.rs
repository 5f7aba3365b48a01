//! Minimal XML document model.
//!
//! - `document`: arena tree of elements, text and CDATA nodes
//! - `reader`: quick-xml event stream into a tree
//! - `writer`: tree back into quick-xml events
//! - `builder`: file-bound document with the text-node helper

mod builder;
mod document;
pub mod reader;
pub mod writer;

pub use builder::XmlDocumentBuilder;
pub use document::{NodeId, NodeKind, XmlDocument};
