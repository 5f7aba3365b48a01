//! Error types for feed rendering.
//!
//! - [`RenderError`]: anything that aborts a render call
//! - [`XmlError`]: document load, tree manipulation and save failures
//! - [`ResolveError`]: named route could not be turned into a URL

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// RenderError
// ============================================================================

/// Errors surfaced by a render call. None of them are retried.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Configuration error: the item at `index` returned an empty or blank id.
    #[error("feed item #{index} (`{title}`) must return a non-empty id")]
    EmptyItemId { index: usize, title: String },

    #[error("IO error when removing `{0}`")]
    Remove(PathBuf, #[source] std::io::Error),

    #[error("IO error when creating directory `{0}`")]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

// ============================================================================
// XmlError
// ============================================================================

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed XML in `{path}`: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("cannot serialize a document without a root element")]
    NoRoot,

    #[error("node `{0}` is not an element")]
    NotAnElement(String),

    #[error("cannot append `{0}` under itself or one of its descendants")]
    Hierarchy(String),

    #[error("XML serialization failed: {0}")]
    Serialize(String),
}

// ============================================================================
// ResolveError
// ============================================================================

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unknown route `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` requires parameter `{param}`")]
    MissingParameter { route: String, param: String },

    #[error("invalid URL")]
    InvalidUrl(#[from] url::ParseError),
}
