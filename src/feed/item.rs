//! Feed items.
//!
//! Every item implements [`Item`]. Items that carry more than the basics
//! also implement [`ExtendedItem`] and return themselves from
//! [`Item::as_extended`]; each extended field is an independent capability
//! that defaults to absent.

use crate::route::RouteRef;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Base capabilities every item exposes.
pub trait Item {
    fn feed_title(&self) -> &str;
    fn feed_description(&self) -> &str;
    /// Becomes `<guid>`; must not be empty or blank.
    fn feed_id(&self) -> &str;
    fn feed_date(&self) -> DateTime<FixedOffset>;
    fn feed_route(&self) -> RouteRef;

    /// Checked capability query for the extended field set.
    fn as_extended(&self) -> Option<&dyn ExtendedItem> {
        None
    }
}

/// Optional capabilities. `None` means the item does not expose the field.
pub trait ExtendedItem: Item {
    fn feed_author(&self) -> Option<Author> {
        None
    }

    fn feed_category(&self) -> Option<&str> {
        None
    }

    fn feed_comment_route(&self) -> Option<RouteRef> {
        None
    }

    fn feed_enclosure(&self) -> Option<Enclosure> {
        None
    }
}

// ============================================================================
// Author
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub nickname: Option<String>,
    pub email: Option<String>,
}

impl Author {
    /// `"nickname email"`, or whichever part is present.
    pub fn compose(&self) -> Option<String> {
        let parts: Vec<&str> = [self.nickname.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        let author = parts.join(" ");
        let author = author.trim();
        (!author.is_empty()).then(|| author.to_string())
    }
}

// ============================================================================
// Enclosure
// ============================================================================

/// Attached media, rendered as one attribute per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enclosure {
    attributes: Vec<(String, String)>,
}

impl Enclosure {
    /// The three attributes RSS 2.0 defines.
    pub fn new(url: impl Into<String>, length: u64, mime_type: impl Into<String>) -> Self {
        Self::default()
            .attr("url", url)
            .attr("length", length.to_string())
            .attr("type", mime_type)
    }

    /// Add an attribute; a repeated key replaces the previous value.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let (key, value) = (key.into(), value.into());
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
        self
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Enclosure {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |enc, (k, v)| enc.attr(k, v))
    }
}

// ============================================================================
// EntryItem
// ============================================================================

/// Plain data item, e.g. one `[[items]]` entry of a feed definition.
///
/// Exposes the extended capabilities only when at least one extended field
/// is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryItem {
    pub title: String,
    pub description: String,
    pub id: String,
    pub date: DateTime<FixedOffset>,
    pub route: RouteRef,
    pub author: Option<Author>,
    pub category: Option<String>,
    pub comments: Option<RouteRef>,
    pub enclosure: Option<Enclosure>,
}

impl EntryItem {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        id: impl Into<String>,
        date: DateTime<FixedOffset>,
        route: RouteRef,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            id: id.into(),
            date,
            route,
            author: None,
            category: None,
            comments: None,
            enclosure: None,
        }
    }

    fn has_extended(&self) -> bool {
        self.author.is_some()
            || self.category.is_some()
            || self.comments.is_some()
            || self.enclosure.is_some()
    }
}

impl Item for EntryItem {
    fn feed_title(&self) -> &str {
        &self.title
    }

    fn feed_description(&self) -> &str {
        &self.description
    }

    fn feed_id(&self) -> &str {
        &self.id
    }

    fn feed_date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    fn feed_route(&self) -> RouteRef {
        self.route.clone()
    }

    fn as_extended(&self) -> Option<&dyn ExtendedItem> {
        if self.has_extended() { Some(self) } else { None }
    }
}

impl ExtendedItem for EntryItem {
    fn feed_author(&self) -> Option<Author> {
        self.author.clone()
    }

    fn feed_category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn feed_comment_route(&self) -> Option<RouteRef> {
        self.comments.clone()
    }

    fn feed_enclosure(&self) -> Option<Enclosure> {
        self.enclosure.clone()
    }
}
