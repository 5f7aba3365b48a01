//! Feed definition file (`feed.toml`).
//!
//! # Sections
//!
//! | Section            | Purpose                                         |
//! |--------------------|-------------------------------------------------|
//! | `[feed]`           | Feed name (output file is `{name}.rss`)         |
//! | `[router]`         | Base URL and named route patterns               |
//! | `[channel]`        | Channel metadata, optional fields, `[image]`    |
//! | `[[items]]`        | Items in output order                           |
//!
//! ```toml
//! [feed]
//! name = "blog"
//!
//! [router]
//! base_url = "https://example.com"
//! routes = { home = "/", post = "/posts/{slug}" }
//!
//! [channel]
//! description = "Notes"
//! title = "My blog"
//! language = "en"
//! route = "home"
//!
//! [[items]]
//! title = "Hello"
//! description = "First post"
//! id = "hello"
//! date = "2024-01-01T00:00:00"
//! route = { name = "post", params = { slug = "hello" } }
//! ```

mod error;

pub use error::ConfigError;

use crate::{
    feed::{Author, ChannelConfig, Enclosure, EntryItem, Feed},
    route::{RouteRef, RouteTable},
    utils::date::parse_item_date,
};
use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

/// Default feed definition file name.
pub const DEFAULT_CONFIG: &str = "feed.toml";

/// Root of a feed definition file.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedFile {
    pub feed: FeedSection,
    pub router: RouterSection,
    pub channel: ChannelConfig,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSection {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouterSection {
    pub base_url: String,
    #[serde(default)]
    pub routes: BTreeMap<String, String>,
}

/// One `[[items]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub id: String,
    pub date: String,
    pub route: RouteRef,
    pub author: Option<Author>,
    pub category: Option<String>,
    pub comments: Option<RouteRef>,
    /// Enclosure attributes, e.g. `{ url = "...", length = "1024", type = "audio/mpeg" }`.
    pub enclosure: Option<BTreeMap<String, String>>,
}

impl FeedFile {
    /// Read and validate a feed definition.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))
            .with_context(|| format!("failed to load feed definition `{}`", path.display()))?;
        let file = Self::parse(&content)
            .with_context(|| format!("invalid feed definition `{}`", path.display()))?;
        Ok(file)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: Self = toml::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.name.trim().is_empty() {
            return Err(ConfigError::Validation("`feed.name` must not be empty".into()));
        }
        if self.feed.name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "`feed.name` must be a plain file stem, got `{}`",
                self.feed.name
            )));
        }
        if let Err(e) = url::Url::parse(&self.router.base_url) {
            return Err(ConfigError::Validation(format!(
                "`router.base_url` is not an absolute URL ({e}): `{}`",
                self.router.base_url
            )));
        }
        Ok(())
    }

    /// URL generator built from `[router]`.
    pub fn route_table(&self) -> Result<RouteTable, ConfigError> {
        let table = RouteTable::new(&self.router.base_url)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        Ok(table.with_routes(self.router.routes.clone()))
    }

    /// Build the feed; naive item dates are placed in `offset`.
    pub fn into_feed(self, offset: FixedOffset) -> Result<Feed, ConfigError> {
        let mut feed = Feed::new(self.feed.name, self.channel);
        for (index, entry) in self.items.into_iter().enumerate() {
            feed.push(entry.into_item(index, offset)?);
        }
        Ok(feed)
    }
}

impl ItemEntry {
    fn into_item(self, index: usize, offset: FixedOffset) -> Result<EntryItem, ConfigError> {
        let date = parse_item_date(&self.date, offset).ok_or_else(|| {
            ConfigError::Validation(format!("items[{index}].date is invalid: `{}`", self.date))
        })?;

        let mut item = EntryItem::new(self.title, self.description, self.id, date, self.route);
        item.author = self.author;
        item.category = self.category;
        item.comments = self.comments;
        item.enclosure = self.enclosure.map(Enclosure::from_iter);
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Item;
    use crate::route::UrlGenerator;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
[feed]
name = "blog"

[router]
base_url = "https://example.com"

[channel]
description = "d"
title = "t"
language = "en"
route = "home"
"#;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_parse_minimal() {
        let file = FeedFile::parse(MINIMAL).unwrap();
        assert_eq!(file.feed.name, "blog");
        assert!(file.items.is_empty());
        assert!(file.router.routes.is_empty());

        let feed = file.into_feed(utc()).unwrap();
        assert_eq!(feed.filename("rss"), "blog.rss");
        assert!(feed.is_empty());
    }

    #[test]
    fn test_parse_items() {
        let content = format!(
            "{MINIMAL}{}",
            r#"
[router.routes]
home = "/"
post = "/posts/{slug}"

[[items]]
title = "Hello"
description = "First"
id = "1"
date = "2024-01-01T00:00:00"
route = "/x"

[[items]]
title = "Ep 1"
description = "Audio"
id = "2"
date = "2024-01-02T10:00:00+02:00"
route = { name = "post", params = { slug = "ep-1" } }
author = { nickname = "nek", email = "nek@example.com" }
category = "podcast"
comments = { name = "post", params = { slug = "ep-1", anchor = "comments" } }
enclosure = { url = "https://example.com/ep1.mp3", length = "1024", type = "audio/mpeg" }
"#
        );
        let file = FeedFile::parse(&content).unwrap();
        let table = file.route_table().unwrap();
        assert_eq!(
            table.generate("post", &[("slug".to_string(), "a".to_string())].into(), true).unwrap(),
            "https://example.com/posts/a"
        );

        let feed = file.into_feed(utc()).unwrap();
        let items: Vec<_> = feed.items().collect();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].feed_id(), "1");
        assert!(items[0].as_extended().is_none());

        let ext = items[1].as_extended().unwrap();
        assert_eq!(ext.feed_category(), Some("podcast"));
        assert_eq!(
            ext.feed_author().and_then(|a| a.compose()).as_deref(),
            Some("nek nek@example.com")
        );
        let enclosure = ext.feed_enclosure().unwrap();
        assert_eq!(enclosure.attributes().len(), 3);
        assert_eq!(items[1].feed_date().offset().local_minus_utc(), 7200);
    }

    #[test]
    fn test_missing_id_defaults_to_empty() {
        let content = format!(
            "{MINIMAL}{}{}",
            "\n[[items]]\ntitle = \"t\"\ndescription = \"d\"\n",
            "date = \"2024-01-01\"\nroute = \"/x\"\n"
        );
        let feed = FeedFile::parse(&content).unwrap().into_feed(utc()).unwrap();
        assert_eq!(feed.items().next().map(|i| i.feed_id()), Some(""));
    }

    #[test]
    fn test_invalid_date() {
        let content = format!(
            "{MINIMAL}{}{}",
            "\n[[items]]\ntitle = \"t\"\ndescription = \"d\"\n",
            "id = \"1\"\ndate = \"soon\"\nroute = \"/x\"\n"
        );
        let err = FeedFile::parse(&content).unwrap().into_feed(utc()).unwrap_err();
        assert!(err.to_string().contains("items[0].date"));
    }

    #[test]
    fn test_validation_errors() {
        let bad_name = MINIMAL.replace("name = \"blog\"", "name = \"a/b\"");
        assert!(matches!(FeedFile::parse(&bad_name), Err(ConfigError::Validation(_))));

        let empty_name = MINIMAL.replace("name = \"blog\"", "name = \" \"");
        assert!(matches!(FeedFile::parse(&empty_name), Err(ConfigError::Validation(_))));

        let bad_url = MINIMAL.replace("https://example.com", "/relative");
        assert!(matches!(FeedFile::parse(&bad_url), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_toml_error() {
        let missing_title = MINIMAL.replace("title = \"t\"", "");
        assert!(matches!(FeedFile::parse(&missing_title), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG);
        fs::write(&path, MINIMAL).unwrap();

        let file = FeedFile::load(&path).unwrap();
        assert_eq!(file.channel.title, "t");

        let err = FeedFile::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("missing.toml"));
    }
}
