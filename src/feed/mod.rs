//! Feed aggregate: channel metadata plus ordered items.

mod channel;
mod item;

pub use channel::{ChannelConfig, ImageBlock, ImageConfig};
pub use item::{Author, Enclosure, EntryItem, ExtendedItem, Item};

/// One syndicated document.
pub struct Feed {
    name: String,
    channel: ChannelConfig,
    items: Vec<Box<dyn Item>>,
}

impl Feed {
    pub fn new(name: impl Into<String>, channel: ChannelConfig) -> Self {
        Self {
            name: name.into(),
            channel,
            items: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output file name for `format`, e.g. `blog.rss`.
    pub fn filename(&self, format: &str) -> String {
        format!("{}.{}", self.name, format)
    }

    pub fn channel(&self) -> &ChannelConfig {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut ChannelConfig {
        &mut self.channel
    }

    pub fn push(&mut self, item: impl Item + 'static) -> &mut Self {
        self.items.push(Box::new(item));
        self
    }

    pub fn with_item(mut self, item: impl Item + 'static) -> Self {
        self.push(item);
        self
    }

    /// Items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &dyn Item> {
        self.items.iter().map(|item| &**item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Extend<Box<dyn Item>> for Feed {
    fn extend<I: IntoIterator<Item = Box<dyn Item>>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl std::fmt::Debug for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feed")
            .field("name", &self.name)
            .field("channel", &self.channel)
            .field("items", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteRef;
    use chrono::{FixedOffset, TimeZone};

    fn entry(id: &str) -> EntryItem {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        EntryItem::new("T", "D", id, date, RouteRef::url("/x"))
    }

    #[test]
    fn test_filename() {
        let feed = Feed::new("blog", ChannelConfig::new("d", "t", "en", "home"));
        assert_eq!(feed.filename("rss"), "blog.rss");
        assert_eq!(feed.filename("atom"), "blog.atom");
    }

    #[test]
    fn test_items_keep_order() {
        let mut feed = Feed::new("blog", ChannelConfig::new("d", "t", "en", "home"));
        feed.push(entry("1")).push(entry("2"));
        feed.extend([Box::new(entry("3")) as Box<dyn Item>]);

        let ids: Vec<_> = feed.items().map(|i| i.feed_id().to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(feed.len(), 3);
        assert!(!feed.is_empty());
    }
}
