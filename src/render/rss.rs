//! RSS 2.0 rendering.

use super::Renderer;
use crate::{
    debug,
    error::RenderError,
    feed::{ExtendedItem, Feed, ImageBlock, Item},
    route::UrlGenerator,
    utils::date::{Clock, SystemClock, to_rfc822},
    xml::{NodeId, XmlDocumentBuilder},
};
use std::{fs, path::PathBuf};

const RSS_VERSION: &str = "2.0";

/// Writes `{base_path}/{feed name}.rss`.
#[derive(Debug, Clone)]
pub struct RssRenderer<G, C = SystemClock> {
    generator: G,
    base_path: PathBuf,
    clock: C,
    pretty: bool,
}

impl<G: UrlGenerator> RssRenderer<G> {
    pub fn new(generator: G, base_path: impl Into<PathBuf>) -> Self {
        Self {
            generator,
            base_path: base_path.into(),
            clock: SystemClock,
            pretty: true,
        }
    }
}

impl<G: UrlGenerator, C: Clock> RssRenderer<G, C> {
    /// Replace the time source used for channel dates.
    pub fn with_clock<T: Clock>(self, clock: T) -> RssRenderer<G, T> {
        RssRenderer {
            generator: self.generator,
            base_path: self.base_path,
            clock,
            pretty: self.pretty,
        }
    }

    /// Indented (default) or compact output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn output_path(&self, feed: &Feed) -> PathBuf {
        self.base_path.join(feed.filename("rss"))
    }

    // ========================================================================
    // Channel
    // ========================================================================

    /// Build `<rss><channel>` and fill the channel fields. Returns the channel.
    fn init(&self, xml: &mut XmlDocumentBuilder, feed: &Feed) -> Result<NodeId, RenderError> {
        let config = feed.channel();

        let doc = xml.document_mut();
        let root = doc.create_element("rss");
        doc.set_attribute(root, "version", RSS_VERSION)?;
        doc.set_root(root)?;
        let channel = doc.create_element("channel");
        doc.append_child(root, channel)?;

        xml.add_text_node("description", &config.description, channel, false)?;
        xml.add_text_node("pubDate", &to_rfc822(&self.clock.now()), channel, false)?;
        xml.add_text_node("lastBuildDate", &to_rfc822(&self.clock.now()), channel, false)?;

        let link = self
            .generator
            .generate(&config.route, &config.route_parameters, true)?;
        xml.add_text_node("link", &link, channel, false)?;
        xml.add_text_node("title", &config.title, channel, false)?;
        xml.add_text_node("language", &config.language, channel, false)?;

        for (name, value) in config.optional_fields() {
            if let Some(value) = value {
                xml.add_text_node(name, value, channel, false)?;
            }
        }

        if let Some(image) = config.image.as_ref().and_then(|i| i.block()) {
            write_image(xml, channel, &image)?;
        }

        if let Some(ttl) = config.ttl {
            xml.add_text_node("ttl", &ttl.to_string(), channel, false)?;
        }

        Ok(channel)
    }

    // ========================================================================
    // Items
    // ========================================================================

    fn write_item(
        &self,
        xml: &mut XmlDocumentBuilder,
        channel: NodeId,
        index: usize,
        item: &dyn Item,
    ) -> Result<(), RenderError> {
        let id = item.feed_id();
        if id.trim().is_empty() {
            return Err(RenderError::EmptyItemId {
                index,
                title: item.feed_title().to_string(),
            });
        }

        let doc = xml.document_mut();
        let node = doc.create_element("item");
        doc.append_child(channel, node)?;

        xml.add_text_node("title", item.feed_title(), node, false)?;
        xml.add_text_node("description", item.feed_description(), node, false)?;
        // The resolved route is written as a second <description>.
        let route = item.feed_route().resolve(&self.generator, true)?;
        xml.add_text_node("description", &route, node, false)?;
        xml.add_text_node("guid", id, node, false)?;
        xml.add_text_node("pubDate", &to_rfc822(&item.feed_date()), node, false)?;

        match item.as_extended() {
            Some(ext) => self.write_extended(xml, node, index, ext),
            None => {
                debug!("rss"; "item #{} `{}`: base fields only", index, id);
                Ok(())
            }
        }
    }

    fn write_extended(
        &self,
        xml: &mut XmlDocumentBuilder,
        node: NodeId,
        index: usize,
        item: &dyn ExtendedItem,
    ) -> Result<(), RenderError> {
        let mut written = Vec::new();

        if let Some(author) = item.feed_author().and_then(|a| a.compose()) {
            xml.add_text_node("author", &author, node, false)?;
            written.push("author");
        }

        if let Some(category) = item.feed_category() {
            xml.add_text_node("category", category, node, false)?;
            written.push("category");
        }

        if let Some(route) = item.feed_comment_route() {
            let comments = route.resolve_default(&self.generator)?;
            if !comments.is_empty() {
                xml.add_text_node("comments", &comments, node, false)?;
                written.push("comments");
            }
        }

        if let Some(enclosure) = item.feed_enclosure() {
            let doc = xml.document_mut();
            let element = doc.create_element("enclosure");
            for (key, value) in enclosure.attributes() {
                doc.set_attribute(element, key.as_str(), value.as_str())?;
            }
            doc.append_child(node, element)?;
            written.push("enclosure");
        }

        debug!("rss"; "item #{} `{}`: extended {:?}", index, item.feed_id(), written);
        Ok(())
    }
}

fn write_image(
    xml: &mut XmlDocumentBuilder,
    channel: NodeId,
    image: &ImageBlock<'_>,
) -> Result<(), RenderError> {
    let doc = xml.document_mut();
    let node = doc.create_element("image");
    doc.append_child(channel, node)?;

    xml.add_text_node("url", image.url, node, false)?;
    xml.add_text_node("title", image.title, node, false)?;
    xml.add_text_node("link", image.link, node, false)?;
    if let Some(height) = image.height {
        xml.add_text_node("height", &height.to_string(), node, false)?;
    }
    if let Some(width) = image.width {
        xml.add_text_node("width", &width.to_string(), node, false)?;
    }
    Ok(())
}

impl<G: UrlGenerator, C: Clock> Renderer for RssRenderer<G, C> {
    fn render(&self, feed: &Feed) -> Result<PathBuf, RenderError> {
        let path = self.output_path(feed);
        if path.is_file() {
            fs::remove_file(&path).map_err(|e| RenderError::Remove(path.clone(), e))?;
            debug!("rss"; "removed previous {}", path.display());
        }
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)
                .map_err(|e| RenderError::CreateDir(self.base_path.clone(), e))?;
        }

        let mut xml = XmlDocumentBuilder::new(&path)?.with_pretty(self.pretty);
        let channel = self.init(&mut xml, feed)?;
        for (index, item) in feed.items().enumerate() {
            self.write_item(&mut xml, channel, index, item)?;
        }
        xml.save()?;

        debug!("rss"; "wrote {}", path.display());
        Ok(path)
    }
}
