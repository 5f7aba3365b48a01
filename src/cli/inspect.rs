//! `rssgen inspect`: read back an RSS file.

use crate::{
    log,
    xml::{XmlDocument, XmlDocumentBuilder},
};
use anyhow::{Result, bail};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSummary {
    pub title: String,
    pub link: String,
    pub guids: Vec<String>,
}

pub fn inspect_feed(file: &Path) -> Result<FeedSummary> {
    if !file.is_file() {
        bail!("no feed at `{}`", file.display());
    }

    let xml = XmlDocumentBuilder::new(file)?;
    let Some(summary) = summarize(xml.document()) else {
        bail!("`{}` has no <channel> element", file.display());
    };

    log!("inspect"; "{} ({})", summary.title, summary.link);
    log!("inspect"; "{} item(s)", summary.guids.len());
    for guid in &summary.guids {
        log!("inspect"; "  {}", guid);
    }
    Ok(summary)
}

fn summarize(doc: &XmlDocument) -> Option<FeedSummary> {
    let channel = doc.elements_by_tag_name("channel").into_iter().next()?;
    let field = |name: &str| {
        doc.child_elements(channel, name)
            .next()
            .map(|node| doc.text(node))
            .unwrap_or_default()
    };

    let guids = doc
        .child_elements(channel, "item")
        .filter_map(|item| doc.child_elements(item, "guid").next())
        .map(|guid| doc.text(guid))
        .collect();

    Some(FeedSummary {
        title: field("title"),
        link: field("link"),
        guids,
    })
}
