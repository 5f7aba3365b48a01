//! `rssgen render`: feed definition file to RSS document.

use crate::{
    config::FeedFile,
    debug,
    log,
    render::{Renderer, RssRenderer},
    utils::date::{Clock, SystemClock},
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub fn render_feed(config: &Path, output: &Path, compact: bool) -> Result<PathBuf> {
    let path = render_with_clock(config, output, compact, SystemClock)?;
    log!("rss"; "{}", path.display());
    Ok(path)
}

fn render_with_clock<C: Clock>(
    config: &Path,
    output: &Path,
    compact: bool,
    clock: C,
) -> Result<PathBuf> {
    let file = FeedFile::load(config)?;
    let table = file.route_table()?;
    let feed = file.into_feed(*clock.now().offset())?;
    debug!("render"; "{} item(s) from {}", feed.len(), config.display());

    RssRenderer::new(table, output)
        .with_clock(clock)
        .with_pretty(!compact)
        .render(&feed)
        .with_context(|| format!("failed to render feed `{}`", feed.name()))
}
