//! Feed renderers.
//!
//! A [`Renderer`] turns a [`Feed`] into a file on disk. [`RssRenderer`]
//! produces RSS 2.0:
//!
//! ```text
//! <rss version="2.0">
//!   <channel>
//!     description, pubDate, lastBuildDate, link, title, language,
//!     [copyright] [managingEditor] [generator] [webMaster] [image] [ttl]
//!     <item>
//!       title, description, description (route), guid, pubDate,
//!       [author] [category] [comments] [enclosure]
//!     </item>
//!   </channel>
//! </rss>
//! ```

mod rss;


pub use rss::RssRenderer;

use crate::{error::RenderError, feed::Feed};
use std::path::PathBuf;

pub trait Renderer {
    /// Render `feed`, replacing any previous output. Returns the written path.
    fn render(&self, feed: &Feed) -> Result<PathBuf, RenderError>;
}
