//! rssgen - render a feed model into an RSS 2.0 document.
//!
//! # Module Structure
//!
//! ```text
//! src/
//! ├── feed/      # Feed aggregate, channel config, item capabilities
//! ├── render/    # Renderer trait and the RSS 2.0 renderer
//! ├── xml/       # arena XML tree, quick-xml reader/writer, file builder
//! ├── route.rs   # route references and URL generation
//! ├── config/    # feed definition file (feed.toml)
//! ├── cli/       # command-line shell
//! ├── utils/     # clock and date formatting
//! ├── error.rs   # typed errors
//! └── logger.rs  # log!/debug! macros
//! ```
//!
//! # Example
//!
//! ```ignore
//! let routes = RouteTable::new("https://example.com")?.with_routes([("home", "/")]);
//! let feed = Feed::new("blog", ChannelConfig::new("Notes", "My blog", "en", "home"))
//!     .with_item(EntryItem::new("Hello", "First post", "hello", date, RouteRef::url("/hello")));
//! RssRenderer::new(routes, "public").render(&feed)?; // public/blog.rss
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod logger;
pub mod render;
pub mod route;
pub mod utils;
pub mod xml;

pub use error::{RenderError, ResolveError, XmlError};
pub use feed::{Author, ChannelConfig, Enclosure, EntryItem, ExtendedItem, Feed, ImageConfig, Item};
pub use render::{Renderer, RssRenderer};
pub use route::{RouteParams, RouteRef, RouteTable, UrlGenerator};
pub use utils::date::{Clock, FixedClock, SystemClock};
pub use xml::{NodeId, XmlDocument, XmlDocumentBuilder};
