//! Command-line shell around the renderer.

mod args;
mod inspect;
mod render;

pub use args::{Cli, Commands};
pub use inspect::{FeedSummary, inspect_feed};
pub use render::render_feed;
