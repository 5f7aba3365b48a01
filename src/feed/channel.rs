//! Channel-level configuration.

use crate::route::RouteParams;
use serde::{Deserialize, Serialize};

/// Channel metadata. Keys follow RSS spelling in serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfig {
    pub description: String,
    pub title: String,
    pub language: String,
    /// Route name for the channel `<link>`.
    pub route: String,
    #[serde(default, rename = "route_parameters")]
    pub route_parameters: RouteParams,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub managing_editor: Option<String>,
    #[serde(default)]
    pub generator: Option<String>,
    #[serde(default)]
    pub web_master: Option<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub image: Option<ImageConfig>,
}

impl ChannelConfig {
    pub fn new(
        description: impl Into<String>,
        title: impl Into<String>,
        language: impl Into<String>,
        route: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            title: title.into(),
            language: language.into(),
            route: route.into(),
            route_parameters: RouteParams::new(),
            copyright: None,
            managing_editor: None,
            generator: None,
            web_master: None,
            ttl: None,
            image: None,
        }
    }

    /// Optional text fields in output order, with their RSS element names.
    pub fn optional_fields(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("copyright", self.copyright.as_deref()),
            ("managingEditor", self.managing_editor.as_deref()),
            ("generator", self.generator.as_deref()),
            ("webMaster", self.web_master.as_deref()),
        ]
    }
}

/// Channel `<image>`. Rendered only when url, title and link are all set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub url: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Image fields that passed the required-key check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBlock<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub link: &'a str,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

impl ImageConfig {
    pub fn block(&self) -> Option<ImageBlock<'_>> {
        Some(ImageBlock {
            url: self.url.as_deref()?,
            title: self.title.as_deref()?,
            link: self.link.as_deref()?,
            height: self.height,
            width: self.width,
        })
    }
}
