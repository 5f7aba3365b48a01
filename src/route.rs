//! Route references and URL generation.
//!
//! A feed or item points at a page either with a literal URL or with a
//! named route plus parameters. Named routes go through a [`UrlGenerator`],
//! which the caller injects into the renderer.
//!
//! [`RouteTable`] is the bundled generator:
//!
//! ```text
//! base_url = https://example.com
//! post     = /posts/{slug}
//!
//! generate("post", {slug: "hello world", page: "2"}, absolute = true)
//!   -> https://example.com/posts/hello%20world?page=2
//! generate("post", {slug: "a"}, absolute = false)
//!   -> /posts/a
//! ```

use crate::error::ResolveError;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::{Url, form_urlencoded};

/// Route parameters, ordered by name.
pub type RouteParams = BTreeMap<String, String>;

/// Characters escaped inside a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Where a link points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteRef {
    /// Used as-is.
    Url(String),
    /// Resolved through a [`UrlGenerator`].
    Named {
        name: String,
        #[serde(default)]
        params: RouteParams,
    },
}

impl RouteRef {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn named(name: impl Into<String>, params: RouteParams) -> Self {
        Self::Named {
            name: name.into(),
            params,
        }
    }

    /// Resolve with an explicit absoluteness for named routes.
    pub fn resolve(
        &self,
        generator: &dyn UrlGenerator,
        absolute: bool,
    ) -> Result<String, ResolveError> {
        match self {
            Self::Url(url) => Ok(url.clone()),
            Self::Named { name, params } => generator.generate(name, params, absolute),
        }
    }

    /// Resolve with the generator's default absoluteness for named routes.
    pub fn resolve_default(&self, generator: &dyn UrlGenerator) -> Result<String, ResolveError> {
        match self {
            Self::Url(url) => Ok(url.clone()),
            Self::Named { name, params } => generator.generate_default(name, params),
        }
    }
}

impl From<&str> for RouteRef {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

/// URL generation capability.
pub trait UrlGenerator {
    /// Turn a named route into a URL. `absolute` requests scheme and host.
    fn generate(
        &self,
        name: &str,
        params: &RouteParams,
        absolute: bool,
    ) -> Result<String, ResolveError>;

    /// Generate with this generator's default absoluteness (relative).
    fn generate_default(&self, name: &str, params: &RouteParams) -> Result<String, ResolveError> {
        self.generate(name, params, false)
    }
}

impl<G: UrlGenerator + ?Sized> UrlGenerator for &G {
    fn generate(
        &self,
        name: &str,
        params: &RouteParams,
        absolute: bool,
    ) -> Result<String, ResolveError> {
        (**self).generate(name, params, absolute)
    }

    fn generate_default(&self, name: &str, params: &RouteParams) -> Result<String, ResolveError> {
        (**self).generate_default(name, params)
    }
}

// ============================================================================
// RouteTable
// ============================================================================

/// Named path patterns resolved against a base URL.
#[derive(Debug, Clone)]
pub struct RouteTable {
    base_url: Url,
    routes: BTreeMap<String, String>,
}

impl RouteTable {
    /// Patterns resolve under the path of `base_url`, so
    /// `https://example.com/blog` serves `/posts/a` as `/blog/posts/a`.
    pub fn new(base_url: &str) -> Result<Self, ResolveError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            routes: BTreeMap::new(),
        })
    }

    /// Register `pattern` (e.g. `/posts/{slug}`) under `name`.
    pub fn add(&mut self, name: impl Into<String>, pattern: impl Into<String>) -> &mut Self {
        self.routes.insert(name.into(), pattern.into());
        self
    }

    pub fn with_routes<I, K, V>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, pattern) in routes {
            self.add(name, pattern);
        }
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the host-relative path (with query string) for a route.
    fn path(&self, name: &str, params: &RouteParams) -> Result<String, ResolveError> {
        let pattern = self
            .routes
            .get(name)
            .ok_or_else(|| ResolveError::UnknownRoute(name.to_string()))?;

        let mut path = self.base_url.path().to_string();
        let mut used = Vec::new();
        let mut rest = pattern.trim_start_matches('/');

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|c| open + c) else {
                break;
            };
            let key = &rest[open + 1..close];
            let value = params.get(key).ok_or_else(|| ResolveError::MissingParameter {
                route: name.to_string(),
                param: key.to_string(),
            })?;

            path.push_str(&rest[..open]);
            path.extend(utf8_percent_encode(value, SEGMENT));
            used.push(key);
            rest = &rest[close + 1..];
        }
        path.push_str(rest);

        let extra: Vec<_> = params
            .iter()
            .filter(|(k, _)| !used.contains(&k.as_str()))
            .collect();
        if !extra.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(extra)
                .finish();
            path.push('?');
            path.push_str(&query);
        }

        Ok(path)
    }
}

impl UrlGenerator for RouteTable {
    fn generate(
        &self,
        name: &str,
        params: &RouteParams,
        absolute: bool,
    ) -> Result<String, ResolveError> {
        let path = self.path(name, params)?;
        if absolute {
            Ok(self.base_url.join(&path)?.to_string())
        } else {
            Ok(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RouteParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn table() -> RouteTable {
        RouteTable::new("https://example.com")
            .unwrap()
            .with_routes([("home", "/"), ("post", "/posts/{slug}"), ("tag", "/tags/{tag}/{page}")])
    }

    #[test]
    fn test_literal_passes_through() {
        let table = table();
        let route = RouteRef::url("/x");
        assert_eq!(route.resolve(&table, true).unwrap(), "/x");
        assert_eq!(route.resolve_default(&table).unwrap(), "/x");
    }

    #[test]
    fn test_named_absolute_and_relative() {
        let table = table();
        let route = RouteRef::named("post", params(&[("slug", "hello")]));
        assert_eq!(
            route.resolve(&table, true).unwrap(),
            "https://example.com/posts/hello"
        );
        assert_eq!(route.resolve_default(&table).unwrap(), "/posts/hello");
    }

    #[test]
    fn test_home_absolute() {
        let table = table();
        assert_eq!(
            table.generate("home", &RouteParams::new(), true).unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_placeholders_are_encoded() {
        let table = table();
        let url = table
            .generate("post", &params(&[("slug", "hello world/2")]), false)
            .unwrap();
        assert_eq!(url, "/posts/hello%20world%2F2");
    }

    #[test]
    fn test_extra_params_become_query() {
        let table = table();
        let url = table
            .generate("post", &params(&[("slug", "a"), ("utm", "rss feed"), ("page", "2")]), false)
            .unwrap();
        assert_eq!(url, "/posts/a?page=2&utm=rss+feed");
    }

    #[test]
    fn test_multiple_placeholders() {
        let table = table();
        let url = table
            .generate("tag", &params(&[("tag", "rust"), ("page", "3")]), true)
            .unwrap();
        assert_eq!(url, "https://example.com/tags/rust/3");
    }

    #[test]
    fn test_unknown_route() {
        let table = table();
        let err = table.generate("nope", &RouteParams::new(), true).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownRoute(ref n) if n == "nope"));
    }

    #[test]
    fn test_missing_parameter() {
        let table = table();
        let err = table.generate("post", &RouteParams::new(), true).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MissingParameter { ref route, ref param }
                if route == "post" && param == "slug"
        ));
    }

    #[test]
    fn test_base_path_prefix() {
        for base in ["https://example.com/blog/", "https://example.com/blog"] {
            let table = RouteTable::new(base)
                .unwrap()
                .with_routes([("home", "/"), ("post", "/posts/{slug}")]);
            let slug = params(&[("slug", "a")]);
            assert_eq!(
                table.generate("post", &slug, true).unwrap(),
                "https://example.com/blog/posts/a"
            );
            assert_eq!(table.generate("post", &slug, false).unwrap(), "/blog/posts/a");
            assert_eq!(
                table.generate("home", &RouteParams::new(), true).unwrap(),
                "https://example.com/blog/"
            );
        }
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            RouteTable::new("not a url"),
            Err(ResolveError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_route_ref_deserialize() {
        #[derive(Deserialize)]
        struct Holder {
            a: RouteRef,
            b: RouteRef,
        }

        let holder: Holder = toml::from_str(
            "a = \"/literal\"\nb = { name = \"post\", params = { slug = \"x\" } }",
        )
        .unwrap();
        assert_eq!(holder.a, RouteRef::url("/literal"));
        assert_eq!(holder.b, RouteRef::named("post", params(&[("slug", "x")])));
    }
}
