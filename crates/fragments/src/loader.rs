//! Fragment retrieval.
//!
//! Callers treat a load failure as "no such fragment" rather than a transient
//! error: secondary fragments (sub-navigation panels, the language menu)
//! simply degrade to plain links, while the primary header fragment is
//! load-bearing and its failure propagates.

use anyhow::{Context as _, Error, bail};
use dom::{DomTree, NodeId, parse_document, query};
use log::debug;
use std::collections::HashMap;
use url::Url;

/// A parsed content fragment. The tree is owned exclusively by whichever
/// decorator requested it and is discarded when that decorator is done.
pub struct Fragment {
    tree: DomTree,
    root: NodeId,
}

impl Fragment {
    /// Parse authored markup into a fragment. The fragment root is the body
    /// element html5ever wraps the content in.
    pub fn parse(html: &str) -> Result<Self, Error> {
        let tree = parse_document(html);
        let Some(root) = query::body(&tree) else {
            bail!("fragment markup produced no content root");
        };
        Ok(Self { tree, root })
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }
}

/// Asynchronous source of fragments, keyed by site-relative path.
pub trait FragmentLoader {
    fn load(&self, path: &str) -> impl Future<Output = Result<Fragment, Error>>;
}

/// Loads fragments over HTTP. Paths resolve against a base URL and get the
/// `.plain.html` suffix the authoring system publishes fragments under.
pub struct HttpLoader {
    client: reqwest::Client,
    base: Url,
}

impl HttpLoader {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    fn resource_url(&self, path: &str) -> Result<Url, Error> {
        let resource = if path.contains('.') {
            path.to_string()
        } else {
            format!("{path}.plain.html")
        };
        self.base
            .join(&resource)
            .with_context(|| format!("invalid fragment path {path}"))
    }
}

impl FragmentLoader for HttpLoader {
    async fn load(&self, path: &str) -> Result<Fragment, Error> {
        let url = self.resource_url(path)?;
        debug!("loading fragment {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("fragment request failed for {url}"))?
            .error_for_status()
            .with_context(|| format!("no fragment at {url}"))?;
        let html = response
            .text()
            .await
            .with_context(|| format!("fragment body unreadable for {url}"))?;
        Fragment::parse(&html)
    }
}

/// In-memory loader: a fixed map from path to markup. Serves tests and any
/// embedding that ships its fragments alongside the binary.
#[derive(Default)]
pub struct StaticLoader {
    fragments: HashMap<String, String>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, html: impl Into<String>) {
        self.fragments.insert(path.into(), html.into());
    }
}

impl FragmentLoader for StaticLoader {
    async fn load(&self, path: &str) -> Result<Fragment, Error> {
        match self.fragments.get(path) {
            Some(html) => Fragment::parse(html),
            None => bail!("no fragment at {path}"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "test assertions")]

    use super::*;

    #[tokio::test]
    async fn static_loader_round_trip() {
        let mut loader = StaticLoader::new();
        loader.insert("/fragments/nav/header", "<div class=\"section\"><p>x</p></div>");
        let fragment = loader.load("/fragments/nav/header").await.expect("fragment");
        let sections = fragment.tree().child_elements(fragment.root());
        assert_eq!(sections.len(), 1);
    }

    #[tokio::test]
    async fn missing_path_is_an_error() {
        let loader = StaticLoader::new();
        assert!(loader.load("/fragments/nav/absent").await.is_err());
    }

    #[test]
    fn http_loader_appends_plain_suffix() {
        let loader = HttpLoader::new(Url::parse("https://example.com/").expect("url"));
        let url = loader.resource_url("/fragments/nav/header").expect("url");
        assert_eq!(url.as_str(), "https://example.com/fragments/nav/header.plain.html");
        let explicit = loader.resource_url("/media/clip.mp4").expect("url");
        assert_eq!(explicit.as_str(), "https://example.com/media/clip.mp4");
    }
}
