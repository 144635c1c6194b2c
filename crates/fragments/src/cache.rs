//! One-shot fragment fetch cache.
//!
//! Optional fragments are fetched at most once per key. The outcome is cached
//! either way: a failed or missing fragment is remembered as a permanent
//! negative result and never retried.

use crate::loader::{Fragment, FragmentLoader};
use log::debug;
use std::collections::HashMap;

#[derive(Default)]
pub struct FetchCache {
    entries: HashMap<String, Option<Fragment>>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The cached fragment for `key`, if the fetch happened and succeeded.
    pub fn get(&self, key: &str) -> Option<&Fragment> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    /// Record a fetch outcome computed elsewhere (used when several fetches
    /// run concurrently and settle one by one).
    pub fn insert_outcome(&mut self, key: impl Into<String>, outcome: Option<Fragment>) {
        self.entries.insert(key.into(), outcome);
    }

    /// Fetch `path` under `key` unless an outcome is already cached. Returns
    /// the cached fragment on success, `None` on a (now permanent) failure.
    pub async fn fetch_once<L: FragmentLoader>(
        &mut self,
        loader: &L,
        key: &str,
        path: &str,
    ) -> Option<&Fragment> {
        if !self.entries.contains_key(key) {
            let outcome = match loader.load(path).await {
                Ok(fragment) => Some(fragment),
                Err(error) => {
                    debug!("optional fragment {path} unavailable: {error:#}");
                    None
                }
            };
            self.entries.insert(key.to_string(), outcome);
        }
        self.get(key)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "test assertions")]

    use super::*;
    use crate::loader::StaticLoader;

    #[tokio::test]
    async fn failure_is_cached_and_not_retried() {
        let mut loader = StaticLoader::new();
        let mut cache = FetchCache::new();

        assert!(cache.fetch_once(&loader, "products", "/nav/products").await.is_none());
        assert!(cache.contains("products"));

        // The fragment shows up later, but the negative outcome stands.
        loader.insert("/nav/products", "<div><p>late</p></div>");
        assert!(cache.fetch_once(&loader, "products", "/nav/products").await.is_none());
    }

    #[tokio::test]
    async fn success_is_served_from_cache() {
        let mut loader = StaticLoader::new();
        loader.insert("/nav/products", "<div><p>ok</p></div>");
        let mut cache = FetchCache::new();

        assert!(cache.fetch_once(&loader, "products", "/nav/products").await.is_some());
        assert!(cache.get("products").is_some());
    }
}
