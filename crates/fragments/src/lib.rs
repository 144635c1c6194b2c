//! Fragment loading and site-level collaborators.
//!
//! A fragment is a reusable chunk of authored content, fetched and parsed
//! independently from the main page. This crate owns the loader abstraction
//! plus the small site services decorators lean on: locale-aware path
//! building, page metadata lookup, the one-shot fetch cache, and the
//! persisted preference store.

pub mod cache;
pub mod config;
pub mod loader;
pub mod metadata;
pub mod prefs;

pub use cache::FetchCache;
pub use config::{Locale, SiteConfig};
pub use loader::{Fragment, FragmentLoader, HttpLoader, StaticLoader};
pub use metadata::page_metadata;
pub use prefs::{JsonFileStore, MemoryStore, PreferenceStore};
