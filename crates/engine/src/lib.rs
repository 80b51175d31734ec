//! Data sources behind kubeline completions.
//!
//! - [`cache`]: resource-name snapshots refreshed in the background
//! - [`paths`]: filesystem listing for path-valued flags
//! - [`kubeconfig`]: default namespace from the local kubeconfig

pub mod cache;
pub mod kubeconfig;
pub mod paths;

pub use cache::{CacheSettings, FetchError, KubectlFetcher, NullFetcher, ResourceCache, ResourceFetcher};
pub use kubeconfig::{KubeconfigError, KubeconfigNamespace, NamespaceSource, StaticNamespace};
pub use paths::{LocalPathLister, PathEntry, PathLister, complete_path};
