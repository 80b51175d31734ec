//! # Kubeline shared types
//!
//! Leaf value types used by every other crate in the workspace: the
//! [`Suggestion`] shown by the completion menu, the [`ResourceKind`]s the
//! grammar can complete names for, and the [`CacheKey`] identifying one
//! resource cache entry.

mod resource;
mod suggestion;

pub use resource::{CacheKey, NamespaceScope, ResourceKind};
pub use suggestion::{Snapshot, Suggestion};
