//! Completion engine.
//!
//! Modules:
//! - `context`: splits the text before the cursor into an [`ArgumentContext`]
//! - `dispatcher`: picks a suggestion source for a context and filters it

mod context;
mod dispatcher;

pub use context::{ArgumentContext, namespace_override};
pub use dispatcher::Completer;
