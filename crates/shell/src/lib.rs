//! Interactive kubectl shell.
//!
//! [`completion::Completer`] turns a partially typed line into suggestions,
//! [`executor::Executor`] forwards finished lines to kubectl, and
//! [`repl::Repl`] ties both to a line editor.

pub mod completion;
pub mod executor;
pub mod repl;

pub use completion::{ArgumentContext, Completer};
pub use executor::{Executor, SubmitOutcome};
pub use repl::{LineCompleter, Repl, ReplOptions};
