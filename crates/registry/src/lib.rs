//! Grammar of the wrapped kubectl command line.
//!
//! This crate holds the static command table used by the completion
//! dispatcher (commands, their positional slots, and their flags) and a
//! parser that turns `kubectl <command> --help` output into flag suggestions.

mod commands;
mod flags;
pub mod grammar;
pub mod help_import;

pub use commands::RESOURCE_TYPES;
pub use grammar::{CommandDescriptor, FlagSpec, FlagValue, GrammarTable, Matching, PathFilter, Positional};
pub use help_import::{HelpParseError, suggestions_from_help};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Command names and aliases must be unique or lookups become ambiguous.
    #[test]
    fn command_names_are_unique() {
        let grammar = GrammarTable::kubectl();
        let mut seen = HashSet::new();
        for suggestion in grammar.commands() {
            assert!(seen.insert(suggestion.text()), "duplicate command {}", suggestion.text());
            let descriptor = grammar.command(suggestion.text()).expect("descriptor");
            for alias in descriptor.aliases {
                assert!(seen.insert(alias), "alias {alias} collides");
            }
        }
    }

    #[test]
    fn every_flag_is_dash_prefixed() {
        let grammar = GrammarTable::kubectl();
        for suggestion in grammar.commands() {
            for flag in grammar.flags_for(Some(suggestion.text())) {
                assert!(flag.long.starts_with("--"), "{} in {}", flag.long, suggestion.text());
                if let Some(short) = flag.short {
                    assert!(short.starts_with('-') && !short.starts_with("--"), "{short}");
                }
            }
        }
    }
}
