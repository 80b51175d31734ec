//! Import of flag suggestions from `kubectl <command> --help` output.
//!
//! Two layouts are understood. Older kubectl prints each flag on one line
//! with the description after `: ` and wraps at column 0:
//!
//! ```text
//! Options:
//!   -A, --all-namespaces=false: If present, list the requested object(s) across all namespaces.
//!       --chunk-size=500: Return large lists in chunks rather than all at
//! once.
//! ```
//!
//! Newer kubectl puts the description on tab-indented lines below the flag
//! and separates entries with blank lines.

use kubeline_types::Suggestion;
use thiserror::Error;
use tracing::debug;

const OPTIONS_HEADER: &str = "\nOptions:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HelpParseError {
    #[error("help text has no Options section")]
    MissingOptions,
    #[error("flag entry without a description separator: {0}")]
    MalformedEntry(String),
}

/// Parses the `Options:` section of a kubectl help text into one suggestion
/// per flag spelling, in the order the help text lists them.
pub fn suggestions_from_help(help: &str) -> Result<Vec<Suggestion>, HelpParseError> {
    let section = options_section(help)?;
    let entries = split_entries(&section);
    debug!(entries = entries.len(), "parsed options section");
    let mut suggestions = Vec::new();
    for entry in entries {
        suggestions.extend(entry_to_suggestions(&entry)?);
    }
    Ok(suggestions)
}

/// Returns the raw lines of the `Options:` section.
fn options_section(help: &str) -> Result<Vec<&str>, HelpParseError> {
    let (_, rest) = help.split_once(OPTIONS_HEADER).ok_or(HelpParseError::MissingOptions)?;
    let lines: Vec<&str> = rest.lines().collect();
    let mut section = Vec::new();
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        if line.trim().is_empty() {
            // A blank line ends the section unless another flag entry follows.
            let next = lines[index + 1..].iter().find(|candidate| !candidate.trim().is_empty());
            match next {
                Some(next) if starts_entry(next) => {}
                _ if section.is_empty() => {}
                _ => break,
            }
        } else {
            section.push(line);
        }
        index += 1;
    }
    Ok(section)
}

fn starts_entry(line: &str) -> bool {
    line.starts_with(char::is_whitespace) && line.trim_start().starts_with('-')
}

/// Groups lines into entries; a line that does not start an entry continues
/// the previous one.
fn split_entries(lines: &[&str]) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    for line in lines {
        let text = line.trim();
        match entries.last_mut() {
            Some(current) if !starts_entry(line) => {
                current.push(' ');
                current.push_str(text);
            }
            _ => entries.push(text.to_string()),
        }
    }
    entries
}

fn entry_to_suggestions(entry: &str) -> Result<Vec<Suggestion>, HelpParseError> {
    let (keys, description) = match entry.split_once(": ") {
        Some((keys, description)) => (keys, description.trim()),
        None => match entry.strip_suffix(':') {
            Some(keys) => (keys, ""),
            None => return Err(HelpParseError::MalformedEntry(entry.to_string())),
        },
    };
    Ok(keys
        .split(", ")
        .map(|key| {
            let name = key.split_once('=').map_or(key, |(name, _)| name).trim();
            Suggestion::new(name, description)
        })
        .collect())
}
