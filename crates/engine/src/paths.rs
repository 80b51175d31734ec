//! Filesystem listing for path-valued flags.

use std::io;

use kubeline_types::Suggestion;
use kubeline_util::{expand_tilde, matching::has_prefix};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Lists directory entries whose name starts with a prefix.
pub trait PathLister: Send + Sync {
    /// Entries of `directory` whose name starts with `name_prefix`
    /// (case-insensitive). Directories are always kept; files only when
    /// `accept_file` returns true for their name.
    fn list(&self, directory: &str, name_prefix: &str, accept_file: &dyn Fn(&str) -> bool) -> io::Result<Vec<PathEntry>>;
}

/// Lists the local filesystem. A leading `~` is expanded; results are sorted
/// by name.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalPathLister;

impl PathLister for LocalPathLister {
    fn list(&self, directory: &str, name_prefix: &str, accept_file: &dyn Fn(&str) -> bool) -> io::Result<Vec<PathEntry>> {
        let directory = if directory.is_empty() { "." } else { directory };
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(expand_tilde(directory))? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !has_prefix(&name, name_prefix, true) {
                continue;
            }
            let is_dir = entry.path().is_dir();
            if is_dir || accept_file(&name) {
                entries.push(PathEntry { name, is_dir });
            }
        }
        entries.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(entries)
    }
}

/// Completes a partially typed path.
///
/// The text up to the last `/` selects the directory; the remainder is the
/// name prefix. Suggestions carry the joined path, and directories end in
/// `/` so completion can continue into them.
pub fn complete_path(lister: &dyn PathLister, partial: &str, accept_file: &dyn Fn(&str) -> bool) -> io::Result<Vec<Suggestion>> {
    let (directory, name_prefix) = match partial.rfind('/') {
        Some(index) => partial.split_at(index + 1),
        None => ("", partial),
    };
    let entries = lister.list(directory, name_prefix, accept_file)?;
    Ok(entries
        .into_iter()
        .map(|entry| {
            let suffix = if entry.is_dir { "/" } else { "" };
            Suggestion::bare(format!("{directory}{}{suffix}", entry.name))
        })
        .collect())
}
