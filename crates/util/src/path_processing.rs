use std::path::{MAIN_SEPARATOR, PathBuf};

use dirs_next::home_dir;

/// Expands a leading `~` (alone or followed by a separator) to the user's
/// home directory. Surrounding whitespace is trimmed; `~user` forms and
/// paths without a home directory are returned as typed.
pub fn expand_tilde(path: &str) -> PathBuf {
    let path = path.trim();
    let Some(rest) = path.strip_prefix('~') else {
        return PathBuf::from(path);
    };
    let home = match home_dir() {
        Some(home) => home,
        None => return PathBuf::from(path),
    };
    if rest.is_empty() {
        return home;
    }
    match rest.strip_prefix('/').or_else(|| rest.strip_prefix(MAIN_SEPARATOR)) {
        Some(relative) => home.join(relative),
        None => PathBuf::from(path),
    }
}
