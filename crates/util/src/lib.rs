//! Utility helpers shared by the kubeline crates: line splitting, suggestion
//! filters, path expansion, and the shell settings file.

pub mod matching;
pub mod path_processing;
pub mod settings;
pub mod shell_lexing;

pub use matching::{filter_contains, filter_has_prefix};
pub use path_processing::expand_tilde;
pub use settings::{SETTINGS_PATH_ENV, SettingsError, ShellSettings, default_settings_path, kubeline_config_dir};
pub use shell_lexing::{LexToken, split_on_spaces, split_on_spaces_ranged, text_before_cursor, word_before_cursor};
