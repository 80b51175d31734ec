use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// A single completion candidate: the text to insert plus an optional
/// human-readable description.
///
/// Suggestions are immutable once built and compare by value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
}

/// Point-in-time list of suggestions for one cache key.
///
/// Snapshots are replaced wholesale and shared by reference count, so a
/// reader holding one never observes a partially updated list.
pub type Snapshot = Arc<[Suggestion]>;

impl Suggestion {
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
        }
    }

    /// Suggestion without a description.
    pub fn bare(text: impl Into<String>) -> Self {
        Self::new(text, String::new())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Description shown next to the text; empty when none is known.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            f.write_str(&self.text)
        } else {
            write!(f, "{}\t{}", self.text, self.description)
        }
    }
}

impl From<(&str, &str)> for Suggestion {
    fn from((text, description): (&str, &str)) -> Self {
        Self::new(text, description)
    }
}
