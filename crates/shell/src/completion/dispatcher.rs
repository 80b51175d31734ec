use std::{collections::HashSet, sync::Arc};

use kubeline_engine::{NamespaceSource, PathLister, ResourceCache, complete_path};
use kubeline_registry::{FlagSpec, FlagValue, GrammarTable, Matching, Positional};
use kubeline_types::{CacheKey, NamespaceScope, ResourceKind, Suggestion};
use kubeline_util::{filter_contains, filter_has_prefix, matching, text_before_cursor};
use tracing::{trace, warn};

use super::context::ArgumentContext;

/// Maps a partially typed line to an ordered list of suggestions.
///
/// `complete` is total: unknown commands, unmapped resource kinds, cache
/// misses and listing failures all produce an empty list.
pub struct Completer {
    grammar: &'static GrammarTable,
    cache: Arc<ResourceCache>,
    namespaces: Arc<dyn NamespaceSource>,
    paths: Arc<dyn PathLister>,
}

impl Completer {
    pub fn new(cache: Arc<ResourceCache>, namespaces: Arc<dyn NamespaceSource>, paths: Arc<dyn PathLister>) -> Self {
        Self {
            grammar: GrammarTable::kubectl(),
            cache,
            namespaces,
            paths,
        }
    }

    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }

    pub fn namespaces(&self) -> &Arc<dyn NamespaceSource> {
        &self.namespaces
    }

    /// Extracts the argument context of `line` up to `cursor` (a byte
    /// offset, clamped to the line).
    pub fn context(&self, line: &str, cursor: usize) -> ArgumentContext {
        let before = text_before_cursor(line, cursor);
        ArgumentContext::extract(before, line, |command, flag| self.grammar.takes_value(command, flag))
    }

    pub fn complete(&self, line: &str, cursor: usize) -> Vec<Suggestion> {
        let context = self.context(line, cursor);
        let suggestions = self.complete_context(&context);
        trace!(
            command = context.command().unwrap_or_default(),
            depth = context.positional_depth(),
            partial = %context.partial_word,
            suggestion_count = suggestions.len(),
            "completed line"
        );
        suggestions
    }

    fn complete_context(&self, context: &ArgumentContext) -> Vec<Suggestion> {
        if context.is_terminal() {
            return Vec::new();
        }
        if context.partial_word.starts_with('-') {
            return self.complete_flag_name(context);
        }
        if let Some(suggestions) = self.complete_flag_value(context) {
            return suggestions;
        }
        self.complete_positional(context)
    }

    // ===== Flags =====

    fn complete_flag_name(&self, context: &ArgumentContext) -> Vec<Suggestion> {
        if let Some((name, value)) = context.partial_word.split_once('=') {
            return self.complete_inline_value(context, name, value);
        }
        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();
        let mut push = |text: &'static str, flag: &FlagSpec| {
            if seen.insert(text) {
                suggestions.push(Suggestion::new(text, flag.description));
            }
        };

        let flags = self.grammar.flags_for(context.command());
        if context.long_flag_style {
            let fragment = &context.partial_word[2..];
            for flag in flags {
                if matching::has_prefix(flag.long.trim_start_matches('-'), fragment, true) {
                    push(flag.long, flag);
                }
            }
        } else {
            let fragment = &context.partial_word[1..];
            for flag in flags {
                let hit = flag
                    .forms()
                    .any(|form| matching::contains(form.trim_start_matches('-'), fragment, true));
                if hit {
                    for form in flag.forms() {
                        push(form, flag);
                    }
                }
            }
        }
        suggestions
    }

    /// `--flag=partial`: the flag's fixed values, each written out with the
    /// flag as typed.
    fn complete_inline_value(&self, context: &ArgumentContext, name: &str, partial: &str) -> Vec<Suggestion> {
        let Some(flag) = self.grammar.resolve_flag(context.command(), name) else {
            return Vec::new();
        };
        flag.value
            .choices()
            .iter()
            .filter(|choice| matching::has_prefix(choice, partial, true))
            .map(|choice| Suggestion::bare(format!("{name}={choice}")))
            .collect()
    }

    fn active_flag(&self, context: &ArgumentContext) -> Option<&'static FlagSpec> {
        let token = context.active_flag.as_deref()?;
        let grammar: &'static GrammarTable = self.grammar;
        grammar.resolve_flag(context.command(), token)
    }

    /// Suggestions for the value of the flag before the cursor. `None` when
    /// there is no such flag or it is a switch, so positional completion
    /// applies instead.
    fn complete_flag_value(&self, context: &ArgumentContext) -> Option<Vec<Suggestion>> {
        let flag = self.active_flag(context)?;
        let partial = context.partial_word.as_str();
        let suggestions = match flag.value {
            FlagValue::Switch | FlagValue::Attached(_) => return None,
            FlagValue::Text => Vec::new(),
            FlagValue::Choices(items) => {
                let choices: Vec<Suggestion> = items.iter().map(|item| Suggestion::bare(*item)).collect();
                filter_has_prefix(&choices, partial, true)
            }
            FlagValue::FilePath(filter) => {
                let accept = |name: &str| filter.accepts_file(name);
                complete_path(self.paths.as_ref(), partial, &accept).unwrap_or_else(|error| {
                    warn!(flag = flag.long, partial = %partial, error = %error, "path completion failed");
                    Vec::new()
                })
            }
            FlagValue::Namespace => {
                let snapshot = self.cache.read(&CacheKey::cluster(ResourceKind::Namespace));
                filter_has_prefix(&snapshot, partial, true)
            }
            FlagValue::Context => {
                let snapshot = self.cache.read(&CacheKey::cluster(ResourceKind::Context));
                filter_has_prefix(&snapshot, partial, true)
            }
        };
        Some(suggestions)
    }

    // ===== Positionals =====

    fn complete_positional(&self, context: &ArgumentContext) -> Vec<Suggestion> {
        if context.partial_is_flag_value {
            return Vec::new();
        }
        let partial = context.partial_word.as_str();
        if context.positional_depth() == 0 {
            return filter_has_prefix(self.grammar.commands(), partial, true);
        }
        let Some(positional) = self.positional(context) else {
            return Vec::new();
        };
        match positional {
            Positional::Choices(items) => filter_has_prefix(items, partial, true),
            Positional::Resources { kinds, matching: policy } => {
                let names: Vec<Suggestion> = kinds
                    .iter()
                    .flat_map(|kind| self.cache.read(&self.cache_key(*kind, context)).to_vec())
                    .collect();
                match policy {
                    Matching::Prefix => filter_has_prefix(&names, partial, true),
                    Matching::Substring => filter_contains(&names, partial, true),
                }
            }
            Positional::ResourceOfPrevious => match self.kind_of_previous(context) {
                Some(kind) => filter_contains(&self.cache.read(&self.cache_key(kind, context)), partial, true),
                None => Vec::new(),
            },
            // `positional` resolves keyed tables.
            Positional::Keyed(_) => Vec::new(),
        }
    }

    /// Grammar slot for the positional being typed, with keyed tables
    /// resolved against the previous positional token.
    fn positional(&self, context: &ArgumentContext) -> Option<&'static Positional> {
        let grammar: &'static GrammarTable = self.grammar;
        let descriptor = grammar.command(context.command()?)?;
        let positional = descriptor.positional(context.positional_depth())?;
        positional.select(context.previous_positional()?)
    }

    fn kind_of_previous(&self, context: &ArgumentContext) -> Option<ResourceKind> {
        context.previous_positional().and_then(ResourceKind::from_alias)
    }

    fn cache_key(&self, kind: ResourceKind, context: &ArgumentContext) -> CacheKey {
        if !kind.is_namespaced() {
            return CacheKey::cluster(kind);
        }
        let scope = context
            .namespace_override
            .clone()
            .unwrap_or_else(|| NamespaceScope::Named(self.namespaces.current_namespace()));
        CacheKey::new(kind, scope)
    }
}
