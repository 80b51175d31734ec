//! Argument context extraction.
//!
//! Turns the text before the cursor into the facts the dispatcher branches
//! on: the command path (positional tokens only), the flag the cursor
//! follows, and the word being typed.

use kubeline_types::NamespaceScope;
use kubeline_util::split_on_spaces;

const PIPE: &str = "|";

/// Read-only view of a partially typed line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgumentContext {
    /// Positional tokens: no flags, no flag values, no empty tokens. Ends
    /// with the partial word when that word is a positional.
    pub command_path: Vec<String>,
    /// Token immediately before the partial word, when it starts with `-`.
    pub active_flag: Option<String>,
    pub partial_word: String,
    pub long_flag_style: bool,
    /// Namespace named anywhere in the full line.
    pub namespace_override: Option<NamespaceScope>,
    /// A `|` token appears before the cursor.
    pub pipeline: bool,
    /// The partial word is the argument of a value-taking flag.
    pub partial_is_flag_value: bool,
}

impl ArgumentContext {
    /// Builds the context for `text_before_cursor`.
    ///
    /// `takes_value(command, flag)` reports whether `flag` consumes the next
    /// token; `full_line` is scanned for a namespace override regardless of
    /// the cursor position.
    pub fn extract(text_before_cursor: &str, full_line: &str, takes_value: impl Fn(Option<&str>, &str) -> bool) -> Self {
        let tokens = split_on_spaces(text_before_cursor);
        let Some((&partial, preceding)) = tokens.split_last() else {
            return Self::default();
        };

        let active_flag = preceding
            .last()
            .filter(|token| token.starts_with('-'))
            .map(|token| token.to_string());

        let mut command_path: Vec<String> = Vec::new();
        let mut awaiting_value = false;
        for token in preceding.iter().filter(|token| !token.is_empty()) {
            if awaiting_value {
                awaiting_value = false;
                continue;
            }
            if token.starts_with('-') {
                let command = command_path.first().map(String::as_str);
                awaiting_value = takes_value(command, *token);
                continue;
            }
            command_path.push(token.to_string());
        }
        if !awaiting_value && !partial.starts_with('-') {
            command_path.push(partial.to_string());
        }

        Self {
            command_path,
            active_flag,
            partial_word: partial.to_string(),
            long_flag_style: partial.starts_with("--"),
            namespace_override: namespace_override(full_line),
            pipeline: tokens.contains(&PIPE),
            partial_is_flag_value: awaiting_value,
        }
    }

    /// The command name, when one has been typed.
    pub fn command(&self) -> Option<&str> {
        self.command_path.first().map(String::as_str)
    }

    /// Index of the positional being typed: 0 for the command itself.
    pub fn positional_depth(&self) -> usize {
        self.command_path.len().saturating_sub(1)
    }

    /// The positional token before the one being typed.
    pub fn previous_positional(&self) -> Option<&str> {
        let depth = self.positional_depth();
        depth
            .checked_sub(1)
            .and_then(|index| self.command_path.get(index))
            .map(String::as_str)
    }

    /// True when the line offers nothing to complete.
    pub fn is_terminal(&self) -> bool {
        self.pipeline || (self.command_path.is_empty() && self.partial_word.is_empty() && self.active_flag.is_none())
    }
}

/// Scans a whole line for `--namespace`/`-n` (space or `=` form) and
/// `--all-namespaces`/`-A`. All namespaces wins over a named one.
pub fn namespace_override(line: &str) -> Option<NamespaceScope> {
    let tokens: Vec<&str> = line.split(' ').filter(|token| !token.is_empty()).collect();
    let mut named = None;
    for (index, token) in tokens.iter().enumerate() {
        match *token {
            "-A" | "--all-namespaces" | "--all-namespaces=true" => return Some(NamespaceScope::All),
            "-n" | "--namespace" if named.is_none() => {
                named = tokens.get(index + 1).map(|value| value.to_string());
            }
            _ if named.is_none() => {
                named = token
                    .strip_prefix("--namespace=")
                    .or_else(|| token.strip_prefix("-n="))
                    .filter(|value| !value.is_empty())
                    .map(str::to_string);
            }
            _ => {}
        }
    }
    named.map(NamespaceScope::Named)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn takes_value(_command: Option<&str>, flag: &str) -> bool {
        matches!(flag, "-n" | "--namespace" | "-o" | "--output" | "-f" | "--filename")
    }

    fn extract(text: &str) -> ArgumentContext {
        ArgumentContext::extract(text, text, takes_value)
    }

    #[test]
    fn empty_input_yields_terminal_context() {
        let context = extract("");
        assert_eq!(context, ArgumentContext::default());
        assert!(context.is_terminal());
    }

    #[test]
    fn single_token_is_depth_zero() {
        let context = extract("ge");
        assert_eq!(context.command_path, vec!["ge"]);
        assert_eq!(context.positional_depth(), 0);
        assert_eq!(context.partial_word, "ge");
        assert_eq!(context.active_flag, None);
    }

    #[test]
    fn trailing_space_starts_next_positional() {
        let context = extract("get ");
        assert_eq!(context.command_path, vec!["get", ""]);
        assert_eq!(context.positional_depth(), 1);
        assert_eq!(context.previous_positional(), Some("get"));
    }

    #[test]
    fn flag_values_do_not_count_as_positionals() {
        let context = extract("get -o wide po");
        assert_eq!(context.command_path, vec!["get", "po"]);
        assert_eq!(context.active_flag, None);

        let context = extract("get --watch po");
        assert_eq!(context.command_path, vec!["get", "po"]);
        assert_eq!(context.active_flag.as_deref(), Some("--watch"));
    }

    #[test]
    fn equals_form_keeps_next_token() {
        let context = extract("get -o=wide po");
        assert_eq!(context.command_path, vec!["get", "po"]);
    }

    #[test]
    fn consecutive_spaces_are_ignored_for_depth() {
        let context = extract("describe  pods  ngin");
        assert_eq!(context.command_path, vec!["describe", "pods", "ngin"]);
        assert_eq!(context.positional_depth(), 2);
        assert_eq!(context.previous_positional(), Some("pods"));
    }

    #[test]
    fn partial_after_value_flag_is_its_value() {
        let context = extract("get pods -n kube");
        assert_eq!(context.active_flag.as_deref(), Some("-n"));
        assert_eq!(context.command_path, vec!["get", "pods"]);
        assert!(context.partial_is_flag_value);
    }

    #[test]
    fn flag_partial_is_not_a_positional() {
        let context = extract("get --al");
        assert_eq!(context.command_path, vec!["get"]);
        assert!(context.long_flag_style);
        assert_eq!(context.partial_word, "--al");

        let context = extract("get -a");
        assert!(!context.long_flag_style);
    }

    #[test]
    fn pipe_anywhere_marks_pipeline() {
        assert!(extract("get pods | gr").pipeline);
        assert!(extract("get pods | ").is_terminal());
        assert!(!extract("get pods|").pipeline);
    }

    #[test]
    fn namespace_override_reads_whole_line() {
        let line = "get pods ngin -n kube-system";
        let context = ArgumentContext::extract("get pods ngin", line, takes_value);
        assert_eq!(context.namespace_override, Some(NamespaceScope::Named("kube-system".into())));

        assert_eq!(namespace_override("get --namespace=web pods"), Some(NamespaceScope::Named("web".into())));
        assert_eq!(namespace_override("get -n=web pods"), Some(NamespaceScope::Named("web".into())));
        assert_eq!(namespace_override("get pods -A"), Some(NamespaceScope::All));
        assert_eq!(namespace_override("get pods -n web --all-namespaces"), Some(NamespaceScope::All));
        assert_eq!(namespace_override("get pods -n"), None);
        assert_eq!(namespace_override("get pods"), None);
    }
}
