//! Grammar table types.
//!
//! The grammar is data: an ordered map from command name to a
//! [`CommandDescriptor`] plus the global flag list. The completion dispatcher
//! walks this table instead of branching per command.

use indexmap::IndexMap;
use kubeline_types::{ResourceKind, Suggestion};
use once_cell::sync::Lazy;

use crate::{commands, flags};

static KUBECTL: Lazy<GrammarTable> = Lazy::new(|| GrammarTable::new(commands::descriptors(), flags::GLOBAL));

/// Which files a path-valued flag offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFilter {
    /// Directories plus `*.yaml`, `*.yml` and `*.json` files.
    Manifests,
    /// Every directory entry.
    Any,
}

impl PathFilter {
    pub fn accepts_file(self, file_name: &str) -> bool {
        match self {
            PathFilter::Any => true,
            PathFilter::Manifests => {
                let lower = file_name.to_ascii_lowercase();
                lower.ends_with(".yaml") || lower.ends_with(".yml") || lower.ends_with(".json")
            }
        }
    }
}

/// Value source of a flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagValue {
    /// Boolean flag; the next token is not its argument.
    Switch,
    /// Free-form value with nothing to offer.
    Text,
    Choices(&'static [&'static str]),
    /// Value written only as `--flag=value`; the bare flag is complete on
    /// its own, so the next token is never its argument.
    Attached(&'static [&'static str]),
    FilePath(PathFilter),
    Namespace,
    Context,
}

impl FlagValue {
    /// True when the token after the flag is its argument.
    pub fn takes_value(self) -> bool {
        !matches!(self, FlagValue::Switch | FlagValue::Attached(_))
    }

    /// Fixed values accepted after `=`, if any.
    pub fn choices(self) -> &'static [&'static str] {
        match self {
            FlagValue::Choices(items) | FlagValue::Attached(items) => items,
            _ => &[],
        }
    }
}

/// One flag of a command (or a global flag).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlagSpec {
    pub long: &'static str,
    pub short: Option<&'static str>,
    pub description: &'static str,
    pub value: FlagValue,
}

impl FlagSpec {
    pub const fn switch(long: &'static str, short: Option<&'static str>, description: &'static str) -> Self {
        Self {
            long,
            short,
            description,
            value: FlagValue::Switch,
        }
    }

    pub const fn value(long: &'static str, short: Option<&'static str>, description: &'static str, value: FlagValue) -> Self {
        Self {
            long,
            short,
            description,
            value,
        }
    }

    /// Every spelling of the flag, short form first.
    pub fn forms(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.short.into_iter().chain(std::iter::once(self.long))
    }

    /// True when `token` is exactly one of the flag's spellings.
    pub fn is_named(&self, token: &str) -> bool {
        self.long == token || self.short == Some(token)
    }
}

/// How typed text is matched against cache-backed names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Matching {
    Prefix,
    #[default]
    Substring,
}

/// Completion source for one positional slot of a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Positional {
    /// Static list, prefix matched.
    Choices(Vec<Suggestion>),
    /// Names of objects of the given kinds, concatenated in kind order.
    Resources { kinds: Vec<ResourceKind>, matching: Matching },
    /// Names of objects of the kind named by the previous positional token.
    ResourceOfPrevious,
    /// Nested positional selected by the previous positional token.
    Keyed(Vec<(&'static str, Positional)>),
}

impl Positional {
    pub fn resources(kind: ResourceKind) -> Self {
        Positional::Resources {
            kinds: vec![kind],
            matching: Matching::Substring,
        }
    }

    pub fn choices(items: &[(&str, &str)]) -> Self {
        Positional::Choices(items.iter().map(|item| Suggestion::from(*item)).collect())
    }

    /// Resolves a `Keyed` table entry for `previous`. Other variants return
    /// themselves.
    pub fn select(&self, previous: &str) -> Option<&Positional> {
        match self {
            Positional::Keyed(table) => table
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(previous))
                .map(|(_, positional)| positional),
            other => Some(other),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    /// Alternate spellings kubectl accepts for the command.
    pub aliases: &'static [&'static str],
    pub flags: &'static [FlagSpec],
    /// Completion sources for depth 1, 2, ...
    pub positionals: Vec<Positional>,
}

impl CommandDescriptor {
    pub fn new(name: &'static str, description: &'static str, flags: &'static [FlagSpec]) -> Self {
        Self {
            name,
            description,
            aliases: &[],
            flags,
            positionals: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_positional(mut self, positional: Positional) -> Self {
        self.positionals.push(positional);
        self
    }

    /// Source for the positional at `depth` (1-based).
    pub fn positional(&self, depth: usize) -> Option<&Positional> {
        depth.checked_sub(1).and_then(|index| self.positionals.get(index))
    }
}

/// Immutable lookup table for commands and flags.
#[derive(Debug)]
pub struct GrammarTable {
    commands: IndexMap<&'static str, CommandDescriptor>,
    command_suggestions: Vec<Suggestion>,
    global_flags: &'static [FlagSpec],
}

impl GrammarTable {
    pub fn new(descriptors: Vec<CommandDescriptor>, global_flags: &'static [FlagSpec]) -> Self {
        let command_suggestions = descriptors
            .iter()
            .map(|descriptor| Suggestion::new(descriptor.name, descriptor.description))
            .collect();
        let commands = descriptors
            .into_iter()
            .map(|descriptor| (descriptor.name, descriptor))
            .collect();
        Self {
            commands,
            command_suggestions,
            global_flags,
        }
    }

    /// The built-in kubectl grammar.
    pub fn kubectl() -> &'static GrammarTable {
        &KUBECTL
    }

    /// Looks a command up by name or alias.
    pub fn command(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name).or_else(|| {
            self.commands
                .values()
                .find(|descriptor| descriptor.aliases.contains(&name))
        })
    }

    /// Top-level commands in table order.
    pub fn commands(&self) -> &[Suggestion] {
        &self.command_suggestions
    }

    pub fn global_flags(&self) -> &'static [FlagSpec] {
        self.global_flags
    }

    /// The command's own flags followed by the global flags. An unknown or
    /// missing command yields the global flags only.
    pub fn flags_for<'a>(&'a self, command: Option<&str>) -> impl Iterator<Item = &'a FlagSpec> + 'a {
        let own: &'static [FlagSpec] = command
            .and_then(|name| self.command(name))
            .map(|descriptor| descriptor.flags)
            .unwrap_or(flags::NONE);
        own.iter().chain(self.global_flags.iter())
    }

    /// Resolves a flag token in the context of `command`.
    ///
    /// The command's own flags shadow the globals, so `-f` means `--follow`
    /// under `logs` and `--filename` elsewhere.
    pub fn flag(&self, command: Option<&str>, token: &str) -> Option<&FlagSpec> {
        self.flags_for(command).find(|flag| flag.is_named(token))
    }

    /// Like [`GrammarTable::flag`], but a flag unknown to the command is
    /// looked up across every command so that a mistyped or unlisted command
    /// name does not change how its flags are read.
    pub fn resolve_flag(&self, command: Option<&str>, token: &str) -> Option<&FlagSpec> {
        self.flag(command, token).or_else(|| {
            self.commands
                .values()
                .flat_map(|descriptor| descriptor.flags.iter())
                .find(|flag| flag.is_named(token))
        })
    }

    /// True when `token` is a flag whose argument is the next token.
    ///
    /// `--flag=value` tokens carry their own value.
    pub fn takes_value(&self, command: Option<&str>, token: &str) -> bool {
        if token.contains('=') {
            return false;
        }
        self.resolve_flag(command, token)
            .is_some_and(|flag| flag.value.takes_value())
    }
}
