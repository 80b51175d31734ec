use kubeline_registry::{FlagValue, GrammarTable, Matching, PathFilter, Positional, RESOURCE_TYPES};
use kubeline_types::ResourceKind;

#[test]
fn command_table_keeps_declaration_order() {
    let grammar = GrammarTable::kubectl();
    let names: Vec<_> = grammar.commands().iter().map(|c| c.text()).collect();
    assert_eq!(&names[..4], &["get", "describe", "create", "replace"]);
    assert_eq!(names.last(), Some(&"exit"));
    assert!(names.contains(&"port-forward"), "got {:?}", names);
}

#[test]
fn aliases_resolve_to_their_command() {
    let grammar = GrammarTable::kubectl();
    assert_eq!(grammar.command("resize").map(|c| c.name), Some("scale"));
    assert_eq!(grammar.command("rollingupdate").map(|c| c.name), Some("rolling-update"));
    assert!(grammar.command("frobnicate").is_none());
}

#[test]
fn command_flags_shadow_globals() {
    let grammar = GrammarTable::kubectl();
    let follow = grammar.flag(Some("logs"), "-f").expect("logs -f");
    assert_eq!(follow.long, "--follow");
    assert_eq!(follow.value, FlagValue::Switch);

    let filename = grammar.flag(Some("get"), "-f").expect("get -f");
    assert_eq!(filename.value, FlagValue::FilePath(PathFilter::Manifests));
}

#[test]
fn flags_for_lists_command_flags_before_globals() {
    let grammar = GrammarTable::kubectl();
    let longs: Vec<_> = grammar.flags_for(Some("get")).map(|f| f.long).collect();
    let all_namespaces = longs.iter().position(|l| *l == "--all-namespaces").expect("own flag");
    let namespace = longs.iter().position(|l| *l == "--namespace").expect("global flag");
    assert!(all_namespaces < namespace);

    let unknown: Vec<_> = grammar.flags_for(Some("frobnicate")).map(|f| f.long).collect();
    let globals: Vec<_> = grammar.global_flags().iter().map(|f| f.long).collect();
    assert_eq!(unknown, globals);
}

#[test]
fn value_taking_flags_are_recognised() {
    let grammar = GrammarTable::kubectl();
    assert!(grammar.takes_value(Some("get"), "-o"));
    assert!(grammar.takes_value(Some("get"), "--namespace"));
    assert!(grammar.takes_value(None, "-n"));
    assert!(!grammar.takes_value(Some("get"), "-o=wide"));
    assert!(!grammar.takes_value(Some("get"), "--watch"));
    assert!(!grammar.takes_value(Some("logs"), "-f"));
    // Unknown command: any command's definition counts.
    assert!(grammar.takes_value(Some("gte"), "--selector"));
}

#[test]
fn typed_resource_commands_complete_kind_then_name() {
    let grammar = GrammarTable::kubectl();
    for name in ["get", "describe", "delete", "edit"] {
        let descriptor = grammar.command(name).expect(name);
        assert!(
            matches!(descriptor.positional(1), Some(Positional::Choices(items)) if items.len() == RESOURCE_TYPES.len()),
            "{name} depth 1"
        );
        assert_eq!(descriptor.positional(2), Some(&Positional::ResourceOfPrevious), "{name} depth 2");
        assert!(descriptor.positional(3).is_none());
    }
}

#[test]
fn node_commands_match_by_prefix() {
    let grammar = GrammarTable::kubectl();
    for name in ["cordon", "drain", "uncordon"] {
        let positional = grammar.command(name).and_then(|c| c.positional(1)).expect(name);
        assert_eq!(
            positional,
            &Positional::Resources {
                kinds: vec![ResourceKind::Node],
                matching: Matching::Prefix
            }
        );
    }
}

#[test]
fn config_context_subcommands_complete_contexts() {
    let grammar = GrammarTable::kubectl();
    let keyed = grammar.command("config").and_then(|c| c.positional(2)).expect("config depth 2");
    assert_eq!(
        keyed.select("use-context"),
        Some(&Positional::resources(ResourceKind::Context))
    );
    assert!(keyed.select("view").is_none());
}

#[test]
fn context_flag_is_context_valued() {
    let grammar = GrammarTable::kubectl();
    assert_eq!(grammar.flag(Some("get"), "--context").map(|f| f.value), Some(FlagValue::Context));
    assert_eq!(grammar.flag(None, "-n").map(|f| f.value), Some(FlagValue::Namespace));
}

#[test]
fn unknown_command_resolves_flags_from_any_command() {
    let grammar = GrammarTable::kubectl();
    assert!(grammar.flag(Some("gte"), "--selector").is_none());
    assert_eq!(grammar.resolve_flag(Some("gte"), "--selector").map(|f| f.long), Some("--selector"));
}

#[test]
fn optional_value_flags_do_not_consume_the_next_token() {
    let grammar = GrammarTable::kubectl();
    assert!(!grammar.takes_value(Some("delete"), "--dry-run"));
    assert!(!grammar.takes_value(Some("delete"), "--cascade"));
    assert!(!grammar.takes_value(Some("apply"), "--dry-run=client"));

    let dry_run = grammar.flag(Some("apply"), "--dry-run").expect("--dry-run");
    assert_eq!(dry_run.value, FlagValue::Attached(&["none", "client", "server"]));
    assert_eq!(dry_run.value.choices(), &["none", "client", "server"]);
    assert!(FlagValue::Text.choices().is_empty());
}
