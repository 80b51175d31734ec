use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kubeline_engine::{
    CacheSettings, KubeconfigNamespace, KubectlFetcher, LocalPathLister, NamespaceSource, NullFetcher, ResourceCache,
    ResourceFetcher, StaticNamespace,
};
use kubeline_registry::suggestions_from_help;
use kubeline_shell::{Completer, Executor, Repl, ReplOptions};
use kubeline_types::Suggestion;
use kubeline_util::{ShellSettings, kubeline_config_dir};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LOG_FILTER_ENV: &str = "KUBELINE_LOG";
const LOG_PATH_ENV: &str = "KUBELINE_LOG_PATH";
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(name = "kubeline", version, about = "Interactive kubectl shell with context-aware completion")]
struct Cli {
    /// kubectl binary used for execution and resource lookups.
    #[arg(long, global = true, value_name = "PATH")]
    kubectl: Option<String>,
    /// Complete resource names from this namespace instead of the kubeconfig's.
    #[arg(long, short = 'n', global = true, value_name = "NS")]
    namespace: Option<String>,
    /// Seconds a resource list is served before it is refreshed.
    #[arg(long, global = true, value_name = "SECS")]
    cache_ttl: Option<u64>,
    /// Seconds a single resource lookup may take.
    #[arg(long, global = true, value_name = "SECS")]
    fetch_timeout: Option<u64>,
    /// Line editor history file.
    #[arg(long, global = true, value_name = "PATH")]
    history: Option<String>,
    /// Never query the cluster; complete commands, flags and files only.
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the completions for a partially typed line.
    Complete {
        line: String,
        /// Byte offset of the cursor; defaults to the end of the line.
        #[arg(long)]
        cursor: Option<usize>,
        /// Wait for resource lookups started by this completion and complete again.
        #[arg(long)]
        wait: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print the flags `kubectl <COMMAND> --help` documents.
    Flags {
        command: String,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    init_tracing(cli.command.is_none())?;

    let settings = apply_overrides(ShellSettings::load()?, &cli);
    debug!(?settings, "resolved settings");

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .thread_name("kubeline-worker")
        .build()
        .context("failed to start async runtime")?;
    let executor = Executor::new(&settings.kubectl_path);

    match cli.command.take() {
        None => {
            let completer = Arc::new(build_completer(&runtime, &settings, &cli));
            let options = ReplOptions {
                prompt: settings.prompt.clone(),
                history_file: settings.history_file(),
            };
            Repl::new(completer, executor, runtime.handle().clone(), options).run()
        }
        Some(Command::Complete {
            line,
            cursor,
            wait,
            json,
        }) => {
            let completer = build_completer(&runtime, &settings, &cli);
            let cursor = cursor.unwrap_or(line.len());
            let suggestions = runtime.block_on(complete_once(&completer, &line, cursor, wait));
            print_suggestions(&suggestions, json)
        }
        Some(Command::Flags { command, json }) => {
            let help = runtime.block_on(executor.capture(&format!("{command} --help")))?;
            let suggestions = suggestions_from_help(&help).with_context(|| format!("no flags found in `{command} --help`"))?;
            print_suggestions(&suggestions, json)
        }
    }
}

// ===== Setup =====

/// The interactive shell logs to a file so records never interleave with the
/// prompt; one-shot subcommands log to stderr.
fn init_tracing(interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if !interactive {
        let _ = builder.with_writer(std::io::stderr).try_init();
        return Ok(());
    }

    let path = std::env::var_os(LOG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| kubeline_config_dir().join("kubeline.log"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
    Ok(())
}

/// Command-line flags win over the settings file.
fn apply_overrides(mut settings: ShellSettings, cli: &Cli) -> ShellSettings {
    if let Some(kubectl) = &cli.kubectl {
        settings.kubectl_path = kubectl.clone();
    }
    if let Some(ttl) = cli.cache_ttl {
        settings.cache_ttl_secs = ttl;
    }
    if let Some(timeout) = cli.fetch_timeout {
        settings.fetch_timeout_secs = timeout;
    }
    if let Some(history) = &cli.history {
        settings.history_path = Some(history.clone());
    }
    settings
}

fn build_completer(runtime: &Runtime, settings: &ShellSettings, cli: &Cli) -> Completer {
    let fetcher: Arc<dyn ResourceFetcher> = if cli.offline {
        Arc::new(NullFetcher)
    } else {
        Arc::new(KubectlFetcher::new(&settings.kubectl_path, settings.fetch_timeout()))
    };
    let cache_settings = CacheSettings {
        ttl: settings.cache_ttl(),
        refresh_timeout: settings.fetch_timeout(),
    };
    let cache = ResourceCache::new(fetcher, runtime.handle().clone(), cache_settings);
    let namespaces: Arc<dyn NamespaceSource> = match cli.namespace.as_deref() {
        Some(namespace) => Arc::new(StaticNamespace::new(namespace)),
        None => Arc::new(KubeconfigNamespace::load()),
    };
    info!(
        kubectl = %settings.kubectl_path,
        namespace = %namespaces.current_namespace(),
        cache_ttl_secs = settings.cache_ttl_secs,
        offline = cli.offline,
        "completion engine ready"
    );
    Completer::new(Arc::new(cache), namespaces, Arc::new(LocalPathLister))
}

// ===== Subcommands =====

/// Completes `line`; with `wait`, lets any refresh it started finish (bounded
/// by the cache's refresh timeout) and completes again.
async fn complete_once(completer: &Completer, line: &str, cursor: usize, wait: bool) -> Vec<Suggestion> {
    let suggestions = completer.complete(line, cursor);
    if !wait || !completer.cache().any_refreshing() {
        return suggestions;
    }

    let timeout = completer.cache().settings().refresh_timeout;
    let deadline = tokio::time::Instant::now() + timeout + WAIT_POLL_INTERVAL;
    while completer.cache().any_refreshing() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(WAIT_POLL_INTERVAL).await;
    }
    completer.complete(line, cursor)
}

fn print_suggestions(suggestions: &[Suggestion], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(suggestions)?);
        return Ok(());
    }
    for suggestion in suggestions {
        if suggestion.has_description() {
            println!("{}\t{}", suggestion.text(), suggestion.description());
        } else {
            println!("{}", suggestion.text());
        }
    }
    Ok(())
}
