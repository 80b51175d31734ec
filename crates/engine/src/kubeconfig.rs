//! Default namespace from the local kubeconfig.

use std::{
    env,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const KUBECONFIG_ENV: &str = "KUBECONFIG";
pub const DEFAULT_NAMESPACE: &str = "default";

/// Supplies the namespace used when a line carries no `--namespace`.
pub trait NamespaceSource: Send + Sync {
    fn current_namespace(&self) -> String;

    /// Re-reads the underlying configuration. Sources without one ignore it.
    fn reload(&self) {}
}

/// Fixed namespace.
#[derive(Clone, Debug)]
pub struct StaticNamespace(String);

impl StaticNamespace {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self(namespace.into())
    }
}

impl NamespaceSource for StaticNamespace {
    fn current_namespace(&self) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Error)]
pub enum KubeconfigError {
    #[error("failed to read kubeconfig {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse kubeconfig {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct Kubeconfig {
    #[serde(rename = "current-context", default)]
    current_context: Option<String>,
    #[serde(default)]
    contexts: Vec<NamedContext>,
}

#[derive(Debug, Deserialize)]
struct NamedContext {
    name: String,
    #[serde(default)]
    context: ContextDetails,
}

#[derive(Debug, Default, Deserialize)]
struct ContextDetails {
    #[serde(default)]
    namespace: Option<String>,
}

/// Resolves the kubeconfig location: the first entry of `$KUBECONFIG`, else
/// `~/.kube/config`.
pub fn kubeconfig_path() -> Option<PathBuf> {
    if let Some(value) = env::var_os(KUBECONFIG_ENV) {
        if let Some(first) = env::split_paths(&value).find(|path| !path.as_os_str().is_empty()) {
            return Some(first);
        }
    }
    dirs_next::home_dir().map(|home| home.join(".kube").join("config"))
}

/// Namespace of the current context in the kubeconfig at `path`, or
/// `"default"` when the context sets none.
pub fn read_current_namespace(path: &Path) -> Result<String, KubeconfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| KubeconfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Kubeconfig = if content.trim().is_empty() {
        Kubeconfig::default()
    } else {
        serde_yaml::from_str(&content).map_err(|source| KubeconfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    };
    let namespace = config
        .current_context
        .as_deref()
        .and_then(|current| config.contexts.iter().find(|context| context.name == current))
        .and_then(|context| context.context.namespace.clone())
        .filter(|namespace| !namespace.is_empty())
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
    Ok(namespace)
}

/// Namespace of the kubeconfig's current context, re-read on [`reload`].
///
/// A missing or unreadable kubeconfig yields `"default"`.
///
/// [`reload`]: NamespaceSource::reload
#[derive(Debug)]
pub struct KubeconfigNamespace {
    path: Option<PathBuf>,
    namespace: RwLock<String>,
}

impl KubeconfigNamespace {
    /// Reads the kubeconfig found by [`kubeconfig_path`].
    pub fn load() -> Self {
        Self::from_path(kubeconfig_path())
    }

    pub fn from_path(path: Option<PathBuf>) -> Self {
        let namespace = Self::read(path.as_deref());
        Self {
            path,
            namespace: RwLock::new(namespace),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read(path: Option<&Path>) -> String {
        let Some(path) = path else {
            return DEFAULT_NAMESPACE.to_string();
        };
        match read_current_namespace(path) {
            Ok(namespace) => {
                debug!(path = %path.display(), namespace = %namespace, "kubeconfig namespace loaded");
                namespace
            }
            Err(KubeconfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "kubeconfig not found; using default namespace");
                DEFAULT_NAMESPACE.to_string()
            }
            Err(error) => {
                warn!(error = %error, "could not read kubeconfig; using default namespace");
                DEFAULT_NAMESPACE.to_string()
            }
        }
    }
}

impl NamespaceSource for KubeconfigNamespace {
    fn current_namespace(&self) -> String {
        self.namespace.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn reload(&self) {
        let namespace = Self::read(self.path.as_deref());
        *self.namespace.write().unwrap_or_else(PoisonError::into_inner) = namespace;
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const CONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: staging
contexts:
  - name: prod
    context:
      cluster: prod
      namespace: payments
  - name: staging
    context:
      cluster: staging
      namespace: web
"#;

    #[test]
    fn reads_namespace_of_current_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");
        fs::write(&path, CONFIG).expect("write");
        assert_eq!(read_current_namespace(&path).expect("read"), "web");
    }

    #[test]
    fn context_without_namespace_falls_back_to_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");
        fs::write(&path, "current-context: dev\ncontexts:\n  - name: dev\n    context:\n      cluster: dev\n").expect("write");
        assert_eq!(read_current_namespace(&path).expect("read"), DEFAULT_NAMESPACE);
    }

    #[test]
    fn reload_picks_up_context_switch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config");
        fs::write(&path, CONFIG).expect("write");
        let source = KubeconfigNamespace::from_path(Some(path.clone()));
        assert_eq!(source.current_namespace(), "web");

        fs::write(&path, CONFIG.replace("current-context: staging", "current-context: prod")).expect("write");
        assert_eq!(source.current_namespace(), "web");
        source.reload();
        assert_eq!(source.current_namespace(), "payments");
    }

    #[test]
    fn missing_or_broken_config_uses_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = KubeconfigNamespace::from_path(Some(dir.path().join("absent")));
        assert_eq!(missing.current_namespace(), DEFAULT_NAMESPACE);

        let broken = dir.path().join("broken");
        fs::write(&broken, "contexts: [unterminated").expect("write");
        assert!(matches!(read_current_namespace(&broken), Err(KubeconfigError::Parse { .. })));
        assert_eq!(KubeconfigNamespace::from_path(Some(broken)).current_namespace(), DEFAULT_NAMESPACE);
    }

    #[test]
    fn kubeconfig_env_selects_first_path() {
        let joined = env::join_paths(["/tmp/first-config", "/tmp/second-config"]).expect("join");
        temp_env::with_var(KUBECONFIG_ENV, Some(joined), || {
            assert_eq!(kubeconfig_path(), Some(PathBuf::from("/tmp/first-config")));
        });
    }
}
