use std::{io, path::PathBuf, process::Stdio, time::Duration};

use async_trait::async_trait;
use kubeline_types::{NamespaceScope, ResourceKind, Suggestion};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Source of truth for resource names.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Lists the objects of `kind` in `scope` (`None` for cluster-scoped
    /// kinds), in the order the source returns them.
    async fn fetch(&self, kind: ResourceKind, scope: Option<&NamespaceScope>) -> Result<Vec<Suggestion>, FetchError>;
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("command did not finish within {0:?}")]
    Timeout(Duration),
    #[error("command exited with {}: {stderr}", exit_label(.code))]
    Status { code: Option<i32>, stderr: String },
    #[error("unexpected command output: {0}")]
    Decode(#[from] serde_json::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Fetcher that shells out to `kubectl`.
#[derive(Clone, Debug)]
pub struct KubectlFetcher {
    program: PathBuf,
    timeout: Duration,
}

impl KubectlFetcher {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Arguments passed to kubectl to list `kind` in `scope`.
    pub fn arguments(kind: ResourceKind, scope: Option<&NamespaceScope>) -> Vec<String> {
        if kind == ResourceKind::Context {
            return ["config", "get-contexts", "-o", "name"].map(String::from).to_vec();
        }
        let mut arguments = vec!["get".to_string(), kind.plural().to_string(), "-o".to_string(), "json".to_string()];
        match scope {
            Some(NamespaceScope::Named(namespace)) => {
                arguments.push("--namespace".to_string());
                arguments.push(namespace.clone());
            }
            Some(NamespaceScope::All) => arguments.push("--all-namespaces".to_string()),
            None => {}
        }
        arguments
    }

    async fn run(&self, arguments: &[String]) -> Result<Vec<u8>, FetchError> {
        debug!(program = %self.program.display(), arguments = ?arguments, "running kubectl");
        let mut command = Command::new(&self.program);
        command
            .args(arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))?
            .map_err(|source| FetchError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(FetchError::Status {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

#[async_trait]
impl ResourceFetcher for KubectlFetcher {
    async fn fetch(&self, kind: ResourceKind, scope: Option<&NamespaceScope>) -> Result<Vec<Suggestion>, FetchError> {
        let stdout = self.run(&Self::arguments(kind, scope)).await?;
        if kind == ResourceKind::Context {
            return Ok(parse_context_names(&String::from_utf8_lossy(&stdout)));
        }
        parse_object_list(kind, matches!(scope, Some(NamespaceScope::All)), &stdout)
    }
}

#[derive(Debug, Deserialize)]
struct ObjectList {
    #[serde(default)]
    items: Vec<Object>,
}

#[derive(Debug, Deserialize)]
struct Object {
    metadata: Metadata,
    #[serde(default)]
    spec: Value,
    #[serde(default)]
    status: Value,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
}

/// Decodes `kubectl get -o json` output into one suggestion per object.
pub(crate) fn parse_object_list(kind: ResourceKind, all_namespaces: bool, json: &[u8]) -> Result<Vec<Suggestion>, FetchError> {
    let list: ObjectList = serde_json::from_slice(json)?;
    Ok(list
        .items
        .iter()
        .map(|object| Suggestion::new(object.metadata.name.as_str(), describe(kind, all_namespaces, object)))
        .collect())
}

fn describe(kind: ResourceKind, all_namespaces: bool, object: &Object) -> String {
    let detail = match kind {
        ResourceKind::Pod => object.status["phase"].as_str().map(str::to_string),
        ResourceKind::Deployment => {
            let ready = object.status["readyReplicas"].as_u64().unwrap_or(0);
            let desired = object.spec["replicas"].as_u64().unwrap_or(0);
            Some(format!("{ready}/{desired} ready"))
        }
        ResourceKind::Service => object.spec["type"].as_str().map(str::to_string),
        ResourceKind::Namespace => object.status["phase"].as_str().map(str::to_string),
        _ => None,
    };
    let namespace = object.metadata.namespace.as_deref().filter(|_| all_namespaces);
    match (namespace, detail) {
        (Some(namespace), Some(detail)) => format!("{namespace}, {detail}"),
        (Some(namespace), None) => namespace.to_string(),
        (None, Some(detail)) => detail,
        (None, None) => String::new(),
    }
}

fn parse_context_names(stdout: &str) -> Vec<Suggestion> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Suggestion::bare)
        .collect()
}
