//! Resource kinds and cache keys.
//!
//! A [`ResourceKind`] is a category of cluster object whose names can be
//! completed. Every kind knows its kubectl plural name, the aliases a user
//! may type for it, and whether its objects live inside a namespace.

use std::fmt;

/// Category of cluster object (plus kubeconfig contexts) that the completion
/// engine can list names for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    ComponentStatus,
    ConfigMap,
    CronJob,
    DaemonSet,
    Deployment,
    Endpoints,
    Ingress,
    Job,
    LimitRange,
    Namespace,
    Node,
    PersistentVolumeClaim,
    PersistentVolume,
    Pod,
    PodTemplate,
    ReplicaSet,
    ReplicationController,
    ResourceQuota,
    Secret,
    ServiceAccount,
    Service,
    StatefulSet,
    /// Context entry of the local kubeconfig, not a cluster object.
    Context,
}

impl ResourceKind {
    pub const ALL: &'static [ResourceKind] = &[
        ResourceKind::ComponentStatus,
        ResourceKind::ConfigMap,
        ResourceKind::CronJob,
        ResourceKind::DaemonSet,
        ResourceKind::Deployment,
        ResourceKind::Endpoints,
        ResourceKind::Ingress,
        ResourceKind::Job,
        ResourceKind::LimitRange,
        ResourceKind::Namespace,
        ResourceKind::Node,
        ResourceKind::PersistentVolumeClaim,
        ResourceKind::PersistentVolume,
        ResourceKind::Pod,
        ResourceKind::PodTemplate,
        ResourceKind::ReplicaSet,
        ResourceKind::ReplicationController,
        ResourceKind::ResourceQuota,
        ResourceKind::Secret,
        ResourceKind::ServiceAccount,
        ResourceKind::Service,
        ResourceKind::StatefulSet,
        ResourceKind::Context,
    ];

    /// Name passed to `kubectl get`.
    pub fn plural(self) -> &'static str {
        self.aliases()[0]
    }

    /// Every spelling accepted for this kind. The plural name comes first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            ResourceKind::ComponentStatus => &["componentstatuses", "componentstatus", "cs"],
            ResourceKind::ConfigMap => &["configmaps", "configmap", "cm"],
            ResourceKind::CronJob => &["cronjobs", "cronjob", "cj"],
            ResourceKind::DaemonSet => &["daemonsets", "daemonset", "ds"],
            ResourceKind::Deployment => &["deployments", "deployment", "deploy"],
            ResourceKind::Endpoints => &["endpoints", "ep"],
            ResourceKind::Ingress => &["ingresses", "ingress", "ing"],
            ResourceKind::Job => &["jobs", "job"],
            ResourceKind::LimitRange => &["limitranges", "limitrange", "limits"],
            ResourceKind::Namespace => &["namespaces", "namespace", "ns"],
            ResourceKind::Node => &["nodes", "node", "no"],
            ResourceKind::PersistentVolumeClaim => &["persistentvolumeclaims", "persistentvolumeclaim", "pvc"],
            ResourceKind::PersistentVolume => &["persistentvolumes", "persistentvolume", "pv"],
            ResourceKind::Pod => &["pods", "pod", "po"],
            ResourceKind::PodTemplate => &["podtemplates", "podtemplate"],
            ResourceKind::ReplicaSet => &["replicasets", "replicaset", "rs"],
            ResourceKind::ReplicationController => &["replicationcontrollers", "replicationcontroller", "rc"],
            ResourceKind::ResourceQuota => &["resourcequotas", "resourcequota", "quota"],
            ResourceKind::Secret => &["secrets", "secret"],
            ResourceKind::ServiceAccount => &["serviceaccounts", "serviceaccount", "sa"],
            ResourceKind::Service => &["services", "service", "svc"],
            ResourceKind::StatefulSet => &["statefulsets", "statefulset", "sts"],
            ResourceKind::Context => &["contexts", "context"],
        }
    }

    /// Resolves a typed resource token (`po`, `pod`, `pods`, ...) to its kind.
    ///
    /// Kubeconfig contexts are never addressed through a resource token, so
    /// `contexts` does not resolve.
    pub fn from_alias(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .iter()
            .copied()
            .filter(|kind| *kind != ResourceKind::Context)
            .find(|kind| kind.aliases().iter().any(|alias| alias.eq_ignore_ascii_case(token)))
    }

    pub fn is_namespaced(self) -> bool {
        !matches!(
            self,
            ResourceKind::ComponentStatus
                | ResourceKind::Namespace
                | ResourceKind::Node
                | ResourceKind::PersistentVolume
                | ResourceKind::Context
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// Namespace part of a cache key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NamespaceScope {
    Named(String),
    /// Objects across every namespace (`--all-namespaces`).
    All,
}

impl fmt::Display for NamespaceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceScope::Named(name) => f.write_str(name),
            NamespaceScope::All => f.write_str("*"),
        }
    }
}

/// Identifies one resource cache entry: a kind and, for namespaced kinds,
/// the namespace it was listed in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: ResourceKind,
    scope: Option<NamespaceScope>,
}

impl CacheKey {
    /// Builds the key for `kind`; the scope is dropped for cluster-scoped kinds.
    pub fn new(kind: ResourceKind, scope: NamespaceScope) -> Self {
        let scope = kind.is_namespaced().then_some(scope);
        Self { kind, scope }
    }

    /// Key for a cluster-scoped kind.
    pub fn cluster(kind: ResourceKind) -> Self {
        Self { kind, scope: None }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn scope(&self) -> Option<&NamespaceScope> {
        self.scope.as_ref()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}@{}", self.kind, scope),
            None => write!(f, "{}", self.kind),
        }
    }
}
