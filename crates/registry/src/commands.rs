//! The kubectl command set.

use kubeline_types::{ResourceKind, Suggestion};

use crate::flags;
use crate::grammar::{CommandDescriptor, Matching, Positional};

/// Resource type tokens offered after `get`, `describe`, `delete`, `edit`
/// and `explain`: canonical names first, then short aliases.
pub const RESOURCE_TYPES: &[&str] = &[
    "clusters",
    "componentstatuses",
    "configmaps",
    "daemonsets",
    "deployments",
    "endpoints",
    "events",
    "horizontalpodautoscalers",
    "ingresses",
    "jobs",
    "cronjobs",
    "limitranges",
    "namespaces",
    "networkpolicies",
    "nodes",
    "persistentvolumeclaims",
    "persistentvolumes",
    "pods",
    "podsecuritypolicies",
    "podtemplates",
    "replicasets",
    "replicationcontrollers",
    "resourcequotas",
    "secrets",
    "serviceaccounts",
    "services",
    "statefulsets",
    "storageclasses",
    "thirdpartyresources",
    // aliases
    "cs",
    "cm",
    "ds",
    "deploy",
    "ep",
    "hpa",
    "ing",
    "limits",
    "ns",
    "no",
    "pvc",
    "pv",
    "po",
    "psp",
    "rs",
    "rc",
    "quota",
    "sa",
    "svc",
];

const CREATE_SUBCOMMANDS: &[(&str, &str)] = &[
    ("configmap", "Create a configmap from a local file, directory or literal value"),
    ("deployment", "Create a deployment with the specified name."),
    ("namespace", "Create a namespace with the specified name"),
    ("quota", "Create a quota with the specified name."),
    ("secret", "Create a secret using specified subcommand"),
    ("service", "Create a service using specified subcommand."),
    ("serviceaccount", "Create a service account with the specified name"),
];

const ROLLOUT_SUBCOMMANDS: &[(&str, &str)] = &[
    ("history", "view rollout history"),
    ("pause", "Mark the provided resource as paused"),
    ("resume", "Resume a paused resource"),
    ("status", "Show the status of the rollout"),
    ("undo", "undoes a previous rollout"),
];

const CONFIG_SUBCOMMANDS: &[(&str, &str)] = &[
    ("current-context", "Displays the current-context"),
    ("delete-cluster", "Delete the specified cluster from the kubeconfig"),
    ("delete-context", "Delete the specified context from the kubeconfig"),
    ("get-clusters", "Display clusters defined in the kubeconfig"),
    ("get-contexts", "Describe one or many contexts"),
    ("rename-context", "Renames a context from the kubeconfig file"),
    ("set", "Sets an individual value in a kubeconfig file"),
    ("set-cluster", "Sets a cluster entry in kubeconfig"),
    ("set-context", "Sets a context entry in kubeconfig"),
    ("set-credentials", "Sets a user entry in kubeconfig"),
    ("unset", "Unsets an individual value in a kubeconfig file"),
    ("use-context", "Sets the current-context in a kubeconfig file"),
    ("view", "Display merged kubeconfig settings or a specified kubeconfig file"),
];

const CLUSTER_INFO_SUBCOMMANDS: &[(&str, &str)] = &[("dump", "Dump lots of relevant info for debugging and diagnosis")];

const TOP_SUBCOMMANDS: &[(&str, &str)] = &[("nodes", ""), ("pod", ""), ("no", ""), ("po", "")];

fn resource_types() -> Positional {
    Positional::Choices(RESOURCE_TYPES.iter().map(|name| Suggestion::bare(*name)).collect())
}

fn nodes_by_prefix() -> Positional {
    Positional::Resources {
        kinds: vec![ResourceKind::Node],
        matching: Matching::Prefix,
    }
}

/// `<type>` then `<name>` of that type.
fn typed_resource(descriptor: CommandDescriptor) -> CommandDescriptor {
    descriptor
        .with_positional(resource_types())
        .with_positional(Positional::ResourceOfPrevious)
}

pub(crate) fn descriptors() -> Vec<CommandDescriptor> {
    vec![
        typed_resource(CommandDescriptor::new("get", "Display one or many resources", flags::GET)),
        typed_resource(CommandDescriptor::new(
            "describe",
            "Show details of a specific resource or group of resources",
            flags::DESCRIBE,
        )),
        CommandDescriptor::new("create", "Create a resource by filename or stdin", flags::CREATE)
            .with_positional(Positional::choices(CREATE_SUBCOMMANDS)),
        CommandDescriptor::new("replace", "Replace a resource by filename or stdin.", flags::REPLACE),
        CommandDescriptor::new(
            "patch",
            "Update field(s) of a resource using strategic merge patch.",
            flags::PATCH,
        ),
        typed_resource(CommandDescriptor::new(
            "delete",
            "Delete resources by filenames, stdin, resources and names, or by resources and label selector.",
            flags::DELETE,
        )),
        typed_resource(CommandDescriptor::new("edit", "Edit a resource on the server", flags::EDIT)),
        CommandDescriptor::new("apply", "Apply a configuration to a resource by filename or stdin", flags::APPLY),
        CommandDescriptor::new(
            "namespace",
            "SUPERSEDED: Set and view the current Kubernetes namespace",
            flags::NONE,
        )
        .with_positional(Positional::resources(ResourceKind::Namespace)),
        CommandDescriptor::new("logs", "Print the logs for a container in a pod.", flags::LOGS)
            .with_positional(Positional::resources(ResourceKind::Pod)),
        CommandDescriptor::new(
            "rolling-update",
            "Perform a rolling update of the given ReplicationController.",
            flags::ROLLING_UPDATE,
        )
        .with_aliases(&["rollingupdate"])
        .with_positional(Positional::resources(ResourceKind::ReplicationController))
        .with_positional(Positional::resources(ResourceKind::ReplicationController)),
        CommandDescriptor::new(
            "scale",
            "Set a new size for a Deployment, ReplicaSet, Replication Controller, or Job.",
            flags::SCALE,
        )
        .with_aliases(&["resize"])
        .with_positional(Positional::Resources {
            kinds: vec![
                ResourceKind::Deployment,
                ResourceKind::ReplicaSet,
                ResourceKind::ReplicationController,
            ],
            matching: Matching::Substring,
        }),
        CommandDescriptor::new("cordon", "Mark node as unschedulable", flags::CORDON).with_positional(nodes_by_prefix()),
        CommandDescriptor::new("drain", "Drain node in preparation for maintenance", flags::DRAIN)
            .with_positional(nodes_by_prefix()),
        CommandDescriptor::new("uncordon", "Mark node as schedulable", flags::CORDON).with_positional(nodes_by_prefix()),
        CommandDescriptor::new("attach", "Attach to a running container.", flags::ATTACH)
            .with_positional(Positional::resources(ResourceKind::Pod)),
        CommandDescriptor::new("exec", "Execute a command in a container.", flags::EXEC)
            .with_positional(Positional::resources(ResourceKind::Pod)),
        CommandDescriptor::new(
            "port-forward",
            "Forward one or more local ports to a pod.",
            flags::PORT_FORWARD,
        )
        .with_positional(Positional::resources(ResourceKind::Pod)),
        CommandDescriptor::new("proxy", "Run a proxy to the Kubernetes API server", flags::PROXY),
        CommandDescriptor::new("run", "Run a particular image on the cluster.", flags::RUN),
        CommandDescriptor::new(
            "expose",
            "Take a replication controller, service, or pod and expose it as a new Kubernetes Service",
            flags::EXPOSE,
        ),
        CommandDescriptor::new(
            "autoscale",
            "Auto-scale a Deployment, ReplicaSet, or ReplicationController",
            flags::AUTOSCALE,
        ),
        CommandDescriptor::new("rollout", "rollout manages a deployment", flags::ROLLOUT)
            .with_positional(Positional::choices(ROLLOUT_SUBCOMMANDS)),
        CommandDescriptor::new("label", "Update the labels on a resource", flags::LABEL),
        CommandDescriptor::new("annotate", "Update the annotations on a resource", flags::ANNOTATE),
        CommandDescriptor::new("config", "config modifies kubeconfig files", flags::NONE)
            .with_positional(Positional::choices(CONFIG_SUBCOMMANDS))
            .with_positional(Positional::Keyed(vec![
                ("use-context", Positional::resources(ResourceKind::Context)),
                ("delete-context", Positional::resources(ResourceKind::Context)),
                ("rename-context", Positional::resources(ResourceKind::Context)),
            ])),
        CommandDescriptor::new("cluster-info", "Display cluster info", flags::CLUSTER_INFO)
            .with_positional(Positional::choices(CLUSTER_INFO_SUBCOMMANDS)),
        CommandDescriptor::new(
            "api-versions",
            "Print the supported API versions on the server, in the form of 'group/version'.",
            flags::NONE,
        ),
        CommandDescriptor::new(
            "version",
            "Print the client and server version information.",
            flags::VERSION,
        ),
        CommandDescriptor::new("explain", "Documentation of resources.", flags::EXPLAIN).with_positional(resource_types()),
        CommandDescriptor::new(
            "convert",
            "Convert config files between different API versions",
            flags::CONVERT,
        ),
        CommandDescriptor::new("top", "Display Resource (CPU/Memory/Storage) usage", flags::TOP)
            .with_positional(Positional::choices(TOP_SUBCOMMANDS))
            .with_positional(Positional::ResourceOfPrevious),
        CommandDescriptor::new("exit", "Exit this program", flags::NONE),
    ]
}
