//! Flag tables.
//!
//! One table per command plus the global options accepted by every command.
//! Within a table, flags appear in the order kubectl documents them; that
//! order is the order suggestions are shown in.

use crate::grammar::{FlagSpec, FlagValue, PathFilter};

const MANIFESTS: FlagValue = FlagValue::FilePath(PathFilter::Manifests);
const ANY_FILE: FlagValue = FlagValue::FilePath(PathFilter::Any);

const OUTPUT_FORMATS: FlagValue = FlagValue::Choices(&[
    "json",
    "yaml",
    "wide",
    "name",
    "custom-columns=",
    "custom-columns-file=",
    "go-template=",
    "go-template-file=",
    "jsonpath=",
    "jsonpath-file=",
]);
const DRY_RUN_MODES: FlagValue = FlagValue::Attached(&["none", "client", "server"]);
const CASCADE_MODES: FlagValue = FlagValue::Attached(&["background", "orphan", "foreground"]);

const ALL_NAMESPACES: FlagSpec = FlagSpec::switch(
    "--all-namespaces",
    Some("-A"),
    "If present, list the requested object(s) across all namespaces. Namespace in current context is ignored even if specified with --namespace.",
);
const ALLOW_MISSING_TEMPLATE_KEYS: FlagSpec = FlagSpec::switch(
    "--allow-missing-template-keys",
    None,
    "If true, ignore any errors in templates when a field or map key is missing in the template. Only applies to golang and jsonpath output formats.",
);
const INCLUDE_EXTENDED_APIS: FlagSpec = FlagSpec::switch(
    "--include-extended-apis",
    None,
    "If true, include definitions of new APIs via calls to the API server. [default true]",
);
const RECURSIVE: FlagSpec = FlagSpec::switch(
    "--recursive",
    Some("-R"),
    "Process the directory used in -f, --filename recursively. Useful when you want to manage related manifests organized within the same directory.",
);
const SELECTOR: FlagSpec = FlagSpec::value("--selector", Some("-l"), "Selector (label query) to filter on", FlagValue::Text);
const OUTPUT: FlagSpec = FlagSpec::value(
    "--output",
    Some("-o"),
    "Output format. One of: json|yaml|wide|name|custom-columns=...|custom-columns-file=...|go-template=...|go-template-file=...|jsonpath=...|jsonpath-file=...",
    OUTPUT_FORMATS,
);
const OUTPUT_VERSION: FlagSpec = FlagSpec::value(
    "--output-version",
    None,
    "Output the formatted object with the given group version (for ex: 'extensions/v1beta1').",
    FlagValue::Text,
);
const NO_HEADERS: FlagSpec = FlagSpec::switch(
    "--no-headers",
    None,
    "When using the default or custom-column output format, don't print headers.",
);
const SHOW_ALL: FlagSpec = FlagSpec::switch(
    "--show-all",
    Some("-a"),
    "When printing, show all resources (default hide terminated pods.)",
);
const SHOW_LABELS: FlagSpec = FlagSpec::switch(
    "--show-labels",
    None,
    "When printing, show all labels as the last column (default hide labels column)",
);
const SORT_BY: FlagSpec = FlagSpec::value(
    "--sort-by",
    None,
    "If non-empty, sort list types using this field specification. The field specification is expressed as a JSONPath expression (e.g. '{.metadata.name}').",
    FlagValue::Text,
);
const TEMPLATE: FlagSpec = FlagSpec::value(
    "--template",
    None,
    "Template string or path to template file to use when -o=go-template, -o=go-template-file. The template format is golang templates.",
    FlagValue::Text,
);
const DRY_RUN: FlagSpec = FlagSpec::value(
    "--dry-run",
    None,
    "Must be \"none\", \"server\", or \"client\". If client strategy, only print the object that would be sent, without sending it.",
    DRY_RUN_MODES,
);
const RECORD: FlagSpec = FlagSpec::switch(
    "--record",
    None,
    "Record current kubectl command in the resource annotation.",
);
const SAVE_CONFIG: FlagSpec = FlagSpec::switch(
    "--save-config",
    None,
    "If true, the configuration of current object will be saved in its annotation.",
);
const VALIDATE: FlagSpec = FlagSpec::switch(
    "--validate",
    None,
    "If true, use a schema to validate the input before sending it",
);
const WINDOWS_LINE_ENDINGS: FlagSpec = FlagSpec::switch(
    "--windows-line-endings",
    None,
    "Only relevant if --edit=true. Use Windows line-endings (default Unix line-endings)",
);
const FORCE: FlagSpec = FlagSpec::switch(
    "--force",
    None,
    "If true, immediately remove resources from API and bypass graceful deletion.",
);
const GRACE_PERIOD: FlagSpec = FlagSpec::value(
    "--grace-period",
    None,
    "Period of time in seconds given to the resource to terminate gracefully.",
    FlagValue::Text,
);
const TIMEOUT: FlagSpec = FlagSpec::value(
    "--timeout",
    None,
    "The length of time to wait before giving up, zero means infinite",
    FlagValue::Text,
);
const ALL: FlagSpec = FlagSpec::switch("--all", None, "Select all resources in the namespace of the specified resource types.");
const CONTAINER: FlagSpec = FlagSpec::value(
    "--container",
    Some("-c"),
    "Container name. If omitted, the first container in the pod will be chosen",
    FlagValue::Text,
);
const STDIN: FlagSpec = FlagSpec::switch("--stdin", Some("-i"), "Pass stdin to the container");
const TTY: FlagSpec = FlagSpec::switch("--tty", Some("-t"), "Stdin is a TTY");
const LOCAL: FlagSpec = FlagSpec::switch(
    "--local",
    None,
    "If true, the command will not contact the api-server but run locally.",
);
const OVERWRITE: FlagSpec = FlagSpec::switch(
    "--overwrite",
    None,
    "If true, allow labels or annotations to be overwritten, otherwise reject updates that overwrite existing values.",
);

const fn filename(description: &'static str) -> FlagSpec {
    FlagSpec::value("--filename", Some("-f"), description, MANIFESTS)
}

pub(crate) static GLOBAL: &[FlagSpec] = &[
    FlagSpec::switch("--help", Some("-h"), "Help for this command"),
    FlagSpec::value("--as", None, "Username to impersonate for the operation", FlagValue::Text),
    FlagSpec::value(
        "--as-group",
        None,
        "Group to impersonate for the operation, this flag can be repeated to specify multiple groups.",
        FlagValue::Text,
    ),
    FlagSpec::value(
        "--certificate-authority",
        None,
        "Path to a cert file for the certificate authority",
        ANY_FILE,
    ),
    FlagSpec::value("--client-certificate", None, "Path to a client certificate file for TLS", ANY_FILE),
    FlagSpec::value("--client-key", None, "Path to a client key file for TLS", ANY_FILE),
    FlagSpec::value("--cluster", None, "The name of the kubeconfig cluster to use", FlagValue::Text),
    FlagSpec::value("--context", None, "The name of the kubeconfig context to use", FlagValue::Context),
    FlagSpec::switch(
        "--insecure-skip-tls-verify",
        None,
        "If true, the server's certificate will not be checked for validity. This will make your HTTPS connections insecure",
    ),
    FlagSpec::value("--kubeconfig", None, "Path to the kubeconfig file to use for CLI requests.", ANY_FILE),
    FlagSpec::switch(
        "--match-server-version",
        None,
        "Require server version to match client version",
    ),
    FlagSpec::value(
        "--namespace",
        Some("-n"),
        "If present, the namespace scope for this CLI request",
        FlagValue::Namespace,
    ),
    FlagSpec::value(
        "--request-timeout",
        None,
        "The length of time to wait before giving up on a single server request.",
        FlagValue::Text,
    ),
    FlagSpec::value(
        "--server",
        Some("-s"),
        "The address and port of the Kubernetes API server",
        FlagValue::Text,
    ),
    FlagSpec::value(
        "--token",
        None,
        "Bearer token for authentication to the API server",
        FlagValue::Text,
    ),
    FlagSpec::value("--user", None, "The name of the kubeconfig user to use", FlagValue::Text),
    FlagSpec::value("--v", Some("-v"), "number for the log level verbosity", FlagValue::Text),
];

pub(crate) static GET: &[FlagSpec] = &[
    ALL_NAMESPACES,
    ALLOW_MISSING_TEMPLATE_KEYS,
    FlagSpec::switch(
        "--export",
        None,
        "If true, use 'export' for the resources. Exported resources are stripped of cluster-specific information.",
    ),
    filename("Filename, directory, or URL to files identifying the resource to get from a server."),
    INCLUDE_EXTENDED_APIS,
    FlagSpec::value(
        "--label-columns",
        Some("-L"),
        "Accepts a comma separated list of labels that are going to be presented as columns. Names are case-sensitive.",
        FlagValue::Text,
    ),
    NO_HEADERS,
    OUTPUT,
    OUTPUT_VERSION,
    FlagSpec::value(
        "--raw",
        None,
        "Raw URI to request from the server. Uses the transport specified by the kubeconfig file.",
        FlagValue::Text,
    ),
    RECURSIVE,
    SELECTOR,
    SHOW_ALL,
    FlagSpec::switch("--show-kind", None, "If present, list the resource type for the requested object(s)."),
    SHOW_LABELS,
    SORT_BY,
    TEMPLATE,
    FlagSpec::switch("--watch", Some("-w"), "After listing/getting the requested object, watch for changes."),
    FlagSpec::switch(
        "--watch-only",
        None,
        "Watch for changes to the requested object(s), without listing/getting first.",
    ),
];

pub(crate) static DESCRIBE: &[FlagSpec] = &[
    ALL_NAMESPACES,
    filename("Filename, directory, or URL to files containing the resource to describe"),
    INCLUDE_EXTENDED_APIS,
    RECURSIVE,
    SELECTOR,
    FlagSpec::switch("--show-events", None, "If true, display events related to the described object."),
];

pub(crate) static CREATE: &[FlagSpec] = &[
    ALLOW_MISSING_TEMPLATE_KEYS,
    DRY_RUN,
    FlagSpec::switch("--edit", None, "Edit the API resource before creating"),
    filename("Filename, directory, or URL to files to use to create the resource"),
    INCLUDE_EXTENDED_APIS,
    NO_HEADERS,
    OUTPUT,
    OUTPUT_VERSION,
    RECORD,
    RECURSIVE,
    SAVE_CONFIG,
    FlagSpec::value(
        "--schema-cache-dir",
        None,
        "If non-empty, load/store cached API schemas in this directory, default is '$HOME/.kube/schema'",
        FlagValue::Text,
    ),
    SHOW_ALL,
    SHOW_LABELS,
    SORT_BY,
    TEMPLATE,
    VALIDATE,
    WINDOWS_LINE_ENDINGS,
];

pub(crate) static REPLACE: &[FlagSpec] = &[
    FlagSpec::value(
        "--cascade",
        None,
        "Must be \"background\", \"orphan\", or \"foreground\". Selects the deletion cascading strategy for the dependents.",
        CASCADE_MODES,
    ),
    filename("Filename, directory, or URL to files to use to replace the resource."),
    FORCE,
    GRACE_PERIOD,
    OUTPUT,
    RECURSIVE,
    SAVE_CONFIG,
    TIMEOUT,
    VALIDATE,
];

pub(crate) static PATCH: &[FlagSpec] = &[
    DRY_RUN,
    filename("Filename, directory, or URL to files identifying the resource to update"),
    LOCAL,
    OUTPUT,
    FlagSpec::value("--patch", Some("-p"), "The patch to be applied to the resource JSON file.", FlagValue::Text),
    RECURSIVE,
    FlagSpec::value(
        "--type",
        None,
        "The type of patch being provided; one of [json merge strategic]",
        FlagValue::Choices(&["json", "merge", "strategic"]),
    ),
];

pub(crate) static DELETE: &[FlagSpec] = &[
    ALL,
    ALL_NAMESPACES,
    FlagSpec::value(
        "--cascade",
        None,
        "Must be \"background\", \"orphan\", or \"foreground\". Selects the deletion cascading strategy for the dependents.",
        CASCADE_MODES,
    ),
    filename("containing the resource to delete."),
    FORCE,
    GRACE_PERIOD,
    FlagSpec::switch(
        "--ignore-not-found",
        None,
        "Treat \"resource not found\" as a successful delete.",
    ),
    SELECTOR,
    FlagSpec::switch("--now", None, "If true, resources are signaled for immediate shutdown (same as --grace-period=1)."),
    FlagSpec::value(
        "--output",
        Some("-o"),
        "Output mode. Use \"-o name\" for shorter output (resource/name).",
        FlagValue::Choices(&["name"]),
    ),
    RECURSIVE,
    TIMEOUT,
    FlagSpec::switch("--wait", None, "If true, wait for resources to be gone before returning."),
];

pub(crate) static EDIT: &[FlagSpec] = &[
    filename("Filename, directory, or URL to files to use to edit the resource"),
    OUTPUT,
    FlagSpec::switch(
        "--output-patch",
        None,
        "Output the patch if the resource is edited.",
    ),
    RECORD,
    RECURSIVE,
    SAVE_CONFIG,
    VALIDATE,
    WINDOWS_LINE_ENDINGS,
];

pub(crate) static APPLY: &[FlagSpec] = &[
    ALL,
    DRY_RUN,
    filename("The files that contain the configurations to apply."),
    FORCE,
    FlagSpec::value(
        "--kustomize",
        Some("-k"),
        "Process a kustomization directory. This flag can't be used together with -f or -R.",
        MANIFESTS,
    ),
    OUTPUT,
    FlagSpec::switch(
        "--prune",
        None,
        "Automatically delete resource objects that do not appear in the configs and are created by either apply or create --save-config.",
    ),
    RECURSIVE,
    SELECTOR,
    FlagSpec::switch("--server-side", None, "If true, apply runs in the server instead of the client."),
    VALIDATE,
];

pub(crate) static LOGS: &[FlagSpec] = &[
    FlagSpec::switch("--all-containers", None, "Get all containers' logs in the pod(s)."),
    CONTAINER,
    FlagSpec::switch("--follow", Some("-f"), "Specify if the logs should be streamed."),
    FlagSpec::switch(
        "--previous",
        Some("-p"),
        "If true, print the logs for the previous instance of the container in a pod if it exists.",
    ),
    SELECTOR,
    FlagSpec::value(
        "--since",
        None,
        "Only return logs newer than a relative duration like 5s, 2m, or 3h.",
        FlagValue::Text,
    ),
    FlagSpec::value(
        "--since-time",
        None,
        "Only return logs after a specific date (RFC3339).",
        FlagValue::Text,
    ),
    FlagSpec::value(
        "--tail",
        None,
        "Lines of recent log file to display. Defaults to -1 with no selector, showing all log lines.",
        FlagValue::Text,
    ),
    FlagSpec::switch("--timestamps", None, "Include timestamps on each line in the log output"),
];

pub(crate) static ATTACH: &[FlagSpec] = &[CONTAINER, STDIN, TTY];

pub(crate) static EXEC: &[FlagSpec] = &[CONTAINER, STDIN, TTY];

pub(crate) static PORT_FORWARD: &[FlagSpec] = &[
    FlagSpec::value(
        "--address",
        None,
        "Addresses to listen on (comma separated).",
        FlagValue::Text,
    ),
    FlagSpec::value(
        "--pod-running-timeout",
        None,
        "The length of time (like 5s, 2m, or 3h, higher than zero) to wait until at least one pod is running",
        FlagValue::Text,
    ),
];

pub(crate) static ROLLING_UPDATE: &[FlagSpec] = &[
    FlagSpec::value("--image", None, "Image to use for upgrading the replication controller.", FlagValue::Text),
    FlagSpec::switch("--rollback", None, "If true, this is a request to abort an existing rollout that is partially rolled out."),
    FlagSpec::value(
        "--update-period",
        None,
        "Time to wait between updating pods.",
        FlagValue::Text,
    ),
    filename("Filename or URL to file to use to create the new replication controller."),
    DRY_RUN,
    OUTPUT,
];

pub(crate) static SCALE: &[FlagSpec] = &[
    ALL,
    FlagSpec::value(
        "--current-replicas",
        None,
        "Precondition for current size. Requires that the current size of the resource match this value in order to scale.",
        FlagValue::Text,
    ),
    filename("Filename, directory, or URL to files identifying the resource to set a new size"),
    OUTPUT,
    RECURSIVE,
    FlagSpec::value("--replicas", None, "The new desired number of replicas. Required.", FlagValue::Text),
    SELECTOR,
    TIMEOUT,
];

pub(crate) static CORDON: &[FlagSpec] = &[DRY_RUN, SELECTOR];

pub(crate) static DRAIN: &[FlagSpec] = &[
    FlagSpec::switch(
        "--delete-emptydir-data",
        None,
        "Continue even if there are pods using emptyDir (local data that will be deleted when the node is drained).",
    ),
    DRY_RUN,
    FlagSpec::switch(
        "--force",
        None,
        "Continue even if there are pods that do not declare a controller.",
    ),
    GRACE_PERIOD,
    FlagSpec::switch("--ignore-daemonsets", None, "Ignore DaemonSet-managed pods."),
    FlagSpec::value(
        "--pod-selector",
        None,
        "Label selector to filter pods on the node",
        FlagValue::Text,
    ),
    SELECTOR,
    TIMEOUT,
];

pub(crate) static PROXY: &[FlagSpec] = &[
    FlagSpec::value(
        "--accept-hosts",
        None,
        "Regular expression for hosts that the proxy should accept.",
        FlagValue::Text,
    ),
    FlagSpec::value("--address", None, "The IP address on which to serve on.", FlagValue::Text),
    FlagSpec::value("--api-prefix", None, "Prefix to serve the proxied API under.", FlagValue::Text),
    FlagSpec::value("--port", Some("-p"), "The port on which to run the proxy. Set to 0 to pick a random port.", FlagValue::Text),
    FlagSpec::value(
        "--www",
        Some("-w"),
        "Also serve static files from the given directory under the specified prefix.",
        ANY_FILE,
    ),
    FlagSpec::value(
        "--www-prefix",
        Some("-P"),
        "Prefix to serve static files under, if static file directory is specified.",
        FlagValue::Text,
    ),
];

pub(crate) static RUN: &[FlagSpec] = &[
    FlagSpec::switch("--command", None, "If true and extra arguments are present, use them as the 'command' field in the container."),
    DRY_RUN,
    FlagSpec::value("--env", None, "Environment variables to set in the container.", FlagValue::Text),
    FlagSpec::value("--image", None, "The image for the container to run.", FlagValue::Text),
    FlagSpec::value(
        "--labels",
        Some("-l"),
        "Comma separated labels to apply to the pod(s). Will override previous values.",
        FlagValue::Text,
    ),
    FlagSpec::value(
        "--overrides",
        None,
        "An inline JSON override for the generated object.",
        FlagValue::Text,
    ),
    FlagSpec::value("--port", None, "The port that this container exposes.", FlagValue::Text),
    FlagSpec::value(
        "--restart",
        None,
        "The restart policy for this Pod. Legal values [Always, OnFailure, Never].",
        FlagValue::Choices(&["Always", "OnFailure", "Never"]),
    ),
    FlagSpec::switch("--rm", None, "If true, delete the pod after it exits. Only valid when attaching to the container."),
    STDIN,
    TTY,
];

pub(crate) static EXPOSE: &[FlagSpec] = &[
    DRY_RUN,
    FlagSpec::value(
        "--external-ip",
        None,
        "Additional external IP address (not managed by Kubernetes) to accept for the service.",
        FlagValue::Text,
    ),
    filename("Filename, directory, or URL to files identifying the resource to expose a service"),
    FlagSpec::value("--name", None, "The name for the newly created object.", FlagValue::Text),
    OUTPUT,
    FlagSpec::value("--port", None, "The port that the service should serve on.", FlagValue::Text),
    FlagSpec::value(
        "--protocol",
        None,
        "The network protocol for the service to be created.",
        FlagValue::Choices(&["TCP", "UDP", "SCTP"]),
    ),
    FlagSpec::value(
        "--selector",
        None,
        "A label selector to use for this service.",
        FlagValue::Text,
    ),
    FlagSpec::value(
        "--target-port",
        None,
        "Name or number for the port on the container that the service should direct traffic to.",
        FlagValue::Text,
    ),
    FlagSpec::value(
        "--type",
        None,
        "Type for this service: ClusterIP, NodePort, LoadBalancer, or ExternalName.",
        FlagValue::Choices(&["ClusterIP", "NodePort", "LoadBalancer", "ExternalName"]),
    ),
];

pub(crate) static AUTOSCALE: &[FlagSpec] = &[
    FlagSpec::value(
        "--cpu-percent",
        None,
        "The target average CPU utilization (represented as a percent of requested CPU) over all the pods.",
        FlagValue::Text,
    ),
    DRY_RUN,
    filename("Filename, directory, or URL to files identifying the resource to autoscale."),
    FlagSpec::value("--max", None, "The upper limit for the number of pods that can be set by the autoscaler. Required.", FlagValue::Text),
    FlagSpec::value("--min", None, "The lower limit for the number of pods that can be set by the autoscaler.", FlagValue::Text),
    FlagSpec::value("--name", None, "The name for the newly created object.", FlagValue::Text),
    OUTPUT,
];

pub(crate) static ROLLOUT: &[FlagSpec] = &[
    filename("Filename, directory, or URL to files identifying the resource to get from a server."),
    RECURSIVE,
    FlagSpec::value(
        "--revision",
        None,
        "See the details, including podTemplate of the revision specified",
        FlagValue::Text,
    ),
    FlagSpec::value(
        "--to-revision",
        None,
        "The revision to rollback to. Default to 0 (last revision).",
        FlagValue::Text,
    ),
];

pub(crate) static LABEL: &[FlagSpec] = &[
    ALL,
    DRY_RUN,
    filename("Filename, directory, or URL to files identifying the resource to update the labels"),
    FlagSpec::switch("--list", None, "If true, display the labels for a given resource."),
    LOCAL,
    OUTPUT,
    OVERWRITE,
    RECURSIVE,
    FlagSpec::value(
        "--resource-version",
        None,
        "If non-empty, the labels update will only succeed if this is the current resource-version for the object.",
        FlagValue::Text,
    ),
    SELECTOR,
];

pub(crate) static ANNOTATE: &[FlagSpec] = &[
    ALL,
    DRY_RUN,
    filename("Filename, directory, or URL to files identifying the resource to update the annotation"),
    FlagSpec::switch("--list", None, "If true, display the annotations for a given resource."),
    LOCAL,
    OUTPUT,
    OVERWRITE,
    RECURSIVE,
    FlagSpec::value(
        "--resource-version",
        None,
        "If non-empty, the annotation update will only succeed if this is the current resource-version for the object.",
        FlagValue::Text,
    ),
    SELECTOR,
];

pub(crate) static CLUSTER_INFO: &[FlagSpec] = &[INCLUDE_EXTENDED_APIS];

pub(crate) static EXPLAIN: &[FlagSpec] = &[
    FlagSpec::value(
        "--api-version",
        None,
        "Get different explanations for particular API version (API group/version)",
        FlagValue::Text,
    ),
    INCLUDE_EXTENDED_APIS,
    FlagSpec::switch("--recursive", None, "Print the fields of fields (Currently only 1 level deep)"),
];

pub(crate) static CONVERT: &[FlagSpec] = &[
    filename("Filename, directory, or URL to files to need to get converted."),
    LOCAL,
    OUTPUT,
    OUTPUT_VERSION,
    RECURSIVE,
    VALIDATE,
];

pub(crate) static TOP: &[FlagSpec] = &[
    ALL_NAMESPACES,
    FlagSpec::switch("--containers", None, "If present, print usage of containers within a pod."),
    NO_HEADERS,
    SELECTOR,
    FlagSpec::value(
        "--sort-by",
        None,
        "If non-empty, sort pods list using specified field. The field can be either 'cpu' or 'memory'.",
        FlagValue::Choices(&["cpu", "memory"]),
    ),
];

pub(crate) static VERSION: &[FlagSpec] = &[
    FlagSpec::switch("--client", None, "If true, shows client version only (no server required)."),
    FlagSpec::value(
        "--output",
        Some("-o"),
        "One of 'yaml' or 'json'.",
        FlagValue::Choices(&["yaml", "json"]),
    ),
];

pub(crate) static NONE: &[FlagSpec] = &[];
