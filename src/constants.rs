// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Name used for condition types, events and as the field manager on writes
pub const CONTROLLER_NAME: &str = "CSISnapshotWebhookController";

/// The operator name reported on Kubernetes events
pub const OPERATOR_NAME: &str = "csi-snapshot-webhook-operator";

/// Kubernetes annotation keys used by the operator
pub mod annotations {
    /// SHA-256 of the content that was last rendered for an object
    pub const SPEC_HASH: &str = "operator.openshift.io/spec-hash";
}

/// Identities of the objects this controller manages
pub mod managed {
    /// Namespace the webhook Deployment runs in
    pub const NAMESPACE: &str = "openshift-cluster-storage-operator";
    /// Name of the webhook Deployment
    pub const DEPLOYMENT_NAME: &str = "csi-snapshot-webhook";
    /// Name of the ValidatingWebhookConfiguration
    pub const WEBHOOK_CONFIG_NAME: &str = "snapshot.storage.k8s.io";
}

/// Template placeholders substituted before decoding
pub mod placeholders {
    pub const WEBHOOK_IMAGE: &str = "${WEBHOOK_IMAGE}";
    pub const LOG_LEVEL: &str = "${LOG_LEVEL}";
}

/// Requeue intervals for the reconciler
pub mod requeue {
    /// Delay before retrying a cycle that failed on a transient error
    pub const ERROR_RETRY_SECS: u64 = 60;
    /// Default periodic resync after a successful cycle
    pub const DEFAULT_RESYNC_SECS: u64 = 300;
}

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
