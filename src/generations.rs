// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Last-applied generation records kept in the operator status.
//!
//! Records are keyed by group/resource/namespace/name. They are written only
//! after a successful apply and are passed back to the applier, which uses
//! them to notice out-of-band edits of a managed object.

use crate::types::operator::GenerationStatus;
use k8s_openapi::api::admissionregistration::v1::ValidatingWebhookConfiguration;
use k8s_openapi::api::apps::v1::Deployment;
use kube::ResourceExt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationKey {
    pub group: String,
    pub resource: String,
    pub namespace: String,
    pub name: String,
}

impl GenerationKey {
    pub fn new(group: &str, resource: &str, namespace: &str, name: &str) -> Self {
        Self {
            group: group.to_string(),
            resource: resource.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    pub fn for_deployment(deployment: &Deployment) -> Self {
        Self::new(
            "apps",
            "deployments",
            &deployment.namespace().unwrap_or_default(),
            &deployment.name_any(),
        )
    }

    pub fn for_validating_webhook_configuration(webhook: &ValidatingWebhookConfiguration) -> Self {
        Self::new(
            "admissionregistration.k8s.io",
            "validatingwebhookconfigurations",
            "",
            &webhook.name_any(),
        )
    }

    fn matches(&self, record: &GenerationStatus) -> bool {
        record.group == self.group
            && record.resource == self.resource
            && record.namespace == self.namespace
            && record.name == self.name
    }
}

/// Generation recorded for `key`, if this operator ever applied it
pub fn expected_generation(records: &[GenerationStatus], key: &GenerationKey) -> Option<i64> {
    records
        .iter()
        .find(|r| key.matches(r))
        .map(|r| r.last_generation)
}

/// Record the generation of a freshly applied object.
///
/// Objects without a server-assigned generation leave the records untouched.
pub fn set_generation(records: &mut Vec<GenerationStatus>, key: &GenerationKey, generation: Option<i64>) {
    let Some(generation) = generation else {
        return;
    };

    match records.iter_mut().find(|r| key.matches(r)) {
        Some(record) => record.last_generation = generation,
        None => records.push(GenerationStatus {
            group: key.group.clone(),
            resource: key.resource.clone(),
            namespace: key.namespace.clone(),
            name: key.name.clone(),
            last_generation: generation,
            hash: None,
        }),
    }
}

pub fn set_deployment_generation(records: &mut Vec<GenerationStatus>, deployment: &Deployment) {
    set_generation(
        records,
        &GenerationKey::for_deployment(deployment),
        deployment.metadata.generation,
    );
}

pub fn set_validating_webhook_configuration_generation(
    records: &mut Vec<GenerationStatus>,
    webhook: &ValidatingWebhookConfiguration,
) {
    set_generation(
        records,
        &GenerationKey::for_validating_webhook_configuration(webhook),
        webhook.metadata.generation,
    );
}
