// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-or-update of managed objects with change detection.
//!
//! An object is written only when the live copy is missing, lacks a required
//! label or annotation (the spec hash among them), or carries a generation
//! other than the one this operator last recorded for it.

use crate::constants::OPERATOR_NAME;
use crate::error::{OperatorError, Result};
use crate::kubernetes::events::EventSink;
use crate::render::set_spec_hash_annotation;
use k8s_openapi::api::admissionregistration::v1::{ValidatingWebhook, ValidatingWebhookConfiguration};
use k8s_openapi::api::apps::v1::Deployment;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client, Resource, ResourceExt,
};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use tracing::{debug, info, instrument};

/// Apply the webhook Deployment, returning the live object and whether it was written.
#[instrument(skip_all, fields(deployment = %required.name_any()))]
pub async fn apply_deployment(
    client: &Client,
    events: &EventSink,
    mut required: Deployment,
    expected_generation: Option<i64>,
) -> Result<(Deployment, bool)> {
    set_spec_hash_annotation(&mut required.metadata, &required.spec)?;
    let namespace = required.namespace().unwrap_or_default();
    let api: Api<Deployment> = Api::namespaced(client.clone(), &namespace);

    apply_resource(&api, events, required, expected_generation, |required, mut existing| {
        merge_metadata(&mut existing.metadata, &required.metadata);
        existing.spec = required.spec.clone();
        existing
    })
    .await
}

/// Apply the admission hook registration, keeping injected CA bundles.
#[instrument(skip_all, fields(webhook = %required.name_any()))]
pub async fn apply_validating_webhook_configuration(
    client: &Client,
    events: &EventSink,
    required: ValidatingWebhookConfiguration,
    expected_generation: Option<i64>,
) -> Result<(ValidatingWebhookConfiguration, bool)> {
    let api: Api<ValidatingWebhookConfiguration> = Api::all(client.clone());

    apply_resource(&api, events, required, expected_generation, |required, mut existing| {
        merge_metadata(&mut existing.metadata, &required.metadata);
        let mut webhooks = required.webhooks.clone();
        if let (Some(webhooks), Some(live)) = (webhooks.as_mut(), existing.webhooks.as_ref()) {
            preserve_ca_bundles(webhooks, live);
        }
        existing.webhooks = webhooks;
        existing
    })
    .await
}

async fn apply_resource<K, F>(
    api: &Api<K>,
    events: &EventSink,
    required: K,
    expected_generation: Option<i64>,
    merge: F,
) -> Result<(K, bool)>
where
    K: Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned,
    F: FnOnce(&K, K) -> K,
{
    let kind = K::kind(&()).to_string();
    let name = required.name_any();
    let params = PostParams {
        field_manager: Some(OPERATOR_NAME.to_string()),
        ..Default::default()
    };

    let existing = api.get_opt(&name).await.map_err(|source| OperatorError::Apply {
        kind: kind.clone(),
        name: name.clone(),
        source,
    })?;

    let Some(existing) = existing else {
        return match api.create(&params, &required).await {
            Ok(created) => {
                info!("Created {} {}", kind, name);
                events
                    .normal(&created, &format!("{}Created", kind), format!("Created {} {}", kind, name))
                    .await;
                Ok((created, true))
            }
            Err(source) => {
                events
                    .warning(&required, &format!("{}CreateFailed", kind), source.to_string())
                    .await;
                Err(OperatorError::Apply { kind, name, source })
            }
        };
    };

    if !needs_update(existing.meta(), required.meta(), expected_generation) {
        debug!("{} {} is up to date", kind, name);
        return Ok((existing, false));
    }

    let updated = merge(&required, existing);
    match api.replace(&name, &params, &updated).await {
        Ok(live) => {
            info!("Updated {} {}", kind, name);
            events
                .normal(&live, &format!("{}Updated", kind), format!("Updated {} {}", kind, name))
                .await;
            Ok((live, true))
        }
        Err(source) => {
            events
                .warning(&updated, &format!("{}UpdateFailed", kind), source.to_string())
                .await;
            Err(OperatorError::Apply { kind, name, source })
        }
    }
}

/// Whether the live object diverges from what this operator wants it to be.
pub fn needs_update(existing: &ObjectMeta, required: &ObjectMeta, expected_generation: Option<i64>) -> bool {
    let edited_out_of_band = expected_generation.is_some_and(|g| existing.generation != Some(g));

    edited_out_of_band
        || !is_subset(required.labels.as_ref(), existing.labels.as_ref())
        || !is_subset(required.annotations.as_ref(), existing.annotations.as_ref())
}

fn is_subset(required: Option<&BTreeMap<String, String>>, existing: Option<&BTreeMap<String, String>>) -> bool {
    required.map_or(true, |required| {
        required
            .iter()
            .all(|(k, v)| existing.and_then(|e| e.get(k)) == Some(v))
    })
}

/// Layer required labels and annotations over the live ones.
fn merge_metadata(existing: &mut ObjectMeta, required: &ObjectMeta) {
    if let Some(labels) = &required.labels {
        existing
            .labels
            .get_or_insert_with(Default::default)
            .extend(labels.clone());
    }
    if let Some(annotations) = &required.annotations {
        existing
            .annotations
            .get_or_insert_with(Default::default)
            .extend(annotations.clone());
    }
}

fn preserve_ca_bundles(required: &mut [ValidatingWebhook], live: &[ValidatingWebhook]) {
    for webhook in required
        .iter_mut()
        .filter(|w| w.client_config.ca_bundle.is_none())
    {
        if let Some(existing) = live.iter().find(|l| l.name == webhook.name) {
            webhook.client_config.ca_bundle = existing.client_config.ca_bundle.clone();
        }
    }
}
