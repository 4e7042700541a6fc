// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::{set_spec_hash_annotation, ManifestTemplates};
use crate::error::{OperatorError, Result};
use k8s_openapi::api::admissionregistration::v1::ValidatingWebhookConfiguration;

/// Decode the static admission hook registration.
///
/// The hash of the `webhooks` list is stamped as an annotation so that a
/// template change shows up as a metadata difference on the live object.
pub fn render_webhook_config(templates: &ManifestTemplates) -> Result<ValidatingWebhookConfiguration> {
    let mut webhook: ValidatingWebhookConfiguration = serde_yaml::from_str(&templates.webhook_config)
        .map_err(|source| OperatorError::TemplateDecode {
            asset: "webhook configuration",
            source,
        })?;
    set_spec_hash_annotation(&mut webhook.metadata, &webhook.webhooks)?;
    Ok(webhook)
}
