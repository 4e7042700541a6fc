// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Desired webhook Deployment, rendered fresh on every cycle.

use super::{LogLevel, ManifestTemplates};
use crate::constants::placeholders;
use crate::error::{OperatorError, Result};
use k8s_openapi::api::apps::v1::Deployment;
use std::collections::BTreeMap;
use tracing::debug;

/// Values substituted into the Deployment template
#[derive(Debug, Clone)]
pub struct RenderParams<'a> {
    pub image: &'a str,
    /// Raw `logLevel` from the operator resource
    pub log_level: Option<&'a str>,
}

/// Replace every placeholder in the template text.
pub fn substitute(template: &str, params: &RenderParams<'_>) -> Result<String> {
    let verbosity = LogLevel::parse(params.log_level)?.verbosity();
    Ok(template
        .replace(placeholders::WEBHOOK_IMAGE, params.image)
        .replace(placeholders::LOG_LEVEL, &verbosity.to_string()))
}

pub fn render_deployment(templates: &ManifestTemplates, params: &RenderParams<'_>) -> Result<Deployment> {
    let manifest = substitute(&templates.deployment, params)?;
    let deployment: Deployment =
        serde_yaml::from_str(&manifest).map_err(|source| OperatorError::TemplateDecode {
            asset: "deployment",
            source,
        })?;
    debug!(image = params.image, "Rendered webhook deployment");
    Ok(deployment)
}

/// Node selector of the Deployment's pod template
pub fn node_selector(deployment: &Deployment) -> BTreeMap<String, String> {
    deployment
        .spec
        .as_ref()
        .and_then(|s| s.template.spec.as_ref())
        .and_then(|p| p.node_selector.clone())
        .unwrap_or_default()
}

pub fn set_replicas(deployment: &mut Deployment, replicas: i32) {
    deployment.spec.get_or_insert_with(Default::default).replicas = Some(replicas);
}
