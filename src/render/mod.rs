// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Rendering of the desired Deployment and ValidatingWebhookConfiguration from
//! the embedded manifest templates.

pub mod deployment;
pub mod hash;
pub mod loglevel;
pub mod webhook;

pub use deployment::{render_deployment, RenderParams};
pub use hash::{set_spec_hash_annotation, spec_hash};
pub use loglevel::LogLevel;
pub use webhook::render_webhook_config;

use std::borrow::Cow;

/// Manifest templates, loaded once at startup and shared by every cycle.
#[derive(Debug, Clone)]
pub struct ManifestTemplates {
    pub deployment: Cow<'static, str>,
    pub webhook_config: Cow<'static, str>,
}

impl ManifestTemplates {
    /// The templates compiled into the binary
    pub fn embedded() -> Self {
        Self {
            deployment: Cow::Borrowed(include_str!("../../assets/webhook_deployment.yaml")),
            webhook_config: Cow::Borrowed(include_str!("../../assets/webhook_config.yaml")),
        }
    }

    pub fn new(deployment: impl Into<String>, webhook_config: impl Into<String>) -> Self {
        Self {
            deployment: Cow::Owned(deployment.into()),
            webhook_config: Cow::Owned(webhook_config.into()),
        }
    }
}

impl Default for ManifestTemplates {
    fn default() -> Self {
        Self::embedded()
    }
}
