// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::requeue::DEFAULT_RESYNC_SECS;
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Image substituted into the webhook Deployment template
    pub webhook_image: String,
    /// Name of the cluster-scoped operator resource to reconcile
    pub operator_resource_name: String,
    pub resync_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let webhook_image =
            env::var("WEBHOOK_IMAGE").context("WEBHOOK_IMAGE environment variable not set")?;
        let operator_resource_name =
            env::var("OPERATOR_RESOURCE_NAME").unwrap_or_else(|_| "cluster".to_string());
        let resync_secs = match env::var("RESYNC_INTERVAL_SECS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("RESYNC_INTERVAL_SECS is not a number: {}", v))?,
            Err(_) => DEFAULT_RESYNC_SECS,
        };

        Ok(Config {
            webhook_image,
            operator_resource_name,
            resync_interval: Duration::from_secs(resync_secs),
        })
    }
}
