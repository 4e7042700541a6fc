// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OperatorError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("logLevel {0:?} is not a valid log level")]
    InvalidLogLevel(String),

    #[error("Failed to decode {asset} template: {source}")]
    TemplateDecode {
        asset: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to compute spec hash: {0}")]
    SpecHash(#[from] serde_json::Error),

    #[error("Failed to apply {kind} {name}: {source}")]
    Apply {
        kind: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to update operator status: {0}")]
    StatusUpdate(String),
}

impl OperatorError {
    /// Errors caused by static inputs that will not heal by retrying.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            OperatorError::InvalidLogLevel(_)
                | OperatorError::TemplateDecode { .. }
                | OperatorError::SpecHash(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, OperatorError>;
