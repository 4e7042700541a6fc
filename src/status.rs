// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Available / Progressing conditions derived from the live Deployment.

use crate::constants::CONTROLLER_NAME;
use crate::types::operator::{ConditionStatus, OperatorCondition};
use k8s_openapi::api::apps::v1::Deployment;

pub const REASON_DEPLOYING: &str = "Deploying";
pub const REASON_SYNC_ERROR: &str = "SyncError";

pub fn available_type() -> String {
    format!("{}Available", CONTROLLER_NAME)
}

pub fn progressing_type() -> String {
    format!("{}Progressing", CONTROLLER_NAME)
}

pub fn degraded_type() -> String {
    format!("{}Degraded", CONTROLLER_NAME)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSet {
    pub available: OperatorCondition,
    pub progressing: OperatorCondition,
}

pub fn compute_conditions(deployment: &Deployment) -> ConditionSet {
    ConditionSet {
        available: available_condition(deployment),
        progressing: progressing_condition(deployment),
    }
}

/// A single available replica is enough to report Available.
fn available_condition(deployment: &Deployment) -> OperatorCondition {
    let available_replicas = deployment
        .status
        .as_ref()
        .and_then(|s| s.available_replicas)
        .unwrap_or(0);

    let condition =
        OperatorCondition::new(available_type(), ConditionStatus::from(available_replicas > 0));
    if condition.is_true() {
        condition
    } else {
        condition.with_reason(
            REASON_DEPLOYING,
            "Waiting for a validating webhook Deployment pod to start",
        )
    }
}

/// Progressing clears only once the last write was observed and every
/// desired replica runs the updated template.
fn progressing_condition(deployment: &Deployment) -> OperatorCondition {
    let status = deployment.status.as_ref();
    let generation = deployment.metadata.generation.unwrap_or(0);
    let observed_generation = status.and_then(|s| s.observed_generation).unwrap_or(0);

    if observed_generation != generation {
        return OperatorCondition::new(progressing_type(), ConditionStatus::True).with_reason(
            REASON_DEPLOYING,
            format!(
                "desired generation {}, current generation {}",
                generation, observed_generation
            ),
        );
    }

    // Unset replicas are read as the API server default of 1 so Progressing
    // always resolves to True or False rather than staying empty
    let desired = deployment
        .spec
        .as_ref()
        .and_then(|s| s.replicas)
        .unwrap_or(1);
    let updated = status.and_then(|s| s.updated_replicas).unwrap_or(0);

    if updated == desired {
        OperatorCondition::new(progressing_type(), ConditionStatus::False)
    } else {
        OperatorCondition::new(progressing_type(), ConditionStatus::True).with_reason(
            REASON_DEPLOYING,
            format!("{} out of {} pods running", updated, desired),
        )
    }
}

pub fn degraded_condition(error: Option<&str>) -> OperatorCondition {
    match error {
        None => OperatorCondition::new(degraded_type(), ConditionStatus::False),
        Some(message) => OperatorCondition::new(degraded_type(), ConditionStatus::True)
            .with_reason(REASON_SYNC_ERROR, message),
    }
}
