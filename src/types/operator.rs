// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::chrono::{SecondsFormat, Utc};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Cluster-scoped singleton that configures the snapshot webhook.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(
    group = "operator.openshift.io",
    version = "v1",
    kind = "CSISnapshotController",
    plural = "csisnapshotcontrollers"
)]
#[kube(status = "OperatorStatus")]
#[serde(rename_all = "camelCase")]
pub struct CSISnapshotControllerSpec {
    #[serde(default)]
    pub management_state: ManagementState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_log_level: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, schemars::JsonSchema)]
pub enum ManagementState {
    #[default]
    Managed,
    Unmanaged,
    Removed,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatorStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    #[serde(default)]
    pub conditions: Vec<OperatorCondition>,
    #[serde(default)]
    pub generations: Vec<GenerationStatus>,
}

impl OperatorStatus {
    /// Insert or replace the condition with the same type.
    ///
    /// `lastTransitionTime` is only moved when the status value changes.
    pub fn set_condition(&mut self, mut condition: OperatorCondition) {
        match self
            .conditions
            .iter_mut()
            .find(|c| c.condition_type == condition.condition_type)
        {
            Some(existing) => {
                if existing.status != condition.status || existing.last_transition_time.is_none() {
                    existing.last_transition_time = Some(now());
                }
                existing.status = condition.status;
                existing.reason = condition.reason;
                existing.message = condition.message;
            }
            None => {
                condition.last_transition_time = Some(now());
                self.conditions.push(condition);
            }
        }
    }

    pub fn condition(&self, condition_type: &str) -> Option<&OperatorCondition> {
        self.conditions
            .iter()
            .find(|c| c.condition_type == condition_type)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl From<bool> for ConditionStatus {
    fn from(value: bool) -> Self {
        if value {
            ConditionStatus::True
        } else {
            ConditionStatus::False
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatorCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OperatorCondition {
    pub fn new(condition_type: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            condition_type: condition_type.into(),
            status,
            last_transition_time: None,
            reason: None,
            message: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>, message: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self.message = Some(message.into());
        self
    }

    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }
}

/// Last generation of a managed object that this operator wrote.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatus {
    pub group: String,
    pub resource: String,
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    pub last_generation: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
