// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reading the operator resource and writing its status

use crate::error::{OperatorError, Result};
use crate::types::operator::{CSISnapshotController, OperatorCondition, OperatorStatus};
use kube::{
    api::{Patch, PatchParams},
    Api, Client, ResourceExt,
};
use serde_json::json;
use tracing::{debug, info, instrument};

/// Fetch the operator resource; `None` when it does not exist yet.
#[instrument(skip(client))]
pub async fn get_operator_state(client: &Client, name: &str) -> Result<Option<CSISnapshotController>> {
    let api: Api<CSISnapshotController> = Api::all(client.clone());
    Ok(api.get_opt(name).await?)
}

/// Apply `update` to a fresh copy of the operator status and write it back.
///
/// All changes land in a single patch guarded by the read `resourceVersion`,
/// so a concurrent writer produces a conflict instead of a partial update.
/// Returns whether anything was written.
#[instrument(skip(client, update))]
pub async fn update_status<F>(client: &Client, name: &str, update: F) -> Result<bool>
where
    F: FnOnce(&mut OperatorStatus),
{
    let api: Api<CSISnapshotController> = Api::all(client.clone());
    let current = api
        .get_opt(name)
        .await
        .map_err(|e| OperatorError::StatusUpdate(format!("failed to read {}: {}", name, e)))?
        .ok_or_else(|| OperatorError::StatusUpdate(format!("operator resource {} not found", name)))?;

    let old_status = current.status.clone().unwrap_or_default();
    let mut new_status = old_status.clone();
    update(&mut new_status);

    if new_status == old_status {
        debug!("Operator status unchanged, skipping write");
        return Ok(false);
    }

    let patch = json!({
        "metadata": { "resourceVersion": current.resource_version() },
        "status": new_status,
    });
    api.patch_status(name, &PatchParams::default(), &Patch::Merge(&patch))
        .await
        .map_err(|e| OperatorError::StatusUpdate(format!("failed to write status of {}: {}", name, e)))?;

    info!("Updated operator status");
    Ok(true)
}

pub async fn update_condition(client: &Client, name: &str, condition: OperatorCondition) -> Result<bool> {
    update_status(client, name, |status| status.set_condition(condition)).await
}
