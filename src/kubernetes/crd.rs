// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Startup gate on the operator resource type being served.

use crate::constants::crd::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::Result;
use crate::types::operator::CSISnapshotController;
use kube::{api::ListParams, Api, Client};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Whether the API server serves `csisnapshotcontrollers`. A 404 on the
/// collection means the CRD is not installed (or not yet established).
pub async fn operator_crd_served(client: &Client) -> Result<bool> {
    let api: Api<CSISnapshotController> = Api::all(client.clone());
    match api.list(&ListParams::default().limit(1)).await {
        Ok(_) => Ok(true),
        Err(kube::Error::Api(response)) if response.code == 404 => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Block until the operator CRD is served, doubling the delay between
/// attempts up to `POLL_MAX_INTERVAL_SECS`.
#[instrument(skip(client))]
pub async fn wait_for_operator_crd(client: &Client) -> Result<()> {
    let max_delay = Duration::from_secs(POLL_MAX_INTERVAL_SECS);
    let mut delay = Duration::from_secs(POLL_INTERVAL_SECS);

    loop {
        match operator_crd_served(client).await {
            Ok(true) => return Ok(()),
            Ok(false) => debug!(?delay, "csisnapshotcontrollers not served yet"),
            Err(e) => warn!(?delay, "Listing csisnapshotcontrollers failed: {}", e),
        }
        tokio::time::sleep(delay).await;
        delay = max_delay.min(delay * 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OperatorError;
    use crate::test_utils::{status_json, MockService};

    const COLLECTION_PATH: &str = "/apis/operator.openshift.io/v1/csisnapshotcontrollers";

    fn empty_list() -> String {
        serde_json::json!({
            "apiVersion": "operator.openshift.io/v1",
            "kind": "CSISnapshotControllerList",
            "metadata": { "resourceVersion": "1" },
            "items": []
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_crd_served_when_list_succeeds() {
        let mock = MockService::new().on_get(COLLECTION_PATH, 200, &empty_list());

        assert!(operator_crd_served(&mock.clone().into_client()).await.unwrap());
        let request = &mock.requests()[0];
        assert!(request.query.as_deref().unwrap_or_default().contains("limit=1"));
    }

    #[tokio::test]
    async fn test_crd_not_served_on_not_found() {
        let mock = MockService::new();
        assert!(!operator_crd_served(&mock.into_client()).await.unwrap());
    }

    #[tokio::test]
    async fn test_crd_check_surfaces_other_failures() {
        let mock = MockService::new().on_get(
            COLLECTION_PATH,
            403,
            &status_json(403, "Forbidden", "csisnapshotcontrollers is forbidden"),
        );

        let err = operator_crd_served(&mock.into_client()).await.unwrap_err();
        assert!(matches!(err, OperatorError::KubeError(_)));
    }

    #[tokio::test]
    async fn test_wait_returns_once_served() {
        let mock = MockService::new().on_get(COLLECTION_PATH, 200, &empty_list());
        wait_for_operator_crd(&mock.clone().into_client()).await.unwrap();
        assert_eq!(mock.count("GET", COLLECTION_PATH), 1);
    }
}
