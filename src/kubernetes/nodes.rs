// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Node listing by label selector

use crate::error::Result;
use k8s_openapi::api::core::v1::Node;
use kube::{api::ListParams, Api, Client};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Render an equality-based label selector, e.g. `a=1,b=`
pub fn label_selector(selector: &BTreeMap<String, String>) -> String {
    selector
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}

#[instrument(skip(client))]
pub async fn list_nodes(client: &Client, selector: &BTreeMap<String, String>) -> Result<Vec<Node>> {
    let nodes: Api<Node> = Api::all(client.clone());
    let mut params = ListParams::default();
    if !selector.is_empty() {
        params = params.labels(&label_selector(selector));
    }

    let list = nodes.list(&params).await?;
    debug!("Found {} nodes", list.items.len());
    Ok(list.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{node_list_json, MockService};

    #[test]
    fn test_label_selector_with_empty_value() {
        let selector = BTreeMap::from([
            ("node-role.kubernetes.io/master".to_string(), String::new()),
            ("zone".to_string(), "a".to_string()),
        ]);
        assert_eq!(label_selector(&selector), "node-role.kubernetes.io/master=,zone=a");
    }

    #[test]
    fn test_label_selector_empty() {
        assert_eq!(label_selector(&BTreeMap::new()), "");
    }

    #[tokio::test]
    async fn test_list_nodes_passes_selector() {
        let mock = MockService::new().on_get(
            "/api/v1/nodes",
            200,
            &node_list_json(&[&[("zone", "a")], &[("zone", "a")]]),
        );
        let client = mock.clone().into_client();

        let selector = BTreeMap::from([("zone".to_string(), "a".to_string())]);
        let nodes = list_nodes(&client, &selector).await.unwrap();

        assert_eq!(nodes.len(), 2);
        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].query.as_deref().unwrap_or_default().contains("labelSelector=zone"));
    }
}
