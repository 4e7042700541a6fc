// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Replica count for the webhook Deployment, derived from node topology.

use k8s_openapi::api::core::v1::Node;
use kube::ResourceExt;
use std::collections::BTreeMap;

/// Upper bound on webhook replicas, whatever the size of the cluster
pub const MAX_REPLICAS: i32 = 2;

/// A node qualifies when every selector pair is present in its labels.
pub fn node_matches(selector: &BTreeMap<String, String>, node: &Node) -> bool {
    let labels = node.labels();
    selector
        .iter()
        .all(|(key, value)| labels.get(key) == Some(value))
}

/// One replica for zero or one qualifying nodes, otherwise two.
pub fn size(selector: &BTreeMap<String, String>, nodes: &[Node]) -> i32 {
    let qualifying = nodes.iter().filter(|n| node_matches(selector, n)).count();
    replicas_for(qualifying)
}

fn replicas_for(qualifying_nodes: usize) -> i32 {
    if qualifying_nodes > 1 {
        MAX_REPLICAS
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::api::ObjectMeta;

    fn make_node(name: &str, labels: &[(&str, &str)]) -> Node {
        Node {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                labels: Some(
                    labels
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn master_selector() -> BTreeMap<String, String> {
        BTreeMap::from([("node-role.kubernetes.io/master".to_string(), String::new())])
    }

    fn masters(count: usize) -> Vec<Node> {
        (0..count)
            .map(|i| make_node(&format!("master-{}", i), &[("node-role.kubernetes.io/master", "")]))
            .collect()
    }

    #[test]
    fn test_replicas_never_leave_one_or_two() {
        for n in 0..50 {
            let expected = if n >= 2 { 2 } else { 1 };
            assert_eq!(size(&master_selector(), &masters(n)), expected, "nodes: {}", n);
        }
    }

    #[test]
    fn test_non_matching_nodes_are_ignored() {
        let mut nodes = masters(1);
        nodes.push(make_node("worker-0", &[("node-role.kubernetes.io/worker", "")]));
        nodes.push(make_node("worker-1", &[("node-role.kubernetes.io/worker", "")]));

        assert_eq!(size(&master_selector(), &nodes), 1);
    }

    #[test]
    fn test_selector_value_must_match_exactly() {
        let selector = BTreeMap::from([("zone".to_string(), "a".to_string())]);
        let node = make_node("n", &[("zone", "b")]);
        assert!(!node_matches(&selector, &node));
    }

    #[test]
    fn test_every_selector_pair_is_required() {
        let selector = BTreeMap::from([
            ("zone".to_string(), "a".to_string()),
            ("tier".to_string(), "infra".to_string()),
        ]);
        let partial = make_node("partial", &[("zone", "a")]);
        let full = make_node("full", &[("zone", "a"), ("tier", "infra"), ("extra", "x")]);

        assert!(!node_matches(&selector, &partial));
        assert!(node_matches(&selector, &full));
    }

    #[test]
    fn test_empty_selector_matches_every_node() {
        let nodes = vec![make_node("a", &[]), make_node("b", &[("x", "y")])];
        assert_eq!(size(&BTreeMap::new(), &nodes), 2);
    }
}
