// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A request seen by the mock API server
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Vec<u8>,
}

/// A mock HTTP service that returns predefined responses based on request
/// method and path, and records every request it receives.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests seen for the method and exact path
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Requests that could modify state, ignoring best-effort event writes
    pub fn writes(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != "GET" && !r.path.contains("/events"))
            .collect()
    }

    /// Decode the body of the latest request for the method and path
    pub fn last_body<T: DeserializeOwned>(&self, method: &str, path: &str) -> Option<T> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .and_then(|r| serde_json::from_slice(&r.body).ok())
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(str::to_string);

        let response = self.find_response(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let body = req
                .into_body()
                .collect()
                .await
                .map(|collected| collected.to_bytes().to_vec())
                .unwrap_or_default();
            requests.lock().unwrap().push(RecordedRequest {
                method,
                path,
                query,
                body,
            });

            let (status, body) = response.unwrap_or_else(|| (404, status_json(404, "NotFound", "not found")));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// A `Status` failure body as returned by the API server
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// The `cluster` operator resource with the given spec and status
pub fn operator_json(
    management_state: &str,
    log_level: Option<&str>,
    status: Option<serde_json::Value>,
) -> String {
    let mut spec = serde_json::json!({ "managementState": management_state });
    if let Some(level) = log_level {
        spec["logLevel"] = level.into();
    }
    let mut operator = serde_json::json!({
        "apiVersion": "operator.openshift.io/v1",
        "kind": "CSISnapshotController",
        "metadata": {
            "name": "cluster",
            "uid": "operator-uid",
            "resourceVersion": "42",
            "generation": 1
        },
        "spec": spec
    });
    if let Some(status) = status {
        operator["status"] = status;
    }
    operator.to_string()
}

/// A NodeList with one node per label set
pub fn node_list_json(nodes: &[&[(&str, &str)]]) -> String {
    let items: Vec<_> = nodes
        .iter()
        .enumerate()
        .map(|(i, labels)| {
            let labels: serde_json::Map<String, serde_json::Value> = labels
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
                .collect();
            serde_json::json!({
                "apiVersion": "v1",
                "kind": "Node",
                "metadata": { "name": format!("node-{}", i), "labels": labels }
            })
        })
        .collect();

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "NodeList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}
