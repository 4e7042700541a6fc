// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Webhook reconciler - runs a sync cycle whenever the operator resource,
//! the cluster nodes, the webhook Deployment or the webhook registration change.

use crate::constants::{managed, requeue::ERROR_RETRY_SECS};
use crate::error::{OperatorError, Result};
use crate::kubernetes::update_condition;
use crate::status::degraded_condition;
use crate::sync::WebhookSync;
use crate::types::operator::CSISnapshotController;
use futures::StreamExt;
use k8s_openapi::api::admissionregistration::v1::ValidatingWebhookConfiguration;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Node;
use kube::{
    runtime::{controller::Action, reflector::ObjectRef, Controller},
    Api, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

pub struct WebhookReconciler {
    sync: WebhookSync,
}

impl WebhookReconciler {
    pub fn new(sync: WebhookSync) -> Self {
        Self { sync }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let client = self.sync.client().clone();
        let operator_name = self.sync.config().operator_resource_name.clone();

        let operators: Api<CSISnapshotController> = Api::all(client.clone());
        let nodes: Api<Node> = Api::all(client.clone());
        let deployments: Api<Deployment> = Api::namespaced(client.clone(), managed::NAMESPACE);
        let webhooks: Api<ValidatingWebhookConfiguration> = Api::all(client);
        let context = Arc::new(self);

        Controller::new(operators, by_name(&operator_name))
            .watches(nodes, WatcherConfig::default(), to_operator(&operator_name))
            .watches(deployments, by_name(managed::DEPLOYMENT_NAME), to_operator(&operator_name))
            .watches(webhooks, by_name(managed::WEBHOOK_CONFIG_NAME), to_operator(&operator_name))
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled operator: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

fn by_name(name: &str) -> WatcherConfig {
    WatcherConfig::default().fields(&format!("metadata.name={}", name))
}

/// Every watched change maps onto the single operator resource
fn to_operator<T: 'static>(
    name: &str,
) -> impl Fn(T) -> Option<ObjectRef<CSISnapshotController>> + Send + Sync + 'static {
    let name = name.to_string();
    move |_| Some(ObjectRef::new(&name))
}

async fn reconcile(operator: Arc<CSISnapshotController>, ctx: Arc<WebhookReconciler>) -> Result<Action> {
    debug!("Reconciling operator resource: {}", operator.name_any());

    match ctx.sync.sync().await {
        Ok(outcome) => {
            debug!(?outcome, "Sync finished");
            Ok(Action::requeue(ctx.sync.config().resync_interval))
        }
        Err(e) => {
            let degraded = degraded_condition(Some(&e.to_string()));
            if let Err(status_err) =
                update_condition(ctx.sync.client(), &operator.name_any(), degraded).await
            {
                warn!("Failed to mark operator degraded: {}", status_err);
            }
            Err(e)
        }
    }
}

fn error_policy(
    _operator: Arc<CSISnapshotController>,
    error: &OperatorError,
    _ctx: Arc<WebhookReconciler>,
) -> Action {
    if error.is_permanent() {
        error!("Reconciliation error, waiting for a configuration change: {}", error);
        Action::await_change()
    } else {
        error!("Reconciliation error: {}", error);
        Action::requeue(Duration::from_secs(ERROR_RETRY_SECS))
    }
}
