// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::{info, warn};

use csi_snapshot_webhook_operator::config::Config;
use csi_snapshot_webhook_operator::kubernetes::wait_for_operator_crd;
use csi_snapshot_webhook_operator::reconcilers::WebhookReconciler;
use csi_snapshot_webhook_operator::render::ManifestTemplates;
use csi_snapshot_webhook_operator::sync::WebhookSync;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting CSI snapshot webhook operator");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: webhook_image={}, operator_resource={}",
        config.webhook_image, config.operator_resource_name
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for CSISnapshotController CRD to become available...");
    wait_for_operator_crd(&client).await?;

    let sync = WebhookSync::new(client, config, ManifestTemplates::embedded());
    let reconciler = WebhookReconciler::new(sync);

    info!("Starting webhook reconciler...");
    reconciler.run().await?;

    // This should never be reached as the reconciler runs forever
    warn!("Webhook reconciler stopped unexpectedly");
    Ok(())
}
