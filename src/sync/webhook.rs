// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One reconcile cycle of the snapshot webhook.
//!
//! read config → render Deployment → size replicas → apply Deployment →
//! render hook → apply hook → compute conditions → persist status.
//! Any failure aborts the remaining steps; nothing is persisted unless every
//! apply succeeded.

use crate::config::Config;
use crate::error::Result;
use crate::generations::{
    expected_generation, set_deployment_generation, set_validating_webhook_configuration_generation,
    GenerationKey,
};
use crate::kubernetes::apply::{apply_deployment, apply_validating_webhook_configuration};
use crate::kubernetes::events::EventSink;
use crate::kubernetes::nodes::list_nodes;
use crate::kubernetes::operator::{get_operator_state, update_status};
use crate::render::deployment::{node_selector, set_replicas};
use crate::render::{render_deployment, render_webhook_config, ManifestTemplates, RenderParams};
use crate::sizing;
use crate::status::{compute_conditions, degraded_condition};
use crate::types::operator::ManagementState;
use kube::Client;
use tracing::{debug, info, instrument};

/// What a cycle ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The operator resource does not exist yet
    NotFound,
    /// The operator resource is not `Managed`
    NotManaged(ManagementState),
    Synced {
        deployment_changed: bool,
        webhook_changed: bool,
    },
}

pub struct WebhookSync {
    client: Client,
    config: Config,
    templates: ManifestTemplates,
    events: EventSink,
}

impl WebhookSync {
    pub fn new(client: Client, config: Config, templates: ManifestTemplates) -> Self {
        let events = EventSink::new(client.clone());
        Self {
            client,
            config,
            templates,
            events,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[instrument(skip(self), fields(operator = %self.config.operator_resource_name))]
    pub async fn sync(&self) -> Result<SyncOutcome> {
        let name = &self.config.operator_resource_name;

        let Some(operator) = get_operator_state(&self.client, name).await? else {
            debug!("Operator resource not found, nothing to reconcile");
            return Ok(SyncOutcome::NotFound);
        };
        let state = operator.spec.management_state;
        if state != ManagementState::Managed {
            debug!(?state, "Operator is not managed, skipping");
            return Ok(SyncOutcome::NotManaged(state));
        }
        let records = operator
            .status
            .as_ref()
            .map(|s| s.generations.clone())
            .unwrap_or_default();

        let mut deployment = render_deployment(
            &self.templates,
            &RenderParams {
                image: &self.config.webhook_image,
                log_level: operator.spec.log_level.as_deref(),
            },
        )?;

        let selector = node_selector(&deployment);
        let nodes = list_nodes(&self.client, &selector).await?;
        let replicas = sizing::size(&selector, &nodes);
        debug!(replicas, nodes = nodes.len(), "Sized webhook deployment");
        set_replicas(&mut deployment, replicas);

        let last_generation = expected_generation(&records, &GenerationKey::for_deployment(&deployment));
        let (deployment, deployment_changed) =
            apply_deployment(&self.client, &self.events, deployment, last_generation).await?;

        let webhook = render_webhook_config(&self.templates)?;
        let last_generation = expected_generation(
            &records,
            &GenerationKey::for_validating_webhook_configuration(&webhook),
        );
        let (webhook, webhook_changed) =
            apply_validating_webhook_configuration(&self.client, &self.events, webhook, last_generation)
                .await?;

        let conditions = compute_conditions(&deployment);
        let available = conditions.available.is_true();
        update_status(&self.client, name, |status| {
            status.set_condition(conditions.available);
            status.set_condition(conditions.progressing);
            status.set_condition(degraded_condition(None));
            set_deployment_generation(&mut status.generations, &deployment);
            set_validating_webhook_configuration_generation(&mut status.generations, &webhook);
        })
        .await?;

        info!(deployment_changed, webhook_changed, available, "Sync complete");
        Ok(SyncOutcome::Synced {
            deployment_changed,
            webhook_changed,
        })
    }
}
