// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Best-effort Kubernetes events for apply actions.
//!
//! A failed publish is logged and never fails the reconcile cycle.

use crate::constants::OPERATOR_NAME;
use kube::runtime::events::{Event, EventType, Recorder, Reporter};
use kube::{Client, Resource};
use tracing::warn;

/// Event action recorded for every apply
pub const ACTION_APPLY: &str = "Apply";

pub struct EventSink {
    recorder: Recorder,
}

impl EventSink {
    pub fn new(client: Client) -> Self {
        let reporter = Reporter {
            controller: OPERATOR_NAME.to_string(),
            instance: None,
        };
        Self {
            recorder: Recorder::new(client, reporter),
        }
    }

    pub async fn normal<K>(&self, object: &K, reason: &str, note: String)
    where
        K: Resource<DynamicType = ()>,
    {
        self.publish(object, EventType::Normal, reason, note).await;
    }

    pub async fn warning<K>(&self, object: &K, reason: &str, note: String)
    where
        K: Resource<DynamicType = ()>,
    {
        self.publish(object, EventType::Warning, reason, note).await;
    }

    async fn publish<K>(&self, object: &K, type_: EventType, reason: &str, note: String)
    where
        K: Resource<DynamicType = ()>,
    {
        let event = Event {
            type_,
            reason: reason.to_string(),
            note: Some(note),
            action: ACTION_APPLY.to_string(),
            secondary: None,
        };
        if let Err(e) = self.recorder.publish(&event, &object.object_ref(&())).await {
            warn!(reason, error = %e, "Failed to publish Kubernetes event");
        }
    }
}
