// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for applying managed objects, listing nodes, reading
//! and updating the operator resource, and CRD discovery.

pub mod apply;
pub mod crd;
pub mod events;
pub mod nodes;
pub mod operator;

pub use apply::{apply_deployment, apply_validating_webhook_configuration};
pub use crd::wait_for_operator_crd;
pub use events::EventSink;
pub use nodes::list_nodes;
pub use operator::{get_operator_state, update_condition, update_status};
