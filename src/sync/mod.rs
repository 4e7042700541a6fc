// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconcile cycle for the snapshot webhook.

pub mod webhook;

pub use webhook::{SyncOutcome, WebhookSync};
