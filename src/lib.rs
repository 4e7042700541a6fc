// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod generations;
pub mod kubernetes;
pub mod reconcilers;
pub mod render;
pub mod sizing;
pub mod status;
pub mod sync;
pub mod types;

#[cfg(test)]
pub mod test_utils;
