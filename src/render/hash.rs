// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::annotations;
use crate::error::Result;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Hex encoded SHA-256 of the JSON form of `value`
pub fn spec_hash<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value)?;
    Ok(hex::encode(Sha256::digest(&json)))
}

/// Stamp the spec hash of `value` onto the object's annotations
pub fn set_spec_hash_annotation<T: Serialize + ?Sized>(meta: &mut ObjectMeta, value: &T) -> Result<()> {
    let hash = spec_hash(value)?;
    meta.annotations
        .get_or_insert_with(Default::default)
        .insert(annotations::SPEC_HASH.to_string(), hash);
    Ok(())
}
