// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{OperatorError, Result};
use std::str::FromStr;

/// Operand log level as set on the operator resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    #[default]
    Normal,
    Debug,
    Trace,
    TraceAll,
}

impl LogLevel {
    /// Parse an optional log level; unset or empty means `Normal`
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            None | Some("") => Ok(LogLevel::Normal),
            Some(v) => v.parse(),
        }
    }

    /// klog verbosity passed to the webhook via `--v`
    pub fn verbosity(self) -> u8 {
        match self {
            LogLevel::Normal => 2,
            LogLevel::Debug => 4,
            LogLevel::Trace => 6,
            LogLevel::TraceAll => 8,
        }
    }
}

impl FromStr for LogLevel {
    type Err = OperatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Normal" => Ok(LogLevel::Normal),
            "Debug" => Ok(LogLevel::Debug),
            "Trace" => Ok(LogLevel::Trace),
            "TraceAll" => Ok(LogLevel::TraceAll),
            other => Err(OperatorError::InvalidLogLevel(other.to_string())),
        }
    }
}
