// ABOUTME: Configuration error type for threshold loading and validation
// ABOUTME: Distinguishes unparseable environment overrides from inconsistent ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reconcile_core::errors::AppError;
use thiserror::Error;

/// Errors raised while loading or validating [`super::ReconcileConfig`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A lower bound is not below its upper bound
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// An environment override could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A single value is outside what the engine can use
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string()).with_source(error)
    }
}
