/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Errors that stop a check group.
//!
//! A failing assertion is never an error, it is recorded and the group goes
//! on. A `HarnessError` means a step the rest of the group depends on did not
//! produce what it needed, so the remaining checks of that group are skipped.

use std::fmt;
use vdp_client::ClientError;

#[derive(Debug)]
pub enum HarnessError {
    /// Settings could not be loaded or resolved
    Config(String),
    /// No response could be observed for a call
    Client(ClientError),
    /// A setup step returned something the dependent checks cannot use
    Precondition(String),
    /// A fixture file could not be read
    Io(std::io::Error),
}

impl HarnessError {
    pub fn precondition(message: impl Into<String>) -> Self {
        HarnessError::Precondition(message.into())
    }
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::Config(e) => write!(f, "configuration error: {}", e),
            HarnessError::Client(e) => write!(f, "client error: {}", e),
            HarnessError::Precondition(e) => write!(f, "precondition failed: {}", e),
            HarnessError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Client(e) => Some(e),
            HarnessError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClientError> for HarnessError {
    fn from(e: ClientError) -> Self {
        HarnessError::Client(e)
    }
}

impl From<config::ConfigError> for HarnessError {
    fn from(e: config::ConfigError) -> Self {
        HarnessError::Config(e.to_string())
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(e: std::io::Error) -> Self {
        HarnessError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
