/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! Errors raised by the client wrapper.
//!
//! Only failures that prevented a response from being observed are errors.
//! A response carrying a 4xx/5xx status or a non-OK gRPC code is returned as
//! a [`Reply`](crate::status::Reply) so the caller can assert on it.

use crate::status::Status;
use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    /// The HTTP request could not be sent or its body could not be read
    Transport(String),
    /// The gRPC channel could not be established
    Grpc(String),
    /// A response body did not match the expected shape
    Decode(String),
    /// A base address, header or metadata value is malformed
    Config(String),
    /// The management login did not yield a token
    Login(String),
    /// A helper required a specific outcome and got another one
    Unexpected { status: Status, message: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "transport error: {}", e),
            ClientError::Grpc(e) => write!(f, "grpc channel error: {}", e),
            ClientError::Decode(e) => write!(f, "decode error: {}", e),
            ClientError::Config(e) => write!(f, "client configuration error: {}", e),
            ClientError::Login(e) => write!(f, "login failed: {}", e),
            ClientError::Unexpected { status, message } => {
                write!(f, "unexpected {}: {}", status, message)
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

impl From<tonic::transport::Error> for ClientError {
    fn from(e: tonic::transport::Error) -> Self {
        ClientError::Grpc(e.to_string())
    }
}

impl From<tonic::metadata::errors::InvalidMetadataValue> for ClientError {
    fn from(e: tonic::metadata::errors::InvalidMetadataValue) -> Self {
        ClientError::Config(e.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(e: url::ParseError) -> Self {
        ClientError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
