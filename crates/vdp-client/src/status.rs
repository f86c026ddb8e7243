/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Status Module
//!
//! A transport-neutral view of call outcomes.
//!
//! REST calls report the exact HTTP status, gRPC calls report a
//! [`tonic::Code`]. Checks state the outcome they want as an [`Expect`] and
//! ask the reply whether it satisfies it, so the same check runs over
//! either transport:
//!
//! | Expect               | HTTP | gRPC                 |
//! |----------------------|------|----------------------|
//! | `Ok`                 | 200  | `OK`                 |
//! | `Created`            | 201  | `OK`                 |
//! | `NoContent`          | 204  | `OK`                 |
//! | `InvalidArgument`    | 400  | `InvalidArgument`    |
//! | `Unauthenticated`    | 401  | `Unauthenticated`    |
//! | `NotFound`           | 404  | `NotFound`           |
//! | `AlreadyExists`      | 409  | `AlreadyExists`      |
//! | `FailedPrecondition` | 422  | `FailedPrecondition` |

use crate::error::ClientError;
use std::fmt;

/// Observed outcome of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Http(u16),
    Grpc(tonic::Code),
}

impl Status {
    pub fn is_success(&self) -> bool {
        match self {
            Status::Http(code) => (200..300).contains(code),
            Status::Grpc(code) => *code == tonic::Code::Ok,
        }
    }

    pub fn satisfies(&self, expect: Expect) -> bool {
        match self {
            Status::Http(code) => *code == expect.http_code(),
            Status::Grpc(code) => *code == expect.grpc_code(),
        }
    }

    pub fn satisfies_any(&self, expects: &[Expect]) -> bool {
        expects.iter().any(|e| self.satisfies(*e))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Http(code) => write!(f, "HTTP {}", code),
            Status::Grpc(code) => write!(f, "gRPC {:?}", code),
        }
    }
}

/// Outcome a check expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Ok,
    Created,
    NoContent,
    InvalidArgument,
    Unauthenticated,
    NotFound,
    AlreadyExists,
    FailedPrecondition,
}

impl Expect {
    pub fn http_code(&self) -> u16 {
        match self {
            Expect::Ok => 200,
            Expect::Created => 201,
            Expect::NoContent => 204,
            Expect::InvalidArgument => 400,
            Expect::Unauthenticated => 401,
            Expect::NotFound => 404,
            Expect::AlreadyExists => 409,
            Expect::FailedPrecondition => 422,
        }
    }

    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            Expect::Ok | Expect::Created | Expect::NoContent => tonic::Code::Ok,
            Expect::InvalidArgument => tonic::Code::InvalidArgument,
            Expect::Unauthenticated => tonic::Code::Unauthenticated,
            Expect::NotFound => tonic::Code::NotFound,
            Expect::AlreadyExists => tonic::Code::AlreadyExists,
            Expect::FailedPrecondition => tonic::Code::FailedPrecondition,
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {:?}", self.http_code(), self.grpc_code())
    }
}

/// A response as observed by the caller.
///
/// `body` is only decoded for successful calls; `message` holds the server's
/// error text otherwise. A successful status without a body means the
/// response could not be decoded, and such a reply satisfies no [`Expect`].
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub status: Status,
    pub body: Option<T>,
    pub message: Option<String>,
}

impl<T> Reply<T> {
    pub fn ok(status: Status, body: T) -> Self {
        Self {
            status,
            body: Some(body),
            message: None,
        }
    }

    pub fn failed(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            body: None,
            message: Some(message.into()),
        }
    }

    /// A successful response whose body did not decode.
    pub fn undecodable(status: Status, reason: impl fmt::Display) -> Self {
        Self::failed(status, format!("decode: {}", reason))
    }

    pub fn is_undecodable(&self) -> bool {
        self.status.is_success() && self.body.is_none()
    }

    pub fn is(&self, expect: Expect) -> bool {
        !self.is_undecodable() && self.status.satisfies(expect)
    }

    pub fn is_any(&self, expects: &[Expect]) -> bool {
        !self.is_undecodable() && self.status.satisfies_any(expects)
    }

    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Reply<U> {
        Reply {
            status: self.status,
            body: self.body.map(f),
            message: self.message,
        }
    }

    /// Returns the body if the reply satisfies `expect`.
    pub fn require(self, expect: Expect) -> Result<T, ClientError> {
        match self.body {
            Some(body) if self.status.satisfies(expect) => Ok(body),
            _ => Err(ClientError::Unexpected {
                status: self.status,
                message: self
                    .message
                    .unwrap_or_else(|| format!("expected {}", expect)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Verifies HTTP statuses are compared exactly while gRPC success covers every 2xx expectation.
    ///
    /// This test:
    /// 1. Checks 201 satisfies Created but not Ok
    /// 2. Checks gRPC OK satisfies Ok, Created and NoContent
    /// 3. Checks gRPC NotFound only satisfies NotFound
    fn test_satisfies() {
        assert!(Status::Http(201).satisfies(Expect::Created));
        assert!(!Status::Http(201).satisfies(Expect::Ok));
        assert!(Status::Http(422).satisfies(Expect::FailedPrecondition));

        let ok = Status::Grpc(tonic::Code::Ok);
        assert!(ok.satisfies(Expect::Ok));
        assert!(ok.satisfies(Expect::Created));
        assert!(ok.satisfies(Expect::NoContent));

        let not_found = Status::Grpc(tonic::Code::NotFound);
        assert!(not_found.satisfies(Expect::NotFound));
        assert!(!not_found.satisfies(Expect::InvalidArgument));
        assert!(not_found.satisfies_any(&[Expect::InvalidArgument, Expect::NotFound]));
    }

    #[test]
    /// Verifies `require` hands back the body only for the expected outcome.
    fn test_require() {
        let reply = Reply::ok(Status::Http(201), "created");
        assert_eq!(reply.clone().require(Expect::Created).unwrap(), "created");

        match reply.require(Expect::Ok) {
            Err(ClientError::Unexpected { status, .. }) => assert_eq!(status, Status::Http(201)),
            other => panic!("unexpected result: {:?}", other),
        }

        let failed: Reply<()> = Reply::failed(Status::Http(401), "unauthenticated");
        let err = failed.require(Expect::Ok).unwrap_err();
        assert!(err.to_string().contains("unauthenticated"));
    }

    #[test]
    /// Verifies an undecodable 200 satisfies nothing and carries the reason.
    fn test_undecodable_reply() {
        let reply: Reply<u32> = Reply::undecodable(Status::Http(200), "missing `connector`");
        assert!(reply.is_undecodable());
        assert!(!reply.is(Expect::Ok));
        assert!(!reply.is_any(&[Expect::Ok, Expect::Created]));
        assert_eq!(reply.message.as_deref(), Some("decode: missing `connector`"));

        let err = reply.require(Expect::Ok).unwrap_err();
        assert!(err.to_string().contains("decode"));

        let not_found: Reply<u32> = Reply::failed(Status::Http(404), "gone");
        assert!(!not_found.is_undecodable());
        assert!(not_found.is(Expect::NotFound));
    }

    #[test]
    fn test_map_keeps_status() {
        let reply = Reply::ok(Status::Grpc(tonic::Code::Ok), 2).map(|n| n * 2);
        assert_eq!(reply.body, Some(4));
        assert!(reply.status.is_success());
        assert!(!Status::Http(404).is_success());
    }
}
