//! Relay Core
//!
//! The in-memory, multi-room message relay behind the long-polling API.
//!
//! Clients enter a room, post messages that are fanned out to every
//! other member, and retrieve messages by blocking with a bounded
//! timeout until one arrives or they leave. All state lives in memory
//! for the lifetime of the process; nothing survives a restart.
//!
//! # Components
//!
//! - [`membership::ClientIdSet`] - which clients belong to a room
//! - [`channel::ClientChannel`] - per-client one-slot rendezvous
//! - [`registry::RoomRegistry`] - the service composing both

pub mod channel;
pub mod error;
pub mod membership;
pub mod registry;

pub use channel::{ClientChannel, Receive};
pub use error::RelayError;
pub use membership::ClientIdSet;
pub use registry::RoomRegistry;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connected client.
///
/// Minted by the registry on enter and owned by it for the whole
/// membership lifetime. Serializes as the canonical hyphenated UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generate a fresh random client id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ClientId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Identifier for a chat room.
///
/// Externally supplied and case-sensitive; the room itself is created
/// implicitly by the first enter and never destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}
