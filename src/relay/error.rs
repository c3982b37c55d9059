//! Relay Error Types
//!
//! Failure taxonomy of the relay core. None of these are fatal to the
//! process; all are recovered at the HTTP boundary.

use super::ClientId;

/// Errors surfaced by [`super::RoomRegistry`] operations.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The operation referenced a client id with no live session.
    /// A caller error, not a system fault.
    #[error("client {0} was not found")]
    ClientNotFound(ClientId),

    /// The client left while a receive was in progress. An expected
    /// race outcome of the long-poll lifecycle.
    #[error("client {0} left the chat room")]
    SessionClosed(ClientId),

    /// A freshly generated client id already routes to a room. This
    /// indicates an id generator defect, never a user error.
    #[error("generated client id {0} already has a session")]
    IdentityCollision(ClientId),
}
