//! Room Registry
//!
//! The externally visible relay service. Holds the three routing
//! tables (client -> room, room -> members, client -> channel) behind
//! one coordination lock and orchestrates enter / send / receive /
//! leave by composing the membership set and client channels.
//!
//! The lock is held only for table bookkeeping, never across an await:
//! a blocked receive or a cross-task delivery must not serialize
//! unrelated rooms' traffic behind it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::channel::{ClientChannel, Receive};
use super::error::RelayError;
use super::membership::ClientIdSet;
use super::{ClientId, RoomId};
use crate::metrics;

/// Routing tables, mutually consistent under one lock.
#[derive(Default)]
struct RoutingTables {
    client_rooms: HashMap<ClientId, RoomId>,
    room_members: HashMap<RoomId, ClientIdSet>,
    client_channels: HashMap<ClientId, Arc<ClientChannel>>,
}

/// Remove the client from all routing tables, returning its channel.
///
/// Tables are updated before the caller closes the channel, so a
/// concurrent `send_message` never observes a half-removed session.
fn remove_session(
    tables: &Mutex<RoutingTables>,
    client: ClientId,
) -> Option<Arc<ClientChannel>> {
    let mut tables = tables.lock();
    let channel = tables.client_channels.remove(&client)?;
    if let Some(room_id) = tables.client_rooms.remove(&client) {
        if let Some(members) = tables.room_members.get_mut(&room_id) {
            members.remove(&client);
        }
    }
    Some(channel)
}

/// The multi-room message relay.
///
/// One instance is shared by every request task for the process
/// lifetime. The tables live behind an [`Arc`] so fire-and-forget
/// delivery tasks can reconcile departed peers on their own.
pub struct RoomRegistry {
    tables: Arc<Mutex<RoutingTables>>,
    receive_timeout: Duration,
}

impl RoomRegistry {
    /// Create a registry with the given long-poll receive timeout.
    pub fn new(receive_timeout: Duration) -> Self {
        Self {
            tables: Arc::new(Mutex::new(RoutingTables::default())),
            receive_timeout,
        }
    }

    /// The long-poll timeout configured at construction.
    pub fn receive_timeout(&self) -> Duration {
        self.receive_timeout
    }

    /// Enter a room, creating it on first use, and mint a fresh client
    /// id with an Active channel.
    ///
    /// `IdentityCollision` means the generated id already routes to a
    /// room, which indicates a generator defect rather than a caller
    /// mistake.
    pub fn enter(&self, room_id: RoomId) -> Result<ClientId, RelayError> {
        let client_id = ClientId::generate();

        let mut tables = self.tables.lock();
        if tables.client_rooms.contains_key(&client_id) {
            return Err(RelayError::IdentityCollision(client_id));
        }

        let created = !tables.room_members.contains_key(&room_id);
        tables.client_rooms.insert(client_id, room_id.clone());
        tables
            .room_members
            .entry(room_id.clone())
            .or_default()
            .add(client_id);
        tables
            .client_channels
            .insert(client_id, Arc::new(ClientChannel::new()));
        drop(tables);

        if created {
            tracing::info!(room = %room_id, "Room created");
        }
        tracing::debug!(client = %client_id, room = %room_id, "Client entered room");
        metrics::ROOM_JOINS_TOTAL.inc();

        Ok(client_id)
    }

    /// Fan a message out to every other member of the sender's room.
    ///
    /// Fire-and-forget: one independent task is spawned per recipient
    /// and the caller is never blocked on (or told about) individual
    /// deliveries. A recipient whose channel reports Left is removed
    /// from the registry as silent self-healing for peers that
    /// disconnected without an explicit leave.
    pub fn send_message(&self, sender: ClientId, message: String) -> Result<(), RelayError> {
        let recipients: Vec<(ClientId, Arc<ClientChannel>)> = {
            let tables = self.tables.lock();
            let room_id = tables
                .client_rooms
                .get(&sender)
                .ok_or(RelayError::ClientNotFound(sender))?;

            tables
                .room_members
                .get(room_id)
                .map(|members| {
                    members
                        .snapshot()
                        .into_iter()
                        .filter(|id| *id != sender)
                        .filter_map(|id| {
                            tables
                                .client_channels
                                .get(&id)
                                .map(|channel| (id, Arc::clone(channel)))
                        })
                        .collect()
                })
                .unwrap_or_default()
        };

        tracing::debug!(
            sender = %sender,
            recipients = recipients.len(),
            "Fanning out message"
        );
        metrics::MESSAGES_SENT_TOTAL.inc();

        for (recipient, channel) in recipients {
            let tables = Arc::clone(&self.tables);
            let message = message.clone();
            tokio::spawn(async move {
                if channel.send(message).await {
                    metrics::FANOUT_DELIVERIES_TOTAL
                        .with_label_values(&["delivered"])
                        .inc();
                } else {
                    // The peer is gone without an explicit leave;
                    // reconcile the routing tables.
                    metrics::FANOUT_DELIVERIES_TOTAL
                        .with_label_values(&["departed"])
                        .inc();
                    tracing::debug!(client = %recipient, "Removing departed recipient");
                    if let Some(stale) = remove_session(&tables, recipient) {
                        stale.close();
                    }
                }
            });
        }

        Ok(())
    }

    /// Block on the client's channel until a message arrives, the
    /// configured timeout elapses, or the client leaves.
    ///
    /// A timeout yields an empty message: the long-poll loop treats
    /// that as "nothing yet, poll again", not as a failure.
    pub async fn receive_message(&self, client: ClientId) -> Result<String, RelayError> {
        let channel = {
            let tables = self.tables.lock();
            tables.client_channels.get(&client).map(Arc::clone)
        }
        .ok_or(RelayError::ClientNotFound(client))?;

        match channel.receive(self.receive_timeout).await {
            Receive::Delivered(message) => {
                metrics::RECEIVE_OUTCOMES_TOTAL
                    .with_label_values(&["delivered"])
                    .inc();
                Ok(message)
            }
            Receive::TimedOut => {
                metrics::RECEIVE_OUTCOMES_TOTAL
                    .with_label_values(&["timeout"])
                    .inc();
                Ok(String::new())
            }
            Receive::Closed => {
                metrics::RECEIVE_OUTCOMES_TOTAL
                    .with_label_values(&["closed"])
                    .inc();
                Err(RelayError::SessionClosed(client))
            }
        }
    }

    /// Tear down the client's session. Idempotent; unknown ids are a
    /// no-op.
    ///
    /// Removal from the routing tables happens before the channel is
    /// closed. The close then promptly unblocks any pending receive or
    /// delivery on the channel.
    pub fn leave(&self, client: ClientId) {
        if let Some(channel) = remove_session(&self.tables, client) {
            channel.close();
            tracing::debug!(client = %client, "Client left");
        }
    }

    /// Number of rooms created so far. Rooms are never destroyed, so
    /// this only grows.
    pub fn room_count(&self) -> usize {
        self.tables.lock().room_members.len()
    }

    /// Number of clients with a live session.
    pub fn client_count(&self) -> usize {
        self.tables.lock().client_channels.len()
    }
}
