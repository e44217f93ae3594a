//! Per-task broadcast rooms

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

use super::gate::AdmittedConnection;
use super::types::{room_name, ConnectionId, ServerEvent};

/// A registered connection, handed back by [`ChannelBroadcaster::connect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    pub account_id: Uuid,
}

struct ConnectionEntry {
    account_id: Uuid,
    outbound: UnboundedSender<ServerEvent>,
    rooms: HashSet<String>,
}

#[derive(Default)]
struct Registry {
    connections: HashMap<ConnectionId, ConnectionEntry>,
    rooms: HashMap<String, HashSet<ConnectionId>>,
}

/// Fan-out of task events to the connections currently in a task's room
///
/// Membership is ephemeral and only changed by the owning connection or by
/// its disconnect. Events are delivered to the members present when
/// `publish` runs; nothing is buffered for later joiners.
#[derive(Default)]
pub struct ChannelBroadcaster {
    registry: RwLock<Registry>,
}

impl ChannelBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an admitted connection and return its outbound queue
    pub fn connect(
        &self,
        admitted: &AdmittedConnection,
    ) -> (ConnectionHandle, UnboundedReceiver<ServerEvent>) {
        let (outbound, receiver) = mpsc::unbounded_channel();
        let handle = ConnectionHandle {
            id: ConnectionId::new(),
            account_id: admitted.account_id,
        };

        self.registry.write().connections.insert(
            handle.id,
            ConnectionEntry {
                account_id: admitted.account_id,
                outbound,
                rooms: HashSet::new(),
            },
        );

        tracing::debug!(
            connection_id = %handle.id,
            account_id = %handle.account_id,
            event = "connection_registered",
            "Connection registered"
        );
        (handle, receiver)
    }

    /// Add the connection to the task's room; false if already a member
    pub fn join(&self, handle: &ConnectionHandle, task_id: &str) -> DomainResult<bool> {
        let room = room_name(task_id);
        let mut registry = self.registry.write();
        let entry = registry
            .connections
            .get_mut(&handle.id)
            .ok_or_else(|| unknown_connection(handle))?;

        if !entry.rooms.insert(room.clone()) {
            return Ok(false);
        }
        registry.rooms.entry(room.clone()).or_default().insert(handle.id);

        tracing::debug!(connection_id = %handle.id, room = %room, event = "room_joined", "Joined room");
        Ok(true)
    }

    /// Remove the connection from the task's room; false if not a member
    pub fn leave(&self, handle: &ConnectionHandle, task_id: &str) -> DomainResult<bool> {
        let room = room_name(task_id);
        let mut registry = self.registry.write();
        let entry = registry
            .connections
            .get_mut(&handle.id)
            .ok_or_else(|| unknown_connection(handle))?;

        if !entry.rooms.remove(&room) {
            return Ok(false);
        }
        remove_member(&mut registry.rooms, &room, handle.id);

        tracing::debug!(connection_id = %handle.id, room = %room, event = "room_left", "Left room");
        Ok(true)
    }

    /// Deliver `event` to the room's current members; returns how many
    /// queues accepted it
    pub fn publish(&self, task_id: &str, event: ServerEvent) -> usize {
        let room = room_name(task_id);
        let targets: Vec<UnboundedSender<ServerEvent>> = {
            let registry = self.registry.read();
            match registry.rooms.get(&room) {
                Some(members) => members
                    .iter()
                    .filter_map(|id| registry.connections.get(id))
                    .map(|entry| entry.outbound.clone())
                    .collect(),
                None => Vec::new(),
            }
        };

        // a closed queue means the connection is on its way out
        targets
            .iter()
            .filter(|outbound| outbound.send(event.clone()).is_ok())
            .count()
    }

    /// Publish a client message to a task room, stamped with the sender's
    /// bound identity
    pub fn publish_message(
        &self,
        handle: &ConnectionHandle,
        task_id: &str,
        payload: serde_json::Value,
    ) -> DomainResult<usize> {
        let sender_id = {
            let registry = self.registry.read();
            registry
                .connections
                .get(&handle.id)
                .map(|entry| entry.account_id)
                .ok_or_else(|| unknown_connection(handle))?
        };

        let delivered = self.publish(
            task_id,
            ServerEvent::NewMessage {
                task_id: task_id.to_string(),
                sender_id,
                payload,
                sent_at: Utc::now(),
            },
        );

        tracing::debug!(
            connection_id = %handle.id,
            task_id = %task_id,
            delivered = delivered,
            event = "message_published",
            "Message published"
        );
        Ok(delivered)
    }

    /// Remove the connection from every room, then drop its queue
    pub fn disconnect(&self, handle: &ConnectionHandle) {
        let mut registry = self.registry.write();
        let Some(entry) = registry.connections.remove(&handle.id) else {
            return;
        };
        for room in &entry.rooms {
            remove_member(&mut registry.rooms, room, handle.id);
        }
        drop(registry);
        drop(entry);

        tracing::debug!(
            connection_id = %handle.id,
            account_id = %handle.account_id,
            event = "connection_closed",
            "Connection removed"
        );
    }

    /// Number of connections currently in the task's room
    pub fn room_size(&self, task_id: &str) -> usize {
        self.registry
            .read()
            .rooms
            .get(&room_name(task_id))
            .map_or(0, HashSet::len)
    }

    pub fn connection_count(&self) -> usize {
        self.registry.read().connections.len()
    }
}

fn remove_member(rooms: &mut HashMap<String, HashSet<ConnectionId>>, room: &str, id: ConnectionId) {
    if let Some(members) = rooms.get_mut(room) {
        members.remove(&id);
        if members.is_empty() {
            rooms.remove(room);
        }
    }
}

fn unknown_connection(handle: &ConnectionHandle) -> DomainError {
    DomainError::NotFound {
        resource: format!("connection {}", handle.id),
    }
}
