//! Real-time task channels
//!
//! The `ConnectionGate` authenticates a connection once at the handshake
//! using an access token; the `ChannelBroadcaster` then tracks which
//! connections are in which task room and fans events out to them.

mod broadcaster;
mod gate;
mod types;


pub use broadcaster::{ChannelBroadcaster, ConnectionHandle};
pub use gate::{AdmittedConnection, ConnectionGate};
pub use types::{room_name, ClientCommand, ConnectionId, ServerEvent};
