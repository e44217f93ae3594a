//! WebSocket endpoint for task channels

pub mod session;
pub mod ws;

pub use session::TaskChannelSession;
