//! WebSocket layer: connection handling and message routing.
//!
//! The WebSocket endpoint at `/ws` binds each socket to one station and
//! relays chat frames between stations.

pub mod connection;
pub mod handler;
pub mod messages;
