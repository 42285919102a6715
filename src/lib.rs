//! # station-relay
//!
//! Real-time coordination layer for a fixed set of scouting stations.
//!
//! Each station identity (`server`, `red-1` … `blue-3`) is bound to at most
//! one live WebSocket at a time. Stations exchange addressed chat messages
//! through the relay, and an operator can reset every binding at once.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── Page / Operator Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── StationService + Relay (service/)
//!     │
//!     └── StationRegistry (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
