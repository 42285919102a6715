//! Domain layer: station identities, connection handles, and the registry.
//!
//! This module contains the server-side domain model including the closed
//! set of station identities, the comparable handle for a live connection,
//! the events pushed to stations, and the station registry that binds the
//! two together.

pub mod connection;
pub mod station;
pub mod station_event;
pub mod station_registry;

pub use connection::{ConnectionHandle, ConnectionId, Outbound};
pub use station::{Alliance, Slot, StationId};
pub use station_event::{ChatMessage, StationEvent};
pub use station_registry::{BindDecision, Binding, StationRegistry, StationStatus};
