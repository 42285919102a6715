//! Station-to-connection bindings with per-station locking.
//!
//! [`StationRegistry`] holds exactly one [`Binding`] per [`StationId`], each
//! behind its own [`tokio::sync::RwLock`]. Entries are fixed at construction;
//! only their bound/unbound state changes. Operations on different stations
//! never contend, and no lock is held across a transport send.

use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::{ConnectionHandle, ConnectionId, StationId};

/// Binding state of a single station.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Binding {
    /// No live connection holds the station.
    #[default]
    Unbound,
    /// The station is held by this connection.
    Bound(ConnectionHandle),
}

impl Binding {
    /// Returns the bound handle, if any.
    #[must_use]
    pub const fn handle(&self) -> Option<&ConnectionHandle> {
        match self {
            Self::Unbound => None,
            Self::Bound(handle) => Some(handle),
        }
    }
}

/// Outcome of [`StationRegistry::bind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindDecision {
    /// Station was unbound and now holds the handle.
    Bound,
    /// Station already held this same handle; nothing changed.
    Reaffirmed,
    /// Station is held by a different connection; the incumbent stays.
    Rejected,
}

impl BindDecision {
    /// Returns `true` for [`Bound`](Self::Bound) and
    /// [`Reaffirmed`](Self::Reaffirmed).
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Bound | Self::Reaffirmed)
    }
}

/// Point-in-time view of one station's binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StationStatus {
    /// Station identity.
    pub station: StationId,
    /// Whether a connection currently holds the station.
    pub bound: bool,
    /// Holder's connection id, when bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub connection_id: Option<ConnectionId>,
}

/// Process-wide table of station bindings.
///
/// # Concurrency
///
/// - Each station has an independent lock; binds on different stations run
///   concurrently.
/// - Capture-and-unbind of a station during [`unbind_all`](Self::unbind_all)
///   happens under a single write lock, so a concurrent bind never observes
///   a half-reset entry.
#[derive(Debug, Default)]
pub struct StationRegistry {
    server: RwLock<Binding>,
    red_1: RwLock<Binding>,
    red_2: RwLock<Binding>,
    red_3: RwLock<Binding>,
    blue_1: RwLock<Binding>,
    blue_2: RwLock<Binding>,
    blue_3: RwLock<Binding>,
}

impl StationRegistry {
    /// Creates a registry with every station unbound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn slot(&self, station: StationId) -> &RwLock<Binding> {
        match station {
            StationId::Server => &self.server,
            StationId::Red1 => &self.red_1,
            StationId::Red2 => &self.red_2,
            StationId::Red3 => &self.red_3,
            StationId::Blue1 => &self.blue_1,
            StationId::Blue2 => &self.blue_2,
            StationId::Blue3 => &self.blue_3,
        }
    }

    /// Binds `handle` to `station` unless another connection holds it.
    pub async fn bind(&self, station: StationId, handle: &ConnectionHandle) -> BindDecision {
        let mut binding = self.slot(station).write().await;
        match &*binding {
            Binding::Unbound => {
                *binding = Binding::Bound(handle.clone());
                BindDecision::Bound
            }
            Binding::Bound(current) if current == handle => BindDecision::Reaffirmed,
            Binding::Bound(_) => BindDecision::Rejected,
        }
    }

    /// Re-affirms an existing binding without ever creating one.
    ///
    /// Returns [`BindDecision::Reaffirmed`] if `handle` still holds `station`
    /// and [`BindDecision::Rejected`] otherwise, including when the station
    /// has been unbound since `handle` bound it.
    pub async fn reaffirm(&self, station: StationId, handle: &ConnectionHandle) -> BindDecision {
        if self.holds(station, handle.id()).await {
            BindDecision::Reaffirmed
        } else {
            BindDecision::Rejected
        }
    }

    /// Returns `true` if `station` is currently held by `connection_id`.
    pub async fn holds(&self, station: StationId, connection_id: ConnectionId) -> bool {
        self.slot(station)
            .read()
            .await
            .handle()
            .is_some_and(|handle| handle.id() == connection_id)
    }

    /// Unbinds `station` unconditionally, returning the previous holder.
    pub async fn unbind(&self, station: StationId) -> Option<ConnectionHandle> {
        let mut binding = self.slot(station).write().await;
        match std::mem::take(&mut *binding) {
            Binding::Unbound => None,
            Binding::Bound(handle) => Some(handle),
        }
    }

    /// Unbinds `station` only if it is still held by `connection_id`.
    ///
    /// Returns `true` if a binding was removed.
    pub async fn release(&self, station: StationId, connection_id: ConnectionId) -> bool {
        let mut binding = self.slot(station).write().await;
        let held = binding
            .handle()
            .is_some_and(|handle| handle.id() == connection_id);
        if held {
            *binding = Binding::Unbound;
        }
        held
    }

    /// Unbinds whichever station is held by `connection_id`.
    ///
    /// Returns the station that was released, if any.
    pub async fn release_connection(&self, connection_id: ConnectionId) -> Option<StationId> {
        for station in StationId::ALL {
            if self.release(station, connection_id).await {
                return Some(station);
            }
        }
        None
    }

    /// Unbinds every station, returning the handles that were bound.
    ///
    /// Each station is captured and cleared atomically; stations are
    /// processed one after another.
    pub async fn unbind_all(&self) -> Vec<(StationId, ConnectionHandle)> {
        let mut released = Vec::new();
        for station in StationId::ALL {
            if let Some(handle) = self.unbind(station).await {
                released.push((station, handle));
            }
        }
        released
    }

    /// Returns the handle currently bound to `station`.
    pub async fn lookup(&self, station: StationId) -> Option<ConnectionHandle> {
        self.slot(station).read().await.handle().cloned()
    }

    /// Returns the binding state of every station.
    pub async fn snapshot(&self) -> Vec<StationStatus> {
        let mut statuses = Vec::with_capacity(StationId::ALL.len());
        for station in StationId::ALL {
            let connection_id = self.lookup(station).await.map(|h| h.id());
            statuses.push(StationStatus {
                station,
                bound: connection_id.is_some(),
                connection_id,
            });
        }
        statuses
    }

    /// Returns the number of bound stations.
    pub async fn bound_count(&self) -> usize {
        let mut count = 0;
        for station in StationId::ALL {
            if self.slot(station).read().await.handle().is_some() {
                count += 1;
            }
        }
        count
    }
}
