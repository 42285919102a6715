//! Best-effort chat fan-out to bound stations.
//!
//! [`Relay::dispatch`] looks up each recipient in the [`StationRegistry`]
//! and queues the payload on every bound connection. Recipients that are
//! unknown or unbound are skipped without error; a send to a connection
//! that has gone away releases its stale binding.

use std::sync::Arc;

use crate::domain::{StationEvent, StationId, StationRegistry};
use crate::error::DeliveryError;

/// Per-dispatch delivery tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Recipients whose connection accepted the frame.
    pub delivered: usize,
    /// Recipients that are unknown or currently unbound.
    pub skipped: usize,
    /// Bound recipients whose connection could not take the frame.
    pub failed: usize,
}

/// Fire-and-forget message relay over the station registry.
#[derive(Debug, Clone)]
pub struct Relay {
    registry: Arc<StationRegistry>,
}

impl Relay {
    /// Creates a relay over `registry`.
    #[must_use]
    pub fn new(registry: Arc<StationRegistry>) -> Self {
        Self { registry }
    }

    /// Forwards `message` unmodified to every bound recipient.
    ///
    /// Never fails: unknown tokens and unbound stations are counted as
    /// skipped, transport failures as failed. Sends happen after the
    /// registry lookup returns, so a stalled recipient cannot block binds on
    /// other stations.
    pub async fn dispatch(
        &self,
        recipients: &[String],
        message: &serde_json::Value,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        for token in recipients {
            let Ok(station) = token.parse::<StationId>() else {
                tracing::debug!(recipient = %token, "skipping unknown recipient");
                report.skipped += 1;
                continue;
            };
            let Some(handle) = self.registry.lookup(station).await else {
                report.skipped += 1;
                continue;
            };

            match handle.deliver(StationEvent::Chat(message.clone())) {
                Ok(()) => report.delivered += 1,
                Err(DeliveryError::Closed) => {
                    report.failed += 1;
                    if self.registry.release(station, handle.id()).await {
                        tracing::info!(
                            %station,
                            connection = %handle.id(),
                            "released stale binding"
                        );
                    }
                }
                Err(DeliveryError::Full) => {
                    report.failed += 1;
                    tracing::warn!(
                        %station,
                        connection = %handle.id(),
                        "outbound queue full, dropping chat"
                    );
                }
            }
        }

        report
    }
}
