//! Service layer: station lifecycle orchestration and message relay.

pub mod relay;
pub mod station_service;

pub use relay::{DispatchReport, Relay};
pub use station_service::StationService;
