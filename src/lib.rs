pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::key::NormalizedKeyDeriver;
pub use adapters::registry::{build_orchestrator, build_providers};
pub use adapters::selector::{PrioritySelector, ProviderEntry};
pub use config::GeocoderConfig;
pub use crate::core::{orchestrator::GeocodeOrchestrator, summary::summarize};
pub use domain::model::{
    AttemptLedger, BoundingBox, Candidate, Coordinate, GeocodeRequest, Location, LookupOutcome,
    OverallStatus, ProviderId, ProviderResult, ProviderStatus,
};
pub use domain::ports::{GeocodeProvider, KeyDeriver, ProviderSelector};
pub use utils::error::{GeocodeError, Result};
