pub mod orchestrator;
pub mod summary;

pub use crate::domain::model::{
    AttemptLedger, BoundingBox, GeocodeRequest, Location, LookupOutcome, OverallStatus,
    ProviderId, ProviderResult, ProviderStatus,
};
pub use crate::domain::ports::{GeocodeProvider, KeyDeriver, ProviderSelector};
pub use crate::utils::error::Result;
