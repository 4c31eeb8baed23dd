use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Provider 識別名稱 (來自配置中的 `id`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// 單一 Provider 回報的狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    Success,
    ZeroResults,
    Error,
    InvalidRequest,
    RequestDenied,
    TooManyRequests,
}

impl ProviderStatus {
    pub fn is_permanent_failure(self) -> bool {
        matches!(self, Self::Error | Self::InvalidRequest)
    }

    pub fn is_temporary_failure(self) -> bool {
        matches!(self, Self::RequestDenied | Self::TooManyRequests)
    }
}

/// 整體查詢結果狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Geocoded,
    ZeroResults,
    PermanentGeocodeError,
    TemporaryGeocodeError,
    MultipleIssues,
    /// 沒有任何 Provider 被呼叫過
    NoProvidersAvailable,
}

impl OverallStatus {
    pub fn is_geocoded(self) -> bool {
        self == Self::Geocoded
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Geocoded => "geocoded",
            Self::ZeroResults => "zero_results",
            Self::PermanentGeocodeError => "permanent_geocode_error",
            Self::TemporaryGeocodeError => "temporary_geocode_error",
            Self::MultipleIssues => "multiple_issues",
            Self::NoProvidersAvailable => "no_providers_available",
        };
        f.write_str(label)
    }
}

/// 一次查詢的請求，建立後不再修改
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeRequest {
    address: String,
    key: String,
    bounds_hint: Option<BoundingBox>,
}

impl GeocodeRequest {
    pub fn new(address: String, key: String, bounds_hint: Option<BoundingBox>) -> Self {
        Self {
            address,
            key,
            bounds_hint,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn bounds_hint(&self) -> Option<&BoundingBox> {
        self.bounds_hint.as_ref()
    }
}

/// Provider 回傳的候選地點，`place_id` 與 `raw` 僅供 adapter 內部使用
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub formatted_address: String,
    pub coordinate: Coordinate,
    pub bounds: Option<BoundingBox>,
    pub place_id: Option<String>,
    pub raw: Option<serde_json::Value>,
}

impl Candidate {
    pub fn new(formatted_address: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            formatted_address: formatted_address.into(),
            coordinate,
            bounds: None,
            place_id: None,
            raw: None,
        }
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult {
    pub status: ProviderStatus,
    pub candidates: Vec<Candidate>,
}

impl ProviderResult {
    pub fn success(candidates: Vec<Candidate>) -> Self {
        Self {
            status: ProviderStatus::Success,
            candidates,
        }
    }

    pub fn failed(status: ProviderStatus) -> Self {
        Self {
            status,
            candidates: Vec::new(),
        }
    }
}

/// 對外公開的地點欄位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub formatted_address: String,
    pub coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
}

impl From<Candidate> for Location {
    fn from(candidate: Candidate) -> Self {
        Self {
            formatted_address: candidate.formatted_address,
            coordinate: candidate.coordinate,
            bounds: candidate.bounds,
        }
    }
}

/// 已嘗試過的 Provider 與其狀態，保留插入順序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttemptLedger {
    entries: Vec<(ProviderId, ProviderStatus)>,
}

impl AttemptLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 回傳 false 代表該 Provider 已經記錄過
    pub fn record(&mut self, provider: ProviderId, status: ProviderStatus) -> bool {
        if self.contains(&provider) {
            return false;
        }
        self.entries.push((provider, status));
        true
    }

    pub fn contains(&self, provider: &ProviderId) -> bool {
        self.entries.iter().any(|(id, _)| id == provider)
    }

    pub fn status_of(&self, provider: &ProviderId) -> Option<ProviderStatus> {
        self.entries
            .iter()
            .find(|(id, _)| id == provider)
            .map(|(_, status)| *status)
    }

    pub fn attempted(&self) -> HashSet<ProviderId> {
        self.entries.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn statuses(&self) -> impl Iterator<Item = ProviderStatus> + '_ {
        self.entries.iter().map(|(_, status)| *status)
    }

    pub fn entries(&self) -> &[(ProviderId, ProviderStatus)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ProviderId, ProviderStatus)> for AttemptLedger {
    fn from_iter<T: IntoIterator<Item = (ProviderId, ProviderStatus)>>(iter: T) -> Self {
        let mut ledger = Self::new();
        for (provider, status) in iter {
            ledger.record(provider, status);
        }
        ledger
    }
}

/// 回傳給呼叫端的最終結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupOutcome {
    pub status: OverallStatus,
    pub provider: Option<ProviderId>,
    pub locations: Vec<Location>,
}

impl LookupOutcome {
    pub fn geocoded(provider: ProviderId, locations: Vec<Location>) -> Self {
        Self {
            status: OverallStatus::Geocoded,
            provider: Some(provider),
            locations,
        }
    }

    pub fn unresolved(status: OverallStatus) -> Self {
        Self {
            status,
            provider: None,
            locations: Vec::new(),
        }
    }
}
