use geocode_chain::{
    Candidate, Coordinate, GeocodeOrchestrator, GeocodeProvider, GeocodeRequest, OverallStatus,
    PrioritySelector, ProviderEntry, ProviderId, ProviderResult, ProviderStatus, Result,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory gazetteer that only knows exact keys
struct Gazetteer {
    id: ProviderId,
    known: Vec<(&'static str, Coordinate)>,
    calls: AtomicUsize,
}

impl Gazetteer {
    fn new(id: &str, known: Vec<(&'static str, Coordinate)>) -> Arc<Self> {
        Arc::new(Self {
            id: ProviderId::new(id),
            known,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl GeocodeProvider for Gazetteer {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    async fn geocode(&self, request: &GeocodeRequest) -> Result<ProviderResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if request.key().is_empty() {
            return Ok(ProviderResult::failed(ProviderStatus::InvalidRequest));
        }
        let found: Vec<Candidate> = self
            .known
            .iter()
            .filter(|(key, _)| *key == request.key())
            .map(|(key, coordinate)| Candidate::new(*key, *coordinate))
            .collect();
        if found.is_empty() {
            Ok(ProviderResult::failed(ProviderStatus::ZeroResults))
        } else {
            Ok(ProviderResult::success(found))
        }
    }
}

fn entry(provider: Arc<Gazetteer>, priority: i32) -> ProviderEntry {
    ProviderEntry {
        provider,
        priority,
        daily_quota: None,
    }
}

#[tokio::test]
async fn test_custom_providers_with_closure_key_deriver() {
    let local = Gazetteer::new("local", vec![]);
    let national = Gazetteer::new(
        "national",
        vec![("PARIS", Coordinate { lat: 48.8566, lng: 2.3522 })],
    );
    let selector = PrioritySelector::new(vec![
        entry(national.clone(), 10),
        entry(local.clone(), 1),
    ]);
    let orchestrator =
        GeocodeOrchestrator::new(selector, |address: &str| address.trim().to_uppercase());

    let outcome = orchestrator.lookup_address("  paris ").await.unwrap();

    assert_eq!(outcome.status, OverallStatus::Geocoded);
    assert_eq!(outcome.provider, Some(ProviderId::new("national")));
    assert_eq!(outcome.locations[0].coordinate.lat, 48.8566);
    assert_eq!(local.calls.load(Ordering::SeqCst), 1);
    assert_eq!(national.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_address_reaches_every_provider() {
    let a = Gazetteer::new("a", vec![]);
    let b = Gazetteer::new("b", vec![]);
    let selector = PrioritySelector::new(vec![entry(a.clone(), 1), entry(b.clone(), 2)]);
    let orchestrator = GeocodeOrchestrator::new(selector, |address: &str| address.to_string());

    let outcome = orchestrator.lookup_address("").await.unwrap();

    assert_eq!(outcome.status, OverallStatus::PermanentGeocodeError);
    assert_eq!(a.calls.load(Ordering::SeqCst), 1);
    assert_eq!(b.calls.load(Ordering::SeqCst), 1);
}
