use crate::adapters::http::classify_http_status;
use crate::domain::model::{
    BoundingBox, Candidate, Coordinate, GeocodeRequest, ProviderId, ProviderResult, ProviderStatus,
};
use crate::domain::ports::GeocodeProvider;
use crate::utils::error::Result;
use reqwest::Client;
use serde::Deserialize;

/// OpenStreetMap Nominatim 相容的 Provider (`/search` 端點)
pub struct NominatimProvider {
    id: ProviderId,
    endpoint: String,
    api_key: Option<String>,
    max_results: usize,
    client: Client,
}

impl NominatimProvider {
    pub fn new(
        id: ProviderId,
        endpoint: String,
        api_key: Option<String>,
        max_results: usize,
        client: Client,
    ) -> Self {
        Self {
            id,
            endpoint,
            api_key,
            max_results,
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    display_name: String,
    lat: String,
    lon: String,
    #[serde(default)]
    boundingbox: Option<Vec<String>>,
    place_id: Option<serde_json::Value>,
}

/// Nominatim 的 boundingbox 順序為 [south, north, west, east]
fn parse_bounding_box(raw: &[String]) -> Option<BoundingBox> {
    let values: Vec<f64> = raw.iter().map(|v| v.parse::<f64>().ok()).collect::<Option<_>>()?;
    match values.as_slice() {
        [south, north, west, east] => Some(BoundingBox {
            south: *south,
            west: *west,
            north: *north,
            east: *east,
        }),
        _ => None,
    }
}

fn parse_place(value: serde_json::Value) -> std::result::Result<Candidate, String> {
    let place: Place = serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
    let lat = place
        .lat
        .parse::<f64>()
        .map_err(|e| format!("invalid lat: {e}"))?;
    let lng = place
        .lon
        .parse::<f64>()
        .map_err(|e| format!("invalid lon: {e}"))?;

    let mut candidate = Candidate::new(place.display_name, Coordinate { lat, lng });
    candidate.bounds = place.boundingbox.as_deref().and_then(parse_bounding_box);
    candidate.place_id = place.place_id.map(|id| match id {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    });
    candidate.raw = Some(value);
    Ok(candidate)
}

#[async_trait::async_trait]
impl GeocodeProvider for NominatimProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    async fn geocode(&self, request: &GeocodeRequest) -> Result<ProviderResult> {
        let mut query = vec![
            ("q", request.address().to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", self.max_results.to_string()),
        ];
        if let Some(b) = request.bounds_hint() {
            // viewbox = left,top,right,bottom
            query.push((
                "viewbox",
                format!("{},{},{},{}", b.west, b.north, b.east, b.south),
            ));
        }
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.clone()));
        }

        tracing::debug!(provider = %self.id, "Making geocode request to: {}", self.endpoint);
        let response = match self.client.get(&self.endpoint).query(&query).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(provider = %self.id, "Request failed: {}", e);
                return Ok(ProviderResult::failed(ProviderStatus::Error));
            }
        };

        tracing::debug!(provider = %self.id, "API response status: {}", response.status());
        if !response.status().is_success() {
            return Ok(ProviderResult::failed(classify_http_status(
                response.status(),
            )));
        }

        let places: Vec<serde_json::Value> = match response.json().await {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!(provider = %self.id, "Failed to parse geocoding response: {}", e);
                return Ok(ProviderResult::failed(ProviderStatus::Error));
            }
        };

        if places.is_empty() {
            return Ok(ProviderResult::failed(ProviderStatus::ZeroResults));
        }

        let candidates: std::result::Result<Vec<Candidate>, String> = places
            .into_iter()
            .take(self.max_results)
            .map(parse_place)
            .collect();

        match candidates {
            Ok(candidates) => Ok(ProviderResult::success(candidates)),
            Err(e) => {
                tracing::warn!(provider = %self.id, "Malformed place in response: {}", e);
                Ok(ProviderResult::failed(ProviderStatus::Error))
            }
        }
    }
}
