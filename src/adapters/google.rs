use crate::adapters::http::classify_http_status;
use crate::domain::model::{
    BoundingBox, Candidate, Coordinate, GeocodeRequest, ProviderId, ProviderResult, ProviderStatus,
};
use crate::domain::ports::GeocodeProvider;
use crate::utils::error::Result;
use reqwest::Client;
use serde::Deserialize;

/// Google Geocoding API 相容的 Provider
pub struct GoogleProvider {
    id: ProviderId,
    endpoint: String,
    api_key: String,
    max_results: usize,
    client: Client,
}

impl GoogleProvider {
    pub fn new(
        id: ProviderId,
        endpoint: String,
        api_key: String,
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
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    formatted_address: String,
    geometry: Geometry,
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
    viewport: Option<Viewport>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct Viewport {
    northeast: LatLng,
    southwest: LatLng,
}

fn map_status(status: &str) -> ProviderStatus {
    match status {
        "OK" => ProviderStatus::Success,
        "ZERO_RESULTS" => ProviderStatus::ZeroResults,
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => ProviderStatus::TooManyRequests,
        "REQUEST_DENIED" => ProviderStatus::RequestDenied,
        "INVALID_REQUEST" => ProviderStatus::InvalidRequest,
        _ => ProviderStatus::Error,
    }
}

fn to_candidate(result: GoogleResult) -> Candidate {
    let location = result.geometry.location;
    let mut candidate = Candidate::new(
        result.formatted_address,
        Coordinate {
            lat: location.lat,
            lng: location.lng,
        },
    );
    candidate.bounds = result.geometry.viewport.map(|v| BoundingBox {
        south: v.southwest.lat,
        west: v.southwest.lng,
        north: v.northeast.lat,
        east: v.northeast.lng,
    });
    candidate.place_id = result.place_id;
    candidate
}

#[async_trait::async_trait]
impl GeocodeProvider for GoogleProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    async fn geocode(&self, request: &GeocodeRequest) -> Result<ProviderResult> {
        let mut query = vec![
            ("address", request.address().to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(b) = request.bounds_hint() {
            query.push((
                "bounds",
                format!("{},{}|{},{}", b.south, b.west, b.north, b.east),
            ));
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

        let body: GoogleResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(provider = %self.id, "Failed to parse geocoding response: {}", e);
                return Ok(ProviderResult::failed(ProviderStatus::Error));
            }
        };

        let status = map_status(&body.status);
        if status != ProviderStatus::Success {
            if let Some(message) = &body.error_message {
                tracing::warn!(provider = %self.id, status = %body.status, "{}", message);
            }
            return Ok(ProviderResult::failed(status));
        }

        let candidates: Vec<Candidate> = body
            .results
            .into_iter()
            .take(self.max_results)
            .map(to_candidate)
            .collect();
        if candidates.is_empty() {
            return Ok(ProviderResult::failed(ProviderStatus::ZeroResults));
        }

        Ok(ProviderResult::success(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::build_client;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn provider(server: &MockServer, max_results: usize) -> GoogleProvider {
        GoogleProvider::new(
            ProviderId::new("google"),
            server.url("/maps/api/geocode/json"),
            "test-key".to_string(),
            max_results,
            build_client(Duration::from_secs(5), "geocode-chain-test").unwrap(),
        )
    }

    fn request(address: &str) -> GeocodeRequest {
        GeocodeRequest::new(address.to_string(), address.to_lowercase(), None)
    }

    #[test]
    fn test_map_status() {
        assert_eq!(map_status("OK"), ProviderStatus::Success);
        assert_eq!(map_status("ZERO_RESULTS"), ProviderStatus::ZeroResults);
        assert_eq!(map_status("OVER_QUERY_LIMIT"), ProviderStatus::TooManyRequests);
        assert_eq!(map_status("OVER_DAILY_LIMIT"), ProviderStatus::TooManyRequests);
        assert_eq!(map_status("REQUEST_DENIED"), ProviderStatus::RequestDenied);
        assert_eq!(map_status("INVALID_REQUEST"), ProviderStatus::InvalidRequest);
        assert_eq!(map_status("UNKNOWN_ERROR"), ProviderStatus::Error);
    }

    #[tokio::test]
    async fn test_successful_lookup() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/maps/api/geocode/json")
                .query_param("address", "1600 Amphitheatre Parkway")
                .query_param("key", "test-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "status": "OK",
                    "results": [{
                        "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
                        "place_id": "ChIJ2eUgeAK6j4ARbn5u_wAGqWA",
                        "geometry": {
                            "location": {"lat": 37.4224764, "lng": -122.0842499},
                            "viewport": {
                                "northeast": {"lat": 37.4238, "lng": -122.0829},
                                "southwest": {"lat": 37.4211, "lng": -122.0856}
                            }
                        }
                    }]
                }));
        });

        let result = provider(&server, 5)
            .geocode(&request("1600 Amphitheatre Parkway"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(result.status, ProviderStatus::Success);
        assert_eq!(result.candidates.len(), 1);
        let candidate = &result.candidates[0];
        assert_eq!(candidate.coordinate.lat, 37.4224764);
        assert_eq!(candidate.coordinate.lng, -122.0842499);
        assert_eq!(candidate.bounds.unwrap().north, 37.4238);
        assert_eq!(
            candidate.place_id.as_deref(),
            Some("ChIJ2eUgeAK6j4ARbn5u_wAGqWA")
        );
    }

    #[tokio::test]
    async fn test_bounds_hint_is_forwarded() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/maps/api/geocode/json")
                .query_param("bounds", "51.4,-0.2|51.6,0.1");
            then.status(200)
                .json_body(serde_json::json!({"status": "ZERO_RESULTS", "results": []}));
        });

        let hint = BoundingBox {
            south: 51.4,
            west: -0.2,
            north: 51.6,
            east: 0.1,
        };
        let request = GeocodeRequest::new("Baker St".to_string(), "baker st".to_string(), Some(hint));
        let result = provider(&server, 5).geocode(&request).await.unwrap();

        api_mock.assert();
        assert_eq!(result.status, ProviderStatus::ZeroResults);
    }

    #[tokio::test]
    async fn test_denied_status_in_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(200).json_body(serde_json::json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid.",
                "results": []
            }));
        });

        let result = provider(&server, 5).geocode(&request("x")).await.unwrap();

        assert_eq!(result.status, ProviderStatus::RequestDenied);
        assert!(result.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_results_truncated_to_max() {
        let server = MockServer::start();
        let result_item = serde_json::json!({
            "formatted_address": "Springfield",
            "geometry": {"location": {"lat": 39.78, "lng": -89.65}}
        });
        server.mock(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "results": [result_item.clone(), result_item.clone(), result_item]
            }));
        });

        let result = provider(&server, 2).geocode(&request("Springfield")).await.unwrap();

        assert_eq!(result.status, ProviderStatus::Success);
        assert_eq!(result.candidates.len(), 2);
        assert!(result.candidates[0].bounds.is_none());
    }

    #[tokio::test]
    async fn test_ok_without_results_is_zero_results() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(200)
                .json_body(serde_json::json!({"status": "OK", "results": []}));
        });

        let result = provider(&server, 5).geocode(&request("x")).await.unwrap();

        assert_eq!(result.status, ProviderStatus::ZeroResults);
    }

    #[tokio::test]
    async fn test_server_error_and_bad_body_map_to_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(503);
        });
        let result = provider(&server, 5).geocode(&request("x")).await.unwrap();
        assert_eq!(result.status, ProviderStatus::Error);

        let garbled = MockServer::start();
        garbled.mock(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(200).body("<html>not json</html>");
        });
        let result = provider(&garbled, 5).geocode(&request("x")).await.unwrap();
        assert_eq!(result.status, ProviderStatus::Error);
    }

    #[tokio::test]
    async fn test_rate_limited_http_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(429);
        });

        let result = provider(&server, 5).geocode(&request("x")).await.unwrap();

        assert_eq!(result.status, ProviderStatus::TooManyRequests);
    }
}
