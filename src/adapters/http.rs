use crate::domain::model::ProviderStatus;
use crate::utils::error::Result;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("geocode-chain/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_MAX_RESULTS: usize = 5;

pub fn build_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// 將非 2xx 的 HTTP 狀態碼轉換為 Provider 狀態
pub fn classify_http_status(status: StatusCode) -> ProviderStatus {
    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderStatus::TooManyRequests,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderStatus::RequestDenied,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderStatus::InvalidRequest
        }
        _ => ProviderStatus::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_http_status() {
        assert_eq!(
            classify_http_status(StatusCode::TOO_MANY_REQUESTS),
            ProviderStatus::TooManyRequests
        );
        assert_eq!(
            classify_http_status(StatusCode::FORBIDDEN),
            ProviderStatus::RequestDenied
        );
        assert_eq!(
            classify_http_status(StatusCode::UNAUTHORIZED),
            ProviderStatus::RequestDenied
        );
        assert_eq!(
            classify_http_status(StatusCode::BAD_REQUEST),
            ProviderStatus::InvalidRequest
        );
        assert_eq!(
            classify_http_status(StatusCode::INTERNAL_SERVER_ERROR),
            ProviderStatus::Error
        );
        assert_eq!(
            classify_http_status(StatusCode::NOT_FOUND),
            ProviderStatus::Error
        );
    }
}
