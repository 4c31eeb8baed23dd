use crate::adapters::google::GoogleProvider;
use crate::adapters::http::build_client;
use crate::adapters::key::NormalizedKeyDeriver;
use crate::adapters::nominatim::NominatimProvider;
use crate::adapters::selector::{PrioritySelector, ProviderEntry};
use crate::config::toml_config::{GeocoderConfig, ProviderConfig, ProviderKind};
use crate::core::orchestrator::GeocodeOrchestrator;
use crate::domain::model::ProviderId;
use crate::domain::ports::GeocodeProvider;
use crate::utils::error::{GeocodeError, Result};
use std::sync::Arc;

fn build_provider(
    config: &GeocoderConfig,
    provider: &ProviderConfig,
) -> Result<Arc<dyn GeocodeProvider>> {
    let client = build_client(config.timeout_for(provider), config.user_agent())?;
    let id = ProviderId::new(provider.id.clone());

    let built: Arc<dyn GeocodeProvider> = match provider.kind {
        ProviderKind::Google => {
            let api_key = provider
                .api_key
                .clone()
                .ok_or_else(|| GeocodeError::MissingConfigError {
                    field: format!("providers.{}.api_key", provider.id),
                })?;
            Arc::new(GoogleProvider::new(
                id,
                provider.endpoint.clone(),
                api_key,
                provider.max_results(),
                client,
            ))
        }
        ProviderKind::Nominatim => Arc::new(NominatimProvider::new(
            id,
            provider.endpoint.clone(),
            provider.api_key.clone(),
            provider.max_results(),
            client,
        )),
    };
    Ok(built)
}

/// 依配置建立已啟用的 Provider 清單
pub fn build_providers(config: &GeocoderConfig) -> Result<Vec<ProviderEntry>> {
    let mut entries = Vec::new();

    for provider in &config.providers {
        if !provider.enabled {
            tracing::info!(provider = %provider.id, "Provider is disabled, skipping");
            continue;
        }

        entries.push(ProviderEntry {
            provider: build_provider(config, provider)?,
            priority: provider.priority,
            daily_quota: provider.daily_quota,
        });
        tracing::debug!(
            provider = %provider.id,
            kind = ?provider.kind,
            priority = provider.priority,
            "Configured provider"
        );
    }

    if entries.is_empty() {
        tracing::warn!("No geocoding providers are enabled; every lookup will report no providers available");
    }

    Ok(entries)
}

/// 由配置組裝完整的 orchestrator
pub fn build_orchestrator(
    config: &GeocoderConfig,
) -> Result<GeocodeOrchestrator<PrioritySelector, NormalizedKeyDeriver>> {
    let selector = PrioritySelector::new(build_providers(config)?);
    Ok(GeocodeOrchestrator::new(selector, NormalizedKeyDeriver))
}
