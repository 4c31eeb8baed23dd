use crate::adapters::http::{DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use crate::utils::error::{GeocodeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    Nominatim,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    pub kind: ProviderKind,
    pub endpoint: String,
    pub api_key: Option<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub daily_quota: Option<u32>,
    pub timeout_seconds: Option<u64>,
    pub max_results: Option<usize>,
}

fn default_enabled() -> bool {
    true
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl GeocoderConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GeocodeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GeocodeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn service_name(&self) -> &str {
        self.service.name.as_deref().unwrap_or("geocode-chain")
    }

    pub fn user_agent(&self) -> &str {
        self.service.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// 已啟用的 Provider
    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled)
    }

    /// Provider 的請求逾時，未設定時沿用 service 層級的預設值
    pub fn timeout_for(&self, provider: &ProviderConfig) -> Duration {
        let seconds = provider
            .timeout_seconds
            .or(self.service.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        Duration::from_secs(seconds)
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(GeocodeError::MissingConfigError {
                field: "providers".to_string(),
            });
        }

        if let Some(timeout) = self.service.timeout_seconds {
            validation::validate_range("service.timeout_seconds", timeout, 1, 120)?;
        }

        validation::validate_unique(
            "providers.id",
            self.providers.iter().map(|p| p.id.as_str()),
        )?;

        for (i, provider) in self.providers.iter().enumerate() {
            provider.validate_at(i)?;
        }

        Ok(())
    }
}

impl ProviderConfig {
    pub fn max_results(&self) -> usize {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }

    fn validate_at(&self, index: usize) -> Result<()> {
        let field = |name: &str| format!("providers[{}].{}", index, name);

        validation::validate_non_empty_string(&field("id"), &self.id)?;
        validation::validate_url(&field("endpoint"), &self.endpoint)?;

        if self.kind == ProviderKind::Google {
            let key = validation::validate_required_field(&field("api_key"), &self.api_key)?;
            validation::validate_non_empty_string(&field("api_key"), key)?;
        }
        if let Some(key) = &self.api_key {
            // 環境變數未設定時會留下 ${VAR}
            if env_var_pattern().is_match(key) {
                return Err(GeocodeError::InvalidConfigValueError {
                    field: field("api_key"),
                    value: key.clone(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
        }
        if let Some(quota) = self.daily_quota {
            validation::validate_positive_number(&field("daily_quota"), u64::from(quota), 1)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range(&field("timeout_seconds"), timeout, 1, 120)?;
        }
        if let Some(max_results) = self.max_results {
            validation::validate_range(&field("max_results"), max_results, 1, 50)?;
        }

        Ok(())
    }
}

impl Validate for GeocoderConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
