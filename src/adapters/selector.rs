use crate::domain::model::ProviderId;
use crate::domain::ports::{GeocodeProvider, ProviderSelector};
use crate::utils::error::{GeocodeError, Result};
use chrono::{NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// 已啟用的 Provider 及其排序與配額設定
pub struct ProviderEntry {
    pub provider: Arc<dyn GeocodeProvider>,
    pub priority: i32,
    pub daily_quota: Option<u32>,
}

#[derive(Debug, Clone, Copy)]
struct DailyUsage {
    day: NaiveDate,
    used: u32,
}

/// 依優先順序挑選 Provider，並以 UTC 日為單位計算配額
pub struct PrioritySelector {
    entries: Vec<ProviderEntry>,
    usage: Mutex<HashMap<ProviderId, DailyUsage>>,
}

impl PrioritySelector {
    pub fn new(mut entries: Vec<ProviderEntry>) -> Self {
        // 穩定排序，同優先順序保留配置中的順序
        entries.sort_by_key(|entry| entry.priority);
        Self {
            entries,
            usage: Mutex::new(HashMap::new()),
        }
    }

    pub fn provider_ids(&self) -> Vec<&ProviderId> {
        self.entries.iter().map(|entry| entry.provider.id()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 取得指定 Provider 今日已被選用的次數
    pub fn usage_today(&self, provider: &ProviderId) -> Result<u32> {
        self.usage_on(provider, Utc::now().date_naive())
    }

    fn usage_on(&self, provider: &ProviderId, day: NaiveDate) -> Result<u32> {
        let usage = self.lock_usage()?;
        Ok(usage
            .get(provider)
            .filter(|u| u.day == day)
            .map(|u| u.used)
            .unwrap_or(0))
    }

    fn lock_usage(&self) -> Result<std::sync::MutexGuard<'_, HashMap<ProviderId, DailyUsage>>> {
        self.usage.lock().map_err(|_| GeocodeError::SelectorError {
            message: "usage counter lock poisoned".to_string(),
        })
    }

    fn select_on(
        &self,
        excluded: &HashSet<ProviderId>,
        today: NaiveDate,
    ) -> Result<Option<Arc<dyn GeocodeProvider>>> {
        let mut usage = self.lock_usage()?;

        for entry in &self.entries {
            let id = entry.provider.id();
            if excluded.contains(id) {
                continue;
            }

            let counter = usage.entry(id.clone()).or_insert(DailyUsage {
                day: today,
                used: 0,
            });
            if counter.day != today {
                *counter = DailyUsage {
                    day: today,
                    used: 0,
                };
            }

            if let Some(quota) = entry.daily_quota {
                if counter.used >= quota {
                    tracing::warn!(provider = %id, quota, "Daily quota reached, skipping provider");
                    continue;
                }
            }

            counter.used += 1;
            tracing::debug!(provider = %id, used = counter.used, "Selected provider");
            return Ok(Some(entry.provider.clone()));
        }

        Ok(None)
    }
}

impl ProviderSelector for PrioritySelector {
    async fn select_next(
        &self,
        excluded: &HashSet<ProviderId>,
    ) -> Result<Option<Arc<dyn GeocodeProvider>>> {
        self.select_on(excluded, Utc::now().date_naive())
    }
}
