use anyhow::{Context, Result};
use log::warn;

use crate::providers::openrouter::OpenRouterModel;

pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";

pub const FORECAST_TEMPERATURE: f32 = 0.3;
pub const INSIGHT_TEMPERATURE: f32 = 0.4;

/// Endpoint, credential and sampling settings, fixed at process start.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub forecast_temperature: f32,
    pub insight_temperature: f32,
    pub timeout_secs: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig {
            api_url: OPENROUTER_API_URL.to_string(),
            api_key: String::new(),
            model: OpenRouterModel::default().as_ref().to_string(),
            forecast_temperature: FORECAST_TEMPERATURE,
            insight_temperature: INSIGHT_TEMPERATURE,
            timeout_secs: 30,
        }
    }
}

impl ForecastConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `OPENROUTER_API_KEY`, `OPENROUTER_API_URL`,
    /// `OPENROUTER_MODEL` and `FORECAST_TIMEOUT_SECS`.
    ///
    /// A missing key is not an error: every call will then fail upstream and
    /// resolve to the fallback forecast.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ForecastConfig::default();

        match lookup("OPENROUTER_API_KEY").filter(|key| !key.trim().is_empty()) {
            Some(api_key) => config.api_key = api_key,
            None => warn!("OPENROUTER_API_KEY is not set, forecasts will use fallback results"),
        }
        if let Some(api_url) = lookup("OPENROUTER_API_URL") {
            config.api_url = api_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("OPENROUTER_MODEL") {
            config.model = model;
        }
        if let Some(timeout_secs) = lookup("FORECAST_TIMEOUT_SECS") {
            config.timeout_secs = timeout_secs
                .parse()
                .with_context(|| format!("Invalid FORECAST_TIMEOUT_SECS: {timeout_secs}"))?;
        }

        Ok(config)
    }
}
