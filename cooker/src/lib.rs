use common::{last_known_price, CreatorProfile, ForecastResult, Horizon, MarketDataPoint, Token};
use log::{debug, info, warn};
use rand::Rng;

pub mod config;
pub mod predictions;
pub mod providers;

use config::ForecastConfig;
use predictions::{
    forecast::resolve_forecast, insights::resolve_insights, prediction_types::PredictionType,
};
use providers::{
    core::{AiProvider, CompletionRequest},
    instructions::get_system_instruction,
    prompter::{build_forecast_prompt, build_insight_prompt},
};

/// Forecast and creator-insight pipeline over one completion provider.
///
/// Neither operation fails: provider errors and unusable replies resolve to
/// fallback results.
pub struct ForecastService<P: AiProvider> {
    provider: P,
    config: ForecastConfig,
}

impl<P: AiProvider> ForecastService<P> {
    pub fn new(provider: P, config: ForecastConfig) -> Self {
        ForecastService { provider, config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn generate_forecast(
        &self,
        token: &Token,
        market_data: &[MarketDataPoint],
        horizon: Horizon,
    ) -> ForecastResult {
        let raw_text = self.request_forecast_text(token, market_data, horizon).await;
        resolve_forecast(&raw_text, last_known_price(market_data), &mut rand::rng())
    }

    /// Same as [`Self::generate_forecast`], drawing the fallback perturbation from `rng`.
    pub async fn generate_forecast_with_rng<R: Rng>(
        &self,
        token: &Token,
        market_data: &[MarketDataPoint],
        horizon: Horizon,
        rng: &mut R,
    ) -> ForecastResult {
        let raw_text = self.request_forecast_text(token, market_data, horizon).await;
        resolve_forecast(&raw_text, last_known_price(market_data), rng)
    }

    pub async fn generate_creator_insights(&self, profile: &CreatorProfile) -> Vec<String> {
        let prompt = build_insight_prompt(profile);
        let raw_text = self
            .request_completion(PredictionType::CreatorInsights, &prompt)
            .await;

        resolve_insights(&raw_text)
    }

    async fn request_forecast_text(
        &self,
        token: &Token,
        market_data: &[MarketDataPoint],
        horizon: Horizon,
    ) -> String {
        info!("Requesting {} forecast for {}", horizon, token.symbol);
        let prompt = build_forecast_prompt(token, market_data, horizon);
        self.request_completion(PredictionType::Forecast, &prompt).await
    }

    /// Raw text of the first completion choice. Errors and missing content
    /// both come back as an empty string.
    async fn request_completion(&self, prediction_type: PredictionType, prompt: &str) -> String {
        let request = CompletionRequest::new(
            get_system_instruction(&prediction_type),
            prompt,
            prediction_type.temperature(&self.config),
        );

        match self.provider.complete(&request).await {
            Ok(Some(text)) => {
                debug!("{:?} completion: {} chars", prediction_type, text.len());
                text
            }
            Ok(None) => {
                warn!("{:?} completion returned no content", prediction_type);
                String::new()
            }
            Err(error) => {
                warn!("{:?} completion failed: {:#}", prediction_type, error);
                String::new()
            }
        }
    }
}
