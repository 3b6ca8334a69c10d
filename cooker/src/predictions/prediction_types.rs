use crate::config::ForecastConfig;

// The two kinds of completion the service asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionType {
    Forecast,
    CreatorInsights,
}

impl PredictionType {
    pub fn temperature(&self, config: &ForecastConfig) -> f32 {
        match self {
            PredictionType::Forecast => config.forecast_temperature,
            PredictionType::CreatorInsights => config.insight_temperature,
        }
    }
}
