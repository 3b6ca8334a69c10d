use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Credits a forecast costs. Recorded on requests, never charged.
pub const FORECAST_COST_CREDITS: u32 = 2;

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display, Serialize, Deserialize,
)]
pub enum Horizon {
    #[strum(serialize = "1d")]
    #[serde(rename = "1d")]
    OneDay,
    #[strum(serialize = "7d")]
    #[serde(rename = "7d")]
    SevenDays,
    #[default]
    #[strum(serialize = "30d")]
    #[serde(rename = "30d")]
    ThirtyDays,
    #[strum(serialize = "90d")]
    #[serde(rename = "90d")]
    NinetyDays,
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

/// The display payload for one forecast. Every value handed out by the
/// pipeline keeps `confidence <= 100`, `0 <= low <= high` and a non-empty
/// `key_factors`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub predicted_price: f64,
    pub confidence: u8,
    pub price_range: PriceRange,
    pub key_factors: Vec<String>,
    pub risk_level: RiskLevel,
    pub recommendation: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ForecastStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastParameters {
    pub timeframe: Horizon,
    pub confidence_level: u8,
}

/// Bookkeeping record for a forecast a user asked for.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub request_id: String,
    pub user_id: String,
    pub token_id: String,
    pub request_timestamp: DateTime<Utc>,
    pub parameters: ForecastParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ForecastResult>,
    pub cost: u32,
    pub status: ForecastStatus,
}

impl ForecastRequest {
    pub fn new(request_id: &str, user_id: &str, token_id: &str, parameters: ForecastParameters) -> Self {
        ForecastRequest {
            request_id: request_id.to_string(),
            user_id: user_id.to_string(),
            token_id: token_id.to_string(),
            request_timestamp: Utc::now(),
            parameters,
            result: None,
            cost: FORECAST_COST_CREDITS,
            status: ForecastStatus::Pending,
        }
    }

    pub fn complete(mut self, result: ForecastResult) -> Self {
        self.result = Some(result);
        self.status = ForecastStatus::Completed;
        self
    }

    pub fn fail(mut self) -> Self {
        self.result = None;
        self.status = ForecastStatus::Failed;
        self
    }
}
