use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub holder_count: u64,
    pub trading_volume: f64,
    pub social_engagement: f64,
    /// Percent.
    pub growth_rate: f64,
}

/// A creator token and how it has been doing. Only read to build the insight prompt.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatorProfile {
    #[serde(default)]
    pub profile_id: String,
    #[serde(default)]
    pub user_id: String,
    pub token_symbol: String,
    pub performance_metrics: PerformanceMetrics,
    #[serde(default)]
    pub growth_insights: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreatorProfile {
    pub fn new(token_symbol: &str, performance_metrics: PerformanceMetrics) -> Self {
        let now = Utc::now();
        CreatorProfile {
            profile_id: String::new(),
            user_id: String::new(),
            token_symbol: token_symbol.to_string(),
            performance_metrics,
            growth_insights: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_insights(mut self, insights: Vec<String>) -> Self {
        self.growth_insights = insights;
        self.updated_at = Utc::now();
        self
    }
}
