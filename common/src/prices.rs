use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a tradable token as supplied by the caller.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub token_id: String,
    pub symbol: String,
    pub name: String,
    pub blockchain: String,
    pub contract_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change_24h: Option<f64>,
}

impl Token {
    pub fn new(
        token_id: &str,
        symbol: &str,
        name: &str,
        blockchain: &str,
        contract_address: &str,
    ) -> Self {
        Token {
            token_id: token_id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            blockchain: blockchain.to_string(),
            contract_address: contract_address.to_string(),
            description: None,
            current_price: None,
            price_change_24h: None,
        }
    }

    pub fn with_quote(mut self, current_price: f64, price_change_24h: f64) -> Self {
        self.current_price = Some(current_price);
        self.price_change_24h = Some(price_change_24h);
        self
    }
}

/// One observation of a token's market, ordered chronologically in a series.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketDataPoint {
    pub price: f64,
    pub volume: f64,
    pub market_cap: f64,
    pub price_change_24h: f64,
    pub timestamp: DateTime<Utc>,
}

/// Price of the most recent point, if the series has a usable one.
///
/// Zero, negative and non-finite prices count as missing.
pub fn last_known_price(market_data: &[MarketDataPoint]) -> Option<f64> {
    market_data
        .last()
        .map(|point| point.price)
        .filter(|price| price.is_finite() && *price > 0.0)
}

/// Prices of the last `n` points, oldest first.
pub fn recent_prices(market_data: &[MarketDataPoint], n: usize) -> Vec<f64> {
    let start = market_data.len().saturating_sub(n);
    market_data[start..].iter().map(|point| point.price).collect()
}
