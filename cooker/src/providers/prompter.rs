use common::{recent_prices, CreatorProfile, Horizon, MarketDataPoint, Token};

use super::instructions::FORECAST_SCHEMA_INSTRUCTION;

const PRICE_HISTORY_WINDOW: usize = 10;

/// Renders the forecast request for `token` over `horizon`.
///
/// Pure: the same inputs always give the same prompt. An empty series
/// renders a current price of 0 and an empty history line.
pub fn build_forecast_prompt(token: &Token, market_data: &[MarketDataPoint], horizon: Horizon) -> String {
    let current_price = market_data.last().map_or(0.0, |point| point.price);
    let price_history = recent_prices(market_data, PRICE_HISTORY_WINDOW)
        .iter()
        .map(|price| price.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let name = &token.name;
    let symbol = &token.symbol;
    let contract_address = &token.contract_address;
    let blockchain = &token.blockchain;

    format!(
        r#"Analyze the following token and provide a {horizon} price forecast:

Token: {name} ({symbol})
Current Price: ${current_price}
Recent Price History: {price_history}
Contract: {contract_address}
Blockchain: {blockchain}

Please provide:
1. Predicted price for {horizon}
2. Confidence level (0-100%)
3. Price range (low-high)
4. Key factors influencing the prediction
5. Risk assessment (low/medium/high)
6. Investment recommendation

{FORECAST_SCHEMA_INSTRUCTION}"#
    )
}

pub fn build_insight_prompt(profile: &CreatorProfile) -> String {
    let metrics = &profile.performance_metrics;

    format!(
        r#"Analyze this creator token profile and provide 3-5 actionable growth insights:

Token: {}
Holder Count: {}
Trading Volume: {}
Social Engagement: {}
Growth Rate: {}%

Provide specific, actionable recommendations for improving token performance."#,
        profile.token_symbol,
        metrics.holder_count,
        metrics.trading_volume,
        metrics.social_engagement,
        metrics.growth_rate,
    )
}
