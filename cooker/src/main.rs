use std::str::FromStr;

use anyhow::{anyhow, Result};
use common::{
    sources::mock::{find_mock_token, generate_mock_market_data, quote_as_market_data},
    transforms::numbers::{format_number, format_percentage, format_price},
    CreatorProfile, Horizon, PerformanceMetrics,
};
use cooker::{config::ForecastConfig, providers::openrouter::OpenRouterProvider, ForecastService};
use log::info;
use serde_json::json;

// Usage: cooker [SYMBOL] [1d|7d|30d|90d]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let symbol = args.next().unwrap_or_else(|| "ETH".to_string());
    let horizon = match args.next() {
        Some(label) => Horizon::from_str(&label)
            .map_err(|_| anyhow!("Unknown timeframe {label}, expected one of 1d, 7d, 30d, 90d"))?,
        None => Horizon::default(),
    };

    let config = ForecastConfig::from_env()?;
    let provider = OpenRouterProvider::new(&config)?;
    let service = ForecastService::new(provider, config);
    info!("Using model {} at {}", service.config().model, service.config().api_url);

    let token = find_mock_token(&symbol);
    let chart = generate_mock_market_data(30, &mut rand::rng());
    let forecast = service
        .generate_forecast(&token, &quote_as_market_data(&token), horizon)
        .await;

    let profile = CreatorProfile::new(
        "CREATOR",
        PerformanceMetrics {
            holder_count: 1247,
            trading_volume: 45000.0,
            social_engagement: 8.5,
            growth_rate: 12.3,
        },
    );
    let insights = service.generate_creator_insights(&profile).await;

    let output = json!({
        "token": token,
        "display": {
            "price": format_price(token.current_price.unwrap_or_default()),
            "change": format_percentage(token.price_change_24h.unwrap_or_default()),
            "predictedPrice": format_price(forecast.predicted_price),
            "creatorVolume": format_number(profile.performance_metrics.trading_volume),
            "creatorHolders": format_number(profile.performance_metrics.holder_count as f64),
        },
        "timeframe": horizon,
        "chart": chart,
        "forecast": forecast,
        "creator": profile.with_insights(insights),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
