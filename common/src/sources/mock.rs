use chrono::{Duration, Utc};
use rand::Rng;

use crate::{MarketDataPoint, Token};

const MOCK_BASE_PRICE: f64 = 100.0;
const MOCK_MIN_PRICE: f64 = 0.01;
const MOCK_SUPPLY: f64 = 1_000_000.0;

/// Random-walk daily series ending today: `days + 1` points, each moving by
/// less than 5% from the previous one.
pub fn generate_mock_market_data<R: Rng>(days: u32, rng: &mut R) -> Vec<MarketDataPoint> {
    let today = Utc::now();
    let mut current_price = MOCK_BASE_PRICE;

    (0..=days)
        .rev()
        .map(|days_ago| {
            let change: f64 = rng.random_range(-0.05..0.05);
            current_price *= 1.0 + change;
            let price = current_price.max(MOCK_MIN_PRICE);

            MarketDataPoint {
                price,
                volume: rng.random_range(100_000.0..1_100_000.0),
                market_cap: price * MOCK_SUPPLY,
                price_change_24h: change * 100.0,
                timestamp: today - Duration::days(days_ago as i64),
            }
        })
        .collect()
}

/// Tokens listed on the dashboard.
pub fn mock_tokens() -> Vec<Token> {
    vec![
        Token::new("1", "ETH", "Ethereum", "base", "0x...").with_quote(2340.50, 5.2),
        Token::new("2", "BASE", "Base Token", "base", "0x...").with_quote(1.85, -2.1),
        Token::new("3", "DEGEN", "Degen", "base", "0x...").with_quote(0.0234, 12.5),
    ]
}

/// Looks a dashboard token up by symbol, falling back to the first one.
pub fn find_mock_token(symbol: &str) -> Token {
    let tokens = mock_tokens();
    tokens
        .iter()
        .find(|token| token.symbol.eq_ignore_ascii_case(symbol))
        .unwrap_or(&tokens[0])
        .clone()
}

/// A single-point series quoting the token's current price, the way the
/// forecast modal feeds the pipeline.
pub fn quote_as_market_data(token: &Token) -> Vec<MarketDataPoint> {
    match token.current_price {
        Some(price) => vec![MarketDataPoint {
            price,
            volume: 1_000_000.0,
            market_cap: 50_000_000.0,
            price_change_24h: token.price_change_24h.unwrap_or_default(),
            timestamp: Utc::now(),
        }],
        None => vec![],
    }
}
