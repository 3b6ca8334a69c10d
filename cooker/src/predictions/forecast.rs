use std::fmt;
use std::str::FromStr;

use common::{ForecastResult, PriceRange, RiskLevel};
use log::warn;
use rand::Rng;
use serde_json::{Map, Value};

use crate::providers::cleaner::{extract_json_object, try_parse_json_with_trailing_comma_removal};

pub const DEFAULT_CONFIDENCE: u8 = 75;
pub const DEFAULT_RECOMMENDATION: &str = "Hold and monitor market conditions";
pub const DEFAULT_KEY_FACTORS: [&str; 2] = ["Market trends", "Technical analysis"];

pub const FALLBACK_BASE_PRICE: f64 = 100.0;
pub const FALLBACK_VOLATILITY: f64 = 0.15;
// Half-open, so the perturbation never reaches +10%.
pub const FALLBACK_PERTURBATION: f64 = 0.1;
pub const FALLBACK_CONFIDENCE: u8 = 65;
pub const FALLBACK_RECOMMENDATION: &str =
    "Monitor closely and consider market conditions before making decisions.";
pub const FALLBACK_KEY_FACTORS: [&str; 3] =
    ["Market sentiment", "Technical indicators", "Trading volume"];

/// Why a completion could not be turned into a forecast.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeFailure {
    NoJsonObject,
    InvalidJson(String),
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeFailure::NoJsonObject => write!(f, "no JSON object in completion text"),
            DecodeFailure::InvalidJson(error) => write!(f, "invalid JSON: {error}"),
        }
    }
}

impl std::error::Error for DecodeFailure {}

/// Turns completion text into a forecast, or falls back to a synthetic one
/// anchored on `reference_price` when nothing usable can be decoded.
pub fn resolve_forecast<R: Rng>(
    raw_text: &str,
    reference_price: Option<f64>,
    rng: &mut R,
) -> ForecastResult {
    match decode_forecast(raw_text, reference_price) {
        Ok(forecast) => forecast,
        Err(failure) => {
            warn!("Using fallback forecast: {failure}");
            fallback_forecast(reference_price, rng)
        }
    }
}

/// Strict decode step. Individual fields that are missing, mistyped or out
/// of range are defaulted or clamped; only a missing or unparseable object
/// fails the whole decode.
pub fn decode_forecast(
    raw_text: &str,
    reference_price: Option<f64>,
) -> Result<ForecastResult, DecodeFailure> {
    let json_string = extract_json_object(raw_text).ok_or(DecodeFailure::NoJsonObject)?;
    let object: Map<String, Value> = try_parse_json_with_trailing_comma_removal(json_string)
        .map_err(|e| DecodeFailure::InvalidJson(e.to_string()))?;

    let predicted_price = positive_number(object.get("predictedPrice"))
        .or(reference_price)
        .unwrap_or(0.0);

    let confidence = object
        .get("confidence")
        .and_then(Value::as_f64)
        .map_or(DEFAULT_CONFIDENCE, clamp_confidence);

    Ok(ForecastResult {
        predicted_price,
        confidence,
        price_range: decode_price_range(object.get("priceRange")),
        key_factors: decode_key_factors(object.get("keyFactors")),
        risk_level: object
            .get("riskLevel")
            .and_then(Value::as_str)
            .and_then(|risk| RiskLevel::from_str(risk).ok())
            .unwrap_or_default(),
        recommendation: object
            .get("recommendation")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_RECOMMENDATION)
            .to_string(),
    })
}

pub fn clamp_confidence(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

fn positive_number(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|number| number.is_finite() && *number > 0.0)
}

fn bound(range: &Map<String, Value>, key: &str) -> f64 {
    range
        .get(key)
        .and_then(Value::as_f64)
        .filter(|number| number.is_finite())
        .map_or(0.0, |number| number.max(0.0))
}

// Bounds are floored at zero and put in order. Anything but an object reads as no range.
fn decode_price_range(value: Option<&Value>) -> PriceRange {
    let (low, high) = match value {
        Some(Value::Object(range)) => (bound(range, "low"), bound(range, "high")),
        _ => (0.0, 0.0),
    };

    PriceRange {
        low: low.min(high),
        high: low.max(high),
    }
}

fn decode_key_factors(value: Option<&Value>) -> Vec<String> {
    let factors: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|factor| !factor.is_empty())
            .map(str::to_string)
            .collect(),
        _ => vec![],
    };

    if factors.is_empty() {
        DEFAULT_KEY_FACTORS.iter().map(|f| f.to_string()).collect()
    } else {
        factors
    }
}

/// Synthetic forecast around `base_price` (100 when unknown): the prediction
/// moves by a uniform draw in [-10%, +10%), the range spans ±15%.
pub fn fallback_forecast<R: Rng>(base_price: Option<f64>, rng: &mut R) -> ForecastResult {
    let current_price = base_price.unwrap_or(FALLBACK_BASE_PRICE);
    let perturbation: f64 = rng.random_range(-FALLBACK_PERTURBATION..FALLBACK_PERTURBATION);

    ForecastResult {
        predicted_price: current_price * (1.0 + perturbation),
        confidence: FALLBACK_CONFIDENCE,
        price_range: PriceRange {
            low: current_price * (1.0 - FALLBACK_VOLATILITY),
            high: current_price * (1.0 + FALLBACK_VOLATILITY),
        },
        key_factors: FALLBACK_KEY_FACTORS.iter().map(|f| f.to_string()).collect(),
        risk_level: RiskLevel::Medium,
        recommendation: FALLBACK_RECOMMENDATION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const WELL_FORMED: &str = r#"Sure! Here is my analysis:
```json
{
  "predictedPrice": 2520.75,
  "confidence": 72,
  "priceRange": {"low": 2300, "high": 2750.5},
  "keyFactors": ["ETF inflows", "L2 activity", "Macro risk"],
  "riskLevel": "high",
  "recommendation": "Accumulate on dips"
}
```"#;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn is_fallback(forecast: &ForecastResult) -> bool {
        forecast.confidence == FALLBACK_CONFIDENCE
            && forecast.risk_level == RiskLevel::Medium
            && forecast.key_factors.len() == 3
            && forecast.recommendation == FALLBACK_RECOMMENDATION
    }

    fn decode(json: &str) -> ForecastResult {
        decode_forecast(json, Some(50.0)).unwrap()
    }

    #[test]
    fn test_resolve_well_formed_reply() {
        let forecast = resolve_forecast(WELL_FORMED, Some(2340.5), &mut rng());
        assert_eq!(
            forecast,
            ForecastResult {
                predicted_price: 2520.75,
                confidence: 72,
                price_range: PriceRange {
                    low: 2300.0,
                    high: 2750.5
                },
                key_factors: vec![
                    "ETF inflows".to_string(),
                    "L2 activity".to_string(),
                    "Macro risk".to_string()
                ],
                risk_level: RiskLevel::High,
                recommendation: "Accumulate on dips".to_string(),
            }
        );
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(decode(r#"{"confidence": -10}"#).confidence, 0);
        assert_eq!(decode(r#"{"confidence": 150}"#).confidence, 100);
        assert_eq!(decode(r#"{"confidence": 42}"#).confidence, 42);
        assert_eq!(decode(r#"{"confidence": 0}"#).confidence, 0);
        assert_eq!(decode(r#"{"confidence": 66.6}"#).confidence, 67);
        assert_eq!(decode(r#"{}"#).confidence, DEFAULT_CONFIDENCE);
        assert_eq!(decode(r#"{"confidence": "very"}"#).confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_predicted_price_defaults() {
        assert_eq!(decode(r#"{"predictedPrice": 12.5}"#).predicted_price, 12.5);
        assert_eq!(decode(r#"{}"#).predicted_price, 50.0);
        assert_eq!(decode(r#"{"predictedPrice": "12.5"}"#).predicted_price, 50.0);
        assert_eq!(decode(r#"{"predictedPrice": 0}"#).predicted_price, 50.0);
        assert_eq!(decode_forecast("{}", None).unwrap().predicted_price, 0.0);
    }

    #[test]
    fn test_price_range_defaults_and_ordering() {
        let missing = decode(r#"{}"#).price_range;
        assert_eq!((missing.low, missing.high), (0.0, 0.0));

        let partial = decode(r#"{"priceRange": {"high": 60}}"#).price_range;
        assert_eq!((partial.low, partial.high), (0.0, 60.0));

        let negative = decode(r#"{"priceRange": {"low": -5, "high": 10}}"#).price_range;
        assert_eq!((negative.low, negative.high), (0.0, 10.0));

        // Inverted bounds from the provider are swapped, not rejected.
        let inverted = decode(r#"{"priceRange": {"low": 70, "high": 40}}"#).price_range;
        assert_eq!((inverted.low, inverted.high), (40.0, 70.0));

        for shape in [r#""2400-2800""#, "[]", "12"] {
            let range = decode(&format!(r#"{{"priceRange": {shape}}}"#)).price_range;
            assert_eq!((range.low, range.high), (0.0, 0.0), "priceRange {shape}");
        }
    }

    #[test]
    fn test_key_factors_defaults() {
        let default_factors: Vec<String> = DEFAULT_KEY_FACTORS.iter().map(|f| f.to_string()).collect();
        assert_eq!(decode(r#"{}"#).key_factors, default_factors);
        assert_eq!(decode(r#"{"keyFactors": "hype"}"#).key_factors, default_factors);
        assert_eq!(decode(r#"{"keyFactors": []}"#).key_factors, default_factors);
        assert_eq!(
            decode(r#"{"keyFactors": [" Volume ", ""]}"#).key_factors,
            vec!["Volume".to_string()]
        );
        assert_eq!(
            decode(r#"{"keyFactors": ["ETF", 3, {"nested": true}]}"#).key_factors,
            vec!["ETF".to_string()]
        );
        assert_eq!(decode(r#"{"keyFactors": [1, null]}"#).key_factors, default_factors);
    }

    #[test]
    fn test_mistyped_fields_keep_the_rest_of_the_reply() {
        let raw_text = r#"{"predictedPrice": 2600, "confidence": 80, "priceRange": "2400-2800",
            "keyFactors": ["ETF", 3], "riskLevel": "low", "recommendation": "Buy"}"#;

        let forecast = resolve_forecast(raw_text, Some(2340.5), &mut rng());

        assert!(!is_fallback(&forecast));
        assert_eq!(forecast.predicted_price, 2600.0);
        assert_eq!(forecast.confidence, 80);
        assert_eq!((forecast.price_range.low, forecast.price_range.high), (0.0, 0.0));
        assert_eq!(forecast.key_factors, vec!["ETF".to_string()]);
        assert_eq!(forecast.risk_level, RiskLevel::Low);
        assert_eq!(forecast.recommendation, "Buy");
    }

    #[test]
    fn test_risk_level_must_match_exactly() {
        assert_eq!(decode(r#"{"riskLevel": "low"}"#).risk_level, RiskLevel::Low);
        assert_eq!(decode(r#"{"riskLevel": "LOW"}"#).risk_level, RiskLevel::Medium);
        assert_eq!(decode(r#"{"riskLevel": "extreme"}"#).risk_level, RiskLevel::Medium);
        assert_eq!(decode(r#"{"riskLevel": 3}"#).risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_recommendation_default() {
        assert_eq!(decode(r#"{"recommendation": "   "}"#).recommendation, DEFAULT_RECOMMENDATION);
        assert_eq!(decode(r#"{"recommendation": null}"#).recommendation, DEFAULT_RECOMMENDATION);
        assert_eq!(decode(r#"{"recommendation": " Buy "}"#).recommendation, "Buy");
    }

    #[test]
    fn test_decode_failures() {
        assert_eq!(decode_forecast("no braces at all", None), Err(DecodeFailure::NoJsonObject));
        assert!(matches!(
            decode_forecast("{ not json }", None),
            Err(DecodeFailure::InvalidJson(_))
        ));
        assert!(matches!(
            decode_forecast(r#"{"a": 1} and then {"b": 2}"#, None),
            Err(DecodeFailure::InvalidJson(_))
        ));
    }

    #[test]
    fn test_trailing_commas_are_tolerated() {
        let forecast = decode(r#"{"confidence": 80, "keyFactors": ["a",],}"#);
        assert_eq!(forecast.confidence, 80);
        assert_eq!(forecast.key_factors, vec!["a".to_string()]);
    }

    #[test]
    fn test_resolve_without_json_uses_fallback() {
        for raw_text in ["", "I cannot help with that.", "{ broken", "} backwards {"] {
            let forecast = resolve_forecast(raw_text, Some(10.0), &mut rng());
            assert!(is_fallback(&forecast), "expected fallback for {raw_text:?}");
        }
    }

    #[test]
    fn test_fallback_anchors_on_base_price() {
        let forecast = fallback_forecast(Some(2340.50), &mut rng());
        assert!(forecast.predicted_price >= 2340.50 * 0.9);
        assert!(forecast.predicted_price < 2340.50 * 1.1);
        assert!((forecast.price_range.low - 1989.425).abs() < 1e-9);
        assert!((forecast.price_range.high - 2691.575).abs() < 1e-9);
        assert!(is_fallback(&forecast));
    }

    #[test]
    fn test_fallback_without_price_uses_base_100() {
        let forecast = fallback_forecast(None, &mut rng());
        assert!((forecast.price_range.low - 85.0).abs() < 1e-9);
        assert!((forecast.price_range.high - 115.0).abs() < 1e-9);
        assert!((90.0..110.0).contains(&forecast.predicted_price));
    }

    #[test]
    fn test_fallback_is_reproducible_with_seed() {
        let first = fallback_forecast(Some(1.85), &mut StdRng::seed_from_u64(9));
        let second = fallback_forecast(Some(1.85), &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }
}
