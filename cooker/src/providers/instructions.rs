use crate::predictions::prediction_types::PredictionType;

pub const FORECAST_PERSONA: &str = "You are an expert cryptocurrency and tokenized asset analyst. Provide detailed, data-driven forecasts based on market data and trends.";

pub const INSIGHT_PERSONA: &str =
    "You are a creator economy expert specializing in tokenomics and community growth.";

pub const FORECAST_SCHEMA_INSTRUCTION: &str = r#"Format your response as JSON with these exact keys:
{
  "predictedPrice": number,
  "confidence": number,
  "priceRange": {"low": number, "high": number},
  "keyFactors": ["factor1", "factor2", "factor3"],
  "riskLevel": "low|medium|high",
  "recommendation": "string"
}"#;

pub fn get_system_instruction(prediction_type: &PredictionType) -> &'static str {
    match prediction_type {
        PredictionType::Forecast => FORECAST_PERSONA,
        PredictionType::CreatorInsights => INSIGHT_PERSONA,
    }
}
