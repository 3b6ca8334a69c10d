pub const MAX_INSIGHTS: usize = 5;

pub const DEFAULT_INSIGHTS: [&str; 4] = [
    "Increase community engagement through regular updates",
    "Consider token utility improvements",
    "Expand social media presence",
    "Implement holder rewards program",
];

/// First five non-blank lines of the completion, trimmed. Text without any
/// such line (including a failed call) yields the default insights.
pub fn resolve_insights(raw_text: &str) -> Vec<String> {
    let insights: Vec<String> = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_INSIGHTS)
        .map(str::to_string)
        .collect();

    if insights.is_empty() {
        default_insights()
    } else {
        insights
    }
}

pub fn default_insights() -> Vec<String> {
    DEFAULT_INSIGHTS.iter().map(|insight| insight.to_string()).collect()
}
