use anyhow::{anyhow, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#",(\s*[\]}])"#).expect("valid trailing comma pattern"));

/// Greedy span from the first `{` to the last `}`, e.g. the JSON inside a
/// markdown code fence or after a chatty preamble.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn try_parse_json_with_trailing_comma_removal<T: DeserializeOwned>(
    json_string: &str,
) -> Result<T> {
    match serde_json::from_str(json_string) {
        Ok(parsed) => Ok(parsed),
        Err(original_error) => {
            let cleaned_json_string = fix_trailing_commas(json_string);
            serde_json::from_str(&cleaned_json_string).map_err(|e| {
                anyhow!(
                    "Failed to parse cleaned JSON: {}. Original error: {}",
                    e,
                    original_error,
                )
            })
        }
    }
}

// ",]" or ",}" with optional whitespace in between becomes "]" or "}"
fn fix_trailing_commas(json_str: &str) -> String {
    TRAILING_COMMA.replace_all(json_str, "$1").to_string()
}
