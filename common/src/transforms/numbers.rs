/// Formats a price for display, with more decimals for sub-dollar tokens and
/// `K`/`M` suffixes for large ones.
pub fn format_price(price: f64) -> String {
    if price < 0.01 {
        format!("${price:.6}")
    } else if price < 1.0 {
        format!("${price:.4}")
    } else if price < 1_000.0 {
        format!("${price:.2}")
    } else if price < 1_000_000.0 {
        format!("${:.1}K", price / 1_000.0)
    } else {
        format!("${:.1}M", price / 1_000_000.0)
    }
}

/// Signed percentage with two decimals, e.g. `+5.20%`.
pub fn format_percentage(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.2}%")
}

pub fn format_number(num: f64) -> String {
    if num < 1_000.0 {
        num.to_string()
    } else if num < 1_000_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else if num < 1_000_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else {
        format!("{:.1}B", num / 1_000_000_000.0)
    }
}
