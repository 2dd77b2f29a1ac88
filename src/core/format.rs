//! Display formatting for prices, volumes and market caps

/// Placeholder shown when a price-like value is missing.
pub const NO_DATA: &str = "No data";

const MAGNITUDE_SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

fn currency_symbol(currency: &str) -> String {
    match currency.to_uppercase().as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "ETH" => "Ξ".to_string(),
        "BTC" => "₿".to_string(),
        other => format!("{other} "),
    }
}

/// Inserts `,` separators into the integral part of an unsigned decimal string.
fn group_thousands(digits: &str) -> String {
    let (integral, fraction) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(integral.len() + integral.len() / 3);
    for (i, c) in integral.chars().enumerate() {
        if i > 0 && (integral.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) if !f.is_empty() => format!("{grouped}.{f}"),
        _ => grouped,
    }
}

fn trim_fraction(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

fn sign(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "" }
}

/// Formats `value` as money in `currency`, e.g. `$1,234.50`.
///
/// Returns [`NO_DATA`] when the value is missing.
pub fn format_currency(value: Option<f64>, currency: &str) -> String {
    match value {
        None => NO_DATA.to_string(),
        Some(v) if !v.is_finite() => NO_DATA.to_string(),
        Some(v) => {
            let amount = format!("{:.2}", v.abs());
            // -0.00 is not a thing
            let sign = if amount.trim_start_matches(['0', '.']).is_empty() {
                ""
            } else {
                sign(v)
            };
            format!("{sign}{}{}", currency_symbol(currency), group_thousands(&amount))
        }
    }
}

/// Formats a plain number with thousands grouping and at most three fraction digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let digits = trim_fraction(format!("{:.3}", value.abs()));
    if digits == "0" {
        return digits;
    }
    format!("{}{}", sign(value), group_thousands(&digits))
}

/// Shortens large numbers to a suffixed form, e.g. `1234567` becomes `1.23M`.
///
/// The mantissa is rounded to `precision` fraction digits with trailing zeros
/// removed. A mantissa that rounds up to 1000 moves to the next suffix, so a
/// larger magnitude never yields a smaller suffix.
pub fn abbreviate_magnitude(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let magnitude = value.abs();
    let mut tier = if magnitude < 1.0 {
        0
    } else {
        ((magnitude.log10() / 3.0).floor() as usize).min(MAGNITUDE_SUFFIXES.len() - 1)
    };

    let round = |mantissa: f64| {
        let factor = 10f64.powi(precision as i32);
        (mantissa * factor).round() / factor
    };

    let mut mantissa = round(magnitude / 1000f64.powi(tier as i32));
    if mantissa >= 1000.0 && tier < MAGNITUDE_SUFFIXES.len() - 1 {
        tier += 1;
        mantissa = round(magnitude / 1000f64.powi(tier as i32));
    }

    let digits = trim_fraction(format!("{mantissa:.precision$}"));
    let sign = if digits == "0" { "" } else { sign(value) };
    format!("{sign}{digits}{}", MAGNITUDE_SUFFIXES[tier])
}

pub fn format_market_cap(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}", abbreviate_magnitude(v, 2)),
        None => NO_DATA.to_string(),
    }
}

/// Formats a 24h change, e.g. `+1.25%`.
pub fn format_percent_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{change:.2}%")
    } else {
        format!("{change:.2}%")
    }
}
