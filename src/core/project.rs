//! Project records as delivered by the SANbase API

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// A signal raised for a project. Only the first one is ever shown.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Signal {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// One row of the projects table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRow {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ticker: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coinmarketcap_id: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub percent_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub volume_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub volume_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub marketcap_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number_or_zero")]
    pub eth_spent: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub average_dev_activity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub average_daily_active_addresses: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signals: Vec<Signal>,
}

impl ProjectRow {
    /// Whether the row refers to `slug`, either by its coinmarketcap id or its ticker.
    pub fn is_identified_by(&self, slug: &str) -> bool {
        self.coinmarketcap_id.eq_ignore_ascii_case(slug) || self.ticker.eq_ignore_ascii_case(slug)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Decimal fields arrive either as JSON numbers or as numeric strings.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(RawNumber::Number(value)) => Some(value),
        Some(RawNumber::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                match trimmed.parse::<f64>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(value = %text, "Dropping non-numeric value");
                        None
                    }
                }
            }
        }
    })
}

fn lenient_number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0.0))
}
