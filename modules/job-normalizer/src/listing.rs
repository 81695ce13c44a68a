use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::RowError;

/// One row from the scraper's dataset. Every field is optional; text fields
/// tolerate numbers and booleans, amounts tolerate numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_url_direct: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_posted: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub interval: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub min_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub max_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_industry: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_employees_label: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_logo: Option<String>,
}

impl RawListing {
    pub fn from_value(value: Value) -> Result<Self, RowError> {
        Ok(serde_json::from_value(value)?)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string, got {}",
            kind(&other)
        ))),
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("amount out of range: {n}"))),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid amount: {s:?}")))
        }
        Some(other) => Err(de::Error::custom(format!(
            "expected an amount, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
