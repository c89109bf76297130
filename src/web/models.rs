use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::store::{Listing, SearchFilter};

/// Shared request shape for search and structured chat. Every field is optional.
#[derive(Debug, Deserialize)]
pub struct Query {
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub guests: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub budget: Option<i64>,
    pub message: Option<String>,
}

impl Query {
    pub fn filter(&self) -> SearchFilter<'_> {
        SearchFilter {
            city: self.city.as_deref(),
            guests: self.guests,
            budget: self.budget,
        }
    }
}

// Form-driven clients send "3" or 45.0 for whole numbers.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(n)) => Ok(Some(n)),
        Some(Raw::Float(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
        Some(Raw::Float(f)) => Err(de::Error::custom(format!(
            "expected a whole number, got {}",
            f
        ))),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a whole number, got {:?}", s))),
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Listing>,
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub msg: String,
    pub booking: Value,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct ModelsCount {
    pub models_count: usize,
}

#[derive(Debug, Serialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "system")]
    System,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}
