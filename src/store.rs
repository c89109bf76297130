use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::{Mutex, MutexGuard};

use crate::error::ApiError;

/// A rental property offered for search.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub id: u32,
    pub city: String,
    pub price: u32,
    pub wifi: bool,
    pub guests: u32,
}

impl Listing {
    fn new(id: u32, city: &str, price: u32, wifi: bool, guests: u32) -> Self {
        Self {
            id,
            city: city.to_string(),
            price,
            wifi,
            guests,
        }
    }
}

pub fn seed_listings() -> Vec<Listing> {
    vec![
        Listing::new(1, "Mumbai", 50, true, 2),
        Listing::new(2, "Pune", 70, false, 3),
        Listing::new(3, "Delhi", 40, true, 2),
    ]
}

/// Search criteria. Empty strings and zero values do not filter.
#[derive(Debug, Default, Clone)]
pub struct SearchFilter<'a> {
    pub city: Option<&'a str>,
    pub guests: Option<i64>,
    pub budget: Option<i64>,
}

pub fn search(listings: &[Listing], filter: &SearchFilter<'_>) -> Vec<Listing> {
    let city = filter.city.filter(|c| !c.is_empty()).map(str::to_lowercase);
    let budget = filter.budget.filter(|b| *b != 0);
    let guests = filter.guests.filter(|g| *g != 0);

    listings
        .iter()
        .filter(|l| city.as_ref().map_or(true, |c| l.city.to_lowercase() == *c))
        .filter(|l| budget.map_or(true, |b| i64::from(l.price) <= b))
        .filter(|l| guests.map_or(true, |g| i64::from(l.guests) >= g))
        .cloned()
        .collect()
}

pub fn search_summary(count: usize, city: Option<&str>) -> String {
    match city.filter(|c| !c.is_empty()) {
        Some(city) => format!("Found {} stays in {}.", count, city),
        None => format!("Found {} stays.", count),
    }
}

/// Append-only, process-local booking log.
#[derive(Debug, Default)]
pub struct BookingLog {
    entries: Mutex<Vec<Value>>,
}

impl BookingLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, Vec<Value>>, ApiError> {
        self.entries
            .lock()
            .map_err(|e| ApiError::Internal(format!("booking log lock poisoned: {}", e)))
    }

    /// Stores `fields` under the next sequential id and returns the stored record.
    /// A caller-supplied `id` is kept as sent. Id assignment and append happen under one lock.
    pub fn create(&self, mut fields: Map<String, Value>) -> Result<Value, ApiError> {
        let mut entries = self.entries()?;

        let id = entries.len() as u64 + 1;
        fields.entry("id").or_insert_with(|| Value::from(id));
        let booking = Value::Object(fields);
        entries.push(booking.clone());

        Ok(booking)
    }

    pub fn len(&self) -> Result<usize, ApiError> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ApiError> {
        Ok(self.entries()?.is_empty())
    }
}
