//! Sale submission validation and normalization.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::{display_value, is_truthy};
use crate::error::{CoreError, CoreResult};

const DEFAULT_AVAILABILITY: &str = "No";

/// A sale as submitted by the admin UI.
///
/// Every field is kept as raw JSON because clients send numbers and strings
/// interchangeably.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaleRequest {
    #[serde(default)]
    pub sku: Value,
    #[serde(default)]
    pub employee: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub notes: Value,
    #[serde(default)]
    pub availability: Value,
    #[serde(default)]
    pub timestamp: Value,
}

/// The normalized sale forwarded to the spreadsheet write endpoint.
///
/// Several fields are duplicated under the column names the sheet script
/// has used over time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    pub token: String,
    pub sku: String,
    pub employee: String,
    pub sold_by: String,
    pub price: Number,
    pub sold_price: Number,
    pub notes: String,
    pub availability: String,
    pub status: String,
    pub timestamp: String,
    pub sold_date: String,
}

impl SaleRequest {
    /// Parses a request body, treating anything unparseable as an empty sale.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::warn!("Invalid JSON in sale submission: {e}");
            Self::default()
        })
    }

    /// Validates the request and builds the upstream payload.
    pub fn normalize(&self, submit_token: Option<&str>, now: DateTime<Utc>) -> CoreResult<SalePayload> {
        if !is_truthy(&self.sku) || !is_truthy(&self.employee) || self.price.is_null() {
            return Err(CoreError::MissingSaleFields);
        }

        let price = coerce_price(&self.price)?;
        let sku = display_value(&self.sku).trim().to_string();
        let employee = display_value(&self.employee).trim().to_string();
        let notes = self.notes.as_str().unwrap_or_default().to_string();
        let timestamp = if is_truthy(&self.timestamp) {
            display_value(&self.timestamp).trim().to_string()
        } else {
            now.to_rfc3339_opts(SecondsFormat::Millis, true)
        };
        let availability = if is_truthy(&self.availability) {
            display_value(&self.availability).trim().to_string()
        } else {
            DEFAULT_AVAILABILITY.to_string()
        };

        Ok(SalePayload {
            token: submit_token.unwrap_or_default().to_string(),
            sold_by: employee.clone(),
            employee,
            sku,
            sold_price: price.clone(),
            price,
            notes,
            status: availability.clone(),
            availability,
            sold_date: timestamp.clone(),
            timestamp,
        })
    }
}

/// Reads a price the way a loosely-typed client means it.
///
/// Strings are trimmed (blank means zero), booleans count as 1/0. Whole
/// values are emitted as integers so the sheet does not see `12.0`.
fn coerce_price(value: &Value) -> CoreResult<Number> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
    .filter(|p| p.is_finite())
    .ok_or(CoreError::InvalidPrice)?;

    if price.fract() == 0.0 && price.abs() < 9_007_199_254_740_992.0 {
        Ok(Number::from(price as i64))
    } else {
        Number::from_f64(price).ok_or(CoreError::InvalidPrice)
    }
}
