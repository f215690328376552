//! Cheap local checks run before any persistence round trip.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::errors::ServiceError;

/// Parse a path identifier such as the `:id` in `/stores/:id`.
pub fn parse_id(raw: &str) -> Result<i32, ServiceError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ServiceError::Validation("id must be numeric".into()))
}

/// Number or numeric string as a decimal; anything else is `None`.
pub fn decimal_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Whole number that fits an `i32` column.
pub fn integer_value(value: &Value) -> Option<i32> {
    decimal_value(value)
        .filter(|d| d.fract().is_zero())
        .and_then(|d| d.to_i32())
}

/// Foreign key from a request body: required, integral, positive.
pub fn reference_id(value: Option<&Value>) -> Option<i32> {
    value.and_then(integer_value).filter(|id| *id > 0)
}

/// Trimmed text; `None` when missing or blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Price check shared by create and update; rounds to cents.
pub fn price(value: &Value) -> Result<Decimal, ServiceError> {
    let p = decimal_value(value)
        .ok_or_else(|| ServiceError::Validation("price must be a number >= 0".into()))?;
    if p < Decimal::ZERO {
        return Err(ServiceError::Validation("price must be a number >= 0".into()));
    }
    let p = p.round_dp(2);
    models::product::validate_price(p)?;
    Ok(p)
}

pub fn stock(value: &Value) -> Result<i32, ServiceError> {
    match integer_value(value) {
        Some(s) if s >= 0 => Ok(s),
        _ => Err(ServiceError::Validation("stock must be an integer >= 0".into())),
    }
}
