//! Payload validation for IPO mutations.
//!
//! Raw JSON goes in; a normalized [`IpoDraft`] / [`IpoPatch`] or a list of
//! field-level errors comes out. Unknown fields are ignored. Each field has
//! an explicit coercion rule rather than duck-typed passthrough:
//!
//! | kind   | accepted input                 | normalized to            |
//! |--------|--------------------------------|--------------------------|
//! | text   | string, null                   | trimmed string or null   |
//! | price  | number, numeric string, null   | non-negative f64 or null |
//! | date   | `YYYY-MM-DD` string, null      | canonical date or null   |
//! | int    | integer, numeric string, null  | positive i32 or null     |
//! | status | enumeration name               | `IpoStatus`              |
//!
//! The sentinel strings `"TBA"`, `"Not Available"`, `"NA"`, `"N/A"` and the
//! empty string normalize to null, never to zero.

use serde_json::Value;

use super::types::FieldError;
use crate::models::{IpoDraft, IpoPatch, IpoStatus, IssueType};

const SENTINELS: [&str; 4] = ["tba", "not available", "na", "n/a"];

fn is_sentinel(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty() || SENTINELS.contains(&trimmed.to_lowercase().as_str())
}

fn coerce_text(field: &str, value: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            if is_sentinel(s) {
                None
            } else {
                Some(s.trim().to_string())
            }
        }
        _ => {
            errors.push(FieldError::new(field, "must be a string or null"));
            None
        }
    }
}

fn coerce_price(field: &str, value: &Value, errors: &mut Vec<FieldError>) -> Option<f64> {
    let number = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            if is_sentinel(s) {
                return None;
            }
            s.trim().parse::<f64>().ok()
        }
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n >= 0.0 => Some(n),
        Some(_) => {
            errors.push(FieldError::new(field, "must be a non-negative number"));
            None
        }
        None => {
            errors.push(FieldError::new(field, "must be a number or null"));
            None
        }
    }
}

fn coerce_date(field: &str, value: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            if is_sentinel(s) {
                return None;
            }
            match chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
                Ok(date) => Some(date.format("%Y-%m-%d").to_string()),
                Err(_) => {
                    errors.push(FieldError::new(field, "must be a YYYY-MM-DD date or null"));
                    None
                }
            }
        }
        _ => {
            errors.push(FieldError::new(field, "must be a YYYY-MM-DD date or null"));
            None
        }
    }
}

fn coerce_lot_size(field: &str, value: &Value, errors: &mut Vec<FieldError>) -> Option<i32> {
    let number = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_i64(),
        Value::String(s) => {
            if is_sentinel(s) {
                return None;
            }
            s.trim().parse::<i64>().ok()
        }
        _ => None,
    };

    match number {
        Some(n) if n > 0 && n <= i64::from(i32::MAX) => Some(n as i32),
        _ => {
            errors.push(FieldError::new(field, "must be a positive integer or null"));
            None
        }
    }
}

fn coerce_status(field: &str, value: &Value, errors: &mut Vec<FieldError>) -> Option<IpoStatus> {
    match value {
        Value::String(s) => match s.parse::<IpoStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push(FieldError::new(
                    field,
                    "must be one of: upcoming, ongoing, listed, closed",
                ));
                None
            }
        },
        _ => {
            errors.push(FieldError::new(field, "must be a status string"));
            None
        }
    }
}

fn coerce_issue_type(
    field: &str,
    value: &Value,
    errors: &mut Vec<FieldError>,
) -> Option<IssueType> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            if is_sentinel(s) {
                return None;
            }
            match s.parse::<IssueType>() {
                Ok(issue_type) => Some(issue_type),
                Err(_) => {
                    errors.push(FieldError::new(
                        field,
                        "must be one of: book-building, fixed-price",
                    ));
                    None
                }
            }
        }
        _ => {
            errors.push(FieldError::new(field, "must be an issue type or null"));
            None
        }
    }
}

fn as_object<'a>(
    payload: &'a Value,
) -> Result<&'a serde_json::Map<String, Value>, Vec<FieldError>> {
    payload
        .as_object()
        .ok_or_else(|| vec![FieldError::new("payload", "must be a JSON object")])
}

/// Validates a create payload. `company_name` is the only mandatory field;
/// `status` defaults to `upcoming` when absent.
pub fn validate_create(payload: &Value) -> Result<IpoDraft, Vec<FieldError>> {
    let obj = as_object(payload)?;
    let mut errors = Vec::new();

    let company_name = match obj.get("company_name") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => {
            errors.push(FieldError::new(
                "company_name",
                "Company name is required",
            ));
            String::new()
        }
    };

    let status = match obj.get("status") {
        None | Some(Value::Null) => IpoStatus::Upcoming,
        Some(value) => coerce_status("status", value, &mut errors).unwrap_or_default(),
    };

    let mut draft = IpoDraft {
        company_name,
        status,
        ..Default::default()
    };

    if let Some(value) = obj.get("sector") {
        draft.sector = coerce_text("sector", value, &mut errors);
    }
    if let Some(value) = obj.get("logo_url") {
        draft.logo_url = coerce_text("logo_url", value, &mut errors);
    }
    if let Some(value) = obj.get("logo_initials") {
        draft.logo_initials = coerce_text("logo_initials", value, &mut errors);
    }
    if let Some(value) = obj.get("logo_color") {
        draft.logo_color = coerce_text("logo_color", value, &mut errors);
    }
    if let Some(value) = obj.get("price_band") {
        draft.price_band = coerce_text("price_band", value, &mut errors);
    }
    if let Some(value) = obj.get("min_price") {
        draft.min_price = coerce_price("min_price", value, &mut errors);
    }
    if let Some(value) = obj.get("max_price") {
        draft.max_price = coerce_price("max_price", value, &mut errors);
    }
    if let Some(value) = obj.get("lot_size") {
        draft.lot_size = coerce_lot_size("lot_size", value, &mut errors);
    }
    if let Some(value) = obj.get("issue_size") {
        draft.issue_size = coerce_text("issue_size", value, &mut errors);
    }
    if let Some(value) = obj.get("issue_type") {
        draft.issue_type = coerce_issue_type("issue_type", value, &mut errors);
    }
    if let Some(value) = obj.get("open_date") {
        draft.open_date = coerce_date("open_date", value, &mut errors);
    }
    if let Some(value) = obj.get("close_date") {
        draft.close_date = coerce_date("close_date", value, &mut errors);
    }
    if let Some(value) = obj.get("listing_date") {
        draft.listing_date = coerce_date("listing_date", value, &mut errors);
    }
    if let Some(value) = obj.get("description") {
        draft.description = coerce_text("description", value, &mut errors);
    }
    if let Some(value) = obj.get("ipo_price") {
        draft.ipo_price = coerce_price("ipo_price", value, &mut errors);
    }
    if let Some(value) = obj.get("listing_price") {
        draft.listing_price = coerce_price("listing_price", value, &mut errors);
    }
    if let Some(value) = obj.get("listing_gain") {
        draft.listing_gain = coerce_text("listing_gain", value, &mut errors);
    }
    if let Some(value) = obj.get("current_price") {
        draft.current_price = coerce_price("current_price", value, &mut errors);
    }
    if let Some(value) = obj.get("current_return") {
        draft.current_return = coerce_text("current_return", value, &mut errors);
    }
    if let Some(value) = obj.get("rhp_link") {
        draft.rhp_link = coerce_text("rhp_link", value, &mut errors);
    }
    if let Some(value) = obj.get("drhp_link") {
        draft.drhp_link = coerce_text("drhp_link", value, &mut errors);
    }

    if errors.is_empty() { Ok(draft) } else { Err(errors) }
}

/// Validates a partial-update payload. Any subset of fields is accepted;
/// absent fields stay untouched, explicit nulls clear nullable fields.
pub fn validate_update(payload: &Value) -> Result<IpoPatch, Vec<FieldError>> {
    let obj = as_object(payload)?;
    let mut errors = Vec::new();
    let mut patch = IpoPatch::default();

    if let Some(value) = obj.get("company_name") {
        match value {
            Value::String(s) if !s.trim().is_empty() => {
                patch.company_name = Some(s.trim().to_string());
            }
            _ => errors.push(FieldError::new(
                "company_name",
                "Company name must be a non-empty string",
            )),
        }
    }

    if let Some(value) = obj.get("status") {
        patch.status = coerce_status("status", value, &mut errors);
    }

    if let Some(value) = obj.get("sector") {
        patch.sector = Some(coerce_text("sector", value, &mut errors));
    }
    if let Some(value) = obj.get("logo_url") {
        patch.logo_url = Some(coerce_text("logo_url", value, &mut errors));
    }
    if let Some(value) = obj.get("logo_initials") {
        patch.logo_initials = Some(coerce_text("logo_initials", value, &mut errors));
    }
    if let Some(value) = obj.get("logo_color") {
        patch.logo_color = Some(coerce_text("logo_color", value, &mut errors));
    }
    if let Some(value) = obj.get("price_band") {
        patch.price_band = Some(coerce_text("price_band", value, &mut errors));
    }
    if let Some(value) = obj.get("min_price") {
        patch.min_price = Some(coerce_price("min_price", value, &mut errors));
    }
    if let Some(value) = obj.get("max_price") {
        patch.max_price = Some(coerce_price("max_price", value, &mut errors));
    }
    if let Some(value) = obj.get("lot_size") {
        patch.lot_size = Some(coerce_lot_size("lot_size", value, &mut errors));
    }
    if let Some(value) = obj.get("issue_size") {
        patch.issue_size = Some(coerce_text("issue_size", value, &mut errors));
    }
    if let Some(value) = obj.get("issue_type") {
        patch.issue_type = Some(coerce_issue_type("issue_type", value, &mut errors));
    }
    if let Some(value) = obj.get("open_date") {
        patch.open_date = Some(coerce_date("open_date", value, &mut errors));
    }
    if let Some(value) = obj.get("close_date") {
        patch.close_date = Some(coerce_date("close_date", value, &mut errors));
    }
    if let Some(value) = obj.get("listing_date") {
        patch.listing_date = Some(coerce_date("listing_date", value, &mut errors));
    }
    if let Some(value) = obj.get("description") {
        patch.description = Some(coerce_text("description", value, &mut errors));
    }
    if let Some(value) = obj.get("ipo_price") {
        patch.ipo_price = Some(coerce_price("ipo_price", value, &mut errors));
    }
    if let Some(value) = obj.get("listing_price") {
        patch.listing_price = Some(coerce_price("listing_price", value, &mut errors));
    }
    if let Some(value) = obj.get("listing_gain") {
        patch.listing_gain = Some(coerce_text("listing_gain", value, &mut errors));
    }
    if let Some(value) = obj.get("current_price") {
        patch.current_price = Some(coerce_price("current_price", value, &mut errors));
    }
    if let Some(value) = obj.get("current_return") {
        patch.current_return = Some(coerce_text("current_return", value, &mut errors));
    }
    if let Some(value) = obj.get("rhp_link") {
        patch.rhp_link = Some(coerce_text("rhp_link", value, &mut errors));
    }
    if let Some(value) = obj.get("drhp_link") {
        patch.drhp_link = Some(coerce_text("drhp_link", value, &mut errors));
    }

    if errors.is_empty() { Ok(patch) } else { Err(errors) }
}
