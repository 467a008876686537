//! Observation flattening: nested JSON → tidy rows

use serde_json::Value;

use crate::api::Observation;

/// One normalized (country, year) row
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub country_iso3: String,
    pub country_name: String,
    pub year: i32,
    pub value: Option<f64>,
    pub indicator_code: Option<String>,
    pub indicator_name: Option<String>,
}

impl IndicatorRow {
    /// CSV header, with the value column named per indicator
    pub fn header(value_column: &str) -> [String; 6] {
        [
            "country_iso3".to_string(),
            "country_name".to_string(),
            "year".to_string(),
            value_column.to_string(),
            "indicator_code".to_string(),
            "indicator_name".to_string(),
        ]
    }

    /// CSV record in header order; missing values render as empty fields
    pub fn to_record(&self) -> [String; 6] {
        [
            self.country_iso3.clone(),
            self.country_name.clone(),
            self.year.to_string(),
            self.value.map(|v| v.to_string()).unwrap_or_default(),
            self.indicator_code.clone().unwrap_or_default(),
            self.indicator_name.clone().unwrap_or_default(),
        ]
    }
}

/// Flatten the raw observation list into rows, preserving source order.
///
/// Null list entries and observations without a parseable year are
/// skipped; rows missing the country code or name are dropped; the value
/// is coerced to f64, with missing or non-numeric values kept as `None`
/// rather than dropping the row.
pub fn flatten(observations: Vec<Option<Observation>>) -> Vec<IndicatorRow> {
    let mut rows = Vec::with_capacity(observations.len());

    for obs in observations.into_iter().flatten() {
        let Some(year) = obs.date.as_deref().and_then(|d| d.trim().parse::<i32>().ok()) else {
            continue;
        };
        let country_name = obs.country.as_ref().and_then(|c| c.value.clone());
        let (Some(country_iso3), Some(country_name)) = (obs.countryiso3code, country_name) else {
            continue;
        };
        let (indicator_code, indicator_name) = match obs.indicator {
            Some(field) => (field.id, field.value),
            None => (None, None),
        };

        rows.push(IndicatorRow {
            country_iso3,
            country_name,
            year,
            value: obs.value.as_ref().and_then(coerce_value),
            indicator_code,
            indicator_name,
        });
    }

    rows
}

/// Coerce a loosely typed API value to f64.
///
/// Numbers pass through, numeric strings are parsed, anything else is
/// `None`.
pub fn coerce_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
