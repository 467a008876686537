//! World Bank v2 API request construction and response envelope
//!
//! The API wraps results in a two-element JSON array: paging metadata at
//! index 0, the observation list at index 1. Error responses come back as
//! a one-element array carrying a message object; that shape fails the
//! tuple deserialization and is reported as a malformed payload upstream.

use serde::Deserialize;

/// Paging metadata at index 0 of the envelope
#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub total: u64,
}

/// Nested `{id, value}` pair used for both country and indicator
#[derive(Debug, Deserialize)]
pub struct RefField {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// One raw (country, year) observation
#[derive(Debug, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub indicator: Option<RefField>,
    #[serde(default)]
    pub country: Option<RefField>,
    #[serde(default)]
    pub countryiso3code: Option<String>,
    /// Year as a string
    #[serde(default)]
    pub date: Option<String>,
    /// Numeric, numeric string, or null
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// Deserialized envelope: paging info plus the observation list.
///
/// The list itself may be null (no data for the query) and individual
/// entries may be null; both survive deserialization as `None`.
pub type Envelope = (PageInfo, Option<Vec<Option<Observation>>>);

/// Build the request URL for one indicator
pub fn indicator_url(base_url: &str, code: &str, per_page: u32) -> String {
    format!(
        "{}/country/all/indicator/{}?format=json&per_page={}",
        base_url.trim_end_matches('/'),
        code,
        per_page
    )
}

/// Parse the two-element envelope from a response body
pub fn parse_envelope(body: &str) -> Result<Envelope, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ENVELOPE: &str = r#"[
        {"page": 1, "pages": 1, "per_page": 20000, "total": 2},
        [
            {
                "indicator": {"id": "SP.DYN.LE00.IN", "value": "Life expectancy at birth"},
                "country": {"id": "KE", "value": "Kenya"},
                "countryiso3code": "KEN",
                "date": "2015",
                "value": 61.2,
                "unit": "",
                "obs_status": "",
                "decimal": 0
            },
            {
                "indicator": {"id": "SP.DYN.LE00.IN", "value": "Life expectancy at birth"},
                "country": {"id": "KE", "value": "Kenya"},
                "countryiso3code": "KEN",
                "date": "2014",
                "value": null
            }
        ]
    ]"#;

    #[test]
    fn parse_sample_envelope() {
        let (info, observations) = parse_envelope(SAMPLE_ENVELOPE).unwrap();
        assert_eq!(info.page, 1);
        assert_eq!(info.pages, 1);
        assert_eq!(info.total, 2);

        let observations = observations.unwrap();
        assert_eq!(observations.len(), 2);

        let first = observations[0].as_ref().unwrap();
        assert_eq!(first.countryiso3code.as_deref(), Some("KEN"));
        assert_eq!(first.date.as_deref(), Some("2015"));
        assert_eq!(
            first.indicator.as_ref().unwrap().id.as_deref(),
            Some("SP.DYN.LE00.IN")
        );

        let second = observations[1].as_ref().unwrap();
        assert!(second.value.is_none());
    }

    #[test]
    fn error_payload_fails_envelope_shape() {
        // Invalid indicator codes return a one-element array
        let body = r#"[{"message": [{"id": "120", "key": "Invalid value", "value": "..."}]}]"#;
        assert!(parse_envelope(body).is_err());
    }

    #[test]
    fn null_observation_list() {
        let body = r#"[{"page": 1, "pages": 0, "total": 0}, null]"#;
        let (info, observations) = parse_envelope(body).unwrap();
        assert_eq!(info.total, 0);
        assert!(observations.is_none());
    }

    #[test]
    fn null_entries_survive_in_list() {
        let body = r#"[{"page": 1, "pages": 1, "total": 1}, [null]]"#;
        let (_, observations) = parse_envelope(body).unwrap();
        let observations = observations.unwrap();
        assert_eq!(observations.len(), 1);
        assert!(observations[0].is_none());
    }

    #[test]
    fn observation_with_missing_fields() {
        let body = r#"[{"page": 1, "pages": 1, "total": 1}, [{"date": "2010"}]]"#;
        let (_, observations) = parse_envelope(body).unwrap();
        let obs = observations.unwrap();
        let obs = obs[0].as_ref().unwrap();
        assert!(obs.indicator.is_none());
        assert!(obs.country.is_none());
        assert!(obs.countryiso3code.is_none());
        assert_eq!(obs.date.as_deref(), Some("2010"));
    }

    #[test]
    fn non_array_body_fails() {
        assert!(parse_envelope("{}").is_err());
        assert!(parse_envelope("not json").is_err());
    }

    #[test]
    fn url_construction() {
        assert_eq!(
            indicator_url("https://api.worldbank.org/v2", "SP.DYN.LE00.IN", 20_000),
            "https://api.worldbank.org/v2/country/all/indicator/SP.DYN.LE00.IN?format=json&per_page=20000"
        );
    }

    #[test]
    fn url_construction_trailing_slash() {
        assert_eq!(
            indicator_url("https://api.worldbank.org/v2/", "NY.GDP.PCAP.CD", 50),
            "https://api.worldbank.org/v2/country/all/indicator/NY.GDP.PCAP.CD?format=json&per_page=50"
        );
    }
}
