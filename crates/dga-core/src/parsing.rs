use crate::error::DgaError;
use crate::model::{Gas, GasReading};
use rust_decimal::Decimal;
use serde::Deserialize;

/// A gas reading as it arrives from the outside: every field optional so
/// missing keys can be reported as input errors instead of serde failures.
///
/// Values are decimal strings (`"180"`, `"0.5"`), matching the serde-str
/// convention used everywhere in this crate. Keys are accepted in either
/// case (`H2` or `h2`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReading {
    #[serde(default, alias = "H2")]
    pub h2: Option<Decimal>,
    #[serde(default, alias = "CH4")]
    pub ch4: Option<Decimal>,
    #[serde(default, alias = "C2H2")]
    pub c2h2: Option<Decimal>,
    #[serde(default, alias = "C2H4")]
    pub c2h4: Option<Decimal>,
    #[serde(default, alias = "C2H6")]
    pub c2h6: Option<Decimal>,
}

impl RawReading {
    fn get(&self, gas: Gas) -> Option<Decimal> {
        match gas {
            Gas::H2 => self.h2,
            Gas::CH4 => self.ch4,
            Gas::C2H2 => self.c2h2,
            Gas::C2H4 => self.c2h4,
            Gas::C2H6 => self.c2h6,
        }
    }
}

/// Turn a raw reading into a validated [`GasReading`].
///
/// Collects every problem (missing field, negative value) into a single
/// `InvalidReading` so the user sees all rejected fields at once.
pub fn reading_from_raw(raw: &RawReading) -> Result<GasReading, DgaError> {
    let missing: Vec<String> = Gas::ALL
        .iter()
        .filter(|&&gas| raw.get(gas).is_none())
        .map(|&gas| format!("{} is missing", gas))
        .collect();

    if !missing.is_empty() {
        return Err(DgaError::InvalidReading(missing.join("; ")));
    }

    GasReading::new(
        raw.h2.unwrap_or_default(),
        raw.ch4.unwrap_or_default(),
        raw.c2h2.unwrap_or_default(),
        raw.c2h4.unwrap_or_default(),
        raw.c2h6.unwrap_or_default(),
    )
}

/// Parse a single reading from a JSON object string.
pub fn parse_reading(json: &str) -> Result<GasReading, DgaError> {
    let raw: RawReading = serde_json::from_str(json)?;
    reading_from_raw(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_complete_reading() {
        let json = r#"{ "H2": "180", "CH4": "90", "C2H2": "2", "C2H4": "40", "C2H6": "50" }"#;
        let r = parse_reading(json).unwrap();
        assert_eq!(r.h2, dec!(180));
        assert_eq!(r.c2h6, dec!(50));
    }

    #[test]
    fn test_lowercase_keys_accepted() {
        let json = r#"{ "h2": "20", "ch4": "20", "c2h2": "1", "c2h4": "10", "c2h6": "10" }"#;
        let r = parse_reading(json).unwrap();
        assert_eq!(r.ch4, dec!(20));
    }

    #[test]
    fn test_missing_field_is_invalid_reading() {
        let json = r#"{ "H2": "180", "CH4": "90", "C2H2": "2", "C2H4": "40" }"#;
        let err = parse_reading(json).unwrap_err();
        match err {
            DgaError::InvalidReading(msg) => assert!(msg.contains("C2H6")),
            other => panic!("expected InvalidReading, got {other:?}"),
        }
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let err = parse_reading("{}").unwrap_err();
        let msg = err.to_string();
        for gas in Gas::ALL {
            assert!(msg.contains(&gas.to_string()), "missing {gas} in '{msg}'");
        }
    }

    #[test]
    fn test_negative_value_is_invalid_reading() {
        let json = r#"{ "H2": "-5", "CH4": "90", "C2H2": "2", "C2H4": "40", "C2H6": "50" }"#;
        let err = parse_reading(json).unwrap_err();
        match err {
            DgaError::InvalidReading(msg) => assert!(msg.contains("H2")),
            other => panic!("expected InvalidReading, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        assert!(matches!(
            parse_reading("not json"),
            Err(DgaError::Json(_))
        ));
    }
}
