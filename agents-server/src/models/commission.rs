//! Commission values and their exact JSON number representation
//!
//! Commissions are stored as `DECIMAL(10,2)`. They are carried as
//! [`Decimal`] from the request body to the store and back, so nothing is
//! computed in binary floating point. The only float conversion happens at
//! serialization time, where the decimal text is parsed to the nearest `f64`.
//! For values with at most 15 significant digits that `f64` prints back as
//! the same decimal text.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{ser::Error as _, Serializer};
use serde_json::{Map, Value};

use super::ValidationError;

/// Largest magnitude a `DECIMAL(10,2)` column holds
pub const MAX_COMMISSION: Decimal = Decimal::from_parts(0x540B_E3FF, 2, 0, false, 2); // 99999999.99

/// A validated commission amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Commission(Decimal);

impl Commission {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parse a commission from a raw JSON value.
    ///
    /// Accepts JSON numbers and strings holding a decimal number (plain or
    /// scientific notation). Anything else is [`ValidationError::NotNumeric`].
    /// Amounts beyond [`MAX_COMMISSION`] in either direction are
    /// [`ValidationError::OutOfRange`].
    ///
    /// # Example
    /// ```
    /// use agents_server::models::Commission;
    /// use serde_json::json;
    ///
    /// let c = Commission::from_json("commission", &json!(0.15)).unwrap();
    /// assert_eq!(c.as_decimal().to_string(), "0.15");
    /// assert!(Commission::from_json("commission", &json!("abc")).is_err());
    /// ```
    pub fn from_json(field: &'static str, value: &Value) -> Result<Self, ValidationError> {
        let parsed = match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Decimal::from(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Decimal::from(u))
                } else {
                    // serde_json prints floats in shortest round-trip form
                    parse_decimal(&n.to_string())
                }
            }
            Value::String(s) => parse_decimal(s.trim()),
            _ => None,
        };

        let value = parsed.ok_or(ValidationError::NotNumeric { field })?;
        if value.abs() > MAX_COMMISSION {
            return Err(ValidationError::OutOfRange { field });
        }
        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Commission> for Decimal {
    fn from(c: Commission) -> Self {
        c.0
    }
}

/// Read a required commission field from a request body.
///
/// Absent or null is [`ValidationError::Missing`]. When `allow_zero` is
/// false a zero amount is rejected as well.
pub(crate) fn required_commission(
    body: &Map<String, Value>,
    field: &'static str,
    allow_zero: bool,
) -> Result<Commission, ValidationError> {
    let value = match body.get(field) {
        None | Some(Value::Null) => return Err(ValidationError::Missing { field }),
        Some(v) => v,
    };

    let commission = Commission::from_json(field, value)?;
    if !allow_zero && commission.is_zero() {
        return Err(ValidationError::Zero { field });
    }
    Ok(commission)
}

/// Parse decimal text, with or without an exponent.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    if text.contains(['e', 'E']) {
        return Decimal::from_scientific(text).ok();
    }
    Decimal::from_str(text).ok()
}

/// Convert a decimal to the nearest `f64` by way of its decimal text.
pub fn decimal_to_f64(value: Decimal) -> Option<f64> {
    value
        .normalize()
        .to_string()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
}

/// Serialize an optional decimal as a JSON number (or `null`).
pub fn serialize_optional<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(d) => {
            let f = decimal_to_f64(*d)
                .ok_or_else(|| S::Error::custom(format!("decimal {} is not representable", d)))?;
            serializer.serialize_f64(f)
        }
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn parses_numbers_exactly() {
        let c = Commission::from_json("commission", &json!(0.15)).unwrap();
        assert_eq!(c.as_decimal(), dec("0.15"));

        let c = Commission::from_json("commission", &json!(12)).unwrap();
        assert_eq!(c.as_decimal(), dec("12"));

        let c = Commission::from_json("commission", &json!(-3.5)).unwrap();
        assert_eq!(c.as_decimal(), dec("-3.5"));
    }

    #[test]
    fn parses_numeric_strings() {
        let c = Commission::from_json("commission", &json!(" 0.12 ")).unwrap();
        assert_eq!(c.as_decimal(), dec("0.12"));

        let c = Commission::from_json("commission", &json!("1.5e-1")).unwrap();
        assert_eq!(c.as_decimal(), dec("0.15"));
    }

    #[test]
    fn rejects_non_numeric() {
        for value in [json!("abc"), json!(""), json!(true), json!([1]), json!({"v": 1})] {
            assert_eq!(
                Commission::from_json("commission", &value),
                Err(ValidationError::NotNumeric { field: "commission" }),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn max_commission_is_column_limit() {
        assert_eq!(MAX_COMMISSION, dec("99999999.99"));
    }

    #[test]
    fn rejects_amounts_the_column_cannot_hold() {
        let c = Commission::from_json("commission", &json!("-99999999.99")).unwrap();
        assert_eq!(c.as_decimal(), dec("-99999999.99"));

        for value in [
            json!("100000000"),
            json!(1e9),
            json!("-123456789.5"),
            json!("79228162514264337593543950335"),
        ] {
            assert_eq!(
                Commission::from_json("commission", &value),
                Err(ValidationError::OutOfRange { field: "commission" }),
                "{value} should be out of range"
            );
        }
    }

    #[test]
    fn required_commission_zero_rules() {
        let body = match json!({ "commission": 0 }) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        assert!(required_commission(&body, "commission", true).is_ok());
        assert_eq!(
            required_commission(&body, "commission", false),
            Err(ValidationError::Zero { field: "commission" })
        );
        assert_eq!(
            required_commission(&body, "other", true),
            Err(ValidationError::Missing { field: "other" })
        );
    }

    #[test]
    fn serializes_as_exact_json_number() {
        #[derive(serde::Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "serialize_optional")]
            v: Option<Decimal>,
        }

        let out = serde_json::to_string(&Wrapper { v: Some(dec("0.15")) }).unwrap();
        assert_eq!(out, r#"{"v":0.15}"#);

        let out = serde_json::to_string(&Wrapper { v: Some(dec("12345678.91")) }).unwrap();
        assert_eq!(out, r#"{"v":12345678.91}"#);

        let out = serde_json::to_string(&Wrapper { v: Some(dec("2.000000")) }).unwrap();
        assert_eq!(out, r#"{"v":2.0}"#);

        let out = serde_json::to_string(&Wrapper { v: None }).unwrap();
        assert_eq!(out, r#"{"v":null}"#);
    }
}
