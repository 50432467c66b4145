//! Agent entity and validated write payloads

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use super::commission::{self, required_commission, Commission};
use super::validation::required_text;
use super::ValidationError;

/// One row of the `agents` table as returned to clients.
///
/// Field names serialize as the upper-case column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Agent {
    pub agent_code: String,
    pub agent_name: Option<String>,
    pub working_area: Option<String>,
    #[serde(serialize_with = "commission::serialize_optional")]
    pub commission: Option<Decimal>,
    pub phone_no: Option<String>,
    pub country: Option<String>,
}

/// Validated payload for `POST /agents`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgent {
    pub agent_code: String,
    pub agent_name: String,
    pub working_area: String,
    pub commission: Commission,
    pub phone_no: String,
    pub country: String,
}

impl NewAgent {
    /// Validate a create body.
    ///
    /// # Rules
    /// - All six fields are required and must be non-falsy
    /// - Text fields must be non-empty strings, stored as sent
    /// - `COMMISSION` must be numeric and non-zero
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        Ok(Self {
            agent_code: required_text(body, "AGENT_CODE")?,
            agent_name: required_text(body, "AGENT_NAME")?,
            working_area: required_text(body, "WORKING_AREA")?,
            commission: required_commission(body, "COMMISSION", false)?,
            phone_no: required_text(body, "PHONE_NO")?,
            country: required_text(body, "COUNTRY")?,
        })
    }
}

impl From<NewAgent> for Agent {
    fn from(a: NewAgent) -> Self {
        Self {
            agent_code: a.agent_code,
            agent_name: Some(a.agent_name),
            working_area: Some(a.working_area),
            commission: Some(a.commission.as_decimal()),
            phone_no: Some(a.phone_no),
            country: Some(a.country),
        }
    }
}

/// Validate a `PATCH /agents/{code}/commission` body.
///
/// `commission` must be present and numeric; zero is allowed.
/// `null`, `""` and booleans are rejected rather than coerced to a number.
pub fn commission_update_from_body(
    body: &Map<String, Value>,
) -> Result<Commission, ValidationError> {
    required_commission(body, "commission", true)
}

/// Validated payload for `PUT /agents/{code}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReplacement {
    pub agent_name: String,
    pub commission: Commission,
}

impl AgentReplacement {
    /// `AGENT_NAME` must be a non-empty string, `commission` numeric and non-zero.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        Ok(Self {
            agent_name: required_text(body, "AGENT_NAME")?,
            commission: required_commission(body, "commission", false)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::str::FromStr;

    const CREATE_FIELDS: [&str; 6] = [
        "AGENT_CODE",
        "AGENT_NAME",
        "WORKING_AREA",
        "COMMISSION",
        "PHONE_NO",
        "COUNTRY",
    ];

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test bodies are objects"),
        }
    }

    fn full_create_body() -> Map<String, Value> {
        object(json!({
            "AGENT_CODE": "A001",
            "AGENT_NAME": "Subbarao",
            "WORKING_AREA": "Bangalore",
            "COMMISSION": 0.14,
            "PHONE_NO": "077-12346674",
            "COUNTRY": "India"
        }))
    }

    #[test]
    fn new_agent_accepts_full_body() {
        let agent = NewAgent::from_body(&full_create_body()).unwrap();
        assert_eq!(agent.agent_code, "A001");
        assert_eq!(
            agent.commission.as_decimal(),
            Decimal::from_str("0.14").unwrap()
        );
    }

    #[test]
    fn new_agent_rejects_zero_commission() {
        let mut body = full_create_body();
        body.insert("COMMISSION".into(), json!(0));
        assert_eq!(
            NewAgent::from_body(&body),
            Err(ValidationError::Zero { field: "COMMISSION" })
        );
    }

    #[test]
    fn new_agent_ignores_lowercase_commission() {
        let mut body = full_create_body();
        body.remove("COMMISSION");
        body.insert("commission".into(), json!(0.5));
        assert_eq!(
            NewAgent::from_body(&body),
            Err(ValidationError::Missing { field: "COMMISSION" })
        );
    }

    #[test]
    fn agent_serializes_with_column_names() {
        let agent = Agent::from(NewAgent::from_body(&full_create_body()).unwrap());
        let value = serde_json::to_value(&agent).unwrap();
        assert_eq!(value["AGENT_CODE"], json!("A001"));
        assert_eq!(value["COMMISSION"], json!(0.14));
        assert_eq!(value["COUNTRY"], json!("India"));
    }

    #[test]
    fn commission_update_rules() {
        assert!(commission_update_from_body(&object(json!({ "commission": 0 }))).is_ok());
        assert!(commission_update_from_body(&object(json!({ "commission": "0.2" }))).is_ok());
        assert!(commission_update_from_body(&object(json!({ "commission": "x" }))).is_err());
        assert!(commission_update_from_body(&object(json!({ "commission": null }))).is_err());
        assert!(commission_update_from_body(&object(json!({}))).is_err());
    }

    #[test]
    fn replacement_rules() {
        let ok = AgentReplacement::from_body(&object(json!({
            "AGENT_NAME": "Alford",
            "commission": 0.13
        })))
        .unwrap();
        assert_eq!(ok.agent_name, "Alford");

        assert!(AgentReplacement::from_body(&object(json!({ "commission": 0.13 }))).is_err());
        assert!(AgentReplacement::from_body(&object(json!({
            "AGENT_NAME": "Alford",
            "commission": 0
        })))
        .is_err());
        assert_eq!(
            AgentReplacement::from_body(&object(json!({
                "AGENT_NAME": "",
                "commission": 0.13
            }))),
            Err(ValidationError::Empty { field: "AGENT_NAME" })
        );
        assert_eq!(
            AgentReplacement::from_body(&object(json!({
                "AGENT_NAME": "Alford",
                "commission": "abc"
            }))),
            Err(ValidationError::NotNumeric { field: "commission" })
        );
    }

    #[test]
    fn new_agent_keeps_text_verbatim() {
        let mut body = full_create_body();
        body.insert("AGENT_CODE".into(), json!(" A001"));
        body.insert("AGENT_NAME".into(), json!("  Ram  "));
        let agent = NewAgent::from_body(&body).unwrap();
        assert_eq!(agent.agent_code, " A001");
        assert_eq!(agent.agent_name, "  Ram  ");
    }

    proptest! {
        #[test]
        fn any_missing_create_field_is_rejected(idx in 0usize..6) {
            let mut body = full_create_body();
            body.remove(CREATE_FIELDS[idx]);
            let err = NewAgent::from_body(&body).unwrap_err();
            prop_assert_eq!(err.field(), CREATE_FIELDS[idx]);
        }

        #[test]
        fn cent_amounts_round_trip_through_json(cents in 1i64..10_000_000_000i64) {
            let expected = Decimal::new(cents, 2);
            let raw: Value = serde_json::from_str(&expected.to_string()).unwrap();
            let parsed = Commission::from_json("commission", &raw).unwrap();
            prop_assert_eq!(parsed.as_decimal(), expected);

            let agent = Agent {
                agent_code: "A".into(),
                agent_name: None,
                working_area: None,
                commission: Some(parsed.as_decimal()),
                phone_no: None,
                country: None,
            };
            let out = serde_json::to_value(&agent).unwrap();
            prop_assert_eq!(&out["COMMISSION"], &raw);
        }
    }
}
