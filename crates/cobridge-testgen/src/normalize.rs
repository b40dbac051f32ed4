//! Test-case normalization
//!
//! Records coming back from the generation collaborator are untrusted. They
//! are read through [`RawTestCase`], a schema where every field is optional
//! and an ill-typed field reads as absent, then completed with defaults.
//! [`normalize`] is total: any JSON value yields a canonical [`TestCase`].

use crate::types::{
    ExpectedOutput, FieldMap, StatusCode, TestCase, TestInput, TestStatus, TestType,
    DEFAULT_DESCRIPTION,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Loosely-typed test case as received from a collaborator
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTestCase {
    /// Inputs
    #[serde(deserialize_with = "lenient")]
    pub input: Option<RawInput>,
    /// Expected outputs
    #[serde(deserialize_with = "lenient")]
    pub expected_output: Option<RawExpectedOutput>,
    /// Description
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    /// Category
    #[serde(deserialize_with = "lenient")]
    pub test_type: Option<TestType>,
    /// Any value, read by truthiness
    pub passed: Option<Value>,
}

/// Loosely-typed inputs
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawInput {
    /// Business input fields
    #[serde(deserialize_with = "lenient")]
    pub data: Option<FieldMap>,
    /// Working-storage variables
    #[serde(deserialize_with = "lenient")]
    pub working_storage: Option<FieldMap>,
    /// Parameters
    #[serde(deserialize_with = "lenient")]
    pub parameters: Option<FieldMap>,
}

/// Loosely-typed expected output
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawExpectedOutput {
    /// Output fields
    #[serde(deserialize_with = "lenient")]
    pub data: Option<FieldMap>,
    /// Status
    #[serde(deserialize_with = "lenient")]
    pub status: Option<RawStatus>,
}

/// Loosely-typed status
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawStatus {
    /// Status code; unknown codes read as absent
    #[serde(deserialize_with = "lenient")]
    pub code: Option<StatusCode>,
    /// Message
    #[serde(deserialize_with = "lenient")]
    pub message: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl RawTestCase {
    /// Read any JSON value; non-objects read as an empty record
    #[must_use]
    pub fn from_value(raw: &Value) -> Self {
        if !raw.is_object() {
            return Self::default();
        }
        Self::deserialize(raw).unwrap_or_default()
    }

    /// Complete missing fields with defaults
    #[must_use]
    pub fn into_canonical(self) -> TestCase {
        let input = self.input.unwrap_or_default();
        let expected = self.expected_output.unwrap_or_default();
        let status = expected.status.unwrap_or_default();

        TestCase {
            input: TestInput {
                data: input.data.unwrap_or_default(),
                working_storage: input.working_storage.unwrap_or_default(),
                parameters: input.parameters.unwrap_or_default(),
            },
            expected_output: ExpectedOutput {
                data: expected.data.unwrap_or_default(),
                status: TestStatus {
                    code: status.code.unwrap_or_default(),
                    message: status.message.unwrap_or_default(),
                },
            },
            description: self
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            test_type: self.test_type.unwrap_or_default(),
            passed: self.passed.as_ref().is_some_and(is_truthy),
        }
    }
}

/// Reconcile an arbitrary value into a canonical test case
#[must_use]
pub fn normalize(raw: &Value) -> TestCase {
    RawTestCase::from_value(raw).into_canonical()
}

/// Normalize every element of a JSON array; `None` for anything else
#[must_use]
pub fn normalize_all(raw: &Value) -> Option<Vec<TestCase>> {
    raw.as_array().map(|items| items.iter().map(normalize).collect())
}

/// Truthiness: `null`, `false`, `0`, `NaN` and `""` are false
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn empty_object_is_fully_defaulted() {
        let case = normalize(&json!({}));
        assert_eq!(case, TestCase::default());
        assert_eq!(case.expected_output.status.code, StatusCode::Success);
        assert_eq!(case.test_type, TestType::Normal);
        assert!(!case.passed);
    }

    #[test]
    fn non_objects_are_defaulted() {
        for raw in [json!(null), json!(42), json!("case"), json!([1, 2])] {
            assert_eq!(normalize(&raw), TestCase::default());
        }
    }

    #[test]
    fn keeps_well_formed_fields() {
        let case = normalize(&json!({
            "input": { "data": { "WS-A": 1 }, "parameters": { "mode": "fast" } },
            "expectedOutput": {
                "data": { "WS-A": null },
                "status": { "code": "ERROR", "message": "bad" }
            },
            "description": "rejects A",
            "testType": "error",
            "passed": true
        }));
        assert_eq!(case.input.data["WS-A"], json!(1));
        assert!(case.input.working_storage.is_empty());
        assert_eq!(case.input.parameters["mode"], json!("fast"));
        assert_eq!(case.expected_output.data["WS-A"], Value::Null);
        assert_eq!(case.expected_output.status, TestStatus::new(StatusCode::Error, "bad"));
        assert_eq!(case.description, "rejects A");
        assert_eq!(case.test_type, TestType::Error);
        assert!(case.passed);
    }

    #[test]
    fn ill_typed_fields_fall_back() {
        let case = normalize(&json!({
            "input": { "data": [1, 2], "workingStorage": "x" },
            "expectedOutput": { "status": { "code": "MAYBE", "message": 7 } },
            "description": "",
            "testType": "exploratory"
        }));
        assert!(case.input.data.is_empty());
        assert!(case.input.working_storage.is_empty());
        assert_eq!(case.expected_output.status.code, StatusCode::Success);
        assert_eq!(case.expected_output.status.message, "");
        assert_eq!(case.description, DEFAULT_DESCRIPTION);
        assert_eq!(case.test_type, TestType::Normal);
    }

    #[test]
    fn passed_truthiness() {
        let passed = |v: Value| normalize(&json!({ "passed": v })).passed;
        assert!(passed(json!(true)));
        assert!(passed(json!(1)));
        assert!(passed(json!("false")));
        assert!(passed(json!({})));
        assert!(!passed(json!(false)));
        assert!(!passed(json!(0)));
        assert!(!passed(json!("")));
        assert!(!passed(json!(null)));
    }

    #[test]
    fn normalize_all_requires_array() {
        assert!(normalize_all(&json!({"input": {}})).is_none());
        let cases = normalize_all(&json!([{}, {"testType": "boundary"}])).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1].test_type, TestType::Boundary);
    }
}
