//! Canonical test-case types
//!
//! The serialized form is camelCase so it matches what the generation
//! collaborator is asked to produce.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name to value, in declaration order
pub type FieldMap = IndexMap<String, Value>;

/// Placeholder used when a record carries no description
pub const DEFAULT_DESCRIPTION: &str = "Default test case";

/// Outcome code expected from the program under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatusCode {
    /// Normal completion
    #[default]
    #[serde(rename = "SUCCESS", alias = "success")]
    Success,
    /// Rejected input
    #[serde(rename = "ERROR", alias = "error")]
    Error,
}

/// Category of a test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    /// Typical business values
    #[default]
    Normal,
    /// Extreme representable values
    Boundary,
    /// Invalid values
    Error,
}

impl TestType {
    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TestType::Normal => "normal",
            TestType::Boundary => "boundary",
            TestType::Error => "error",
        }
    }
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs fed to the program under test
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestInput {
    /// Business input fields
    pub data: FieldMap,
    /// Working-storage variables
    pub working_storage: FieldMap,
    /// Parameters or configuration
    pub parameters: FieldMap,
}

/// Expected status
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestStatus {
    /// Success or error
    pub code: StatusCode,
    /// Human-readable detail, may be empty
    pub message: String,
}

impl TestStatus {
    /// Create a status
    #[inline]
    #[must_use]
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Expected result of running the program under test
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpectedOutput {
    /// Output fields; `null` marks an explicitly absent value
    pub data: FieldMap,
    /// Expected status
    pub status: TestStatus,
}

/// A fully-shaped test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Inputs
    pub input: TestInput,
    /// Expected outputs
    pub expected_output: ExpectedOutput,
    /// What the case exercises
    pub description: String,
    /// Category
    pub test_type: TestType,
    /// Whether the case definition is well-formed
    pub passed: bool,
}

impl TestCase {
    /// Serialize back to the loosely-typed form collaborators exchange
    #[must_use]
    pub fn to_raw(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Default for TestCase {
    fn default() -> Self {
        Self {
            input: TestInput::default(),
            expected_output: ExpectedOutput::default(),
            description: DEFAULT_DESCRIPTION.to_string(),
            test_type: TestType::Normal,
            passed: false,
        }
    }
}
