//! Deterministic test-case synthesis
//!
//! Derives four cases from field descriptors alone: typical values, the
//! maximum and minimum each declaration can hold, and deliberately invalid
//! values. Used whenever the generation collaborator is unavailable or its
//! output cannot be used, so it must never fail.

use crate::types::{ExpectedOutput, FieldMap, StatusCode, TestCase, TestInput, TestStatus, TestType};
use cobridge_copybook::{extract_fields, FieldDescriptor, FieldKind, MAX_FIELD_LENGTH};
use serde_json::{json, Value};

/// Largest length whose maximum `10^L - 1` is exact in an `i64`
const MAX_EXACT_DIGITS: usize = 18;

/// Build the four fallback cases: normal, max boundary, min boundary, error
#[must_use]
pub fn synthesize(fields: &[FieldDescriptor]) -> [TestCase; 4] {
    [
        build_case(
            fields,
            typical_value,
            Some,
            TestStatus::new(StatusCode::Success, "Operation completed successfully"),
            "Normal operation with typical business values",
            TestType::Normal,
        ),
        build_case(
            fields,
            max_value,
            Some,
            TestStatus::new(StatusCode::Success, "Operation completed with maximum values"),
            "Boundary testing with maximum allowed values",
            TestType::Boundary,
        ),
        build_case(
            fields,
            min_value,
            Some,
            TestStatus::new(StatusCode::Success, "Operation completed with minimum values"),
            "Boundary testing with minimum allowed values",
            TestType::Boundary,
        ),
        build_case(
            fields,
            invalid_value,
            |_| None,
            TestStatus::new(StatusCode::Error, "Invalid input values"),
            "Error handling with invalid values",
            TestType::Error,
        ),
    ]
}

/// Extract declarations from `source` and synthesize from them
#[must_use]
pub fn synthesize_from_source(source: &str) -> [TestCase; 4] {
    synthesize(&extract_fields(source))
}

fn build_case(
    fields: &[FieldDescriptor],
    value_of: fn(&FieldDescriptor) -> Value,
    expected_of: fn(Value) -> Option<Value>,
    status: TestStatus,
    description: &str,
    test_type: TestType,
) -> TestCase {
    let mut input = FieldMap::new();
    let mut output = FieldMap::new();

    for field in fields {
        let value = value_of(field);
        output.insert(field.name.clone(), expected_of(value.clone()).unwrap_or(Value::Null));
        input.insert(field.name.clone(), value);
    }

    TestCase {
        input: TestInput {
            data: input,
            ..TestInput::default()
        },
        expected_output: ExpectedOutput {
            data: output,
            status,
        },
        description: description.to_string(),
        test_type,
        passed: true,
    }
}

/// `1000`, `1000.50` for decimals, `"SAMPLE"` for text
#[must_use]
pub fn typical_value(field: &FieldDescriptor) -> Value {
    match field.kind {
        FieldKind::Numeric if field.is_decimal => json!(1000.50),
        FieldKind::Numeric => json!(1000),
        FieldKind::Text => json!("SAMPLE"),
    }
}

/// `10^L - 1` (scaled by `10^-D` for decimals), or `L` × `Z`
///
/// Text lengths are capped at [`MAX_FIELD_LENGTH`].
#[must_use]
pub fn max_value(field: &FieldDescriptor) -> Value {
    match field.kind {
        FieldKind::Numeric => {
            if field.is_decimal {
                json!(all_nines_f64(field.length) / 10f64.powi(clamp_exp(field.decimal_places)))
            } else if field.length <= MAX_EXACT_DIGITS {
                json!(all_nines_i64(field.length))
            } else {
                json!(all_nines_f64(field.length))
            }
        }
        FieldKind::Text => json!("Z".repeat(text_length(field))),
    }
}

/// `0`, or `L` × `A`
#[must_use]
pub fn min_value(field: &FieldDescriptor) -> Value {
    match field.kind {
        FieldKind::Numeric => json!(0),
        FieldKind::Text => json!("A".repeat(text_length(field))),
    }
}

/// `-1`, or `L + 1` × `@`: outside the declared class and one too long
#[must_use]
pub fn invalid_value(field: &FieldDescriptor) -> Value {
    match field.kind {
        FieldKind::Numeric => json!(-1),
        FieldKind::Text => json!("@".repeat(text_length(field).saturating_add(1))),
    }
}

fn text_length(field: &FieldDescriptor) -> usize {
    field.length.min(MAX_FIELD_LENGTH)
}

fn all_nines_i64(length: usize) -> i64 {
    let exp = u32::try_from(length).unwrap_or(u32::MAX);
    10i64.pow(exp) - 1
}

fn all_nines_f64(length: usize) -> f64 {
    if length <= MAX_EXACT_DIGITS {
        all_nines_i64(length) as f64
    } else {
        10f64.powi(clamp_exp(length)) - 1.0
    }
}

fn clamp_exp(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
