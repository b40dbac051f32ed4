//! cobridge Testgen
//!
//! Verification artifacts for translated programs:
//! - [`synthesize`]: four deterministic cases from field declarations
//! - [`normalize`]: total reconciliation of untrusted case records
//! - [`TestCaseGenerator`]: collaborator generation with synthesis fallback
//! - [`JUnitGenerator`]: JUnit 5 sources with a local skeleton fallback
//!
//! # Example
//!
//! ```rust
//! use cobridge_testgen::{synthesize_from_source, TestType};
//!
//! let cases = synthesize_from_source("       01  CUSTOMER-NAME PIC X(3).");
//! assert_eq!(cases.len(), 4);
//! assert_eq!(cases[3].test_type, TestType::Error);
//! assert_eq!(cases[1].input.data["CUSTOMER-NAME"], "ZZZ");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod generator;
pub mod junit;
pub mod normalize;
pub mod synthesize;
pub mod types;

pub use generator::{parse_cases, strip_code_fences, CaseOrigin, GeneratedCases, TestCaseGenerator};
pub use junit::{class_name_of, render_basic_junit, JUnitGenerator};
pub use normalize::{normalize, normalize_all, RawTestCase};
pub use synthesize::{synthesize, synthesize_from_source};
pub use types::{
    ExpectedOutput, FieldMap, StatusCode, TestCase, TestInput, TestStatus, TestType,
    DEFAULT_DESCRIPTION,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
