//! cobridge Copybook
//!
//! Extraction of fixed-format COBOL data declarations into typed
//! [`FieldDescriptor`]s, plus the listings used for code analysis.
//!
//! # Example
//!
//! ```rust
//! use cobridge_copybook::{extract_fields, FieldKind};
//!
//! let fields = extract_fields("       05 AMOUNT PIC 9(5)V9(2).");
//! assert_eq!(fields[0].kind, FieldKind::Numeric);
//! assert_eq!(fields[0].decimal_places, 2);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod extract;
pub mod field;
pub mod listing;

pub use extract::{extract_fields, parse_declaration};
pub use field::{FieldDescriptor, FieldKind, MAX_FIELD_LENGTH};
pub use listing::{count_code_lines, list_java_variables, list_variable_names};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
