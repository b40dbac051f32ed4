//! Field descriptor types
//!
//! A [`FieldDescriptor`] is the typed view of one `PIC` data declaration.

use serde::{Deserialize, Serialize};

/// Storage class of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Class token starts with `9`
    Numeric,
    /// Alphabetic (`A`) or alphanumeric (`X`) class
    Text,
}

impl FieldKind {
    /// Classify a picture class token
    #[inline]
    #[must_use]
    pub fn from_class_token(token: &str) -> Self {
        if token.starts_with('9') {
            FieldKind::Numeric
        } else {
            FieldKind::Text
        }
    }

    /// Lowercase name as used in serialized output
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Numeric => "numeric",
            FieldKind::Text => "text",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Longest declared length or decimal scale accepted from source
///
/// Declarations above it are skipped by the extractor, and the synthesizer
/// never builds text values longer than it.
pub const MAX_FIELD_LENGTH: usize = 65_535;

/// One parsed data declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Declared data name, e.g. `CUSTOMER-NAME`
    pub name: String,
    /// Numeric or text
    pub kind: FieldKind,
    /// Class token exactly as written (`9`, `X`, `AAA`, ...)
    pub pic_clause: String,
    /// Declared length; 1 when no `(n)` is present
    pub length: usize,
    /// Whether a `V9(n)` suffix was present
    pub is_decimal: bool,
    /// Digits after the implied decimal point
    pub decimal_places: usize,
}

impl FieldDescriptor {
    /// Create a non-decimal descriptor
    #[must_use]
    pub fn new(name: impl Into<String>, pic_clause: impl Into<String>, length: usize) -> Self {
        let pic_clause = pic_clause.into();
        Self {
            name: name.into(),
            kind: FieldKind::from_class_token(&pic_clause),
            pic_clause,
            length,
            is_decimal: false,
            decimal_places: 0,
        }
    }

    /// With an implied decimal part of `places` digits
    #[inline]
    #[must_use]
    pub fn with_decimal_places(mut self, places: usize) -> Self {
        self.is_decimal = true;
        self.decimal_places = places;
        self
    }

    /// Check if field is numeric
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.kind == FieldKind::Numeric
    }
}
