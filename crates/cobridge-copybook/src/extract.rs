//! Field descriptor extraction
//!
//! Line-oriented scan for `PIC` declarations:
//!
//! ```text
//! 05  AMOUNT        PIC 9(5)V9(2).
//! ^^  ^^^^^^            ^ ^^^ ^^^^^
//! |   name              | |   decimal places
//! level                 | length
//!                       class token
//! ```
//!
//! Lines that do not look like a declaration are skipped; extraction never
//! fails.

use crate::field::{FieldDescriptor, FieldKind, MAX_FIELD_LENGTH};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|\s)(\d{2})\s+([A-Z0-9][A-Z0-9-]*)\s+PIC(?:TURE)?\s+([9AX]+)(?:\((\d+)\))?(?:V(?:9\((\d+)\)|(9+)))?",
    )
    .expect("declaration pattern is valid")
});

/// Extract one descriptor per matching line, in source order
///
/// Duplicate names are kept; see [`crate::listing::list_variable_names`]
/// for the deduplicated listing.
#[must_use]
pub fn extract_fields(source: &str) -> Vec<FieldDescriptor> {
    source.lines().filter_map(parse_declaration).collect()
}

/// Parse a single source line
///
/// Returns `None` for anything that is not a declaration, including a
/// declared length of zero or one above [`MAX_FIELD_LENGTH`].
#[must_use]
pub fn parse_declaration(line: &str) -> Option<FieldDescriptor> {
    let caps = DECLARATION.captures(line)?;
    descriptor_from(&caps)
}

fn descriptor_from(caps: &Captures<'_>) -> Option<FieldDescriptor> {
    let name = caps.get(2)?.as_str().to_string();
    let pic_clause = caps.get(3)?.as_str().to_string();

    let length = match caps.get(4) {
        Some(m) => m.as_str().parse::<usize>().ok()?,
        None => 1,
    };
    if length == 0 || length > MAX_FIELD_LENGTH {
        return None;
    }

    let decimal_places = match (caps.get(5), caps.get(6)) {
        (Some(m), _) => Some(m.as_str().parse::<usize>().ok()?),
        (None, Some(nines)) => Some(nines.as_str().len()),
        (None, None) => None,
    };
    if decimal_places.is_some_and(|places| places > MAX_FIELD_LENGTH) {
        return None;
    }

    Some(FieldDescriptor {
        name,
        kind: FieldKind::from_class_token(&pic_clause),
        pic_clause,
        length,
        is_decimal: decimal_places.is_some(),
        decimal_places: decimal_places.unwrap_or(0),
    })
}
