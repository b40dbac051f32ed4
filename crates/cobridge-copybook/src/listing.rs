//! Light-weight source listings
//!
//! Variable names and line counts for side-by-side display of a COBOL
//! source and its Java translation. Unlike [`crate::extract_fields`], the
//! variable listings are deduplicated by name.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

static COBOL_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{2}\s+([A-Za-z0-9]+(?:-[A-Za-z0-9]+)+)").expect("cobol variable pattern is valid")
});

static JAVA_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:int|double|String|boolean)\s+(\w+)\s*=").expect("java variable pattern is valid")
});

/// Hyphenated data names following a level number, first-seen order
#[must_use]
pub fn list_variable_names(source: &str) -> Vec<String> {
    collect_unique(&COBOL_VARIABLE, source)
}

/// Locals and fields initialized with a primitive or `String` type
#[must_use]
pub fn list_java_variables(source: &str) -> Vec<String> {
    collect_unique(&JAVA_VARIABLE, source)
}

/// Number of lines containing anything but whitespace
#[must_use]
pub fn count_code_lines(source: &str) -> usize {
    source.lines().filter(|line| !line.trim().is_empty()).count()
}

fn collect_unique(pattern: &Regex, source: &str) -> Vec<String> {
    let mut names = IndexSet::new();
    for line in source.lines() {
        for caps in pattern.captures_iter(line) {
            if let Some(name) = caps.get(1) {
                names.insert(name.as_str().to_string());
            }
        }
    }
    names.into_iter().collect()
}
