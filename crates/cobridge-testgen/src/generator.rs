//! Collaborator-backed test-case generation with deterministic fallback

use crate::normalize::normalize_all;
use crate::synthesize::synthesize_from_source;
use crate::types::TestCase;
use cobridge_translate::SharedTranslator;
use serde_json::Value;
use tracing::{debug, error, warn};

/// Where a set of test cases came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseOrigin {
    /// Parsed and normalized from collaborator output
    Collaborator,
    /// Produced by the deterministic synthesizer
    Fallback,
}

/// Generated test cases and their origin
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCases {
    /// Canonical cases
    pub cases: Vec<TestCase>,
    /// Origin of the cases
    pub origin: CaseOrigin,
}

impl GeneratedCases {
    fn fallback(source: &str) -> Self {
        Self {
            cases: synthesize_from_source(source).to_vec(),
            origin: CaseOrigin::Fallback,
        }
    }
}

/// Asks the collaborator for test cases, falling back to synthesis
#[derive(Debug, Clone)]
pub struct TestCaseGenerator {
    translator: SharedTranslator,
}

impl TestCaseGenerator {
    /// Create generator over a translator
    #[inline]
    #[must_use]
    pub fn new(translator: SharedTranslator) -> Self {
        Self { translator }
    }

    /// Generate test cases for a source program and its translation
    ///
    /// Never fails: collaborator errors and unusable output both yield the
    /// four synthesized cases.
    pub async fn generate(&self, source: &str, translated: &str) -> GeneratedCases {
        let prompt = test_case_prompt(source, translated);

        let reply = match self.translator.complete(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "test generation failed, using synthesized cases");
                return GeneratedCases::fallback(source);
            }
        };

        match parse_cases(&reply.translated_code) {
            Some(cases) => {
                debug!(count = cases.len(), "parsed collaborator test cases");
                GeneratedCases {
                    cases,
                    origin: CaseOrigin::Collaborator,
                }
            }
            None => {
                warn!("collaborator output is not a JSON array, using synthesized cases");
                GeneratedCases::fallback(source)
            }
        }
    }
}

/// Parse collaborator output as a JSON array of test cases
///
/// Markdown code fences are stripped first. Returns `None` when the text is
/// not JSON or not an array.
#[must_use]
pub fn parse_cases(reply: &str) -> Option<Vec<TestCase>> {
    let body = strip_code_fences(reply);
    let value: Value = serde_json::from_str(&body).ok()?;
    normalize_all(&value)
}

/// Remove every ```` ```json ```` and ```` ``` ```` marker and trim
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn test_case_prompt(source: &str, translated: &str) -> String {
    format!(
        "Analyze this COBOL code and generate structured test cases. Each test case is a JSON \
         object with keys input {{data, workingStorage, parameters}}, expectedOutput {{data, \
         status {{code: \"SUCCESS\" | \"ERROR\", message}}}}, description, testType \
         (\"normal\" | \"boundary\" | \"error\") and passed (boolean).\n\n\
         COBOL Code:\n{source}\n\n\
         Java Code:\n{translated}\n\n\
         Cover normal business scenarios, boundary conditions, validation errors and special \
         business rules. Return only a JSON array of test cases."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TestType;

    #[test]
    fn strips_fences() {
        assert_eq!(strip_code_fences("```json\n[]\n```"), "[]");
        assert_eq!(strip_code_fences("  []  "), "[]");
    }

    #[test]
    fn parse_requires_array() {
        assert!(parse_cases("{\"input\": {}}").is_none());
        assert!(parse_cases("here are your tests").is_none());
        let cases = parse_cases("```json\n[{\"testType\": \"error\"}]\n```").unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].test_type, TestType::Error);
    }

    #[test]
    fn prompt_includes_both_sources() {
        let prompt = test_case_prompt("MOVE A TO B.", "b = a;");
        assert!(prompt.contains("MOVE A TO B."));
        assert!(prompt.contains("b = a;"));
    }
}
