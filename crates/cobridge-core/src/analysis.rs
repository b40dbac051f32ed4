//! Side-by-side metrics for a COBOL program and its translation

use cobridge_copybook::{count_code_lines, list_java_variables, list_variable_names};
use cobridge_translate::Translator;
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

/// Most suggestions kept from a collaborator reply
pub const MAX_SUGGESTIONS: usize = 5;

/// Suggestions used when the collaborator cannot be reached
pub const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Consider adding input validation",
    "Implement logging for better error tracking",
    "Consider using try-with-resources for file operations",
];

/// A value per language
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerLanguage<T> {
    /// COBOL side
    pub cobol: T,
    /// Java side
    pub java: T,
}

/// Result of [`analyze`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAnalysis {
    /// Non-blank lines
    pub line_count: PerLanguage<usize>,
    /// Declared variables, first-seen order, no duplicates
    pub variables: PerLanguage<Vec<String>>,
    /// Up to [`MAX_SUGGESTIONS`] improvement hints
    pub suggestions: Vec<String>,
}

/// Measure both programs and ask the collaborator for suggestions
///
/// Never fails; a collaborator error yields [`FALLBACK_SUGGESTIONS`].
#[instrument(skip_all, fields(cobol_len = cobol.len(), java_len = java.len()))]
pub async fn analyze(translator: &dyn Translator, cobol: &str, java: &str) -> CodeAnalysis {
    CodeAnalysis {
        line_count: PerLanguage {
            cobol: count_code_lines(cobol),
            java: count_code_lines(java),
        },
        variables: PerLanguage {
            cobol: list_variable_names(cobol),
            java: list_java_variables(java),
        },
        suggestions: suggestions(translator, cobol, java).await,
    }
}

async fn suggestions(translator: &dyn Translator, cobol: &str, java: &str) -> Vec<String> {
    match translator.complete(&suggestion_prompt(cobol, java)).await {
        Ok(reply) => split_suggestions(&reply.translated_code),
        Err(e) => {
            error!(error = %e, "suggestion request failed, using defaults");
            FALLBACK_SUGGESTIONS.iter().map(ToString::to_string).collect()
        }
    }
}

/// Non-blank lines of a reply, at most [`MAX_SUGGESTIONS`]
#[must_use]
pub fn split_suggestions(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

fn suggestion_prompt(cobol: &str, java: &str) -> String {
    format!(
        "Analyze this code translation from COBOL to Java and provide specific optimization suggestions.\n\
         Consider:\n\
         - Code quality\n\
         - Performance improvements\n\
         - Modern Java practices\n\
         - Error handling\n\
         - Testing considerations\n\n\
         COBOL Code:\n{cobol}\n\n\
         Java Translation:\n{java}\n\n\
         Provide 3-5 specific, actionable suggestions for improving this code. \
         Return only the suggestions, one per line."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_skip_blank_lines_and_cap() {
        let reply = "\n1. Use BigDecimal\n\n2. Validate input\n3. a\n4. b\n5. c\n6. d\n";
        let got = split_suggestions(reply);
        assert_eq!(got.len(), MAX_SUGGESTIONS);
        assert_eq!(got[0], "1. Use BigDecimal");
        assert_eq!(got[4], "5. c");
    }

    #[test]
    fn prompt_embeds_both_programs() {
        let prompt = suggestion_prompt("01 WS-A PIC X.", "String wsA = \"\";");
        assert!(prompt.contains("COBOL Code:\n01 WS-A PIC X."));
        assert!(prompt.contains("Java Translation:\nString wsA"));
    }
}
