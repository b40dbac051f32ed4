//! cobridge Translate
//!
//! The collaborator seam every other crate talks through:
//! - [`Translator`] trait and [`Translation`] result
//! - [`ChatCompletionsTranslator`] HTTP implementation
//! - [`TranslateError`] with rate-limit classification
//! - [`translate_with_retry`] for interactive callers

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod client;
pub mod config;
pub mod error;
pub mod retry;
pub mod translator;

pub use client::{translation_prompt, ChatCompletionsTranslator};
pub use config::TranslatorConfig;
pub use error::{TranslateError, TranslateResult};
pub use retry::{translate_with_retry, RetryPolicy};
pub use translator::{SharedTranslator, Translation, Translator};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
