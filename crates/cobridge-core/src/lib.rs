//! cobridge Core
//!
//! Session facade over the workspace crates:
//! - [`ConversionSession`]: translate, generate tests, analyze, batch
//! - [`BridgeConfig`]: TOML configuration with environment overrides
//! - [`telemetry::init`]: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use cobridge_core::{BridgeConfig, ConversionSession};
//!
//! # async fn example() -> Result<(), cobridge_core::BridgeError> {
//! let config = BridgeConfig::load("cobridge.toml")?.with_env_overrides();
//! let session = ConversionSession::from_config(config)?;
//!
//! let cobol = "       01  CUSTOMER-ID PIC 9(6).";
//! let java = session.translate(cobol, "Customer lookup").await?.translated_code;
//! let tests = session.generate_tests(cobol, &java).await;
//! println!("{} test cases", tests.cases.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;

pub use analysis::{analyze, split_suggestions, CodeAnalysis, PerLanguage, FALLBACK_SUGGESTIONS};
pub use config::{BridgeConfig, LoggingConfig};
pub use error::{BridgeError, BridgeResult};
pub use session::ConversionSession;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
