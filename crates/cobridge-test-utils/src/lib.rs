//! Testing utilities for cobridge workspace
//!
//! Shared test helpers, fixtures, and a scripted translator.

#![allow(missing_docs)]

use async_trait::async_trait;
use cobridge_translate::{Translation, TranslateError, Translator};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const CUSTOMER_COBOL: &str = r"       IDENTIFICATION DIVISION.
       PROGRAM-ID. CUSTOMER.
       DATA DIVISION.
       WORKING-STORAGE SECTION.
       01  CUSTOMER-NAME PIC X(20).
       01  CUSTOMER-ID   PIC 9(6).
       01  AMOUNT        PIC 9(5)V9(2).
       PROCEDURE DIVISION.
           DISPLAY CUSTOMER-NAME.
           STOP RUN.
";

pub const PAYROLL_COBOL: &str = r"       IDENTIFICATION DIVISION.
       PROGRAM-ID. PAYROLL.
       DATA DIVISION.
       WORKING-STORAGE SECTION.
       01  EMP-ID      PIC 9(6).
       01  EMP-GRADE   PIC A(2).
       01  EMP-SALARY  PIC 9(7)V9(2).
       PROCEDURE DIVISION.
           COMPUTE EMP-SALARY = EMP-SALARY * 1.05.
           STOP RUN.
";

pub const CUSTOMER_JAVA: &str = r#"public class Customer {
    String customerName = "";
    int customerId = 0;
    double amount = 0.0;

    public static void main(String[] args) {
        System.out.println(new Customer().customerName);
    }
}
"#;

/// `(file name, contents)` pairs named `PROG1.cob`, `PROG2.cob`, ...
pub fn cobol_files(count: usize) -> Vec<(String, String)> {
    (1..=count)
        .map(|i| {
            (
                format!("PROG{i}.cob"),
                format!("       PROGRAM-ID. PROG{i}.\n       01  WS-FIELD-{i} PIC X({i}).\n"),
            )
        })
        .collect()
}

/// One scripted translator reaction
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply(String),
    Fail(String),
    RateLimited,
}

/// A recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub source: String,
    pub context: String,
}

/// Translator whose answers are scripted per call
///
/// Calls consume the script front to back; once it is empty every call
/// replies with `class Translated {}`. Sources containing a registered
/// failure needle always fail, regardless of the script.
#[derive(Debug, Default)]
pub struct MockTranslator {
    script: Mutex<VecDeque<Scripted>>,
    fail_needles: Mutex<Vec<(String, String)>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    /// Every call fails with `message`
    pub fn always_failing(message: &str) -> Self {
        let mock = Self::new();
        mock.fail_when_source_contains("", message);
        mock
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fail_when_source_contains(&self, needle: &str, message: &str) {
        self.fail_needles
            .lock()
            .push((needle.to_string(), message.to_string()));
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Highest number of calls observed in flight at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, source: &str, context: &str) -> Result<Translation, TranslateError> {
        self.calls.lock().push(RecordedCall {
            source: source.to_string(),
            context: context.to_string(),
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let needle_failure = self
            .fail_needles
            .lock()
            .iter()
            .find(|(needle, _)| source.contains(needle.as_str()))
            .map(|(_, message)| message.clone());
        if let Some(message) = needle_failure {
            return Err(TranslateError::failed(message));
        }

        match self.script.lock().pop_front() {
            Some(Scripted::Reply(code)) => Ok(Translation::new(code)),
            Some(Scripted::Fail(message)) => Err(TranslateError::failed(message)),
            Some(Scripted::RateLimited) => Err(TranslateError::RateLimited(
                "Rate limit exceeded, please retry".to_string(),
            )),
            None => Ok(Translation::new("class Translated {}")),
        }
    }
}
