//! Structured reporting for accessor operations.
//!
//! Human-readable narration is decoupled from operation results: every
//! failure is still returned as an explicit error value, and the reporter
//! only mirrors events for interactive consumers. Callers pick the sink by
//! injecting an implementation into the accessor.

use std::path::Path;

use crate::encoding::EncodingGuess;
use crate::error::EncfileError;

/// Receives notifications about accessor operations.
///
/// All methods have no-op defaults so implementations subscribe only to the
/// events they care about.
pub trait AccessReporter: Send + Sync {
    /// An operation is about to touch `path`.
    fn operation_started(&self, operation: &str, path: &Path) {
        let _ = (operation, path);
    }

    /// Detection produced a guess for `path`.
    fn encoding_detected(&self, path: &Path, guess: &EncodingGuess) {
        let _ = (path, guess);
    }

    /// An operation failed; the same error is returned to the caller.
    fn operation_failed(&self, operation: &str, path: &Path, error: &EncfileError) {
        let _ = (operation, path, error);
    }
}

/// Default reporter forwarding to the `log` facade.
#[derive(Debug, Default)]
pub struct LogReporter;

impl AccessReporter for LogReporter {
    fn operation_started(&self, operation: &str, path: &Path) {
        log::debug!("{operation}: {}", path.display());
    }

    fn encoding_detected(&self, path: &Path, guess: &EncodingGuess) {
        log::info!(
            "detected {} (confidence {:.2}) for {}",
            guess.encoding,
            guess.confidence,
            path.display()
        );
    }

    fn operation_failed(&self, operation: &str, path: &Path, error: &EncfileError) {
        log::warn!("{operation} failed for {}: {error}", path.display());
    }
}

/// Reporter that discards every event.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl AccessReporter for SilentReporter {}
