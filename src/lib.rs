//! # encfile - Encoding-Aware File Access
//!
//! A small library for reading and writing text files when the encoding
//! matters: explicit encodings on write, heuristic detection on read, and
//! bounded chunked reads for large inputs.
//!
//! ## Features
//!
//! - **Explicit encodings**: write, append and read with a named encoding
//!   from a closed supported set (utf-8, ascii, utf-16, latin-1,
//!   windows-1252)
//! - **Heuristic detection**: BOM and byte-pattern based encoding guesses
//!   with confidence scores, no correctness guarantee
//! - **Chunked reads**: lazy, bounded-size decoded segments that never split
//!   a multi-byte character
//! - **Explicit failures**: every operation returns a closed error taxonomy
//!   (I/O failure or encoding failure) instead of collapsing to empty values
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`encoding`] - Supported encodings, codecs and detection
//! - [`accessor`] - The file operations themselves
//! - [`report`] - Injectable narration decoupled from results

// Core modules
pub mod accessor;
pub mod encoding;
pub mod error;
pub mod report;

// Re-export commonly used types for convenience
pub use accessor::{AccessorConfig, ChunkReader, EncodedFileAccessor};
pub use encoding::{detect_encoding, EncodingGuess, TextEncoding};
pub use error::{EncfileError, Result};
pub use report::{AccessReporter, LogReporter, SilentReporter};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
