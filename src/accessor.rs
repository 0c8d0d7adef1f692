//! Encoding-aware file access operations.
//!
//! [`EncodedFileAccessor`] provides independent, stateless operations against
//! a path: truncating and exclusive writes, appends, whole-file and line
//! reads, detect-and-read, and bounded chunked reads. Each operation acquires
//! exactly one file handle for its own duration and releases it on every exit
//! path; nothing is cached between calls and no two operations share state.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::encoding::{detect, detect_encoding, TextEncoding};
use crate::error::{EncfileError, Result};
use crate::report::{AccessReporter, LogReporter};

pub mod chunks;

pub use chunks::ChunkReader;

/// Configuration record for accessor operations.
///
/// Defaults match the documented contract: utf-8 for non-detecting
/// operations and 1024-byte chunk reads.
#[derive(Debug, Clone, Copy)]
pub struct AccessorConfig {
    /// Encoding used by every operation that does not detect one.
    pub encoding: TextEncoding,
    /// Upper bound on the bytes requested per read in [`EncodedFileAccessor::read_chunks`].
    pub chunk_size: usize,
}

impl Default for AccessorConfig {
    fn default() -> Self {
        AccessorConfig {
            encoding: TextEncoding::Utf8,
            chunk_size: 1024,
        }
    }
}

/// Stateless encoding-aware file operations.
///
/// The accessor holds only its configuration and an injected reporter; the
/// target path is an argument to every call and is re-resolved per
/// operation.
pub struct EncodedFileAccessor {
    config: AccessorConfig,
    reporter: Box<dyn AccessReporter>,
}

impl Default for EncodedFileAccessor {
    fn default() -> Self {
        Self::new(AccessorConfig::default())
    }
}

impl EncodedFileAccessor {
    /// Create an accessor with the given configuration and the default
    /// log-backed reporter.
    pub fn new(config: AccessorConfig) -> Self {
        Self::with_reporter(config, Box::new(LogReporter))
    }

    /// Create an accessor with a custom reporter.
    pub fn with_reporter(config: AccessorConfig, reporter: Box<dyn AccessReporter>) -> Self {
        EncodedFileAccessor { config, reporter }
    }

    /// The configuration this accessor was built with.
    pub fn config(&self) -> &AccessorConfig {
        &self.config
    }

    /// Overwrite `path` with `content` in the configured encoding.
    pub fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.write_with_encoding(path, content, self.config.encoding)
    }

    /// Overwrite `path` with `content` in an explicit encoding.
    ///
    /// Content is encoded before the file is opened, so an unrepresentable
    /// character never leaves a truncated file behind.
    pub fn write_with_encoding(
        &self,
        path: &Path,
        content: &str,
        encoding: TextEncoding,
    ) -> Result<()> {
        self.reporter.operation_started("write", path);

        let bytes = encoding
            .encode(content)
            .map_err(|e| self.fail("write", path, e))?;

        let mut file = File::create(path).map_err(|e| {
            self.fail(
                "write",
                path,
                EncfileError::io(format!("failed to create {}", path.display()), e),
            )
        })?;
        file.write_all(&bytes).map_err(|e| {
            self.fail(
                "write",
                path,
                EncfileError::io(format!("failed to write {}", path.display()), e),
            )
        })
    }

    /// Append `content` followed by a newline, creating the file if absent.
    pub fn append(&self, path: &Path, content: &str) -> Result<()> {
        self.reporter.operation_started("append", path);

        let mut line = String::with_capacity(content.len() + 1);
        line.push_str(content);
        line.push('\n');
        let bytes = self
            .config
            .encoding
            .encode(&line)
            .map_err(|e| self.fail("append", path, e))?;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| {
                self.fail(
                    "append",
                    path,
                    EncfileError::io(format!("failed to open {} for append", path.display()), e),
                )
            })?;
        file.write_all(&bytes).map_err(|e| {
            self.fail(
                "append",
                path,
                EncfileError::io(format!("failed to append to {}", path.display()), e),
            )
        })
    }

    /// Create `path` exclusively and write `content`.
    ///
    /// Fails with an I/O error if the file already exists; the existing
    /// content is left untouched.
    pub fn create_new(&self, path: &Path, content: &str) -> Result<()> {
        self.reporter.operation_started("create", path);

        let bytes = self
            .config
            .encoding
            .encode(content)
            .map_err(|e| self.fail("create", path, e))?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| {
                self.fail(
                    "create",
                    path,
                    EncfileError::io(format!("failed to create new {}", path.display()), e),
                )
            })?;
        file.write_all(&bytes).map_err(|e| {
            self.fail(
                "create",
                path,
                EncfileError::io(format!("failed to write {}", path.display()), e),
            )
        })
    }

    /// Read `path` with heuristic encoding detection.
    ///
    /// Two-phase: the complete raw byte sequence is read first, then
    /// detection picks a decode strategy for it. A leading byte order mark
    /// is stripped before decoding. An empty file reads as the empty string;
    /// non-empty input the detector cannot classify is an encoding failure,
    /// never a silent default.
    pub fn read_detected(&self, path: &Path) -> Result<String> {
        self.reporter.operation_started("read-detected", path);

        let raw = std::fs::read(path).map_err(|e| {
            self.fail(
                "read-detected",
                path,
                EncfileError::io(format!("failed to read {}", path.display()), e),
            )
        })?;
        if raw.is_empty() {
            return Ok(String::new());
        }

        let guess = detect_encoding(&raw).ok_or_else(|| {
            self.fail(
                "read-detected",
                path,
                EncfileError::encoding(format!(
                    "could not determine an encoding for {}",
                    path.display()
                )),
            )
        })?;
        self.reporter.encoding_detected(path, &guess);

        let body = &raw[detect::bom_length(&raw)..];
        guess
            .encoding
            .decode(body)
            .map_err(|e| self.fail("read-detected", path, e))
    }

    /// Read the whole file decoded with the configured encoding.
    pub fn read_to_string(&self, path: &Path) -> Result<String> {
        self.reporter.operation_started("read", path);

        let raw = std::fs::read(path).map_err(|e| {
            self.fail(
                "read",
                path,
                EncfileError::io(format!("failed to read {}", path.display()), e),
            )
        })?;
        self.config
            .encoding
            .decode(&raw)
            .map_err(|e| self.fail("read", path, e))
    }

    /// Read the whole file and split it into lines without terminators.
    pub fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let content = self.read_to_string(path)?;
        Ok(content.lines().map(str::to_owned).collect())
    }

    /// Overwrite `path` with each line followed by a newline.
    pub fn write_lines<S: AsRef<str>>(&self, path: &Path, lines: &[S]) -> Result<()> {
        let mut content = String::new();
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }
        self.write(path, &content)
    }

    /// Read `path` as a lazy sequence of decoded text segments.
    ///
    /// Returns an iterator yielding up to `chunk_size` bytes of file content
    /// per segment, decoded with the configured encoding; see [`ChunkReader`]
    /// for the boundary-handling contract. Opening the file is the only
    /// eager step; failures after that are yielded as the iterator's final
    /// item so callers keep the segments produced before the failure.
    pub fn read_chunks(&self, path: &Path) -> Result<ChunkReader> {
        self.reporter.operation_started("read-chunks", path);

        let file = File::open(path).map_err(|e| {
            self.fail(
                "read-chunks",
                path,
                EncfileError::io(format!("failed to open {}", path.display()), e),
            )
        })?;
        Ok(ChunkReader::new(
            file,
            self.config.encoding,
            self.config.chunk_size,
        ))
    }

    /// Report a failure through the reporter and hand the error back.
    fn fail(&self, operation: &str, path: &Path, error: EncfileError) -> EncfileError {
        self.reporter.operation_failed(operation, path, &error);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn accessor() -> EncodedFileAccessor {
        EncodedFileAccessor::default()
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.txt");
        let accessor = accessor();

        accessor.write(&path, "Hello, world!\n").unwrap();
        assert_eq!(accessor.read_to_string(&path).unwrap(), "Hello, world!\n");
    }

    #[test]
    fn test_write_truncates_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.txt");
        let accessor = accessor();

        accessor.write(&path, "a much longer first version").unwrap();
        accessor.write(&path, "short").unwrap();
        assert_eq!(accessor.read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_write_with_encoding_latin1() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin.txt");
        let accessor = accessor();

        accessor
            .write_with_encoding(&path, "caf\u{E9}", TextEncoding::Latin1)
            .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"caf\xE9");
    }

    #[test]
    fn test_unencodable_content_fails_without_touching_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ascii.txt");
        let accessor = accessor();

        accessor.write(&path, "original").unwrap();
        let err = accessor
            .write_with_encoding(&path, "\u{4E16}\u{754C}", TextEncoding::Ascii)
            .unwrap_err();
        assert!(err.is_encoding());
        // the failed write must not have truncated the file
        assert_eq!(accessor.read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_append_creates_and_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        let accessor = accessor();

        accessor.append(&path, "first line").unwrap();
        accessor.append(&path, "second line").unwrap();
        assert_eq!(
            accessor.read_to_string(&path).unwrap(),
            "first line\nsecond line\n"
        );
    }

    #[test]
    fn test_create_new_refuses_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("once.txt");
        let accessor = accessor();

        accessor.create_new(&path, "created").unwrap();
        let err = accessor.create_new(&path, "clobbered").unwrap_err();
        assert!(err.is_io());
        assert_eq!(accessor.read_to_string(&path).unwrap(), "created");
    }

    #[test]
    fn test_read_detected_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.txt");
        let accessor = accessor();

        accessor.write(&path, "Hello, \u{4E16}\u{754C}!\n").unwrap();
        assert_eq!(
            accessor.read_detected(&path).unwrap(),
            "Hello, \u{4E16}\u{754C}!\n"
        );
    }

    #[test]
    fn test_read_detected_strips_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.txt");
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("with BOM".as_bytes());
        std::fs::write(&path, &bytes).unwrap();

        assert_eq!(accessor().read_detected(&path).unwrap(), "with BOM");
    }

    #[test]
    fn test_read_detected_latin1_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin.txt");
        std::fs::write(&path, b"un caf\xE9, deux caf\xE9s, trois caf\xE9s").unwrap();

        assert_eq!(
            accessor().read_detected(&path).unwrap(),
            "un caf\u{E9}, deux caf\u{E9}s, trois caf\u{E9}s"
        );
    }

    #[test]
    fn test_read_detected_empty_file_is_empty_string() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, b"").unwrap();

        assert_eq!(accessor().read_detected(&path).unwrap(), "");
    }

    #[test]
    fn test_read_detected_binary_is_encoding_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let err = accessor().read_detected(&path).unwrap_err();
        assert!(err.is_encoding());
    }

    #[test]
    fn test_missing_file_is_io_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.txt");

        let err = accessor().read_detected(&path).unwrap_err();
        assert!(err.is_io());

        let err = accessor().read_to_string(&path).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_write_into_missing_directory_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/sample.txt");

        let err = accessor().write(&path, "content").unwrap_err();
        assert!(err.is_io());
        assert!(!path.exists());
    }

    #[test]
    fn test_read_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lines.txt");
        let accessor = accessor();

        accessor.write(&path, "one\ntwo\nthree\n").unwrap();
        assert_eq!(accessor.read_lines(&path).unwrap(), ["one", "two", "three"]);
    }

    #[test]
    fn test_write_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lines.txt");
        let accessor = accessor();

        accessor
            .write_lines(&path, &["First line.", "Second line.", "Third line."])
            .unwrap();
        assert_eq!(
            accessor.read_to_string(&path).unwrap(),
            "First line.\nSecond line.\nThird line.\n"
        );
    }

    #[test]
    fn test_utf16_config_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wide.txt");
        let accessor = EncodedFileAccessor::new(AccessorConfig {
            encoding: TextEncoding::Utf16Le,
            ..AccessorConfig::default()
        });

        accessor.append(&path, "premi\u{E8}re").unwrap();
        accessor.append(&path, "seconde").unwrap();
        assert_eq!(
            accessor.read_to_string(&path).unwrap(),
            "premi\u{E8}re\nseconde\n"
        );
    }
}
