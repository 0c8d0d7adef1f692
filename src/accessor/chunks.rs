//! Lazy chunked reads of decoded text.

use std::fs::File;
use std::io::Read;

use crate::encoding::codec::ByteOrder;
use crate::encoding::TextEncoding;
use crate::error::{EncfileError, Result};

/// Iterator yielding decoded text segments of bounded size.
///
/// Each `next` call requests up to `chunk_size` bytes from the underlying
/// file. Bytes that end inside a multi-byte sequence are carried into the
/// following read, so every yielded segment is complete, valid text and the
/// in-order concatenation of all segments equals the file's full decoded
/// content.
///
/// The sequence is finite and non-restartable. A zero-byte read ends it;
/// carry bytes still pending at that point are an encoding failure. The
/// handle is released when the iterator is exhausted, fails, or is dropped.
/// After yielding an error the iterator fuses.
#[derive(Debug)]
pub struct ChunkReader {
    file: Option<File>,
    encoding: TextEncoding,
    buf: Vec<u8>,
    carry: Vec<u8>,
}

impl ChunkReader {
    pub(crate) fn new(file: File, encoding: TextEncoding, chunk_size: usize) -> Self {
        // a zero-byte request could never make progress
        let chunk_size = chunk_size.max(1);
        ChunkReader {
            file: Some(file),
            encoding,
            buf: vec![0u8; chunk_size],
            carry: Vec::new(),
        }
    }

    /// Drain the iterator into a vector, stopping at the first error.
    pub fn collect_chunks(self) -> Result<Vec<String>> {
        self.collect()
    }

    fn finish(&mut self, item: Result<String>) -> Option<Result<String>> {
        self.file = None;
        Some(item)
    }
}

impl Iterator for ChunkReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let file = self.file.as_mut()?;

            let read = match file.read(&mut self.buf) {
                Ok(n) => n,
                Err(e) => {
                    return self.finish(Err(EncfileError::io("failed to read chunk", e)));
                }
            };

            if read == 0 {
                self.file = None;
                if self.carry.is_empty() {
                    return None;
                }
                return Some(Err(EncfileError::encoding(
                    "input ended inside a multi-byte sequence",
                )));
            }

            self.carry.extend_from_slice(&self.buf[..read]);

            let prefix = match decodable_prefix(&self.carry, self.encoding) {
                Ok(len) => len,
                Err(e) => return self.finish(Err(e)),
            };
            if prefix == 0 {
                // not enough bytes yet to complete a sequence
                continue;
            }

            let rest = self.carry.split_off(prefix);
            let chunk_bytes = std::mem::replace(&mut self.carry, rest);

            return match self.encoding.decode(&chunk_bytes) {
                Ok(text) => Some(Ok(text)),
                Err(e) => self.finish(Err(e)),
            };
        }
    }
}

/// Byte length of the longest prefix of `bytes` that decodes to complete
/// text in `encoding`, or an error for input that can never decode.
fn decodable_prefix(bytes: &[u8], encoding: TextEncoding) -> Result<usize> {
    match encoding {
        // single-byte encodings never split a character
        TextEncoding::Ascii | TextEncoding::Latin1 | TextEncoding::Windows1252 => Ok(bytes.len()),
        TextEncoding::Utf8 => match std::str::from_utf8(bytes) {
            Ok(_) => Ok(bytes.len()),
            Err(e) if e.error_len().is_none() => Ok(e.valid_up_to()),
            Err(e) => Err(EncfileError::encoding(format!(
                "invalid utf-8 sequence at offset {}",
                e.valid_up_to()
            ))),
        },
        TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
            let order = match encoding {
                TextEncoding::Utf16Le => ByteOrder::Little,
                _ => ByteOrder::Big,
            };
            let mut len = bytes.len() & !1;
            if len >= 2 {
                let pair = [bytes[len - 2], bytes[len - 1]];
                let unit = match order {
                    ByteOrder::Little => u16::from_le_bytes(pair),
                    ByteOrder::Big => u16::from_be_bytes(pair),
                };
                // hold back a trailing high surrogate until its partner arrives
                if (0xD800..=0xDBFF).contains(&unit) {
                    len -= 2;
                }
            }
            Ok(len)
        }
    }
}
