//! Heuristic encoding detection over raw bytes.
//!
//! Detection is best effort and carries no correctness guarantee. The order
//! of checks matters: a byte order mark wins outright, then a utf-16 null
//! pattern scan (before the binary guard, which a BOM-less utf-16 file would
//! otherwise trip), then the binary guard, then utf-8 validation with a
//! latin fallback. Empty and binary-like input yields no guess at all.

use memchr::memchr_iter;

use crate::encoding::TextEncoding;

/// Bytes inspected by the heuristic scans. BOM detection and utf-8
/// validation look at the whole input; the ratio-based scans only need the
/// leading sample.
const SAMPLE_SIZE: usize = 1024;

/// Above this share of null bytes the input is treated as binary.
const MAX_NULL_RATIO: f64 = 0.1;

/// Above this share of control bytes (excluding tab, lf, cr) the input is
/// treated as binary.
const MAX_CONTROL_RATIO: f64 = 0.3;

/// A best-effort encoding guess with a confidence score in `0.0..=1.0`.
///
/// The guess is transient: it exists to pick a decode strategy for a single
/// read and is discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodingGuess {
    pub encoding: TextEncoding,
    pub confidence: f32,
}

/// Detect the text encoding of `bytes`.
///
/// Returns `None` when no guess can be made: empty input, or input that
/// looks binary (high null or control-byte ratios).
pub fn detect_encoding(bytes: &[u8]) -> Option<EncodingGuess> {
    if bytes.is_empty() {
        return None;
    }

    if let Some(bom) = detect_bom(bytes) {
        return Some(EncodingGuess {
            encoding: bom.encoding,
            confidence: 1.0,
        });
    }

    let sample = &bytes[..bytes.len().min(SAMPLE_SIZE)];

    if let Some(encoding) = detect_utf16_pattern(sample) {
        return Some(EncodingGuess {
            encoding,
            confidence: 0.7,
        });
    }

    if looks_binary(sample) {
        return None;
    }

    if is_valid_utf8(bytes) {
        if bytes.is_ascii() {
            return Some(EncodingGuess {
                encoding: TextEncoding::Ascii,
                confidence: 1.0,
            });
        }
        return Some(EncodingGuess {
            encoding: TextEncoding::Utf8,
            confidence: 0.99,
        });
    }

    // Not utf-8 but text-like: a single-byte latin encoding. Bytes in the
    // 0x80..=0x9F range separate windows-1252 from latin-1.
    let windows_specific = sample
        .iter()
        .filter(|&&b| (0x80..=0x9F).contains(&b))
        .count();
    if windows_specific > 0 {
        return Some(EncodingGuess {
            encoding: TextEncoding::Windows1252,
            confidence: 0.6,
        });
    }
    Some(EncodingGuess {
        encoding: TextEncoding::Latin1,
        confidence: 0.5,
    })
}

/// Result of BOM detection: the signalled encoding and the mark's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BomMatch {
    pub encoding: TextEncoding,
    pub length: usize,
}

/// Detect a byte order mark at the start of `bytes`.
pub(crate) fn detect_bom(bytes: &[u8]) -> Option<BomMatch> {
    if bytes.len() >= 3 && bytes[0] == 0xEF && bytes[1] == 0xBB && bytes[2] == 0xBF {
        return Some(BomMatch {
            encoding: TextEncoding::Utf8,
            length: 3,
        });
    }
    if bytes.len() >= 2 {
        if bytes[0] == 0xFF && bytes[1] == 0xFE {
            return Some(BomMatch {
                encoding: TextEncoding::Utf16Le,
                length: 2,
            });
        }
        if bytes[0] == 0xFE && bytes[1] == 0xFF {
            return Some(BomMatch {
                encoding: TextEncoding::Utf16Be,
                length: 2,
            });
        }
    }
    None
}

/// Length of a leading byte order mark, zero if there is none.
pub(crate) fn bom_length(bytes: &[u8]) -> usize {
    detect_bom(bytes).map_or(0, |bom| bom.length)
}

/// Detect BOM-less utf-16 from its characteristic null/data positions.
///
/// Text dominated by the basic latin range encodes as alternating data and
/// null bytes: nulls at odd offsets for little endian, even for big endian.
fn detect_utf16_pattern(sample: &[u8]) -> Option<TextEncoding> {
    if sample.len() < 32 {
        return None;
    }

    let mut even_null = 0usize;
    let mut odd_null = 0usize;
    let mut even_ascii = 0usize;
    let mut odd_ascii = 0usize;

    for (i, &b) in sample.iter().enumerate() {
        let (null, ascii) = if i % 2 == 0 {
            (&mut even_null, &mut even_ascii)
        } else {
            (&mut odd_null, &mut odd_ascii)
        };
        if b == 0 {
            *null += 1;
        } else if (32..=126).contains(&b) {
            *ascii += 1;
        }
    }

    let half = (sample.len() / 2) as f64;
    if odd_null as f64 / half > 0.85 && even_ascii as f64 / half > 0.4 {
        return Some(TextEncoding::Utf16Le);
    }
    if even_null as f64 / half > 0.85 && odd_ascii as f64 / half > 0.4 {
        return Some(TextEncoding::Utf16Be);
    }
    None
}

/// Binary guard: too many nulls or control bytes means no text guess.
fn looks_binary(sample: &[u8]) -> bool {
    let null_count = memchr_iter(0, sample).count();
    let control_count = sample
        .iter()
        .filter(|&&b| b < 32 && b != 0 && b != b'\t' && b != b'\n' && b != b'\r')
        .count();

    let len = sample.len() as f64;
    null_count as f64 / len > MAX_NULL_RATIO || control_count as f64 / len > MAX_CONTROL_RATIO
}

fn is_valid_utf8(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok()
}
