//! Text encodings supported by the accessor.
//!
//! The supported set is closed: an operation either names one of these
//! encodings (by value or by label such as `"utf-8"`) or fails with an
//! encoding error. Each encoding knows how to encode text into bytes and
//! decode bytes back into text; heuristic detection lives in [`detect`].

use std::fmt;
use std::str::FromStr;

use crate::error::{EncfileError, Result};

pub mod codec;
pub mod detect;

pub use detect::{detect_encoding, EncodingGuess};

/// The closed set of text encodings the accessor can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Ascii,
    Utf16Le,
    Utf16Be,
    Latin1,
    Windows1252,
}

impl TextEncoding {
    /// Canonical label for this encoding, matching what detection reports.
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Ascii => "ascii",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Windows1252 => "windows-1252",
        }
    }

    /// Parse a label such as `"utf-8"`, `"iso-8859-1"` or `"cp1252"`.
    ///
    /// Labels are matched case-insensitively. Unknown labels are an encoding
    /// failure, not a fallback to a default.
    pub fn from_label(label: &str) -> Result<Self> {
        match label.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            "utf-16le" | "utf-16-le" | "utf16le" => Ok(TextEncoding::Utf16Le),
            "utf-16be" | "utf-16-be" | "utf16be" => Ok(TextEncoding::Utf16Be),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            "windows-1252" | "cp1252" => Ok(TextEncoding::Windows1252),
            other => Err(EncfileError::encoding(format!(
                "unsupported encoding label: {other}"
            ))),
        }
    }

    /// Encode text into this encoding's byte representation.
    ///
    /// Fails with an encoding error if `text` contains a character the
    /// encoding cannot represent; the message names the offending character.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Ascii => codec::encode_ascii(text),
            TextEncoding::Utf16Le => Ok(codec::encode_utf16(text, codec::ByteOrder::Little)),
            TextEncoding::Utf16Be => Ok(codec::encode_utf16(text, codec::ByteOrder::Big)),
            TextEncoding::Latin1 => codec::encode_latin1(text),
            TextEncoding::Windows1252 => codec::encode_windows1252(text),
        }
    }

    /// Decode bytes in this encoding into a String.
    ///
    /// Fails with an encoding error on malformed input (invalid sequences,
    /// odd lengths for utf-16, bytes outside the ascii range).
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Utf8 => codec::decode_utf8(bytes),
            TextEncoding::Ascii => codec::decode_ascii(bytes),
            TextEncoding::Utf16Le => codec::decode_utf16(bytes, codec::ByteOrder::Little),
            TextEncoding::Utf16Be => codec::decode_utf16(bytes, codec::ByteOrder::Big),
            TextEncoding::Latin1 => Ok(codec::decode_latin1(bytes)),
            TextEncoding::Windows1252 => Ok(codec::decode_windows1252(bytes)),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = EncfileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s)
    }
}
