//! Per-encoding encode and decode routines.
//!
//! Ascii and the latin family are single-byte encodings; utf-16 comes in both
//! byte orders without a BOM. Decoding never substitutes replacement
//! characters: malformed input is an error.

use crate::error::{EncfileError, Result};

/// Byte order for the utf-16 codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

pub(crate) fn encode_ascii(text: &str) -> Result<Vec<u8>> {
    if let Some(ch) = text.chars().find(|ch| !ch.is_ascii()) {
        return Err(EncfileError::encoding(format!(
            "character '{ch}' (U+{:04X}) not representable in ascii",
            ch as u32
        )));
    }
    Ok(text.as_bytes().to_vec())
}

pub(crate) fn decode_ascii(bytes: &[u8]) -> Result<String> {
    match bytes.iter().position(|&b| b >= 0x80) {
        Some(pos) => Err(EncfileError::encoding(format!(
            "byte 0x{:02X} at offset {pos} is outside the ascii range",
            bytes[pos]
        ))),
        None => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

pub(crate) fn decode_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|err| {
        let pos = err.utf8_error().valid_up_to();
        EncfileError::encoding(format!("invalid utf-8 sequence at offset {pos}"))
    })
}

pub(crate) fn encode_utf16(text: &str, order: ByteOrder) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        let pair = match order {
            ByteOrder::Little => unit.to_le_bytes(),
            ByteOrder::Big => unit.to_be_bytes(),
        };
        bytes.extend_from_slice(&pair);
    }
    bytes
}

pub(crate) fn decode_utf16(bytes: &[u8], order: ByteOrder) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(EncfileError::encoding(format!(
            "utf-16 input has odd length {}",
            bytes.len()
        )));
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| match order {
            ByteOrder::Little => u16::from_le_bytes([pair[0], pair[1]]),
            ByteOrder::Big => u16::from_be_bytes([pair[0], pair[1]]),
        })
        .collect();

    String::from_utf16(&units)
        .map_err(|_| EncfileError::encoding("utf-16 input contains an unpaired surrogate"))
}

pub(crate) fn encode_latin1(text: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let code = ch as u32;
        if code > 0xFF {
            return Err(EncfileError::encoding(format!(
                "character '{ch}' (U+{code:04X}) not representable in latin-1"
            )));
        }
        bytes.push(code as u8);
    }
    Ok(bytes)
}

/// Latin-1 maps every byte directly to the matching Unicode scalar.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

pub(crate) fn encode_windows1252(text: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match char_to_windows1252(ch) {
            Some(byte) => bytes.push(byte),
            None => {
                return Err(EncfileError::encoding(format!(
                    "character '{ch}' (U+{:04X}) not representable in windows-1252",
                    ch as u32
                )))
            }
        }
    }
    Ok(bytes)
}

pub(crate) fn decode_windows1252(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| windows1252_to_char(b)).collect()
}

/// Convert a Windows-1252 byte to its Unicode character.
fn windows1252_to_char(byte: u8) -> char {
    match byte {
        // 0x80..=0x9F differs from latin-1; unassigned slots keep the C1 controls
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => char::from(byte),
    }
}

/// Reverse mapping for encode; None for characters outside the code page.
fn char_to_windows1252(ch: char) -> Option<u8> {
    let code = ch as u32;
    if code < 0x80 {
        return Some(code as u8);
    }
    let byte = match ch {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        // Unassigned control slots and the 0xA0..=0xFF latin-1 block
        _ if (0x81..=0x9F).contains(&code) && !is_windows1252_remapped(code) => code as u8,
        _ if (0xA0..=0xFF).contains(&code) => code as u8,
        _ => return None,
    };
    Some(byte)
}

/// True for C1 positions that Windows-1252 reassigns to printable characters.
fn is_windows1252_remapped(code: u32) -> bool {
    !matches!(code, 0x81 | 0x8D | 0x8F | 0x90 | 0x9D)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_rejects_non_ascii() {
        let err = encode_ascii("héllo").unwrap_err();
        assert!(err.is_encoding());
        assert!(err.to_string().contains("U+00E9"));

        let err = decode_ascii(&[0x48, 0x69, 0xC3]).unwrap_err();
        assert!(err.to_string().contains("offset 2"));
    }

    #[test]
    fn test_utf16_round_trip_both_orders() {
        let text = "Hi \u{4E16}\u{754C} \u{1F600}";
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let bytes = encode_utf16(text, order);
            assert_eq!(decode_utf16(&bytes, order).unwrap(), text);
        }
    }

    #[test]
    fn test_utf16_odd_length_is_error() {
        let err = decode_utf16(&[0x48, 0x00, 0x69], ByteOrder::Little).unwrap_err();
        assert!(err.to_string().contains("odd length"));
    }

    #[test]
    fn test_utf16_unpaired_surrogate_is_error() {
        // lone high surrogate 0xD800
        let err = decode_utf16(&[0x00, 0xD8], ByteOrder::Little).unwrap_err();
        assert!(err.to_string().contains("surrogate"));
    }

    #[test]
    fn test_latin1_round_trip() {
        let bytes = [0x48, 0x65, 0x6C, 0x6C, 0x6F, 0xA9, 0xAE];
        let text = decode_latin1(&bytes);
        assert_eq!(text, "Hello\u{A9}\u{AE}");
        assert_eq!(encode_latin1(&text).unwrap(), bytes);
    }

    #[test]
    fn test_latin1_rejects_wide_chars() {
        assert!(encode_latin1("\u{20AC}").unwrap_err().is_encoding());
    }

    #[test]
    fn test_windows1252_euro_and_quotes() {
        let text = decode_windows1252(&[0x80, 0x93, 0x61, 0x94]);
        assert_eq!(text, "\u{20AC}\u{201C}a\u{201D}");
        assert_eq!(
            encode_windows1252(&text).unwrap(),
            vec![0x80, 0x93, 0x61, 0x94]
        );
    }

    #[test]
    fn test_windows1252_unassigned_slots_round_trip() {
        for byte in [0x81u8, 0x8D, 0x8F, 0x90, 0x9D] {
            let text = decode_windows1252(&[byte]);
            assert_eq!(encode_windows1252(&text).unwrap(), vec![byte]);
        }
    }

    #[test]
    fn test_invalid_utf8_reports_offset() {
        let err = decode_utf8(&[0x61, 0x62, 0xFF]).unwrap_err();
        assert!(err.to_string().contains("offset 2"));
    }
}
