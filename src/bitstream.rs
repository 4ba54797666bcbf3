//! Bit packing for encoded payloads.
//!
//! Layout, most significant bit first:
//!
//! ```text
//! [extra: 8 bits][payload bits][extra zero bits]
//! ```
//!
//! `extra` is always in `1..=8`: a payload that is already byte aligned still
//! gets a full byte of padding.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::codes::{CodeTable, render};
use crate::error::{HuffError, Result};

/// Number of zero bits appended after a payload of `payload_len` bits.
pub fn padding_for(payload_len: usize) -> u8 {
    (8 - payload_len % 8) as u8
}

/// Packs payload bits behind the padding header.
pub fn pack_payload(payload: &[bool]) -> Result<Vec<u8>> {
    let extra = padding_for(payload.len());
    let mut output = Vec::with_capacity(1 + (payload.len() + extra as usize) / 8);
    output.push(extra);
    {
        let mut writer = BitWriter::endian(&mut output, BigEndian);
        for &bit in payload {
            writer.write_bit(bit)?;
        }
        for _ in 0..extra {
            writer.write_bit(false)?;
        }
        debug_assert!(writer.byte_aligned());
    }
    Ok(output)
}

/// Strips the header and padding, returning the payload bits.
pub fn unpack_payload(bytes: &[u8]) -> Result<Vec<bool>> {
    let (&extra, body) = bytes
        .split_first()
        .ok_or_else(|| HuffError::malformed("missing padding header"))?;
    if !(1..=8).contains(&extra) {
        return Err(HuffError::malformed(format!(
            "padding count {extra} outside 1..=8"
        )));
    }
    let payload_len = (body.len() * 8)
        .checked_sub(extra as usize)
        .ok_or_else(|| {
            HuffError::malformed(format!(
                "{} payload bytes cannot hold {extra} padding bits",
                body.len()
            ))
        })?;

    let mut reader = BitReader::endian(Cursor::new(body), BigEndian);
    let mut payload = Vec::with_capacity(payload_len);
    for _ in 0..payload_len {
        payload.push(reader.read_bit()?);
    }
    for _ in 0..extra {
        if reader.read_bit()? {
            return Err(HuffError::malformed("non-zero padding bit"));
        }
    }
    Ok(payload)
}

pub fn encode(text: &str, table: &CodeTable) -> Result<Vec<u8>> {
    let mut payload = Vec::with_capacity(text.len() * table.max_code_len());
    for symbol in text.chars() {
        let code = table
            .code(symbol)
            .ok_or(HuffError::UnknownSymbol(symbol))?;
        payload.extend_from_slice(code);
    }
    pack_payload(&payload)
}

/// Greedily matches payload bits against the reverse table.
pub fn decode(bytes: &[u8], table: &CodeTable) -> Result<String> {
    let payload = unpack_payload(bytes)?;

    let mut decoded = String::new();
    let mut candidate = Vec::with_capacity(table.max_code_len());
    for bit in payload {
        candidate.push(bit);
        if let Some(symbol) = table.symbol(&candidate) {
            decoded.push(symbol);
            candidate.clear();
        } else if candidate.len() >= table.max_code_len() {
            return Err(HuffError::malformed(format!(
                "bits {} match no code",
                render(&candidate)
            )));
        }
    }
    if !candidate.is_empty() {
        return Err(HuffError::malformed(format!(
            "payload ends inside a code ({})",
            render(&candidate)
        )));
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::count_symbols;
    use crate::tree::MergeTree;

    fn table_for(text: &str) -> CodeTable {
        CodeTable::from_tree(&MergeTree::build(&count_symbols(text)).unwrap())
    }

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn packs_seven_bits_with_one_bit_of_padding() {
        let packed = pack_payload(&bits("1010101")).unwrap();
        assert_eq!(packed, vec![0x01, 0xAA]);
        assert_eq!(unpack_payload(&packed).unwrap(), bits("1010101"));
    }

    #[test]
    fn aligned_payload_gets_a_full_pad_byte() {
        assert_eq!(padding_for(16), 8);
        let packed = pack_payload(&bits("11110000")).unwrap();
        assert_eq!(packed, vec![0x08, 0xF0, 0x00]);
    }

    #[test]
    fn padding_is_always_between_one_and_eight() {
        for len in 0..64 {
            let extra = padding_for(len) as usize;
            assert!((1..=8).contains(&extra));
            assert_eq!((len + extra) % 8, 0);
        }
    }

    #[test]
    fn encodes_and_decodes_text() {
        let text = "it was the best of times, it was the worst of times";
        let table = table_for(text);
        let encoded = encode(text, &table).unwrap();
        assert_eq!(decode(&encoded, &table).unwrap(), text);
    }

    #[test]
    fn single_symbol_text_decodes() {
        let table = table_for("aaaa");
        let encoded = encode("aaaa", &table).unwrap();
        assert_eq!(encoded, vec![0x04, 0x00]);
        assert_eq!(decode(&encoded, &table).unwrap(), "aaaa");
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        let table = table_for("abc");
        assert!(matches!(
            encode("abz", &table),
            Err(HuffError::UnknownSymbol('z'))
        ));
    }

    #[test]
    fn rejects_bad_headers() {
        let table = table_for("abc");
        for bytes in [&[][..], &[0x00, 0xFF][..], &[0x09, 0xFF][..], &[0x03][..]] {
            assert!(
                matches!(decode(bytes, &table), Err(HuffError::MalformedBitstream(_))),
                "{bytes:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_set_padding_bits() {
        let table = table_for("aaaa");
        assert!(matches!(
            decode(&[0x04, 0x01], &table),
            Err(HuffError::MalformedBitstream(_))
        ));
    }

    #[test]
    fn rejects_payload_ending_mid_code() {
        // "abcc": c=0, a=10, b=11. The trailing "1" stops inside a code.
        let table = table_for("abcc");
        let packed = pack_payload(&bits("01")).unwrap();
        assert!(matches!(
            decode(&packed, &table),
            Err(HuffError::MalformedBitstream(_))
        ));
    }

    #[test]
    fn rejects_bits_that_match_no_code() {
        let table = table_for("aaaa");
        let packed = pack_payload(&bits("01")).unwrap();
        assert!(matches!(
            decode(&packed, &table),
            Err(HuffError::MalformedBitstream(_))
        ));
    }
}
