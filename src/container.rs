//! Self-describing artifact: the frequency table travels with the bits.
//!
//! ```text
//! [table_len: u32 LE][bincode(FrequencyMap): table_len bytes][padded bitstream]
//! ```

use std::io::{self, Read};

use tracing::debug;

use crate::error::{HuffError, Result};
use crate::frequency::FrequencyMap;
use crate::session::Session;

pub fn pack(text: &str) -> Result<Vec<u8>> {
    let session = Session::analyze(text)?;
    let header = bincode::serialize(session.frequencies())?;
    let body = session.compress(text)?;

    let table_len = u32::try_from(header.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "frequency table too large"))?;
    let mut final_data = Vec::with_capacity(4 + header.len() + body.len());
    final_data.extend_from_slice(&table_len.to_le_bytes());
    final_data.extend_from_slice(&header);
    final_data.extend_from_slice(&body);

    debug!(table_bytes = header.len(), body_bytes = body.len(), "container packed");
    Ok(final_data)
}

pub fn unpack(data: &[u8]) -> Result<String> {
    let mut reader = io::Cursor::new(data);

    let mut header_len_buf = [0u8; 4];
    reader
        .read_exact(&mut header_len_buf)
        .map_err(|_| HuffError::malformed("truncated table length"))?;
    let header_len = u32::from_le_bytes(header_len_buf) as usize;

    let body = &data[4..];
    if header_len > body.len() {
        return Err(HuffError::malformed(format!(
            "table length {header_len} exceeds {} remaining bytes",
            body.len()
        )));
    }
    let (header, bits) = body.split_at(header_len);

    let frequencies: FrequencyMap = bincode::deserialize(header)
        .map_err(|e| HuffError::malformed(format!("unreadable frequency table: {e}")))?;
    let expected = validate(&frequencies)?;

    let session = Session::from_frequencies(frequencies)?;
    let text = session.decompress(bits)?;

    let decoded = text.chars().count() as u64;
    if decoded != expected {
        return Err(HuffError::malformed(format!(
            "decoded {decoded} symbols, table promises {expected}"
        )));
    }
    Ok(text)
}

// Returns the total symbol count the table promises.
fn validate(frequencies: &FrequencyMap) -> Result<u64> {
    if frequencies.is_empty() {
        return Err(HuffError::malformed("empty frequency table"));
    }
    let mut total: u64 = 0;
    for (symbol, &freq) in frequencies {
        if freq == 0 {
            return Err(HuffError::malformed(format!("symbol {symbol:?} has zero frequency")));
        }
        total = total
            .checked_add(freq)
            .ok_or_else(|| HuffError::malformed("frequency total overflows"))?;
    }
    Ok(total)
}
