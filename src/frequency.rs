use std::collections::BTreeMap;

use crate::error::{HuffError, Result};

/// Occurrence count per symbol. Ordered so that tree building and the
/// serialized table come out the same on every run.
pub type FrequencyMap = BTreeMap<char, u64>;

/// Trims trailing whitespace so a final newline does not become a symbol of
/// its own. Fails when nothing is left.
pub fn prepare_text(raw: &str) -> Result<&str> {
    let text = raw.trim_end();
    if text.is_empty() {
        return Err(HuffError::EmptyInput);
    }
    Ok(text)
}

pub fn count_symbols(text: &str) -> FrequencyMap {
    let mut freq_map = FrequencyMap::new();
    for symbol in text.chars() {
        *freq_map.entry(symbol).or_insert(0) += 1;
    }
    freq_map
}
