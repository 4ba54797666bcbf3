use tracing::debug;

use crate::bitstream;
use crate::codes::CodeTable;
use crate::error::{HuffError, Result};
use crate::frequency::{FrequencyMap, count_symbols};
use crate::tree::MergeTree;

/// State produced by analyzing one text: its frequencies and the code
/// derived from them. Raw artifacts carry no table, so only the session that
/// encoded them can decode them.
#[derive(Debug, Clone)]
pub struct Session {
    frequencies: FrequencyMap,
    table: CodeTable,
}

impl Session {
    pub fn analyze(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(HuffError::EmptyInput);
        }
        Self::from_frequencies(count_symbols(text))
    }

    /// Rebuilds a session from a frequency table. The tie-break is
    /// deterministic, so the same table always yields the same code.
    pub fn from_frequencies(frequencies: FrequencyMap) -> Result<Self> {
        let tree = MergeTree::build(&frequencies)?;
        let table = CodeTable::from_tree(&tree);
        debug!(
            symbols = table.len(),
            max_code_len = table.max_code_len(),
            "code table derived"
        );
        Ok(Session { frequencies, table })
    }

    pub fn compress(&self, text: &str) -> Result<Vec<u8>> {
        if text.is_empty() {
            return Err(HuffError::EmptyInput);
        }
        bitstream::encode(text, &self.table)
    }

    pub fn decompress(&self, bytes: &[u8]) -> Result<String> {
        bitstream::decode(bytes, &self.table)
    }

    pub fn frequencies(&self) -> &FrequencyMap {
        &self.frequencies
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Number of symbols the analyzed text held.
    pub fn symbol_count(&self) -> u64 {
        self.frequencies.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_within_a_session() {
        let text = "peter piper picked a peck of pickled peppers";
        let session = Session::analyze(text).unwrap();
        let packed = session.compress(text).unwrap();
        assert_eq!(session.decompress(&packed).unwrap(), text);
        assert_eq!(session.symbol_count(), text.chars().count() as u64);
    }

    #[test]
    fn sessions_are_independent() {
        let first = Session::analyze("aaab").unwrap();
        let second = Session::analyze("xyz").unwrap();
        assert!(matches!(
            second.compress("aaab"),
            Err(HuffError::UnknownSymbol('a'))
        ));
        assert_eq!(first.table().len(), 2);
        assert_eq!(second.table().len(), 3);
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(Session::analyze(""), Err(HuffError::EmptyInput)));
        let session = Session::analyze("abc").unwrap();
        assert!(matches!(session.compress(""), Err(HuffError::EmptyInput)));
    }
}
