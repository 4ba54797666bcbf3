use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::driver::Report;
use crate::error::Result;

/// One line of the activity journal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub timestamp: String,
    pub action: String,
    pub source: String,
    pub artifact: String,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl JournalEntry {
    pub fn new(action: &str, report: &Report) -> Self {
        JournalEntry {
            timestamp: Utc::now().to_rfc3339(),
            action: action.to_string(),
            source: report.source.display().to_string(),
            artifact: report.artifact.display().to_string(),
            bytes_in: report.bytes_in,
            bytes_out: report.bytes_out,
        }
    }
}

pub fn append(path: &Path, entry: &JournalEntry) -> Result<()> {
    let json = serde_json::to_string(entry)?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", json)?;
    Ok(())
}

pub fn read_entries(path: &Path) -> Result<Vec<JournalEntry>> {
    let contents = fs::read_to_string(path)?;
    let mut entries = Vec::new();
    for line in contents.lines().filter(|line| !line.trim().is_empty()) {
        entries.push(serde_json::from_str(line)?);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn appends_one_json_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.log");
        let report = Report {
            source: PathBuf::from("notes.txt"),
            artifact: PathBuf::from("notes.huf"),
            bytes_in: 120,
            bytes_out: 64,
        };

        append(&path, &JournalEntry::new("compress", &report)).unwrap();
        append(&path, &JournalEntry::new("decompress", &report)).unwrap();

        let entries = read_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "compress");
        assert_eq!(entries[1].action, "decompress");
        assert_eq!(entries[0].artifact, "notes.huf");
        assert_eq!(entries[0].bytes_out, 64);
        assert!(chrono::DateTime::parse_from_rfc3339(&entries[0].timestamp).is_ok());
    }
}
