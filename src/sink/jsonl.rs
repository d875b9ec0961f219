//! JSON-lines dataset sink

use crate::sink::{DatasetEntry, Sink, SinkResult};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Appends one JSON object per line to a dataset file
///
/// The file handle lives behind a mutex so concurrent page handlers never
/// interleave partial lines.
pub struct JsonlSink {
    file: Mutex<File>,
}

impl JsonlSink {
    /// Opens the dataset file for appending, creating it if needed
    pub fn new(path: &Path) -> SinkResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl Sink for JsonlSink {
    fn emit(&self, entry: &DatasetEntry) -> SinkResult<()> {
        let line = serde_json::to_string(entry)?;
        let mut file = self.file.lock().unwrap();
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{DebugRecord, HotelRecord};
    use tempfile::NamedTempFile;

    #[test]
    fn test_emit_writes_one_line_per_entry() {
        let file = NamedTempFile::new().unwrap();
        let sink = JsonlSink::new(file.path()).unwrap();

        sink.emit(&DatasetEntry::Hotel(HotelRecord {
            name: Some("Hotel A".to_string()),
            url: "https://www.hrs.com/h-1".to_string(),
            ..Default::default()
        }))
        .unwrap();
        sink.emit(&DatasetEntry::Debug {
            debug: DebugRecord {
                url: "https://www.hrs.com/broken".to_string(),
                retry_count: 2,
                error_message: "timeout".to_string(),
                failed_at: "2024-01-01T00:00:00Z".to_string(),
            },
        })
        .unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        // Every line parses back as a standalone JSON object
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(first["name"], "Hotel A");
        assert!(second.as_object().unwrap().contains_key("#debug"));
    }

    #[test]
    fn test_reopening_appends() {
        let file = NamedTempFile::new().unwrap();

        for _ in 0..2 {
            let sink = JsonlSink::new(file.path()).unwrap();
            sink.emit(&DatasetEntry::Hotel(HotelRecord {
                url: "https://www.hrs.com/h-1".to_string(),
                ..Default::default()
            }))
            .unwrap();
        }

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
