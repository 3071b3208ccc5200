use std::io::Read;
use std::path::PathBuf;

use serde_json::Value;

/// Supplies the raw pending-set snapshot delivered by the intake process.
pub trait SnapshotSource {
    fn load_snapshot(&self) -> Result<Value, String>;
}

pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn load_snapshot(&self) -> Result<Value, String> {
        let text = std::fs::read_to_string(&self.path).map_err(|error| {
            format!("failed to read snapshot '{}': {error}", self.path.display())
        })?;
        parse_snapshot_text(&text)
    }
}

pub struct StdinSnapshotSource;

impl SnapshotSource for StdinSnapshotSource {
    fn load_snapshot(&self) -> Result<Value, String> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|error| format!("failed to read snapshot from stdin: {error}"))?;
        parse_snapshot_text(&text)
    }
}

fn parse_snapshot_text(text: &str) -> Result<Value, String> {
    serde_json::from_str(text).map_err(|error| format!("Malformed JSON snapshot: {error}"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn file_source_reads_json() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"[{{"id":"r1","arrival_time":1,"announce_time":2}}]"#).expect("write");

        let value = FileSnapshotSource::new(file.path())
            .load_snapshot()
            .expect("snapshot should load");
        assert_eq!(value[0]["id"], "r1");
    }

    #[test]
    fn file_source_reports_missing_file() {
        let error = FileSnapshotSource::new("/nonexistent/carline/snapshot.json")
            .load_snapshot()
            .expect_err("missing file should fail");
        assert!(error.starts_with("failed to read snapshot"));
    }

    #[test]
    fn file_source_rejects_invalid_json() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");

        let error = FileSnapshotSource::new(file.path())
            .load_snapshot()
            .expect_err("invalid json should fail");
        assert!(error.starts_with("Malformed JSON snapshot"));
    }
}
