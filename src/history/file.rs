use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::HistoryPersistence;
use crate::model::HistoryRecord;

/// Stores the whole history as one pretty-printed JSON array.
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryPersistence for JsonFilePersistence {
    fn load(&self) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read history file: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<HistoryRecord> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse history JSON: {}", self.path.display()))?;
        Ok(records)
    }

    fn save(&self, records: &[HistoryRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create history directory: {}", parent.display())
            })?;
        }
        let content = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write history file: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CopyVariant;
    use crate::model::input::sample_input;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = JsonFilePersistence::new(dir.path().join("copy-history.json"));
        assert!(persistence.load().unwrap().is_empty());
    }

    #[test]
    fn loading_leaves_missing_data_dir_uncreated() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("not-yet-created");
        let persistence = JsonFilePersistence::new(data_dir.join("copy-history.json"));
        assert!(persistence.load().unwrap().is_empty());
        assert!(!data_dir.exists());
    }

    #[test]
    fn saves_and_reloads_records() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = JsonFilePersistence::new(dir.path().join("nested/copy-history.json"));
        let record = HistoryRecord::new(
            sample_input(),
            vec![CopyVariant::new("t", "c", vec!["a".into()], vec!["x".into()])],
        )
        .unwrap();
        persistence.save(std::slice::from_ref(&record)).unwrap();
        assert_eq!(persistence.load().unwrap(), vec![record]);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copy-history.json");
        fs::write(&path, "{not json").unwrap();
        assert!(JsonFilePersistence::new(path).load().is_err());
    }
}
