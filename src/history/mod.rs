mod file;
#[cfg(test)]
pub(crate) mod memory;
pub mod query;

use anyhow::{Result, anyhow};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::model::{CopyVariant, HistoryRecord};

pub use file::JsonFilePersistence;

/// Durable slot holding the whole history. Reads and writes replace the full
/// sequence.
pub trait HistoryPersistence: Send + Sync {
    fn load(&self) -> Result<Vec<HistoryRecord>>;

    fn save(&self, records: &[HistoryRecord]) -> Result<()>;
}

/// Most-recent-first log of successful generations.
pub struct HistoryStore {
    persistence: Box<dyn HistoryPersistence>,
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    /// Loads the persisted history. An unreadable slot starts empty instead of
    /// failing; it is only overwritten by the next mutation.
    pub fn open(persistence: Box<dyn HistoryPersistence>) -> Self {
        let records = match persistence.load() {
            Ok(records) => sanitize(records),
            Err(err) => {
                warn!("history could not be loaded, starting empty: {err:#}");
                Vec::new()
            }
        };
        debug!(count = records.len(), "history loaded");
        Self {
            persistence,
            records,
        }
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&HistoryRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn find_copy(&self, copy_id: &str) -> Option<&CopyVariant> {
        self.records
            .iter()
            .find_map(|record| record.find_copy(copy_id))
    }

    pub fn prepend(&mut self, record: HistoryRecord) -> Result<()> {
        if self.get(record.id()).is_some() {
            return Err(anyhow!("history record '{}' already exists", record.id()));
        }
        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());
        self.commit(next)?;
        info!(id = self.records[0].id(), "history record added");
        Ok(())
    }

    /// Removes the whole record. Returns false when no record has `id`.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        let next = self
            .records
            .iter()
            .filter(|record| record.id() != id)
            .cloned()
            .collect();
        self.commit(next)?;
        info!(id, "history record deleted");
        Ok(true)
    }

    /// Flips the favorite flag of the variant with `copy_id`, returning its new
    /// value, or `None` when no stored variant has that id.
    pub fn toggle_favorite(&mut self, copy_id: &str) -> Result<Option<bool>> {
        let mut next = self.records.clone();
        let Some(state) = next
            .iter_mut()
            .find_map(|record| record.toggle_favorite(copy_id))
        else {
            return Ok(None);
        };
        self.commit(next)?;
        debug!(copy_id, favorite = state, "favorite toggled");
        Ok(Some(state))
    }

    fn commit(&mut self, next: Vec<HistoryRecord>) -> Result<()> {
        self.persistence.save(&next)?;
        self.records = next;
        Ok(())
    }
}

fn sanitize(records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            if !record.is_well_formed() {
                warn!(id = record.id(), "dropping history record without outputs");
                return false;
            }
            if !seen.insert(record.id().to_string()) {
                warn!(id = record.id(), "dropping duplicate history record");
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::memory::MemoryPersistence;
    use super::*;
    use crate::model::input::sample_input;

    fn record(title: &str) -> HistoryRecord {
        HistoryRecord::new(
            sample_input(),
            vec![CopyVariant::new(title, "body", Vec::new(), Vec::new())],
        )
        .unwrap()
    }

    fn open(persistence: &Arc<MemoryPersistence>) -> HistoryStore {
        HistoryStore::open(Box::new(persistence.clone()))
    }

    #[test]
    fn prepends_most_recent_first_and_deletes_whole_records() {
        let persistence = Arc::new(MemoryPersistence::default());
        let mut store = open(&persistence);
        let r1 = record("first");
        let r2 = record("second");
        store.prepend(r1.clone()).unwrap();
        store.prepend(r2.clone()).unwrap();
        assert_eq!(store.records(), [r2.clone(), r1.clone()]);

        assert!(store.delete(r1.id()).unwrap());
        assert_eq!(store.records(), [r2.clone()]);
        assert!(!store.delete(r1.id()).unwrap());

        let reopened = open(&persistence);
        assert_eq!(reopened.records(), [r2]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let persistence = Arc::new(MemoryPersistence::default());
        let mut store = open(&persistence);
        let r1 = record("first");
        store.prepend(r1.clone()).unwrap();
        assert!(store.prepend(r1).is_err());
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn toggles_favorites_and_persists_every_mutation() {
        let persistence = Arc::new(MemoryPersistence::default());
        let mut store = open(&persistence);
        let r1 = record("first");
        let copy_id = r1.outputs()[0].id().to_string();
        store.prepend(r1).unwrap();

        assert_eq!(store.toggle_favorite(&copy_id).unwrap(), Some(true));
        assert!(open(&persistence).find_copy(&copy_id).unwrap().is_favorite());
        assert_eq!(store.toggle_favorite(&copy_id).unwrap(), Some(false));
        assert_eq!(store.toggle_favorite("missing").unwrap(), None);
        assert_eq!(*persistence.saves.lock().unwrap(), 3);
    }

    #[test]
    fn unreadable_history_starts_empty_without_writing() {
        let persistence = Arc::new(MemoryPersistence {
            fail_load: true,
            ..Default::default()
        });
        let store = open(&persistence);
        assert!(store.records().is_empty());
        assert_eq!(*persistence.saves.lock().unwrap(), 0);
    }

    #[test]
    fn failed_save_leaves_memory_untouched() {
        let persistence = Arc::new(MemoryPersistence {
            fail_saves: true,
            ..Default::default()
        });
        let mut store = open(&persistence);
        assert!(store.prepend(record("first")).is_err());
        assert!(store.records().is_empty());
    }

    #[test]
    fn drops_duplicate_and_empty_records_on_load() {
        let r1 = record("first");
        let empty: HistoryRecord = serde_json::from_value(serde_json::json!({
            "id": "empty",
            "input": serde_json::to_value(sample_input()).unwrap(),
            "outputs": [],
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        let persistence = Arc::new(MemoryPersistence {
            records: std::sync::Mutex::new(vec![r1.clone(), empty, r1.clone()]),
            ..Default::default()
        });
        assert_eq!(open(&persistence).records(), [r1]);
    }
}
