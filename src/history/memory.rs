use anyhow::{Result, anyhow};
use std::sync::{Arc, Mutex};

use super::HistoryPersistence;
use crate::model::HistoryRecord;

/// In-memory persistence for tests; `fail_saves` simulates a broken disk.
#[derive(Default)]
pub(crate) struct MemoryPersistence {
    pub(crate) records: Mutex<Vec<HistoryRecord>>,
    pub(crate) saves: Mutex<usize>,
    pub(crate) fail_load: bool,
    pub(crate) fail_saves: bool,
}

impl HistoryPersistence for MemoryPersistence {
    fn load(&self) -> Result<Vec<HistoryRecord>> {
        if self.fail_load {
            return Err(anyhow!("simulated corrupt history"));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    fn save(&self, records: &[HistoryRecord]) -> Result<()> {
        if self.fail_saves {
            return Err(anyhow!("simulated write failure"));
        }
        *self.records.lock().unwrap() = records.to_vec();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

impl HistoryPersistence for Arc<MemoryPersistence> {
    fn load(&self) -> Result<Vec<HistoryRecord>> {
        self.as_ref().load()
    }

    fn save(&self, records: &[HistoryRecord]) -> Result<()> {
        self.as_ref().save(records)
    }
}
