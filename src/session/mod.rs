use anyhow::Result;
use tracing::debug;

use crate::history::HistoryStore;
use crate::model::{CopyVariant, GenerationInput, HistoryRecord};

/// The history store plus the "current results" view shown after a
/// generation or a history selection. The view holds its own copies of the
/// variants; favorites are kept identical in both places by id.
pub struct CopySession {
    store: HistoryStore,
    current: Vec<CopyVariant>,
}

impl CopySession {
    pub fn new(store: HistoryStore) -> Self {
        Self {
            store,
            current: Vec::new(),
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn current(&self) -> &[CopyVariant] {
        &self.current
    }

    /// Shows a successful generation and stores it. The variants stay in the
    /// current view even when history cannot be written.
    pub fn record_generation(
        &mut self,
        input: GenerationInput,
        outputs: Vec<CopyVariant>,
    ) -> Result<&HistoryRecord> {
        self.current = outputs.clone();
        let record = HistoryRecord::new(input, outputs)?;
        self.store.prepend(record)?;
        Ok(&self.store.records()[0])
    }

    /// Shows a stored record's variants in the current view.
    pub fn select_record(&mut self, id: &str) -> Option<&HistoryRecord> {
        let record = self.store.get(id)?;
        self.current = record.outputs().to_vec();
        Some(record)
    }

    pub fn delete_record(&mut self, id: &str) -> Result<bool> {
        self.store.delete(id)
    }

    /// Finds a variant in the current view first, then in history.
    pub fn find_copy(&self, copy_id: &str) -> Option<&CopyVariant> {
        self.current
            .iter()
            .find(|copy| copy.id() == copy_id)
            .or_else(|| self.store.find_copy(copy_id))
    }

    /// Toggles a variant everywhere it is held and returns the new state.
    pub fn toggle_favorite(&mut self, copy_id: &str) -> Result<Option<bool>> {
        let state = match self.store.toggle_favorite(copy_id)? {
            Some(state) => Some(state),
            None => self
                .current
                .iter_mut()
                .find(|copy| copy.id() == copy_id)
                .map(CopyVariant::toggle_favorite),
        };
        if let Some(state) = state {
            for copy in self
                .current
                .iter_mut()
                .filter(|copy| copy.id() == copy_id && copy.is_favorite() != state)
            {
                copy.toggle_favorite();
            }
            debug!(copy_id, favorite = state, "favorite synchronized");
        }
        Ok(state)
    }
}
