use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::input::GenerationInput;
use super::variant::CopyVariant;

/// One successful generation: the submitted input and the variants it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    id: String,
    input: GenerationInput,
    outputs: Vec<CopyVariant>,
    created_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(input: GenerationInput, outputs: Vec<CopyVariant>) -> Result<Self> {
        if outputs.is_empty() {
            return Err(anyhow!("history record requires at least one copy variant"));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            input,
            outputs,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn input(&self) -> &GenerationInput {
        &self.input
    }

    pub fn outputs(&self) -> &[CopyVariant] {
        &self.outputs
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn find_copy(&self, copy_id: &str) -> Option<&CopyVariant> {
        self.outputs.iter().find(|copy| copy.id() == copy_id)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &CopyVariant> {
        self.outputs.iter().filter(|copy| copy.is_favorite())
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites().count()
    }

    /// Toggles the contained variant and returns its new state.
    pub fn toggle_favorite(&mut self, copy_id: &str) -> Option<bool> {
        self.outputs
            .iter_mut()
            .find(|copy| copy.id() == copy_id)
            .map(CopyVariant::toggle_favorite)
    }

    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.input.topic().to_lowercase().contains(needle)
            || self.input.product_name().to_lowercase().contains(needle)
            || self.outputs.iter().any(|copy| copy.matches(needle))
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        !self.outputs.is_empty()
    }
}
