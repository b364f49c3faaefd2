pub(crate) mod input;
mod record;
mod variant;

pub use input::{CopyStyle, GenerationInput, InputDraft, MAX_FEATURES};
pub use record::HistoryRecord;
pub use variant::CopyVariant;
