mod normalize;
mod text;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::model::{CopyVariant, GenerationInput};

// Reply schema shared with the prompt builder.
pub const COPIES_FIELD: &str = "copies";
pub const TITLE_FIELD: &str = "title";
pub const CONTENT_FIELD: &str = "content";
pub const TAGS_FIELD: &str = "tags";
pub const EMOJIS_FIELD: &str = "emojis";

const FALLBACK_CONTENT_CHARS: usize = 300;

/// Example reply embedded in the instruction so the model answers in the
/// shape [`normalize`] reads.
pub fn response_schema_example() -> String {
    let example = json!({
        COPIES_FIELD: [
            {
                TITLE_FIELD: "吸引人的标题",
                CONTENT_FIELD: "文案内容",
                TAGS_FIELD: ["标签1", "标签2", "标签3"],
                EMOJIS_FIELD: ["😊", "🔥", "✨"]
            }
        ]
    });
    serde_json::to_string_pretty(&example).unwrap_or_else(|_| example.to_string())
}

/// Turns raw model output into copy variants. Never fails: replies that do not
/// follow the schema degrade into a single variant built from the raw text.
pub fn normalize(raw: &str, input: &GenerationInput) -> Vec<CopyVariant> {
    if let Some(copies) = parse_copies(raw) {
        debug!(count = copies.len(), "parsed structured copy variants");
        return copies;
    }
    warn!(
        chars = raw.chars().count(),
        "model reply did not match the copies schema; using degraded fallback"
    );
    vec![normalize::fallback_variant(raw, input)]
}

fn parse_copies(raw: &str) -> Option<Vec<CopyVariant>> {
    let fragment = text::extract_first_json_object(raw)?;
    let value: Value = serde_json::from_str(fragment).ok()?;
    normalize::copies_from_value(&value)
}
