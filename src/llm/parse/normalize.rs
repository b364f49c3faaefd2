use serde_json::Value;

use crate::model::{CopyVariant, GenerationInput};

use super::{
    COPIES_FIELD, CONTENT_FIELD, EMOJIS_FIELD, FALLBACK_CONTENT_CHARS, TAGS_FIELD, TITLE_FIELD,
};
use super::text::truncate_chars;

const DEFAULT_TITLE: &str = "默认标题";
const DEFAULT_CONTENT: &str = "默认内容";
const DEFAULT_TAGS: &[&str] = &["好物推荐"];
const DEFAULT_EMOJIS: &[&str] = &["✨", "🔥"];
const FALLBACK_TAGS: &[&str] = &["好物推荐", "种草"];
const FALLBACK_TITLE_SUFFIX: &str = "推荐";

/// Maps a parsed reply object to variants. `None` means the reply does not
/// follow the `copies` schema and the caller should degrade.
pub(super) fn copies_from_value(value: &Value) -> Option<Vec<CopyVariant>> {
    let copies = value.get(COPIES_FIELD)?.as_array()?;
    if copies.is_empty() {
        return None;
    }
    Some(copies.iter().map(variant_from_value).collect())
}

fn variant_from_value(value: &Value) -> CopyVariant {
    CopyVariant::new(
        text_or(value, TITLE_FIELD, DEFAULT_TITLE),
        text_or(value, CONTENT_FIELD, DEFAULT_CONTENT),
        list_or(value, TAGS_FIELD, DEFAULT_TAGS),
        list_or(value, EMOJIS_FIELD, DEFAULT_EMOJIS),
    )
}

pub(super) fn fallback_variant(raw: &str, input: &GenerationInput) -> CopyVariant {
    CopyVariant::new(
        format!("{}{}", input.product_name(), FALLBACK_TITLE_SUFFIX),
        truncate_chars(raw, FALLBACK_CONTENT_CHARS),
        owned(FALLBACK_TAGS),
        owned(DEFAULT_EMOJIS),
    )
}

/// The field as sent, or `default` when it is missing, not a string, or blank.
fn text_or(value: &Value, field: &str, default: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

fn list_or(value: &Value, field: &str, default: &[&str]) -> Vec<String> {
    match value.get(field).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        None => owned(default),
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::input::sample_input;

    #[test]
    fn fills_missing_fields_with_defaults() {
        let value = json!({"copies": [{"content": "only body"}]});
        let copies = copies_from_value(&value).unwrap();
        assert_eq!(copies.len(), 1);
        assert_eq!(copies[0].title, DEFAULT_TITLE);
        assert_eq!(copies[0].content, "only body");
        assert_eq!(copies[0].tags, ["好物推荐"]);
        assert_eq!(copies[0].emojis, ["✨", "🔥"]);
    }

    #[test]
    fn replaces_non_array_lists_and_blank_text() {
        let value = json!({"copies": [{"title": "  ", "content": 42, "tags": "a,b", "emojis": null}]});
        let copies = copies_from_value(&value).unwrap();
        assert_eq!(copies[0].title, DEFAULT_TITLE);
        assert_eq!(copies[0].content, DEFAULT_CONTENT);
        assert_eq!(copies[0].tags.len(), 1);
        assert_eq!(copies[0].emojis.len(), 2);
    }

    #[test]
    fn keeps_model_text_verbatim() {
        let value = json!({"copies": [{"title": " 标题 ", "content": "第一段\n\n  第二段\n"}]});
        let copies = copies_from_value(&value).unwrap();
        assert_eq!(copies[0].title, " 标题 ");
        assert_eq!(copies[0].content, "第一段\n\n  第二段\n");
    }

    #[test]
    fn keeps_only_string_list_items() {
        let value = json!({"copies": [{"tags": ["a", 1, "", "b"], "emojis": []}]});
        let copies = copies_from_value(&value).unwrap();
        assert_eq!(copies[0].tags, ["a", "b"]);
        assert!(copies[0].emojis.is_empty());
    }

    #[test]
    fn non_object_elements_become_default_variants() {
        let value = json!({"copies": ["just text", {"title": "T"}]});
        let copies = copies_from_value(&value).unwrap();
        assert_eq!(copies.len(), 2);
        assert_eq!(copies[0].title, DEFAULT_TITLE);
        assert_eq!(copies[1].title, "T");
    }

    #[test]
    fn rejects_missing_or_empty_copies() {
        assert!(copies_from_value(&json!({"copies": []})).is_none());
        assert!(copies_from_value(&json!({"copies": "x"})).is_none());
        assert!(copies_from_value(&json!({"items": [{}]})).is_none());
    }

    #[test]
    fn fallback_uses_product_name_and_fixed_lists() {
        let variant = fallback_variant("raw reply", &sample_input());
        assert_eq!(variant.title, "清透防晒霜推荐");
        assert_eq!(variant.content, "raw reply");
        assert_eq!(variant.tags, ["好物推荐", "种草"]);
        assert_eq!(variant.emojis, ["✨", "🔥"]);
        assert!(!variant.is_favorite());
    }
}
