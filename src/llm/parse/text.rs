/// Returns the first balanced `{...}` fragment, skipping braces inside JSON strings.
pub(super) fn extract_first_json_object(raw: &str) -> Option<&str> {
    let mut start = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (idx, ch) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' && in_string {
            escaped = true;
            continue;
        }
        if ch == '"' && start.is_some() {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }
        if ch == '{' {
            if depth == 0 {
                start = Some(idx);
            }
            depth += 1;
            continue;
        }
        if ch == '}' {
            if depth == 0 {
                continue;
            }
            depth -= 1;
            if depth == 0
                && let Some(begin) = start
            {
                return Some(&raw[begin..=idx]);
            }
        }
    }
    None
}

pub(super) fn truncate_chars(raw: &str, limit: usize) -> &str {
    match raw.char_indices().nth(limit) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_object_surrounded_by_prose() {
        let raw = "Sure! Here you go:\n{\"copies\": []}\nEnjoy.";
        assert_eq!(extract_first_json_object(raw), Some("{\"copies\": []}"));
    }

    #[test]
    fn ignores_braces_inside_strings() {
        let raw = r#"{"title":"a } b","content":"{"}"#;
        assert_eq!(extract_first_json_object(raw), Some(raw));
    }

    #[test]
    fn ignores_quotes_before_the_object() {
        let raw = r#"He said "hi" then {"a":1}"#;
        assert_eq!(extract_first_json_object(raw), Some(r#"{"a":1}"#));
    }

    #[test]
    fn returns_none_for_unbalanced_input() {
        assert_eq!(extract_first_json_object("{\"copies\": ["), None);
        assert_eq!(extract_first_json_object("no braces"), None);
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("种草文案", 2), "种草");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }
}
