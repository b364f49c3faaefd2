use std::fmt::Write;

use crate::history::query::FavoriteEntry;
use crate::model::{CopyVariant, HistoryRecord};

pub fn print_variants(variants: &[CopyVariant]) {
    print!("{}", render_variants(variants));
}

pub fn print_record(record: &HistoryRecord) {
    print!("{}", render_record(record));
}

pub fn print_history(records: &[&HistoryRecord]) {
    if records.is_empty() {
        println!("No history yet.");
        return;
    }
    for record in records {
        println!("{}", render_summary(record));
    }
}

pub fn print_favorites(entries: &[FavoriteEntry<'_>]) {
    if entries.is_empty() {
        println!("No favorites.");
        return;
    }
    for entry in entries {
        println!("{}", render_summary(entry.record));
        print!("{}", render_variants(entry.favorites.iter().copied()));
    }
}

fn render_summary(record: &HistoryRecord) -> String {
    let input = record.input();
    format!(
        "{}  {}  [{}] {} / {}  ({} copies, {} favorites)",
        record.id(),
        record.created_at().format("%Y-%m-%d %H:%M"),
        input.style().short_label(),
        input.topic(),
        input.product_name(),
        record.outputs().len(),
        record.favorite_count()
    )
}

fn render_record(record: &HistoryRecord) -> String {
    let input = record.input();
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_summary(record));
    let _ = writeln!(out, "  style: {}", input.style().label());
    if !input.features().is_empty() {
        let _ = writeln!(out, "  features: {}", input.features().join("、"));
    }
    if !input.target_audience().is_empty() {
        let _ = writeln!(out, "  audience: {}", input.target_audience());
    }
    out.push('\n');
    out.push_str(&render_variants(record.outputs()));
    out
}

fn render_variants<'a>(variants: impl IntoIterator<Item = &'a CopyVariant>) -> String {
    let mut out = String::new();
    for (index, copy) in variants.into_iter().enumerate() {
        let star = if copy.is_favorite() { "★" } else { "☆" };
        let _ = writeln!(out, "{star} #{} {}  ({})", index + 1, copy.title, copy.id());
        for line in copy.content.lines() {
            let _ = writeln!(out, "    {line}");
        }
        let tags: Vec<_> = copy.tags.iter().map(|tag| format!("#{tag}")).collect();
        let _ = writeln!(out, "    {}  {}", tags.join(" "), copy.emojis.join(""));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::input::sample_input;

    fn variant() -> CopyVariant {
        CopyVariant::new(
            "清爽一夏",
            "第一行\n第二行",
            vec!["防晒".to_string(), "夏日".to_string()],
            vec!["☀️".to_string(), "✨".to_string()],
        )
    }

    #[test]
    fn renders_variant_with_tags_and_favorite_marker() {
        let mut copy = variant();
        copy.toggle_favorite();
        let text = render_variants(&[copy.clone()]);
        assert!(text.starts_with(&format!("★ #1 清爽一夏  ({})", copy.id())));
        assert!(text.contains("    第一行\n    第二行\n"));
        assert!(text.contains("#防晒 #夏日  ☀️✨"));
    }

    #[test]
    fn renders_record_summary_and_input() {
        let record = HistoryRecord::new(sample_input(), vec![variant()]).unwrap();
        let text = render_record(&record);
        assert!(text.contains("[种草] 夏日护肤 / 清透防晒霜  (1 copies, 0 favorites)"));
        assert!(text.contains("  style: 种草文案"));
        assert!(text.contains("  audience: 学生党"));
        assert!(text.contains("☆ #1 清爽一夏"));
    }
}
