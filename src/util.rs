use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;

pub const LABEL_LINE_WIDTH: usize = 15;

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

/// Greedy word wrap to lines of at most `width` characters. A word longer
/// than `width` keeps a line to itself.
pub fn wrap_label(label: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_chars = 0usize;

    for word in label.split_whitespace() {
        let word_chars = word.chars().count();
        if line_chars > 0 && line_chars + 1 + word_chars > width {
            lines.push(std::mem::take(&mut line));
            line_chars = 0;
        }
        if line_chars > 0 {
            line.push(' ');
            line_chars += 1;
        }
        line.push_str(word);
        line_chars += word_chars;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn format_due_date(due_date: Option<NaiveDate>) -> String {
    match due_date {
        Some(date) => format!("Due {}", date.format("%b %-d, %Y")),
        None => "No due date".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_stable_and_bounded() {
        let first = stable_pair("card_1");
        assert_eq!(first, stable_pair("card_1"));
        assert!((-1.0..=1.0).contains(&first.0));
        assert!((-1.0..=1.0).contains(&first.1));
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_label("Finalize pricing page", LABEL_LINE_WIDTH),
            ["Finalize", "pricing page"]
        );
        assert_eq!(wrap_label("Short label", LABEL_LINE_WIDTH), ["Short label"]);
        assert_eq!(
            wrap_label("a supercalifragilistic word", LABEL_LINE_WIDTH),
            ["a", "supercalifragilistic", "word"]
        );
        assert!(wrap_label("   ", LABEL_LINE_WIDTH).is_empty());
    }

    #[test]
    fn due_dates_read_naturally() {
        assert_eq!(
            format_due_date(NaiveDate::from_ymd_opt(2025, 3, 7)),
            "Due Mar 7, 2025"
        );
        assert_eq!(format_due_date(None), "No due date");
    }
}
