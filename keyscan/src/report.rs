//! Plain-text rendering of a finished scan.

use crate::scan::ScanOutcome;
use crate::topk::{TOP_K, TypeBreakdown};

const RULE_WIDTH: usize = 120;
/// Key names longer than this are truncated with an ellipsis marker.
const KEY_DISPLAY_LIMIT: usize = 80;

const MB: f64 = 1024.0 * 1024.0;

/// Renders the full report: one ranked table per observed type in display
/// order, followed by the cross-type summary.
pub fn render(outcome: &ScanOutcome) -> String {
    let mut lines = vec!["=".repeat(RULE_WIDTH)];
    for breakdown in &outcome.types {
        if breakdown.top.is_empty() {
            continue;
        }
        render_type(&mut lines, breakdown);
    }
    render_summary(&mut lines, outcome);
    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn render_type(lines: &mut Vec<String>, breakdown: &TypeBreakdown) {
    lines.push(String::new());
    lines.push(format!(
        "{} - Top {}",
        breakdown.value_type.as_str().to_uppercase(),
        TOP_K
    ));
    lines.push("-".repeat(RULE_WIDTH));
    lines.push(format!(
        "{:<6} {:<15} {:<20} {}",
        "Rank", "Memory (MB)", "Memory (Bytes)", "Key"
    ));
    lines.push("-".repeat(RULE_WIDTH));

    for (idx, observation) in breakdown.top.iter().enumerate() {
        lines.push(format!(
            "{:<6} {:<15.3} {:<20} {}",
            idx + 1,
            to_mb(observation.memory_bytes),
            group_thousands(observation.memory_bytes),
            display_key(&observation.name),
        ));
    }

    let top_bytes = breakdown.top_bytes();
    lines.push(String::new());
    lines.push(format!(
        "  Totals: {} keys, {:.2} MB",
        group_thousands(breakdown.total_count),
        to_mb(breakdown.total_bytes),
    ));
    lines.push(format!(
        "  Top {} share: {:.2}% ({:.2} MB)",
        TOP_K,
        share_percent(top_bytes, breakdown.total_bytes),
        to_mb(top_bytes),
    ));
}

fn render_summary(lines: &mut Vec<String>, outcome: &ScanOutcome) {
    let grand_total = outcome.total_bytes();

    lines.push(String::new());
    lines.push("=".repeat(RULE_WIDTH));
    lines.push("Overall summary".to_string());
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(format!(
        "{:<15} {:<15} {:<20} {}",
        "Type", "Keys", "Total (MB)", "Share"
    ));
    lines.push("-".repeat(RULE_WIDTH));

    let mut by_name: Vec<&TypeBreakdown> = outcome.types.iter().collect();
    by_name.sort_by(|a, b| a.value_type.as_str().cmp(b.value_type.as_str()));
    for breakdown in by_name {
        lines.push(format!(
            "{:<15} {:<15} {:<20.2} {:.2}%",
            breakdown.value_type.as_str(),
            group_thousands(breakdown.total_count),
            to_mb(breakdown.total_bytes),
            share_percent(breakdown.total_bytes, grand_total),
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Total: {} keys, {:.2} MB",
        group_thousands(outcome.scanned),
        to_mb(grand_total),
    ));
}

fn display_key(name: &str) -> String {
    if name.chars().count() <= KEY_DISPLAY_LIMIT {
        name.to_string()
    } else {
        let truncated: String = name.chars().take(KEY_DISPLAY_LIMIT - 3).collect();
        format!("{truncated}...")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn share_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn to_mb(bytes: u64) -> f64 {
    bytes as f64 / MB
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ValueType;
    use crate::topk::KeyObservation;

    fn observation(name: &str, value_type: ValueType, memory_bytes: u64) -> KeyObservation {
        KeyObservation {
            name: name.to_string(),
            value_type,
            memory_bytes,
        }
    }

    fn breakdown(value_type: ValueType, top: Vec<KeyObservation>) -> TypeBreakdown {
        let total_count = top.len() as u64;
        let total_bytes = top.iter().map(|obs| obs.memory_bytes).sum();
        TypeBreakdown {
            value_type,
            top,
            total_count,
            total_bytes,
        }
    }

    #[test]
    fn key_at_display_limit_is_not_truncated() {
        let name = "k".repeat(80);
        assert_eq!(display_key(&name), name);
    }

    #[test]
    fn long_key_is_truncated_with_ellipsis() {
        let name = "k".repeat(81);
        let shown = display_key(&name);
        assert_eq!(shown.chars().count(), 80);
        assert!(shown.ends_with("..."));
        assert!(shown.starts_with(&"k".repeat(77)));
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn share_of_empty_total_is_zero() {
        assert_eq!(share_percent(0, 0), 0.0);
        assert_eq!(share_percent(50, 200), 25.0);
    }

    #[test]
    fn report_lists_types_and_summary() {
        let outcome = ScanOutcome {
            scanned: 3,
            errors: 1,
            types: vec![
                breakdown(
                    ValueType::String,
                    vec![observation("cache:user:1", ValueType::String, 2 * 1024 * 1024)],
                ),
                breakdown(
                    ValueType::List,
                    vec![
                        observation("queue:jobs", ValueType::List, 1024 * 1024),
                        observation("queue:dead", ValueType::List, 512 * 1024),
                    ],
                ),
            ],
        };

        let report = render(&outcome);
        assert!(report.contains("STRING - Top 10"));
        assert!(report.contains("LIST - Top 10"));
        assert!(report.contains("cache:user:1"));
        assert!(report.contains("queue:jobs"));
        assert!(report.contains("Overall summary"));
        assert!(report.contains("Total: 3 keys, 3.50 MB"));

        // Per-type sections follow display order; the summary is sorted by
        // type name, so `list` precedes `string` there.
        let string_section = report.find("STRING - Top 10").expect("string section");
        let list_section = report.find("LIST - Top 10").expect("list section");
        assert!(string_section < list_section);
        let summary = report.find("Overall summary").expect("summary section");
        let list_row = report[summary..].find("\nlist ").expect("list row");
        let string_row = report[summary..].find("\nstring ").expect("string row");
        assert!(list_row < string_row);
    }

    #[test]
    fn type_share_reflects_top_entries_only() {
        let mut bd = breakdown(
            ValueType::Hash,
            vec![observation("sessions", ValueType::Hash, 300)],
        );
        bd.total_count = 5;
        bd.total_bytes = 1200;
        let outcome = ScanOutcome {
            scanned: 5,
            errors: 0,
            types: vec![bd],
        };

        let report = render(&outcome);
        assert!(report.contains("Top 10 share: 25.00%"));
    }
}
