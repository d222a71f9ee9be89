//! Output formatting for CLI

use crate::environment::{ActionTally, RawState};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print the continuous state fields
pub fn print_state(state: &RawState) {
    print_kv("Fatigue", &format!("{:.1}", state.fatigue));
    print_kv("Stress", &format!("{:.1}", state.stress));
    print_kv("Retention", &format!("{:.3}", state.retention));
    print_kv("Days left", &state.days_left.to_string());
    print_kv("Difficulty", state.difficulty.as_str());
}

/// Format action counts with percentages of the total
pub fn format_distribution(counts: &ActionTally) -> String {
    let total = counts.total().max(1) as f64;
    let pct = |n: usize| 100.0 * n as f64 / total;
    format!(
        "Study {} ({:.0}%), Revise {} ({:.0}%), Break {} ({:.0}%)",
        counts.study,
        pct(counts.study),
        counts.revise,
        pct(counts.revise),
        counts.breaks,
        pct(counts.breaks)
    )
}
