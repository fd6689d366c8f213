//! Rendering query results for the terminal

use anyhow::Result;
use brickset_core::DatasetSummary;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;

/// Order a query mapping by key for stable output
pub fn sorted<K: Ord, V>(map: impl IntoIterator<Item = (K, V)>) -> BTreeMap<K, V> {
    map.into_iter().collect()
}

/// Print any serialisable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a mapping as aligned `key  value` lines
pub fn print_map<V: Display>(map: &BTreeMap<String, V>) {
    let width = map.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (key, value) in map {
        println!("{:<width$}  {}", key, value, width = width);
    }
}

/// Print a framed statistics report for a catalog
pub fn print_summary_report(input: &Path, summary: &DatasetSummary) {
    println!("\n{}", "═".repeat(60));
    println!("Brickset Catalog Summary");
    println!("{}", "═".repeat(60));
    println!("Catalog:            {}", input.display());
    println!("Total sets:         {}", format_with_commas(summary.total_sets as u64));
    println!("Total pieces:       {}", format_with_commas(summary.total_pieces));

    match summary.average_pieces {
        Some(avg) => println!("Average pieces:     {}", format_with_commas(u64::from(avg))),
        None => println!("Average pieces:     (no data)"),
    }

    println!(
        "Distinct names:     {} ({:.1}% repeated)",
        format_with_commas(summary.distinct_names as u64),
        summary.duplicate_name_rate()
    );

    println!("Distinct numbers:   {}", format_with_commas(summary.distinct_numbers as u64));

    if summary.shadowed_numbers() > 0 {
        println!(
            "Shadowed numbers:   {}",
            format_with_commas(summary.shadowed_numbers() as u64)
        );
    }

    println!("{}", "═".repeat(60));
}

/// Format number with thousand separators
pub fn format_with_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_commas() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(42), "42");
        assert_eq!(format_with_commas(999), "999");
        assert_eq!(format_with_commas(1234), "1,234");
        assert_eq!(format_with_commas(1234567), "1,234,567");
    }

    #[test]
    fn test_sorted_orders_keys() {
        let map = sorted(vec![("b".to_string(), 2), ("a".to_string(), 1), ("c".to_string(), 3)]);
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
