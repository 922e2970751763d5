//! Terminal output
//!
//! Diagnostics go to stderr so stdout stays a clean JSON document.

use crate::certdata::StoreStats;
use console::style;
use std::fmt::Write;

/// Print an informational message to stderr
pub fn print_info(message: &str) {
    eprintln!("{} {}", style("ℹ").blue(), message);
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

/// Render root store statistics as aligned text
pub fn render_stats(stats: &StoreStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} entries in certdata", stats.processed);
    let _ = writeln!(out, "{} ... trusted for serverAuth", stats.good);
    let skipped = [
        ("not trusted for serverAuth", stats.skipped_non_server_auth),
        ("without CKA_VALUE", stats.skipped_missing_value),
        ("with bad base64", stats.skipped_bad_base64),
        ("with bad DER", stats.skipped_bad_der),
    ];
    for (reason, count) in skipped.iter().filter(|(_, count)| *count > 0) {
        let _ = writeln!(out, "{} skipped {}", count, reason);
    }

    section(
        &mut out,
        "Algorithm distribution:",
        stats.algorithms.iter().map(|(k, v)| (k.to_string(), *v)),
    );
    section(
        &mut out,
        "ECDSA curve distribution:",
        stats.ec_curves.iter().map(|(k, v)| (k.to_string(), *v)),
    );
    section(
        &mut out,
        "RSA key size distribution:",
        stats.rsa_key_sizes.iter().map(|(k, v)| (k.to_string(), *v)),
    );

    out
}

fn section(out: &mut String, title: &str, rows: impl Iterator<Item = (String, usize)>) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", style(title).bold());
    for (name, count) in rows {
        let _ = writeln!(out, "  {:<7}{}", name, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_stats() {
        console::set_colors_enabled(false);
        let mut stats = StoreStats {
            processed: 3,
            good: 2,
            skipped_non_server_auth: 1,
            ..StoreStats::default()
        };
        stats.algorithms.insert("RSA".to_string(), 1);
        stats.algorithms.insert("ECDSA".to_string(), 1);
        stats.ec_curves.insert("P-256".to_string(), 1);
        stats.rsa_key_sizes.insert(2048, 1);

        let text = render_stats(&stats);
        assert!(text.starts_with("3 entries in certdata\n2 ... trusted for serverAuth\n"));
        assert!(text.contains("1 skipped not trusted for serverAuth"));
        assert!(!text.contains("bad DER"));
        assert!(text.contains("  ECDSA  1\n  RSA    1\n"));
        assert!(text.contains("  P-256  1\n"));
        assert!(text.contains("  2048   1\n"));
    }
}
