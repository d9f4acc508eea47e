//! Terminal output helpers.

use anyhow::Result;
use polars::prelude::{DataFrame, PolarsResult};
use serde::Serialize;
use tasador::Section;

const WIDTH: usize = 62;

/// Boxed title.
pub(crate) fn banner(title: &str) {
    println!("\n╔{}╗", "═".repeat(WIDTH));
    println!("║{:^WIDTH$}║", title);
    println!("╚{}╝\n", "═".repeat(WIDTH));
}

/// Section heading between heavy rules.
pub(crate) fn heading(title: &str) {
    println!("{}", "━".repeat(WIDTH));
    println!("{title}");
    println!("{}\n", "━".repeat(WIDTH));
}

/// Pretty-printed JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A titled table.
pub(crate) fn print_frame(title: &str, frame: PolarsResult<DataFrame>) -> Result<()> {
    heading(title);
    println!("{}\n", frame?);
    Ok(())
}

/// Print a ready section with `render`, or its failure.
pub(crate) fn print_section<T>(
    title: &str,
    section: &Section<T>,
    render: impl FnOnce(&T) -> Result<()>,
) -> Result<()> {
    match section {
        Section::Ready(value) => render(value),
        Section::Failed { kind, message } => {
            heading(title);
            println!("unavailable ({kind:?}): {message}\n");
            Ok(())
        }
    }
}

/// `0.0834` as `8.34%`.
pub(crate) fn pct(x: f64) -> String {
    format!("{:.2}%", x * 100.0)
}

/// Money with thousands separators and no decimals.
pub(crate) fn money(x: f64) -> String {
    if !x.is_finite() {
        return format!("{x}");
    }
    let digits = format!("{:.0}", x.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if x < 0.0 && digits != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct() {
        assert_eq!(pct(0.0834), "8.34%");
        assert_eq!(pct(-0.5), "-50.00%");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(0.0), "0");
        assert_eq!(money(999.4), "999");
        assert_eq!(money(1_000.0), "1,000");
        assert_eq!(money(1_801_272.39), "1,801,272");
        assert_eq!(money(-2_060.0), "-2,060");
        assert_eq!(money(f64::INFINITY), "inf");
    }
}
