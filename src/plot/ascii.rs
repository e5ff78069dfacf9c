//! ASCII grouped bar chart for terminal output.
//!
//! This is intentionally "dumb" (one bar per line), optimized for:
//! - quick visual checks in a terminal or a log file
//! - deterministic output (helpful for golden tests)
//!
//! Months are groups; each shop gets one bar per month, drawn with its own
//! glyph so the groups stay readable without color.

use crate::domain::Shop;
use crate::report::{PivotTable, format_yen};

/// Bar glyph per shop, in `Shop::ALL` order.
pub fn shop_glyph(shop: Shop) -> char {
    match shop {
        Shop::Tokyo => '#',
        Shop::Osaka => '=',
        Shop::Fukuoka => '*',
    }
}

/// Render the month×shop pivot as grouped horizontal bars.
///
/// `width` is the length of the longest bar in columns.
pub fn render_grouped_bars(pivot: &PivotTable, width: usize) -> String {
    let width = width.max(10);
    let mut out = String::new();

    if pivot.is_empty() {
        out.push_str("Chart: (no data)\n");
        return out;
    }

    let max = pivot.max_cell();
    out.push_str(&format!("Chart: monthly sales by shop | max={}\n", format_yen(max)));
    out.push_str(&legend(&pivot.shops));
    out.push('\n');

    let label_width = pivot
        .shops
        .iter()
        .map(|s| s.display_name().len())
        .max()
        .unwrap_or(0);

    for (month, row) in pivot.months.iter().zip(&pivot.cells) {
        out.push_str(&format!("{month}\n"));
        for (shop, &amount) in pivot.shops.iter().zip(row) {
            let bar: String = std::iter::repeat(shop_glyph(*shop))
                .take(bar_len(amount, max, width))
                .collect();
            let line = format!(
                "  {:<label_width$} |{bar} {}",
                shop.display_name(),
                format_yen(amount)
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    out
}

fn legend(shops: &[Shop]) -> String {
    let parts: Vec<String> = shops
        .iter()
        .map(|s| format!("{} {}", shop_glyph(*s), s.display_name()))
        .collect();
    format!("Legend: {}", parts.join("  "))
}

/// Scale `amount` to `[0, width]`; any non-zero amount gets at least one glyph.
fn bar_len(amount: u64, max: u64, width: usize) -> usize {
    if max == 0 || amount == 0 {
        return 0;
    }
    let scaled = (amount as f64 / max as f64 * width as f64).round() as usize;
    scaled.clamp(1, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::YearMonth;

    fn pivot() -> PivotTable {
        PivotTable {
            months: vec![YearMonth::new(2024, 1), YearMonth::new(2024, 2)],
            shops: vec![Shop::Tokyo, Shop::Osaka],
            cells: vec![vec![1000, 2000], vec![500, 0]],
        }
    }

    #[test]
    fn bars_scale_to_largest_cell() {
        let chart = render_grouped_bars(&pivot(), 20);
        let lines: Vec<&str> = chart.lines().collect();

        assert!(lines[0].contains("max=¥2,000"));
        assert_eq!(lines[1], "Legend: # Tokyo  = Osaka");
        assert_eq!(lines[2], "2024-01");
        assert!(lines[3].contains(&"#".repeat(10)));
        assert!(lines[4].contains(&"=".repeat(20)));
        assert_eq!(lines[5], "2024-02");
        assert!(lines[6].contains(&"#".repeat(5)));
        assert!(!lines[7].contains('='));
        assert!(lines[7].ends_with("¥0"));
    }

    #[test]
    fn small_amounts_still_show_a_bar() {
        assert_eq!(bar_len(1, 1_000_000, 40), 1);
        assert_eq!(bar_len(0, 1_000_000, 40), 0);
        assert_eq!(bar_len(5, 0, 40), 0);
    }

    #[test]
    fn empty_pivot_renders_placeholder() {
        let chart = render_grouped_bars(&PivotTable::default(), 40);
        assert_eq!(chart, "Chart: (no data)\n");
    }
}
