//! Inventory display formatting module
//!
//! Handles colored output and the two record views

use colored::*;

use gms_core::Item;

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Column titles lined up with the linear record view
pub fn table_header() -> String {
    format!(
        "{:<7}|{:<20}|{:>7}|{:>4}|{:<10}|{:>4}|{}",
        "Sku", "Product Name", "Cost", "QTY", "Unit", "Need", "Expiry"
    )
}

/// Separator line below the table header, wide enough for a full date
pub fn table_rule() -> String {
    "-".repeat(table_header().len() + 4)
}

/// Format one record, as a table row or as the labeled multi-line view
pub fn format_item(item: &Item, detailed: bool) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = item.write(&mut out, !detailed);
    out
}

/// Format a summary line for an inventory listing
pub fn format_summary(count: usize, below_needed: usize, total_value: f64, use_color: bool) -> String {
    let parts = vec![
        format!("{} items", count),
        if below_needed == 0 {
            String::new()
        } else if use_color {
            format!("{} below needed", below_needed).yellow().to_string()
        } else {
            format!("{} below needed", below_needed)
        },
        if use_color {
            format!("total {:.2}", total_value).green().to_string()
        } else {
            format!("total {:.2}", total_value)
        },
    ];

    let summary: Vec<&str> = parts.iter().filter(|s| !s.is_empty()).map(|s| s.as_str()).collect();

    format!("[{}]", summary.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_matches_row_columns() {
        let item = Item::from_record("N,4321,rice,kg,1,100,2,10").unwrap();
        let row = format_item(&item, false);

        let header_bars: Vec<usize> = table_header().match_indices('|').map(|(i, _)| i).collect();
        let row_bars: Vec<usize> = row.match_indices('|').map(|(i, _)| i).collect();
        assert_eq!(header_bars, row_bars);
    }

    #[test]
    fn test_format_item_views() {
        let item = Item::from_record("P,1234,water,liter,0,1.5,1,5,2018/03/28").unwrap();

        assert!(format_item(&item, false).starts_with("1234   |water"));
        let detailed = format_item(&item, true);
        assert!(detailed.contains(" Price after tax: N/A"));
        assert!(detailed.ends_with(" Expiry date: 2018/03/28"));
    }

    #[test]
    fn test_format_summary() {
        let summary = format_summary(3, 1, 235.0, false);
        assert_eq!(summary, "[3 items | 1 below needed | total 235.00]");

        let summary = format_summary(2, 0, 10.5, false);
        assert_eq!(summary, "[2 items | total 10.50]");
    }
}
