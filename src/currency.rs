//! Whole-unit currency formatting

/// Format an amount with thousands separators and no decimals
///
/// # Example
/// ```
/// use downtime_ledger::currency::format_currency;
///
/// assert_eq!(format_currency(74_925, "¥"), "¥74,925");
/// assert_eq!(format_currency(-1_200, "¥"), "-¥1,200");
/// ```
pub fn format_currency(amount: i64, symbol: &str) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-{}{}", symbol, grouped)
    } else {
        format!("{}{}", symbol, grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts() {
        assert_eq!(format_currency(0, "¥"), "¥0");
        assert_eq!(format_currency(999, "¥"), "¥999");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_currency(1_000, "$"), "$1,000");
        assert_eq!(format_currency(1_500_000, "¥"), "¥1,500,000");
        assert_eq!(format_currency(12_345_678, "¥"), "¥12,345,678");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_currency(-375_000, "¥"), "-¥375,000");
    }

    #[test]
    fn test_extreme() {
        assert_eq!(
            format_currency(i64::MIN, ""),
            "-9,223,372,036,854,775,808"
        );
    }
}
