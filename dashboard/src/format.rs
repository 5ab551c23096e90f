//! Display formatting shared by every view.

use crate::types::Money;
use chrono::{DateTime, Utc};

/// Formats an amount as currency, e.g. `$5,000` or `$1,234.50`
#[must_use]
pub fn format_currency(amount: Money) -> String {
    amount.to_string()
}

/// Formats a timestamp as a short month/day/year date, e.g. `1/15/2024`
#[must_use]
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Money::from_dollars(18000)), "$18,000");
        assert_eq!(format_currency(Money::from_cents(5)), "$0.05");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(format_date(date), "1/15/2024");

        let date = Utc.with_ymd_and_hms(2024, 11, 3, 23, 59, 0).unwrap();
        assert_eq!(format_date(date), "11/3/2024");
    }
}
