use chrono::{DateTime, Local, NaiveDate, Utc};

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current month in YYYY-MM format
pub fn current_month() -> String {
    month_of(today())
}

pub fn month_of(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Format a stored expense timestamp for the history table (YYYY-MM-DD)
pub fn format_expense_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format an amount with two decimals
pub fn format_amount(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_of() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(month_of(date), "2024-03");
    }

    #[test]
    fn test_format_expense_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 23, 10, 0).unwrap();
        assert_eq!(format_expense_date(&date), "2024-01-15");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(50.0), "₹50.00");
        assert_eq!(format_amount(-12.5), "₹-12.50");
    }
}
