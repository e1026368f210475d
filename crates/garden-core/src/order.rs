//! # Order Helpers
//!
//! Pure functions behind order creation: the derived total, the next
//! decimal order id and the stored date format.
//!
//! ## Order Id Sequence
//! ```text
//! existing ids:  "1"  "2"  "7"         →  max = 7  →  next = "8"
//! existing ids:  (none)                →  max = 0  →  next = "1"
//! ```
//! Ids must stay numeric-looking; the store derives the max with
//! `CAST(id AS INTEGER)`.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

use crate::error::{CoreError, CoreResult};
use crate::types::OrderItem;

/// Stored order date format: no timezone suffix, space separator.
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sum of `price * quantity` over the items.
pub fn order_total(items: &[OrderItem]) -> f64 {
    items.iter().map(OrderItem::line_total).sum()
}

/// Id following the largest numeric id currently stored.
///
/// Negative maxima (only reachable through hand-edited data) restart at "1".
/// SQLite saturates oversized numeric strings to `i64::MAX`, which has no
/// successor.
pub fn next_order_id(max_numeric_id: i64) -> CoreResult<String> {
    max_numeric_id
        .max(0)
        .checked_add(1)
        .map(|next| next.to_string())
        .ok_or(CoreError::OrderIdExhausted {
            max: max_numeric_id,
        })
}

/// Formats a timestamp the way order dates are stored.
pub fn format_order_date<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(ORDER_DATE_FORMAT).to_string()
}

/// The current local time in order-date format.
pub fn current_order_date() -> String {
    format_order_date(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Utc};

    #[test]
    fn test_order_total() {
        let items = vec![
            OrderItem::new("1", "Tomato Plant", 5.99, 3),
            OrderItem::new("2", "Garden Soil", 12.99, 1),
        ];
        assert!((order_total(&items) - 30.96).abs() < 1e-9);
    }

    #[test]
    fn test_order_total_single_line() {
        let items = vec![OrderItem::new("1", "Tomato Plant", 5.99, 3)];
        assert!((order_total(&items) - 17.97).abs() < 1e-9);
    }

    #[test]
    fn test_order_total_empty() {
        assert_eq!(order_total(&[]), 0.0);
    }

    #[test]
    fn test_next_order_id() {
        assert_eq!(next_order_id(0).unwrap(), "1");
        assert_eq!(next_order_id(7).unwrap(), "8");
        assert_eq!(next_order_id(-4).unwrap(), "1");
    }

    #[test]
    fn test_next_order_id_at_i64_max() {
        let err = next_order_id(i64::MAX).unwrap_err();
        assert!(matches!(err, CoreError::OrderIdExhausted { max } if max == i64::MAX));
        assert_eq!(next_order_id(i64::MAX - 1).unwrap(), i64::MAX.to_string());
    }

    #[test]
    fn test_format_order_date_has_no_offset() {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(9, 3, 41)
            .unwrap();

        let utc = Utc.from_utc_datetime(&naive);
        assert_eq!(format_order_date(&utc), "2024-05-17 09:03:41");

        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let local = offset.from_local_datetime(&naive).unwrap();
        assert_eq!(format_order_date(&local), "2024-05-17 09:03:41");
    }

    #[test]
    fn test_current_order_date_shape() {
        let date = current_order_date();
        assert_eq!(date.len(), 19);
        assert_eq!(&date[10..11], " ");
        assert!(!date.contains('T'));
        assert!(!date.contains('+'));
    }
}
