//! Formatting and small form helpers for the shop pages.
//!
//! Due dates travel as `YYYY-MM-DD` strings; timestamps as `DateTime<Utc>`.

use chrono::{DateTime, NaiveDate, Utc};
use shared_types::{BillItem, BillStatus, JobPriority, JobStatus};
use shared_ui::BadgeVariant;

/// Format an amount in rupees, e.g. `₹1,250.00`.
pub fn format_rupees(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}₹{grouped}.{fraction}")
}

/// Format a `YYYY-MM-DD` date as "Nov 1, 2026". Unparseable input is shown as-is.
pub fn format_due_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Format a timestamp as "Nov 1, 2026 9:35 PM" (UTC).
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %-I:%M %p").to_string()
}

pub fn bill_status_variant(status: BillStatus) -> BadgeVariant {
    match status {
        BillStatus::Pending => BadgeVariant::Warning,
        BillStatus::InProgress => BadgeVariant::Primary,
        BillStatus::Completed | BillStatus::Delivered => BadgeVariant::Success,
        BillStatus::Cancelled => BadgeVariant::Destructive,
    }
}

pub fn job_status_variant(status: JobStatus) -> BadgeVariant {
    match status {
        JobStatus::Pending => BadgeVariant::Warning,
        JobStatus::InProgress => BadgeVariant::Primary,
        JobStatus::Completed => BadgeVariant::Success,
    }
}

pub fn priority_variant(priority: JobPriority) -> BadgeVariant {
    match priority {
        JobPriority::Low => BadgeVariant::Outline,
        JobPriority::Medium => BadgeVariant::Secondary,
        JobPriority::High => BadgeVariant::Destructive,
    }
}

/// Label of the button that moves a job to its next status.
pub fn advance_label(status: JobStatus) -> Option<&'static str> {
    match status.next()? {
        JobStatus::InProgress => Some("Start"),
        JobStatus::Completed => Some("Mark Complete"),
        JobStatus::Pending => None,
    }
}

/// Amounts shown on the bill form: `(subtotal, total, balance)`.
///
/// The server stores whatever the form submits; this only pre-fills it.
pub fn draft_amounts(items: &[BillItem], discount: f64, advance: f64) -> (f64, f64, f64) {
    let subtotal: f64 = items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum();
    let total = (subtotal - discount).max(0.0);
    let balance = (total - advance).max(0.0);
    (subtotal, total, balance)
}

/// Parse a money field; blank means zero, garbage means `None`.
pub fn parse_amount(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

/// `None` for a blank text field.
pub fn optional(input: String) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn rupees_are_grouped_in_thousands() {
        assert_eq!(format_rupees(0.0), "₹0.00");
        assert_eq!(format_rupees(950.5), "₹950.50");
        assert_eq!(format_rupees(1250.0), "₹1,250.00");
        assert_eq!(format_rupees(1234567.891), "₹1,234,567.89");
        assert_eq!(format_rupees(-40.0), "-₹40.00");
    }

    #[test]
    fn due_dates() {
        assert_eq!(format_due_date("2026-11-01"), "Nov 1, 2026");
        assert_eq!(format_due_date("next week"), "next week");
    }

    #[test]
    fn advance_labels_follow_job_flow() {
        assert_eq!(advance_label(JobStatus::Pending), Some("Start"));
        assert_eq!(advance_label(JobStatus::InProgress), Some("Mark Complete"));
        assert_eq!(advance_label(JobStatus::Completed), None);
    }

    #[test]
    fn draft_amounts_never_go_negative() {
        let items = vec![
            BillItem {
                kind: "shirt".into(),
                description: String::new(),
                quantity: 2,
                price: 600.0,
                measurements: HashMap::new(),
            },
            BillItem {
                kind: "trouser".into(),
                description: String::new(),
                quantity: 1,
                price: 800.0,
                measurements: HashMap::new(),
            },
        ];
        assert_eq!(draft_amounts(&items, 100.0, 500.0), (2000.0, 1900.0, 1400.0));
        assert_eq!(draft_amounts(&items, 5000.0, 0.0), (2000.0, 0.0, 0.0));
    }

    #[test]
    fn amount_fields() {
        assert_eq!(parse_amount(""), Some(0.0));
        assert_eq!(parse_amount(" 120.5 "), Some(120.5));
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(optional("  ".into()), None);
        assert_eq!(optional(" Ravi ".into()), Some("Ravi".to_string()));
    }
}
