use chrono::{DateTime, Local, NaiveDate, Utc};
use gloo_timers::callback::Timeout;
use regex::Regex;

use crate::dom::{add_class, get_element_by_id, remove_class};
use crate::models::NewCleaningRequest;

const TOAST_DURATION_MS: u32 = 4000;

// ----------------------------------------------------------------------
// Formatting
// ----------------------------------------------------------------------

/// "2025-08-02" -> "Sat, Aug 2, 2025". Unparseable input is shown as-is.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%a, %b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Timestamp -> "Jul 29, 4:15 PM" in local time.
pub fn format_date_time(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%b %-d, %-I:%M %p")
        .to_string()
}

/// "14:30" -> "2:30 PM".
pub fn format_time(time: &str) -> String {
    let Some((hours, minutes)) = time.split_once(':') else {
        return time.to_string();
    };
    let Ok(hours) = hours.parse::<u32>() else {
        return time.to_string();
    };

    let hour12 = match hours % 12 {
        0 => 12,
        h => h,
    };
    let ampm = if hours < 12 { "AM" } else { "PM" };
    format!("{}:{} {}", hour12, minutes, ampm)
}

// ----------------------------------------------------------------------
// Urgency
// ----------------------------------------------------------------------

/// Urgency bucket for a checkout date, driving the dashboard badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

impl Urgency {
    pub fn text(&self) -> &'static str {
        match self {
            Urgency::Critical => "🔴 URGENT - Today",
            Urgency::High => "🟡 Tomorrow",
            Urgency::Medium => "🟢 This Week",
            Urgency::Low => "⚪ Scheduled",
        }
    }

    pub fn level(&self) -> &'static str {
        match self {
            Urgency::Critical => "critical",
            Urgency::High => "high",
            Urgency::Medium => "medium",
            Urgency::Low => "low",
        }
    }
}

pub fn urgency(checkout_date: &str) -> Urgency {
    urgency_on(checkout_date, Local::now().date_naive())
}

fn urgency_on(checkout_date: &str, today: NaiveDate) -> Urgency {
    let Ok(checkout) = NaiveDate::parse_from_str(checkout_date, "%Y-%m-%d") else {
        return Urgency::Low;
    };

    let days = (checkout - today).num_days();
    if days < 1 {
        Urgency::Critical
    } else if days == 1 {
        Urgency::High
    } else if days <= 3 {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

// ----------------------------------------------------------------------
// Validation
// ----------------------------------------------------------------------

pub fn is_valid_email(email: &str) -> bool {
    match Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$") {
        Ok(regex) => regex.is_match(email),
        Err(_) => false,
    }
}

/// Validate an owner submission. Returns every violated rule, not just the
/// first one, so the form can show them all at once.
pub fn validate_new_request(data: &NewCleaningRequest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !is_valid_email(&data.owner_email) {
        errors.push("Valid email address is required".to_string());
    }

    if data.cabin_address.trim().len() < 10 {
        errors.push("Cabin address must be at least 10 characters".to_string());
    }

    if data.checkout_date.is_empty() {
        errors.push("Checkout date is required".to_string());
    } else {
        match NaiveDate::parse_from_str(&data.checkout_date, "%Y-%m-%d") {
            Ok(checkout) if checkout < Local::now().date_naive() => {
                errors.push("Checkout date cannot be in the past".to_string());
            }
            Ok(_) => {}
            Err(_) => errors.push("Checkout date is invalid".to_string()),
        }
    }

    if data.checkout_time.is_empty() {
        errors.push("Checkout time is required".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Escape user-supplied text before it is interpolated into markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ----------------------------------------------------------------------
// Toast + loading indicator
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Show the transient #notification toast, auto-hidden after 4 s.
pub fn show_notification(message: &str, kind: NotificationKind) {
    let Some(notification) = get_element_by_id("notification") else {
        return;
    };

    notification.set_text_content(Some(message));
    notification.set_class_name(match kind {
        NotificationKind::Success => "notification",
        NotificationKind::Error => "notification error",
    });
    add_class(&notification, "show");

    Timeout::new(TOAST_DURATION_MS, move || {
        remove_class(&notification, "show");
    })
    .forget();
}

pub fn show_loading() {
    if let Some(loading) = get_element_by_id("loading") {
        remove_class(&loading, "hidden");
    }
}

pub fn hide_loading() {
    if let Some(loading) = get_element_by_id("loading") {
        add_class(&loading, "hidden");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn formats_times_as_12_hour() {
        assert_eq!(format_time("11:00"), "11:00 AM");
        assert_eq!(format_time("14:30"), "2:30 PM");
        assert_eq!(format_time("00:15"), "12:15 AM");
        assert_eq!(format_time("12:00"), "12:00 PM");
        assert_eq!(format_time("nonsense"), "nonsense");
    }

    #[test]
    fn formats_dates_long_form() {
        assert_eq!(format_date("2025-08-02"), "Sat, Aug 2, 2025");
        assert_eq!(format_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn urgency_buckets_by_days_until_checkout() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let on = |days: i64| (today + Duration::days(days)).format("%Y-%m-%d").to_string();

        assert_eq!(urgency_on(&on(0), today), Urgency::Critical);
        assert_eq!(urgency_on(&on(-2), today), Urgency::Critical);
        assert_eq!(urgency_on(&on(1), today), Urgency::High);
        assert_eq!(urgency_on(&on(3), today), Urgency::Medium);
        assert_eq!(urgency_on(&on(10), today), Urgency::Low);
        assert_eq!(urgency_on("garbage", today), Urgency::Low);
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html("<b>\"dock & kitchen\"</b>"),
            "&lt;b&gt;&quot;dock &amp; kitchen&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn validates_email_shape() {
        assert!(is_valid_email("owner@email.com"));
        assert!(!is_valid_email("owner@email"));
        assert!(!is_valid_email("not an email"));
    }

    #[test]
    fn collects_all_validation_errors() {
        let bad = NewCleaningRequest {
            owner_email: "nope".to_string(),
            cabin_address: "short".to_string(),
            checkout_date: String::new(),
            checkout_time: String::new(),
            special_requests: String::new(),
        };

        let errors = validate_new_request(&bad).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn accepts_a_valid_submission() {
        let future = (Local::now().date_naive() + Duration::days(5))
            .format("%Y-%m-%d")
            .to_string();
        let ok = NewCleaningRequest {
            owner_email: "owner@email.com".to_string(),
            cabin_address: "123 Lakeshore Drive, Pine Lake".to_string(),
            checkout_date: future,
            checkout_time: "11:00".to_string(),
            special_requests: String::new(),
        };

        assert!(validate_new_request(&ok).is_ok());
    }
}
