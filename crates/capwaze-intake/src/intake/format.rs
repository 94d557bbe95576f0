//! Display helpers used while assembling the notification document.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Placeholder for absent business and funding details.
pub const NOT_SPECIFIED: &str = "Not specified";
/// Placeholder for absent personal and identity details.
pub const NOT_PROVIDED: &str = "Not provided";

/// Which placeholder an absent field falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Business,
    Personal,
}

impl FieldCategory {
    pub fn placeholder(self) -> &'static str {
        match self {
            FieldCategory::Business => NOT_SPECIFIED,
            FieldCategory::Personal => NOT_PROVIDED,
        }
    }
}

pub fn or_placeholder(value: Option<&str>, category: FieldCategory) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => category.placeholder().to_string(),
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y"];
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Long-form date such as `January 5, 2024`.
///
/// Absent values read `Not provided`. Surrounding whitespace is ignored when parsing, so
/// `" 2024-01-05 "` renders as `January 5, 2024`; input that does not parse as a calendar
/// date is returned exactly as given, whitespace included.
pub fn format_date(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return NOT_PROVIDED.to_string(),
    };

    match parse_calendar_date(raw.trim()) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|timestamp| timestamp.date())
        })
}

/// Join the present address parts with `", "`, in street/city/state/postal order.
pub fn format_address(
    street: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
    postal_code: Option<&str>,
) -> String {
    let parts: Vec<&str> = [street, city, state, postal_code]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        parts.join(", ")
    }
}

/// Footer timestamp, e.g. `3/14/2025, 9:05:07 AM`.
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Escape text for embedding in HTML element content or a quoted attribute.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escape free text and turn its line breaks into `<br>`.
pub fn multiline_html(raw: &str) -> String {
    escape_html(raw)
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn address_skips_empty_components() {
        assert_eq!(
            format_address(Some("123 Main St"), Some(""), Some("CA"), Some("90001")),
            "123 Main St, CA, 90001"
        );
        assert_eq!(
            format_address(None, Some("Austin"), None, Some("73301")),
            "Austin, 73301"
        );
    }

    #[test]
    fn address_without_components_is_not_provided() {
        assert_eq!(
            format_address(Some(""), Some(""), Some(""), Some("")),
            NOT_PROVIDED
        );
        assert_eq!(format_address(None, None, None, None), NOT_PROVIDED);
    }

    #[test]
    fn dates_render_long_form() {
        assert_eq!(format_date(Some("2024-01-05")), "January 5, 2024");
        assert_eq!(format_date(Some("03/14/2019")), "March 14, 2019");
        assert_eq!(format_date(Some("2021-07-04T10:30:00Z")), "July 4, 2021");
        assert_eq!(format_date(Some("2021-07-04T10:30:00")), "July 4, 2021");
        assert_eq!(format_date(Some("December 25, 2020")), "December 25, 2020");
    }

    #[test]
    fn unparsable_dates_are_returned_raw() {
        assert_eq!(format_date(Some("not-a-date")), "not-a-date");
        assert_eq!(format_date(Some("2024-02-30")), "2024-02-30");
    }

    #[test]
    fn surrounding_whitespace_is_ignored_only_for_parsing() {
        assert_eq!(format_date(Some(" 2024-01-05 ")), "January 5, 2024");
        assert_eq!(format_date(Some("\t01/05/2024\n")), "January 5, 2024");
        assert_eq!(format_date(Some(" nope ")), " nope ");
    }

    #[test]
    fn absent_dates_are_not_provided() {
        assert_eq!(format_date(None), NOT_PROVIDED);
        assert_eq!(format_date(Some("")), NOT_PROVIDED);
    }

    #[test]
    fn placeholders_follow_field_category() {
        assert_eq!(or_placeholder(None, FieldCategory::Business), "Not specified");
        assert_eq!(or_placeholder(Some(""), FieldCategory::Personal), "Not provided");
        assert_eq!(or_placeholder(Some("LLC"), FieldCategory::Business), "LLC");
    }

    #[test]
    fn timestamp_uses_twelve_hour_clock() {
        let offset = FixedOffset::west_opt(5 * 3600).expect("valid offset");
        let at = offset
            .with_ymd_and_hms(2025, 3, 14, 21, 5, 7)
            .single()
            .expect("valid timestamp");
        assert_eq!(format_timestamp(&at), "3/14/2025, 9:05:07 PM");
    }

    #[test]
    fn html_is_escaped_and_line_breaks_converted() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(multiline_html("line one\nline two\r\nthree"), "line one<br>line two<br>three");
    }
}
