//! Webhook URL templating
//!
//! The reporting endpoint is a URL template with two substitution points,
//! `{temperature}` and `{humidity}`. Values are rendered with one decimal,
//! matching what the display shows. Unknown placeholders pass through
//! untouched so endpoint query syntax is not mangled.

use core::fmt::Write;

use heapless::String;

use hygrochron_core::reading::Reading;

pub const MAX_URL_LEN: usize = 256;

/// Substitute the reading into a URL template
///
/// Returns `None` when the result would not fit `MAX_URL_LEN`.
pub fn format_url(template: &str, reading: &Reading) -> Option<String<MAX_URL_LEN>> {
    let mut url: String<MAX_URL_LEN> = String::new();
    let mut remainder = template;

    while let Some(start) = remainder.find('{') {
        url.push_str(&remainder[..start]).ok()?;
        let rest = &remainder[start..];
        let Some(end) = rest.find('}') else {
            // Unterminated brace, keep it literally
            url.push_str(rest).ok()?;
            return Some(url);
        };
        match &rest[1..end] {
            "temperature" => write!(url, "{:.1}", reading.temperature).ok()?,
            "humidity" => write!(url, "{:.1}", reading.humidity).ok()?,
            _ => url.push_str(&rest[..=end]).ok()?,
        }
        remainder = &rest[end + 1..];
    }
    url.push_str(remainder).ok()?;
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_both_points() {
        let reading = Reading::celsius(21.5, 48.0);
        let url = format_url(
            "http://example.com/update?field1={temperature}&field2={humidity}",
            &reading,
        )
        .unwrap();
        assert_eq!(url, "http://example.com/update?field1=21.5&field2=48.0");
    }

    #[test]
    fn test_negative_temperature() {
        let reading = Reading::celsius(-10.1, 93.4);
        let url = format_url("t={temperature}", &reading).unwrap();
        assert_eq!(url, "t=-10.1");
    }

    #[test]
    fn test_unknown_placeholder_passes_through() {
        let reading = Reading::celsius(20.0, 40.0);
        let url = format_url("k={api_key}&t={temperature}", &reading).unwrap();
        assert_eq!(url, "k={api_key}&t=20.0");
    }

    #[test]
    fn test_without_placeholders() {
        let reading = Reading::celsius(20.0, 40.0);
        let url = format_url("http://example.com/ping", &reading).unwrap();
        assert_eq!(url, "http://example.com/ping");
    }

    #[test]
    fn test_overflow_is_none() {
        let reading = Reading::celsius(20.0, 40.0);
        let long: std::string::String = core::iter::repeat('x').take(MAX_URL_LEN + 1).collect();
        assert!(format_url(&long, &reading).is_none());
    }
}
