//! Default playlist naming from the venue schedule.
//!
//! Schedules carry show dates like "Wednesday Jan 29, 2025 4:00 AM" or
//! "Tuesday, Dec 3, 2024 6:00 PM". The playlist is named after the month
//! of the first show.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::AlbumRequest;

pub const DEFAULT_VENUE: &str = "Shibuya Seattle";
pub const DEFAULT_VENUE_DESCRIPTION: &str = "Shibuya Hifi Room, Seattle";

const SHOW_DATE_FORMATS: [&str; 2] = ["%A %b %d, %Y %I:%M %p", "%A, %b %d, %Y %I:%M %p"];

/// Parse a show date in either schedule format.
pub fn parse_show_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    SHOW_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

/// "January 2025"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Default `(name, description)` for a run.
///
/// Uses the first request's show date when it parses, otherwise `today`.
pub fn default_playlist(
    requests: &[AlbumRequest],
    venue: &str,
    venue_description: &str,
    today: NaiveDate,
) -> (String, String) {
    let month = requests
        .first()
        .and_then(|r| r.date.as_deref())
        .and_then(parse_show_date)
        .map(|dt| dt.date())
        .unwrap_or(today);
    let label = month_label(month);

    (
        format!("{} - {}", venue, label),
        format!("{} - {} playlist", venue_description, label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_parse_without_weekday_comma() {
        let dt = parse_show_date("Wednesday Jan 29, 2025 4:00 AM").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2025, 1, 29).unwrap());
        assert_eq!(dt.hour(), 4);
    }

    #[test]
    fn test_parse_with_weekday_comma() {
        let dt = parse_show_date("Tuesday, Dec 3, 2024 6:00 PM").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 12, 3).unwrap());
        assert_eq!(dt.hour(), 18);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_show_date("sometime in January").is_none());
        assert!(parse_show_date("").is_none());
    }

    #[test]
    fn test_default_playlist_from_first_date() {
        let requests = vec![
            AlbumRequest::new("Marvin Gaye", "What's Going On")
                .with_date("Wednesday Jan 29, 2025 4:00 AM"),
            AlbumRequest::new("Raveena", "Lucid").with_date("Saturday Feb 1, 2025 2:00 AM"),
        ];
        let (name, description) =
            default_playlist(&requests, DEFAULT_VENUE, DEFAULT_VENUE_DESCRIPTION, today());
        assert_eq!(name, "Shibuya Seattle - January 2025");
        assert_eq!(description, "Shibuya Hifi Room, Seattle - January 2025 playlist");
    }

    #[test]
    fn test_default_playlist_falls_back_to_today() {
        let requests = vec![AlbumRequest::new("U2", "The Unforgettable Fire")];
        let (name, _) = default_playlist(&requests, DEFAULT_VENUE, DEFAULT_VENUE_DESCRIPTION, today());
        assert_eq!(name, "Shibuya Seattle - October 2026");

        let (name, _) = default_playlist(&[], "Other Room", "desc", today());
        assert_eq!(name, "Other Room - October 2026");
    }
}
