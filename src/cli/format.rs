//! Parsing and formatting of dates and records for CLI display.

use jiff::civil::{Date, DateTime};

use crate::model::{Event, Programme};

const INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a `yyyy-MM-dd HH:mm` date-time. ISO-8601 (`2026-02-06T20:00`) is accepted too.
pub(super) fn parse_instant(s: &str) -> Result<DateTime, String> {
    let s = s.trim();
    DateTime::strptime(INSTANT_FORMAT, s)
        .or_else(|_| s.parse::<DateTime>())
        .map_err(|_| format!("invalid date-time '{s}' (expected yyyy-MM-dd HH:mm, e.g. 2026-02-06 20:00)"))
}

/// Parse a `yyyy-MM-dd` date.
pub(super) fn parse_date(s: &str) -> Result<Date, String> {
    let s = s.trim();
    s.parse::<Date>()
        .map_err(|_| format!("invalid date '{s}' (expected yyyy-MM-dd, e.g. 2026-02-06)"))
}

pub(super) fn format_instant(at: DateTime) -> String {
    at.strftime(INSTANT_FORMAT).to_string()
}

fn format_optional(at: Option<DateTime>) -> String {
    at.map_or_else(|| "-".to_string(), format_instant)
}

/// One line per event, for lists.
pub(super) fn event_line(event: &Event) -> String {
    format!(
        "{:>4}  {:<16}  [{}]  {} @ {}",
        event.id,
        format_optional(event.start),
        event.kind,
        event.title,
        event.place
    )
}

/// Full event details, for `event show`.
pub(super) fn event_details(event: &Event) -> String {
    let mut lines = vec![
        format!("#{} {} [{}]", event.id, event.title, event.kind),
        format!("  Place: {}", event.place),
        format!("  Start: {}", format_optional(event.start)),
        format!("  End:   {}", format_optional(event.end)),
    ];
    if let Some(image) = event.image_ref() {
        lines.push(format!("  Image: {image}"));
    }
    lines.push(format!("  {}", event.description));
    lines.join("\n")
}

/// One line per programme: the time slot, then the title.
pub(super) fn programme_line(programme: &Programme) -> String {
    format!(
        "{:>4}  {} → {}  {}",
        programme.id,
        format_instant(programme.start),
        format_instant(programme.end),
        programme.title
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    use crate::model::EventKind;

    fn sample_event() -> Event {
        Event {
            id: 3,
            title: "Fabrika Soirée".into(),
            description: "Live set".into(),
            kind: EventKind::Soiree,
            start: Some(date(2026, 2, 6).at(20, 0, 0, 0)),
            end: None,
            place: "Tunis".into(),
            image: Some("https://example.org/fabrika.jpg".into()),
        }
    }

    #[test]
    fn parses_console_format() {
        assert_eq!(
            parse_instant("2026-02-06 20:00").unwrap(),
            date(2026, 2, 6).at(20, 0, 0, 0)
        );
    }

    #[test]
    fn parses_iso_format() {
        assert_eq!(
            parse_instant("2026-02-06T20:00").unwrap(),
            date(2026, 2, 6).at(20, 0, 0, 0)
        );
    }

    #[test]
    fn rejects_garbage_instant() {
        let err = parse_instant("tomorrow").unwrap_err();
        assert!(err.contains("yyyy-MM-dd HH:mm"));
    }

    #[test]
    fn parses_date() {
        assert_eq!(parse_date(" 2026-02-06 ").unwrap(), date(2026, 2, 6));
        assert!(parse_date("06/02/2026").is_err());
    }

    #[test]
    fn formats_event_line() {
        assert_eq!(
            event_line(&sample_event()),
            "   3  2026-02-06 20:00  [SOIREE]  Fabrika Soirée @ Tunis"
        );
    }

    #[test]
    fn event_line_marks_missing_start() {
        let mut event = sample_event();
        event.start = None;
        assert!(event_line(&event).contains(&format!("{:<16}  [SOIREE]", "-")));
    }

    #[test]
    fn details_show_image_kind() {
        let details = event_details(&sample_event());
        assert!(details.contains("Image: https://example.org/fabrika.jpg (url)"));
        assert!(details.contains("End:   -"));
    }

    #[test]
    fn formats_programme_line() {
        let p = Programme {
            id: 12,
            event_id: 3,
            title: "Opening set".into(),
            start: date(2026, 2, 6).at(20, 30, 0, 0),
            end: date(2026, 2, 6).at(22, 0, 0, 0),
        };
        assert_eq!(
            programme_line(&p),
            "  12  2026-02-06 20:30 → 2026-02-06 22:00  Opening set"
        );
    }
}
