//! Query: search, filter and sort over an in-memory snapshot of events.
//!
//! Every operation borrows its input and returns a fresh `Vec`, so
//! stages compose by feeding one output into the next. Nothing here
//! fails: a blank or absent criterion passes events through untouched.

use std::cmp::Ordering;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::model::{Event, EventKind, Programme};

/// Keyword search across title, description and place.
///
/// Case-insensitive substring match. A blank keyword matches everything.
pub fn search(events: &[Event], keyword: &str) -> Vec<Event> {
    let k = normalize(keyword);
    events
        .iter()
        .filter(|e| {
            normalize(&e.title).contains(&k)
                || normalize(&e.description).contains(&k)
                || normalize(&e.place).contains(&k)
        })
        .cloned()
        .collect()
}

/// Keep events of the given kind. `None` keeps all of them.
pub fn filter_by_type(events: &[Event], kind: Option<EventKind>) -> Vec<Event> {
    events
        .iter()
        .filter(|e| kind.is_none_or(|k| e.kind == k))
        .cloned()
        .collect()
}

/// Type filter from free text, as a type chooser hands it over.
///
/// Blank or absent text keeps everything; text naming no kind keeps nothing.
pub fn filter_by_type_name(events: &[Event], name: Option<&str>) -> Vec<Event> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => events.to_vec(),
        Some(n) => match n.parse::<EventKind>() {
            Ok(kind) => filter_by_type(events, Some(kind)),
            Err(_) => Vec::new(),
        },
    }
}

/// Case-insensitive substring match on place only.
pub fn filter_by_place(events: &[Event], keyword: &str) -> Vec<Event> {
    let k = normalize(keyword);
    events
        .iter()
        .filter(|e| normalize(&e.place).contains(&k))
        .cloned()
        .collect()
}

/// Keep events whose start date falls inside `[from, to]`.
///
/// Both bounds are inclusive and optional. With neither bound every
/// event passes; with either, an event without a start never does.
pub fn filter_by_date_range(events: &[Event], from: Option<Date>, to: Option<Date>) -> Vec<Event> {
    if from.is_none() && to.is_none() {
        return events.to_vec();
    }
    events
        .iter()
        .filter(|e| {
            e.start.is_some_and(|start| {
                let day = start.date();
                from.is_none_or(|f| day >= f) && to.is_none_or(|t| day <= t)
            })
        })
        .cloned()
        .collect()
}

/// Earliest start first; events without a start go last.
pub fn sort_by_start_asc(events: &[Event]) -> Vec<Event> {
    sorted(events, |a, b| by_start(a, b, false))
}

/// Latest start first; events without a start still go last.
pub fn sort_by_start_desc(events: &[Event]) -> Vec<Event> {
    sorted(events, |a, b| by_start(a, b, true))
}

pub fn sort_by_title_asc(events: &[Event]) -> Vec<Event> {
    sorted(events, by_title)
}

pub fn sort_by_title_desc(events: &[Event]) -> Vec<Event> {
    sorted(events, |a, b| by_title(b, a))
}

/// Newest first, by storage id.
pub fn sort_by_id_desc(events: &[Event]) -> Vec<Event> {
    sorted(events, |a, b| b.id.cmp(&a.id))
}

/// Programmes in the order they happen.
pub fn sort_programmes_chronologically(programmes: &[Programme]) -> Vec<Programme> {
    let mut out = programmes.to_vec();
    out.sort_by_key(|p| p.start);
    out
}

/// The single sort applied at the end of a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    IdDesc,
    StartAsc,
    StartDesc,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    pub fn apply(self, events: &[Event]) -> Vec<Event> {
        match self {
            Self::IdDesc => sort_by_id_desc(events),
            Self::StartAsc => sort_by_start_asc(events),
            Self::StartDesc => sort_by_start_desc(events),
            Self::TitleAsc => sort_by_title_asc(events),
            Self::TitleDesc => sort_by_title_desc(events),
        }
    }
}

/// A full filter→sort pipeline.
///
/// Unset criteria are skipped. Stages run in a fixed order: keyword,
/// type, place, date window, then exactly one sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub keyword: Option<String>,
    pub kind: Option<EventKind>,
    pub place: Option<String>,
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub sort: SortOrder,
}

impl EventQuery {
    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        let mut list = events.to_vec();
        if let Some(k) = &self.keyword {
            list = search(&list, k);
        }
        if self.kind.is_some() {
            list = filter_by_type(&list, self.kind);
        }
        if let Some(p) = &self.place {
            list = filter_by_place(&list, p);
        }
        list = filter_by_date_range(&list, self.from, self.to);
        self.sort.apply(&list)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn sorted(events: &[Event], cmp: impl FnMut(&Event, &Event) -> Ordering) -> Vec<Event> {
    let mut out = events.to_vec();
    // `sort_by` is stable: ties keep their input order.
    out.sort_by(cmp);
    out
}

fn by_start(a: &Event, b: &Event, descending: bool) -> Ordering {
    match (a.start, b.start) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_title(a: &Event, b: &Event) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::{DateTime, date};

    fn at(day: i8, hour: i8) -> DateTime {
        date(2026, 2, day).at(hour, 0, 0, 0)
    }

    fn event(id: i64, title: &str, kind: EventKind, place: &str, start: Option<DateTime>) -> Event {
        Event {
            id,
            title: title.into(),
            description: format!("About {title}"),
            kind,
            start,
            end: None,
            place: place.into(),
            image: None,
        }
    }

    fn sample() -> Vec<Event> {
        vec![
            event(1, "Fabrika Soirée", EventKind::Soiree, "Tunis", Some(at(6, 20))),
            event(2, "Randonnée Atlas", EventKind::Randonnee, "Atlas", Some(at(3, 8))),
            event(3, "camping Ain Draham", EventKind::Camping, "Ain Draham", None),
            event(4, "Séjour Djerba", EventKind::Sejour, "Djerba", Some(at(14, 12))),
            event(5, "Soirée Sidi Bou", EventKind::Soiree, "Sidi Bou Said, Tunis", Some(at(10, 21))),
        ]
    }

    fn ids(events: &[Event]) -> Vec<i64> {
        events.iter().map(|e| e.id).collect()
    }

    #[test]
    fn search_matches_title_substring() {
        let events = vec![
            event(1, "Fabrika Soirée", EventKind::Soiree, "Tunis", None),
            event(2, "Randonnée Atlas", EventKind::Randonnee, "Atlas", None),
        ];
        let found = search(&events, "soi");
        assert_eq!(ids(&found), vec![1]);

        let found = search(&events, " SOIR ");
        assert_eq!(ids(&found), vec![1]);

        let found = search(&events, "atlas");
        assert_eq!(ids(&found), vec![2]);
    }

    #[test]
    fn search_looks_at_description_and_place() {
        let events = sample();
        assert_eq!(ids(&search(&events, "about séjour")), vec![4]);
        assert_eq!(ids(&search(&events, "tunis")), vec![1, 5]);
    }

    #[test]
    fn empty_search_is_identity() {
        let events = sample();
        assert_eq!(search(&events, ""), events);
        assert_eq!(search(&events, "   "), events);
    }

    #[test]
    fn filter_by_type_none_is_identity() {
        let events = sample();
        assert_eq!(filter_by_type(&events, None), events);
        assert_eq!(
            ids(&filter_by_type(&events, Some(EventKind::Soiree))),
            vec![1, 5]
        );
    }

    #[test]
    fn filter_by_type_name_is_case_insensitive() {
        let events = sample();
        assert_eq!(
            ids(&filter_by_type_name(&events, Some(" soiree "))),
            vec![1, 5]
        );
        assert_eq!(filter_by_type_name(&events, None), events);
        assert_eq!(filter_by_type_name(&events, Some("  ")), events);
        assert!(filter_by_type_name(&events, Some("picnic")).is_empty());
    }

    #[test]
    fn filter_by_place_ignores_title() {
        let events = sample();
        assert_eq!(ids(&filter_by_place(&events, "TUNIS")), vec![1, 5]);
        assert!(filter_by_place(&events, "fabrika").is_empty());
    }

    #[test]
    fn filters_are_idempotent() {
        let events = sample();
        let once = filter_by_place(&events, "tunis");
        assert_eq!(filter_by_place(&once, "tunis"), once);

        let once = filter_by_type(&events, Some(EventKind::Camping));
        assert_eq!(filter_by_type(&once, Some(EventKind::Camping)), once);

        let once = search(&events, "é");
        assert_eq!(search(&once, "é"), once);

        let (from, to) = (Some(date(2026, 2, 6)), Some(date(2026, 2, 10)));
        let once = filter_by_date_range(&events, from, to);
        assert_eq!(filter_by_date_range(&once, from, to), once);
    }

    #[test]
    fn date_window_is_inclusive_and_skips_missing_starts() {
        let events = sample();
        let window = filter_by_date_range(&events, Some(date(2026, 2, 6)), Some(date(2026, 2, 10)));
        assert_eq!(ids(&window), vec![1, 5]);

        let open_ended = filter_by_date_range(&events, Some(date(2026, 2, 10)), None);
        assert_eq!(ids(&open_ended), vec![4, 5]);

        let until = filter_by_date_range(&events, None, Some(date(2026, 2, 6)));
        assert_eq!(ids(&until), vec![1, 2]);

        let unbounded = filter_by_date_range(&events, None, None);
        assert_eq!(unbounded, events);
    }

    #[test]
    fn start_sorts_put_missing_starts_last_both_ways() {
        let events = sample();
        assert_eq!(ids(&sort_by_start_asc(&events)), vec![2, 1, 5, 4, 3]);
        assert_eq!(ids(&sort_by_start_desc(&events)), vec![4, 5, 1, 2, 3]);
    }

    #[test]
    fn start_sorts_reverse_each_other_for_dated_events() {
        let events = sample();
        let dated = |v: Vec<Event>| -> Vec<i64> {
            v.into_iter().filter(|e| e.start.is_some()).map(|e| e.id).collect()
        };
        let asc = dated(sort_by_start_asc(&events));
        let mut desc = dated(sort_by_start_desc(&events));
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn title_sorts_ignore_case() {
        let events = sample();
        assert_eq!(ids(&sort_by_title_asc(&events)), vec![3, 1, 2, 5, 4]);
        assert_eq!(ids(&sort_by_title_desc(&events)), vec![4, 5, 2, 1, 3]);
    }

    #[test]
    fn sorts_are_stable() {
        let events = vec![
            event(1, "Same", EventKind::Soiree, "A", Some(at(6, 20))),
            event(2, "same", EventKind::Soiree, "B", Some(at(6, 20))),
            event(3, "SAME", EventKind::Soiree, "C", Some(at(6, 20))),
        ];
        assert_eq!(ids(&sort_by_title_asc(&events)), vec![1, 2, 3]);
        assert_eq!(ids(&sort_by_title_desc(&events)), vec![1, 2, 3]);
        assert_eq!(ids(&sort_by_start_desc(&events)), vec![1, 2, 3]);
    }

    #[test]
    fn input_is_left_untouched() {
        let events = sample();
        let before = events.clone();
        let _ = sort_by_start_desc(&events);
        let _ = search(&events, "tunis");
        assert_eq!(events, before);
    }

    #[test]
    fn query_matches_stage_by_stage_composition() {
        let events = sample();
        let query = EventQuery {
            keyword: Some("soir".into()),
            kind: Some(EventKind::Soiree),
            place: Some("tunis".into()),
            from: Some(date(2026, 2, 1)),
            to: None,
            sort: SortOrder::StartDesc,
        };

        let manual = sort_by_start_desc(&filter_by_date_range(
            &filter_by_place(
                &filter_by_type(&search(&events, "soir"), Some(EventKind::Soiree)),
                "tunis",
            ),
            Some(date(2026, 2, 1)),
            None,
        ));

        assert_eq!(query.apply(&events), manual);
        assert_eq!(ids(&manual), vec![5, 1]);
    }

    #[test]
    fn default_query_orders_newest_first() {
        let events = sample();
        assert_eq!(ids(&EventQuery::default().apply(&events)), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn programmes_sort_by_start() {
        let p = |id, start| Programme {
            id,
            event_id: 1,
            title: format!("p{id}"),
            start,
            end: at(28, 0),
        };
        let list = vec![p(1, at(7, 10)), p(2, at(6, 21)), p(3, at(7, 9))];
        let sorted: Vec<i64> = sort_programmes_chronologically(&list)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(sorted, vec![2, 3, 1]);
    }
}
