//! Schedule text scanning and conflict detection.
//!
//! The scan applies one pattern to externally produced text (e.g. OCR output
//! of a timetable photo) and pulls out `name start end` triples. Times use a
//! fixed 12-hour clock; entries whose times do not parse are silently
//! dropped rather than reported. That drop is long-standing behavior the
//! rest of the system relies on, so the tests pin it down.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;

use crate::models::ScheduleEvent;

/// `Subject 10:00 AM 12:00 PM` — subject, start, end.
const SCHEDULE_PATTERN: &str =
    r"([A-Za-z\s]+)\s(\d{1,2}:\d{2}\s?(?:AM|PM)?)\s(\d{1,2}:\d{2}\s?(?:AM|PM)?)";

fn schedule_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SCHEDULE_PATTERN).expect("schedule pattern is valid"))
}

/// Parse a 12-hour clock time like "10:00 AM".
pub fn parse_clock(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%I:%M %p").ok()
}

/// A pair of events whose time intervals overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub event: String,
    pub overlaps_with: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Conflict: {} overlaps with {}", self.event, self.overlaps_with)
    }
}

/// Strict interval overlap: touching intervals (end == start) do not count.
fn overlaps(a: (NaiveTime, NaiveTime), b: (NaiveTime, NaiveTime)) -> bool {
    a.0 < b.1 && a.1 > b.0
}

/// Result of scanning schedule text.
#[derive(Debug, Default)]
pub struct ScheduleScan {
    pub events: Vec<ScheduleEvent>,
    pub conflicts: Vec<Conflict>,
}

/// Extract events from free text and flag overlaps among them.
///
/// Each accepted match is compared against the matches accepted before it,
/// so every overlapping pair is reported exactly once per pass. Matches with
/// unparsable times are skipped.
pub fn scan_schedule_text(text: &str) -> ScheduleScan {
    let mut scan = ScheduleScan::default();
    let mut parsed: Vec<(NaiveTime, NaiveTime)> = Vec::new();

    for caps in schedule_regex().captures_iter(text) {
        let subject = caps[1].trim().to_string();
        let start_raw = caps[2].to_string();
        let end_raw = caps[3].to_string();

        let (Some(start), Some(end)) = (parse_clock(&start_raw), parse_clock(&end_raw)) else {
            log::debug!("Dropping '{subject}': unparsable time(s) '{start_raw}'/'{end_raw}'");
            continue;
        };

        for (i, &existing) in parsed.iter().enumerate() {
            if overlaps((start, end), existing) {
                scan.conflicts.push(Conflict {
                    event: subject.clone(),
                    overlaps_with: scan.events[i].name.clone(),
                });
            }
        }

        parsed.push((start, end));
        scan.events
            .push(ScheduleEvent::new(subject, start_raw, end_raw));
    }

    scan
}

/// Report every overlapping pair among stored events, in input order.
///
/// Events whose times do not parse are excluded from the check entirely.
pub fn find_conflicts(events: &[ScheduleEvent]) -> Vec<Conflict> {
    let parsed: Vec<(&ScheduleEvent, (NaiveTime, NaiveTime))> = events
        .iter()
        .filter_map(|e| {
            match (parse_clock(&e.start_time), parse_clock(&e.end_time)) {
                (Some(start), Some(end)) => Some((e, (start, end))),
                _ => {
                    log::debug!("Skipping '{}' in conflict check: unparsable times", e.name);
                    None
                }
            }
        })
        .collect();

    let mut conflicts = Vec::new();
    for j in 1..parsed.len() {
        for i in 0..j {
            if overlaps(parsed[j].1, parsed[i].1) {
                conflicts.push(Conflict {
                    event: parsed[j].0.name.clone(),
                    overlaps_with: parsed[i].0.name.clone(),
                });
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, start: &str, end: &str) -> ScheduleEvent {
        ScheduleEvent::new(name, start, end)
    }

    #[test]
    fn overlapping_events_are_reported_with_both_names() {
        let conflicts = find_conflicts(&[
            event("Maths", "10:00 AM", "12:00 PM"),
            event("Physics", "11:00 AM", "1:00 PM"),
        ]);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].event, "Physics");
        assert_eq!(conflicts[0].overlaps_with, "Maths");
        assert_eq!(
            conflicts[0].to_string(),
            "Conflict: Physics overlaps with Maths"
        );
    }

    #[test]
    fn back_to_back_events_do_not_conflict() {
        let conflicts = find_conflicts(&[
            event("Maths", "10:00 AM", "11:00 AM"),
            event("Physics", "11:00 AM", "12:00 PM"),
        ]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn every_overlapping_pair_is_reported_once() {
        // Three events all overlapping the 10-11 hour: 3 pairs.
        let conflicts = find_conflicts(&[
            event("A", "9:00 AM", "11:00 AM"),
            event("B", "10:00 AM", "12:00 PM"),
            event("C", "10:30 AM", "11:30 AM"),
        ]);
        assert_eq!(conflicts.len(), 3);
    }

    #[test]
    fn unparsable_times_are_dropped_from_the_check() {
        // Documented current behavior: bad times vanish silently instead of
        // surfacing an error.
        let conflicts = find_conflicts(&[
            event("Maths", "10:00 AM", "12:00 PM"),
            event("Mystery", "soon", "later"),
            event("Physics", "11:00 AM", "1:00 PM"),
        ]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].event, "Physics");
    }

    #[test]
    fn parse_clock_requires_meridiem() {
        assert!(parse_clock("10:00 AM").is_some());
        assert!(parse_clock("1:30 pm").is_some());
        assert!(parse_clock("10:00").is_none());
        assert!(parse_clock("25:00 AM").is_none());
    }

    #[test]
    fn scan_extracts_events_from_text() {
        let text = "Maths 9:00 AM 10:00 AM\nPhysics 10:00 AM 11:00 AM\n";
        let scan = scan_schedule_text(text);

        assert_eq!(scan.events.len(), 2);
        assert_eq!(scan.events[0].name, "Maths");
        assert_eq!(scan.events[1].start_time, "10:00 AM");
        assert!(scan.conflicts.is_empty());
    }

    #[test]
    fn scan_flags_overlaps_between_extracted_events() {
        let text = "Maths 9:00 AM 11:00 AM\nPhysics 10:00 AM 12:00 PM\n";
        let scan = scan_schedule_text(text);

        assert_eq!(scan.events.len(), 2);
        assert_eq!(scan.conflicts.len(), 1);
        assert_eq!(scan.conflicts[0].event, "Physics");
        assert_eq!(scan.conflicts[0].overlaps_with, "Maths");
    }

    #[test]
    fn scan_skips_entries_without_meridiem() {
        // "10:00 11:00" matches the pattern but fails the 12-hour parse.
        let text = "Chemistry 10:00 11:00\nBiology 1:00 PM 2:00 PM\n";
        let scan = scan_schedule_text(text);

        assert_eq!(scan.events.len(), 1);
        assert_eq!(scan.events[0].name, "Biology");
    }
}
