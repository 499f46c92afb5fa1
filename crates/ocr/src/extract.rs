use istilam_core::{Roster, RosterEntry};
use tracing::debug;

use crate::parse::parse_line;

/// True when the line has at least one character in the Arabic block (U+0600–U+06FF).
pub fn has_arabic(line: &str) -> bool {
    line.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

/// Turn raw OCR lines into a deduplicated roster.
///
/// Lines without Arabic text and lines whose name comes out empty are
/// dropped. Surviving entries start as field units; the first entry per
/// name/code pair wins.
pub fn extract_roster<I, S>(lines: I) -> Roster
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let candidates = lines.into_iter().filter_map(|line| {
        let line = line.as_ref();
        if !has_arabic(line) {
            debug!(line, "skipping line without Arabic text");
            return None;
        }
        let record = parse_line(line);
        if record.name.is_empty() {
            debug!(line, "skipping line with no name after cleanup");
            return None;
        }
        Some(RosterEntry::new(record.name, record.code))
    });
    Roster::from_candidates(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use istilam_core::Status;

    #[test]
    fn scenario_noise_and_duplicates() {
        let roster = extract_roster([
            "أحمد علي AB-12",
            "random noise !!!",
            "أحمد علي AB-12",
            "سارة CD34",
        ]);
        assert_eq!(
            roster.entries(),
            [RosterEntry::new("أحمد علي", "AB-12"), RosterEntry::new("سارة", "CD34")]
        );
        assert!(roster.iter().all(|e| e.status == Status::Field));
    }

    #[test]
    fn latin_only_lines_never_produce_entries() {
        let roster = extract_roster(["John Smith AB-12", "AB12", "1234", "Total: 5"]);
        assert!(roster.is_empty());
    }

    #[test]
    fn arabic_punctuation_alone_is_dropped_after_cleanup() {
        // Contains an Arabic comma but no name once separators are removed.
        let roster = extract_roster(["، ؛ :"]);
        assert!(roster.is_empty());
    }

    #[test]
    fn duplicates_after_normalization_collapse_to_first() {
        let roster = extract_roster(["سارة: CD34", "«سارة» CD34", "سارة CD35"]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.entries()[0], RosterEntry::new("سارة", "CD34"));
        assert_eq!(roster.entries()[1].code, "CD35");
    }

    #[test]
    fn order_follows_input() {
        let roster = extract_roster(["هند", "X1 علي", "مريم Z7"]);
        let names: Vec<_> = roster.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["هند", "علي", "مريم"]);
    }

    #[test]
    fn names_never_keep_latin_letters() {
        let roster = extract_roster(["محمد AB12 علي", "AB1 سعيد CD2", "xy12 محمد علي ZZ9"]);
        assert_eq!(
            roster.entries(),
            [
                RosterEntry::new("محمد 12 علي", ""),
                RosterEntry::new("1 سعيد", "CD2"),
                RosterEntry::new("12 محمد علي", "ZZ9"),
            ]
        );
        assert!(roster.iter().all(|e| !e.name.chars().any(|c| c.is_ascii_alphabetic())));
    }

    #[test]
    fn has_arabic_detects_block() {
        assert!(has_arabic("abc ع"));
        assert!(has_arabic("؛"));
        assert!(!has_arabic("abc 123 !!"));
    }
}
