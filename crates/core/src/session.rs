use tracing::{debug, warn};

use crate::report::{assemble, ReportInputs, ValidationError, DEFAULT_NOTES};
use crate::roster::{Roster, RosterError, Status};

/// Handed out when an extraction starts; only the newest ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionTicket(u64);

impl ExtractionTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// The single editor's working state: roster, the three text inputs and the last report.
#[derive(Debug, Clone)]
pub struct Session {
    roster: Roster,
    pub recipient: String,
    pub deputy: String,
    pub notes: String,
    report: Option<String>,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_notes(DEFAULT_NOTES)
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(notes: impl Into<String>) -> Self {
        Self {
            roster: Roster::new(),
            recipient: String::new(),
            deputy: String::new(),
            notes: notes.into(),
            report: None,
            generation: 0,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    pub fn begin_extraction(&mut self) -> ExtractionTicket {
        self.generation += 1;
        ExtractionTicket(self.generation)
    }

    /// Replace the roster in full. Returns `false` and leaves the roster alone
    /// when a newer extraction has started since `ticket` was issued.
    pub fn complete_extraction(&mut self, ticket: ExtractionTicket, roster: Roster) -> bool {
        if ticket.0 != self.generation {
            warn!(
                ticket = ticket.0,
                current = self.generation,
                "discarding stale extraction result"
            );
            return false;
        }
        debug!(entries = roster.len(), "roster replaced");
        self.roster = roster;
        true
    }

    /// Replace the roster with one supplied directly (e.g. a saved file),
    /// superseding any extraction still in flight.
    pub fn load_roster(&mut self, roster: Roster) {
        let ticket = self.begin_extraction();
        self.complete_extraction(ticket, roster);
    }

    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), RosterError> {
        self.roster.set_name(index, name)
    }

    pub fn set_code(&mut self, index: usize, code: impl Into<String>) -> Result<(), RosterError> {
        self.roster.set_code(index, code)
    }

    pub fn set_status(&mut self, index: usize, status: Status) -> Result<(), RosterError> {
        self.roster.set_status(index, status)
    }

    /// Assemble and store the report. A validation failure keeps the previous report.
    pub fn generate_report(&mut self) -> Result<&str, ValidationError> {
        let text = assemble(&ReportInputs {
            recipient: &self.recipient,
            deputy: &self.deputy,
            notes: &self.notes,
            roster: &self.roster,
        })?;
        Ok(self.report.insert(text).as_str())
    }

    /// Manual correction of the generated text.
    pub fn edit_report(&mut self, text: impl Into<String>) {
        self.report = Some(text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::RosterEntry;

    fn roster(names: &[&str]) -> Roster {
        Roster::from(names.iter().map(|n| RosterEntry::new(*n, "")).collect::<Vec<_>>())
    }

    #[test]
    fn new_session_uses_default_notes() {
        let s = Session::new();
        assert_eq!(s.notes, DEFAULT_NOTES);
        assert!(s.roster().is_empty());
        assert!(s.report().is_none());
    }

    #[test]
    fn latest_extraction_replaces_roster() {
        let mut s = Session::new();
        let t = s.begin_extraction();
        assert!(s.complete_extraction(t, roster(&["سارة"])));
        let t = s.begin_extraction();
        assert!(s.complete_extraction(t, roster(&["علي", "هند"])));
        assert_eq!(s.roster().len(), 2);
    }

    #[test]
    fn stale_extraction_is_discarded() {
        let mut s = Session::new();
        let first = s.begin_extraction();
        let second = s.begin_extraction();
        assert!(s.complete_extraction(second, roster(&["علي"])));
        assert!(!s.complete_extraction(first, roster(&["قديم"])));
        assert_eq!(s.roster().entries()[0].name, "علي");
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn loading_a_roster_supersedes_pending_extraction() {
        let mut s = Session::new();
        let pending = s.begin_extraction();
        s.load_roster(roster(&["محفوظ"]));
        assert!(!s.complete_extraction(pending, roster(&["متأخر"])));
        assert_eq!(s.roster().entries()[0].name, "محفوظ");
    }

    #[test]
    fn unfinished_extraction_leaves_roster_in_place() {
        let mut s = Session::new();
        s.load_roster(roster(&["سارة", "علي"]));
        let _failed = s.begin_extraction();
        assert_eq!(s.roster(), &roster(&["سارة", "علي"]));
    }

    #[test]
    fn failed_validation_keeps_previous_report() {
        let mut s = Session::new();
        s.recipient = "R".into();
        s.deputy = "D".into();
        let first = s.generate_report().unwrap().to_string();

        s.deputy.clear();
        assert_eq!(s.generate_report().unwrap_err(), ValidationError::MissingDeputy);
        assert_eq!(s.report(), Some(first.as_str()));
    }

    #[test]
    fn status_edits_flow_into_report() {
        let mut s = Session::new();
        s.recipient = "R".into();
        s.deputy = "D".into();
        let t = s.begin_extraction();
        s.complete_extraction(t, roster(&["سارة", "علي"]));
        s.set_status(1, Status::OutOfService).unwrap();
        s.set_code(1, "X1").unwrap();

        let report = s.generate_report().unwrap();
        assert!(report.contains(":{2}\nسارة\n"));
        assert!(report.contains("(1)\nعلي X1\n"));
    }

    #[test]
    fn manual_edit_overwrites_report() {
        let mut s = Session::new();
        s.edit_report("نص معدل");
        assert_eq!(s.report(), Some("نص معدل"));
    }
}
