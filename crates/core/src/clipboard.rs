use thiserror::Error;
use tracing::warn;

use crate::notice::Notice;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("No clipboard tool available")]
    Unavailable,
    #[error("Clipboard write failed: {0}")]
    Write(String),
}

/// Destination for the finished report.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    NothingToCopy,
    Copied,
}

impl CopyOutcome {
    pub fn notice(self) -> Option<Notice> {
        match self {
            CopyOutcome::NothingToCopy => None,
            CopyOutcome::Copied => Some(Notice::Copied),
        }
    }
}

/// Copy the session's current report once. Failures are returned, never retried.
pub fn copy_report<C: Clipboard + ?Sized>(
    session: &Session,
    clipboard: &mut C,
) -> Result<CopyOutcome, ClipboardError> {
    let Some(text) = session.report().filter(|t| !t.is_empty()) else {
        return Ok(CopyOutcome::NothingToCopy);
    };
    clipboard.set_text(text).map_err(|e| {
        warn!(error = %e, "copy to clipboard failed");
        e
    })?;
    Ok(CopyOutcome::Copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording {
        writes: Vec<String>,
        fail: bool,
    }

    impl Clipboard for Recording {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Write("denied".into()));
            }
            self.writes.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn nothing_to_copy_without_report() {
        let mut clip = Recording::default();
        let outcome = copy_report(&Session::new(), &mut clip).unwrap();
        assert_eq!(outcome, CopyOutcome::NothingToCopy);
        assert!(clip.writes.is_empty());
        assert_eq!(outcome.notice(), None);
    }

    #[test]
    fn copies_current_report_once() {
        let mut session = Session::new();
        session.edit_report("تقرير");
        let mut clip = Recording::default();
        let outcome = copy_report(&session, &mut clip).unwrap();
        assert_eq!(outcome.notice(), Some(Notice::Copied));
        assert_eq!(clip.writes, ["تقرير"]);
    }

    #[test]
    fn failure_is_surfaced() {
        let mut session = Session::new();
        session.edit_report("تقرير");
        let mut clip = Recording { fail: true, ..Default::default() };
        assert!(matches!(copy_report(&session, &mut clip), Err(ClipboardError::Write(_))));
    }
}
