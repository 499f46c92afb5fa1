//! Assembly of the operations receipt message.
//!
//! The wording, emoji and blank lines below are what the receiving channel
//! expects; keep them byte-for-byte.

use thiserror::Error;

use crate::roster::{Roster, RosterEntry, Status};

/// Appended to a field line whose entry is busy.
pub const BUSY_MARKER: &str = "(مشغول)";

/// Notes text used when the operator leaves the default in place ("update").
pub const DEFAULT_NOTES: &str = "تحديث";

const HEADER: &str = "📌 استلام العمليات 📌 ";
const RECIPIENT_LABEL: &str = " المستلم : ";
const DEPUTY_LABEL: &str = " النائب : ";
const FIELD_LABEL: &str = "عدد و اسماء الوحدات الاسعافيه في الميدان :";
const OOS_LABEL: &str = "خارج الخدمه : ";
const CLOSING: &str = "🎙️ تم استلام العمليات و جاهزون للتعامل مع البلاغات";
const NOTES_LABEL: &str = "الملاحظات : ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Recipient is required")]
    MissingRecipient,
    #[error("Deputy is required")]
    MissingDeputy,
    #[error("Recipient and deputy are required")]
    MissingRecipientAndDeputy,
}

impl ValidationError {
    pub fn recipient_missing(self) -> bool {
        matches!(self, Self::MissingRecipient | Self::MissingRecipientAndDeputy)
    }

    pub fn deputy_missing(self) -> bool {
        matches!(self, Self::MissingDeputy | Self::MissingRecipientAndDeputy)
    }
}

/// Everything the assembler needs; rebuilt on every request.
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub recipient: &'a str,
    pub deputy: &'a str,
    pub notes: &'a str,
    pub roster: &'a Roster,
}

impl ReportInputs<'_> {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.recipient.trim().is_empty(), self.deputy.trim().is_empty()) {
            (false, false) => Ok(()),
            (true, false) => Err(ValidationError::MissingRecipient),
            (false, true) => Err(ValidationError::MissingDeputy),
            (true, true) => Err(ValidationError::MissingRecipientAndDeputy),
        }
    }
}

/// Render the report. Identical inputs always give identical output.
pub fn assemble(inputs: &ReportInputs<'_>) -> Result<String, ValidationError> {
    inputs.validate()?;

    let roster = inputs.roster;
    let field_lines: Vec<String> = roster.in_field().map(field_line).collect();
    let oos_lines: Vec<String> = roster.out_of_service().map(RosterEntry::display_name).collect();
    // The recipient is a field unit but never listed.
    let total_field = field_lines.len() + 1;

    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str("\n\n");
    out.push_str(RECIPIENT_LABEL);
    out.push_str(inputs.recipient);
    out.push_str("\n\n");
    out.push_str(DEPUTY_LABEL);
    out.push_str(inputs.deputy);
    out.push_str("\n \n");
    out.push_str(FIELD_LABEL);
    out.push_str(&format!("{{{total_field}}}\n"));
    out.push_str(&block(&field_lines));
    out.push('\n');
    out.push_str(OOS_LABEL);
    out.push_str(&format!("({})\n", oos_lines.len()));
    out.push_str(&block(&oos_lines));
    out.push('\n');
    out.push_str(CLOSING);
    out.push_str("\n\n");
    out.push_str(NOTES_LABEL);
    out.push_str(inputs.notes);
    Ok(out)
}

fn field_line(entry: &RosterEntry) -> String {
    let line = entry.display_name();
    match entry.status {
        Status::Busy => format!("{line} {BUSY_MARKER}"),
        Status::Field | Status::OutOfService => line,
    }
}

/// Lines joined by newlines with a trailing newline, or nothing at all.
fn block(lines: &[String]) -> String {
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}
