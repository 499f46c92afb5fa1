pub mod clipboard;
pub mod notice;
pub mod report;
pub mod roster;
pub mod session;
pub mod settings;

pub use clipboard::{copy_report, Clipboard, ClipboardError, CopyOutcome};
pub use notice::Notice;
pub use report::{assemble, ReportInputs, ValidationError, BUSY_MARKER, DEFAULT_NOTES};
pub use roster::{Roster, RosterEntry, RosterError, Status};
pub use session::{ExtractionTicket, Session};
pub use settings::{RecognitionHints, Settings, SettingsError, SettingsStore, Theme, TomlFileStore};
