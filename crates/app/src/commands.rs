use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use istilam_core::{
    copy_report, Notice, Roster, Session, Settings, SettingsStore, Status, TomlFileStore,
};
use istilam_ocr::{OcrBackend, RosterPipeline};
use tracing::{info, warn};

use crate::cli::{ExtractArgs, ReportArgs, ReportOptions, RunArgs, ThemeArgs};
use crate::clipboard::SystemClipboard;

/// Exit status when the recipient or deputy is missing.
const EXIT_INVALID_INPUT: u8 = 2;

pub async fn extract(args: ExtractArgs, settings: &Settings) -> Result<ExitCode> {
    let mut session = Session::with_notes(settings.default_notes.clone());
    extract_into(&mut session, &args.image, settings).await?;
    print_roster(session.roster());
    if let Some(out) = &args.out {
        save_roster(session.roster(), out)?;
    }
    Ok(ExitCode::SUCCESS)
}

pub fn report(args: ReportArgs, settings: &Settings) -> Result<ExitCode> {
    let mut session = Session::with_notes(settings.default_notes.clone());
    session.load_roster(load_roster(&args.roster)?);
    apply_edits(&mut session, &args.report)?;
    Ok(exit_code(finish(&mut session, &args.report)?))
}

pub async fn run(args: RunArgs, settings: &Settings) -> Result<ExitCode> {
    let mut session = Session::with_notes(settings.default_notes.clone());
    extract_into(&mut session, &args.image, settings).await?;
    apply_edits(&mut session, &args.report)?;
    print_roster(session.roster());
    if let Some(out) = &args.out {
        save_roster(session.roster(), out)?;
    }
    Ok(exit_code(finish(&mut session, &args.report)?))
}

pub fn theme(args: ThemeArgs, store: &TomlFileStore) -> Result<ExitCode> {
    let mut settings = store.load()?;
    if args.toggle {
        settings.theme = settings.theme.toggled();
        store
            .save(&settings)
            .with_context(|| format!("failed to save {}", store.path().display()))?;
        info!(theme = %settings.theme, "theme preference saved");
    }
    println!("{}", settings.theme);
    Ok(ExitCode::SUCCESS)
}

// ── Session steps ─────────────────────────────────────────────────────────────

async fn extract_into(session: &mut Session, image: &Path, settings: &Settings) -> Result<()> {
    let ticket = session.begin_extraction();
    let backend = recognizer(settings).inspect_err(|_| eprintln!("{}", Notice::RecognitionFailed))?;
    let pipeline = RosterPipeline::new(backend, settings.recognition.clone())
        .with_max_dimension(settings.max_image_dimension);

    let extraction = pipeline.process_file(image).await.map_err(|e| {
        eprintln!("{}", e.notice());
        anyhow::Error::new(e).context(format!("failed to extract roster from {}", image.display()))
    })?;

    if extraction.roster.is_empty() {
        warn!(digest = %extraction.source_digest, "no roster entries recognized");
    }
    session.complete_extraction(ticket, extraction.roster);
    Ok(())
}

fn apply_edits(session: &mut Session, opts: &ReportOptions) -> Result<()> {
    let statuses = [
        (&opts.field, Status::Field),
        (&opts.busy, Status::Busy),
        (&opts.out_of_service, Status::OutOfService),
    ];
    for (rows, status) in statuses {
        for &row in rows {
            session.set_status(row_index(row)?, status)?;
        }
    }
    for (row, name) in &opts.rename {
        if name.is_empty() {
            bail!("row {row}: name cannot be empty");
        }
        session.set_name(row_index(*row)?, name.clone())?;
    }
    for (row, code) in &opts.code {
        session.set_code(row_index(*row)?, code.clone())?;
    }
    Ok(())
}

/// Assemble, print and optionally copy. Returns `false` when validation failed.
fn finish(session: &mut Session, opts: &ReportOptions) -> Result<bool> {
    session.recipient = opts.recipient.clone();
    session.deputy = opts.deputy.clone();
    if let Some(notes) = &opts.notes {
        session.notes = notes.clone();
    }

    match session.generate_report() {
        Ok(text) => println!("{text}"),
        Err(e) => {
            if e.recipient_missing() {
                eprintln!("المستلم: {}", Notice::NameWithCodeRequired);
            }
            if e.deputy_missing() {
                eprintln!("النائب: {}", Notice::NameWithCodeRequired);
            }
            return Ok(false);
        }
    }

    if opts.copy {
        let copied = SystemClipboard::detect().and_then(|mut c| copy_report(session, &mut c));
        match copied {
            Ok(outcome) => {
                if let Some(notice) = outcome.notice() {
                    eprintln!("{notice}");
                }
            }
            Err(e) => {
                warn!(error = %e, "clipboard copy failed");
                eprintln!("{}", Notice::CopyManually);
            }
        }
    }
    Ok(true)
}

fn exit_code(reported: bool) -> ExitCode {
    if reported {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID_INPUT)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[cfg(feature = "tesseract")]
fn recognizer(settings: &Settings) -> Result<Box<dyn OcrBackend>> {
    use istilam_ocr::recognizer::tesseract_backend::TesseractRecognizer;
    let data_path = settings.tessdata_dir.as_ref().map(|p| p.display().to_string());
    Ok(Box::new(TesseractRecognizer::new(data_path)))
}

#[cfg(not(feature = "tesseract"))]
fn recognizer(settings: &Settings) -> Result<Box<dyn OcrBackend>> {
    let cli = istilam_ocr::TesseractCli::locate(settings.tessdata_dir.clone())?;
    Ok(Box::new(cli))
}

/// Rows are shown to the operator starting at 1.
fn row_index(row: usize) -> Result<usize> {
    match row.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("rows are numbered from 1"),
    }
}

fn print_roster(roster: &Roster) {
    for (i, entry) in roster.iter().enumerate() {
        println!("{:>3}. {}  [{}]", i + 1, entry.display_name(), entry.status.label());
    }
}

fn load_roster(path: &Path) -> Result<Roster> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Roster::read_json(BufReader::new(file))
        .with_context(|| format!("failed to read roster from {}", path.display()))
}

fn save_roster(roster: &Roster, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    roster
        .write_json(BufWriter::new(file))
        .with_context(|| format!("failed to write roster to {}", path.display()))?;
    info!(path = %path.display(), entries = roster.len(), "roster saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use istilam_core::RosterEntry;

    fn options() -> ReportOptions {
        ReportOptions {
            recipient: "R".into(),
            deputy: "D".into(),
            notes: None,
            busy: vec![],
            out_of_service: vec![],
            field: vec![],
            rename: vec![],
            code: vec![],
            copy: false,
        }
    }

    fn session_with(names: &[&str]) -> Session {
        let mut s = Session::new();
        s.load_roster(Roster::from(
            names.iter().map(|n| RosterEntry::new(*n, "")).collect::<Vec<_>>(),
        ));
        s
    }

    #[test]
    fn edits_use_one_based_rows() {
        let mut s = session_with(&["سارة", "علي"]);
        let opts = ReportOptions {
            busy: vec![1],
            out_of_service: vec![2],
            code: vec![(2, "X1".into())],
            ..options()
        };
        apply_edits(&mut s, &opts).unwrap();
        assert_eq!(s.roster().entries()[0].status, Status::Busy);
        assert_eq!(s.roster().entries()[1].status, Status::OutOfService);
        assert_eq!(s.roster().entries()[1].code, "X1");
    }

    #[test]
    fn row_zero_and_unknown_rows_are_rejected() {
        let mut s = session_with(&["سارة"]);
        assert!(apply_edits(&mut s, &ReportOptions { busy: vec![0], ..options() }).is_err());
        assert!(apply_edits(&mut s, &ReportOptions { busy: vec![5], ..options() }).is_err());
        assert!(apply_edits(&mut s, &ReportOptions { rename: vec![(1, String::new())], ..options() })
            .is_err());
    }

    #[test]
    fn missing_deputy_produces_no_report() {
        let mut s = session_with(&["سارة"]);
        let reported = finish(&mut s, &ReportOptions { deputy: " ".into(), ..options() }).unwrap();
        assert!(!reported);
        assert!(s.report().is_none());
    }

    #[test]
    fn finish_uses_notes_override() {
        let mut s = session_with(&["سارة"]);
        assert!(finish(&mut s, &ReportOptions { notes: Some("لا جديد".into()), ..options() }).unwrap());
        assert!(s.report().unwrap().ends_with("الملاحظات : لا جديد"));
    }

    #[test]
    fn roster_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        let roster = Roster::from(vec![RosterEntry::new("هند", "Z7").with_status(Status::Busy)]);
        save_roster(&roster, &path).unwrap();
        assert_eq!(load_roster(&path).unwrap(), roster);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn save_to_full_device_fails() {
        let roster = Roster::from(vec![RosterEntry::new("هند", "Z7")]);
        assert!(save_roster(&roster, Path::new("/dev/full")).is_err());
    }
}
