use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "istilam",
    version,
    about = "Extract a duty roster from a photo and assemble the operations receipt message"
)]
pub struct Cli {
    /// Settings file; defaults to the per-user config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recognize a roster image and list the extracted entries.
    Extract(ExtractArgs),
    /// Assemble the report from a saved roster.
    Report(ReportArgs),
    /// Extract and report in one go.
    Run(RunArgs),
    /// Show or flip the light/dark preference.
    Theme(ThemeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    pub image: PathBuf,

    /// Save the roster as JSON for a later `report`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[arg(long)]
    pub roster: PathBuf,

    #[command(flatten)]
    pub report: ReportOptions,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    pub image: PathBuf,

    /// Save the edited roster as JSON.
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub report: ReportOptions,
}

/// Text inputs and per-row edits. Rows are numbered from 1 as printed by `extract`.
#[derive(Args, Debug, Clone)]
pub struct ReportOptions {
    /// Receiving officer, name with code.
    #[arg(long, default_value = "")]
    pub recipient: String,

    /// Deputy, name with code.
    #[arg(long, default_value = "")]
    pub deputy: String,

    /// Defaults to the configured notes.
    #[arg(long)]
    pub notes: Option<String>,

    /// Mark a row busy (still counted in the field).
    #[arg(long = "busy", value_name = "ROW")]
    pub busy: Vec<usize>,

    /// Mark a row out of service.
    #[arg(long = "oos", value_name = "ROW")]
    pub out_of_service: Vec<usize>,

    /// Put a row back in the field.
    #[arg(long = "field", value_name = "ROW")]
    pub field: Vec<usize>,

    /// Correct a name: `ROW=NAME`.
    #[arg(long = "rename", value_name = "ROW=NAME", value_parser = parse_row_edit)]
    pub rename: Vec<(usize, String)>,

    /// Correct a code: `ROW=CODE` (empty to clear).
    #[arg(long = "code", value_name = "ROW=CODE", value_parser = parse_row_edit)]
    pub code: Vec<(usize, String)>,

    /// Copy the finished report to the system clipboard.
    #[arg(long, default_value_t = false)]
    pub copy: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ThemeArgs {
    #[arg(long, default_value_t = false)]
    pub toggle: bool,
}

fn parse_row_edit(s: &str) -> Result<(usize, String), String> {
    let (row, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ROW=VALUE, got '{s}'"))?;
    let row = row
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid row number '{row}'"))?;
    Ok((row, value.trim().to_string()))
}
