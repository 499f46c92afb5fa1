use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("No roster entry at position {0}")]
    NoSuchEntry(usize),
    #[error("Roster file error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a person stands for the current shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    /// Present and available.
    #[default]
    #[serde(rename = "field")]
    Field,
    /// Present but handling an incident; still counted as a field unit.
    #[serde(rename = "busy")]
    Busy,
    /// Listed separately and excluded from the field count.
    #[serde(rename = "oos")]
    OutOfService,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Field, Status::Busy, Status::OutOfService];

    /// Counted as a field unit in the report.
    pub fn is_in_field(self) -> bool {
        !matches!(self, Status::OutOfService)
    }

    /// Label shown to the operator next to each row.
    pub fn label(self) -> &'static str {
        match self {
            Status::Field => "في الميدان",
            Status::Busy => "مشغول (في الميدان)",
            Status::OutOfService => "خارج الخدمة",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Field => write!(f, "field"),
            Status::Busy => write!(f, "busy"),
            Status::OutOfService => write!(f, "oos"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "field" => Ok(Status::Field),
            "busy" => Ok(Status::Busy),
            "oos" | "out-of-service" | "out_of_service" => Ok(Status::OutOfService),
            other => Err(format!("Unknown status: '{other}'")),
        }
    }
}

/// One extracted person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    /// Short identifier such as `AB-12`; empty when none was recognized.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub status: Status,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self { name: name.into(), code: code.into(), status: Status::Field }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Deduplication key: `trim(name) + "|" + trim(code)`.
    pub fn identity_key(&self) -> String {
        format!("{}|{}", self.name.trim(), self.code.trim())
    }

    /// `name` followed by ` code` when a code is present.
    pub fn display_name(&self) -> String {
        if self.code.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.code)
        }
    }
}

/// Ordered set of entries from one recognition pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from candidates in order, keeping the first entry per identity key.
    pub fn from_candidates(candidates: impl IntoIterator<Item = RosterEntry>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let entries = candidates
            .into_iter()
            .filter(|entry| seen.insert(entry.identity_key()))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RosterEntry> {
        self.entries.iter()
    }

    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), RosterError> {
        self.entry_mut(index)?.name = name.into();
        Ok(())
    }

    pub fn set_code(&mut self, index: usize, code: impl Into<String>) -> Result<(), RosterError> {
        self.entry_mut(index)?.code = code.into();
        Ok(())
    }

    pub fn set_status(&mut self, index: usize, status: Status) -> Result<(), RosterError> {
        self.entry_mut(index)?.status = status;
        Ok(())
    }

    /// Entries counted as field units, in roster order.
    pub fn in_field(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter().filter(|e| e.status.is_in_field())
    }

    /// Entries marked out of service, in roster order.
    pub fn out_of_service(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter().filter(|e| !e.status.is_in_field())
    }

    pub fn read_json<R: Read>(reader: R) -> Result<Self, RosterError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes and flushes, so a buffered writer's I/O errors surface here.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<(), RosterError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut RosterEntry, RosterError> {
        self.entries.get_mut(index).ok_or(RosterError::NoSuchEntry(index))
    }
}

impl From<Vec<RosterEntry>> for Roster {
    fn from(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a RosterEntry;
    type IntoIter = std::slice::Iter<'a, RosterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
