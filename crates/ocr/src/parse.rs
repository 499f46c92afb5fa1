use crate::normalize::normalize_line;

re!(re_code_last, r"^(.+?)\s+([A-Za-z]{1,4}-?[0-9]{1,4})$");
re!(re_code_first, r"^([A-Za-z]{1,4}-?[0-9]{1,4})\s+(.+)$");

/// Name and optional code split out of one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecord {
    pub name: String,
    pub code: String,
}

impl ParsedRecord {
    fn new(name: &str, code: &str) -> Self {
        Self { name: name.trim().to_string(), code: code.trim().to_string() }
    }
}

/// Split a normalized line into name and code.
///
/// A trailing code (`name CODE`) is the usual roster layout and is tried
/// first; a leading code (`CODE name`) second. Anything else is all name.
/// This is a heuristic: a line that fits neither shape falls back to being
/// treated entirely as a name.
pub fn parse_record(line: &str) -> ParsedRecord {
    let line = line.trim();
    if line.is_empty() {
        return ParsedRecord::default();
    }
    if let Some(c) = re_code_last().captures(line) {
        return ParsedRecord::new(&c[1], &c[2]);
    }
    if let Some(c) = re_code_first().captures(line) {
        return ParsedRecord::new(&c[2], &c[1]);
    }
    ParsedRecord::new(line, "")
}

/// Normalize a raw OCR line, then split it.
pub fn parse_line(raw: &str) -> ParsedRecord {
    parse_record(&normalize_line(raw))
}
