// Compiled regex cache shared by the text modules.
macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static ::regex::Regex {
            static R: ::std::sync::OnceLock<::regex::Regex> = ::std::sync::OnceLock::new();
            R.get_or_init(|| ::regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}

pub mod extract;
pub mod hash;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;

pub use extract::{extract_roster, has_arabic};
pub use hash::{sha256_bytes, to_hex};
pub use normalize::normalize_line;
pub use parse::{parse_line, parse_record, ParsedRecord};
pub use pipeline::{Extraction, PipelineError, RosterPipeline};
pub use preprocess::{prepare_for_ocr, PreprocessError};
pub use recognizer::{split_lines, MockRecognizer, OcrBackend, OcrError, TesseractCli};
