use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use istilam_core::RecognitionHints;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — install the `tesseract` executable or build with the `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations accept PNG/JPEG bytes and return the recognized text, one line per row.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8], hints: &RecognitionHints) -> Result<String, OcrError>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn recognize(&self, image_bytes: &[u8], hints: &RecognitionHints) -> Result<String, OcrError> {
        (**self).recognize(image_bytes, hints)
    }
}

/// Split engine output into trimmed, non-empty lines in reading order.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set result regardless of the image.
pub struct MockRecognizer {
    outcome: Result<String, String>,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { outcome: Ok(text.into()) }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = lines.into_iter().map(|l| l.as_ref().to_string()).collect::<Vec<_>>();
        Self::new(text.join("\n"))
    }

    /// A recognizer whose every call fails with an engine error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { outcome: Err(message.into()) }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8], _hints: &RecognitionHints) -> Result<String, OcrError> {
        self.outcome.clone().map_err(OcrError::Engine)
    }
}

// ── Tesseract executable ──────────────────────────────────────────────────────

/// Runs the `tesseract` command line tool, feeding the image on stdin.
pub struct TesseractCli {
    program: PathBuf,
    tessdata_dir: Option<PathBuf>,
}

impl TesseractCli {
    /// Find `tesseract` on `PATH`.
    pub fn locate(tessdata_dir: Option<PathBuf>) -> Result<Self, OcrError> {
        let program = which::which("tesseract").map_err(|_| OcrError::NotAvailable)?;
        Ok(Self { program, tessdata_dir })
    }

    fn command(&self, hints: &RecognitionHints) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&hints.languages)
            .arg("--psm")
            .arg(hints.page_seg_mode.to_string());
        if hints.preserve_interword_spaces {
            cmd.arg("-c").arg("preserve_interword_spaces=1");
        }
        if let Some(dir) = &self.tessdata_dir {
            cmd.arg("--tessdata-dir").arg(dir);
        }
        cmd
    }
}

impl OcrBackend for TesseractCli {
    fn recognize(&self, image_bytes: &[u8], hints: &RecognitionHints) -> Result<String, OcrError> {
        let mut child = self
            .command(hints)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| OcrError::Engine(format!("failed to start tesseract: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(image_bytes)
                .map_err(|e| OcrError::Engine(format!("failed to send image: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| OcrError::Engine(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Engine(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).replace('\u{0000}', ""))
    }
}

// ── Tesseract library (optional, gated behind `tesseract` feature) ────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use istilam_core::RecognitionHints;
    use leptess::{LepTess, Variable};

    pub struct TesseractRecognizer {
        data_path: Option<String>,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>) -> Self {
            Self { data_path }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8], hints: &RecognitionHints) -> Result<String, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &hints.languages)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_variable(Variable::TesseditPagesegMode, &hints.page_seg_mode.to_string())
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            if hints.preserve_interword_spaces {
                lt.set_variable(Variable::PreserveInterwordSpaces, "1")
                    .map_err(|e| OcrError::Engine(e.to_string()))?;
            }
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}
