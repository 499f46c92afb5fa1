use std::path::Path;
use std::sync::Arc;

use istilam_core::{Notice, RecognitionHints, Roster};
use thiserror::Error;
use tracing::{info, warn};

use crate::extract::extract_roster;
use crate::hash;
use crate::preprocess::{self, PreprocessError};
use crate::recognizer::{split_lines, OcrBackend, OcrError};

/// Any of these means no roster was produced for the image.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("Recognition task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl PipelineError {
    pub fn notice(&self) -> Notice {
        Notice::RecognitionFailed
    }
}

/// The outcome of one recognition pass.
#[derive(Debug)]
pub struct Extraction {
    /// SHA-256 hex digest of the submitted image.
    pub source_digest: String,
    /// Trimmed, non-empty engine lines in reading order.
    pub raw_lines: Vec<String>,
    pub roster: Roster,
}

/// Orchestrates: fingerprint → preprocess → OCR → normalize/parse → dedup.
pub struct RosterPipeline<R: OcrBackend> {
    recognizer: Arc<R>,
    hints: RecognitionHints,
    max_dimension: u32,
}

impl<R: OcrBackend + 'static> RosterPipeline<R> {
    pub fn new(recognizer: R, hints: RecognitionHints) -> Self {
        Self { recognizer: Arc::new(recognizer), hints, max_dimension: 2800 }
    }

    /// Images larger than this on either side are scaled down first; 0 disables scaling.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Process an image file on disk.
    pub async fn process_file(&self, path: &Path) -> Result<Extraction, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        self.process_bytes(&bytes).await
    }

    /// Process raw image bytes (file picker, paste or drop).
    pub async fn process_bytes(&self, data: &[u8]) -> Result<Extraction, PipelineError> {
        let source_digest = hash::to_hex(&hash::sha256_bytes(data));

        let raw_lines = match self.recognize(data).await {
            Ok(lines) => lines,
            Err(e) => {
                warn!(digest = %source_digest, error = %e, "recognition failed");
                return Err(e);
            }
        };

        let roster = extract_roster(&raw_lines);
        info!(
            digest = %source_digest,
            lines = raw_lines.len(),
            entries = roster.len(),
            "roster extracted"
        );

        Ok(Extraction { source_digest, raw_lines, roster })
    }

    /// Decoding and the engine call are CPU-bound, so they run off the async workers.
    async fn recognize(&self, data: &[u8]) -> Result<Vec<String>, PipelineError> {
        let recognizer = Arc::clone(&self.recognizer);
        let hints = self.hints.clone();
        let max_dimension = self.max_dimension;
        let data = data.to_vec();

        tokio::task::spawn_blocking(move || -> Result<Vec<String>, PipelineError> {
            let image = preprocess::prepare_for_ocr(&data, max_dimension)?;
            let text = recognizer.recognize(&image, &hints)?;
            Ok(split_lines(&text))
        })
        .await?
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
