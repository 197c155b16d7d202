//! Engine bindings: the three external collaborators behind trait seams.
//!
//! Each engine is constructed once per batch by the driver and borrowed by
//! the file pipeline; the traits exist so tests can substitute scripted
//! collaborators for the real subprocess-backed ones.

mod recognizer;
mod synthesizer;
mod translator;

pub use recognizer::FasterWhisperRecognizer;
pub use synthesizer::CoquiSynthesizer;
pub use translator::{ArgosTranslator, PivotTranslator};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TvResult;

/// One recognized span of speech. Only the text matters downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
}

/// Speech recognition over one media file.
pub trait Recognizer {
    fn transcribe(&self, media: &Path) -> TvResult<Vec<Segment>>;
}

/// Text translation. Production implementations pivot through English; the
/// trait itself is hop-agnostic.
pub trait Translator {
    fn translate(&self, text: &str) -> TvResult<String>;
}

/// Speech synthesis into a waveform file at `output`.
pub trait Synthesizer {
    fn synthesize_to_file(&self, text: &str, output: &Path) -> TvResult<()>;
}

/// The engine handles one batch run shares across all of its files.
pub struct Engines<'a> {
    pub recognizer: &'a dyn Recognizer,
    pub translator: &'a dyn Translator,
    /// `None` when synthesis is disabled or its engine failed to come up.
    pub synthesizer: Option<&'a dyn Synthesizer>,
}

/// Join segment texts with single spaces, trimming each piece and the
/// result. Empty segments vanish rather than doubling separators.
#[must_use]
pub fn transcript_from_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_owned()
}
