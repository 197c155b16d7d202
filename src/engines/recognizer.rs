//! faster-whisper binding via the `whisper-ctranslate2` command-line tool.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TvError, TvResult};
use crate::model::BatchConfig;
use crate::process::{command_exists, run_command};

use super::{Recognizer, Segment};

const RECOGNIZER_BIN: &str = "whisper-ctranslate2";

/// Minimum silence gap, in milliseconds, for VAD segmentation.
const VAD_MIN_SILENCE_MS: u32 = 500;

/// Subprocess-backed recognition engine. One instance serves the whole
/// batch; the underlying tool reloads its weights per invocation, so all
/// run-invariant flags are fixed here at construction.
pub struct FasterWhisperRecognizer {
    model_size: String,
    language: String,
    beam_size: u32,
    device: &'static str,
    compute_type: &'static str,
    work_dir: PathBuf,
}

impl FasterWhisperRecognizer {
    /// Verify the recognizer binary is on PATH and prepare a scratch
    /// directory for its JSON output.
    pub fn new(config: &BatchConfig, work_dir: PathBuf) -> TvResult<Self> {
        if !command_exists(RECOGNIZER_BIN) {
            return Err(TvError::CommandMissing {
                command: RECOGNIZER_BIN.to_owned(),
            });
        }
        fs::create_dir_all(&work_dir)?;

        Ok(Self {
            model_size: config.model_size.clone(),
            language: config.src_lang.clone(),
            beam_size: config.beam_size,
            device: config.device.as_str(),
            compute_type: config.compute_type.as_str(),
            work_dir,
        })
    }

    fn build_args(&self, media: &Path) -> Vec<String> {
        vec![
            media.display().to_string(),
            "--model".to_owned(),
            self.model_size.clone(),
            "--language".to_owned(),
            self.language.clone(),
            "--task".to_owned(),
            "transcribe".to_owned(),
            "--beam_size".to_owned(),
            self.beam_size.to_string(),
            "--device".to_owned(),
            self.device.to_owned(),
            "--compute_type".to_owned(),
            self.compute_type.to_owned(),
            "--vad_filter".to_owned(),
            "True".to_owned(),
            "--vad_min_silence_duration_ms".to_owned(),
            VAD_MIN_SILENCE_MS.to_string(),
            "--output_format".to_owned(),
            "json".to_owned(),
            "--output_dir".to_owned(),
            self.work_dir.display().to_string(),
        ]
    }

    fn json_artifact_path(&self, media: &Path) -> TvResult<PathBuf> {
        let stem = media
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| TvError::InputNotFound(media.to_path_buf()))?;
        Ok(self.work_dir.join(format!("{stem}.json")))
    }
}

impl Recognizer for FasterWhisperRecognizer {
    fn transcribe(&self, media: &Path) -> TvResult<Vec<Segment>> {
        let args = self.build_args(media);
        run_command(RECOGNIZER_BIN, &args)?;

        let json_path = self.json_artifact_path(media)?;
        if !json_path.exists() {
            return Err(TvError::MissingArtifact(json_path));
        }

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
        let segments = extract_segments(&raw);

        // The JSON is recognizer scratch, not a pipeline artifact.
        if let Err(err) = fs::remove_file(&json_path) {
            tracing::debug!(path = %json_path.display(), "leaving recognizer scratch behind: {err}");
        }

        Ok(segments)
    }
}

/// Pull segment texts out of the recognizer's JSON. Falls back to the
/// top-level `text` field when no segment array is present.
fn extract_segments(raw: &serde_json::Value) -> Vec<Segment> {
    if let Some(array) = raw.get("segments").and_then(serde_json::Value::as_array) {
        let segments: Vec<Segment> = array
            .iter()
            .filter_map(|entry| entry.get("text").and_then(serde_json::Value::as_str))
            .map(|text| Segment {
                text: text.to_owned(),
            })
            .collect();
        if !segments.is_empty() {
            return segments;
        }
    }

    raw.get("text")
        .and_then(serde_json::Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(|text| {
            vec![Segment {
                text: text.to_owned(),
            }]
        })
        .unwrap_or_default()
}
