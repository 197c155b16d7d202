use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Final audio container/codec for synthesized speech.
///
/// Synthesis always lands in WAV first; anything else is produced by
/// re-encoding that canonical waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
    Opus,
    M4a,
}

impl AudioFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Opus => "opus",
            Self::M4a => "m4a",
        }
    }
}

/// Inference device for the recognition engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    Cpu,
    Cuda,
}

impl Device {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
        }
    }
}

/// Numeric precision/quantization mode for the recognition engine.
/// Values mirror what the engine itself accepts, underscores included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ComputeType {
    Int8,
    Int8Float16,
    Float16,
    Float32,
}

impl ComputeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int8Float16 => "int8_float16",
            Self::Float16 => "float16",
            Self::Float32 => "float32",
        }
    }
}

/// One discovered input file. Created by the input resolver at batch start
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Full path to the media file.
    pub path: PathBuf,
    /// File name without extension; output names derive from this.
    pub stem: String,
    /// Lower-cased extension without the leading dot.
    pub extension: String,
}

impl MediaFile {
    /// Build a `MediaFile` from a path that has both a stem and an
    /// extension. Returns `None` for paths like `.hidden` or `noext`.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?.to_owned();
        let extension = path.extension()?.to_str()?.to_lowercase();
        Some(Self {
            path: path.to_path_buf(),
            stem,
            extension,
        })
    }

    /// Display name used in logs.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}.{}", self.stem, self.extension)
    }
}

/// Terminal status of one file's trip through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineOutcome {
    /// Speech was found, translated, and all requested outputs produced.
    SpeechDetectedAndCompleted,
    /// Recognition returned no usable text; nothing downstream ran.
    NoSpeechSkipped,
    /// Translation came back empty; synthesis skipped.
    EmptyTranslationSkipped,
    /// The synthesis call failed; the translation text stands in for audio.
    SynthesisFailedTextOnly,
    /// A collaborator failed for this file; the batch moved on.
    FileError,
}

impl PipelineOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpeechDetectedAndCompleted => "speech-detected-and-completed",
            Self::NoSpeechSkipped => "no-speech-skipped",
            Self::EmptyTranslationSkipped => "empty-translation-skipped",
            Self::SynthesisFailedTextOnly => "synthesis-failed-text-only",
            Self::FileError => "file-error",
        }
    }
}

/// Everything the batch driver and file pipeline need to know for one run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub src_lang: String,
    pub tgt_lang: String,
    pub model_size: String,
    pub beam_size: u32,
    pub device: Device,
    pub compute_type: ComputeType,
    /// When false the synthesis and re-encode stages never run.
    pub synthesis: bool,
    pub audio_format: AudioFormat,
    /// Directory under which all artifacts are written.
    pub out_prefix: PathBuf,
    /// Retain transcript/translation text files instead of cleaning them up.
    pub keep_text: bool,
    /// Synthesis model identifier, forwarded to the TTS engine.
    pub tts_model: String,
}

impl BatchConfig {
    /// Path of the transient text artifact for `file` in `lang`.
    #[must_use]
    pub fn text_artifact_path(&self, file: &MediaFile, lang: &str) -> PathBuf {
        self.out_prefix.join(format!("{}.{lang}.txt", file.stem))
    }

    /// Path of the canonical synthesized waveform for `file`.
    #[must_use]
    pub fn canonical_audio_path(&self, file: &MediaFile) -> PathBuf {
        self.out_prefix
            .join(format!("{}.{}.wav", file.stem, self.tgt_lang))
    }

    /// Path of the final audio deliverable for `file` in the requested
    /// format.
    #[must_use]
    pub fn final_audio_path(&self, file: &MediaFile) -> PathBuf {
        self.out_prefix.join(format!(
            "{}.{}.{}",
            file.stem,
            self.tgt_lang,
            self.audio_format.extension()
        ))
    }
}

/// Per-file entry in the batch report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Input file name (stem plus extension).
    pub file: String,
    pub outcome: PipelineOutcome,
    /// Final audio deliverable, when one was produced.
    pub final_audio: Option<PathBuf>,
}

/// Summary of one whole batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at_rfc3339: String,
    pub finished_at_rfc3339: String,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Count of files with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: PipelineOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }
}
