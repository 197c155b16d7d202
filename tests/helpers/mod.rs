//! Shared test doubles: scripted engines standing in for the real
//! subprocess-backed collaborators, plus config/file scaffolding.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use transvox::engines::{Recognizer, Segment, Synthesizer, Translator};
use transvox::error::{TvError, TvResult};
use transvox::model::{AudioFormat, BatchConfig, ComputeType, Device, MediaFile};

/// What a scripted recognizer should do for one input stem.
pub enum Scripted {
    /// Return this text as a single segment ("" means silence).
    Text(String),
    /// Fail with an ordinary command failure.
    Fail,
    /// Fail with a resource-exhaustion error.
    Exhausted,
}

pub struct MockRecognizer {
    responses: HashMap<String, Scripted>,
    pub calls: AtomicUsize,
}

impl MockRecognizer {
    pub fn new(responses: Vec<(&str, Scripted)>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|(stem, scripted)| (stem.to_owned(), scripted))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Recognizer that hears the same phrase in every file.
    pub fn always(text: &str) -> Self {
        Self {
            responses: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
        .with_default(text)
    }

    fn with_default(mut self, text: &str) -> Self {
        self.responses
            .insert("*".to_owned(), Scripted::Text(text.to_owned()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Recognizer for MockRecognizer {
    fn transcribe(&self, media: &Path) -> TvResult<Vec<Segment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let stem = media
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        let scripted = self
            .responses
            .get(stem)
            .or_else(|| self.responses.get("*"));

        match scripted {
            Some(Scripted::Text(text)) if text.is_empty() => Ok(Vec::new()),
            Some(Scripted::Text(text)) => Ok(vec![Segment { text: text.clone() }]),
            Some(Scripted::Fail) | None => Err(TvError::from_command_failure(
                "mock-recognizer".to_owned(),
                1,
                "decode error".to_owned(),
            )),
            Some(Scripted::Exhausted) => Err(TvError::from_command_failure(
                "mock-recognizer".to_owned(),
                1,
                "CUDA out of memory".to_owned(),
            )),
        }
    }
}

pub enum TranslateMode {
    /// Prefix the input so tests can see the hop happened.
    Echo,
    /// Return whitespace only.
    Empty,
    /// Fail with an ordinary command failure.
    Fail,
}

pub struct MockTranslator {
    mode: TranslateMode,
    pub calls: AtomicUsize,
}

impl MockTranslator {
    pub fn new(mode: TranslateMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Translator for MockTranslator {
    fn translate(&self, text: &str) -> TvResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            TranslateMode::Echo => Ok(format!("es: {text}")),
            TranslateMode::Empty => Ok("   ".to_owned()),
            TranslateMode::Fail => Err(TvError::from_command_failure(
                "mock-translator".to_owned(),
                1,
                "hop failed".to_owned(),
            )),
        }
    }
}

pub enum SynthMode {
    /// Write a fake waveform to the requested path.
    Write,
    /// Fail without producing a file.
    Fail,
}

pub struct MockSynthesizer {
    mode: SynthMode,
    pub calls: AtomicUsize,
}

impl MockSynthesizer {
    pub fn new(mode: SynthMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Synthesizer for MockSynthesizer {
    fn synthesize_to_file(&self, _text: &str, output: &Path) -> TvResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            SynthMode::Write => {
                fs::write(output, b"not-a-real-waveform")?;
                Ok(())
            }
            SynthMode::Fail => Err(TvError::from_command_failure(
                "mock-synthesizer".to_owned(),
                1,
                "vocoder crashed".to_owned(),
            )),
        }
    }
}

/// Config pointing all artifacts at `out_prefix`, synthesis on, WAV out.
pub fn test_config(out_prefix: &Path) -> BatchConfig {
    BatchConfig {
        src_lang: "fr".to_owned(),
        tgt_lang: "es".to_owned(),
        model_size: "small".to_owned(),
        beam_size: 5,
        device: Device::Cpu,
        compute_type: ComputeType::Int8,
        synthesis: true,
        audio_format: AudioFormat::Wav,
        out_prefix: out_prefix.to_path_buf(),
        keep_text: false,
        tts_model: "tts_models/es/css10/vits".to_owned(),
    }
}

/// Create an empty media file on disk and its `MediaFile` handle.
pub fn media_file(dir: &Path, name: &str) -> MediaFile {
    let path = dir.join(name);
    fs::write(&path, b"fake media").expect("write media file");
    MediaFile::from_path(&path).expect("media file")
}

/// Names of files currently present under `dir` (non-recursive, sorted).
pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_file())
                .filter_map(|entry| entry.file_name().into_string().ok())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Paths of `.txt` artifacts currently present under `dir`.
pub fn txt_artifacts(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
                .collect()
        })
        .unwrap_or_default()
}
