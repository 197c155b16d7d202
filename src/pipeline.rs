//! Per-file pipeline: transcribe, translate through the English pivot,
//! optionally synthesize and re-encode, then clean up intermediates.
//!
//! Every path through the pipeline, skips included, ends in the cleanup
//! stage so no transcript or translation text file outlives its file's
//! processing window (unless retention was requested).

use std::fs;
use std::path::Path;

use crate::encode;
use crate::engines::{transcript_from_segments, Engines};
use crate::error::TvResult;
use crate::model::{BatchConfig, FileReport, MediaFile, PipelineOutcome};

/// Run one file through the whole pipeline.
///
/// Collaborator errors bubble out of here and are the caller's problem;
/// everything representable as a [`PipelineOutcome`] is handled in place.
pub fn process_file(
    file: &MediaFile,
    engines: &Engines<'_>,
    config: &BatchConfig,
) -> TvResult<FileReport> {
    tracing::info!(file = %file.name(), "transcribing");
    let segments = engines.recognizer.transcribe(&file.path)?;
    let transcript = transcript_from_segments(&segments);

    if transcript.is_empty() {
        tracing::info!(file = %file.name(), "no speech detected, skipping translation and synthesis");
        return Ok(report(file, PipelineOutcome::NoSpeechSkipped, None));
    }

    let transcript_path = config.text_artifact_path(file, &config.src_lang);
    persist_text(&transcript_path, &transcript)?;
    tracing::debug!(path = %transcript_path.display(), "wrote transcript");

    tracing::info!(file = %file.name(), "translating {} -> en -> {}", config.src_lang, config.tgt_lang);
    let translated = match engines.translator.translate(&transcript) {
        Ok(text) => text,
        Err(err) => {
            // The transcript must not outlive a failed file either.
            cleanup_text(config, &transcript_path, None);
            return Err(err);
        }
    };

    if translated.trim().is_empty() {
        tracing::info!(file = %file.name(), "empty translation, skipping synthesis");
        cleanup_text(config, &transcript_path, None);
        return Ok(report(file, PipelineOutcome::EmptyTranslationSkipped, None));
    }

    let translation_path = config.text_artifact_path(file, &config.tgt_lang);
    persist_text(&translation_path, &translated)?;
    tracing::debug!(path = %translation_path.display(), "wrote translation");

    let mut outcome = PipelineOutcome::SpeechDetectedAndCompleted;
    let mut final_audio = None;

    if let Some(synthesizer) = engines.synthesizer {
        let canonical = config.canonical_audio_path(file);
        tracing::info!(file = %file.name(), "synthesizing speech");
        match synthesizer.synthesize_to_file(&translated, &canonical) {
            Ok(()) => {
                let target = config.final_audio_path(file);
                let delivered = encode::finalize(&canonical, &target, config.audio_format);
                tracing::info!(path = %delivered.display(), "wrote speech output");
                final_audio = Some(delivered);
            }
            Err(err) if err.is_fatal() => {
                cleanup_text(config, &transcript_path, Some(&translation_path));
                return Err(err);
            }
            Err(err) => {
                tracing::warn!(file = %file.name(), "synthesis failed, keeping text output: {err}");
                outcome = PipelineOutcome::SynthesisFailedTextOnly;
            }
        }
    }

    // On a synthesis failure the translation text is the file's only
    // output, so it survives cleanup as the deliverable.
    let translation_is_deliverable = outcome == PipelineOutcome::SynthesisFailedTextOnly;
    cleanup_text(
        config,
        &transcript_path,
        (!translation_is_deliverable).then_some(translation_path.as_path()),
    );

    Ok(report(file, outcome, final_audio))
}

fn report(
    file: &MediaFile,
    outcome: PipelineOutcome,
    final_audio: Option<std::path::PathBuf>,
) -> FileReport {
    FileReport {
        file: file.name(),
        outcome,
        final_audio,
    }
}

/// Write `text` plus a trailing newline, creating parent directories.
fn persist_text(path: &Path, text: &str) -> TvResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{text}\n"))?;
    Ok(())
}

/// Remove intermediate text artifacts, honoring the retention policy.
fn cleanup_text(config: &BatchConfig, transcript: &Path, translation: Option<&Path>) {
    if config.keep_text {
        return;
    }
    encode::remove_intermediate(transcript);
    if let Some(path) = translation {
        encode::remove_intermediate(path);
    }
}
