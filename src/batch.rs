//! Batch driver: resolve inputs once, bring the engines up once, then walk
//! the files sequentially, letting no single file take the batch down.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::engines::{
    CoquiSynthesizer, Engines, FasterWhisperRecognizer, PivotTranslator, Synthesizer,
};
use crate::error::TvResult;
use crate::inputs;
use crate::model::{BatchConfig, BatchReport, FileReport, MediaFile, PipelineOutcome};
use crate::pipeline;

/// Run the whole batch. Errors returned from here are fatal by
/// definition: input resolution, translation provisioning, recognizer
/// startup, or a collaborator signalling resource exhaustion mid-batch.
pub fn run_batch(input: &Path, config: &BatchConfig) -> TvResult<BatchReport> {
    let files = inputs::resolve(input)?;
    tracing::info!(count = files.len(), "resolved inputs");

    tracing::info!(
        "preparing translators {} -> en -> {}",
        config.src_lang,
        config.tgt_lang
    );
    let translator = PivotTranslator::new(&config.src_lang, &config.tgt_lang)?;

    tracing::info!(
        model = %config.model_size,
        device = config.device.as_str(),
        compute_type = config.compute_type.as_str(),
        "initializing recognizer"
    );
    let recognizer = FasterWhisperRecognizer::new(config, scratch_dir())?;

    let synthesizer = if config.synthesis {
        match CoquiSynthesizer::new(&config.tts_model) {
            Ok(engine) => Some(engine),
            Err(err) => {
                tracing::warn!("synthesis unavailable, continuing without speech output: {err}");
                None
            }
        }
    } else {
        None
    };

    let engines = Engines {
        recognizer: &recognizer,
        translator: &translator,
        synthesizer: synthesizer.as_ref().map(|s| s as &dyn Synthesizer),
    };

    run_files(&files, &engines, config)
}

/// The per-file loop, split from engine construction so scripted engines
/// can drive it in tests.
pub fn run_files(
    files: &[MediaFile],
    engines: &Engines<'_>,
    config: &BatchConfig,
) -> TvResult<BatchReport> {
    let started_at_rfc3339 = Utc::now().to_rfc3339();
    let mut reports = Vec::with_capacity(files.len());

    for (index, file) in files.iter().enumerate() {
        tracing::info!("[{}/{}] processing {}", index + 1, files.len(), file.name());

        match pipeline::process_file(file, engines, config) {
            Ok(report) => {
                tracing::info!(file = %report.file, outcome = report.outcome.as_str(), "done");
                reports.push(report);
            }
            Err(err) if err.is_fatal() => {
                tracing::error!(file = %file.name(), "aborting batch: {err}");
                return Err(err);
            }
            Err(err) => {
                tracing::error!(file = %file.name(), "file failed, continuing: {err}");
                reports.push(FileReport {
                    file: file.name(),
                    outcome: PipelineOutcome::FileError,
                    final_audio: None,
                });
            }
        }
    }

    let report = BatchReport {
        started_at_rfc3339,
        finished_at_rfc3339: Utc::now().to_rfc3339(),
        files: reports,
    };
    tracing::info!(
        completed = report.count(PipelineOutcome::SpeechDetectedAndCompleted),
        skipped = report.count(PipelineOutcome::NoSpeechSkipped)
            + report.count(PipelineOutcome::EmptyTranslationSkipped),
        failed = report.count(PipelineOutcome::FileError),
        "batch finished"
    );
    Ok(report)
}

/// Scratch directory for recognizer JSON output, unique per process.
fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("transvox-{}", std::process::id()))
}
