//! Audio post-processing: move the canonical synthesized waveform to its
//! final name, re-encoding through ffmpeg when another format was asked
//! for.
//!
//! Re-encoding failure degrades the deliverable to the canonical WAV; it
//! never drops the file's audio output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::AudioFormat;
use crate::process::run_command;

const ENCODE_BIN: &str = "ffmpeg";

/// ffmpeg argument vector for transcoding `input` to `output` in `format`.
///
/// Exactly one recipe per format; WAV has no recipe because it is the
/// canonical format and never re-encoded.
#[must_use]
pub fn encode_args(input: &Path, format: AudioFormat, output: &Path) -> Vec<String> {
    let mut args = vec![
        "-hide_banner".to_owned(),
        "-loglevel".to_owned(),
        "error".to_owned(),
        "-y".to_owned(),
        "-i".to_owned(),
        input.display().to_string(),
        "-vn".to_owned(),
    ];

    match format {
        // Canonical format; the caller renames instead of transcoding.
        AudioFormat::Wav => {}
        AudioFormat::Mp3 => {
            args.extend(["-ar", "44100", "-b:a", "160k"].map(str::to_owned));
        }
        AudioFormat::Ogg => {
            args.extend(
                ["-ac", "1", "-ar", "22050", "-c:a", "libvorbis", "-qscale:a", "5"]
                    .map(str::to_owned),
            );
        }
        AudioFormat::Opus => {
            args.extend(["-c:a", "libopus", "-b:a", "96k"].map(str::to_owned));
        }
        AudioFormat::M4a => {
            args.extend(["-c:a", "aac", "-b:a", "160k"].map(str::to_owned));
        }
    }

    args.push(output.display().to_string());
    args
}

/// Turn the canonical waveform at `canonical` into the deliverable at
/// `target`, returning whichever path ends up holding the audio.
///
/// - `wav`: plain rename (copy fallback for cross-device moves);
/// - other formats: ffmpeg with the recipe from [`encode_args`]; on a
///   non-zero exit the canonical waveform is kept and returned instead of
///   failing the file.
pub fn finalize(canonical: &Path, target: &Path, format: AudioFormat) -> PathBuf {
    if format == AudioFormat::Wav {
        return rename_or_copy(canonical, target);
    }

    let args = encode_args(canonical, format, target);
    match run_command(ENCODE_BIN, &args) {
        Ok(_) => {
            remove_quietly(canonical);
            target.to_path_buf()
        }
        Err(err) => {
            tracing::warn!(
                canonical = %canonical.display(),
                "re-encode to {} failed, keeping canonical waveform: {err}",
                format.extension()
            );
            canonical.to_path_buf()
        }
    }
}

fn rename_or_copy(canonical: &Path, target: &Path) -> PathBuf {
    if canonical == target {
        return target.to_path_buf();
    }

    if fs::rename(canonical, target).is_ok() {
        return target.to_path_buf();
    }

    // Rename can fail across filesystems; fall back to copy-then-delete.
    match fs::copy(canonical, target) {
        Ok(_) => {
            remove_quietly(canonical);
            target.to_path_buf()
        }
        Err(err) => {
            tracing::warn!(
                canonical = %canonical.display(),
                "could not move waveform to final name: {err}"
            );
            canonical.to_path_buf()
        }
    }
}

fn remove_quietly(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        tracing::warn!(path = %path.display(), "failed to remove intermediate waveform: {err}");
    }
}

/// Best-effort removal used by the pipeline's cleanup stage. Failures are
/// logged, never escalated.
pub fn remove_intermediate(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(err) = fs::remove_file(path) {
        tracing::warn!(path = %path.display(), "cleanup failed: {err}");
    }
}
