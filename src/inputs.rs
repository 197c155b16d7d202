//! Input resolution: turn a path argument into an ordered batch of media
//! files.

use std::path::Path;

use crate::error::{TvError, TvResult};
use crate::model::MediaFile;

/// Extensions the pipeline accepts, matched case-insensitively. Anything
/// ffmpeg can decode into audio qualifies, video containers included.
pub const SUPPORTED_EXTENSIONS: [&str; 12] = [
    "aac", "flac", "m4a", "mkv", "mp3", "mp4", "oga", "ogg", "opus", "wav", "webm", "wma",
];

#[must_use]
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lowered = ext.to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&lowered.as_str())
        })
}

/// Resolve `input` to the ordered list of files the batch will process.
///
/// - a supported file resolves to itself;
/// - a directory resolves to its immediate supported entries, sorted by
///   name so batch order is reproducible;
/// - anything else is an error.
pub fn resolve(input: &Path) -> TvResult<Vec<MediaFile>> {
    if input.is_file() {
        if !is_supported(input) {
            let extension = input
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or("")
                .to_lowercase();
            return Err(TvError::UnsupportedFormat { extension });
        }
        let file = MediaFile::from_path(input)
            .ok_or_else(|| TvError::InputNotFound(input.to_path_buf()))?;
        return Ok(vec![file]);
    }

    if input.is_dir() {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(input)? {
            let path = entry?.path();
            if path.is_file() && is_supported(&path) {
                if let Some(file) = MediaFile::from_path(&path) {
                    files.push(file);
                }
            }
        }
        if files.is_empty() {
            return Err(TvError::NoInputFound(input.to_path_buf()));
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        return Ok(files);
    }

    Err(TvError::InputNotFound(input.to_path_buf()))
}
