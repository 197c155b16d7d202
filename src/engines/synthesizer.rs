//! Coqui TTS binding via the `tts` command-line tool.

use std::path::Path;

use crate::error::{TvError, TvResult};
use crate::process::{command_exists, run_command};

use super::Synthesizer;

const SYNTHESIS_BIN: &str = "tts";

/// Subprocess-backed synthesis engine. Always renders into the canonical
/// waveform format; transcoding is someone else's job.
pub struct CoquiSynthesizer {
    model_name: String,
}

impl CoquiSynthesizer {
    /// Verify the synthesis binary is on PATH. Callers treat a failure
    /// here as "run the batch without speech output", not as fatal.
    pub fn new(model_name: &str) -> TvResult<Self> {
        if !command_exists(SYNTHESIS_BIN) {
            return Err(TvError::CommandMissing {
                command: SYNTHESIS_BIN.to_owned(),
            });
        }
        Ok(Self {
            model_name: model_name.to_owned(),
        })
    }

    fn build_args(&self, text: &str, output: &Path) -> Vec<String> {
        vec![
            "--model_name".to_owned(),
            self.model_name.clone(),
            "--text".to_owned(),
            text.to_owned(),
            "--out_path".to_owned(),
            output.display().to_string(),
        ]
    }
}

impl Synthesizer for CoquiSynthesizer {
    fn synthesize_to_file(&self, text: &str, output: &Path) -> TvResult<()> {
        let args = self.build_args(text, output);
        run_command(SYNTHESIS_BIN, &args)?;

        if !output.exists() {
            return Err(TvError::MissingArtifact(output.to_path_buf()));
        }
        Ok(())
    }
}
