use std::path::PathBuf;

use clap::Parser;

use crate::model::{AudioFormat, BatchConfig, ComputeType, Device};

#[derive(Debug, Parser)]
#[command(name = "transvox")]
#[command(about = "Translate spoken audio: transcribe, pivot through English, and re-voice")]
pub struct Cli {
    /// Audio/video file OR a folder of files.
    pub input: PathBuf,

    /// Source language code.
    #[arg(long, default_value = "fr")]
    pub src: String,

    /// Target language code.
    #[arg(long, default_value = "es")]
    pub tgt: String,

    /// Recognition model size: tiny|base|small|medium|large-v3.
    #[arg(long, default_value = "small")]
    pub model_size: String,

    /// Recognition beam width.
    #[arg(long, default_value_t = 5)]
    pub beam_size: u32,

    /// Inference device.
    #[arg(long, value_enum, default_value_t = Device::Cpu)]
    pub device: Device,

    /// Numeric precision/quantization mode.
    #[arg(long, value_enum, default_value_t = ComputeType::Int8)]
    pub compute_type: ComputeType,

    /// Disable speech synthesis; produce (transient) text only.
    #[arg(long)]
    pub no_tts: bool,

    /// Output audio format.
    #[arg(long, value_enum, default_value_t = AudioFormat::Wav)]
    pub audio_format: AudioFormat,

    /// Directory prefix for output files.
    #[arg(long, default_value = "/data/output/output")]
    pub out_prefix: PathBuf,

    /// Keep transcript/translation text files instead of removing them.
    #[arg(long)]
    pub keep_text: bool,

    /// Synthesis model name, forwarded to the TTS engine.
    #[arg(long, default_value = "tts_models/es/css10/vits")]
    pub tts_model: String,

    /// Print the batch report as pretty JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    #[must_use]
    pub fn to_config(&self) -> BatchConfig {
        BatchConfig {
            src_lang: self.src.clone(),
            tgt_lang: self.tgt.clone(),
            model_size: self.model_size.clone(),
            beam_size: self.beam_size,
            device: self.device,
            compute_type: self.compute_type,
            synthesis: !self.no_tts,
            audio_format: self.audio_format,
            out_prefix: self.out_prefix.clone(),
            keep_text: self.keep_text,
            tts_model: self.tts_model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::model::{AudioFormat, ComputeType, Device};

    use super::Cli;

    #[test]
    fn defaults_match_documented_surface() {
        let cli = Cli::parse_from(["transvox", "/data/in"]);
        assert_eq!(cli.src, "fr");
        assert_eq!(cli.tgt, "es");
        assert_eq!(cli.model_size, "small");
        assert_eq!(cli.beam_size, 5);
        assert_eq!(cli.device, Device::Cpu);
        assert_eq!(cli.compute_type, ComputeType::Int8);
        assert!(!cli.no_tts);
        assert_eq!(cli.audio_format, AudioFormat::Wav);
        assert_eq!(cli.out_prefix.to_str(), Some("/data/output/output"));
        assert!(!cli.keep_text);
        assert!(!cli.json);
    }

    #[test]
    fn no_tts_disables_synthesis_in_config() {
        let cli = Cli::parse_from(["transvox", "in.wav", "--no-tts"]);
        let config = cli.to_config();
        assert!(!config.synthesis);
    }

    #[test]
    fn flags_flow_into_config() {
        let cli = Cli::parse_from([
            "transvox",
            "/data/in",
            "--src",
            "de",
            "--tgt",
            "pt",
            "--model-size",
            "large-v3",
            "--beam-size",
            "8",
            "--device",
            "cuda",
            "--compute-type",
            "float16",
            "--audio-format",
            "opus",
            "--out-prefix",
            "/tmp/out",
            "--keep-text",
        ]);
        let config = cli.to_config();
        assert_eq!(config.src_lang, "de");
        assert_eq!(config.tgt_lang, "pt");
        assert_eq!(config.model_size, "large-v3");
        assert_eq!(config.beam_size, 8);
        assert_eq!(config.device, Device::Cuda);
        assert_eq!(config.compute_type, ComputeType::Float16);
        assert_eq!(config.audio_format, AudioFormat::Opus);
        assert_eq!(config.out_prefix.to_str(), Some("/tmp/out"));
        assert!(config.keep_text);
        assert!(config.synthesis);
    }

    #[test]
    fn compute_type_values_use_engine_spelling() {
        let cli = Cli::parse_from(["transvox", "in.wav", "--compute-type", "int8_float16"]);
        assert_eq!(cli.compute_type, ComputeType::Int8Float16);
    }

    #[test]
    fn unknown_audio_format_is_rejected() {
        let result = Cli::try_parse_from(["transvox", "in.wav", "--audio-format", "flac"]);
        assert!(result.is_err());
    }

    #[test]
    fn input_is_required() {
        let result = Cli::try_parse_from(["transvox"]);
        assert!(result.is_err());
    }
}
