//! Argos Translate binding: per-hop subprocess calls plus the two-hop
//! pivot composition.
//!
//! Only the pivot path through English is guaranteed provisioned, so the
//! batch never asks for a direct source-to-target translation.

use crate::error::{TvError, TvResult};
use crate::process::{run_command, run_command_with_stdin};

use super::Translator;

const TRANSLATE_BIN: &str = "argos-translate";
const PACKAGE_MANAGER_BIN: &str = "argospm";

/// One installed translation hop.
pub struct ArgosTranslator {
    from: String,
    to: String,
}

impl ArgosTranslator {
    #[must_use]
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_owned(),
            to: to.to_owned(),
        }
    }
}

impl Translator for ArgosTranslator {
    fn translate(&self, text: &str) -> TvResult<String> {
        let args = vec![
            "--from-lang".to_owned(),
            self.from.clone(),
            "--to-lang".to_owned(),
            self.to.clone(),
        ];
        let output = run_command_with_stdin(TRANSLATE_BIN, &args, Some(text.as_bytes()))?;
        Ok(String::from_utf8_lossy(&output.stdout)
            .trim_end()
            .to_owned())
    }
}

/// Source-to-target translation via two fixed hops: source→English, then
/// English→target.
pub struct PivotTranslator {
    first_hop: ArgosTranslator,
    second_hop: ArgosTranslator,
}

impl PivotTranslator {
    /// Check that both pivot packages are installed and build the hop
    /// pair. Missing packages are reported together so one run surfaces
    /// the whole provisioning gap; nothing is installed on the fly.
    pub fn new(src_lang: &str, tgt_lang: &str) -> TvResult<Self> {
        let output = run_command(PACKAGE_MANAGER_BIN, &["list".to_owned()])?;
        let listing = String::from_utf8_lossy(&output.stdout).into_owned();

        let missing = missing_packages(&listing, src_lang, tgt_lang);
        if !missing.is_empty() {
            return Err(TvError::MissingLanguagePacks { packages: missing });
        }

        Ok(Self {
            first_hop: ArgosTranslator::new(src_lang, "en"),
            second_hop: ArgosTranslator::new("en", tgt_lang),
        })
    }
}

impl Translator for PivotTranslator {
    fn translate(&self, text: &str) -> TvResult<String> {
        let english = self.first_hop.translate(text)?;
        self.second_hop.translate(&english)
    }
}

/// Names of the pivot packages absent from an `argospm list` listing.
fn missing_packages(listing: &str, src_lang: &str, tgt_lang: &str) -> Vec<String> {
    let required = [
        format!("translate-{src_lang}_en"),
        format!("translate-en_{tgt_lang}"),
    ];

    required
        .into_iter()
        .filter(|package| {
            !listing
                .lines()
                .any(|line| line.split_whitespace().next() == Some(package.as_str()))
        })
        .collect()
}
