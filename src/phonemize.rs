// SPDX-License-Identifier: Apache-2.0

//! Grapheme-to-phoneme conversion.
//!
//! Kokoro consumes IPA phonemes, not raw text. Conversion shells out to the
//! espeak-ng executable (fallback: espeak); the [`Phonemizer`] trait is the
//! seam that lets the engine run without espeak in tests.

use crate::error::{KokoroError, Result};
use std::process::{Command, Stdio};

/// Grapheme-to-phoneme conversion backend.
pub trait Phonemizer {
    /// Name of the backing program, for diagnostics.
    fn name(&self) -> &str;

    /// Convert `text` to an IPA phoneme string for the given espeak language.
    fn phonemize(&self, text: &str, lang: &str) -> Result<String>;
}

/// Phonemizer backed by the espeak-ng (or espeak) executable.
#[derive(Debug)]
pub struct EspeakPhonemizer {
    program: String,
}

impl EspeakPhonemizer {
    /// Probe `PATH` for `espeak-ng`, then `espeak`.
    pub fn detect() -> Result<Self> {
        for program in ["espeak-ng", "espeak"] {
            if executable_in_path(program) {
                return Ok(Self {
                    program: program.to_string(),
                });
            }
        }
        Err(KokoroError::Phonemize(
            "no phonemizer found on PATH: install espeak-ng or espeak".to_string(),
        ))
    }

    /// Use a specific espeak-compatible executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Phonemizer for EspeakPhonemizer {
    fn name(&self) -> &str {
        &self.program
    }

    fn phonemize(&self, text: &str, lang: &str) -> Result<String> {
        let output = Command::new(&self.program)
            .args(["-q", "--ipa=3", "-v", lang])
            .arg(text)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                KokoroError::Phonemize(format!("failed to run '{}': {e}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KokoroError::Phonemize(format!(
                "'{}' exited with failure: {}",
                self.program,
                stderr.trim()
            )));
        }

        let phonemes = String::from_utf8(output.stdout)
            .map_err(|_| KokoroError::Phonemize("phonemizer emitted non-utf8 output".to_string()))?;

        // espeak emits one line per sentence; the model wants a single stream.
        let joined = phonemes.split_whitespace().collect::<Vec<_>>().join(" ");
        if joined.is_empty() {
            return Err(KokoroError::Phonemize(format!(
                "'{}' returned no phonemes for the input",
                self.program
            )));
        }
        Ok(joined)
    }
}

/// Check whether `command` resolves to a file in one of the `PATH` entries.
pub(crate) fn executable_in_path(command: &str) -> bool {
    let Some(path_var) = std::env::var_os("PATH") else {
        return false;
    };

    for dir in std::env::split_paths(&path_var) {
        if dir.join(command).is_file() {
            return true;
        }
        #[cfg(windows)]
        for ext in ["exe", "bat", "cmd"] {
            if dir.join(format!("{command}.{ext}")).is_file() {
                return true;
            }
        }
    }
    false
}
