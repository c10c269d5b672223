// SPDX-License-Identifier: Apache-2.0

//! The Kokoro synthesis engine.
//!
//! Wraps an ONNX Runtime session over the Kokoro v1.0 model together with the
//! voice style archive. Synthesis is synchronous: phonemize, encode to symbol
//! ids, select the style vector, run the graph, return the waveform.

use crate::assets::ModelAssets;
use crate::error::{KokoroError, Result};
use crate::phonemize::{EspeakPhonemizer, Phonemizer};
use crate::tokenizer::{Vocab, MAX_TOKENS, PAD_ID};
use crate::voices::VoicePack;
use ndarray::{Array1, Array2};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;

/// Output sample rate of the Kokoro model, in Hz.
pub const SAMPLE_RATE: u32 = 24_000;

/// Kokoro text-to-speech engine.
pub struct Kokoro {
    session: Session,
    voices: VoicePack,
    vocab: Vocab,
    phonemizer: Box<dyn Phonemizer>,
}

impl Kokoro {
    /// Load the engine from located model assets, detecting the phonemizer
    /// on `PATH`.
    pub fn new(assets: &ModelAssets) -> Result<Self> {
        Self::with_phonemizer(assets, Box::new(EspeakPhonemizer::detect()?))
    }

    /// Load the engine with an explicit phonemizer backend.
    pub fn with_phonemizer(assets: &ModelAssets, phonemizer: Box<dyn Phonemizer>) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(1)?
            .with_inter_threads(1)?
            .commit_from_file(&assets.model_path)
            .map_err(|e| {
                KokoroError::ModelLoad(format!("{}: {e}", assets.model_path.display()))
            })?;

        let voices = VoicePack::load(&assets.voices_path)?;

        Ok(Self {
            session,
            voices,
            vocab: Vocab::new(),
            phonemizer,
        })
    }

    /// Synthesize `text` with the given voice and speed multiplier.
    ///
    /// Returns the mono float32 waveform and its sample rate.
    pub fn create(&mut self, text: &str, voice: &str, speed: f32) -> Result<(Vec<f32>, u32)> {
        if text.trim().is_empty() {
            return Err(KokoroError::InvalidInput("text is empty".to_string()));
        }
        if !self.voices.contains(voice) {
            return Err(KokoroError::UnknownVoice(voice.to_string()));
        }

        let phonemes = self.phonemizer.phonemize(text, espeak_language(voice))?;
        let tokens = self.vocab.encode(&phonemes);
        if tokens.is_empty() {
            return Err(KokoroError::InvalidInput(
                "text produced no encodable symbols".to_string(),
            ));
        }
        if tokens.len() > MAX_TOKENS {
            return Err(KokoroError::InvalidInput(format!(
                "text produced {} symbols but the model accepts at most {MAX_TOKENS}; \
                 shorten the text",
                tokens.len()
            )));
        }

        // The style row is indexed by the unpadded token count.
        let style = self.voices.style(voice, tokens.len())?.to_vec();

        let input_ids = pad_tokens(&tokens);
        let input_ids = Array2::from_shape_vec((1, input_ids.len()), input_ids)
            .map_err(|e| KokoroError::Synthesis(e.to_string()))?;
        let style = Array2::from_shape_vec((1, style.len()), style)
            .map_err(|e| KokoroError::Synthesis(e.to_string()))?;
        let speed = Array1::from_elem(1, speed);

        let outputs = self.session.run(ort::inputs![
            "input_ids" => Value::from_array(input_ids)?,
            "style" => Value::from_array(style)?,
            "speed" => Value::from_array(speed)?
        ])?;

        if outputs.len() == 0 {
            return Err(KokoroError::Synthesis(
                "model returned no output tensors".to_string(),
            ));
        }
        let (_, samples) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| KokoroError::Synthesis(format!("bad output tensor: {e}")))?;

        Ok((samples.to_vec(), SAMPLE_RATE))
    }

    /// Voice identifiers available in the loaded archive, sorted.
    pub fn voices(&self) -> Vec<String> {
        self.voices.names()
    }
}

/// Surround a symbol id sequence with the pad id the model expects.
fn pad_tokens(tokens: &[i64]) -> Vec<i64> {
    let mut padded = Vec::with_capacity(tokens.len() + 2);
    padded.push(PAD_ID);
    padded.extend_from_slice(tokens);
    padded.push(PAD_ID);
    padded
}

/// Map a voice identifier to the espeak voice used for phonemization.
///
/// Identifiers are prefixed by accent: `a…` is American, `b…` British.
fn espeak_language(voice: &str) -> &'static str {
    match voice.as_bytes().first() {
        Some(b'b') => "en-gb",
        _ => "en-us",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_espeak_language_by_voice_prefix() {
        assert_eq!(espeak_language("af"), "en-us");
        assert_eq!(espeak_language("am_adam"), "en-us");
        assert_eq!(espeak_language("bf_emma"), "en-gb");
        assert_eq!(espeak_language("bm_george"), "en-gb");
        assert_eq!(espeak_language(""), "en-us");
    }

    #[test]
    fn test_pad_tokens_wraps_sequence() {
        assert_eq!(pad_tokens(&[5, 6, 7]), vec![PAD_ID, 5, 6, 7, PAD_ID]);
        assert_eq!(pad_tokens(&[]), vec![PAD_ID, PAD_ID]);
    }
}
