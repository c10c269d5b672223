// SPDX-License-Identifier: Apache-2.0

//! # Kokoro TTS
//!
//! Text-to-speech synthesis built around the Kokoro v1.0 ONNX model.
//!
//! The crate locates the model assets on local storage, synthesizes a mono
//! float32 waveform for a text string and voice, and writes the result as a
//! 16-bit PCM WAV file. Playback through a platform audio player is available
//! as a separate, non-fatal step.
//!
//! ## Quick start
//!
//! ```ignore
//! use kokoro_tts::{assets::ModelAssets, audio, engine::Kokoro};
//! use std::path::Path;
//!
//! let assets = ModelAssets::locate(Path::new("."))?;
//! let mut engine = Kokoro::new(&assets)?;
//!
//! let (samples, sample_rate) = engine.create("Hello, world!", "af", 1.0)?;
//! audio::write_wav_file(Path::new("output.wav"), &samples, sample_rate)?;
//! ```
//!
//! ## Listing voices
//!
//! ```ignore
//! use kokoro_tts::voices::VoicePack;
//! use std::path::Path;
//!
//! let pack = VoicePack::load(Path::new("voices-v1.0.bin"))?;
//! for voice in pack.names() {
//!     println!("{voice}");
//! }
//! ```

#![warn(missing_docs)]

pub mod assets;
pub mod audio;
pub mod engine;
pub mod error;
pub mod phonemize;
pub mod playback;
pub mod tokenizer;
pub mod voices;

// Re-export main types at crate root for convenience
pub use assets::ModelAssets;
pub use engine::{Kokoro, SAMPLE_RATE};
pub use error::{KokoroError, Result};
pub use playback::Platform;
pub use voices::VoicePack;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
