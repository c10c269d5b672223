// SPDX-License-Identifier: Apache-2.0

//! Error types for the Kokoro TTS crate.

use thiserror::Error;

/// Main error type for Kokoro TTS operations.
#[derive(Error, Debug)]
pub enum KokoroError {
    /// Model asset files could not be located
    #[error("model assets not found: {0}")]
    AssetsNotFound(String),

    /// Error loading the ONNX model
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Error reading the voice style archive
    #[error("voice archive error: {0}")]
    Voices(String),

    /// Requested voice is not present in the archive
    #[error("unknown voice: {0}")]
    UnknownVoice(String),

    /// Grapheme-to-phoneme conversion failed
    #[error("phonemization error: {0}")]
    Phonemize(String),

    /// Error during model inference
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Error during audio encoding or decoding
    #[error("audio processing error: {0}")]
    Audio(String),

    /// No audio player candidate succeeded
    #[error("playback error: {0}")]
    Playback(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ONNX Runtime error
    #[error("onnx runtime error: {0}")]
    Ort(#[from] ort::Error),

    /// Voice archive container error
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Result type alias for Kokoro TTS operations.
pub type Result<T> = std::result::Result<T, KokoroError>;
