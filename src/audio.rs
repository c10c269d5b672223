// SPDX-License-Identifier: Apache-2.0

//! WAV encoding and decoding.
//!
//! Output is always a mono 16-bit PCM RIFF/WAVE file at the sample rate the
//! engine produced.

use crate::error::{KokoroError, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Write float samples to a mono 16-bit PCM WAV file at `path`.
///
/// Each sample is scaled by 32767 and cast to `i16`; out-of-range samples
/// saturate at the clamp rather than wrapping. Creates or overwrites the file.
pub fn write_wav_file(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)
        .map_err(|e| KokoroError::Audio(format!("failed to create {}: {e}", path.display())))?;

    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer
            .write_sample((clamped * 32767.0) as i16)
            .map_err(|e| KokoroError::Audio(format!("failed to write sample: {e}")))?;
    }

    writer
        .finalize()
        .map_err(|e| KokoroError::Audio(format!("failed to finalize WAV: {e}")))?;

    Ok(())
}

/// Read a WAV file back to float samples in `[-1, 1]` and its sample rate.
///
/// Integer formats are scaled by their bit depth; stereo is folded to mono.
pub fn read_wav_file(path: &Path) -> Result<(Vec<f32>, u32)> {
    let reader = WavReader::open(path)
        .map_err(|e| KokoroError::Audio(format!("failed to open {}: {e}", path.display())))?;

    let spec = reader.spec();
    let sample_rate = spec.sample_rate;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.into_samples::<f32>().filter_map(|s| s.ok()).collect(),
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .filter_map(|s| s.ok())
                .map(|s| s as f32 / max_val)
                .collect()
        }
    };

    let samples = if spec.channels == 2 {
        samples
            .chunks(2)
            .map(|pair| (pair[0] + pair.get(1).copied().unwrap_or(pair[0])) / 2.0)
            .collect()
    } else {
        samples
    };

    Ok((samples, sample_rate))
}
