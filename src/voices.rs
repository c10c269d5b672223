// SPDX-License-Identifier: Apache-2.0

//! Voice style archive loading and lookup.
//!
//! `voices-v1.0.bin` is a NumPy `.npz` archive: a zip container holding one
//! `.npy` entry per voice. Each entry is a little-endian float32 tensor of
//! shape `(510, 256)` or `(510, 1, 256)` with one style vector per input
//! token count.

use crate::error::{KokoroError, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Style vectors for a single voice, one row per input token count.
#[derive(Debug, Clone)]
pub struct VoiceStyle {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl VoiceStyle {
    /// Style row for the given token count, clamped to the last row.
    fn row(&self, token_count: usize) -> &[f32] {
        let index = token_count.min(self.rows - 1);
        &self.data[index * self.cols..(index + 1) * self.cols]
    }

    /// Dimension of each style vector.
    pub fn dim(&self) -> usize {
        self.cols
    }
}

/// All voices from a style archive, keyed by identifier.
#[derive(Debug)]
pub struct VoicePack {
    voices: BTreeMap<String, VoiceStyle>,
}

impl VoicePack {
    /// Load a voice archive from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| KokoroError::Voices(format!("failed to open {}: {e}", path.display())))?;
        let mut archive = ZipArchive::new(file)?;

        let mut voices = BTreeMap::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let name = entry.name().to_string();
            let Some(voice) = name.strip_suffix(".npy") else {
                continue;
            };

            let mut raw = Vec::new();
            entry.read_to_end(&mut raw)?;
            let style = parse_npy_f32(&raw)
                .map_err(|e| KokoroError::Voices(format!("entry '{name}': {e}")))?;
            voices.insert(voice.to_string(), style);
        }

        if voices.is_empty() {
            return Err(KokoroError::Voices(format!(
                "no voice entries in {}",
                path.display()
            )));
        }

        Ok(Self { voices })
    }

    /// Voice identifiers, lexicographically sorted.
    pub fn names(&self) -> Vec<String> {
        self.voices.keys().cloned().collect()
    }

    /// Whether the archive contains `voice`.
    pub fn contains(&self, voice: &str) -> bool {
        self.voices.contains_key(voice)
    }

    /// Style vector for `voice` at the given input token count.
    pub fn style(&self, voice: &str, token_count: usize) -> Result<&[f32]> {
        let style = self
            .voices
            .get(voice)
            .ok_or_else(|| KokoroError::UnknownVoice(voice.to_string()))?;
        Ok(style.row(token_count))
    }
}

/// Parse a `.npy` payload holding a C-ordered little-endian float32 tensor.
///
/// Accepts 2-D shapes and 3-D shapes with a unit middle axis (the form the
/// Kokoro archive uses); the middle axis is collapsed.
fn parse_npy_f32(bytes: &[u8]) -> std::result::Result<VoiceStyle, String> {
    const MAGIC: &[u8] = b"\x93NUMPY";
    if bytes.len() < 10 || &bytes[..6] != MAGIC {
        return Err("not an npy payload".to_string());
    }

    let (header_len, header_start) = match bytes[6] {
        1 => (u16::from_le_bytes([bytes[8], bytes[9]]) as usize, 10),
        2 | 3 => {
            if bytes.len() < 12 {
                return Err("truncated npy header".to_string());
            }
            let len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
            (len, 12)
        }
        version => return Err(format!("unsupported npy version {version}")),
    };

    let header_end = header_start + header_len;
    if bytes.len() < header_end {
        return Err("npy header exceeds payload".to_string());
    }
    let header = std::str::from_utf8(&bytes[header_start..header_end])
        .map_err(|_| "npy header is not utf-8".to_string())?;

    let descr = header_field(header, "descr").ok_or("npy header missing 'descr'")?;
    if descr != "<f4" {
        return Err(format!("unsupported dtype '{descr}', expected '<f4'"));
    }
    let order = header_field(header, "fortran_order").ok_or("npy header missing 'fortran_order'")?;
    if order != "False" {
        return Err("fortran-ordered arrays are not supported".to_string());
    }

    let shape = header_shape(header).ok_or("npy header missing 'shape'")?;
    let (rows, cols) = match shape.as_slice() {
        [rows, cols] => (*rows, *cols),
        [rows, 1, cols] => (*rows, *cols),
        other => return Err(format!("unsupported style shape {other:?}")),
    };
    if rows == 0 || cols == 0 {
        return Err("empty style tensor".to_string());
    }

    let expected = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(4))
        .ok_or("style shape overflows")?;
    let payload = &bytes[header_end..];
    if payload.len() != expected {
        return Err(format!(
            "data size mismatch: expected {expected} bytes, got {}",
            payload.len()
        ));
    }

    let data = payload
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    Ok(VoiceStyle { rows, cols, data })
}

/// Extract a quoted or bare scalar field from an npy dict header.
fn header_field<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let pattern = format!("'{key}':");
    let rest = header[header.find(&pattern)? + pattern.len()..].trim_start();

    for quote in ['\'', '"'] {
        if let Some(stripped) = rest.strip_prefix(quote) {
            return stripped.find(quote).map(|end| &stripped[..end]);
        }
    }
    let end = rest.find([',', '}']).unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Extract the shape tuple from an npy dict header.
fn header_shape(header: &str) -> Option<Vec<usize>> {
    let rest = &header[header.find("'shape':")? + "'shape':".len()..];
    let open = rest.find('(')?;
    let close = rest[open + 1..].find(')')?;
    rest[open + 1..open + 1 + close]
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<usize>().ok())
        .collect()
}
