// SPDX-License-Identifier: Apache-2.0

//! Locating the Kokoro model assets on local storage.
//!
//! The model ships as two files that must live side by side: the ONNX graph
//! and the voice style archive. Two candidate directories are probed in a
//! fixed order; the first directory containing the complete pair wins.

use crate::error::{KokoroError, Result};
use std::path::{Path, PathBuf};

/// File name of the ONNX model inside a candidate directory.
pub const MODEL_FILE: &str = "kokoro-v1.0.onnx";

/// File name of the voice style archive inside a candidate directory.
pub const VOICES_FILE: &str = "voices-v1.0.bin";

/// Candidate directories relative to the search base, in priority order.
const CANDIDATE_DIRS: [&str; 2] = ["kokoro_env/kokoro_models", "kokoro_env"];

/// Resolved paths to the pair of model asset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAssets {
    /// Path to the ONNX model file
    pub model_path: PathBuf,
    /// Path to the voice style archive
    pub voices_path: PathBuf,
}

impl ModelAssets {
    /// Search the candidate directories under `base_dir` for a complete pair
    /// of asset files. No side effects; only existence checks.
    pub fn locate(base_dir: &Path) -> Result<Self> {
        for candidate in CANDIDATE_DIRS {
            let dir = base_dir.join(candidate);
            let model_path = dir.join(MODEL_FILE);
            let voices_path = dir.join(VOICES_FILE);
            if model_path.is_file() && voices_path.is_file() {
                return Ok(Self {
                    model_path,
                    voices_path,
                });
            }
        }

        Err(KokoroError::AssetsNotFound(format!(
            "{MODEL_FILE} and {VOICES_FILE} not found under {} (searched {})",
            base_dir.display(),
            CANDIDATE_DIRS.join(", "),
        )))
    }

    /// Use explicit asset paths, validating that both files exist.
    pub fn from_paths(model_path: PathBuf, voices_path: PathBuf) -> Result<Self> {
        if !model_path.is_file() {
            return Err(KokoroError::AssetsNotFound(format!(
                "model file missing: {}",
                model_path.display()
            )));
        }
        if !voices_path.is_file() {
            return Err(KokoroError::AssetsNotFound(format!(
                "voices file missing: {}",
                voices_path.display()
            )));
        }
        Ok(Self {
            model_path,
            voices_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_locate_prefers_models_subdirectory() {
        let base = tempfile::tempdir().unwrap();
        let models = base.path().join("kokoro_env/kokoro_models");
        let env = base.path().join("kokoro_env");
        touch(&models.join(MODEL_FILE));
        touch(&models.join(VOICES_FILE));
        touch(&env.join(MODEL_FILE));
        touch(&env.join(VOICES_FILE));

        let assets = ModelAssets::locate(base.path()).unwrap();
        assert_eq!(assets.model_path, models.join(MODEL_FILE));
        assert_eq!(assets.voices_path, models.join(VOICES_FILE));
    }

    #[test]
    fn test_locate_falls_back_to_env_directory() {
        let base = tempfile::tempdir().unwrap();
        let env = base.path().join("kokoro_env");
        touch(&env.join(MODEL_FILE));
        touch(&env.join(VOICES_FILE));

        let assets = ModelAssets::locate(base.path()).unwrap();
        assert_eq!(assets.model_path, env.join(MODEL_FILE));
    }

    #[test]
    fn test_locate_requires_complete_pair() {
        let base = tempfile::tempdir().unwrap();
        // Model in one candidate, voices in the other: neither pair is complete.
        touch(&base.path().join("kokoro_env/kokoro_models").join(MODEL_FILE));
        touch(&base.path().join("kokoro_env").join(VOICES_FILE));

        let err = ModelAssets::locate(base.path()).unwrap_err();
        assert!(matches!(err, KokoroError::AssetsNotFound(_)));
    }

    #[test]
    fn test_locate_reports_missing_assets() {
        let base = tempfile::tempdir().unwrap();
        let err = ModelAssets::locate(base.path()).unwrap_err();
        assert!(err.to_string().contains("model assets not found"));
        assert!(err.to_string().contains(MODEL_FILE));
    }

    #[test]
    fn test_from_paths_validates_both_files() {
        let base = tempfile::tempdir().unwrap();
        let model = base.path().join(MODEL_FILE);
        let voices = base.path().join(VOICES_FILE);
        touch(&model);

        assert!(ModelAssets::from_paths(model.clone(), voices.clone()).is_err());
        touch(&voices);
        assert!(ModelAssets::from_paths(model, voices).is_ok());
    }
}
