// SPDX-License-Identifier: Apache-2.0

//! Kokoro text-to-speech command line.
//!
//! Synthesizes speech for a text string, writes a mono 16-bit WAV file,
//! prints the output path on stdout, and plays it unless suppressed. All
//! progress and diagnostics go to stderr so a calling process can consume
//! stdout directly.
//!
//! Usage:
//!   kokoro-tts --text "Hello, world!" --voice af
//!   kokoro-tts --list-voices

use anyhow::Context;
use clap::Parser;
use kokoro_tts::assets::ModelAssets;
use kokoro_tts::audio::write_wav_file;
use kokoro_tts::engine::Kokoro;
use kokoro_tts::playback;
use kokoro_tts::voices::VoicePack;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kokoro-tts", about = "Kokoro text-to-speech", version)]
struct Cli {
    /// List available voices and exit
    #[arg(long)]
    list_voices: bool,

    /// Text to synthesize
    #[arg(long, required_unless_present = "list_voices")]
    text: Option<String>,

    /// Voice to use
    #[arg(long, default_value = "af")]
    voice: String,

    /// Output WAV path; a persistent temp file is created when omitted
    #[arg(long)]
    output: Option<PathBuf>,

    /// Don't play the audio after writing it
    #[arg(long)]
    no_play: bool,

    /// Speech speed multiplier
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Directory to search for model assets (defaults to the working directory)
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base_dir = match &cli.model_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine working directory")?,
    };

    // Validate the model setup before doing anything else.
    let assets = ModelAssets::locate(&base_dir).context("setup error")?;

    if cli.list_voices {
        // Listing only needs the voice archive, not the full engine.
        let pack = VoicePack::load(&assets.voices_path)?;
        for voice in pack.names() {
            println!("{voice}");
        }
        return Ok(());
    }

    let text = cli.text.as_deref().unwrap_or_default();

    let mut engine = Kokoro::new(&assets)?;

    eprintln!(
        "Generating speech with voice '{}': {}...",
        cli.voice,
        text.chars().take(50).collect::<String>()
    );
    let (samples, sample_rate) = engine.create(text, &cli.voice, cli.speed)?;

    let output_path = match &cli.output {
        Some(path) => path.clone(),
        None => {
            // Persisted on purpose; the calling process owns the file from here.
            let file = tempfile::Builder::new()
                .prefix("kokoro-")
                .suffix(".wav")
                .tempfile()
                .context("failed to create temporary output file")?;
            file.keep()
                .context("failed to persist temporary output file")?
                .1
        }
    };

    write_wav_file(&output_path, &samples, sample_rate)?;
    eprintln!("Audio saved to: {}", output_path.display());

    if !cli.no_play {
        if let Err(err) = playback::play(&output_path) {
            eprintln!("Error playing audio: {err}");
        }
    }

    // The one line a calling process consumes.
    println!("{}", output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_required_without_list_voices() {
        assert!(Cli::try_parse_from(["kokoro-tts"]).is_err());
        assert!(Cli::try_parse_from(["kokoro-tts", "--voice", "af"]).is_err());
    }

    #[test]
    fn test_list_voices_needs_no_text() {
        let cli = Cli::try_parse_from(["kokoro-tts", "--list-voices"]).unwrap();
        assert!(cli.list_voices);
        assert!(cli.text.is_none());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["kokoro-tts", "--text", "hi"]).unwrap();
        assert_eq!(cli.voice, "af");
        assert_eq!(cli.speed, 1.0);
        assert!(!cli.no_play);
        assert!(cli.output.is_none());
        assert!(cli.model_dir.is_none());
    }

    #[test]
    fn test_full_flag_set() {
        let cli = Cli::try_parse_from([
            "kokoro-tts",
            "--text",
            "hi",
            "--voice",
            "bf_emma",
            "--output",
            "out.wav",
            "--speed",
            "1.2",
            "--no-play",
        ])
        .unwrap();
        assert_eq!(cli.voice, "bf_emma");
        assert_eq!(cli.output, Some(PathBuf::from("out.wav")));
        assert_eq!(cli.speed, 1.2);
        assert!(cli.no_play);
    }
}
