// SPDX-License-Identifier: Apache-2.0

//! Playing a WAV file through an external audio player.
//!
//! Each platform has a prioritized list of player commands. Candidates are
//! invoked synchronously in order; a candidate that cannot be spawned and one
//! that exits non-zero are treated identically as unavailable, and the next
//! is tried. Playback failure is reported, never fatal to the caller.

use crate::error::{KokoroError, Result};
use std::path::Path;
use std::process::Command;

/// Host platform family, resolved once at startup and injected into
/// candidate selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux and other unix-likes
    Posix,
    /// macOS
    Apple,
    /// Windows
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Apple
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }
}

/// One player invocation: a program and its full argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    /// Program name, resolved via `PATH` at spawn time
    pub program: String,
    /// Arguments, including the file to play
    pub args: Vec<String>,
}

/// Candidate player invocations for `path`, in priority order.
pub fn candidates(platform: Platform, path: &Path) -> Vec<PlayerCommand> {
    let file = path.display().to_string();
    match platform {
        Platform::Apple => vec![PlayerCommand {
            program: "afplay".to_string(),
            args: vec![file],
        }],
        Platform::Windows => vec![PlayerCommand {
            program: "powershell".to_string(),
            args: vec![
                "-c".to_string(),
                format!("(New-Object Media.SoundPlayer \"{file}\").PlaySync()"),
            ],
        }],
        Platform::Posix => ["aplay", "paplay", "play"]
            .into_iter()
            .map(|program| PlayerCommand {
                program: program.to_string(),
                args: vec![file.clone()],
            })
            .collect(),
    }
}

/// Play `path` with the first working candidate for the current platform.
pub fn play(path: &Path) -> Result<()> {
    play_on(Platform::current(), path)
}

/// Play `path` on the given platform, trying candidates in order.
pub fn play_on(platform: Platform, path: &Path) -> Result<()> {
    try_candidates(&candidates(platform, path), run_player)
}

/// Launch one candidate and wait for it. Unavailable when the program cannot
/// be spawned or exits non-zero.
fn run_player(command: &PlayerCommand) -> bool {
    Command::new(&command.program)
        .args(&command.args)
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn try_candidates(
    commands: &[PlayerCommand],
    mut runner: impl FnMut(&PlayerCommand) -> bool,
) -> Result<()> {
    for command in commands {
        if runner(command) {
            return Ok(());
        }
    }

    Err(KokoroError::Playback(format!(
        "no audio player succeeded (tried: {})",
        commands
            .iter()
            .map(|c| c.program.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn wav() -> PathBuf {
        PathBuf::from("/tmp/out.wav")
    }

    #[test]
    fn test_apple_and_windows_have_one_candidate() {
        assert_eq!(candidates(Platform::Apple, &wav()).len(), 1);
        assert_eq!(candidates(Platform::Apple, &wav())[0].program, "afplay");
        assert_eq!(candidates(Platform::Windows, &wav()).len(), 1);
    }

    #[test]
    fn test_posix_candidates_in_priority_order() {
        let programs: Vec<String> = candidates(Platform::Posix, &wav())
            .into_iter()
            .map(|c| c.program)
            .collect();
        assert_eq!(programs, vec!["aplay", "paplay", "play"]);
    }

    #[test]
    fn test_windows_invocation_embeds_path() {
        let command = candidates(Platform::Windows, &wav()).remove(0);
        assert_eq!(command.args[0], "-c");
        assert!(command.args[1].contains("/tmp/out.wav"));
        assert!(command.args[1].contains("PlaySync"));
    }

    #[test]
    fn test_stops_at_first_successful_candidate() {
        let commands = candidates(Platform::Posix, &wav());
        let mut attempted = Vec::new();

        let result = try_candidates(&commands, |command| {
            attempted.push(command.program.clone());
            command.program == "paplay"
        });

        assert!(result.is_ok());
        assert_eq!(attempted, vec!["aplay", "paplay"]);
    }

    #[test]
    fn test_exhausting_candidates_is_an_error() {
        let commands = candidates(Platform::Posix, &wav());
        let mut attempts = 0;

        let err = try_candidates(&commands, |_| {
            attempts += 1;
            false
        })
        .unwrap_err();

        assert_eq!(attempts, 3);
        assert!(matches!(err, KokoroError::Playback(_)));
        assert!(err.to_string().contains("aplay"));
    }

    #[test]
    fn test_failure_modes_are_indistinguishable() {
        // A spawn failure and a non-zero exit both read as `false` from the
        // runner, so the iteration order is the only observable behavior.
        let commands = candidates(Platform::Posix, &wav());
        let mut attempted = Vec::new();

        let _ = try_candidates(&commands, |command| {
            attempted.push(command.program.clone());
            command.program == "play"
        });

        assert_eq!(attempted, vec!["aplay", "paplay", "play"]);
    }
}
