use regex::Regex;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;
use crate::chord::Chord;

lazy_static! {
    // Non-greedy: a token ends at the first `]` after its `[`.
    static ref BRACKET_RE: Regex = Regex::new(r"\[(.*?)\]").unwrap();
}

/// Every bracketed token in the text, in document order.
/// Empty brackets yield an empty token.
pub fn extract_tokens(text: &str) -> Vec<String> {
    BRACKET_RE.captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// One song's chords, in the order they are played.
#[derive(Debug, Clone, Default)]
pub struct Song {
    pub chords: Vec<Chord>,
}

impl Song {
    /// Extract and parse the chords from chord-pro text.
    /// Tokens that don't parse as chords are logged and skipped,
    /// so the surviving chords stay adjacent to each other.
    pub fn from_text(text: &str) -> Song {
        let chords = extract_tokens(text).into_iter()
            .filter_map(|token| {
                match token.parse::<Chord>() {
                    Ok(chord) => Some(chord),
                    Err(_) => {
                        tracing::warn!("`{}` is not a chord", token);
                        None
                    }
                }
            })
            .collect();
        Song { chords }
    }

    pub fn load(path: &Path) -> Result<Song> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Ok(Song::from_text(&text))
    }
}

/// Expand any directory arguments into the `.cho` files they contain,
/// sorted, leaving plain file arguments as-is.
pub fn collect_song_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for path in paths {
        if path.is_dir() {
            let mut songs: Vec<PathBuf> = fs::read_dir(path)
                .with_context(|| format!("could not read {}", path.display()))?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|p| p.extension().map_or(false, |ext| ext == "cho"))
                .collect();
            songs.sort();
            files.extend(songs);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_extract_tokens() {
        let text = "[C]Some [G]lyrics [Am]here\nmore [F]lyrics";
        let tokens = extract_tokens(text);
        assert_eq!(tokens, vec!["C", "G", "Am", "F"]);
    }

    #[test]
    fn test_extract_tokens_empty_brackets() {
        let tokens = extract_tokens("[C]la[]la[G]");
        assert_eq!(tokens, vec!["C", "", "G"]);
    }

    #[test]
    fn test_extract_tokens_non_greedy() {
        // The token ends at the first closing bracket.
        let tokens = extract_tokens("[C] la] [G]");
        assert_eq!(tokens, vec!["C", "G"]);
    }

    #[test]
    fn test_extract_tokens_none() {
        assert!(extract_tokens("just lyrics, no chords").is_empty());
    }

    #[test]
    fn test_song_from_text() {
        let text = "[Verse 1]\n[C]Hello [notachord]darkness [G7]my old [C]friend";
        let song = Song::from_text(text);
        let labels: Vec<String> = song.chords.iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, vec!["C", "G7", "C"]);
    }

    #[test]
    fn test_song_survivor_adjacency() {
        // Invalid tokens drop out entirely: C and G end up adjacent.
        let song = Song::from_text("[C][x32010][G]");
        let labels: Vec<String> = song.chords.iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, vec!["C", "G"]);
    }
}
