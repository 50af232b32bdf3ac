use regex::Regex;
use thiserror::Error;
use std::{fmt, str::FromStr};
use lazy_static::lazy_static;

lazy_static! {
    static ref CHORD_RE: Regex = Regex::new(
        r"^([A-G][#b]?)(maj|m|dim|aug)?([0-9]*)(sus)?([0-9]*)$")
        .unwrap();
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Quality {
    Maj,
    Min,
    Dim,
    Aug,
}

impl Quality {
    fn token(&self) -> &'static str {
        match self {
            Quality::Maj => "maj",
            Quality::Min => "m",
            Quality::Dim => "dim",
            Quality::Aug => "aug",
        }
    }
}

/// A chord as written in a chord-pro bracket, e.g. "F#m7" or "Asus4".
/// A missing quality marker means a plain major chord.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Chord {
    pub root: String,
    pub quality: Option<Quality>,
    pub extension: String,

    // "sus" suffix with its own trailing digits, e.g. "sus4".
    pub sus: Option<String>,
}

impl Chord {
    /// Reduce to just the root, or root+"m" for minor chords.
    /// dim and aug chords have no stripped form and return None.
    pub fn stripped(&self) -> Option<String> {
        match self.quality {
            None | Some(Quality::Maj) => Some(self.root.clone()),
            Some(Quality::Min) => Some(format!("{}m", self.root)),
            Some(Quality::Dim) | Some(Quality::Aug) => None,
        }
    }

    /// A plain major chord with an added 7, e.g. "G7".
    /// "Gmaj7" is a major seventh, not a dominant seventh.
    pub fn is_dominant_seventh(&self) -> bool {
        self.quality.is_none() && self.extension == "7"
    }

    /// Dissonant chords want to resolve: dim, sus, or any extension.
    pub fn is_dissonant(&self) -> bool {
        matches!(self.quality, Some(Quality::Dim))
            || self.sus.is_some()
            || !self.extension.is_empty()
    }

    /// A bare root with no quality marker, sus, or extension.
    pub fn is_consonant(&self) -> bool {
        self.quality.is_none() && self.sus.is_none() && self.extension.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum ChordParseError {
    #[error("Invalid chord `{0}`")]
    InvalidChord(String),
}

/// Try to parse a chord from a string, e.g. "F#m7".
impl FromStr for Chord {
    type Err = ChordParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = CHORD_RE.captures(s).ok_or_else(|| ChordParseError::InvalidChord(s.to_string()))?;
        let root = caps.get(1)
            .ok_or_else(|| ChordParseError::InvalidChord(s.to_string()))?
            .as_str().to_string();
        let quality = match caps.get(2).map(|m| m.as_str()) {
            Some("maj") => Some(Quality::Maj),
            Some("m") => Some(Quality::Min),
            Some("dim") => Some(Quality::Dim),
            Some("aug") => Some(Quality::Aug),
            _ => None,
        };
        let extension = caps.get(3).map(|m| m.as_str()).unwrap_or_default().to_string();
        let sus = if caps.get(4).is_some() {
            Some(caps.get(5).map(|m| m.as_str()).unwrap_or_default().to_string())
        } else {
            None
        };
        Ok(Chord { root, quality, extension, sus })
    }
}

impl TryFrom<&str> for Chord {
    type Error = ChordParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_str(s)
    }
}

impl TryFrom<String> for Chord {
    type Error = ChordParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s)
    }
}

/// Reconstructs the exact source token.
impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        if let Some(quality) = &self.quality {
            write!(f, "{}", quality.token())?;
        }
        write!(f, "{}", self.extension)?;
        if let Some(sus) = &self.sus {
            write!(f, "sus{}", sus)?;
        }
        Ok(())
    }
}
