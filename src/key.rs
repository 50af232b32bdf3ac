use thiserror::Error;
use std::collections::HashMap;
use crate::chord::Chord;

/// The 24 major/minor keys in circle-of-fifths order, which is also
/// the canonical iteration order for vote tallies and tie-breaking.
/// "Gb" is folded into "F#"; no other enharmonic aliasing is applied.
pub const KEYS: [&str; 24] = [
    "C", "Am", "G", "Em", "D", "Bm", "A", "F#m", "E", "C#m", "B", "G#m",
    "F#", "Ebm", "Db", "Bbm", "Ab", "Fm", "Eb", "Cm", "Bb", "Gm", "F", "Dm",
];

fn normalize(key: &str) -> &str {
    if key == "Gb" { "F#" } else { key }
}

/// The key one step counter-clockwise on the circle of fifths,
/// i.e. the key a dominant chord of `key`'s root resolves to.
/// Panics if `key` is not one of the 24 canonical keys.
pub fn counter_clockwise(key: &str) -> &'static str {
    match normalize(key) {
        "C" => "F",
        "Am" => "Dm",
        "G" => "C",
        "Em" => "Am",
        "D" => "G",
        "Bm" => "Em",
        "A" => "D",
        "F#m" => "Bm",
        "E" => "A",
        "C#m" => "F#m",
        "B" => "E",
        "G#m" => "C#m",
        "F#" => "B",
        "Ebm" => "G#m",
        "Db" => "F#",
        "Bbm" => "Ebm",
        "Ab" => "Db",
        "Fm" => "Bbm",
        "Eb" => "Ab",
        "Cm" => "Fm",
        "Bb" => "Eb",
        "Gm" => "Cm",
        "F" => "Bb",
        "Dm" => "Gm",
        other => panic!("`{}` is not on the circle of fifths", other),
    }
}

/// The supporting chords for a key: the key itself, its relative,
/// and the two adjacent positions on the circle of fifths.
/// Panics if `key` is not one of the 24 canonical keys.
pub fn supporting_chords(key: &str) -> &'static [&'static str] {
    match normalize(key) {
        "C" | "Am" => &["F", "Dm", "C", "Am", "G", "Em"],
        "G" | "Em" => &["C", "Am", "G", "Em", "D", "Bm"],
        "D" | "Bm" => &["G", "Em", "D", "Bm", "A", "F#m"],
        "A" | "F#m" => &["D", "Bm", "A", "F#m", "E", "C#m"],
        "E" | "C#m" => &["A", "F#m", "E", "C#m", "B", "G#m"],
        "B" | "G#m" => &["E", "C#m", "B", "G#m", "F#", "Ebm"],
        "F#" | "Ebm" => &["B", "G#m", "F#", "Ebm", "Db", "Bbm"],
        "Db" | "Bbm" => &["F#", "Ebm", "Db", "Bbm", "Ab", "Fm"],
        "Ab" | "Fm" => &["Db", "Bbm", "Ab", "Fm", "Eb", "Cm"],
        "Eb" | "Cm" => &["Ab", "Fm", "Eb", "Cm", "Bb", "Gm"],
        "Bb" | "Gm" => &["Eb", "Cm", "Bb", "Gm", "F", "Dm"],
        "F" | "Dm" => &["Bb", "Gm", "F", "Dm", "C", "Am"],
        other => panic!("`{}` is not on the circle of fifths", other),
    }
}

/// Vote counts for each of the 24 canonical keys,
/// tallied and discarded per inference run.
#[derive(Debug, Clone, Default)]
pub struct VoteTable {
    counts: [u32; 24],
}

impl VoteTable {
    pub fn new() -> VoteTable {
        VoteTable::default()
    }

    /// Cast one vote. A label outside the 24 canonical keys means the
    /// circle-of-fifths tables or the parser are broken, so panic.
    pub fn cast(&mut self, key: &str) {
        let key = normalize(key);
        let idx = KEYS.iter().position(|&k| k == key)
            .unwrap_or_else(|| panic!("vote cast for unknown key `{}`", key));
        self.counts[idx] += 1;
    }

    pub fn get(&self, key: &str) -> u32 {
        let key = normalize(key);
        KEYS.iter().position(|&k| k == key)
            .map(|idx| self.counts[idx])
            .unwrap_or(0)
    }

    /// Tallies in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        KEYS.iter().zip(self.counts.iter()).map(|(&k, &n)| (k, n))
    }

    /// The key with the most votes; ties go to the
    /// earliest key in canonical order.
    pub fn winner(&self) -> &'static str {
        let mut best = KEYS[0];
        let mut most = self.counts[0];
        for (key, count) in self.iter().skip(1) {
            if count > most {
                best = key;
                most = count;
            }
        }
        best
    }
}

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("No valid chords to infer a key from")]
    EmptySequence,
}

#[derive(Debug, Clone)]
pub struct KeyEstimate {
    pub key: &'static str,
    pub votes: VoteTable,
}

/// Infer the key of a chord progression by weighted voting:
/// the first and last stripped chords (+1 each, +1 more if they match),
/// each dominant seventh (+1 for the key it resolves to), and each
/// dissonant-to-consonant resolution (+1 for the consonant chord).
pub fn infer_key(chords: &[Chord]) -> Result<KeyEstimate, KeyError> {
    if chords.is_empty() {
        return Err(KeyError::EmptySequence);
    }

    let mut votes = VoteTable::new();
    let mut stripped = vec![];
    let mut histogram: HashMap<String, u32> = HashMap::new();
    let mut prev: Option<&Chord> = None;

    for chord in chords {
        if let Some(label) = chord.stripped() {
            *histogram.entry(label.clone()).or_insert(0) += 1;
            stripped.push(label);
        }

        // A dominant seventh suggests the key it resolves to
        if chord.is_dominant_seventh() {
            votes.cast(counter_clockwise(&chord.root));
        }

        // A dissonant chord resolving to a bare major chord
        // suggests that chord is the tonic
        if let Some(prev) = prev {
            if prev.is_dissonant() && chord.is_consonant() {
                votes.cast(&chord.to_string());
            }
        }

        prev = Some(chord);
    }

    if let (Some(first), Some(last)) = (stripped.first(), stripped.last()) {
        votes.cast(first);
        votes.cast(last);
        if first == last {
            votes.cast(first);
        }
    }

    let mut tally: Vec<_> = histogram.into_iter().collect();
    tally.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    tracing::debug!("chord histogram: {:?}", tally);

    Ok(KeyEstimate {
        key: votes.winner(),
        votes,
    })
}
