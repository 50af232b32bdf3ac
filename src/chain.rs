use serde::Serialize;
use std::collections::BTreeMap;
use crate::chord::Chord;

/// A first-order Markov chain of chord transitions.
///
/// Built in two phases: `accumulate` counts transitions, once per song,
/// and `normalize` turns each chord's outgoing counts into a probability
/// distribution. Normalize exactly once, after all songs are in, so
/// multi-song corpora merge without order sensitivity.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TransitionChain {
    chain: BTreeMap<String, BTreeMap<String, f64>>,
}

impl TransitionChain {
    pub fn new() -> TransitionChain {
        TransitionChain::default()
    }

    /// Count the transitions between consecutive chords.
    pub fn accumulate(&mut self, chords: &[Chord]) {
        for pair in chords.windows(2) {
            let src = pair[0].to_string();
            let dst = pair[1].to_string();
            let count = self.chain.entry(src).or_default()
                .entry(dst).or_insert(0.);
            *count += 1.;
        }
    }

    /// Divide each chord's outgoing counts by their total so they
    /// become probabilities. Only existing entries are touched, and
    /// every entry holds at least one count, so the total is never zero.
    pub fn normalize(&mut self) {
        for followers in self.chain.values_mut() {
            let total: f64 = followers.values().sum();
            for count in followers.values_mut() {
                *count /= total;
            }
        }
    }

    /// (source, destination, weight) triples in deterministic order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.chain.iter().flat_map(|(src, followers)| {
            followers.iter().map(move |(dst, weight)| (src.as_str(), dst.as_str(), *weight))
        })
    }

    pub fn weight(&self, src: &str, dst: &str) -> Option<f64> {
        self.chain.get(src).and_then(|followers| followers.get(dst)).copied()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.chain.keys().map(|k| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}
