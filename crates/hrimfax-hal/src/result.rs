//! Measurement counts and execution results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Histogram of observed classical bitstrings.
///
/// Keys are big-endian bitstrings (`"00"`, `"11"`, ...); values are
/// occurrence counts across the shot total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` occurrences of `bitstring`, accumulating with any existing
    /// entry.
    pub fn insert(&mut self, bitstring: impl Into<String>, n: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += n;
    }

    /// Record a single observation of `bitstring`.
    pub fn record(&mut self, bitstring: impl Into<String>) {
        self.insert(bitstring, 1);
    }

    /// The count for one bitstring (0 if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes observed.
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }

    /// The most frequent outcome, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by_key(|(_, n)| **n)
            .map(|(s, n)| (s.as_str(), *n))
    }

    /// Outcomes sorted by descending count (ties broken by bitstring for
    /// deterministic output).
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The empirical probability of one bitstring.
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / total as f64
    }

    /// Iterate over (bitstring, count) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut counts = Counts::new();
        for (bitstring, n) in iter {
            counts.insert(bitstring, n);
        }
        counts
    }
}

/// The outcome of one dispatch call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement histogram.
    pub counts: Counts,
    /// Shots requested for this execution.
    pub shots: u32,
    /// Wall-clock execution time, if the backend reports it.
    pub execution_time_ms: Option<u64>,
    /// Backend-specific metadata.
    pub metadata: Option<serde_json::Value>,
}

impl ExecutionResult {
    /// Create a result from counts and the requested shot total.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
            metadata: None,
        }
    }

    /// Attach the execution time in milliseconds.
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Attach backend metadata.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
