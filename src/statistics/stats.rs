use crate::timing_profile::types::{ProfileError, ProfileSample};

/// Derived statistics for one histogram. Everything is computed once from the
/// counts and read-only afterwards.
///
/// `survival` is edge-aligned: `survival[k]` is the number of observations
/// whose duration was at least edge `k`, so `survival[0]` is the total and
/// the final entry is always zero. An all-zero histogram (a task that never
/// ran) is valid and yields a zero rate and an all-zero density.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeStats {
    total_count: u64,
    rate_per_second: f64,
    survival: Vec<u64>,
    density: Vec<f64>,
}

impl CumulativeStats {
    pub fn new(counts: &[u64], elapsed_secs: f64) -> Result<Self, ProfileError> {
        if counts.is_empty() {
            return Err(ProfileError::EmptyHistogram);
        }
        if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
            return Err(ProfileError::MalformedRecord(
                "statistics need a positive accumulation duration".to_string(),
            ));
        }
        let total_count = counts.iter().fold(0u64, |acc, c| acc.saturating_add(*c));

        let mut survival = Vec::with_capacity(counts.len() + 1);
        let mut remaining = total_count;
        survival.push(remaining);
        for count in counts {
            remaining = remaining.saturating_sub(*count);
            survival.push(remaining);
        }

        let density = if total_count > 0 {
            counts
                .iter()
                .map(|c| *c as f64 / total_count as f64)
                .collect()
        } else {
            vec![0.0; counts.len()]
        };

        Ok(Self {
            total_count,
            rate_per_second: total_count as f64 / elapsed_secs,
            survival,
            density,
        })
    }

    pub fn from_sample(sample: &ProfileSample) -> Result<Self, ProfileError> {
        Self::new(sample.counts(), sample.elapsed_secs())
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Events observed per second of accumulated wall-clock time.
    pub fn rate_per_second(&self) -> f64 {
        self.rate_per_second
    }

    /// Count of observations with duration at least edge `k`, for every edge.
    /// Non-increasing by construction.
    pub fn survival(&self) -> &[u64] {
        &self.survival
    }

    /// Per-bucket counts normalized to sum to one, or all zero for an empty
    /// measurement.
    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Survival normalized by the total count: the probability of an
    /// observation being slower than each edge.
    pub fn survival_probabilities(&self) -> Vec<f64> {
        if self.total_count == 0 {
            return vec![0.0; self.survival.len()];
        }
        self.survival
            .iter()
            .map(|s| *s as f64 / self.total_count as f64)
            .collect()
    }
}
