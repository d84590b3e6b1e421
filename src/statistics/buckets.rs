use crate::timing_profile::types::ProfileError;
use std::fmt;

/// The indexing law of a histogram. The equivalent choice in the producer is
/// which profiler subclass a task was instrumented with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum BucketKind {
    /// Bucket widths grow geometrically: fine resolution near zero, coarse
    /// resolution for rare long outliers, within a fixed memory budget.
    Logarithmic,
    /// Uniform bucket width.
    Linear,
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logarithmic => write!(f, "logarithmic"),
            Self::Linear => write!(f, "linear"),
        }
    }
}

/// A bucket indexing law together with the parameters it needs. Each variant
/// carries only its own parameter so an irrelevant field can never be read.
///
/// Bucket `i` covers the right-open interval from `edge[i]` to `edge[i + 1]`;
/// a duration landing exactly on a boundary belongs to the lower bucket.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BucketScheme {
    /// Bucket `i` spans `[base^i, base^(i+1))` ticks, with bucket 0 treated
    /// as covering everything below one tick as well.
    Logarithmic { base: u64 },
    /// Bucket `i` spans `[i * step, (i + 1) * step)` ticks.
    Linear { step: f64 },
}

impl BucketScheme {
    pub fn kind(&self) -> BucketKind {
        match self {
            Self::Logarithmic { .. } => BucketKind::Logarithmic,
            Self::Linear { .. } => BucketKind::Linear,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ProfileError> {
        match self {
            Self::Logarithmic { base } if *base < 2 => Err(ProfileError::InvalidScheme(format!(
                "logarithmic base must be at least 2, got {}",
                base
            ))),
            Self::Linear { step } if !step.is_finite() || *step <= 0.0 => {
                Err(ProfileError::InvalidScheme(format!(
                    "linear step must be positive, got {}",
                    step
                )))
            }
            _ => Ok(()),
        }
    }

    /// Resolves the scheme into `bucket_count + 1` strictly increasing time
    /// edges in seconds. Pure and deterministic.
    pub fn resolve(&self, clock_hz: u64, bucket_count: usize) -> Result<BucketEdgeSet, ProfileError> {
        self.validate()?;
        if clock_hz == 0 {
            return Err(ProfileError::InvalidScheme(
                "clock frequency must be positive".to_string(),
            ));
        }
        if bucket_count == 0 {
            return Err(ProfileError::EmptyHistogram);
        }
        let cycle_time = 1.0 / clock_hz as f64;
        let edges = match self {
            Self::Logarithmic { base } => (0..=bucket_count)
                .map(|i| (*base as f64).powi(i as i32) * cycle_time)
                .collect(),
            Self::Linear { step } => (0..=bucket_count)
                .map(|i| i as f64 * step * cycle_time)
                .collect(),
        };
        Ok(BucketEdgeSet {
            kind: self.kind(),
            edges,
        })
    }
}

/// Concrete time edges for one histogram, derived from its scheme and never
/// persisted. `edges[i]` is the left boundary of bucket `i` in seconds; the
/// final entry closes the last bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketEdgeSet {
    kind: BucketKind,
    edges: Vec<f64>,
}

impl BucketEdgeSet {
    pub fn kind(&self) -> BucketKind {
        self.kind
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn bucket_count(&self) -> usize {
        self.edges.len() - 1
    }
}
