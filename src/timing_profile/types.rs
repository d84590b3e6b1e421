use crate::statistics::buckets::{BucketEdgeSet, BucketScheme};
use crate::statistics::stats::CumulativeStats;
use indexmap::IndexMap;
use rustc_hash::FxHasher;
use std::fmt;
use std::hash::BuildHasherDefault;
use thiserror::Error;
use tracing::debug;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

#[derive(Debug, Error)]
pub enum ProfileError {
    /// Scheme parameters that cannot resolve into bucket edges.
    #[error("invalid bucket scheme: {0}")]
    InvalidScheme(String),
    #[error("histogram contains no buckets")]
    EmptyHistogram,
    /// Two samples claimed the same (task, phase) slot. Overwriting would
    /// silently discard measurements so this is always an error.
    #[error("duplicate '{phase}' sample for task '{name}'")]
    DuplicatePhase { name: String, phase: Phase },
    #[error("malformed profile record: {0}")]
    MalformedRecord(String),
    #[error("profile is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What the producer's timer measured: time spent running the task body, or
/// time the task sat waiting to be scheduled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub enum Phase {
    Run,
    Wait,
}

impl Phase {
    pub(crate) fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "run" => Some(Phase::Run),
            "wait" => Some(Phase::Wait),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run => write!(f, "run"),
            Self::Wait => write!(f, "wait"),
        }
    }
}

/// One histogram for one (task, phase) pair, validated at construction and
/// immutable afterwards. Bucket index order follows the producer's emission
/// order and is semantically meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSample {
    pub(crate) name: String,
    pub(crate) phase: Phase,
    pub(crate) scheme: BucketScheme,
    pub(crate) clock_hz: u64,
    pub(crate) elapsed_secs: f64,
    pub(crate) counts: Vec<u64>,
}

impl ProfileSample {
    pub fn new(
        name: String,
        phase: Phase,
        scheme: BucketScheme,
        clock_hz: u64,
        elapsed_secs: f64,
        counts: Vec<u64>,
    ) -> Result<Self, ProfileError> {
        if counts.is_empty() {
            return Err(ProfileError::EmptyHistogram);
        }
        scheme.validate()?;
        if clock_hz == 0 {
            return Err(ProfileError::InvalidScheme(
                "clock frequency must be positive".to_string(),
            ));
        }
        if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
            return Err(ProfileError::MalformedRecord(format!(
                "task '{}' accumulated over a non-positive duration",
                name
            )));
        }
        Ok(Self {
            name,
            phase,
            scheme,
            clock_hz,
            elapsed_secs,
            counts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scheme(&self) -> BucketScheme {
        self.scheme
    }

    pub fn clock_hz(&self) -> u64 {
        self.clock_hz
    }

    /// Duration of one counter tick in seconds.
    pub fn cycle_time(&self) -> f64 {
        1.0 / self.clock_hz as f64
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn bucket_count(&self) -> usize {
        self.counts.len()
    }

    /// Resolves this sample's bucket scheme into concrete time edges.
    pub fn edge_set(&self) -> Result<BucketEdgeSet, ProfileError> {
        self.scheme.resolve(self.clock_hz, self.counts.len())
    }

    pub fn stats(&self) -> Result<CumulativeStats, ProfileError> {
        CumulativeStats::from_sample(self)
    }
}

/// The run and wait histograms recorded for one task. Either slot may be
/// absent when the producer only instrumented one phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskProfile {
    pub(crate) name: String,
    pub run: Option<ProfileSample>,
    pub wait: Option<ProfileSample>,
}

impl TaskProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self, phase: Phase) -> Option<&ProfileSample> {
        match phase {
            Phase::Run => self.run.as_ref(),
            Phase::Wait => self.wait.as_ref(),
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = &ProfileSample> {
        self.run.iter().chain(self.wait.iter())
    }

    fn insert(&mut self, sample: ProfileSample) -> Result<(), ProfileError> {
        let slot = match sample.phase {
            Phase::Run => &mut self.run,
            Phase::Wait => &mut self.wait,
        };
        if slot.is_some() {
            return Err(ProfileError::DuplicatePhase {
                name: sample.name,
                phase: sample.phase,
            });
        }
        *slot = Some(sample);
        Ok(())
    }
}

/// A full parsed profile: every sample grouped under its task, tasks ordered
/// case-insensitively by name so traversal (and any rendering layout built on
/// it) is reproducible across runs.
#[derive(Debug, Clone, Default)]
pub struct TimingProfile {
    pub(crate) tasks: FxIndexMap<String, TaskProfile>,
}

impl TimingProfile {
    pub fn from_samples(
        samples: impl IntoIterator<Item = ProfileSample>,
    ) -> Result<Self, ProfileError> {
        let mut tasks = FxIndexMap::default();
        for sample in samples {
            let task = tasks
                .entry(sample.name.clone())
                .or_insert_with(|| TaskProfile {
                    name: sample.name.clone(),
                    ..Default::default()
                });
            task.insert(sample)?;
        }
        tasks.sort_by(|a, _, b, _| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        debug!("Grouped profile into {} tasks", tasks.len());
        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> impl Iterator<Item = &TaskProfile> {
        self.tasks.values()
    }

    pub fn samples(&self) -> impl Iterator<Item = &ProfileSample> {
        self.tasks.values().flat_map(|task| task.samples())
    }

    pub fn get_task(&self, name: &str) -> Option<&TaskProfile> {
        self.tasks.get(name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
