use crate::timing_profile::types::ProfileSample;
use rustc_hash::FxHashSet;

/// Streaming aggregate over a set of samples, used for the headline lines of
/// the console output.
#[derive(Clone, Debug, Default)]
pub struct ProfileSummary {
    num_samples: usize,
    task_names: FxHashSet<String>,
    total_events: u64,
    max_rate: f64,
}

impl ProfileSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, sample: &ProfileSample) {
        self.num_samples += 1;
        self.task_names.insert(sample.name().to_string());
        let total = sample
            .counts()
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(*c));
        self.total_events = self.total_events.saturating_add(total);
        let rate = total as f64 / sample.elapsed_secs();
        if rate > self.max_rate {
            self.max_rate = rate;
        }
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn num_tasks(&self) -> usize {
        self.task_names.len()
    }

    pub fn total_events(&self) -> u64 {
        self.total_events
    }

    pub fn max_rate(&self) -> f64 {
        self.max_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::buckets::BucketScheme;
    use crate::timing_profile::types::Phase;

    fn sample(name: &str, counts: Vec<u64>, elapsed: f64) -> ProfileSample {
        ProfileSample::new(
            name.to_string(),
            Phase::Run,
            BucketScheme::Logarithmic { base: 2 },
            1_000_000,
            elapsed,
            counts,
        )
        .unwrap()
    }

    #[test]
    fn aggregates_across_samples() {
        let mut summary = ProfileSummary::new();
        summary.add_sample(&sample("leds", vec![1, 2, 3], 2.0));
        summary.add_sample(&sample("leds", vec![4], 1.0));
        summary.add_sample(&sample("display", vec![0, 0], 5.0));

        assert_eq!(summary.num_samples(), 3);
        assert_eq!(summary.num_tasks(), 2);
        assert_eq!(summary.total_events(), 10);
        assert_eq!(summary.max_rate(), 4.0);
    }
}
