use crate::statistics::series::{density_series, survival_series, StepSeries};
use crate::timing_profile::types::{Phase, ProfileError, ProfileSample, TimingProfile};

/// Plot-ready output for one phase of one task: the headline rate plus the
/// survival-probability and density step curves. Axis scaling, labels and
/// layout are the renderer's problem, not ours.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseReport {
    pub phase: Phase,
    pub rate_per_second: f64,
    pub total_count: u64,
    pub survival: StepSeries,
    pub density: StepSeries,
}

impl PhaseReport {
    pub fn from_sample(sample: &ProfileSample) -> Result<Self, ProfileError> {
        let edges = sample.edge_set()?;
        let stats = sample.stats()?;
        Ok(Self {
            phase: sample.phase(),
            rate_per_second: stats.rate_per_second(),
            total_count: stats.total_count(),
            survival: survival_series(&stats, &edges)?,
            density: density_series(&stats, &edges)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub name: String,
    pub run: Option<PhaseReport>,
    pub wait: Option<PhaseReport>,
}

impl TaskReport {
    pub fn phases(&self) -> impl Iterator<Item = &PhaseReport> {
        self.run.iter().chain(self.wait.iter())
    }
}

/// Runs the whole transform over a grouped profile. Task order follows the
/// profile's deterministic ordering.
pub fn report(profile: &TimingProfile) -> Result<Vec<TaskReport>, ProfileError> {
    profile
        .tasks()
        .map(|task| {
            Ok(TaskReport {
                name: task.name().to_string(),
                run: task.run.as_ref().map(PhaseReport::from_sample).transpose()?,
                wait: task.wait.as_ref().map(PhaseReport::from_sample).transpose()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::buckets::BucketScheme;

    fn sample(name: &str, phase: Phase, scheme: BucketScheme, counts: Vec<u64>) -> ProfileSample {
        ProfileSample::new(name.to_string(), phase, scheme, 1_000_000, 2.0, counts).unwrap()
    }

    #[test]
    fn report_covers_every_phase_present() {
        let profile = TimingProfile::from_samples(vec![
            sample(
                "leds",
                Phase::Run,
                BucketScheme::Logarithmic { base: 2 },
                vec![0, 1, 2, 1],
            ),
            sample(
                "leds",
                Phase::Wait,
                BucketScheme::Linear { step: 5000.0 },
                vec![8, 2, 0],
            ),
            sample(
                "display",
                Phase::Run,
                BucketScheme::Logarithmic { base: 2 },
                vec![5, 5],
            ),
        ])
        .unwrap();

        let reports = report(&profile).unwrap();
        let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["display", "leds"]);

        let leds = &reports[1];
        let run = leds.run.as_ref().unwrap();
        assert_eq!(run.total_count, 4);
        assert_eq!(run.rate_per_second, 2.0);
        assert_eq!(run.survival.len(), 2 * (4 - 1));

        let wait = leds.wait.as_ref().unwrap();
        assert_eq!(wait.total_count, 10);
        assert_eq!(wait.survival.len(), 2 * 3);
        assert_eq!(wait.survival.points()[0], (0.0, 1.0));

        assert!(reports[0].wait.is_none());
        assert_eq!(reports[0].phases().count(), 1);
    }
}
