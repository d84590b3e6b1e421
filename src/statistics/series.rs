use crate::statistics::buckets::{BucketEdgeSet, BucketKind};
use crate::statistics::stats::CumulativeStats;
use crate::timing_profile::types::ProfileError;

/// A piecewise-constant coordinate sequence: each plotted bucket contributes
/// its left and right edge at the bucket's value, so consecutive buckets
/// render as flat horizontal segments instead of interpolated slopes. The x
/// values never decrease, which downstream log-log rendering relies on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepSeries {
    points: Vec<(f64, f64)>,
}

impl StepSeries {
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(x, _)| *x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, y)| *y)
    }
}

/// Expands one bucket-aligned value per bucket into a plottable step series.
///
/// Logarithmic histograms plot buckets `0..n-1`: the producer clamps every
/// overlong measurement into the final bucket, which therefore has no finite
/// right edge, and a zero x is unrepresentable on a log axis anyway. Linear
/// histograms plot all `n` buckets starting from the `(0, values[0])` anchor.
pub fn step_series(edges: &BucketEdgeSet, values: &[f64]) -> Result<StepSeries, ProfileError> {
    if values.is_empty() {
        return Err(ProfileError::EmptyHistogram);
    }
    if values.len() != edges.bucket_count() {
        return Err(ProfileError::MalformedRecord(format!(
            "expected {} bucket values, got {}",
            edges.bucket_count(),
            values.len()
        )));
    }
    let plotted = match edges.kind() {
        BucketKind::Logarithmic => values.len() - 1,
        BucketKind::Linear => values.len(),
    };
    let edges = edges.edges();
    let mut points = Vec::with_capacity(2 * plotted);
    for (n, value) in values.iter().take(plotted).enumerate() {
        points.push((edges[n], *value));
        points.push((edges[n + 1], *value));
    }
    Ok(StepSeries { points })
}

/// The "probability of being slower than x" curve for one histogram.
pub fn survival_series(
    stats: &CumulativeStats,
    edges: &BucketEdgeSet,
) -> Result<StepSeries, ProfileError> {
    let probabilities = stats.survival_probabilities();
    // drop the trailing zero entry so values align one per bucket
    step_series(edges, &probabilities[..probabilities.len() - 1])
}

/// The normalized histogram curve for one histogram.
pub fn density_series(
    stats: &CumulativeStats,
    edges: &BucketEdgeSet,
) -> Result<StepSeries, ProfileError> {
    step_series(edges, stats.density())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::buckets::BucketScheme;

    fn log_edges(buckets: usize) -> BucketEdgeSet {
        BucketScheme::Logarithmic { base: 2 }
            .resolve(1_000_000, buckets)
            .unwrap()
    }

    fn lin_edges(buckets: usize) -> BucketEdgeSet {
        BucketScheme::Linear { step: 5000.0 }
            .resolve(1_000_000, buckets)
            .unwrap()
    }

    #[test]
    fn log_series_drops_the_overflow_bucket() {
        let series = step_series(&log_edges(4), &[4.0, 4.0, 3.0, 1.0]).unwrap();
        assert_eq!(series.len(), 2 * (4 - 1));
        let expected = [
            (1e-6, 4.0),
            (2e-6, 4.0),
            (2e-6, 4.0),
            (4e-6, 4.0),
            (4e-6, 3.0),
            (8e-6, 3.0),
        ];
        for (point, expected) in series.points().iter().zip(expected.iter()) {
            assert!((point.0 - expected.0).abs() < 1e-15);
            assert!((point.1 - expected.1).abs() < 1e-15);
        }
    }

    #[test]
    fn linear_series_starts_at_the_zero_anchor() {
        let series = step_series(&lin_edges(3), &[0.5, 0.3, 0.2]).unwrap();
        assert_eq!(series.len(), 2 * 3);
        assert_eq!(series.points()[0], (0.0, 0.5));
        // every bucket appears as a flat segment
        assert_eq!(series.points()[1].1, 0.5);
        assert_eq!(series.points()[2].1, 0.3);
        assert_eq!(series.points()[5].1, 0.2);
    }

    #[test]
    fn x_never_decreases() {
        let series = step_series(&log_edges(6), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let xs: Vec<f64> = series.xs().collect();
        for pair in xs.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn log_x_values_stay_positive() {
        let series = step_series(&log_edges(4), &[1.0, 1.0, 1.0, 1.0]).unwrap();
        assert!(series.xs().all(|x| x > 0.0));
    }

    #[test]
    fn empty_values_are_rejected() {
        let res = step_series(&log_edges(3), &[]);
        assert!(matches!(res, Err(ProfileError::EmptyHistogram)));
    }

    #[test]
    fn value_count_must_match_bucket_count() {
        let res = step_series(&log_edges(3), &[1.0, 2.0]);
        assert!(matches!(res, Err(ProfileError::MalformedRecord(_))));
    }

    #[test]
    fn survival_and_density_series_line_up() {
        let stats = CumulativeStats::new(&[0, 1, 2, 1], 1.0).unwrap();
        let edges = log_edges(4);
        let survival = survival_series(&stats, &edges).unwrap();
        let density = density_series(&stats, &edges).unwrap();
        assert_eq!(survival.len(), density.len());
        // survival starts at probability one for a non-empty histogram
        assert_eq!(survival.points()[0], (1e-6, 1.0));
    }
}
