//! Grid-convergence study.
//!
//! The march is repeated on a ladder of grids where every rung doubles the angular samples and
//! quadruples the time samples. The scheme is second order in θ and first order in t, so the
//! 2×/4× ratio shrinks both truncation errors by the same factor and the spread between rungs
//! measures the spatial error.
//!
//! Target points are snapped to the nearest sample on each rung separately, so the physical point
//! being compared may move slightly from one rung to the next.

use crate::{
    driver::SimError,
    problem::Parameters,
    solution::{Solution, Trace},
    solve, Float,
};

pub const DEFAULT_TARGET_TIME: Float = 74.9;
pub const DEFAULT_TARGET_ANGLE: Float = 0.38;

/// Sequence of `(angular samples, time samples)` pairs: starts at `(I₀, K₀)` and keeps refining
/// while the angular count is below `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refinement {
    next: Option<(usize, usize)>,
    limit: usize,
}

impl Refinement {
    pub const ANGULAR_RATIO: usize = 2;
    pub const TIME_RATIO: usize = 4;

    pub fn new(angular_samples: usize, time_samples: usize, limit: usize) -> Self {
        Self {
            next: Some((angular_samples, time_samples)),
            limit,
        }
    }
}

impl Default for Refinement {
    fn default() -> Self {
        Self::new(6, 6, 32)
    }
}

impl Iterator for Refinement {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current.0 < self.limit {
            current
                .0
                .checked_mul(Self::ANGULAR_RATIO)
                .zip(current.1.checked_mul(Self::TIME_RATIO))
        } else {
            None
        };
        Some(current)
    }
}

fn label(angular_samples: usize, time_samples: usize) -> String {
    format!("I={angular_samples}, K={time_samples}")
}

fn study(
    params: Parameters,
    refinement: Refinement,
    extract: impl Fn(&Solution) -> Result<Trace, SimError>,
) -> Result<Vec<Trace>, SimError> {
    refinement
        .map(|(angular_samples, time_samples)| {
            // the field is dropped as soon as its trace is out
            let solution = solve(params, angular_samples, time_samples)?;
            let mut trace = extract(&solution)?;
            tracing::debug!(
                angular_samples,
                time_samples,
                index = trace.index,
                coordinate = trace.coordinate,
                "convergence rung done"
            );
            trace.label = label(angular_samples, time_samples);
            Ok(trace)
        })
        .collect()
}

/// Angular profiles at the layer nearest `target_time`, one per rung of [`Refinement::default`].
pub fn convergence_by_time(params: Parameters, target_time: Float) -> Result<Vec<Trace>, SimError> {
    convergence_by_time_with(params, Refinement::default(), target_time)
}

pub fn convergence_by_time_with(
    params: Parameters,
    refinement: Refinement,
    target_time: Float,
) -> Result<Vec<Trace>, SimError> {
    tracing::info!(%params, target_time, "convergence study at fixed time");
    study(params, refinement, |u| {
        let k = u.nearest_layer(target_time)?;
        Ok(u.profile_trace(k, String::new()))
    })
}

/// Time series at the angular sample nearest `target_angle`, one per rung of
/// [`Refinement::default`].
pub fn convergence_by_angle(
    params: Parameters,
    target_angle: Float,
) -> Result<Vec<Trace>, SimError> {
    convergence_by_angle_with(params, Refinement::default(), target_angle)
}

pub fn convergence_by_angle_with(
    params: Parameters,
    refinement: Refinement,
    target_angle: Float,
) -> Result<Vec<Trace>, SimError> {
    tracing::info!(%params, target_angle, "convergence study at fixed angle");
    study(params, refinement, |u| {
        let i = u.nearest_angle(target_angle)?;
        Ok(u.time_trace(i, String::new()))
    })
}

/// Largest pointwise gap between each pair of neighbouring traces, measured on the coarser one.
///
/// Refined grids contain the coarse samples (`θ_i` coarse is `θ_2i` fine, `t_k` coarse is `t_4k`
/// fine), so no interpolation is involved. Traces whose lengths are not an integer multiple of
/// each other are rejected.
pub fn successive_differences(traces: &[Trace]) -> Result<Vec<Float>, SimError> {
    traces
        .windows(2)
        .map(|pair| {
            let (coarse, fine) = (&pair[0].values, &pair[1].values);
            if coarse.is_empty() || fine.len() % coarse.len() != 0 {
                return Err(SimError::invalid("trace length", fine.len() as Float));
            }
            let ratio = fine.len() / coarse.len();
            Ok(coarse
                .iter()
                .enumerate()
                .map(|(j, &x)| (x - fine[j * ratio]).abs())
                .fold(0.0, Float::max))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ladder() {
        let rungs: Vec<_> = Refinement::default().collect();
        assert_eq!(rungs, vec![(6, 6), (12, 24), (24, 96), (48, 384)]);
    }

    #[test]
    fn ladder_stops_at_limit() {
        assert_eq!(Refinement::new(40, 10, 32).collect::<Vec<_>>(), vec![(40, 10)]);
        assert_eq!(Refinement::new(6, 6, 64).count(), 5);
        assert_eq!(Refinement::new(usize::MAX / 2 + 1, 1, usize::MAX).count(), 1);
    }

    #[test]
    fn labels_name_the_resolution() {
        let traces =
            convergence_by_time_with(Parameters::default(), Refinement::new(6, 6, 12), 74.9)
                .unwrap();
        let labels: Vec<_> = traces.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["I=6, K=6", "I=12, K=24"]);
        // 74.9 / (100 / 6) rounds to layer 4, 74.9 / (100 / 24) to layer 18
        assert_eq!(traces[0].index, 4);
        assert_eq!(traces[1].index, 18);
    }

    #[test]
    fn differences_compare_nested_samples() {
        let trace = |values: Vec<Float>| Trace {
            label: String::new(),
            index: 0,
            coordinate: 0.0,
            abscissa: vec![0.0; values.len()],
            values,
        };
        let traces = [
            trace(vec![1.0, 2.0]),
            trace(vec![1.5, 9.0, 2.0, 9.0]),
            trace(vec![1.5, 0.0, 9.0, 0.0, 2.25, 0.0, 9.0, 0.0]),
        ];
        assert_eq!(successive_differences(&traces).unwrap(), vec![0.5, 0.25]);

        assert!(successive_differences(&[trace(vec![1.0; 3]), trace(vec![1.0; 4])]).is_err());
        assert!(successive_differences(&traces[..1]).unwrap().is_empty());
    }
}
