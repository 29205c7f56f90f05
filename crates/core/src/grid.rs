use thiserror::Error;

/// Errors that can occur when building a [`TimeGrid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("time grid must contain at least one point")]
    Empty,

    #[error("time point {index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },

    #[error("time point {index} is negative: {value}")]
    Negative { index: usize, value: f64 },

    #[error("time point {index} ({value}) does not follow {previous}")]
    NotIncreasing {
        index: usize,
        previous: f64,
        value: f64,
    },
}

/// The ordered times, in days, at which a trajectory is sampled.
///
/// A grid is non-empty, finite, non-negative and strictly increasing. The
/// first point is the time at which the initial state applies.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
}

impl TimeGrid {
    /// Creates a grid from explicit time points.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if the points are empty, non-finite, negative,
    /// or not strictly increasing.
    pub fn new(points: impl Into<Vec<f64>>) -> Result<Self, GridError> {
        let points = points.into();

        if points.is_empty() {
            return Err(GridError::Empty);
        }

        for (index, &value) in points.iter().enumerate() {
            if !value.is_finite() {
                return Err(GridError::NonFinite { index, value });
            }
            if value < 0.0 {
                return Err(GridError::Negative { index, value });
            }
            if index > 0 && value <= points[index - 1] {
                return Err(GridError::NotIncreasing {
                    index,
                    previous: points[index - 1],
                    value,
                });
            }
        }

        Ok(Self { points })
    }

    /// Creates a daily grid `0, 1, ..., end - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Empty`] if `end` is zero.
    pub fn days(end: u32) -> Result<Self, GridError> {
        Self::new((0..end).map(f64::from).collect::<Vec<_>>())
    }

    /// Creates `count` evenly spaced points from `start` to `end` inclusive.
    ///
    /// A count of one yields `[start]`.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if `count` is zero or the resulting points are
    /// not a valid grid (for example when `end <= start`).
    #[allow(clippy::cast_precision_loss)]
    pub fn linspace(start: f64, end: f64, count: usize) -> Result<Self, GridError> {
        let points: Vec<f64> = match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (count - 1) as f64;
                (0..count).map(|i| start + step * i as f64).collect()
            }
        };

        Self::new(points)
    }

    /// Returns the time points.
    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Returns the first time point.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.points[0]
    }

    /// Returns the last time point.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Returns the number of time points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a grid holds at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn daily_grid_matches_arange() {
        let grid = TimeGrid::days(5).unwrap();

        assert_eq!(grid.points(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(grid.start(), 0.0);
        assert_relative_eq!(grid.end(), 4.0);
        assert_eq!(grid.len(), 5);
    }

    #[test]
    fn linspace_includes_both_ends() {
        let grid = TimeGrid::linspace(0.0, 1.0, 5).unwrap();

        assert_eq!(grid.points(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn linspace_with_single_point() {
        let grid = TimeGrid::linspace(3.0, 10.0, 1).unwrap();

        assert_eq!(grid.points(), &[3.0]);
    }

    #[test]
    fn errors_on_empty_grid() {
        assert_eq!(TimeGrid::days(0), Err(GridError::Empty));
        assert_eq!(TimeGrid::linspace(0.0, 1.0, 0), Err(GridError::Empty));
        assert_eq!(TimeGrid::new(Vec::<f64>::new()), Err(GridError::Empty));
    }

    #[test]
    fn errors_on_non_finite_point() {
        let result = TimeGrid::new(vec![0.0, f64::NAN]);

        assert!(matches!(result, Err(GridError::NonFinite { index: 1, .. })));
    }

    #[test]
    fn errors_on_negative_point() {
        let result = TimeGrid::new(vec![-1.0, 0.0]);

        assert!(matches!(result, Err(GridError::Negative { index: 0, .. })));
    }

    #[test]
    fn errors_on_repeated_or_decreasing_points() {
        let repeated = TimeGrid::new(vec![0.0, 1.0, 1.0]);
        assert!(matches!(
            repeated,
            Err(GridError::NotIncreasing { index: 2, .. })
        ));

        let reversed = TimeGrid::linspace(10.0, 0.0, 3);
        assert!(matches!(
            reversed,
            Err(GridError::NotIncreasing { index: 1, .. })
        ));
    }
}
