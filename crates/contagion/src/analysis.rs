//! Summaries of an infected curve sampled on a time grid.

#![warn(missing_docs)]

/// The largest value of a sampled curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Index of the grid point.
    pub index: usize,
    /// Time of the peak, in days.
    pub time: f64,
    /// Value at the peak.
    pub value: f64,
}

/// Whether an interior extremum is a trough or a crest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtremumKind {
    /// The curve falls into the point and rises out of it.
    Minimum,
    /// The curve rises into the point and falls out of it.
    Maximum,
}

/// A local extremum of a sampled curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    /// Trough or crest.
    pub kind: ExtremumKind,
    /// Index of the grid point.
    pub index: usize,
    /// Time of the extremum, in days.
    pub time: f64,
    /// Value at the extremum.
    pub value: f64,
}

/// Returns the first global maximum of `values`, or `None` if empty.
///
/// `times` and `values` are paired by index; extra entries in either are
/// ignored.
#[must_use]
pub fn peak(times: &[f64], values: &[f64]) -> Option<Peak> {
    times
        .iter()
        .zip(values)
        .enumerate()
        .fold(None, |best: Option<Peak>, (index, (&time, &value))| match best {
            Some(best) if best.value >= value => Some(best),
            _ => Some(Peak { index, time, value }),
        })
}

/// Returns the interior local extrema of `values`, in time order.
///
/// A point is a maximum when the nearest differing values on both sides are
/// smaller, and a minimum when both are larger. A flat stretch counts as one
/// extremum, reported at its first point, so a plateau on the way up or down
/// is not an extremum. The end points are never reported.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn extrema(times: &[f64], values: &[f64]) -> Vec<Extremum> {
    let len = times.len().min(values.len());
    let values = &values[..len];
    let mut found = Vec::new();

    for index in 1..len.saturating_sub(1) {
        let (before, value) = (values[index - 1], values[index]);
        if before == value {
            continue;
        }

        // A stretch that stays flat to the last sample has no far side.
        let Some(&after) = values[index + 1..].iter().find(|&&v| v != value) else {
            break;
        };

        let kind = if before < value && after < value {
            ExtremumKind::Maximum
        } else if before > value && after > value {
            ExtremumKind::Minimum
        } else {
            continue;
        };

        found.push(Extremum {
            kind,
            index,
            time: times[index],
            value,
        });
    }

    found
}
