//! Field data for one timestep.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which data source drives vertex coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataMode {
    /// Raw cell-centered values.
    Cell,
    /// Values interpolated onto mesh points.
    #[default]
    Point,
}

/// Decoded values for one field at one timestep.
///
/// `cell_values` holds one scalar per cell (vector fields are reduced to
/// per-cell Euclidean magnitude at decode time and never carried as raw
/// vectors). `point_values` is filled by the interpolator after a
/// successful load.
///
/// Rebuilt wholesale whenever the selected timestep or field changes;
/// never mutated in place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldData {
    /// Field name (e.g. `p`, `U`).
    pub name: String,
    /// Header class (e.g. `volScalarField`).
    pub class: String,
    /// One value per cell.
    pub cell_values: Vec<f64>,
    /// One value per mesh point, when interpolated.
    pub point_values: Option<Vec<f64>>,
}

impl FieldData {
    /// The values for the given data mode.
    ///
    /// Returns `None` in [`DataMode::Point`] when interpolation has not
    /// run.
    #[must_use]
    pub fn values(&self, mode: DataMode) -> Option<&[f64]> {
        match mode {
            DataMode::Cell => Some(&self.cell_values),
            DataMode::Point => self.point_values.as_deref(),
        }
    }

    /// Minimum and maximum over the values for the given mode.
    ///
    /// Returns `None` when the selected source is absent or empty.
    #[must_use]
    pub fn value_range(&self, mode: DataMode) -> Option<(f64, f64)> {
        let values = self.values(mode)?;
        let mut iter = values.iter().copied().filter(|v| v.is_finite());
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some((min, max))
    }
}
