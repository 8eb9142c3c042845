//! Relative humidity as a validated fraction.

use std::fmt;

use lakeprep_core::DomainError;

/// Relative humidity as a fraction in `[0, 1]`.
///
/// Met stations usually report percent. Build from those values with
/// [`RelativeHumidity::from_percent`]; [`RelativeHumidity::from_fraction`]
/// rejects anything above 1, so an un-normalized percent cannot reach the
/// heat-flux formulas.
///
/// ```
/// use lakeprep_forcing::RelativeHumidity;
///
/// assert_eq!(RelativeHumidity::from_percent(50.0).unwrap().fraction(), 0.5);
/// assert!(RelativeHumidity::from_fraction(50.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct RelativeHumidity(f64);

impl RelativeHumidity {
    /// Saturated air.
    pub const SATURATED: Self = Self(1.0);

    /// From a percentage in `[0, 100]`.
    pub fn from_percent(percent: f64) -> Result<Self, DomainError> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(DomainError::OutOfRange {
                name: "relative humidity (percent)",
                value: percent,
                reason: "must lie in [0, 100]".into(),
            });
        }
        Ok(Self(percent / 100.0))
    }

    /// From a fraction in `[0, 1]`.
    pub fn from_fraction(fraction: f64) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(DomainError::OutOfRange {
                name: "relative humidity (fraction)",
                value: fraction,
                reason: "must lie in [0, 1]; divide percent values by 100".into(),
            });
        }
        Ok(Self(fraction))
    }

    /// Convert a column of percentages.
    pub fn from_percent_series(percent: &[f64]) -> Result<Vec<Self>, DomainError> {
        percent.iter().map(|&p| Self::from_percent(p)).collect()
    }

    /// The humidity as a fraction.
    pub fn fraction(self) -> f64 {
        self.0
    }
}

impl fmt::Display for RelativeHumidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}
