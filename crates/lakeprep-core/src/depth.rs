//! Basin depth newtype.

use std::fmt;

use crate::error::DomainError;

/// Total vertical extent of the water column in meters, positive down.
///
/// Construction rejects zero, negative, and non-finite depths, so every
/// grid builder can rely on `value() > 0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct BasinDepth(f64);

impl BasinDepth {
    /// Create a basin depth, failing on non-positive or non-finite input.
    pub fn new(meters: f64) -> Result<Self, DomainError> {
        if !meters.is_finite() || meters <= 0.0 {
            return Err(DomainError::NonPositive {
                name: "basin depth",
                value: meters,
            });
        }
        Ok(Self(meters))
    }

    /// Depth in meters.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for BasinDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m", self.0)
    }
}

impl TryFrom<f64> for BasinDepth {
    type Error = DomainError;

    fn try_from(meters: f64) -> Result<Self, Self::Error> {
        Self::new(meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_negative_and_nan() {
        assert!(BasinDepth::new(0.0).is_err());
        assert!(BasinDepth::new(-3.0).is_err());
        assert!(BasinDepth::new(f64::NAN).is_err());
        assert!(BasinDepth::new(f64::INFINITY).is_err());
    }

    #[test]
    fn accepts_positive() {
        let d = BasinDepth::try_from(12.5).unwrap();
        assert_eq!(d.value(), 12.5);
        assert_eq!(d.to_string(), "12.5 m");
    }
}
