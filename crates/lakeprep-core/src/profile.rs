//! Depth-indexed property profiles (temperature, tracer concentration).

use crate::error::DomainError;

/// An ordered sequence of `(depth, value)` samples.
///
/// Depths are positive down and strictly increasing; all values are
/// finite. A profile has at least one sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    depths: Vec<f64>,
    values: Vec<f64>,
}

impl Profile {
    /// Build a profile from parallel depth and value columns.
    pub fn new(depths: Vec<f64>, values: Vec<f64>) -> Result<Self, DomainError> {
        if depths.is_empty() {
            return Err(DomainError::Empty {
                name: "profile depths",
            });
        }
        if values.len() != depths.len() {
            return Err(DomainError::LengthMismatch {
                name: "profile values",
                expected: depths.len(),
                found: values.len(),
            });
        }
        if let Some(index) = depths.iter().position(|d| !d.is_finite()) {
            return Err(DomainError::NonFinite {
                name: "profile depths",
                index,
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(DomainError::NonFinite {
                name: "profile values",
                index,
            });
        }
        if let Some(index) = (1..depths.len()).find(|&i| depths[i] <= depths[i - 1]) {
            return Err(DomainError::NotIncreasing {
                name: "profile depths",
                index,
            });
        }
        Ok(Self { depths, values })
    }

    /// Build a profile from `(depth, value)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, DomainError> {
        let (depths, values) = pairs.iter().copied().unzip();
        Self::new(depths, values)
    }

    /// Sample depths, strictly increasing.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Sample values, parallel to [`depths`](Self::depths).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Always `false`: construction rejects empty profiles.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Shallowest sampled depth.
    pub fn shallowest(&self) -> f64 {
        self.depths[0]
    }

    /// Deepest sampled depth.
    pub fn deepest(&self) -> f64 {
        self.depths[self.depths.len() - 1]
    }

    /// Fail unless the profile reaches at least `required` meters.
    pub fn require_reaches(&self, name: &'static str, required: f64) -> Result<(), DomainError> {
        if self.deepest() < required {
            return Err(DomainError::ProfileTooShallow {
                name,
                deepest: self.deepest(),
                required,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsorted_depths() {
        let err = Profile::new(vec![0.0, 2.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            DomainError::NotIncreasing {
                name: "profile depths",
                index: 2
            }
        );
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(matches!(
            Profile::new(vec![0.0, 1.0], vec![1.0]),
            Err(DomainError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn rejects_nan_value() {
        assert!(matches!(
            Profile::new(vec![0.0, 1.0], vec![1.0, f64::NAN]),
            Err(DomainError::NonFinite { index: 1, .. })
        ));
    }

    #[test]
    fn coverage_check() {
        let p = Profile::from_pairs(&[(0.0, 10.0), (8.0, 6.0)]).unwrap();
        assert_eq!(p.shallowest(), 0.0);
        assert_eq!(p.deepest(), 8.0);
        assert!(p.require_reaches("temperature profile", 8.0).is_ok());
        assert!(matches!(
            p.require_reaches("temperature profile", 10.0),
            Err(DomainError::ProfileTooShallow { .. })
        ));
    }
}
