//! Vertical spacing policies.
//!
//! A [`SpacingPolicy`] turns a basin depth into the finite, strictly
//! increasing sequence of cumulative layer depths below the surface. Each
//! variant carries exactly the parameters it needs; legacy string tags are
//! parsed into a [`SpacingMethod`].

use std::fmt;
use std::str::FromStr;

use lakeprep_core::{BasinDepth, ConfigError, DomainError};

/// Upper bound on the number of terms evaluated for any layer series,
/// geometric or uniform.
pub const MAX_SERIES_TERMS: usize = 1000;

/// Tag identifying a spacing policy without its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpacingMethod {
    /// Constant thickness (`constant`).
    Uniform,
    /// Geometric growth from the surface (`exp`).
    ExponentialFromSurface,
    /// Geometric growth from both surface and bottom (`sbconc`).
    SurfaceExpBottomExp,
    /// Geometric growth near the surface, constant below (`surfvarBotconsta`).
    SurfaceExpBottomUniform,
}

impl SpacingMethod {
    const EXPECTED: &'static str = "constant, exp, sbconc, surfvarBotconsta";

    /// Legacy tag accepted in configuration files.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Uniform => "constant",
            Self::ExponentialFromSurface => "exp",
            Self::SurfaceExpBottomExp => "sbconc",
            Self::SurfaceExpBottomUniform => "surfvarBotconsta",
        }
    }
}

impl fmt::Display for SpacingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SpacingMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constant" | "uniform" => Ok(Self::Uniform),
            "exp" | "exponential" => Ok(Self::ExponentialFromSurface),
            "sbconc" => Ok(Self::SurfaceExpBottomExp),
            "surfvarBotconsta" => Ok(Self::SurfaceExpBottomUniform),
            other => Err(ConfigError::UnknownTag {
                kind: "spacing method",
                tag: other.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Geometric layer growth: the k-th layer is `seed * ratio^k` thick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometricGrowth {
    /// Seed thickness in meters.
    pub seed: f64,
    /// Growth ratio between consecutive layers.
    pub ratio: f64,
}

impl GeometricGrowth {
    /// Create a growth law.
    pub fn new(seed: f64, ratio: f64) -> Self {
        Self { seed, ratio }
    }

    fn validate(&self, name: &'static str) -> Result<(), DomainError> {
        if !self.seed.is_finite() || self.seed <= 0.0 {
            return Err(DomainError::NonPositive {
                name,
                value: self.seed,
            });
        }
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(DomainError::NonPositive {
                name: "growth ratio",
                value: self.ratio,
            });
        }
        Ok(())
    }

    /// Cumulative depths `sum_{j=1..k} seed * ratio^j` for `k = 1..=MAX_SERIES_TERMS`.
    fn cumulative(self) -> impl Iterator<Item = f64> {
        let mut total = 0.0;
        let mut thickness = self.seed;
        (0..MAX_SERIES_TERMS).map(move |_| {
            thickness *= self.ratio;
            total += thickness;
            total
        })
    }

    /// Cumulative depths up to and including the first one that satisfies
    /// `stop`, or an error if no term within the budget does.
    fn take_through(self, target: f64, stop: impl Fn(f64) -> bool) -> Result<Vec<f64>, DomainError> {
        let mut out = Vec::new();
        for total in self.cumulative() {
            out.push(total);
            if stop(total) {
                return Ok(out);
            }
        }
        Err(DomainError::SeriesExhausted {
            target,
            reached: out.last().copied().unwrap_or(0.0),
            terms: out.len(),
        })
    }
}

/// How layer thickness varies with depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpacingPolicy {
    /// Every layer has the same thickness; the last one is clipped to the
    /// basin depth.
    Uniform {
        /// Layer thickness in meters.
        thickness: f64,
    },
    /// Geometric growth from the surface, stopping at the first layer that
    /// reaches the basin depth. That layer is kept, so the grid may
    /// overshoot the basin by up to one layer thickness.
    ExponentialFromSurface(GeometricGrowth),
    /// Independent geometric sequences anchored at the surface and at the
    /// bottom, stitched at `depth * (1 - 1 / divisor)`.
    SurfaceExpBottomExp {
        /// Growth of layers below the surface.
        surface: GeometricGrowth,
        /// Growth of layers above the bottom.
        bottom: GeometricGrowth,
        /// Crossover divisor `n`, at least 1.
        divisor: f64,
    },
    /// Geometric growth down to `reference_depth`, constant thickness below.
    SurfaceExpBottomUniform {
        /// Growth of layers below the surface.
        surface: GeometricGrowth,
        /// Depth where the geometric part ends (`Hn`).
        reference_depth: f64,
        /// Thickness of the constant layers (`dzc`).
        thickness: f64,
    },
}

impl SpacingPolicy {
    /// The tag of this policy.
    pub fn method(&self) -> SpacingMethod {
        match self {
            Self::Uniform { .. } => SpacingMethod::Uniform,
            Self::ExponentialFromSurface(_) => SpacingMethod::ExponentialFromSurface,
            Self::SurfaceExpBottomExp { .. } => SpacingMethod::SurfaceExpBottomExp,
            Self::SurfaceExpBottomUniform { .. } => SpacingMethod::SurfaceExpBottomUniform,
        }
    }

    /// Check parameters against the basin depth.
    pub fn validate(&self, depth: BasinDepth) -> Result<(), DomainError> {
        match *self {
            Self::Uniform { thickness } => positive("layer thickness", thickness),
            Self::ExponentialFromSurface(surface) => surface.validate("surface seed thickness"),
            Self::SurfaceExpBottomExp {
                surface,
                bottom,
                divisor,
            } => {
                surface.validate("surface seed thickness")?;
                bottom.validate("bottom seed thickness")?;
                if !divisor.is_finite() || divisor < 1.0 {
                    return Err(DomainError::OutOfRange {
                        name: "crossover divisor",
                        value: divisor,
                        reason: "must be finite and at least 1".into(),
                    });
                }
                Ok(())
            }
            Self::SurfaceExpBottomUniform {
                surface,
                reference_depth,
                thickness,
            } => {
                surface.validate("surface seed thickness")?;
                positive("layer thickness", thickness)?;
                positive("reference depth", reference_depth)?;
                if reference_depth >= depth.value() {
                    return Err(DomainError::OutOfRange {
                        name: "reference depth",
                        value: reference_depth,
                        reason: format!("must be shallower than the basin ({depth})"),
                    });
                }
                Ok(())
            }
        }
    }

    /// Cumulative depths of the layer bottoms, strictly increasing.
    ///
    /// The surface (0 m) is not included. The last entry equals the basin
    /// depth for every policy except [`ExponentialFromSurface`], whose last
    /// entry is the first cumulative depth at or beyond it.
    ///
    /// [`ExponentialFromSurface`]: SpacingPolicy::ExponentialFromSurface
    pub fn layer_depths(&self, depth: BasinDepth) -> Result<Vec<f64>, DomainError> {
        self.validate(depth)?;
        let h = depth.value();
        let levels = match *self {
            Self::Uniform { thickness } => uniform_from(0.0, thickness, h)?,
            Self::ExponentialFromSurface(surface) => surface.take_through(h, |z| z >= h)?,
            Self::SurfaceExpBottomExp {
                surface,
                bottom,
                divisor,
            } => {
                let crossover = h * (1.0 - 1.0 / divisor);
                let mut upper = surface.take_through(crossover, |z| z > crossover)?;
                upper.pop();
                let mut lower = vec![h];
                let from_bottom = bottom.take_through(crossover, |z| h - z < crossover)?;
                lower.extend(from_bottom.iter().map(|z| h - z).filter(|&z| z >= crossover));
                lower.reverse();
                upper.extend(lower);
                upper
            }
            Self::SurfaceExpBottomUniform {
                surface,
                reference_depth,
                thickness,
            } => {
                let mut upper = surface.take_through(reference_depth, |z| z > reference_depth)?;
                upper.pop();
                let Some(&href) = upper.last() else {
                    return Err(DomainError::OutOfRange {
                        name: "surface seed thickness",
                        value: surface.seed * surface.ratio,
                        reason: format!(
                            "first layer is already below the reference depth {reference_depth}"
                        ),
                    });
                };
                upper.extend(uniform_from(href, thickness, h)?);
                upper.pop();
                for z in &mut upper {
                    *z = round_cm(*z);
                }
                upper.retain(|&z| z < h);
                upper.push(h);
                upper
            }
        };
        Ok(strictly_increasing(levels))
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DomainError::NonPositive { name, value });
    }
    Ok(())
}

/// `start + k * step` for `k = 1, 2, ...` while below `end`, then `end`.
///
/// Fails once more than [`MAX_SERIES_TERMS`] steps would be needed.
fn uniform_from(start: f64, step: f64, end: f64) -> Result<Vec<f64>, DomainError> {
    let tolerance = end * 1e-9;
    let mut out = Vec::new();
    for k in 1..=MAX_SERIES_TERMS {
        let z = start + k as f64 * step;
        if z >= end - tolerance {
            out.push(end);
            return Ok(out);
        }
        out.push(z);
    }
    Err(DomainError::SeriesExhausted {
        target: end,
        reached: out.last().copied().unwrap_or(start),
        terms: out.len(),
    })
}

fn round_cm(z: f64) -> f64 {
    (z * 100.0).round() / 100.0
}

/// Drop non-positive entries and any entry not above its predecessor.
fn strictly_increasing(levels: Vec<f64>) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::with_capacity(levels.len());
    for z in levels.into_iter().filter(|&z| z > 0.0) {
        if out.last().is_none_or(|&prev| z > prev) {
            out.push(z);
        }
    }
    out
}
