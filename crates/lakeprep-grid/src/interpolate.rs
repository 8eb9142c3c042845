//! Piecewise-linear profile interpolation onto grid depths.
//!
//! Targets outside the profile's depth range take the nearest boundary
//! value. That only happens when the measured profile does not cover the
//! grid, so every clamped target is counted and reported through `log`.

use lakeprep_core::Profile;

/// Interpolated values plus how many targets fell outside the profile.
#[derive(Clone, Debug, PartialEq)]
pub struct Interpolation {
    /// One value per target depth.
    pub values: Vec<f64>,
    /// Targets shallower than the first profile sample.
    pub clamped_above: usize,
    /// Targets deeper than the last profile sample.
    pub clamped_below: usize,
}

impl Interpolation {
    /// Total number of clamped targets.
    pub fn clamped(&self) -> usize {
        self.clamped_above + self.clamped_below
    }
}

/// Interpolate `profile` at each of `targets` (positive-down depths).
///
/// Emits a warning when any target had to be clamped.
///
/// ```
/// use lakeprep_core::Profile;
/// use lakeprep_grid::interpolate_profile;
///
/// let p = Profile::from_pairs(&[(0.0, 20.0), (10.0, 10.0)]).unwrap();
/// assert_eq!(interpolate_profile(&[0.0, 5.0, 10.0], &p), vec![20.0, 15.0, 10.0]);
/// ```
pub fn interpolate_profile(targets: &[f64], profile: &Profile) -> Vec<f64> {
    let report = interpolate_profile_report(targets, profile);
    if report.clamped() > 0 {
        log::warn!(
            "{} of {} target depths outside profile range [{}, {}] m \
             ({} above, {} below); boundary values used",
            report.clamped(),
            targets.len(),
            profile.shallowest(),
            profile.deepest(),
            report.clamped_above,
            report.clamped_below,
        );
    }
    report.values
}

/// Like [`interpolate_profile`], returning clamp counts instead of logging.
pub fn interpolate_profile_report(targets: &[f64], profile: &Profile) -> Interpolation {
    let depths = profile.depths();
    let values = profile.values();
    let last = depths.len() - 1;
    let mut out = Interpolation {
        values: Vec::with_capacity(targets.len()),
        clamped_above: 0,
        clamped_below: 0,
    };

    for &z in targets {
        let v = if z.is_nan() {
            f64::NAN
        } else if z <= depths[0] {
            if z < depths[0] {
                out.clamped_above += 1;
            }
            values[0]
        } else if z >= depths[last] {
            if z > depths[last] {
                out.clamped_below += 1;
            }
            values[last]
        } else {
            // depths[0] < z < depths[last], so 1 <= hi <= last.
            let hi = depths.partition_point(|&d| d <= z);
            let lo = hi - 1;
            if depths[lo] == z {
                values[lo]
            } else {
                let t = (z - depths[lo]) / (depths[hi] - depths[lo]);
                values[lo] + t * (values[hi] - values[lo])
            }
        };
        out.values.push(v);
    }
    out
}
