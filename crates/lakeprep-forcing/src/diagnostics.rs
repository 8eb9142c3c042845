//! Diagnostic hook for forcing series.
//!
//! Runtime surface-forcing modes publish their driver series here after
//! the boundary file has been written. A sink cannot fail the assembly.

/// One named series against the forcing time axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagnosticSeries<'a> {
    /// Short label, e.g. `"wind speed"`.
    pub name: &'static str,
    /// Unit of `values`, empty if dimensionless.
    pub unit: &'static str,
    /// Day of year for each value.
    pub time: &'a [f64],
    /// The series.
    pub values: &'a [f64],
}

/// Minimum, mean, and maximum of a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Smallest value.
    pub min: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Largest value.
    pub max: f64,
}

impl DiagnosticSeries<'_> {
    /// Summary statistics, or `None` for an empty series.
    pub fn summary(&self) -> Option<Summary> {
        if self.values.is_empty() {
            return None;
        }
        let (min, max, sum) = self.values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v),
        );
        Some(Summary {
            min,
            mean: sum / self.values.len() as f64,
            max,
        })
    }
}

/// Receiver for diagnostic series.
pub trait DiagnosticSink {
    /// Whether series should be computed at all.
    fn enabled(&self) -> bool {
        true
    }

    /// Receive one series.
    fn publish(&mut self, series: &DiagnosticSeries<'_>);
}

impl<D: DiagnosticSink + ?Sized> DiagnosticSink for &mut D {
    fn enabled(&self) -> bool {
        (**self).enabled()
    }

    fn publish(&mut self, series: &DiagnosticSeries<'_>) {
        (**self).publish(series)
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    fn enabled(&self) -> bool {
        false
    }

    fn publish(&mut self, _series: &DiagnosticSeries<'_>) {}
}

/// Logs a one-line summary per series at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn publish(&mut self, series: &DiagnosticSeries<'_>) {
        match series.summary() {
            Some(s) => log::info!(
                "{} [{}]: n={} min={:.4} mean={:.4} max={:.4}",
                series.name,
                series.unit,
                series.values.len(),
                s.min,
                s.mean,
                s.max
            ),
            None => log::info!("{}: empty", series.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_values() {
        let s = DiagnosticSeries {
            name: "air temperature",
            unit: "degC",
            time: &[1.0, 2.0, 3.0],
            values: &[10.0, 14.0, 12.0],
        };
        assert_eq!(
            s.summary(),
            Some(Summary {
                min: 10.0,
                mean: 12.0,
                max: 14.0
            })
        );
    }

    #[test]
    fn empty_series_has_no_summary() {
        let s = DiagnosticSeries {
            name: "x",
            unit: "",
            time: &[],
            values: &[],
        };
        assert!(s.summary().is_none());
        LogDiagnostics.publish(&s);
    }

    #[test]
    fn disabled_sink_reports_disabled() {
        assert!(!NoDiagnostics.enabled());
        assert!(LogDiagnostics.enabled());
        let mut sink = NoDiagnostics;
        let by_ref: &mut dyn DiagnosticSink = &mut sink;
        assert!(!by_ref.enabled());
    }
}
