//! Meteorological forcing series.
//!
//! Every column is parallel to `time`. The driver block depends on how the
//! surface heat budget is handled: computed here from longwave and
//! temperature data, or left to SI3D at runtime from cloud cover or
//! measured longwave.

use lakeprep_core::DomainError;

use crate::heat_flux::{HeatBudgetMethod, MetSample};
use crate::humidity::RelativeHumidity;
use crate::surfbc::SurfbcMode;
use crate::wind::WindSeries;

/// Inputs for computing the heat budget ahead of the run.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatBudgetDrivers {
    /// Formulation applied at every timestep.
    pub method: HeatBudgetMethod,
    /// Incoming longwave (W/m2).
    pub longwave_in: Vec<f64>,
    /// Outgoing longwave (W/m2).
    pub longwave_out: Vec<f64>,
    /// Air temperature (degrees Celsius).
    pub air_temperature: Vec<f64>,
    /// Water surface temperature (degrees Celsius).
    pub water_temperature: Vec<f64>,
    /// Relative humidity.
    pub humidity: Vec<RelativeHumidity>,
}

/// Raw atmospheric drivers for SI3D's runtime heat budget.
#[derive(Clone, Debug, PartialEq)]
pub struct AtmosphereDrivers {
    /// Air temperature (degrees Celsius).
    pub air_temperature: Vec<f64>,
    /// Atmospheric pressure, in whatever unit the station reports.
    pub pressure: Vec<f64>,
    /// Relative humidity.
    pub humidity: Vec<RelativeHumidity>,
    /// Cloud cover fraction or incoming longwave (W/m2), depending on the
    /// enclosing [`Drivers`] variant.
    pub radiation: Vec<f64>,
}

/// Mode-specific driver columns.
#[derive(Clone, Debug, PartialEq)]
pub enum Drivers {
    /// Heat budget computed here; written as `surfbc.txt` mode `Preprocess`.
    HeatBudget(HeatBudgetDrivers),
    /// Runtime heat budget from cloud cover (`RunTime1`).
    CloudCover(AtmosphereDrivers),
    /// Runtime heat budget from measured incoming longwave (`RunTime2`).
    LongwaveIn(AtmosphereDrivers),
}

impl Drivers {
    /// The `surfbc.txt` layout these drivers produce.
    pub fn mode(&self) -> SurfbcMode {
        match self {
            Self::HeatBudget(_) => SurfbcMode::Preprocessed,
            Self::CloudCover(_) => SurfbcMode::RuntimeCloudCover,
            Self::LongwaveIn(_) => SurfbcMode::RuntimeLongwaveIn,
        }
    }

    /// Runtime drivers, if any.
    pub fn atmosphere(&self) -> Option<&AtmosphereDrivers> {
        match self {
            Self::HeatBudget(_) => None,
            Self::CloudCover(a) | Self::LongwaveIn(a) => Some(a),
        }
    }
}

/// Time series driving the surface boundary condition.
#[derive(Clone, Debug, PartialEq)]
pub struct ForcingSeries {
    /// Fractional day of year, strictly increasing.
    pub time: Vec<f64>,
    /// Light attenuation coefficient (1/m).
    pub attenuation: Vec<f64>,
    /// Net (penetrating) shortwave radiation (W/m2).
    pub shortwave_net: Vec<f64>,
    /// Wind drag coefficient.
    pub wind_drag: Vec<f64>,
    /// Eastward wind (m/s).
    pub wind_u: Vec<f64>,
    /// Northward wind (m/s).
    pub wind_v: Vec<f64>,
    /// Mode-specific columns.
    pub drivers: Drivers,
}

impl ForcingSeries {
    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` if there are no timesteps.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// The `surfbc.txt` layout this series produces.
    pub fn mode(&self) -> SurfbcMode {
        self.drivers.mode()
    }

    /// Check column lengths, finiteness, and time ordering.
    pub fn validate(&self) -> Result<(), DomainError> {
        let n = self.time.len();
        if n == 0 {
            return Err(DomainError::Empty { name: "forcing time" });
        }
        check_column("forcing time", &self.time, n)?;
        if let Some(index) = (1..n).find(|&i| self.time[i] <= self.time[i - 1]) {
            return Err(DomainError::NotIncreasing {
                name: "forcing time",
                index,
            });
        }
        check_column("attenuation", &self.attenuation, n)?;
        check_column("net shortwave", &self.shortwave_net, n)?;
        check_column("wind drag", &self.wind_drag, n)?;
        check_column("wind u", &self.wind_u, n)?;
        check_column("wind v", &self.wind_v, n)?;

        match &self.drivers {
            Drivers::HeatBudget(d) => {
                check_column("longwave in", &d.longwave_in, n)?;
                check_column("longwave out", &d.longwave_out, n)?;
                check_column("air temperature", &d.air_temperature, n)?;
                check_column("water temperature", &d.water_temperature, n)?;
                check_len("humidity", d.humidity.len(), n)?;
            }
            Drivers::CloudCover(a) | Drivers::LongwaveIn(a) => {
                check_column("air temperature", &a.air_temperature, n)?;
                check_column("pressure", &a.pressure, n)?;
                check_len("humidity", a.humidity.len(), n)?;
                let name = match self.drivers {
                    Drivers::CloudCover(_) => "cloud cover",
                    _ => "longwave in",
                };
                check_column(name, &a.radiation, n)?;
            }
        }
        Ok(())
    }

    /// Hours since the first sample.
    pub fn elapsed_hours(&self) -> Vec<f64> {
        let start = self.time.first().copied().unwrap_or(0.0);
        self.time.iter().map(|t| (t - start) * 24.0).collect()
    }

    /// Wind speed magnitude per timestep.
    pub fn wind_speed(&self) -> Vec<f64> {
        self.wind_u
            .iter()
            .zip(&self.wind_v)
            .map(|(u, v)| u.hypot(*v))
            .collect()
    }

    /// Heat budget inputs at timestep `i`, for [`Drivers::HeatBudget`].
    pub fn met_sample(&self, i: usize) -> Option<MetSample> {
        let Drivers::HeatBudget(d) = &self.drivers else {
            return None;
        };
        Some(MetSample {
            shortwave_net: *self.shortwave_net.get(i)?,
            longwave_in: *d.longwave_in.get(i)?,
            longwave_out: *d.longwave_out.get(i)?,
            air_temperature: *d.air_temperature.get(i)?,
            water_temperature: *d.water_temperature.get(i)?,
            humidity: *d.humidity.get(i)?,
            wind_u: *self.wind_u.get(i)?,
            wind_v: *self.wind_v.get(i)?,
        })
    }

    /// The wind columns, with time converted to hours of year.
    pub fn wind_series(&self) -> WindSeries {
        WindSeries {
            time_hours: self.time.iter().map(|t| t * 24.0).collect(),
            wind_drag: self.wind_drag.clone(),
            wind_u: self.wind_u.clone(),
            wind_v: self.wind_v.clone(),
        }
    }
}

pub(crate) fn check_len(name: &'static str, found: usize, expected: usize) -> Result<(), DomainError> {
    if found != expected {
        return Err(DomainError::LengthMismatch {
            name,
            expected,
            found,
        });
    }
    Ok(())
}

pub(crate) fn check_column(
    name: &'static str,
    values: &[f64],
    expected: usize,
) -> Result<(), DomainError> {
    check_len(name, values.len(), expected)?;
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(DomainError::NonFinite { name, index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heat_flux::ChapraParams;

    fn runtime(n: usize) -> ForcingSeries {
        ForcingSeries {
            time: (0..n).map(|i| 152.0 + i as f64 / 24.0).collect(),
            attenuation: vec![0.3; n],
            shortwave_net: vec![200.0; n],
            wind_drag: vec![0.0013; n],
            wind_u: vec![3.0; n],
            wind_v: vec![4.0; n],
            drivers: Drivers::CloudCover(AtmosphereDrivers {
                air_temperature: vec![18.0; n],
                pressure: vec![101_325.0; n],
                humidity: vec![RelativeHumidity::from_percent(60.0).unwrap(); n],
                radiation: vec![0.2; n],
            }),
        }
    }

    #[test]
    fn valid_series_passes() {
        let s = runtime(3);
        s.validate().unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.mode(), SurfbcMode::RuntimeCloudCover);
        assert_eq!(s.wind_speed(), vec![5.0; 3]);
        assert!(s.met_sample(0).is_none());
    }

    #[test]
    fn elapsed_hours_start_at_zero() {
        let mut s = runtime(2);
        s.time = vec![152.0, 152.5];
        assert_eq!(s.elapsed_hours(), vec![0.0, 12.0]);
    }

    #[test]
    fn rejects_ragged_columns() {
        let mut s = runtime(3);
        s.wind_v.pop();
        assert_eq!(
            s.validate(),
            Err(DomainError::LengthMismatch {
                name: "wind v",
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn rejects_ragged_driver_columns() {
        let mut s = runtime(3);
        if let Drivers::CloudCover(a) = &mut s.drivers {
            a.radiation.push(0.1);
        }
        assert!(matches!(
            s.validate(),
            Err(DomainError::LengthMismatch { name: "cloud cover", .. })
        ));
    }

    #[test]
    fn rejects_non_increasing_time() {
        let mut s = runtime(3);
        s.time[2] = s.time[1];
        assert_eq!(
            s.validate(),
            Err(DomainError::NotIncreasing {
                name: "forcing time",
                index: 2
            })
        );
    }

    #[test]
    fn rejects_empty_and_nan() {
        let mut s = runtime(0);
        assert_eq!(s.validate(), Err(DomainError::Empty { name: "forcing time" }));
        s = runtime(2);
        s.attenuation[1] = f64::NAN;
        assert!(matches!(s.validate(), Err(DomainError::NonFinite { index: 1, .. })));
    }

    #[test]
    fn met_sample_reads_heat_budget_columns() {
        let base = runtime(2);
        let s = ForcingSeries {
            drivers: Drivers::HeatBudget(HeatBudgetDrivers {
                method: HeatBudgetMethod::Chapra1995(ChapraParams::default()),
                longwave_in: vec![310.0, 320.0],
                longwave_out: vec![380.0, 385.0],
                air_temperature: vec![17.0, 16.0],
                water_temperature: vec![19.0, 19.5],
                humidity: vec![RelativeHumidity::SATURATED; 2],
            }),
            ..base
        };
        s.validate().unwrap();
        let m = s.met_sample(1).unwrap();
        assert_eq!(m.longwave_in, 320.0);
        assert_eq!(m.water_temperature, 19.5);
        assert!(s.met_sample(2).is_none());
    }
}
