//! Bulk surface heat budget.
//!
//! Only the Chapra (1995) formulation is implemented. The AirSea and TERC
//! tags parse so that existing run configurations are recognized, but
//! selecting them fails with [`PrepError::NotImplemented`] before any
//! computation or output.
//!
//! Sign convention: positive fluxes heat the water.

use std::fmt;
use std::str::FromStr;

use lakeprep_core::{ConfigError, DomainError, PrepError};

use crate::humidity::RelativeHumidity;
use crate::vapor::VaporPressureMethod;

/// Reference water density (kg/m3).
pub const REFERENCE_DENSITY: f64 = 997.0;

/// Latent heat of vaporization (J/kg).
pub const LATENT_HEAT: f64 = 2.5e6;

/// Wind function coefficient applied to the wind speed.
pub const WIND_COEFFICIENT: f64 = 1.02e-9;

/// Factor applied to the calibration constant to form the Bowen coefficient.
pub const BOWEN_FACTOR: f64 = 0.61;

/// Parameters of the Chapra (1995) formulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChapraParams {
    /// Site calibration constant.
    pub calibration: f64,
    /// Vapor pressure curve used for both air and water.
    pub vapor_method: VaporPressureMethod,
}

impl Default for ChapraParams {
    fn default() -> Self {
        Self {
            calibration: 1.0,
            vapor_method: VaporPressureMethod::default(),
        }
    }
}

impl ChapraParams {
    /// Bowen-ratio-like coefficient, `0.61 * calibration`.
    pub fn bowen_coefficient(&self) -> f64 {
        BOWEN_FACTOR * self.calibration
    }

    fn validate(&self) -> Result<(), DomainError> {
        if !self.calibration.is_finite() {
            return Err(DomainError::NonFinite {
                name: "Chapra calibration",
                index: 0,
            });
        }
        Ok(())
    }
}

/// Heat budget formulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeatBudgetMethod {
    /// Chapra (1995) bulk formulas.
    Chapra1995(ChapraParams),
    /// Air-sea flux algorithm. Not implemented.
    AirSea,
    /// TERC formulation. Not implemented.
    Terc,
}

impl HeatBudgetMethod {
    /// The tag this method is selected by.
    pub fn kind(&self) -> HeatBudgetKind {
        match self {
            Self::Chapra1995(_) => HeatBudgetKind::Chapra1995,
            Self::AirSea => HeatBudgetKind::AirSea,
            Self::Terc => HeatBudgetKind::Terc,
        }
    }

    /// Fail fast for methods that have no implementation.
    pub fn ensure_implemented(&self) -> Result<(), PrepError> {
        match self {
            Self::Chapra1995(params) => Ok(params.validate()?),
            Self::AirSea => Err(not_implemented("AirSea heat budget")),
            Self::Terc => Err(not_implemented("TERC heat budget")),
        }
    }
}

fn not_implemented(feature: &'static str) -> PrepError {
    PrepError::NotImplemented { feature }
}

impl fmt::Display for HeatBudgetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind().fmt(f)
    }
}

/// Parameter-free heat budget tag, as written in run configurations and
/// in the `surfbc.txt` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeatBudgetKind {
    /// `Chapra1995`.
    Chapra1995,
    /// `AirSea`.
    AirSea,
    /// `TERC`.
    Terc,
}

impl HeatBudgetKind {
    /// Legacy tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Chapra1995 => "Chapra1995",
            Self::AirSea => "AirSea",
            Self::Terc => "TERC",
        }
    }

    /// Attach parameters. Only [`HeatBudgetKind::Chapra1995`] uses them.
    pub fn with_params(self, params: ChapraParams) -> HeatBudgetMethod {
        match self {
            Self::Chapra1995 => HeatBudgetMethod::Chapra1995(params),
            Self::AirSea => HeatBudgetMethod::AirSea,
            Self::Terc => HeatBudgetMethod::Terc,
        }
    }
}

impl FromStr for HeatBudgetKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Chapra1995" => Ok(Self::Chapra1995),
            "AirSea" => Ok(Self::AirSea),
            "TERC" | "Terc" => Ok(Self::Terc),
            other => Err(ConfigError::UnknownTag {
                kind: "heat budget method",
                tag: other.to_string(),
                expected: "Chapra1995, AirSea, TERC",
            }),
        }
    }
}

impl fmt::Display for HeatBudgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Meteorological inputs for one timestep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetSample {
    /// Net shortwave radiation (W/m2), albedo already removed.
    pub shortwave_net: f64,
    /// Incoming longwave radiation (W/m2).
    pub longwave_in: f64,
    /// Outgoing longwave radiation (W/m2).
    pub longwave_out: f64,
    /// Air temperature (degrees Celsius).
    pub air_temperature: f64,
    /// Water surface temperature (degrees Celsius).
    pub water_temperature: f64,
    /// Relative humidity.
    pub humidity: RelativeHumidity,
    /// Eastward wind (m/s).
    pub wind_u: f64,
    /// Northward wind (m/s).
    pub wind_v: f64,
}

impl MetSample {
    /// Wind speed magnitude.
    pub fn wind_speed(&self) -> f64 {
        self.wind_u.hypot(self.wind_v)
    }
}

/// Components of the surface heat budget (W/m2).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeatFluxResult {
    /// Net shortwave, passed through.
    pub shortwave_net: f64,
    /// Incoming minus outgoing longwave.
    pub longwave_net: f64,
    /// Latent (evaporative) flux; negative when heat leaves the water.
    pub latent: f64,
    /// Sensible flux.
    pub sensible: f64,
    /// Sum of the four components.
    pub net: f64,
}

/// Compute the heat budget for one timestep.
///
/// ```
/// use lakeprep_forcing::{compute_heat_flux, ChapraParams, HeatBudgetMethod, MetSample, RelativeHumidity};
///
/// let met = MetSample {
///     shortwave_net: 400.0,
///     longwave_in: 300.0,
///     longwave_out: 350.0,
///     air_temperature: 18.0,
///     water_temperature: 18.0,
///     humidity: RelativeHumidity::SATURATED,
///     wind_u: 0.0,
///     wind_v: 0.0,
/// };
/// let flux = compute_heat_flux(&HeatBudgetMethod::Chapra1995(ChapraParams::default()), &met).unwrap();
/// assert_eq!(flux.net, 350.0);
/// ```
pub fn compute_heat_flux(
    method: &HeatBudgetMethod,
    met: &MetSample,
) -> Result<HeatFluxResult, PrepError> {
    match method {
        HeatBudgetMethod::Chapra1995(params) => {
            params.validate()?;
            Ok(chapra1995(params, met))
        }
        HeatBudgetMethod::AirSea => Err(not_implemented("AirSea heat budget")),
        HeatBudgetMethod::Terc => Err(not_implemented("TERC heat budget")),
    }
}

fn chapra1995(params: &ChapraParams, met: &MetSample) -> HeatFluxResult {
    let es_air = params.vapor_method.saturation(met.air_temperature);
    let es_water = params.vapor_method.saturation(met.water_temperature);
    let ea = es_air * met.humidity.fraction();

    let longwave_net = met.longwave_in - met.longwave_out;
    let wind = WIND_COEFFICIENT * met.wind_speed();
    let latent = -REFERENCE_DENSITY * LATENT_HEAT * wind * (es_water - ea);
    let sensible = -REFERENCE_DENSITY
        * LATENT_HEAT
        * wind
        * params.bowen_coefficient()
        * (met.water_temperature - met.air_temperature);

    HeatFluxResult {
        shortwave_net: met.shortwave_net,
        longwave_net,
        latent,
        sensible,
        net: met.shortwave_net + longwave_net + sensible + latent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chapra() -> HeatBudgetMethod {
        HeatBudgetMethod::Chapra1995(ChapraParams::default())
    }

    fn sample() -> MetSample {
        MetSample {
            shortwave_net: 250.0,
            longwave_in: 320.0,
            longwave_out: 390.0,
            air_temperature: 15.0,
            water_temperature: 20.0,
            humidity: RelativeHumidity::from_percent(50.0).unwrap(),
            wind_u: 3.0,
            wind_v: 4.0,
        }
    }

    #[test]
    fn decomposition_matches_formulas() {
        let met = sample();
        let r = compute_heat_flux(&chapra(), &met).unwrap();
        let es_air = VaporPressureMethod::Tetens.saturation(15.0);
        let es_water = VaporPressureMethod::Tetens.saturation(20.0);
        let f = WIND_COEFFICIENT * 5.0;
        assert_eq!(r.shortwave_net, 250.0);
        assert_eq!(r.longwave_net, -70.0);
        assert_eq!(r.latent, -997.0 * 2.5e6 * f * (es_water - es_air * 0.5));
        assert_eq!(r.sensible, -997.0 * 2.5e6 * f * 0.61 * 5.0);
        assert_eq!(r.net, r.shortwave_net + r.longwave_net + r.sensible + r.latent);
        assert!(r.latent < 0.0 && r.sensible < 0.0);
    }

    #[test]
    fn humidity_percent_never_reaches_latent_formula() {
        // 50 percent normalizes to 0.5; a raw 50 is refused at construction.
        assert!(RelativeHumidity::from_fraction(50.0).is_err());
        let from_percent = compute_heat_flux(&chapra(), &sample()).unwrap();
        let from_fraction = compute_heat_flux(
            &chapra(),
            &MetSample {
                humidity: RelativeHumidity::from_fraction(0.5).unwrap(),
                ..sample()
            },
        )
        .unwrap();
        assert_eq!(from_percent.latent, from_fraction.latent);
    }

    #[test]
    fn calm_air_has_no_turbulent_flux() {
        let met = MetSample {
            wind_u: 0.0,
            wind_v: 0.0,
            ..sample()
        };
        let r = compute_heat_flux(&chapra(), &met).unwrap();
        assert_eq!(r.latent, 0.0);
        assert_eq!(r.sensible, 0.0);
        assert_eq!(r.net, 180.0);
    }

    #[test]
    fn unimplemented_methods_fail_fast() {
        for (method, name) in [
            (HeatBudgetMethod::AirSea, "AirSea heat budget"),
            (HeatBudgetMethod::Terc, "TERC heat budget"),
        ] {
            assert!(matches!(
                compute_heat_flux(&method, &sample()),
                Err(PrepError::NotImplemented { feature }) if feature == name
            ));
            assert!(matches!(
                method.ensure_implemented(),
                Err(PrepError::NotImplemented { feature }) if feature == name
            ));
        }
        let chapra = HeatBudgetMethod::Chapra1995(ChapraParams::default());
        assert!(chapra.ensure_implemented().is_ok());
    }

    #[test]
    fn non_finite_calibration_is_rejected() {
        let method = HeatBudgetMethod::Chapra1995(ChapraParams {
            calibration: f64::NAN,
            ..ChapraParams::default()
        });
        assert!(compute_heat_flux(&method, &sample()).unwrap_err().is_domain());
    }

    #[test]
    fn tags_parse() {
        assert_eq!("Chapra1995".parse::<HeatBudgetKind>().unwrap(), HeatBudgetKind::Chapra1995);
        assert_eq!("TERC".parse::<HeatBudgetKind>().unwrap(), HeatBudgetKind::Terc);
        assert!(matches!(
            "Penman".parse::<HeatBudgetKind>(),
            Err(ConfigError::UnknownTag { .. })
        ));
        let method = HeatBudgetKind::AirSea.with_params(ChapraParams::default());
        assert_eq!(method, HeatBudgetMethod::AirSea);
        assert_eq!(chapra().to_string(), "Chapra1995");
    }

    proptest! {
        #[test]
        fn net_is_sum_of_components(
            sw in 0.0f64..1000.0,
            lw_in in 150.0f64..450.0,
            lw_out in 250.0f64..500.0,
            ta in -10.0f64..35.0,
            tw in 0.0f64..30.0,
            rh in 0.0f64..=1.0,
            u in -15.0f64..15.0,
            v in -15.0f64..15.0,
            code in 1u8..=3,
            calibration in 0.1f64..2.0,
        ) {
            let method = HeatBudgetMethod::Chapra1995(ChapraParams {
                calibration,
                vapor_method: VaporPressureMethod::try_from(code).unwrap(),
            });
            let met = MetSample {
                shortwave_net: sw,
                longwave_in: lw_in,
                longwave_out: lw_out,
                air_temperature: ta,
                water_temperature: tw,
                humidity: RelativeHumidity::from_fraction(rh).unwrap(),
                wind_u: u,
                wind_v: v,
            };
            let r = compute_heat_flux(&method, &met).unwrap();
            prop_assert_eq!(r.net, r.shortwave_net + r.longwave_net + r.sensible + r.latent);
        }
    }
}
