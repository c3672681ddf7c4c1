//! Gridding algorithms and their parameters.
//!
//! Every algorithm has a parameter record with documented defaults.
//! [`AlgorithmParameters`] is the tagged union the engine dispatches on.
//! Parameters can also be written as an option string in the familiar
//! `name:key=value:key=value` form, e.g. `invdist:power=3:smoothing=0.5`
//! or `average:radius1=10:radius2=5:angle=30:min_points=3:nodata=-9999`.
//!
//! Angles are stored in radians. In option strings they are written in
//! degrees.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::{GridError, Result};

/// Algorithm selector, numbered as in the classic gridding API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum GridAlgorithm {
    InverseDistanceToAPower = 1,
    MovingAverage = 2,
    NearestNeighbor = 3,
    MetricMinimum = 4,
    MetricMaximum = 5,
    MetricRange = 6,
    MetricCount = 7,
    MetricAverageDistance = 8,
    MetricAverageDistancePts = 9,
    Linear = 10,
    InverseDistanceToAPowerNearestNeighbor = 11,
}

impl GridAlgorithm {
    pub const ALL: [GridAlgorithm; 11] = [
        GridAlgorithm::InverseDistanceToAPower,
        GridAlgorithm::MovingAverage,
        GridAlgorithm::NearestNeighbor,
        GridAlgorithm::MetricMinimum,
        GridAlgorithm::MetricMaximum,
        GridAlgorithm::MetricRange,
        GridAlgorithm::MetricCount,
        GridAlgorithm::MetricAverageDistance,
        GridAlgorithm::MetricAverageDistancePts,
        GridAlgorithm::Linear,
        GridAlgorithm::InverseDistanceToAPowerNearestNeighbor,
    ];

    /// Short name used in option strings.
    pub fn name(self) -> &'static str {
        match self {
            GridAlgorithm::InverseDistanceToAPower => "invdist",
            GridAlgorithm::MovingAverage => "average",
            GridAlgorithm::NearestNeighbor => "nearest",
            GridAlgorithm::MetricMinimum => "minimum",
            GridAlgorithm::MetricMaximum => "maximum",
            GridAlgorithm::MetricRange => "range",
            GridAlgorithm::MetricCount => "count",
            GridAlgorithm::MetricAverageDistance => "average_distance",
            GridAlgorithm::MetricAverageDistancePts => "average_distance_pts",
            GridAlgorithm::Linear => "linear",
            GridAlgorithm::InverseDistanceToAPowerNearestNeighbor => "invdistnn",
        }
    }

    /// Option keys understood by this algorithm.
    fn keys(self) -> &'static [&'static str] {
        match self {
            GridAlgorithm::InverseDistanceToAPower => &[
                "power",
                "smoothing",
                "radius1",
                "radius2",
                "angle",
                "max_points",
                "min_points",
                "nodata",
            ],
            GridAlgorithm::InverseDistanceToAPowerNearestNeighbor => &[
                "power",
                "smoothing",
                "radius",
                "max_points",
                "min_points",
                "nodata",
            ],
            GridAlgorithm::NearestNeighbor => &["radius1", "radius2", "angle", "nodata"],
            GridAlgorithm::Linear => &["radius", "nodata"],
            _ => &["radius1", "radius2", "angle", "min_points", "nodata"],
        }
    }
}

impl fmt::Display for GridAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for GridAlgorithm {
    type Error = GridError;

    fn try_from(code: u32) -> Result<Self> {
        GridAlgorithm::ALL
            .into_iter()
            .find(|a| *a as u32 == code)
            .ok_or_else(|| {
                GridError::invalid("algorithm", format!("Unsupported gridding method {}", code))
            })
    }
}

impl FromStr for GridAlgorithm {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        GridAlgorithm::ALL
            .into_iter()
            .find(|a| a.name() == lower)
            .ok_or_else(|| {
                GridError::invalid("algorithm", format!("Unsupported gridding method \"{}\"", s))
            })
    }
}

/// Inverse distance to a power.
///
/// With both radii zero every point contributes. Otherwise only points in
/// the search ellipse count, at most `max_points` of them (0 = no limit) and
/// at least `min_points`, or the node gets `nodata`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InverseDistanceOptions {
    pub power: f64,
    pub smoothing: f64,
    pub radius1: f64,
    pub radius2: f64,
    pub angle: f64,
    pub max_points: u32,
    pub min_points: u32,
    pub nodata: f64,
}

impl Default for InverseDistanceOptions {
    fn default() -> Self {
        Self {
            power: 2.0,
            smoothing: 0.0,
            radius1: 0.0,
            radius2: 0.0,
            angle: 0.0,
            max_points: 0,
            min_points: 0,
            nodata: 0.0,
        }
    }
}

/// Inverse distance to a power over the closest points within a circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InverseDistanceNearestNeighborOptions {
    pub power: f64,
    pub smoothing: f64,
    pub radius: f64,
    pub max_points: u32,
    pub min_points: u32,
    pub nodata: f64,
}

impl Default for InverseDistanceNearestNeighborOptions {
    fn default() -> Self {
        Self {
            power: 2.0,
            smoothing: 0.0,
            radius: 1.0,
            max_points: 12,
            min_points: 0,
            nodata: 0.0,
        }
    }
}

/// Moving average over the search ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovingAverageOptions {
    pub radius1: f64,
    pub radius2: f64,
    pub angle: f64,
    pub min_points: u32,
    pub nodata: f64,
}

/// Value of the closest point in the search ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NearestNeighborOptions {
    pub radius1: f64,
    pub radius2: f64,
    pub angle: f64,
    pub nodata: f64,
}

/// Shared by all data metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataMetricsOptions {
    pub radius1: f64,
    pub radius2: f64,
    pub angle: f64,
    pub min_points: u32,
    pub nodata: f64,
}

/// Linear interpolation inside a Delaunay triangulation.
///
/// Outside the triangulation: `radius < 0` takes the nearest point,
/// `radius == 0` writes `nodata`, `radius > 0` takes the nearest point within
/// that distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearOptions {
    pub radius: f64,
    pub nodata: f64,
}

impl Default for LinearOptions {
    fn default() -> Self {
        Self {
            radius: -1.0,
            nodata: 0.0,
        }
    }
}

/// Algorithm selector together with its parameter record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum AlgorithmParameters {
    InverseDistanceToAPower(InverseDistanceOptions),
    InverseDistanceToAPowerNearestNeighbor(InverseDistanceNearestNeighborOptions),
    MovingAverage(MovingAverageOptions),
    NearestNeighbor(NearestNeighborOptions),
    MetricMinimum(DataMetricsOptions),
    MetricMaximum(DataMetricsOptions),
    MetricRange(DataMetricsOptions),
    MetricCount(DataMetricsOptions),
    MetricAverageDistance(DataMetricsOptions),
    MetricAverageDistancePts(DataMetricsOptions),
    Linear(LinearOptions),
}

impl Default for AlgorithmParameters {
    fn default() -> Self {
        AlgorithmParameters::InverseDistanceToAPower(InverseDistanceOptions::default())
    }
}

impl AlgorithmParameters {
    /// Default parameters for `algorithm`.
    pub fn defaults(algorithm: GridAlgorithm) -> Self {
        match algorithm {
            GridAlgorithm::InverseDistanceToAPower => {
                AlgorithmParameters::InverseDistanceToAPower(Default::default())
            }
            GridAlgorithm::InverseDistanceToAPowerNearestNeighbor => {
                AlgorithmParameters::InverseDistanceToAPowerNearestNeighbor(Default::default())
            }
            GridAlgorithm::MovingAverage => AlgorithmParameters::MovingAverage(Default::default()),
            GridAlgorithm::NearestNeighbor => {
                AlgorithmParameters::NearestNeighbor(Default::default())
            }
            GridAlgorithm::MetricMinimum => AlgorithmParameters::MetricMinimum(Default::default()),
            GridAlgorithm::MetricMaximum => AlgorithmParameters::MetricMaximum(Default::default()),
            GridAlgorithm::MetricRange => AlgorithmParameters::MetricRange(Default::default()),
            GridAlgorithm::MetricCount => AlgorithmParameters::MetricCount(Default::default()),
            GridAlgorithm::MetricAverageDistance => {
                AlgorithmParameters::MetricAverageDistance(Default::default())
            }
            GridAlgorithm::MetricAverageDistancePts => {
                AlgorithmParameters::MetricAverageDistancePts(Default::default())
            }
            GridAlgorithm::Linear => AlgorithmParameters::Linear(Default::default()),
        }
    }

    pub fn algorithm(&self) -> GridAlgorithm {
        match self {
            AlgorithmParameters::InverseDistanceToAPower(_) => {
                GridAlgorithm::InverseDistanceToAPower
            }
            AlgorithmParameters::InverseDistanceToAPowerNearestNeighbor(_) => {
                GridAlgorithm::InverseDistanceToAPowerNearestNeighbor
            }
            AlgorithmParameters::MovingAverage(_) => GridAlgorithm::MovingAverage,
            AlgorithmParameters::NearestNeighbor(_) => GridAlgorithm::NearestNeighbor,
            AlgorithmParameters::MetricMinimum(_) => GridAlgorithm::MetricMinimum,
            AlgorithmParameters::MetricMaximum(_) => GridAlgorithm::MetricMaximum,
            AlgorithmParameters::MetricRange(_) => GridAlgorithm::MetricRange,
            AlgorithmParameters::MetricCount(_) => GridAlgorithm::MetricCount,
            AlgorithmParameters::MetricAverageDistance(_) => GridAlgorithm::MetricAverageDistance,
            AlgorithmParameters::MetricAverageDistancePts(_) => {
                GridAlgorithm::MetricAverageDistancePts
            }
            AlgorithmParameters::Linear(_) => GridAlgorithm::Linear,
        }
    }

    /// The no-data value written for empty neighbourhoods.
    pub fn nodata(&self) -> f64 {
        match self {
            AlgorithmParameters::InverseDistanceToAPower(o) => o.nodata,
            AlgorithmParameters::InverseDistanceToAPowerNearestNeighbor(o) => o.nodata,
            AlgorithmParameters::MovingAverage(o) => o.nodata,
            AlgorithmParameters::NearestNeighbor(o) => o.nodata,
            AlgorithmParameters::MetricMinimum(o)
            | AlgorithmParameters::MetricMaximum(o)
            | AlgorithmParameters::MetricRange(o)
            | AlgorithmParameters::MetricCount(o)
            | AlgorithmParameters::MetricAverageDistance(o)
            | AlgorithmParameters::MetricAverageDistancePts(o) => o.nodata,
            AlgorithmParameters::Linear(o) => o.nodata,
        }
    }

    /// Reject parameter values no kernel can work with.
    pub fn validate(&self) -> Result<()> {
        match self {
            AlgorithmParameters::InverseDistanceToAPower(o) => {
                check_power(o.power)?;
                check_non_negative("smoothing", o.smoothing)?;
                check_ellipse(o.radius1, o.radius2, o.angle)
            }
            AlgorithmParameters::InverseDistanceToAPowerNearestNeighbor(o) => {
                check_power(o.power)?;
                check_non_negative("smoothing", o.smoothing)?;
                check_non_negative("radius", o.radius)
            }
            AlgorithmParameters::MovingAverage(o) => check_ellipse(o.radius1, o.radius2, o.angle),
            AlgorithmParameters::NearestNeighbor(o) => {
                check_ellipse(o.radius1, o.radius2, o.angle)
            }
            AlgorithmParameters::MetricMinimum(o)
            | AlgorithmParameters::MetricMaximum(o)
            | AlgorithmParameters::MetricRange(o)
            | AlgorithmParameters::MetricCount(o)
            | AlgorithmParameters::MetricAverageDistance(o)
            | AlgorithmParameters::MetricAverageDistancePts(o) => {
                check_ellipse(o.radius1, o.radius2, o.angle)
            }
            AlgorithmParameters::Linear(o) => {
                if o.radius.is_nan() {
                    return Err(GridError::invalid("radius", "must be a number"));
                }
                Ok(())
            }
        }
    }

    /// Render as an option string, angles in degrees.
    pub fn to_option_string(&self) -> String {
        let name = self.algorithm().name();
        match self {
            AlgorithmParameters::InverseDistanceToAPower(o) => format!(
                "{}:power={}:smoothing={}:radius1={}:radius2={}:angle={}:max_points={}:min_points={}:nodata={}",
                name,
                o.power,
                o.smoothing,
                o.radius1,
                o.radius2,
                o.angle.to_degrees(),
                o.max_points,
                o.min_points,
                o.nodata
            ),
            AlgorithmParameters::InverseDistanceToAPowerNearestNeighbor(o) => format!(
                "{}:power={}:smoothing={}:radius={}:max_points={}:min_points={}:nodata={}",
                name, o.power, o.smoothing, o.radius, o.max_points, o.min_points, o.nodata
            ),
            AlgorithmParameters::MovingAverage(o) => format!(
                "{}:radius1={}:radius2={}:angle={}:min_points={}:nodata={}",
                name,
                o.radius1,
                o.radius2,
                o.angle.to_degrees(),
                o.min_points,
                o.nodata
            ),
            AlgorithmParameters::NearestNeighbor(o) => format!(
                "{}:radius1={}:radius2={}:angle={}:nodata={}",
                name,
                o.radius1,
                o.radius2,
                o.angle.to_degrees(),
                o.nodata
            ),
            AlgorithmParameters::MetricMinimum(o)
            | AlgorithmParameters::MetricMaximum(o)
            | AlgorithmParameters::MetricRange(o)
            | AlgorithmParameters::MetricCount(o)
            | AlgorithmParameters::MetricAverageDistance(o)
            | AlgorithmParameters::MetricAverageDistancePts(o) => format!(
                "{}:radius1={}:radius2={}:angle={}:min_points={}:nodata={}",
                name,
                o.radius1,
                o.radius2,
                o.angle.to_degrees(),
                o.min_points,
                o.nodata
            ),
            AlgorithmParameters::Linear(o) => {
                format!("{}:radius={}:nodata={}", name, o.radius, o.nodata)
            }
        }
    }
}

impl fmt::Display for AlgorithmParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_option_string())
    }
}

fn check_power(power: f64) -> Result<()> {
    if !(power.is_finite() && power >= 0.0) {
        return Err(GridError::invalid(
            "power",
            format!("must be a finite number >= 0, got {}", power),
        ));
    }
    Ok(())
}

fn check_non_negative(param: &str, value: f64) -> Result<()> {
    if !(value >= 0.0) {
        return Err(GridError::invalid(
            param,
            format!("must be >= 0, got {}", value),
        ));
    }
    Ok(())
}

fn check_ellipse(radius1: f64, radius2: f64, angle: f64) -> Result<()> {
    check_non_negative("radius1", radius1)?;
    check_non_negative("radius2", radius2)?;
    if !angle.is_finite() {
        return Err(GridError::invalid(
            "angle",
            format!("must be finite, got {}", angle),
        ));
    }
    Ok(())
}

/// `key=value` pairs of an option string, keys lower-cased.
struct OptionValues {
    values: HashMap<String, String>,
}

impl OptionValues {
    fn float(&self, key: &str, default: f64) -> Result<f64> {
        match self.values.get(key) {
            Some(raw) => raw.parse::<f64>().map_err(|_| {
                GridError::invalid(key, format!("expected a number, got \"{}\"", raw))
            }),
            None => Ok(default),
        }
    }

    fn degrees(&self, key: &str) -> Result<f64> {
        Ok(self.float(key, 0.0)?.to_radians())
    }

    // Counts accept any number and truncate, so "12.0" reads as 12.
    fn count(&self, key: &str, default: u32) -> Result<u32> {
        Ok(self.float(key, default as f64)? as u32)
    }
}

impl FromStr for AlgorithmParameters {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split(':').map(str::trim).filter(|t| !t.is_empty());
        let name = tokens
            .next()
            .ok_or_else(|| GridError::invalid("algorithm", "Empty gridding algorithm string"))?;
        let algorithm: GridAlgorithm = name.parse()?;

        let mut values = HashMap::new();
        for token in tokens {
            let (key, value) = token.split_once('=').ok_or_else(|| {
                GridError::invalid(
                    "algorithm",
                    format!("Malformed option \"{}\", expected key=value", token),
                )
            })?;
            let key = key.trim().to_lowercase();
            if !algorithm.keys().contains(&key.as_str()) {
                warn!(
                    algorithm = algorithm.name(),
                    option = %key,
                    "Ignoring unknown gridding option"
                );
                continue;
            }
            values.insert(key, value.trim().to_string());
        }
        let opts = OptionValues { values };

        let parameters = match algorithm {
            GridAlgorithm::InverseDistanceToAPower => {
                AlgorithmParameters::InverseDistanceToAPower(InverseDistanceOptions {
                    power: opts.float("power", 2.0)?,
                    smoothing: opts.float("smoothing", 0.0)?,
                    radius1: opts.float("radius1", 0.0)?,
                    radius2: opts.float("radius2", 0.0)?,
                    angle: opts.degrees("angle")?,
                    max_points: opts.count("max_points", 0)?,
                    min_points: opts.count("min_points", 0)?,
                    nodata: opts.float("nodata", 0.0)?,
                })
            }
            GridAlgorithm::InverseDistanceToAPowerNearestNeighbor => {
                AlgorithmParameters::InverseDistanceToAPowerNearestNeighbor(
                    InverseDistanceNearestNeighborOptions {
                        power: opts.float("power", 2.0)?,
                        smoothing: opts.float("smoothing", 0.0)?,
                        radius: opts.float("radius", 1.0)?,
                        max_points: opts.count("max_points", 12)?,
                        min_points: opts.count("min_points", 0)?,
                        nodata: opts.float("nodata", 0.0)?,
                    },
                )
            }
            GridAlgorithm::MovingAverage => AlgorithmParameters::MovingAverage(MovingAverageOptions {
                radius1: opts.float("radius1", 0.0)?,
                radius2: opts.float("radius2", 0.0)?,
                angle: opts.degrees("angle")?,
                min_points: opts.count("min_points", 0)?,
                nodata: opts.float("nodata", 0.0)?,
            }),
            GridAlgorithm::NearestNeighbor => {
                AlgorithmParameters::NearestNeighbor(NearestNeighborOptions {
                    radius1: opts.float("radius1", 0.0)?,
                    radius2: opts.float("radius2", 0.0)?,
                    angle: opts.degrees("angle")?,
                    nodata: opts.float("nodata", 0.0)?,
                })
            }
            GridAlgorithm::Linear => AlgorithmParameters::Linear(LinearOptions {
                radius: opts.float("radius", -1.0)?,
                nodata: opts.float("nodata", 0.0)?,
            }),
            metric => {
                let o = DataMetricsOptions {
                    radius1: opts.float("radius1", 0.0)?,
                    radius2: opts.float("radius2", 0.0)?,
                    angle: opts.degrees("angle")?,
                    min_points: opts.count("min_points", 0)?,
                    nodata: opts.float("nodata", 0.0)?,
                };
                match metric {
                    GridAlgorithm::MetricMinimum => AlgorithmParameters::MetricMinimum(o),
                    GridAlgorithm::MetricMaximum => AlgorithmParameters::MetricMaximum(o),
                    GridAlgorithm::MetricRange => AlgorithmParameters::MetricRange(o),
                    GridAlgorithm::MetricCount => AlgorithmParameters::MetricCount(o),
                    GridAlgorithm::MetricAverageDistance => {
                        AlgorithmParameters::MetricAverageDistance(o)
                    }
                    _ => AlgorithmParameters::MetricAverageDistancePts(o),
                }
            }
        };

        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_selector_numbering() {
        assert_eq!(GridAlgorithm::try_from(1u32).unwrap(), GridAlgorithm::InverseDistanceToAPower);
        assert_eq!(GridAlgorithm::try_from(2u32).unwrap(), GridAlgorithm::MovingAverage);
        assert_eq!(GridAlgorithm::try_from(3u32).unwrap(), GridAlgorithm::NearestNeighbor);
        assert_eq!(
            GridAlgorithm::try_from(11u32).unwrap(),
            GridAlgorithm::InverseDistanceToAPowerNearestNeighbor
        );
        for code in [0u32, 12, 99] {
            let err = GridAlgorithm::try_from(code).unwrap_err();
            assert!(matches!(err, GridError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn test_parse_defaults() {
        let params: AlgorithmParameters = "invdist".parse().unwrap();
        assert_eq!(params, AlgorithmParameters::defaults(GridAlgorithm::InverseDistanceToAPower));

        let params: AlgorithmParameters = "InvDistNN".parse().unwrap();
        match params {
            AlgorithmParameters::InverseDistanceToAPowerNearestNeighbor(o) => {
                assert_eq!(o.radius, 1.0);
                assert_eq!(o.max_points, 12);
            }
            other => panic!("unexpected parameters {:?}", other),
        }

        let params: AlgorithmParameters = "linear".parse().unwrap();
        assert_eq!(params, AlgorithmParameters::Linear(LinearOptions { radius: -1.0, nodata: 0.0 }));

        for algorithm in GridAlgorithm::ALL {
            let parsed: AlgorithmParameters = algorithm.name().parse().unwrap();
            assert_eq!(parsed, AlgorithmParameters::defaults(algorithm));
            assert_eq!(parsed.algorithm(), algorithm);
        }
    }

    #[test]
    fn test_parse_values() {
        let params: AlgorithmParameters =
            "average:radius1=10:radius2=5:angle=90:min_points=3:nodata=-9999"
                .parse()
                .unwrap();
        match params {
            AlgorithmParameters::MovingAverage(o) => {
                assert_eq!(o.radius1, 10.0);
                assert_eq!(o.radius2, 5.0);
                assert!((o.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
                assert_eq!(o.min_points, 3);
                assert_eq!(o.nodata, -9999.0);
            }
            other => panic!("unexpected parameters {:?}", other),
        }

        let params: AlgorithmParameters = "count:MIN_POINTS=2.0:bogus=1".parse().unwrap();
        assert_eq!(
            params,
            AlgorithmParameters::MetricCount(DataMetricsOptions {
                min_points: 2,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<AlgorithmParameters>().is_err());
        assert!("kriging".parse::<AlgorithmParameters>().is_err());
        assert!("invdist:power".parse::<AlgorithmParameters>().is_err());
        assert!("invdist:power=two".parse::<AlgorithmParameters>().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(AlgorithmParameters::default().validate().is_ok());
        let bad = AlgorithmParameters::InverseDistanceToAPower(InverseDistanceOptions {
            power: -1.0,
            ..Default::default()
        });
        assert!(bad.validate().is_err());
        let bad = AlgorithmParameters::MovingAverage(MovingAverageOptions {
            radius1: -2.0,
            ..Default::default()
        });
        assert!(bad.validate().is_err());
        let ok = AlgorithmParameters::Linear(LinearOptions::default());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_serde_representation() {
        let params = AlgorithmParameters::NearestNeighbor(NearestNeighborOptions {
            radius1: 2.0,
            radius2: 2.0,
            angle: 0.0,
            nodata: -1.0,
        });
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(json["algorithm"], "nearest_neighbor");
        assert_eq!(json["radius1"], 2.0);

        let parsed: AlgorithmParameters =
            serde_json::from_str(r#"{"algorithm": "moving_average", "radius1": 3}"#).unwrap();
        assert_eq!(
            parsed,
            AlgorithmParameters::MovingAverage(MovingAverageOptions {
                radius1: 3.0,
                ..Default::default()
            })
        );
    }
}
