use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Input to the advisory classifier, one vector per request.
///
/// Built from loosely-typed JSON the way the original API accepted it:
/// numbers may arrive as JSON numbers, numeric strings, or booleans, and
/// absent fields take documented defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub aqi: f64,
    pub pm2_5: f64,
    pub temp: f64,
    pub age: i64,
    pub asthma: bool,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self { aqi: 0.0, pm2_5: 0.0, temp: 25.0, age: 30, asthma: false }
    }
}

impl FeatureVector {
    /// Coerce a JSON payload into a feature vector.
    ///
    /// Non-numeric input where a number is expected is a client error, not a
    /// crash; an explicitly `null` numeric field is likewise rejected, while
    /// an absent field takes its default.
    pub fn from_json(payload: &Value) -> Result<Self, Error> {
        let obj = payload
            .as_object()
            .ok_or_else(|| Error::InvalidInput("request body must be a JSON object".to_string()))?;

        Ok(Self {
            aqi: coerce_f64(obj.get("aqi"), 0.0, "aqi")?,
            pm2_5: coerce_f64(obj.get("pm2_5"), 0.0, "pm2_5")?,
            temp: coerce_f64(obj.get("temp"), 25.0, "temp")?,
            age: coerce_i64(obj.get("age"), 30, "age")?,
            asthma: truthy(obj.get("asthma")),
        })
    }

    /// Features in artifact training order: `[aqi, pm2_5, temp, age, asthma]`.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.aqi,
            self.pm2_5,
            self.temp,
            self.age as f64,
            if self.asthma { 1.0 } else { 0.0 },
        ]
    }
}

pub(crate) fn coerce_f64(value: Option<&Value>, default: f64, field: &str) -> Result<f64, Error> {
    match value {
        None => Ok(default),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| Error::InvalidInput(format!("'{field}' is out of range"))),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            Error::InvalidInput(format!("could not convert string to float: '{s}' ('{field}')"))
        }),
        Some(other) => Err(Error::InvalidInput(format!(
            "'{field}' must be numeric, got {other}"
        ))),
    }
}

pub(crate) fn coerce_i64(value: Option<&Value>, default: i64, field: &str) -> Result<i64, Error> {
    match value {
        None => Ok(default),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                // Fractional ages truncate, as int() did upstream of the model.
                n.as_f64()
                    .map(|f| f.trunc() as i64)
                    .ok_or_else(|| Error::InvalidInput(format!("'{field}' is out of range")))
            }
        }
        Some(Value::Bool(b)) => Ok(i64::from(*b)),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| {
            Error::InvalidInput(format!("could not convert string to int: '{s}' ('{field}')"))
        }),
        Some(other) => Err(Error::InvalidInput(format!(
            "'{field}' must be an integer, got {other}"
        ))),
    }
}

/// JSON truthiness: null, false, 0, "", [] and {} are false, everything else true.
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// The six EPA-style AQI buckets, inclusive upper bounds.
///
/// Shared by the chat live-query and personalized-advice paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            AqiCategory::Good
        } else if aqi <= 100.0 {
            AqiCategory::Moderate
        } else if aqi <= 150.0 {
            AqiCategory::UnhealthySensitive
        } else if aqi <= 200.0 {
            AqiCategory::Unhealthy
        } else if aqi <= 300.0 {
            AqiCategory::VeryUnhealthy
        } else {
            AqiCategory::Hazardous
        }
    }

    /// Display label as rendered in chat replies.
    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good 🟢",
            AqiCategory::Moderate => "Moderate 🟡",
            AqiCategory::UnhealthySensitive => "Unhealthy for Sensitive Groups 🟠",
            AqiCategory::Unhealthy => "Unhealthy 🔴",
            AqiCategory::VeryUnhealthy => "Very Unhealthy 🟣",
            AqiCategory::Hazardous => "Hazardous ⚫",
        }
    }

    /// One-line advice attached to live AQI readings.
    pub fn advice(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Great day for outdoor activities!",
            AqiCategory::Moderate => "Acceptable for most people.",
            AqiCategory::UnhealthySensitive => {
                "Sensitive individuals should limit prolonged outdoor activities."
            }
            AqiCategory::Unhealthy => "Everyone should limit outdoor exertion.",
            AqiCategory::VeryUnhealthy => "Avoid outdoor activities!",
            AqiCategory::Hazardous => "Stay indoors! Health emergency.",
        }
    }
}

/// Projection of a WAQI feed response (city or station).
#[derive(Debug, Clone)]
pub struct CityFeed {
    /// Station display name as reported by the provider.
    pub name: String,
    /// Numeric AQI; `None` when the provider reports `"-"`.
    pub aqi: Option<i64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    /// Raw `iaqi` pollutant map, passed through untouched.
    pub pollutants: Value,
    /// Local observation time string, as reported.
    pub timestamp: String,
    /// `[lat, lon]` of the station.
    pub coordinates: Vec<f64>,
    pub dominentpol: String,
    /// Raw attribution list, passed through untouched.
    pub attributions: Value,
}

/// One monitoring station from a map-bounds query.
///
/// `aqi` stays the string WAQI returns (often `"-"` for stale stations).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub uid: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub aqi: String,
}

/// One hit from a station-name search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitySearchHit {
    pub uid: Option<i64>,
    pub name: String,
    pub aqi: String,
    pub time: String,
}
