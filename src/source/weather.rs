//! Weather adapter (Open-Meteo forecast API).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{HttpFetcher, SourceAdapter};
use crate::error::FetchError;

/// Geographic point used for the forecast request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherLocation {
    pub lat: f64,
    pub lon: f64,
}

impl Default for WeatherLocation {
    /// New York City.
    fn default() -> Self {
        Self {
            lat: 40.7128,
            lon: -74.0060,
        }
    }
}

/// Display label for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeatherCondition {
    #[serde(rename = "CLEAR")]
    Clear,
    #[serde(rename = "MOSTLY CLEAR")]
    MostlyClear,
    #[serde(rename = "PARTLY CLOUDY")]
    PartlyCloudy,
    #[serde(rename = "OVERCAST")]
    Overcast,
    #[serde(rename = "FOGGY")]
    Foggy,
    #[serde(rename = "LIGHT DRIZZLE")]
    LightDrizzle,
    #[serde(rename = "LIGHT RAIN")]
    LightRain,
    #[serde(rename = "MODERATE RAIN")]
    ModerateRain,
    #[serde(rename = "HEAVY RAIN")]
    HeavyRain,
    #[serde(rename = "LIGHT SNOW")]
    LightSnow,
    #[serde(rename = "MODERATE SNOW")]
    ModerateSnow,
    #[serde(rename = "HEAVY SNOW")]
    HeavySnow,
    #[serde(rename = "THUNDERSTORM")]
    Thunderstorm,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl WeatherCondition {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Clear,
            1 => Self::MostlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Foggy,
            51 => Self::LightDrizzle,
            61 => Self::LightRain,
            63 => Self::ModerateRain,
            65 => Self::HeavyRain,
            71 => Self::LightSnow,
            73 => Self::ModerateSnow,
            75 => Self::HeavySnow,
            95 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::MostlyClear => "MOSTLY CLEAR",
            Self::PartlyCloudy => "PARTLY CLOUDY",
            Self::Overcast => "OVERCAST",
            Self::Foggy => "FOGGY",
            Self::LightDrizzle => "LIGHT DRIZZLE",
            Self::LightRain => "LIGHT RAIN",
            Self::ModerateRain => "MODERATE RAIN",
            Self::HeavyRain => "HEAVY RAIN",
            Self::LightSnow => "LIGHT SNOW",
            Self::ModerateSnow => "MODERATE SNOW",
            Self::HeavySnow => "HEAVY SNOW",
            Self::Thunderstorm => "THUNDERSTORM",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Current conditions at the configured location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    /// Rounded to the nearest degree.
    pub temperature: i64,
    pub windspeed: f64,
    /// Relative humidity in percent (first hourly sample).
    pub humidity: f64,
    pub conditions: WeatherCondition,
}

/// Fetches current weather for one location.
#[derive(Debug, Clone)]
pub struct WeatherAdapter {
    http: HttpFetcher,
    endpoint: Url,
    location: WeatherLocation,
}

impl WeatherAdapter {
    pub fn new(http: HttpFetcher, endpoint: Url, location: WeatherLocation) -> Self {
        Self {
            http,
            endpoint,
            location,
        }
    }

    /// Same provider, different location.
    pub fn at(&self, location: WeatherLocation) -> Self {
        Self {
            location,
            ..self.clone()
        }
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("latitude", &self.location.lat.to_string())
            .append_pair("longitude", &self.location.lon.to_string())
            .append_pair("current_weather", "true")
            .append_pair("hourly", "temperature_2m,relativehumidity_2m");
        url
    }
}

#[async_trait]
impl SourceAdapter for WeatherAdapter {
    type Output = WeatherSnapshot;

    async fn fetch(&self) -> Result<WeatherSnapshot, FetchError> {
        let raw = self.http.get_json(self.request_url()).await?;
        normalize(&raw)
    }
}

pub(crate) fn normalize(raw: &Value) -> Result<WeatherSnapshot, FetchError> {
    let current = raw
        .get("current_weather")
        .filter(|v| v.is_object())
        .ok_or_else(|| FetchError::malformed("current_weather missing"))?;

    let temperature = number(current, "temperature", "current_weather.temperature")?;
    let windspeed = number(current, "windspeed", "current_weather.windspeed")?;

    let code = current
        .get("weathercode")
        .and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        })
        .ok_or_else(|| FetchError::malformed("current_weather.weathercode missing"))?;

    let humidity = raw
        .pointer("/hourly/relativehumidity_2m/0")
        .and_then(Value::as_f64)
        .ok_or_else(|| FetchError::malformed("hourly.relativehumidity_2m[0] missing"))?;

    if !(0.0..=100.0).contains(&humidity) {
        return Err(FetchError::malformed(format!(
            "humidity out of range: {}",
            humidity
        )));
    }

    Ok(WeatherSnapshot {
        temperature: temperature.round() as i64,
        windspeed,
        humidity,
        conditions: WeatherCondition::from_code(code),
    })
}

fn number(obj: &Value, field: &str, path: &str) -> Result<f64, FetchError> {
    obj.get(field)
        .and_then(Value::as_f64)
        .filter(|f| f.is_finite())
        .ok_or_else(|| FetchError::malformed(format!("{} missing", path)))
}
