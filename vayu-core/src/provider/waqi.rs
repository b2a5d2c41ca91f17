use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{CityFeed, CitySearchHit, Station};

use super::{AirQualityProvider, Bounds};

const BASE_URL: &str = "https://api.waqi.info";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the WAQI (World Air Quality Index) HTTP API.
#[derive(Debug, Clone)]
pub struct WaqiProvider {
    token: String,
    base_url: String,
    http: Client,
}

impl WaqiProvider {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, BASE_URL.to_owned())
    }

    /// Same client against a different host, for tests and proxies.
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            token,
            base_url,
            http: Client::new(),
        }
    }

    /// GET a WAQI endpoint and unwrap the `{status, data}` envelope.
    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}{path}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .query(query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("failed to reach WAQI: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| Error::Upstream(format!("failed to read WAQI response body: {e}")))?;

        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "WAQI request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| Error::Upstream(format!("failed to parse WAQI response: {e}")))?;

        if envelope.status != "ok" {
            return Err(Error::NotFound(envelope.error_message()));
        }

        Ok(envelope.data)
    }

    async fn feed(&self, target: &str) -> Result<CityFeed> {
        let data = self.fetch(&format!("/feed/{target}/"), &[]).await?;
        let feed: WaqiFeed = serde_json::from_value(data)
            .map_err(|e| Error::Upstream(format!("failed to parse WAQI feed: {e}")))?;

        let pm2_5 = pollutant_value(&feed.iaqi, "pm25");
        let pm10 = pollutant_value(&feed.iaqi, "pm10");

        Ok(CityFeed {
            name: feed.city.name,
            aqi: feed.aqi.as_i64(),
            pm2_5,
            pm10,
            pollutants: feed.iaqi,
            timestamp: feed.time.s,
            coordinates: feed.city.geo,
            dominentpol: feed.dominentpol.unwrap_or_else(|| "pm25".to_owned()),
            attributions: feed.attributions,
        })
    }
}

#[async_trait]
impl AirQualityProvider for WaqiProvider {
    async fn city_feed(&self, city: &str) -> Result<CityFeed> {
        self.feed(city).await
    }

    async fn station_feed(&self, uid: &str) -> Result<CityFeed> {
        self.feed(&format!("@{uid}")).await
    }

    async fn stations_in_bounds(&self, bounds: &Bounds) -> Result<Vec<Station>> {
        let data = self
            .fetch("/map/bounds/", &[("latlng", bounds.as_latlng().as_str())])
            .await?;
        let stations: Vec<WaqiBoundsStation> = serde_json::from_value(data)
            .map_err(|e| Error::Upstream(format!("failed to parse WAQI station list: {e}")))?;

        Ok(stations
            .into_iter()
            .map(|s| Station {
                uid: s.uid,
                name: s.station.name,
                lat: s.lat,
                lon: s.lon,
                aqi: s.aqi,
            })
            .collect())
    }

    async fn search(&self, keyword: &str) -> Result<Vec<CitySearchHit>> {
        let data = self.fetch("/search/", &[("keyword", keyword)]).await?;
        let hits: Vec<WaqiSearchHit> = serde_json::from_value(data)
            .map_err(|e| Error::Upstream(format!("failed to parse WAQI search results: {e}")))?;

        Ok(hits
            .into_iter()
            .map(|hit| CitySearchHit {
                uid: hit.uid,
                name: hit.station.name,
                aqi: hit.aqi.unwrap_or_else(|| "N/A".to_owned()),
                time: hit.time.stime,
            })
            .collect())
    }
}

/// `{status, data}` wrapper WAQI puts around every response. On errors the
/// `data` field usually carries a reason string.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Value,
}

impl Envelope {
    fn error_message(&self) -> String {
        match self.data.as_str() {
            Some(reason) => format!("WAQI answered '{}': {reason}", self.status),
            None => format!("WAQI answered '{}'", self.status),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaqiFeed {
    // A number when the station reports, the string "-" when it does not.
    #[serde(default)]
    aqi: Value,
    city: WaqiCity,
    #[serde(default)]
    iaqi: Value,
    time: WaqiTime,
    #[serde(default)]
    dominentpol: Option<String>,
    #[serde(default)]
    attributions: Value,
}

#[derive(Debug, Deserialize)]
struct WaqiCity {
    name: String,
    #[serde(default)]
    geo: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct WaqiTime {
    s: String,
}

#[derive(Debug, Deserialize)]
struct WaqiBoundsStation {
    uid: i64,
    lat: f64,
    lon: f64,
    aqi: String,
    station: WaqiStationName,
}

#[derive(Debug, Deserialize)]
struct WaqiStationName {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaqiSearchHit {
    uid: Option<i64>,
    #[serde(default)]
    aqi: Option<String>,
    #[serde(default)]
    time: WaqiSearchTime,
    station: WaqiStationName,
}

#[derive(Debug, Default, Deserialize)]
struct WaqiSearchTime {
    #[serde(default)]
    stime: String,
}

fn pollutant_value(iaqi: &Value, key: &str) -> Option<f64> {
    iaqi.get(key)?.get("v")?.as_f64()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // MAX can land inside a multibyte character; back up to a boundary.
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
