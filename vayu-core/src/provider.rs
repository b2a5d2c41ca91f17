use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::model::{CityFeed, CitySearchHit, Station};
use crate::provider::waqi::WaqiProvider;

pub mod waqi;

/// A rectangular map region, south-west corner first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
}

impl Bounds {
    /// The monitoring region the station listing defaults to.
    pub const INDIA: Bounds = Bounds { lat1: 8.0, lon1: 68.0, lat2: 37.0, lon2: 97.0 };

    /// Renders as `lat1,lon1,lat2,lon2`, the form the upstream API expects.
    pub fn as_latlng(&self) -> String {
        format!("{},{},{},{}", self.lat1, self.lon1, self.lat2, self.lon2)
    }
}

#[async_trait]
pub trait AirQualityProvider: Send + Sync + Debug {
    /// Live feed for the monitoring station closest to a city name.
    async fn city_feed(&self, city: &str) -> Result<CityFeed>;

    /// Live feed for a station addressed by its uid. The uid is forwarded
    /// verbatim; the upstream decides whether it names a station.
    async fn station_feed(&self, uid: &str) -> Result<CityFeed>;

    /// Every station inside the given map bounds.
    async fn stations_in_bounds(&self, bounds: &Bounds) -> Result<Vec<Station>>;

    /// Stations whose name matches a free-text keyword.
    async fn search(&self, keyword: &str) -> Result<Vec<CitySearchHit>>;
}

/// Construct the live provider from config. `None` means no upstream token
/// is configured and the service runs degraded: live endpoints answer with
/// a configuration error while chat falls back to placeholder readings.
pub fn provider_from_config(config: &Config) -> Option<Arc<dyn AirQualityProvider>> {
    config
        .waqi_token
        .as_deref()
        .map(|token| Arc::new(WaqiProvider::new(token.to_owned())) as Arc<dyn AirQualityProvider>)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn india_bounds_render_as_latlng() {
        assert_eq!(Bounds::INDIA.as_latlng(), "8,68,37,97");
    }

    #[test]
    fn fractional_bounds_keep_their_precision() {
        let bounds = Bounds { lat1: 8.5, lon1: 68.25, lat2: 37.0, lon2: 97.0 };
        assert_eq!(bounds.as_latlng(), "8.5,68.25,37,97");
    }

    #[test]
    fn no_token_means_no_provider() {
        let cfg = Config::default();
        assert!(provider_from_config(&cfg).is_none());
    }

    #[test]
    fn provider_is_built_when_token_present() {
        let cfg = Config { waqi_token: Some("demo".to_owned()), ..Config::default() };
        assert!(provider_from_config(&cfg).is_some());
    }
}
