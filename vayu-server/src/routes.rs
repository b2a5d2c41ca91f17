//! Route table and request handlers.
//!
//! Handlers stay thin: they validate query/body input, call into
//! `vayu-core`, and shape the JSON response. Provider errors are
//! re-worded here because each endpoint reports the same upstream
//! failure differently.

use axum::extract::{Query, State};
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use vayu_core::chat::ChatMessage;
use vayu_core::{advisory, Bounds, Error, FeatureVector, Station};

use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_CITY: &str = "Mumbai";

pub fn build_app(state: AppState) -> Router {
    // The dashboard is served from another origin, so stay permissive.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/aqi", get(aqi))
        .route("/predict", post(predict))
        .route("/chat", post(chat))
        .route("/stations", get(stations))
        .route("/aqi_station", get(aqi_station))
        .route("/search_cities", get(search_cities))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct AqiQuery {
    city: Option<String>,
}

async fn aqi(
    State(state): State<AppState>,
    Query(query): Query<AqiQuery>,
) -> ApiResult<Json<Value>> {
    let city = query.city.as_deref().unwrap_or(DEFAULT_CITY);
    let provider = state.provider()?;
    let feed = provider.city_feed(city).await.map_err(|e| match e {
        Error::NotFound(_) => {
            Error::NotFound(format!("City '{city}' not found in WAQI database"))
        }
        other => other,
    })?;

    let pm2_5 = feed.pm2_5.unwrap_or(0.0);
    let pm10 = feed.pm10.unwrap_or(0.0);
    let main = if pm2_5 > pm10 { "PM2.5" } else { "PM10" };

    Ok(Json(json!({
        "city": feed.name,
        "aqi": feed.aqi,
        "pm2_5": pm2_5,
        "pm10": pm10,
        "main": main,
        "timestamp": feed.timestamp,
        "coordinates": feed.coordinates,
        "source": "WAQI",
        "dominentpol": feed.dominentpol,
    })))
}

/// Body is optional: an absent or non-JSON body classifies the default
/// feature vector instead of failing.
async fn predict(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    let payload = payload.map(|Json(v)| v).unwrap_or_else(|| json!({}));
    let features = FeatureVector::from_json(&payload)?;
    let advisory = advisory::classify(&features, state.model.as_deref());
    Ok(Json(json!({
        "advisory": {
            "code": advisory.code(),
            "text": advisory.text(),
        }
    })))
}

/// Chat never fails: whatever the body looks like, the engine has an answer.
async fn chat(State(state): State<AppState>, payload: Option<Json<ChatMessage>>) -> Json<Value> {
    let request = payload.map(|Json(m)| m).unwrap_or_default();
    let reply = state.chat.reply(&request).await;
    Json(json!({ "reply": reply }))
}

async fn stations(State(state): State<AppState>) -> ApiResult<Json<Vec<Station>>> {
    let provider = state.provider()?;
    let stations = provider
        .stations_in_bounds(&Bounds::INDIA)
        .await
        .map_err(|e| match e {
            Error::NotFound(_) => Error::Upstream("Failed to fetch stations from WAQI".to_owned()),
            other => other,
        })?;
    Ok(Json(stations))
}

#[derive(Debug, Deserialize)]
struct StationQuery {
    uid: Option<String>,
}

async fn aqi_station(
    State(state): State<AppState>,
    Query(query): Query<StationQuery>,
) -> ApiResult<Json<Value>> {
    // Presence is checked before the provider so a missing uid is reported
    // as the caller's mistake even on an unconfigured server. Anything else
    // is forwarded verbatim; WAQI decides whether it names a station.
    let uid = query
        .uid
        .as_deref()
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| Error::InvalidInput("Missing station UID parameter".to_owned()))?;

    let provider = state.provider()?;
    let feed = provider.station_feed(uid).await.map_err(|e| match e {
        Error::NotFound(_) => {
            Error::NotFound("Invalid station UID or data unavailable".to_owned())
        }
        other => other,
    })?;

    Ok(Json(json!({
        "station": feed.name,
        "aqi": feed.aqi,
        "time": feed.timestamp,
        "pollutants": feed.pollutants,
        "coordinates": feed.coordinates,
        "attributions": feed.attributions,
    })))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    keyword: Option<String>,
}

async fn search_cities(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Value>> {
    let keyword = query.keyword.unwrap_or_default();
    if keyword.chars().count() < 2 {
        return Ok(Json(json!({ "cities": [] })));
    }

    let provider = state.provider()?;
    let cities = match provider.search(&keyword).await {
        Ok(cities) => cities,
        // An error envelope means no matches, not a failure.
        Err(Error::NotFound(_)) => Vec::new(),
        Err(other) => return Err(other.into()),
    };
    Ok(Json(json!({ "cities": cities })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use vayu_core::{AirQualityProvider, CityFeed, CitySearchHit, Result};

    use super::*;

    fn sample_feed() -> CityFeed {
        CityFeed {
            name: "Mumbai, India".to_owned(),
            aqi: Some(74),
            pm2_5: Some(31.0),
            pm10: Some(48.0),
            pollutants: json!({ "pm25": { "v": 31.0 }, "pm10": { "v": 48.0 } }),
            timestamp: "2024-05-01 11:00:00".to_owned(),
            coordinates: vec![19.07, 72.87],
            dominentpol: "pm10".to_owned(),
            attributions: json!([{ "name": "CPCB" }]),
        }
    }

    /// Serves canned data and remembers nothing.
    #[derive(Debug)]
    struct StubProvider;

    #[async_trait]
    impl AirQualityProvider for StubProvider {
        async fn city_feed(&self, _city: &str) -> Result<CityFeed> {
            Ok(sample_feed())
        }

        async fn station_feed(&self, uid: &str) -> Result<CityFeed> {
            assert_eq!(uid, "1437");
            Ok(sample_feed())
        }

        async fn stations_in_bounds(&self, bounds: &Bounds) -> Result<Vec<Station>> {
            assert_eq!(bounds.as_latlng(), Bounds::INDIA.as_latlng());
            Ok(vec![Station {
                uid: 1437,
                name: "Bandra, Mumbai".to_owned(),
                lat: 19.07,
                lon: 72.87,
                aqi: "74".to_owned(),
            }])
        }

        async fn search(&self, keyword: &str) -> Result<Vec<CitySearchHit>> {
            assert_eq!(keyword, "mum");
            Ok(vec![CitySearchHit {
                uid: Some(1437),
                name: "Bandra, Mumbai".to_owned(),
                aqi: "74".to_owned(),
                time: "2024-05-01T11:00:00+05:30".to_owned(),
            }])
        }
    }

    /// Fails every call with an error envelope, like WAQI answering
    /// `{"status": "error"}`.
    #[derive(Debug)]
    struct NotFoundProvider;

    #[async_trait]
    impl AirQualityProvider for NotFoundProvider {
        async fn city_feed(&self, _city: &str) -> Result<CityFeed> {
            Err(Error::NotFound("WAQI answered 'error': Unknown station".to_owned()))
        }

        async fn station_feed(&self, _uid: &str) -> Result<CityFeed> {
            Err(Error::NotFound("WAQI answered 'error': Unknown station".to_owned()))
        }

        async fn stations_in_bounds(&self, _bounds: &Bounds) -> Result<Vec<Station>> {
            Err(Error::NotFound("WAQI answered 'error'".to_owned()))
        }

        async fn search(&self, _keyword: &str) -> Result<Vec<CitySearchHit>> {
            Err(Error::NotFound("WAQI answered 'error'".to_owned()))
        }
    }

    /// Proves an endpoint short-circuits before touching the provider.
    #[derive(Debug)]
    struct PanickingProvider;

    #[async_trait]
    impl AirQualityProvider for PanickingProvider {
        async fn city_feed(&self, _city: &str) -> Result<CityFeed> {
            panic!("provider must not be called");
        }

        async fn station_feed(&self, _uid: &str) -> Result<CityFeed> {
            panic!("provider must not be called");
        }

        async fn stations_in_bounds(&self, _bounds: &Bounds) -> Result<Vec<Station>> {
            panic!("provider must not be called");
        }

        async fn search(&self, _keyword: &str) -> Result<Vec<CitySearchHit>> {
            panic!("provider must not be called");
        }
    }

    fn bare_state() -> AppState {
        AppState::new(None, None)
    }

    fn state_with(provider: impl AirQualityProvider + 'static) -> AppState {
        AppState::new(Some(Arc::new(provider)), None)
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let reply = health().await;
        assert_eq!(reply.0, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn aqi_without_token_is_a_config_error() {
        let err = aqi(State(bare_state()), Query(AqiQuery { city: None }))
            .await
            .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn aqi_defaults_to_mumbai_and_shapes_the_feed() {
        let reply = aqi(State(state_with(StubProvider)), Query(AqiQuery { city: None }))
            .await
            .unwrap();
        assert_eq!(reply.0["city"], json!("Mumbai, India"));
        assert_eq!(reply.0["aqi"], json!(74));
        assert_eq!(reply.0["pm2_5"], json!(31.0));
        assert_eq!(reply.0["pm10"], json!(48.0));
        // pm10 dominates here, strictly-greater comparison.
        assert_eq!(reply.0["main"], json!("PM10"));
        assert_eq!(reply.0["source"], json!("WAQI"));
        assert_eq!(reply.0["coordinates"], json!([19.07, 72.87]));
        assert_eq!(reply.0["dominentpol"], json!("pm10"));
    }

    #[tokio::test]
    async fn aqi_rewords_an_unknown_city() {
        let err = aqi(
            State(state_with(NotFoundProvider)),
            Query(AqiQuery {
                city: Some("atlantis".to_owned()),
            }),
        )
        .await
        .unwrap_err();
        assert!(
            matches!(&err.0, Error::NotFound(msg) if msg == "City 'atlantis' not found in WAQI database")
        );
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn predict_works_without_provider_or_model() {
        let reply = predict(State(bare_state()), Some(Json(json!({ "aqi": 350 }))))
            .await
            .unwrap();
        assert_eq!(reply.0["advisory"]["code"], json!(2));
        assert_eq!(
            reply.0["advisory"]["text"],
            json!("Very unhealthy/hazardous — stay indoors and avoid outdoor exertion.")
        );
    }

    #[tokio::test]
    async fn predict_is_deterministic_for_identical_payloads() {
        let state = bare_state();
        let payload = json!({ "aqi": 120, "pm2_5": 60, "age": 45 });
        let first = predict(State(state.clone()), Some(Json(payload.clone())))
            .await
            .unwrap();
        let second = predict(State(state), Some(Json(payload))).await.unwrap();
        assert_eq!(first.0, second.0);
    }

    #[tokio::test]
    async fn predict_rejects_a_non_numeric_field() {
        let err = predict(State(bare_state()), Some(Json(json!({ "aqi": "abc" }))))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn predict_without_body_classifies_the_defaults() {
        let reply = predict(State(bare_state()), None).await.unwrap();
        assert_eq!(reply.0["advisory"]["code"], json!(0));
    }

    #[tokio::test]
    async fn chat_replies_even_to_an_empty_request() {
        let reply = chat(State(bare_state()), None).await;
        let text = reply.0["reply"].as_str().unwrap();
        assert!(text.contains("air quality questions"));
    }

    #[tokio::test]
    async fn chat_greets_back() {
        let request = ChatMessage {
            message: Some("hello".to_owned()),
            user_profile: None,
        };
        let reply = chat(State(bare_state()), Some(Json(request))).await;
        let text = reply.0["reply"].as_str().unwrap();
        assert!(text.starts_with("Hello! 👋"));
    }

    #[tokio::test]
    async fn stations_lists_the_india_bounds() {
        let reply = stations(State(state_with(StubProvider))).await.unwrap();
        assert_eq!(reply.0.len(), 1);
        assert_eq!(reply.0[0].uid, 1437);
        assert_eq!(reply.0[0].name, "Bandra, Mumbai");
    }

    #[tokio::test]
    async fn stations_failure_is_an_upstream_error() {
        let err = stations(State(state_with(NotFoundProvider))).await.unwrap_err();
        assert!(
            matches!(&err.0, Error::Upstream(msg) if msg == "Failed to fetch stations from WAQI")
        );
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn station_requires_a_uid_before_anything_else() {
        // A missing uid outranks the missing token, hence 400 and not 500.
        let err = aqi_station(State(bare_state()), Query(StationQuery { uid: None }))
            .await
            .unwrap_err();
        assert!(matches!(&err.0, Error::InvalidInput(msg) if msg == "Missing station UID parameter"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        // Same for an empty uid, and the provider is never consulted.
        let err = aqi_station(
            State(state_with(PanickingProvider)),
            Query(StationQuery {
                uid: Some(String::new()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn station_forwards_a_non_numeric_uid_and_404s_on_the_envelope() {
        let err = aqi_station(
            State(state_with(NotFoundProvider)),
            Query(StationQuery {
                uid: Some("bandra".to_owned()),
            }),
        )
        .await
        .unwrap_err();
        assert!(
            matches!(&err.0, Error::NotFound(msg) if msg == "Invalid station UID or data unavailable")
        );
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn station_with_a_uid_but_no_token_is_a_config_error() {
        // Only presence is checked locally, so the token check comes next.
        let err = aqi_station(
            State(bare_state()),
            Query(StationQuery {
                uid: Some("bandra".to_owned()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn station_shapes_the_feed() {
        let reply = aqi_station(
            State(state_with(StubProvider)),
            Query(StationQuery {
                uid: Some("1437".to_owned()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(reply.0["station"], json!("Mumbai, India"));
        assert_eq!(reply.0["aqi"], json!(74));
        assert_eq!(reply.0["time"], json!("2024-05-01 11:00:00"));
        assert_eq!(reply.0["pollutants"]["pm25"]["v"], json!(31.0));
        assert_eq!(reply.0["attributions"][0]["name"], json!("CPCB"));
    }

    #[tokio::test]
    async fn station_unknown_uid_is_reworded() {
        let err = aqi_station(
            State(state_with(NotFoundProvider)),
            Query(StationQuery {
                uid: Some("99999".to_owned()),
            }),
        )
        .await
        .unwrap_err();
        assert!(
            matches!(&err.0, Error::NotFound(msg) if msg == "Invalid station UID or data unavailable")
        );
    }

    #[tokio::test]
    async fn short_keyword_short_circuits_before_the_provider() {
        for keyword in [None, Some(String::new()), Some("a".to_owned())] {
            let reply = search_cities(
                State(state_with(PanickingProvider)),
                Query(SearchQuery { keyword }),
            )
            .await
            .unwrap();
            assert_eq!(reply.0, json!({ "cities": [] }));
        }
    }

    #[tokio::test]
    async fn search_lists_matching_stations() {
        let reply = search_cities(
            State(state_with(StubProvider)),
            Query(SearchQuery {
                keyword: Some("mum".to_owned()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(reply.0["cities"][0]["name"], json!("Bandra, Mumbai"));
        assert_eq!(reply.0["cities"][0]["uid"], json!(1437));
        assert_eq!(reply.0["cities"][0]["aqi"], json!("74"));
    }

    #[tokio::test]
    async fn search_error_envelope_means_no_matches() {
        let reply = search_cities(
            State(state_with(NotFoundProvider)),
            Query(SearchQuery {
                keyword: Some("xyzzy".to_owned()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(reply.0, json!({ "cities": [] }));
    }

    #[tokio::test]
    async fn search_without_token_is_a_config_error() {
        let err = search_cities(
            State(bare_state()),
            Query(SearchQuery {
                keyword: Some("mum".to_owned()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
