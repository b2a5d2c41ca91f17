//! Keyword-driven chat assistant.
//!
//! A message is matched against an ordered predicate chain; the first hit
//! decides the reply. Most intents answer with canned text from [`replies`];
//! the live-AQI intent queries the provider per extracted city and never
//! fails, substituting placeholder readings when a lookup does.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use rand::Rng;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::model::{self, AqiCategory};
use crate::provider::AirQualityProvider;

mod replies;

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good evening",
    "good afternoon",
    "greetings",
];

/// A message containing any of these is a question, not a greeting.
const GREETING_EXCLUSIONS: &[&str] = &["aqi", "air", "quality", "pollution", "city"];

/// Capitalized runs that are sentence furniture rather than place names.
const EXTRACTION_STOP_WORDS: &[&str] = &[
    "What", "The", "Is", "In", "For", "At", "Of", "And", "Or", "From", "To", "Check", "Show",
    "Tell", "Me", "About", "Today", "Now",
];

const DEFAULT_CITY: &str = "Mumbai";
const MAX_CITIES: usize = 3;
const CITY_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// One cigarette is roughly this much PM2.5 exposure over 24 hours.
const PM25_PER_CIGARETTE: f64 = 22.0;

/// Inbound chat request; every field is optional and loosely typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatMessage {
    pub message: Option<String>,
    #[serde(rename = "userProfile")]
    pub user_profile: Option<UserProfile>,
}

/// Optional user context sent by the front-end. Values arrive as whatever
/// JSON the client produced; accessors coerce leniently and fall back to
/// defaults instead of erroring.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub age: Value,
    pub asthma: Value,
    pub location: Value,
    pub aqi: Value,
    pub pm2_5: Value,
}

impl UserProfile {
    fn location(&self) -> Option<&str> {
        self.location.as_str().filter(|s| !s.is_empty())
    }

    fn aqi_value(&self) -> f64 {
        model::coerce_f64(Some(&self.aqi), 100.0, "aqi").unwrap_or(100.0)
    }

    fn age_value(&self) -> i64 {
        model::coerce_i64(Some(&self.age), 30, "age").unwrap_or(30)
    }

    fn has_asthma(&self) -> bool {
        model::truthy(Some(&self.asthma))
    }
}

/// What the user is asking for. Order of the variants mirrors the order the
/// predicates are evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatIntent {
    Greeting,
    Help,
    AqiCategories,
    Pm25,
    Pm10,
    Protection,
    Cigarettes,
    HealthEffects,
    BestCities,
    WorstCities,
    LiveAqi,
    Advice,
    Fallback,
}

/// Classify a message. Matching is substring-based over the lowercased text;
/// the first predicate that hits wins, so a message mentioning both "help"
/// and "aqi" resolves to [`ChatIntent::Help`].
pub fn detect_intent(message: &str) -> ChatIntent {
    let message = message.to_lowercase();
    let message = message.as_str();

    if is_greeting(message) {
        return ChatIntent::Greeting;
    }
    if contains_any(message, &["help", "what can you do", "how can you help"]) {
        return ChatIntent::Help;
    }
    if contains_any(message, &["aqi category", "aqi level", "what is aqi", "explain aqi"]) {
        return ChatIntent::AqiCategories;
    }
    if contains_any(message, &["pm2.5", "pm 2.5", "particulate matter"]) {
        return ChatIntent::Pm25;
    }
    if contains_any(message, &["pm10", "pm 10"]) {
        return ChatIntent::Pm10;
    }
    if contains_any(message, &["protect", "safety", "precaution", "how to stay safe"]) {
        return ChatIntent::Protection;
    }
    if contains_any(message, &["cigarette", "smoking"]) {
        return ChatIntent::Cigarettes;
    }
    if contains_any(message, &["health effect", "health impact", "harmful", "disease"]) {
        return ChatIntent::HealthEffects;
    }
    if contains_any(message, &["best city", "cleanest city", "least polluted"]) {
        return ChatIntent::BestCities;
    }
    if contains_any(message, &["worst city", "most polluted", "dirtiest city"]) {
        return ChatIntent::WorstCities;
    }
    if contains_any(message, &["aqi", "air quality", "pollution"]) {
        return ChatIntent::LiveAqi;
    }
    if contains_any(message, &["should i", "advice", "recommend", "safe to go out"]) {
        return ChatIntent::Advice;
    }

    ChatIntent::Fallback
}

fn contains_any(message: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| message.contains(needle))
}

/// A greeting is either exactly a greeting word, or a short message (three
/// words or fewer) containing one without any air-quality keyword.
fn is_greeting(message: &str) -> bool {
    let exact = GREETINGS.iter().any(|g| message.trim() == *g);
    let short = GREETINGS.iter().any(|g| message.contains(g))
        && message.split_whitespace().count() <= 3
        && !contains_any(message, GREETING_EXCLUSIONS);
    exact || short
}

/// Answers chat messages. Holds the provider handle when live lookups are
/// configured; without one, live queries serve placeholder readings.
#[derive(Debug, Clone)]
pub struct ChatEngine {
    provider: Option<Arc<dyn AirQualityProvider>>,
}

impl ChatEngine {
    pub fn new(provider: Option<Arc<dyn AirQualityProvider>>) -> Self {
        Self { provider }
    }

    /// Produce a reply. This is total: any input, including a missing
    /// message or a malformed profile, maps to some reply string.
    pub async fn reply(&self, request: &ChatMessage) -> String {
        let message = request.message.as_deref().unwrap_or("").to_lowercase();
        let default_profile = UserProfile::default();
        let profile = request.user_profile.as_ref().unwrap_or(&default_profile);

        match detect_intent(&message) {
            ChatIntent::Greeting => replies::GREETING.to_owned(),
            ChatIntent::Help => replies::HELP.to_owned(),
            ChatIntent::AqiCategories => replies::AQI_CATEGORIES.to_owned(),
            ChatIntent::Pm25 => replies::PM25_EXPLAINER.to_owned(),
            ChatIntent::Pm10 => replies::PM10_EXPLAINER.to_owned(),
            ChatIntent::Protection => replies::PROTECTION_TIPS.to_owned(),
            ChatIntent::Cigarettes => replies::CIGARETTE_EQUIVALENT.to_owned(),
            ChatIntent::HealthEffects => replies::HEALTH_EFFECTS.to_owned(),
            ChatIntent::BestCities => replies::BEST_CITIES.to_owned(),
            ChatIntent::WorstCities => replies::WORST_CITIES.to_owned(),
            ChatIntent::LiveAqi => self.live_aqi_reply(&message, profile).await,
            ChatIntent::Advice => advice_reply(profile),
            ChatIntent::Fallback => replies::FALLBACK_MENU.to_owned(),
        }
    }

    async fn live_aqi_reply(&self, message: &str, profile: &UserProfile) -> String {
        let cities = extract_cities(message, profile.location());
        let mut blocks = Vec::with_capacity(cities.len());
        for city in &cities {
            blocks.push(self.city_reading(city).await.render());
        }
        blocks.join("\n\n---\n\n")
    }

    async fn city_reading(&self, city: &str) -> CityReading {
        if let Some(provider) = &self.provider {
            match tokio::time::timeout(CITY_FETCH_TIMEOUT, provider.city_feed(city)).await {
                Ok(Ok(feed)) => {
                    if let Some(aqi) = feed.aqi {
                        return CityReading::from_feed(feed.name, aqi, feed.pm2_5, feed.pm10);
                    }
                    tracing::warn!(city, "feed has no numeric AQI, substituting placeholder");
                }
                Ok(Err(e)) => {
                    tracing::warn!(city, error = %e, "live AQI lookup failed, substituting placeholder");
                }
                Err(_) => {
                    tracing::warn!(city, "live AQI lookup timed out, substituting placeholder");
                }
            }
        }
        placeholder_reading(city, &mut rand::thread_rng())
    }
}

/// One city's numbers, ready to render into a reply block.
#[derive(Debug, Clone, PartialEq)]
struct CityReading {
    name: String,
    aqi: i64,
    pm2_5: f64,
    pm10: f64,
}

impl CityReading {
    fn from_feed(name: String, aqi: i64, pm2_5: Option<f64>, pm10: Option<f64>) -> Self {
        // A zero reading means the station did not report that pollutant;
        // estimate from the AQI instead.
        let pm2_5 = pm2_5
            .filter(|v| *v != 0.0)
            .unwrap_or_else(|| round1(aqi as f64 * 0.5));
        let pm10 = pm10.filter(|v| *v != 0.0).unwrap_or_else(|| round1(pm2_5 * 1.5));
        Self { name, aqi, pm2_5, pm10 }
    }

    fn render(&self) -> String {
        let category = AqiCategory::from_aqi(self.aqi as f64);
        let cigarettes = round1(self.pm2_5 / PM25_PER_CIGARETTE);
        format!(
            "**{} Air Quality:**\n📊 **AQI:** {} ({})\n🔬 **PM2.5:** {} μg/m³\n🔬 **PM10:** {} μg/m³\n🚬 **Cigarette Equivalent:** {} per day\n💡 **Advice:** {}",
            self.name,
            self.aqi,
            category.label(),
            python_float(self.pm2_5),
            python_float(self.pm10),
            python_float(cigarettes),
            category.advice(),
        )
    }
}

/// Synthetic reading for cities the live lookup cannot serve.
fn placeholder_reading(city: &str, rng: &mut impl Rng) -> CityReading {
    let aqi = rng.gen_range(50..=200);
    let pm2_5 = round1(aqi as f64 * 0.5);
    let pm10 = round1(pm2_5 * 1.5);
    CityReading {
        name: python_title_case(city),
        aqi,
        pm2_5,
        pm10,
    }
}

fn advice_reply(profile: &UserProfile) -> String {
    let aqi = profile.aqi_value();
    let age = profile.age_value();
    let asthma = profile.has_asthma();

    let base = if aqi <= 50.0 {
        replies::ADVICE_GOOD
    } else if aqi <= 100.0 {
        replies::ADVICE_MODERATE
    } else if aqi <= 150.0 {
        // The borderline bucket differentiates sensitive users.
        if asthma || age > 60 || age < 12 {
            replies::ADVICE_SENSITIVE_LIMIT
        } else {
            replies::ADVICE_SENSITIVE_CAUTION
        }
    } else if aqi <= 200.0 {
        replies::ADVICE_UNHEALTHY
    } else if aqi <= 300.0 {
        replies::ADVICE_VERY_UNHEALTHY
    } else {
        replies::ADVICE_HAZARDOUS
    };

    let mut advice = base.to_owned();
    if asthma {
        advice.push_str(replies::ASTHMA_ADDENDUM);
    }
    if age > 60 {
        advice.push_str(replies::SENIOR_ADDENDUM);
    }
    advice
}

// Runs of capitalized words in the title-cased message, e.g. "The Aqi In Delhi".
static CITY_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\b").expect("valid city-run pattern")
});

/// Best-effort city extraction from a lowercased message.
///
/// Title-cases the text, collects capitalized runs that are not stop words,
/// and falls back first to whatever follows a locating preposition, then to
/// the profile location, then to the default city. Deliberately inherits the
/// quirks of the shipped heuristic (runs swallow adjacent words, so
/// "what's the aqi in delhi" extracts "The Aqi In Delhi"); front-ends and
/// the placeholder path rely on that shape.
fn extract_cities(message: &str, profile_location: Option<&str>) -> Vec<String> {
    let titled = python_title_case(message);
    let mut cities: Vec<String> = CITY_RUN
        .find_iter(&titled)
        .map(|m| m.as_str().to_owned())
        .filter(|run| !EXTRACTION_STOP_WORDS.contains(&run.as_str()))
        .collect();

    if cities.is_empty() {
        let words: Vec<&str> = message.split_whitespace().collect();
        for (i, word) in words.iter().enumerate() {
            if matches!(*word, "in" | "for" | "at" | "of") && i + 1 < words.len() {
                let rest = words[i + 1..].join(" ");
                cities.push(rest.trim_matches(|c| matches!(c, '?' | ',' | '.')).to_owned());
                break;
            }
        }
    }

    if cities.is_empty() {
        cities.push(profile_location.unwrap_or(DEFAULT_CITY).to_owned());
    }

    cities.truncate(MAX_CITIES);
    cities
}

/// `str.title()` the way Python does it: uppercase every letter that follows
/// a non-letter, lowercase the rest ("what's" becomes "What'S").
fn python_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_is_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(ch);
            prev_is_alpha = false;
        }
    }
    out
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Floats the way Python prints them: integral values keep a ".0" instead
/// of collapsing to a bare integer.
fn python_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
