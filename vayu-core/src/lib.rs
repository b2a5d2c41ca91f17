//! Core library for the Vayu air quality service.
//!
//! This crate defines:
//! - Configuration from environment variables
//! - The WAQI provider client behind a trait
//! - The advisory classifier (loaded artifact or fallback rules)
//! - The keyword-driven chat assistant
//! - Shared domain models and the error taxonomy
//!
//! It is used by `vayu-server`, but can also be reused by other binaries or
//! services.

pub mod advisory;
pub mod chat;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use advisory::{Advisory, AdvisoryModel};
pub use chat::{ChatEngine, ChatMessage};
pub use config::Config;
pub use error::{Error, Result};
pub use model::{AqiCategory, CityFeed, CitySearchHit, FeatureVector, Station};
pub use provider::{AirQualityProvider, Bounds};
