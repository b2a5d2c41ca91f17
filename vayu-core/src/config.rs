use std::env;
use std::path::PathBuf;

use crate::error::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MODEL_PATH: &str = "model.json";

/// Process configuration, read once at startup and passed into handlers.
///
/// Everything comes from the environment (a `.env` file is loaded by the
/// server binary before this runs). There is no reload: a token added after
/// startup is not picked up.
#[derive(Debug, Clone)]
pub struct Config {
    /// WAQI API token. Endpoints that need the provider answer a
    /// configuration error while this is unset; `/health`, `/predict` and
    /// `/chat` keep working.
    pub waqi_token: Option<String>,

    /// Reserved for the weather overlay; read but not consumed anywhere yet.
    pub openweather_api_key: Option<String>,

    /// Listening port for the HTTP server.
    pub port: u16,

    /// Path to the advisory model artifact. Absence is not an error; the
    /// classifier falls back to its rule set for the process lifetime.
    pub model_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            waqi_token: None,
            openweather_api_key: None,
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl Config {
    /// Build a config from `WAQI_TOKEN`, `OPENWEATHER_API_KEY`, `PORT` and
    /// `MODEL_PATH`. Missing variables take defaults; a `PORT` that is not a
    /// valid port number is a configuration error.
    pub fn from_env() -> Result<Self, Error> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                Error::Config(format!("PORT must be a port number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            waqi_token: non_empty(env::var("WAQI_TOKEN").ok()),
            openweather_api_key: non_empty(env::var("OPENWEATHER_API_KEY").ok()),
            port,
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH)),
        })
    }

    pub fn has_waqi_token(&self) -> bool {
        self.waqi_token.is_some()
    }
}

/// An empty or whitespace-only variable counts as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 4] = ["WAQI_TOKEN", "OPENWEATHER_API_KEY", "PORT", "MODEL_PATH"];

    fn with_unset_env<R>(f: impl FnOnce() -> R) -> R {
        let unset: Vec<(&str, Option<&str>)> = ALL_VARS.iter().map(|v| (*v, None)).collect();
        temp_env::with_vars(unset, f)
    }

    #[test]
    fn from_env_defaults_when_nothing_is_set() {
        with_unset_env(|| {
            let cfg = Config::from_env().expect("defaults must parse");
            assert!(cfg.waqi_token.is_none());
            assert!(cfg.openweather_api_key.is_none());
            assert_eq!(cfg.port, DEFAULT_PORT);
            assert_eq!(cfg.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
            assert!(!cfg.has_waqi_token());
        });
    }

    #[test]
    fn from_env_reads_values() {
        temp_env::with_vars(
            [
                ("WAQI_TOKEN", Some("demo-token")),
                ("OPENWEATHER_API_KEY", Some("ow-key")),
                ("PORT", Some("8080")),
                ("MODEL_PATH", Some("artifacts/tree.json")),
            ],
            || {
                let cfg = Config::from_env().unwrap();
                assert_eq!(cfg.waqi_token.as_deref(), Some("demo-token"));
                assert_eq!(cfg.openweather_api_key.as_deref(), Some("ow-key"));
                assert_eq!(cfg.port, 8080);
                assert_eq!(cfg.model_path, PathBuf::from("artifacts/tree.json"));
                assert!(cfg.has_waqi_token());
            },
        );
    }

    #[test]
    fn empty_token_counts_as_unset() {
        temp_env::with_vars([("WAQI_TOKEN", Some("   "))], || {
            let cfg = Config::from_env().unwrap();
            assert!(cfg.waqi_token.is_none());
        });
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        temp_env::with_vars([("PORT", Some("not-a-port"))], || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, Error::Config(_)));
            assert!(err.to_string().contains("PORT"));
        });
    }
}
