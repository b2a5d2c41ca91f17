use std::sync::Arc;

use vayu_core::advisory::AdvisoryModel;
use vayu_core::chat::ChatEngine;
use vayu_core::provider::AirQualityProvider;
use vayu_core::Error;

/// Shared handler state, assembled once at startup and cloned per request.
///
/// Both the provider and the model are optional: the server starts without a
/// WAQI token (live endpoints answer with a configuration error, chat serves
/// placeholder readings) and without a model artifact (advisories come from
/// the fallback rules).
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Option<Arc<dyn AirQualityProvider>>,
    pub model: Option<Arc<AdvisoryModel>>,
    pub chat: ChatEngine,
}

impl AppState {
    pub fn new(
        provider: Option<Arc<dyn AirQualityProvider>>,
        model: Option<AdvisoryModel>,
    ) -> Self {
        let chat = ChatEngine::new(provider.clone());
        Self {
            provider,
            model: model.map(Arc::new),
            chat,
        }
    }

    /// The live-data provider, or the error every provider-backed endpoint
    /// answers with when no WAQI token was configured.
    pub fn provider(&self) -> Result<&Arc<dyn AirQualityProvider>, Error> {
        self.provider
            .as_ref()
            .ok_or_else(|| Error::Config("WAQI_TOKEN not configured".to_owned()))
    }
}
