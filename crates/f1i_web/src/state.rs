use std::sync::Arc;

use f1i_core::InferenceModel;
use f1i_news::NewsManager;
use f1i_openf1::OpenF1Client;

/// Shared handler state. The inference model is optional: without an API
/// key the lookup endpoints keep working and only analysis is disabled.
pub struct AppState {
    pub openf1: OpenF1Client,
    pub news: NewsManager,
    pub inference: Option<Arc<dyn InferenceModel>>,
}
