// Shared server state

use crate::services::{AppConfig, ClassifierClient, Humanizer};

pub struct AppState {
    pub config: AppConfig,
    pub humanizer: Humanizer,
    pub classifier: ClassifierClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let humanizer = Humanizer::new().with_strict_citations(config.humanize.strict_citations);
        let classifier = ClassifierClient::new(&config.classifier);
        Self {
            config,
            humanizer,
            classifier,
        }
    }
}
