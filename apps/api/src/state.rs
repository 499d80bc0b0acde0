use std::sync::Arc;

use crate::calculator::{CalculatorSettings, PriceResolver};
use crate::catalogue::Catalogue;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Settings applied when a calculate request carries none.
    pub default_settings: CalculatorSettings,
    pub catalogue: &'static Catalogue,
    /// Pluggable price resolver. Default: CataloguePriceResolver.
    pub price_resolver: Arc<dyn PriceResolver>,
}

impl AppState {
    pub fn new(
        config: &Config,
        catalogue: &'static Catalogue,
        price_resolver: Arc<dyn PriceResolver>,
    ) -> Self {
        AppState {
            default_settings: config.default_settings(),
            catalogue,
            price_resolver,
        }
    }
}
