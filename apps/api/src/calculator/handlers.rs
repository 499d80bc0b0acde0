use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::calculator::{
    calculate, CalculatorInput, CalculatorOutput, CalculatorSettings, ShapeConfig,
};
use crate::catalogue::Catalogue;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub shape: ShapeConfig,
    /// Falls back to the service defaults when absent.
    #[serde(default)]
    pub settings: Option<CalculatorSettings>,
}

/// POST /api/v1/calculate
pub async fn handle_calculate(
    State(state): State<AppState>,
    Json(req): Json<CalculateRequest>,
) -> Result<Json<CalculatorOutput>, AppError> {
    let settings = req
        .settings
        .unwrap_or_else(|| state.default_settings.clone());
    validate_settings(&settings)?;

    let input = CalculatorInput {
        shape: req.shape,
        settings,
    };
    let catalogue = state.catalogue;

    // CPU-bound fitting loop runs off the async executor.
    let mut output = tokio::task::spawn_blocking(move || calculate(&input, catalogue))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in calculate: {e}")))??;

    state.price_resolver.resolve(&mut output.bom).await?;

    info!(
        success = output.success,
        runs = output.runs.len(),
        total = output.bom.total,
        "Calculate request served"
    );
    Ok(Json(output))
}

/// GET /api/v1/catalogue
pub async fn handle_get_catalogue(State(state): State<AppState>) -> Json<&'static Catalogue> {
    Json(state.catalogue)
}

/// GET /api/v1/settings/defaults
pub async fn handle_default_settings(State(state): State<AppState>) -> Json<CalculatorSettings> {
    Json(state.default_settings.clone())
}

fn validate_settings(settings: &CalculatorSettings) -> Result<(), AppError> {
    if !settings.post_width.is_finite() || settings.post_width < 0.0 {
        return Err(AppError::Validation(format!(
            "post_width must be a non-negative number of mm, got {}",
            settings.post_width
        )));
    }
    if !settings.max_gap_width.is_finite() || settings.max_gap_width <= 0.0 {
        return Err(AppError::Validation(format!(
            "max_gap_width must be a positive number of mm, got {}",
            settings.max_gap_width
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&CalculatorSettings::default()).is_ok());
    }

    #[test]
    fn test_negative_post_width_rejected() {
        let settings = CalculatorSettings {
            post_width: -1.0,
            ..CalculatorSettings::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_post_width_allowed() {
        let settings = CalculatorSettings {
            post_width: 0.0,
            ..CalculatorSettings::default()
        };
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_non_positive_max_gap_rejected() {
        for max_gap_width in [0.0, -5.0, f64::INFINITY] {
            let settings = CalculatorSettings {
                max_gap_width,
                ..CalculatorSettings::default()
            };
            assert!(
                validate_settings(&settings).is_err(),
                "max_gap_width {max_gap_width}"
            );
        }
    }

    #[test]
    fn test_request_without_settings() {
        let req: CalculateRequest = serde_json::from_value(serde_json::json!({
            "shape": { "shape": "inline", "length": 3000.0 }
        }))
        .unwrap();
        assert!(req.settings.is_none());
    }
}
