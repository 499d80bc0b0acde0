// Panel layout calculator
// Implements: shape decomposition, per-run panel fitting, gap validation, BOM aggregation.
// Pure and synchronous. Handlers run `calculate` inside tokio::task::spawn_blocking.

pub mod bom;
pub mod fitter;
pub mod geometry;
pub mod handlers;
pub mod pricing;
pub mod types;
pub mod validator;

use tracing::info;

pub use geometry::ShapeError;
pub use pricing::{CataloguePriceResolver, PriceResolver};
pub use types::{CalculatorInput, CalculatorOutput, CalculatorSettings, ShapeConfig};

use crate::catalogue::Catalogue;

/// Runs the whole pipeline for one shape: decompose, fit every run, aggregate the BOM.
///
/// Only a structurally invalid shape is an error. A run that cannot be fitted comes
/// back with `success = false` and warnings.
pub fn calculate(
    input: &CalculatorInput,
    catalogue: &Catalogue,
) -> Result<CalculatorOutput, ShapeError> {
    let runs = geometry::decompose(&input.shape)?;

    let mut fitting_results: Vec<_> = runs
        .iter()
        .map(|run| fitter::fit_run(run, &input.settings, catalogue))
        .collect();
    geometry::mark_shared_corners(&input.shape, &mut fitting_results);

    let bom = bom::generate_bom(&fitting_results, &input.shape, &input.settings, catalogue);
    let success = fitting_results.iter().all(|r| r.success);

    info!(
        runs = runs.len(),
        success,
        line_items = bom.items.len(),
        total = bom.total,
        "Calculation complete"
    );

    Ok(CalculatorOutput {
        runs,
        fitting_results,
        bom,
        success,
    })
}
