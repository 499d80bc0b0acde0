//! Price resolution: pluggable, trait-based fill-in for BOM lines the engine leaves at zero.
//!
//! Default: `CataloguePriceResolver` (static catalogue prices, no I/O).
//! A live storefront resolver implements the same trait.
//!
//! `AppState` holds an `Arc<dyn PriceResolver>`, chosen at startup.

use async_trait::async_trait;
use tracing::debug;

use crate::calculator::bom::recompute_totals;
use crate::calculator::types::{BomItemType, BomResult};
use crate::catalogue::Catalogue;
use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Fills in unit prices on a BOM and recomputes its totals.
///
/// Carried in `AppState` as `Arc<dyn PriceResolver>`.
#[async_trait]
pub trait PriceResolver: Send + Sync {
    async fn resolve(&self, bom: &mut BomResult) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// CataloguePriceResolver
// ────────────────────────────────────────────────────────────────────────────

/// Prices gate hardware and hinge panels from the static catalogue.
/// Unknown handles stay at zero.
pub struct CataloguePriceResolver {
    pub catalogue: &'static Catalogue,
}

impl CataloguePriceResolver {
    pub fn new(catalogue: &'static Catalogue) -> Self {
        CataloguePriceResolver { catalogue }
    }

    fn lookup(&self, item_type: BomItemType, handle: &str) -> Option<f64> {
        match item_type {
            BomItemType::Hinge | BomItemType::Latch => {
                self.catalogue.hardware_item(handle).map(|h| h.price)
            }
            BomItemType::HingePanel => self.catalogue.hinge_panel(handle).map(|p| p.price),
            BomItemType::Panel | BomItemType::GatePanel | BomItemType::Spigot => None,
        }
    }
}

#[async_trait]
impl PriceResolver for CataloguePriceResolver {
    async fn resolve(&self, bom: &mut BomResult) -> Result<(), AppError> {
        let mut resolved = 0usize;
        for item in bom.items.iter_mut().filter(|i| i.unit_price == 0.0) {
            if let Some(price) = self.lookup(item.item_type, &item.handle) {
                item.unit_price = price;
                resolved += 1;
            }
        }
        recompute_totals(bom);
        debug!(resolved, total = bom.total, "BOM prices resolved from catalogue");
        Ok(())
    }
}
