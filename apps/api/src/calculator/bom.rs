//! Bill of materials: aggregates fitting results into priced line items.
//!
//! Order of line items: panels (first-seen order), gate hardware per gated run, posts.
//! Gate hinge/latch/hinge-panel lines carry a zero unit price here; live prices are
//! filled in later by a `PriceResolver`.

use crate::calculator::geometry::shared_corner_count;
use crate::calculator::types::{
    BomItemType, BomLineItem, BomResult, CalculatorSettings, FittingResult, GateHardwareConfig,
    GatePlacement, ShapeConfig,
};
use crate::catalogue::{Catalogue, PanelSize};

/// Flat GST rate applied to the subtotal.
pub const TAX_RATE: f64 = 0.10;

/// Builds the BOM for all runs of one shape.
pub fn generate_bom(
    fitting_results: &[FittingResult],
    shape: &ShapeConfig,
    settings: &CalculatorSettings,
    catalogue: &Catalogue,
) -> BomResult {
    let mut items = panel_items(fitting_results);

    for gate in fitting_results.iter().filter_map(|r| r.gate.as_ref()) {
        items.extend(gate_items(
            gate,
            settings.gate_hardware_defaults.as_ref(),
            catalogue,
        ));
    }

    if settings.include_posts {
        items.extend(post_item(fitting_results, shape, settings, catalogue));
    }

    let warnings = fitting_results
        .iter()
        .flat_map(|r| r.warnings.iter().cloned())
        .collect();

    let mut bom = BomResult {
        items,
        subtotal: 0.0,
        tax: 0.0,
        total: 0.0,
        warnings,
    };
    recompute_totals(&mut bom);
    bom
}

/// Recomputes every line total and the subtotal, tax and total, rounded to cents.
pub fn recompute_totals(bom: &mut BomResult) {
    for item in &mut bom.items {
        item.line_total = round_cents(item.unit_price * f64::from(item.quantity));
    }
    bom.subtotal = round_cents(bom.items.iter().map(|i| i.line_total).sum());
    bom.tax = round_cents(bom.subtotal * TAX_RATE);
    bom.total = round_cents(bom.subtotal + bom.tax);
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Panels
// ────────────────────────────────────────────────────────────────────────────

fn panel_items(fitting_results: &[FittingResult]) -> Vec<BomLineItem> {
    let mut counts: Vec<(&'static PanelSize, u32)> = Vec::new();

    for placement in fitting_results.iter().flat_map(|r| &r.panels) {
        match counts
            .iter_mut()
            .find(|(panel, _)| panel.handle == placement.panel.handle)
        {
            Some((_, qty)) => *qty += 1,
            None => counts.push((placement.panel, 1)),
        }
    }

    counts
        .into_iter()
        .map(|(panel, quantity)| BomLineItem {
            item_type: BomItemType::Panel,
            handle: panel.handle.to_string(),
            description: format!("12mm Glass Panel {}mm × {}mm", panel.width, panel.height),
            quantity,
            unit_price: panel.price,
            line_total: round_cents(panel.price * f64::from(quantity)),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Gate hardware
// ────────────────────────────────────────────────────────────────────────────

fn gate_items(
    gate: &GatePlacement,
    hardware: Option<&GateHardwareConfig>,
    catalogue: &Catalogue,
) -> Vec<BomLineItem> {
    let mut items = Vec::new();

    let override_handle = hardware.and_then(|h| h.gate_panel_handle.as_deref());
    if let Some(panel) = catalogue.gate_panel_for(gate.width, override_handle) {
        items.push(BomLineItem {
            item_type: BomItemType::GatePanel,
            handle: panel.handle.to_string(),
            description: format!(
                "8mm Glass Gate Panel {}mm × {}mm",
                panel.width, panel.height
            ),
            quantity: 1,
            unit_price: panel.price,
            line_total: panel.price,
        });
    }

    let Some(hardware) = hardware else {
        return items;
    };

    if let Some(handle) = &hardware.hinge_handle {
        items.push(placeholder_item(
            BomItemType::Hinge,
            handle,
            catalogue
                .hardware_item(handle)
                .map(|h| h.description)
                .unwrap_or("Gate Hinge (pair)"),
        ));
    }

    if let Some(handle) = &hardware.latch_handle {
        items.push(placeholder_item(
            BomItemType::Latch,
            handle,
            catalogue
                .hardware_item(handle)
                .map(|h| h.description)
                .unwrap_or("Gate Latch Kit"),
        ));
    }

    if hardware.requires_hinge_panel {
        if let Some(handle) = &hardware.hinge_panel_handle {
            items.push(placeholder_item(BomItemType::HingePanel, handle, "Hinge Panel"));
        }
    }

    items
}

/// A single-quantity line whose price is resolved downstream.
fn placeholder_item(item_type: BomItemType, handle: &str, description: &str) -> BomLineItem {
    BomLineItem {
        item_type,
        handle: handle.to_string(),
        description: description.to_string(),
        quantity: 1,
        unit_price: 0.0,
        line_total: 0.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Posts
// ────────────────────────────────────────────────────────────────────────────

/// One spigot line. Each shared corner was counted by both adjacent runs, so the
/// shape's corner count is subtracted once.
fn post_item(
    fitting_results: &[FittingResult],
    shape: &ShapeConfig,
    settings: &CalculatorSettings,
    catalogue: &Catalogue,
) -> Option<BomLineItem> {
    let counted: usize = fitting_results.iter().map(|r| r.posts.len()).sum();
    let quantity = counted.saturating_sub(shared_corner_count(shape));
    if quantity == 0 {
        return None;
    }

    let post = catalogue.post_or_default(settings.default_post_handle.as_deref())?;
    let quantity = u32::try_from(quantity).ok()?;

    Some(BomLineItem {
        item_type: BomItemType::Spigot,
        handle: post.handle.to_string(),
        description: post.description.to_string(),
        quantity,
        unit_price: post.price,
        line_total: round_cents(post.price * f64::from(quantity)),
    })
}
