//! Run fitter: chooses a panel count and catalogue sizes for one straight run.
//!
//! # Algorithm
//! 1. Reject runs too short for one panel between two posts.
//! 2. A gated run is split at the gate into left and right sections, each fitted on
//!    its own, then merged with two posts flanking the gate.
//! 3. For a gate-free section, panel counts are tried from a lower to an upper bound in
//!    increasing order; the first count giving a compliant layout wins (fewest panels).
//! 4. For a given count, the panel budget `L - (N+1) × post_width` is split evenly and
//!    each panel is snapped *down* to the catalogue. The last panel absorbs the remainder.
//! 5. The leftover length is spread as equal gaps; the last gap absorbs rounding so
//!    panels + gaps sum exactly to the section length. One post sits in every gap.
//!
//! Everything here is pure and deterministic.

use tracing::{debug, warn};

use crate::calculator::types::{
    CalculatorSettings, FittingResult, Gap, GateConfig, GatePlacement, PanelPlacement,
    PostPlacement, Run, ValidationWarning, WarningKind,
};
use crate::calculator::validator::{validate_gaps, validate_gate_position, validate_run_length};
use crate::catalogue::{Catalogue, PanelSize};

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Fits panels into a single run.
pub fn fit_run(run: &Run, settings: &CalculatorSettings, catalogue: &Catalogue) -> FittingResult {
    let length_warnings =
        validate_run_length(run.length, settings.post_width, catalogue.min_panel_width());
    if !length_warnings.is_empty() {
        return FittingResult::failed(run.id.as_str(), length_warnings);
    }

    match &run.gate {
        Some(gate) => fit_run_with_gate(run, gate, settings, catalogue),
        None => fit_section(&run.id, run.length, 0.0, settings, catalogue),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gate handling
// ────────────────────────────────────────────────────────────────────────────

fn fit_run_with_gate(
    run: &Run,
    gate: &GateConfig,
    settings: &CalculatorSettings,
    catalogue: &Catalogue,
) -> FittingResult {
    let gate_warnings = validate_gate_position(gate, run.length);
    if !gate_warnings.is_empty() {
        return FittingResult::failed(run.id.as_str(), gate_warnings);
    }

    let gate_start = gate.position;
    let gate_end = gate.end();
    let left_length = gate_start;
    let right_length = run.length - gate_end;

    let left = if left_length > 0.0 {
        fit_section(&format!("{}-left", run.id), left_length, 0.0, settings, catalogue)
    } else {
        FittingResult::empty(format!("{}-left", run.id))
    };

    let right = if right_length > 0.0 {
        fit_section(
            &format!("{}-right", run.id),
            right_length,
            gate_end,
            settings,
            catalogue,
        )
    } else {
        FittingResult::empty(format!("{}-right", run.id))
    };

    // Gate-flanking posts sit at the exact gate edges and belong to neither section.
    let mut posts = left.posts;
    posts.push(PostPlacement {
        position_mm: gate_start,
        shared: false,
    });
    posts.push(PostPlacement {
        position_mm: gate_end,
        shared: false,
    });
    posts.extend(right.posts);

    let mut panels = left.panels;
    panels.extend(right.panels);
    let mut gaps = left.gaps;
    gaps.extend(right.gaps);
    let mut warnings = left.warnings;
    warnings.extend(right.warnings);

    FittingResult {
        run_id: run.id.clone(),
        success: left.success && right.success,
        panels,
        gaps,
        gate: Some(GatePlacement {
            start_mm: gate_start,
            end_mm: gate_end,
            width: gate.width,
            panel_type: gate.panel_type,
        }),
        posts,
        warnings,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section fitting (panel-count search)
// ────────────────────────────────────────────────────────────────────────────

/// Fits a gate-free section of `length` mm starting at `offset` mm along the run.
fn fit_section(
    section_id: &str,
    length: f64,
    offset: f64,
    settings: &CalculatorSettings,
    catalogue: &Catalogue,
) -> FittingResult {
    let (min_panels, max_panels) = panel_count_bounds(length, settings, catalogue);

    for count in min_panels..=max_panels {
        let attempt =
            try_fit_with_panel_count(section_id, length, offset, count, settings, catalogue);
        if let Some(result) = attempt {
            debug!(
                section = section_id,
                length,
                panels = count,
                panel_width = result.total_panel_width(),
                gap_width = result.total_gap_width(),
                "Fitted section"
            );
            return result;
        }
    }

    warn!(
        section = section_id,
        length,
        min_panels,
        max_panels,
        "No compliant panel layout found"
    );

    FittingResult::failed(
        section_id,
        vec![ValidationWarning::error(
            WarningKind::NoValidFit,
            format!(
                "Cannot fit panels into {length}mm section while keeping gaps <= {}mm. \
                 Try adjusting the run length.",
                settings.max_gap_width
            ),
        )
        .at(offset)],
    )
}

/// Upper limit on the panel-count search for one section.
const MAX_PANELS_PER_SECTION: usize = 1_000;

/// Inclusive `(min, max)` panel counts worth trying for a section.
///
/// The lower bound assumes every panel is the largest catalogue size with a full
/// tolerance gap and post beside it; the upper bound assumes the smallest size
/// with only a post beside it. Both are clamped to `MAX_PANELS_PER_SECTION`.
fn panel_count_bounds(
    length: f64,
    settings: &CalculatorSettings,
    catalogue: &Catalogue,
) -> (usize, usize) {
    let cap = MAX_PANELS_PER_SECTION as f64;
    let widest_span =
        catalogue.max_panel_width() + settings.max_gap_width + settings.post_width;
    let narrowest_span = catalogue.min_panel_width() + settings.post_width;

    let min = (length / widest_span).ceil().max(1.0).min(cap);
    let max = if narrowest_span > 0.0 {
        (length / narrowest_span).ceil().min(cap).max(min)
    } else {
        min
    };
    (min as usize, max as usize)
}

/// Attempts a layout with exactly `count` panels. `None` means this count is infeasible.
fn try_fit_with_panel_count(
    section_id: &str,
    length: f64,
    offset: f64,
    count: usize,
    settings: &CalculatorSettings,
    catalogue: &Catalogue,
) -> Option<FittingResult> {
    let gap_count = (count + 1) as f64;

    // Posts consume their own width; the rest is panels plus elastic gap.
    let panel_budget = length - gap_count * settings.post_width;
    if panel_budget <= 0.0 {
        return None;
    }

    let target_width = panel_budget / count as f64;
    let panels = select_panels(target_width, count, panel_budget, catalogue)?;

    let total_panel_width: f64 = panels.iter().map(|p| p.width_mm()).sum();
    let gap_width = (length - total_panel_width) / gap_count;
    if gap_width < 0.0 || gap_width > settings.max_gap_width {
        return None;
    }

    let placements = build_placements(&panels, gap_width, offset);
    let gaps = build_gaps(&panels, gap_width, offset, length, settings.max_gap_width);
    let posts = build_posts(&gaps);
    let warnings = validate_gaps(&gaps, settings.max_gap_width);

    Some(FittingResult {
        run_id: section_id.to_string(),
        success: warnings.is_empty(),
        panels: placements,
        gaps,
        gate: None,
        posts,
        warnings,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Panel selection
// ────────────────────────────────────────────────────────────────────────────

/// Picks `count` catalogue panels whose widths sum to at most `budget`.
///
/// Every panel but the last snaps `target_width` down to the catalogue; the last
/// snaps whatever budget remains. If the sum still overshoots, the last panel is
/// shrunk by the overshoot and re-snapped.
fn select_panels(
    target_width: f64,
    count: usize,
    budget: f64,
    catalogue: &Catalogue,
) -> Option<Vec<&'static PanelSize>> {
    let mut panels = Vec::with_capacity(count);
    let mut remaining = budget;

    for i in 0..count {
        let is_last = i + 1 == count;
        let target = if is_last { remaining } else { target_width };

        let panel = catalogue.snap_down(target)?;
        panels.push(panel);
        remaining -= panel.width_mm();

        if remaining < 0.0 && !is_last {
            return None;
        }
    }

    let total: f64 = panels.iter().map(|p| p.width_mm()).sum();
    if total > budget {
        let last = panels.last_mut()?;
        *last = catalogue.snap_down(last.width_mm() - (total - budget))?;
    }

    Some(panels)
}

// ────────────────────────────────────────────────────────────────────────────
// Placement builders
// ────────────────────────────────────────────────────────────────────────────

fn build_placements(
    panels: &[&'static PanelSize],
    gap_width: f64,
    offset: f64,
) -> Vec<PanelPlacement> {
    let mut cursor = offset + gap_width;
    panels
        .iter()
        .map(|&panel| {
            let placement = PanelPlacement {
                panel,
                start_mm: cursor,
                end_mm: cursor + panel.width_mm(),
            };
            cursor += panel.width_mm() + gap_width;
            placement
        })
        .collect()
}

/// Derives the `N + 1` gaps from the panel geometry.
///
/// The last gap runs to the section end rather than reusing `gap_width`, so the
/// section is covered exactly regardless of floating-point drift.
fn build_gaps(
    panels: &[&'static PanelSize],
    gap_width: f64,
    offset: f64,
    section_length: f64,
    max_gap_width: f64,
) -> Vec<Gap> {
    let section_end = offset + section_length;
    let mut gaps = Vec::with_capacity(panels.len() + 1);
    let mut cursor = offset;

    gaps.push(make_gap(cursor, gap_width, max_gap_width));
    cursor += gap_width;

    for (i, panel) in panels.iter().enumerate() {
        cursor += panel.width_mm();
        let width = if i + 1 == panels.len() {
            section_end - cursor
        } else {
            gap_width
        };
        gaps.push(make_gap(cursor, width, max_gap_width));
        cursor += width;
    }

    gaps
}

fn make_gap(start_mm: f64, width: f64, max_gap_width: f64) -> Gap {
    Gap {
        start_mm,
        end_mm: start_mm + width,
        width,
        compliant: width >= 0.0 && width <= max_gap_width,
    }
}

/// One post centred in every gap.
fn build_posts(gaps: &[Gap]) -> Vec<PostPlacement> {
    gaps.iter()
        .map(|gap| PostPlacement {
            position_mm: (gap.start_mm + gap.end_mm) / 2.0,
            shared: false,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
