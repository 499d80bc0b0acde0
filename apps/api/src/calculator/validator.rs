//! Gap and length checks. Each check returns zero or more warnings; empty means valid.
//!
//! # Rules
//! - A run must hold at least one smallest-catalogue panel flanked by two posts.
//! - A run may not exceed `MAX_RUN_LENGTH_MM`.
//! - A gate must start at or after 0, have positive width, and end within the run.
//! - No gap may exceed `max_gap_width` (AS 1926.1: 100mm), and no gap may be negative.

use crate::calculator::types::{Gap, GateConfig, ValidationWarning, WarningKind};

/// Longest single run the fitter accepts (100m).
pub const MAX_RUN_LENGTH_MM: f64 = 100_000.0;

/// Checks every gap against the safety ceiling.
pub fn validate_gaps(gaps: &[Gap], max_gap_width: f64) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for gap in gaps {
        if gap.width > max_gap_width {
            warnings.push(
                ValidationWarning::error(
                    WarningKind::GapExceedsLimit,
                    format!(
                        "Gap of {:.0}mm at position {:.0}mm exceeds the {}mm maximum (AS 1926.1).",
                        gap.width, gap.start_mm, max_gap_width
                    ),
                )
                .at(gap.start_mm),
            );
        }

        if gap.width < 0.0 {
            warnings.push(
                ValidationWarning::error(
                    WarningKind::GapTooNarrow,
                    format!(
                        "Negative gap of {:.0}mm at position {:.0}mm: panels overlap.",
                        gap.width, gap.start_mm
                    ),
                )
                .at(gap.start_mm),
            );
        }
    }

    warnings
}

/// Checks that a run can physically hold one panel between two posts, and is not
/// longer than `MAX_RUN_LENGTH_MM`.
pub fn validate_run_length(
    length: f64,
    post_width: f64,
    min_panel_width: f64,
) -> Vec<ValidationWarning> {
    if !(length > 0.0) {
        return vec![ValidationWarning::error(
            WarningKind::RunTooShort,
            "Run length must be greater than 0mm.",
        )];
    }

    if !(length <= MAX_RUN_LENGTH_MM) {
        return vec![ValidationWarning::error(
            WarningKind::RunTooLong,
            format!(
                "Run length of {length}mm exceeds the {MAX_RUN_LENGTH_MM}mm maximum \
                 for a single run."
            ),
        )];
    }

    let min_length = min_panel_width + 2.0 * post_width;
    if length < min_length {
        return vec![ValidationWarning::error(
            WarningKind::RunTooShort,
            format!(
                "Run length of {length}mm is too short. Minimum is {min_length}mm \
                 ({min_panel_width}mm panel + 2x {post_width}mm posts)."
            ),
        )];
    }

    Vec::new()
}

/// Checks that a gate lies inside its run.
pub fn validate_gate_position(gate: &GateConfig, run_length: f64) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if !(gate.position >= 0.0) {
        warnings.push(ValidationWarning::error(
            WarningKind::GatePositionInvalid,
            format!("Gate position ({}mm) cannot be negative.", gate.position),
        ));
    }

    if gate.end() > run_length {
        warnings.push(
            ValidationWarning::error(
                WarningKind::GatePositionInvalid,
                format!(
                    "Gate extends beyond run. Gate ends at {}mm but run is only {}mm.",
                    gate.end(),
                    run_length
                ),
            )
            .at(gate.position),
        );
    }

    if !(gate.width > 0.0) {
        warnings.push(ValidationWarning::error(
            WarningKind::GatePositionInvalid,
            "Gate width must be greater than 0mm.",
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::types::{GatePanelType, WarningSeverity};

    fn gap(start: f64, width: f64) -> Gap {
        Gap {
            start_mm: start,
            end_mm: start + width,
            width,
            compliant: (0.0..=100.0).contains(&width),
        }
    }

    fn gate(position: f64, width: f64) -> GateConfig {
        GateConfig {
            position,
            width,
            panel_type: GatePanelType::Standard8mm,
        }
    }

    // ── validate_gaps ───────────────────────────────────────────────────────

    #[test]
    fn test_gaps_within_limit_pass() {
        let gaps = [gap(0.0, 80.0), gap(1880.0, 80.0), gap(3760.0, 80.0)];
        assert!(validate_gaps(&gaps, 100.0).is_empty());
    }

    #[test]
    fn test_gap_over_limit_flagged() {
        let gaps = [gap(0.0, 80.0), gap(1880.0, 120.0)];
        let warnings = validate_gaps(&gaps, 100.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::GapExceedsLimit);
        assert_eq!(warnings[0].severity, WarningSeverity::Error);
        assert_eq!(warnings[0].position_mm, Some(1880.0));
    }

    #[test]
    fn test_gap_exactly_at_limit_is_compliant() {
        assert!(validate_gaps(&[gap(0.0, 100.0)], 100.0).is_empty());
    }

    #[test]
    fn test_negative_gap_flagged_as_overlap() {
        let warnings = validate_gaps(&[gap(100.0, -10.0)], 100.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::GapTooNarrow);
    }

    // ── validate_run_length ─────────────────────────────────────────────────

    #[test]
    fn test_valid_run_length() {
        assert!(validate_run_length(3000.0, 60.0, 100.0).is_empty());
    }

    #[test]
    fn test_zero_and_negative_length_rejected() {
        for length in [0.0, -100.0, f64::NAN] {
            let warnings = validate_run_length(length, 60.0, 100.0);
            assert_eq!(warnings.len(), 1, "length {length}");
            assert_eq!(warnings[0].kind, WarningKind::RunTooShort);
        }
    }

    #[test]
    fn test_below_minimum_names_minimum() {
        let warnings = validate_run_length(200.0, 60.0, 100.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::RunTooShort);
        assert!(warnings[0].message.contains("220mm"), "{}", warnings[0].message);
    }

    #[test]
    fn test_exact_minimum_accepted() {
        assert!(validate_run_length(220.0, 60.0, 100.0).is_empty());
    }

    #[test]
    fn test_maximum_length_accepted() {
        assert!(validate_run_length(MAX_RUN_LENGTH_MM, 60.0, 100.0).is_empty());
    }

    #[test]
    fn test_over_maximum_and_infinite_rejected() {
        for length in [MAX_RUN_LENGTH_MM + 1.0, 1e300, f64::INFINITY] {
            let warnings = validate_run_length(length, 60.0, 100.0);
            assert_eq!(warnings.len(), 1, "length {length}");
            assert_eq!(warnings[0].kind, WarningKind::RunTooLong);
        }
    }

    // ── validate_gate_position ──────────────────────────────────────────────

    #[test]
    fn test_valid_gate_position() {
        assert!(validate_gate_position(&gate(2000.0, 900.0), 5000.0).is_empty());
    }

    #[test]
    fn test_negative_gate_position_rejected() {
        let warnings = validate_gate_position(&gate(-100.0, 900.0), 5000.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::GatePositionInvalid);
    }

    #[test]
    fn test_gate_past_run_end_rejected() {
        let warnings = validate_gate_position(&gate(4500.0, 900.0), 5000.0);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("5400mm"), "{}", warnings[0].message);
    }

    #[test]
    fn test_nan_gate_position_rejected() {
        let warnings = validate_gate_position(&gate(f64::NAN, 900.0), 5000.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::GatePositionInvalid);
    }

    #[test]
    fn test_zero_width_gate_rejected() {
        let warnings = validate_gate_position(&gate(2000.0, 0.0), 5000.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::GatePositionInvalid);
    }

    #[test]
    fn test_gate_flush_with_run_end_accepted() {
        assert!(validate_gate_position(&gate(4100.0, 900.0), 5000.0).is_empty());
    }
}
