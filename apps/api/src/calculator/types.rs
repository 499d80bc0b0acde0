//! Data model shared by the decomposer, fitter, validator and BOM aggregator.
//!
//! All lengths are millimetres as `f64`. Input types derive `Deserialize`; output
//! types hold `&'static` catalogue references and are serialize-only.

use serde::{Deserialize, Serialize};

use crate::catalogue::{PanelSize, DEFAULT_MAX_GAP, DEFAULT_POST_WIDTH};

// ────────────────────────────────────────────────────────────────────────────
// Shape input
// ────────────────────────────────────────────────────────────────────────────

/// Glass type used for a gate opening.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatePanelType {
    #[default]
    #[serde(rename = "standard-8mm")]
    Standard8mm,
    #[serde(rename = "hydraulic-wall-12mm")]
    HydraulicWall,
    #[serde(rename = "hydraulic-120-12mm")]
    Hydraulic120,
}

/// A gate cut-out on a run, measured from the run's start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    pub position: f64,
    pub width: f64,
    #[serde(default)]
    pub panel_type: GatePanelType,
}

impl GateConfig {
    pub fn end(&self) -> f64 {
        self.position + self.width
    }
}

/// A gate on a multi-side shape. `side` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideGate {
    pub side: u8,
    #[serde(flatten)]
    pub gate: GateConfig,
}

/// Fence shape. Tagged on `shape` as `inline`, `l-shape` or `rectangle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum ShapeConfig {
    Inline {
        length: f64,
        #[serde(default)]
        gate: Option<GateConfig>,
    },
    LShape {
        side1_length: f64,
        side2_length: f64,
        #[serde(default)]
        gate: Option<SideGate>,
    },
    Rectangle {
        width: f64,
        height: f64,
        #[serde(default)]
        gate: Option<SideGate>,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Runs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Drawing direction of a run, for schematic rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

/// One independent straight section of fence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub length: f64,
    pub gate: Option<GateConfig>,
    pub start: Point,
    pub end: Point,
    pub direction: Direction,
}

// ────────────────────────────────────────────────────────────────────────────
// Fitting output
// ────────────────────────────────────────────────────────────────────────────

/// A catalogue panel placed along a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelPlacement {
    pub panel: &'static PanelSize,
    pub start_mm: f64,
    pub end_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatePlacement {
    pub start_mm: f64,
    pub end_mm: f64,
    pub width: f64,
    pub panel_type: GatePanelType,
}

/// A spigot, centred at `position_mm`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPlacement {
    pub position_mm: f64,
    /// Shared with an adjacent run at a corner.
    pub shared: bool,
}

/// Clear space between panel edges (or a panel edge and the run end).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gap {
    pub start_mm: f64,
    pub end_mm: f64,
    pub width: f64,
    /// `0 <= width <= max_gap_width`.
    pub compliant: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    GapExceedsLimit,
    RunTooShort,
    RunTooLong,
    NoValidFit,
    GapTooNarrow,
    GatePositionInvalid,
}

/// A domain problem found while fitting. Always returned as a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub severity: WarningSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_mm: Option<f64>,
}

impl ValidationWarning {
    pub fn error(kind: WarningKind, message: impl Into<String>) -> Self {
        ValidationWarning {
            kind,
            severity: WarningSeverity::Error,
            message: message.into(),
            position_mm: None,
        }
    }

    pub fn at(mut self, position_mm: f64) -> Self {
        self.position_mm = Some(position_mm);
        self
    }
}

/// Result of fitting one run (or one gate-free section of a run).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittingResult {
    pub run_id: String,
    pub success: bool,
    pub panels: Vec<PanelPlacement>,
    pub gaps: Vec<Gap>,
    pub gate: Option<GatePlacement>,
    pub posts: Vec<PostPlacement>,
    pub warnings: Vec<ValidationWarning>,
}

impl FittingResult {
    /// A failed result carrying only warnings.
    pub fn failed(run_id: impl Into<String>, warnings: Vec<ValidationWarning>) -> Self {
        FittingResult {
            run_id: run_id.into(),
            success: false,
            panels: Vec::new(),
            gaps: Vec::new(),
            gate: None,
            posts: Vec::new(),
            warnings,
        }
    }

    /// A successful result with nothing placed (zero-length section).
    pub fn empty(run_id: impl Into<String>) -> Self {
        FittingResult {
            success: true,
            ..FittingResult::failed(run_id, Vec::new())
        }
    }

    pub fn total_panel_width(&self) -> f64 {
        self.panels.iter().map(|p| p.panel.width_mm()).sum()
    }

    pub fn total_gap_width(&self) -> f64 {
        self.gaps.iter().map(|g| g.width).sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// BOM output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BomItemType {
    Panel,
    GatePanel,
    HingePanel,
    Spigot,
    Hinge,
    Latch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLineItem {
    #[serde(rename = "type")]
    pub item_type: BomItemType,
    pub handle: String,
    pub description: String,
    pub quantity: u32,
    /// AUD ex GST. Zero for hardware awaiting a live price.
    pub unit_price: f64,
    pub line_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomResult {
    pub items: Vec<BomLineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub warnings: Vec<ValidationWarning>,
}

// ────────────────────────────────────────────────────────────────────────────
// Settings + top-level input/output
// ────────────────────────────────────────────────────────────────────────────

/// Gate hardware selection. Handles are storefront product handles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateHardwareConfig {
    pub gate_panel_handle: Option<String>,
    pub hinge_handle: Option<String>,
    pub latch_handle: Option<String>,
    pub requires_hinge_panel: bool,
    pub hinge_panel_handle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    /// Spigot body width in mm.
    pub post_width: f64,
    /// Safety ceiling for every gap, in mm.
    pub max_gap_width: f64,
    pub include_posts: bool,
    pub default_post_handle: Option<String>,
    pub gate_hardware_defaults: Option<GateHardwareConfig>,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        CalculatorSettings {
            post_width: DEFAULT_POST_WIDTH,
            max_gap_width: DEFAULT_MAX_GAP,
            include_posts: false,
            default_post_handle: None,
            gate_hardware_defaults: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInput {
    pub shape: ShapeConfig,
    #[serde(default)]
    pub settings: CalculatorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorOutput {
    pub runs: Vec<Run>,
    pub fitting_results: Vec<FittingResult>,
    pub bom: BomResult,
    /// True only if every run fitted.
    pub success: bool,
}
