//! Static product catalogue: panel, gate, hinge-panel, spigot and gate-hardware tables.
//!
//! Every table is sorted by width ascending (panels) or listed in storefront order
//! (spigots, hardware). The engine only ever reads from these tables; placements hold
//! `&'static` references into them so many placements can share one entry.
//!
//! Prices are AUD ex GST as exported from the storefront. Live prices for gate
//! hardware are resolved later by a `PriceResolver`.

use serde::Serialize;

// ────────────────────────────────────────────────────────────────────────────
// Record types
// ────────────────────────────────────────────────────────────────────────────

/// Panel family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelCategory {
    Standard,
    Gate,
    Hinge,
}

/// A single catalogue panel size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSize {
    /// Width in mm.
    pub width: u32,
    /// Height in mm.
    pub height: u32,
    /// Storefront product handle, e.g. `gp-12mm-1200mm`.
    pub handle: &'static str,
    pub category: PanelCategory,
    pub price: f64,
}

impl PanelSize {
    pub fn width_mm(&self) -> f64 {
        f64::from(self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MountType {
    CoreDrilled,
    BasePlated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostRange {
    Value,
    Pro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostShape {
    Square,
    Round,
}

/// A spigot (post) product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostInfo {
    pub handle: &'static str,
    pub description: &'static str,
    pub mount_type: MountType,
    pub range: PostRange,
    pub shape: PostShape,
    pub price: f64,
    /// Body width in mm.
    pub body_width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HardwareCategory {
    Hinge,
    Latch,
}

/// Gate hardware product (hinge pair or latch kit).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardwareItem {
    pub handle: &'static str,
    pub description: &'static str,
    pub category: HardwareCategory,
    pub price: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Catalogue
// ────────────────────────────────────────────────────────────────────────────

/// Read-only view over the catalogue tables.
#[derive(Debug, Serialize)]
pub struct Catalogue {
    pub standard_panels: &'static [PanelSize],
    pub gate_panels: &'static [PanelSize],
    pub hinge_panels: &'static [PanelSize],
    pub posts: &'static [PostInfo],
    pub hardware: &'static [HardwareItem],
}

/// Default spigot body width in mm.
pub const DEFAULT_POST_WIDTH: f64 = 60.0;

/// Maximum permitted gap in mm for pool fencing (AS 1926.1).
pub const DEFAULT_MAX_GAP: f64 = 100.0;

impl Catalogue {
    /// Smallest standard panel width in mm (0 for an empty table).
    pub fn min_panel_width(&self) -> f64 {
        self.standard_panels
            .first()
            .map(PanelSize::width_mm)
            .unwrap_or(0.0)
    }

    /// Largest standard panel width in mm (0 for an empty table).
    pub fn max_panel_width(&self) -> f64 {
        self.standard_panels
            .last()
            .map(PanelSize::width_mm)
            .unwrap_or(0.0)
    }

    /// Largest standard panel whose width is at or below `target` mm.
    ///
    /// Never rounds up. Returns `None` when `target` is below the smallest panel;
    /// a target above the largest panel clamps to the largest.
    pub fn snap_down(&self, target: f64) -> Option<&'static PanelSize> {
        if !(target >= self.min_panel_width()) {
            return None;
        }
        let panels = self.standard_panels;
        panels.iter().rev().find(|p| p.width_mm() <= target)
    }

    /// Picks the gate panel for an opening of `width` mm.
    ///
    /// An override handle wins when it names a gate panel. Otherwise the smallest gate
    /// panel at least as wide as the opening, falling back to the largest available.
    pub fn gate_panel_for(
        &self,
        width: f64,
        override_handle: Option<&str>,
    ) -> Option<&'static PanelSize> {
        let panels = self.gate_panels;
        if let Some(handle) = override_handle {
            if let Some(panel) = panels.iter().find(|p| p.handle == handle) {
                return Some(panel);
            }
        }
        panels
            .iter()
            .find(|p| p.width_mm() >= width)
            .or_else(|| panels.last())
    }

    pub fn hinge_panel(&self, handle: &str) -> Option<&'static PanelSize> {
        let panels = self.hinge_panels;
        panels.iter().find(|p| p.handle == handle)
    }

    /// Named post, or the first post in the table when the handle is absent or unknown.
    pub fn post_or_default(&self, handle: Option<&str>) -> Option<&'static PostInfo> {
        let posts = self.posts;
        handle
            .and_then(|h| posts.iter().find(|p| p.handle == h))
            .or_else(|| posts.first())
    }

    pub fn hardware_item(&self, handle: &str) -> Option<&'static HardwareItem> {
        let hardware = self.hardware;
        hardware.iter().find(|h| h.handle == handle)
    }
}

#[cfg(test)]
impl Catalogue {
    pub fn panel_by_width(&self, width: u32) -> Option<&'static PanelSize> {
        let panels = self.standard_panels;
        panels.iter().find(|p| p.width == width)
    }
}

/// Returns the built-in catalogue.
pub fn default_catalogue() -> &'static Catalogue {
    &DEFAULT_CATALOGUE
}

static DEFAULT_CATALOGUE: Catalogue = Catalogue {
    standard_panels: &STANDARD_PANELS,
    gate_panels: &GATE_PANELS_8MM,
    hinge_panels: &HINGE_PANELS,
    posts: &POSTS,
    hardware: &GATE_HARDWARE,
};

// ────────────────────────────────────────────────────────────────────────────
// Tables
// ────────────────────────────────────────────────────────────────────────────

const fn standard(width: u32, handle: &'static str, price: f64) -> PanelSize {
    PanelSize {
        width,
        height: 1200,
        handle,
        category: PanelCategory::Standard,
        price,
    }
}

const fn gate(width: u32, handle: &'static str, price: f64) -> PanelSize {
    PanelSize {
        width,
        height: 1200,
        handle,
        category: PanelCategory::Gate,
        price,
    }
}

const fn hinge(width: u32, handle: &'static str, price: f64) -> PanelSize {
    PanelSize {
        width,
        height: 1200,
        handle,
        category: PanelCategory::Hinge,
        price,
    }
}

// 12mm toughened glass, 1200mm high, 100–2000mm in 50mm steps.
static STANDARD_PANELS: [PanelSize; 39] = [
    standard(100, "gp-12mm-0100mm", 31.05),
    standard(150, "gp-12mm-0150mm", 31.05),
    standard(200, "gp-12mm-0200mm", 31.05),
    standard(250, "gp-12mm-0250mm", 31.05),
    standard(300, "gp-12mm-0300mm", 31.05),
    standard(350, "gp-12mm-0350mm", 31.05),
    standard(400, "gp-12mm-0400mm", 34.69),
    standard(450, "gp-12mm-0450mm", 38.95),
    standard(500, "gp-12mm-0500mm", 43.35),
    standard(550, "gp-12mm-0550mm", 47.62),
    standard(600, "gp-12mm-0600mm", 52.03),
    standard(650, "gp-12mm-0650mm", 56.28),
    standard(700, "gp-12mm-0700mm", 60.69),
    standard(750, "gp-12mm-0750mm", 64.97),
    standard(800, "gp-12mm-0800mm", 69.36),
    standard(850, "gp-12mm-0850mm", 73.63),
    standard(900, "gp-12mm-0900mm", 78.03),
    standard(950, "gp-12mm-0950mm", 82.30),
    standard(1000, "gp-12mm-1000mm", 86.70),
    standard(1050, "gp-12mm-1050mm", 90.97),
    standard(1100, "gp-12mm-1100mm", 95.38),
    standard(1150, "gp-12mm-1150mm", 99.64),
    standard(1200, "gp-12mm-1200mm", 104.05),
    standard(1250, "gp-12mm-1250mm", 108.31),
    standard(1300, "gp-12mm-1300mm", 112.71),
    standard(1350, "gp-12mm-1350mm", 116.99),
    standard(1400, "gp-12mm-1400mm", 121.25),
    standard(1450, "gp-12mm-1450mm", 125.65),
    standard(1500, "gp-12mm-1500mm", 129.92),
    standard(1550, "gp-12mm-1550mm", 134.33),
    standard(1600, "gp-12mm-1600mm", 138.58),
    standard(1650, "gp-12mm-1650mm", 142.99),
    standard(1700, "gp-12mm-1700mm", 147.27),
    standard(1750, "gp-12mm-1750mm", 151.67),
    standard(1800, "gp-12mm-1800mm", 155.93),
    standard(1850, "gp-12mm-1850mm", 159.47),
    standard(1900, "gp-12mm-1900mm", 164.61),
    standard(1950, "gp-12mm-1950mm", 170.48),
    standard(2000, "gp-12mm-2000mm", 173.27),
];

// 8mm gate glass, pre-drilled for hinge + latch, 700–1000mm in 25mm steps.
static GATE_PANELS_8MM: [PanelSize; 13] = [
    gate(700, "gg-8mm-0700mm", 49.95),
    gate(725, "gg-8mm-0725mm", 51.72),
    gate(750, "gg-8mm-0750mm", 53.49),
    gate(775, "gg-8mm-0775mm", 55.27),
    gate(800, "gg-8mm-0800mm", 57.04),
    gate(825, "gg-8mm-0825mm", 58.82),
    gate(850, "gg-8mm-0850mm", 60.59),
    gate(875, "gg-8mm-0875mm", 62.36),
    gate(900, "gg-8mm-0900mm", 64.14),
    gate(925, "gg-8mm-0925mm", 65.91),
    gate(950, "gg-8mm-0950mm", 67.68),
    gate(975, "gg-8mm-0975mm", 69.46),
    gate(1000, "gg-8mm-1000mm", 71.29),
];

// 12mm hinge panels, mounted on the hinge side of a gate, 1000–2000mm in 100mm steps.
static HINGE_PANELS: [PanelSize; 11] = [
    hinge(1000, "gh-12mm-1000mm", 89.29),
    hinge(1100, "gh-12mm-1100mm", 97.40),
    hinge(1200, "gh-12mm-1200mm", 106.14),
    hinge(1300, "gh-12mm-1300mm", 114.24),
    hinge(1400, "gh-12mm-1400mm", 122.98),
    hinge(1500, "gh-12mm-1500mm", 131.09),
    hinge(1600, "gh-12mm-1600mm", 139.83),
    hinge(1700, "gh-12mm-1700mm", 147.93),
    hinge(1800, "gh-12mm-1800mm", 156.68),
    hinge(1900, "gh-12mm-1900mm", 170.25),
    hinge(2000, "gh-12mm-2000mm", 177.62),
];

static POSTS: [PostInfo; 8] = [
    PostInfo {
        handle: "spigot-value-core-drill-square-clear-coat",
        description: "Square Core Drilled - Value",
        mount_type: MountType::CoreDrilled,
        range: PostRange::Value,
        shape: PostShape::Square,
        price: 52.57,
        body_width: 60,
    },
    PostInfo {
        handle: "spigot-value-core-drill-round-clear-coat",
        description: "Round Core Drilled - Value",
        mount_type: MountType::CoreDrilled,
        range: PostRange::Value,
        shape: PostShape::Round,
        price: 52.57,
        body_width: 60,
    },
    PostInfo {
        handle: "spigot-value-base-plated-square-clear-coat",
        description: "Square Base Plated - Value",
        mount_type: MountType::BasePlated,
        range: PostRange::Value,
        shape: PostShape::Square,
        price: 57.11,
        body_width: 60,
    },
    PostInfo {
        handle: "spigot-value-base-plated-round-clear-coat",
        description: "Round Base Plated - Value",
        mount_type: MountType::BasePlated,
        range: PostRange::Value,
        shape: PostShape::Round,
        price: 55.42,
        body_width: 60,
    },
    PostInfo {
        handle: "spigot-pro-core-drill-square-clear-coat",
        description: "Square Core Drilled - Pro",
        mount_type: MountType::CoreDrilled,
        range: PostRange::Pro,
        shape: PostShape::Square,
        price: 64.75,
        body_width: 60,
    },
    PostInfo {
        handle: "spigot-pro-core-drill-round-clear-coat",
        description: "Round Core Drilled - Pro",
        mount_type: MountType::CoreDrilled,
        range: PostRange::Pro,
        shape: PostShape::Round,
        price: 63.37,
        body_width: 60,
    },
    PostInfo {
        handle: "spigot-pro-base-plated-square-clear-coat",
        description: "Square Base Plated - Pro",
        mount_type: MountType::BasePlated,
        range: PostRange::Pro,
        shape: PostShape::Square,
        price: 66.94,
        body_width: 60,
    },
    PostInfo {
        handle: "spigot-pro-base-plated-round-clear-coat",
        description: "Round Base Plated - Pro",
        mount_type: MountType::BasePlated,
        range: PostRange::Pro,
        shape: PostShape::Round,
        price: 65.51,
        body_width: 60,
    },
];

static GATE_HARDWARE: [HardwareItem; 8] = [
    HardwareItem {
        handle: "spring-hinge-glass-to-glass-ss316-pair",
        description: "Spring Hinge G2G SS316 (pair)",
        category: HardwareCategory::Hinge,
        price: 64.42,
    },
    HardwareItem {
        handle: "spring-hinge-glass-to-glass-black-pair",
        description: "Spring Hinge G2G Black (pair)",
        category: HardwareCategory::Hinge,
        price: 70.90,
    },
    HardwareItem {
        handle: "spring-hinge-wall-to-glass-black-pair",
        description: "Spring Hinge W2G Black (pair)",
        category: HardwareCategory::Hinge,
        price: 70.71,
    },
    HardwareItem {
        handle: "spring-hinge-wall-to-glass-silver-pair",
        description: "Spring Hinge W2G Silver (pair)",
        category: HardwareCategory::Hinge,
        price: 81.29,
    },
    HardwareItem {
        handle: "kit-g2g-std-latch-kit-polished",
        description: "G2G Standard Latch Kit - SS Polished",
        category: HardwareCategory::Latch,
        price: 120.17,
    },
    HardwareItem {
        handle: "kit-g2g-std-latch-kit-black",
        description: "G2G Standard Latch Kit - Black",
        category: HardwareCategory::Latch,
        price: 131.43,
    },
    HardwareItem {
        handle: "kit-w2g-std-latch-kit-polished",
        description: "W2G Standard Latch Kit - SS Polished",
        category: HardwareCategory::Latch,
        price: 120.17,
    },
    HardwareItem {
        handle: "kit-w2g-std-latch-kit-black",
        description: "W2G Standard Latch Kit - Black",
        category: HardwareCategory::Latch,
        price: 126.36,
    },
];

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
