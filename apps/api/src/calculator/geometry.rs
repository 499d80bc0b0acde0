//! Shape decomposition: turns a `ShapeConfig` into independent straight runs.
//!
//! - Inline    → 1 run
//! - L-shape   → 2 runs, one shared corner
//! - Rectangle → 4 runs (right, down, left, up), four shared corners
//!
//! Each run is fitted on its own. Corner posts are computed by both adjacent runs and
//! deduplicated later in the BOM via `shared_corner_count`.

use thiserror::Error;

use crate::calculator::types::{
    Direction, FittingResult, GateConfig, Point, Run, ShapeConfig, SideGate,
};

/// Structural input errors. These abort a calculation; fitting problems never do.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("gate side {side} does not exist on a shape with {sides} sides")]
    GateSideOutOfRange { side: u8, sides: u8 },
}

/// Decomposes a shape into runs, in drawing order.
pub fn decompose(shape: &ShapeConfig) -> Result<Vec<Run>, ShapeError> {
    match shape {
        ShapeConfig::Inline { length, gate } => Ok(vec![Run {
            id: "run-1".to_string(),
            length: *length,
            gate: gate.clone(),
            start: Point::new(0.0, 0.0),
            end: Point::new(*length, 0.0),
            direction: Direction::Right,
        }]),

        ShapeConfig::LShape {
            side1_length,
            side2_length,
            gate,
        } => {
            let (a, b) = (*side1_length, *side2_length);
            let gate_for = side_gates(gate.as_ref(), 2)?;
            Ok(vec![
                Run {
                    id: "run-1".to_string(),
                    length: a,
                    gate: gate_for(1),
                    start: Point::new(0.0, 0.0),
                    end: Point::new(a, 0.0),
                    direction: Direction::Right,
                },
                Run {
                    id: "run-2".to_string(),
                    length: b,
                    gate: gate_for(2),
                    start: Point::new(a, 0.0),
                    end: Point::new(a, b),
                    direction: Direction::Down,
                },
            ])
        }

        ShapeConfig::Rectangle {
            width,
            height,
            gate,
        } => {
            let (w, h) = (*width, *height);
            let gate_for = side_gates(gate.as_ref(), 4)?;
            let corners = [
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, h),
                Point::new(0.0, h),
            ];
            let sides = [
                (w, Direction::Right),
                (h, Direction::Down),
                (w, Direction::Left),
                (h, Direction::Up),
            ];

            Ok(sides
                .iter()
                .enumerate()
                .map(|(i, &(length, direction))| Run {
                    id: format!("side-{}", i + 1),
                    length,
                    gate: gate_for(i as u8 + 1),
                    start: corners[i],
                    end: corners[(i + 1) % corners.len()],
                    direction,
                })
                .collect())
        }
    }
}

/// Number of corner posts counted twice by adjacent runs.
pub fn shared_corner_count(shape: &ShapeConfig) -> usize {
    match shape {
        ShapeConfig::Inline { .. } => 0,
        ShapeConfig::LShape { .. } => 1,
        ShapeConfig::Rectangle { .. } => 4,
    }
}

/// Flags the end posts of runs that meet at a corner as `shared`.
///
/// `results` must be in `decompose` order. Runs that failed to fit have no posts
/// and are skipped. A gate flush with a corner puts its flanking post at the run end;
/// gate posts are never shared.
pub fn mark_shared_corners(shape: &ShapeConfig, results: &mut [FittingResult]) {
    let closed = match shape {
        ShapeConfig::Inline { .. } => return,
        ShapeConfig::LShape { .. } => false,
        ShapeConfig::Rectangle { .. } => true,
    };

    let count = results.len();
    for (i, result) in results.iter_mut().enumerate() {
        let gate_edges = result.gate.as_ref().map(|g| (g.start_mm, g.end_mm));
        let is_gate_post = |position: f64| {
            gate_edges.is_some_and(|(start, end)| position == start || position == end)
        };

        let starts_at_corner = closed || i > 0;
        let ends_at_corner = closed || i + 1 < count;
        if starts_at_corner {
            if let Some(post) = result.posts.first_mut() {
                post.shared = !is_gate_post(post.position_mm);
            }
        }
        if ends_at_corner {
            if let Some(post) = result.posts.last_mut() {
                post.shared = !is_gate_post(post.position_mm);
            }
        }
    }
}

/// Validates the gate's side and returns a lookup from 1-based side number to gate.
fn side_gates(
    gate: Option<&SideGate>,
    sides: u8,
) -> Result<impl Fn(u8) -> Option<GateConfig> + '_, ShapeError> {
    if let Some(g) = gate {
        if g.side == 0 || g.side > sides {
            return Err(ShapeError::GateSideOutOfRange {
                side: g.side,
                sides,
            });
        }
    }
    Ok(move |side: u8| gate.filter(|g| g.side == side).map(|g| g.gate.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::types::{GatePanelType, GatePlacement, PostPlacement};

    fn gate(position: f64, width: f64) -> GateConfig {
        GateConfig {
            position,
            width,
            panel_type: GatePanelType::Standard8mm,
        }
    }

    fn side_gate(side: u8, position: f64, width: f64) -> SideGate {
        SideGate {
            side,
            gate: gate(position, width),
        }
    }

    // ── inline ──────────────────────────────────────────────────────────────

    #[test]
    fn test_inline_decomposes_into_one_run() {
        let runs = decompose(&ShapeConfig::Inline {
            length: 5000.0,
            gate: None,
        })
        .unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].id, "run-1");
        assert_eq!(runs[0].length, 5000.0);
        assert_eq!(runs[0].end, Point::new(5000.0, 0.0));
        assert_eq!(runs[0].direction, Direction::Right);
        assert!(runs[0].gate.is_none());
    }

    #[test]
    fn test_inline_passes_gate_to_run() {
        let runs = decompose(&ShapeConfig::Inline {
            length: 5000.0,
            gate: Some(gate(2000.0, 900.0)),
        })
        .unwrap();
        assert_eq!(runs[0].gate, Some(gate(2000.0, 900.0)));
    }

    // ── l-shape ─────────────────────────────────────────────────────────────

    #[test]
    fn test_l_shape_shares_corner() {
        let runs = decompose(&ShapeConfig::LShape {
            side1_length: 5000.0,
            side2_length: 3000.0,
            gate: None,
        })
        .unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].start, runs[0].end);
        assert_eq!(runs[1].end, Point::new(5000.0, 3000.0));
        assert_eq!(runs[1].direction, Direction::Down);
    }

    #[test]
    fn test_l_shape_gate_on_one_side_only() {
        let runs = decompose(&ShapeConfig::LShape {
            side1_length: 5000.0,
            side2_length: 3000.0,
            gate: Some(side_gate(2, 1000.0, 900.0)),
        })
        .unwrap();
        assert!(runs[0].gate.is_none());
        assert_eq!(runs[1].gate, Some(gate(1000.0, 900.0)));
    }

    #[test]
    fn test_l_shape_rejects_side_three() {
        let err = decompose(&ShapeConfig::LShape {
            side1_length: 5000.0,
            side2_length: 3000.0,
            gate: Some(side_gate(3, 1000.0, 900.0)),
        })
        .unwrap_err();
        assert_eq!(err, ShapeError::GateSideOutOfRange { side: 3, sides: 2 });
    }

    // ── rectangle ───────────────────────────────────────────────────────────

    fn rectangle(gate: Option<SideGate>) -> Vec<Run> {
        decompose(&ShapeConfig::Rectangle {
            width: 6000.0,
            height: 4000.0,
            gate,
        })
        .unwrap()
    }

    #[test]
    fn test_rectangle_forms_closed_loop() {
        let runs = rectangle(None);
        assert_eq!(runs.len(), 4);
        for i in 0..4 {
            assert_eq!(runs[i].end, runs[(i + 1) % 4].start, "corner {i} must connect");
        }
        assert_eq!(runs[3].end, runs[0].start);
    }

    #[test]
    fn test_rectangle_directions_and_lengths() {
        let runs = rectangle(None);
        let dirs: Vec<Direction> = runs.iter().map(|r| r.direction).collect();
        assert_eq!(
            dirs,
            vec![Direction::Right, Direction::Down, Direction::Left, Direction::Up]
        );
        let lengths: Vec<f64> = runs.iter().map(|r| r.length).collect();
        assert_eq!(lengths, vec![6000.0, 4000.0, 6000.0, 4000.0]);
        assert_eq!(runs[2].id, "side-3");
    }

    #[test]
    fn test_rectangle_gate_on_specified_side() {
        let runs = rectangle(Some(side_gate(3, 2500.0, 900.0)));
        let gated: Vec<usize> = runs
            .iter()
            .enumerate()
            .filter(|(_, r)| r.gate.is_some())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(gated, vec![2]);
    }

    #[test]
    fn test_rectangle_rejects_side_zero() {
        let err = decompose(&ShapeConfig::Rectangle {
            width: 6000.0,
            height: 4000.0,
            gate: Some(side_gate(0, 100.0, 900.0)),
        });
        assert!(matches!(
            err,
            Err(ShapeError::GateSideOutOfRange { side: 0, sides: 4 })
        ));
    }

    // ── shared corners ──────────────────────────────────────────────────────

    #[test]
    fn test_shared_corner_count() {
        let inline = ShapeConfig::Inline {
            length: 1.0,
            gate: None,
        };
        let l = ShapeConfig::LShape {
            side1_length: 1.0,
            side2_length: 1.0,
            gate: None,
        };
        let rect = ShapeConfig::Rectangle {
            width: 1.0,
            height: 1.0,
            gate: None,
        };
        assert_eq!(shared_corner_count(&inline), 0);
        assert_eq!(shared_corner_count(&l), 1);
        assert_eq!(shared_corner_count(&rect), 4);
    }

    fn with_posts(n: usize) -> FittingResult {
        let mut result = FittingResult::empty("r");
        result.posts = (0..n)
            .map(|i| PostPlacement {
                position_mm: i as f64,
                shared: false,
            })
            .collect();
        result
    }

    fn shared_flags(results: &[FittingResult]) -> Vec<Vec<bool>> {
        results
            .iter()
            .map(|r| r.posts.iter().map(|p| p.shared).collect())
            .collect()
    }

    #[test]
    fn test_l_shape_marks_inner_corner_only() {
        let shape = ShapeConfig::LShape {
            side1_length: 1.0,
            side2_length: 1.0,
            gate: None,
        };
        let mut results = vec![with_posts(3), with_posts(3)];
        mark_shared_corners(&shape, &mut results);
        assert_eq!(
            shared_flags(&results),
            vec![vec![false, false, true], vec![true, false, false]]
        );
    }

    #[test]
    fn test_rectangle_marks_every_end_post() {
        let shape = ShapeConfig::Rectangle {
            width: 1.0,
            height: 1.0,
            gate: None,
        };
        let mut results = vec![with_posts(3), with_posts(2), with_posts(3), FittingResult::empty("x")];
        mark_shared_corners(&shape, &mut results);
        let flags = shared_flags(&results);
        assert_eq!(flags[0], vec![true, false, true]);
        assert_eq!(flags[1], vec![true, true]);
        assert!(flags[3].is_empty());
    }

    #[test]
    fn test_inline_marks_nothing() {
        let shape = ShapeConfig::Inline {
            length: 1.0,
            gate: None,
        };
        let mut results = vec![with_posts(3)];
        mark_shared_corners(&shape, &mut results);
        assert_eq!(shared_flags(&results), vec![vec![false, false, false]]);
    }

    #[test]
    fn test_gate_post_at_corner_not_shared() {
        let shape = ShapeConfig::LShape {
            side1_length: 1.0,
            side2_length: 1.0,
            gate: None,
        };
        // Side 2 gate at position 0: posts are gate start, gate end, then the section's own.
        let mut side2 = with_posts(0);
        side2.posts = [0.0, 900.0, 960.0, 2000.0]
            .iter()
            .map(|&position_mm| PostPlacement {
                position_mm,
                shared: false,
            })
            .collect();
        side2.gate = Some(GatePlacement {
            start_mm: 0.0,
            end_mm: 900.0,
            width: 900.0,
            panel_type: GatePanelType::Standard8mm,
        });
        let mut results = vec![with_posts(3), side2];
        mark_shared_corners(&shape, &mut results);
        let flags = shared_flags(&results);
        assert_eq!(flags[0], vec![false, false, true]);
        assert_eq!(flags[1], vec![false, false, false, false]);
    }
}
