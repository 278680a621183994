//! Pure rectangle arithmetic: splits, grid cells, quadrants, spacing, fit.
//!
//! Every function here takes a base [`Rect`] (normally a monitor's work
//! area) and returns a new one — no host calls, no side effects.  All math
//! is integer with floor division; the `w, h >= 1` invariant from
//! [`rect`](crate::rect) is preserved by every operation.
//!
//! Splits compose: [`split_sequence`] folds [`split`] left-to-right over a
//! direction sequence, so `"rr"` at 50% quarters the rectangle from the
//! right rather than doubling a half.

use crate::command::{Direction, GridSpec, Quadrant};
use crate::rect::Rect;

/// Errors from rectangle computations.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// Grid dimensions or target cell outside the valid range.
    #[error("invalid grid spec {spec}: {reason}")]
    InvalidGrid { spec: GridSpec, reason: String },
}

/// Policy for reconciling a window's current size with a destination region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// Resize the window to exactly fill the region.
    Exact,
    /// Keep the window's current size if it fits, centering it inside the
    /// region; shrink to the region's size otherwise.
    Clamp,
}

/// Take `percent` of `rect` along one edge.
///
/// `percent` is clamped to `[1, 99]`.  For [`Left`](Direction::Left) the new
/// width is `floor(w * percent / 100)` anchored at the left edge; for
/// [`Right`](Direction::Right) the same width is anchored at the right edge.
/// [`Top`](Direction::Top) / [`Bottom`](Direction::Bottom) are symmetric on
/// the vertical axis, and [`Full`](Direction::Full) is the identity.
pub fn split(rect: Rect, dir: Direction, percent: u8) -> Rect {
    let percent = percent.clamp(1, 99) as i64;
    match dir {
        Direction::Left => {
            let w = (rect.w as i64 * percent / 100) as i32;
            Rect::new(rect.x, rect.y, w, rect.h)
        }
        Direction::Right => {
            let w = ((rect.w as i64 * percent / 100) as i32).max(1);
            Rect::new(rect.x + rect.w - w, rect.y, w, rect.h)
        }
        Direction::Top => {
            let h = (rect.h as i64 * percent / 100) as i32;
            Rect::new(rect.x, rect.y, rect.w, h)
        }
        Direction::Bottom => {
            let h = ((rect.h as i64 * percent / 100) as i32).max(1);
            Rect::new(rect.x, rect.y + rect.h - h, rect.w, h)
        }
        Direction::Full => rect,
    }
}

/// Fold [`split`] left-to-right over a direction sequence.
///
/// Each step operates on the result of the previous one, so the sequence
/// nests rather than accumulates.  An empty sequence returns `rect`
/// unchanged.
pub fn split_sequence(rect: Rect, dirs: &[Direction], percent: u8) -> Rect {
    dirs.iter().fold(rect, |r, &d| split(r, d, percent))
}

/// Select one cell of `rect` partitioned into `cols x rows` equal cells.
///
/// Cell width and height use floor division; the last row and last column
/// absorb the remainder, so the union of all cells exactly covers `rect`
/// with no gap or overlap.  `row` / `col` are 1-based.
pub fn grid_cell(rect: Rect, spec: GridSpec) -> Result<Rect, GeometryError> {
    if spec.cols < 1 || spec.rows < 1 {
        return Err(GeometryError::InvalidGrid {
            spec,
            reason: "cols and rows must be at least 1".into(),
        });
    }
    if spec.col < 1 || spec.col > spec.cols {
        return Err(GeometryError::InvalidGrid {
            spec,
            reason: format!("col must be in 1..={}", spec.cols),
        });
    }
    if spec.row < 1 || spec.row > spec.rows {
        return Err(GeometryError::InvalidGrid {
            spec,
            reason: format!("row must be in 1..={}", spec.rows),
        });
    }

    let cols = spec.cols as i32;
    let rows = spec.rows as i32;
    let col = spec.col as i32 - 1;
    let row = spec.row as i32 - 1;

    let cell_w = rect.w / cols;
    let cell_h = rect.h / rows;
    let x = rect.x + col * cell_w;
    let y = rect.y + row * cell_h;
    // Last column / row takes whatever floor division left over.
    let w = if col == cols - 1 {
        rect.w - (cols - 1) * cell_w
    } else {
        cell_w
    };
    let h = if row == rows - 1 {
        rect.h - (rows - 1) * cell_h
    } else {
        cell_h
    };

    Ok(Rect::new(x, y, w, h))
}

/// Compute a quadrant of `rect` as the two-step split composition for the
/// tag (`q1` = top then left, and so on).
pub fn quadrant(rect: Rect, q: Quadrant, percent: u8) -> Rect {
    split_sequence(rect, &q.directions(), percent)
}

/// Shrink `rect` by `pad` pixels on all four sides.
///
/// `pad <= 0` is a no-op.  Width and height are floored at 1 so even a tiny
/// rectangle with a huge pad stays non-degenerate.
pub fn spacer(rect: Rect, pad: i32) -> Rect {
    if pad <= 0 {
        return rect;
    }
    Rect::new(rect.x + pad, rect.y + pad, rect.w - 2 * pad, rect.h - 2 * pad)
}

/// Reconcile a window's current rectangle with a destination region.
pub fn fit(current: Rect, region: Rect, mode: FitMode) -> Rect {
    match mode {
        FitMode::Exact => region,
        FitMode::Clamp => {
            let w = current.w.min(region.w);
            let h = current.h.min(region.h);
            Rect::new(
                region.x + (region.w - w) / 2,
                region.y + (region.h - h) / 2,
                w,
                h,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Rect {
        Rect::new(0, 0, 1920, 1080)
    }

    //  Split

    #[test]
    fn split_bottom_half_of_full_hd() {
        // Scenario from the command grammar: "b" with the default 50%.
        let r = split(base(), Direction::Bottom, 50);
        assert_eq!(r, Rect::new(0, 540, 1920, 540));
    }

    #[test]
    fn split_left_keeps_left_edge() {
        let r = split(base(), Direction::Left, 25);
        assert_eq!(r, Rect::new(0, 0, 480, 1080));
    }

    #[test]
    fn split_right_keeps_right_edge() {
        let r = split(base(), Direction::Right, 25);
        assert_eq!(r, Rect::new(1440, 0, 480, 1080));
    }

    #[test]
    fn split_full_is_identity() {
        assert_eq!(split(base(), Direction::Full, 30), base());
    }

    #[test]
    fn split_clamps_percent() {
        assert_eq!(
            split(base(), Direction::Left, 0),
            split(base(), Direction::Left, 1)
        );
        assert_eq!(
            split(base(), Direction::Left, 200),
            split(base(), Direction::Left, 99)
        );
    }

    #[test]
    fn complementary_splits_partition_width() {
        // l + r at the same percent cover the base width with at most 1px
        // of rounding remainder, for every percent.
        for percent in 1..=99u8 {
            let l = split(base(), Direction::Left, percent);
            let r = split(base(), Direction::Right, 100 - percent);
            let covered = l.w + r.w;
            assert!(
                (base().w - covered).abs() <= 1,
                "percent {}: {} + {} vs {}",
                percent,
                l.w,
                r.w,
                base().w
            );
        }
    }

    #[test]
    fn complementary_splits_partition_height() {
        for percent in 1..=99u8 {
            let t = split(base(), Direction::Top, percent);
            let b = split(base(), Direction::Bottom, 100 - percent);
            assert!((base().h - (t.h + b.h)).abs() <= 1);
        }
    }

    #[test]
    fn split_sequence_nests() {
        // "lrr" at 25%: each step shrinks the *result* of the previous one.
        let r = split_sequence(
            base(),
            &[Direction::Left, Direction::Right, Direction::Right],
            25,
        );
        // floor(floor(floor(1920 * 0.25) * 0.25) * 0.25) = 30
        assert_eq!(r.w, 30);
        assert_eq!(r.h, 1080);
        assert_eq!(r.right(), 480, "anchored at the right edge of the l-split");
    }

    #[test]
    fn split_sequence_empty_is_identity() {
        assert_eq!(split_sequence(base(), &[], 50), base());
    }

    #[test]
    fn split_never_degenerates() {
        let tiny = Rect::new(0, 0, 3, 3);
        let mut r = tiny;
        for _ in 0..10 {
            r = split(r, Direction::Left, 1);
        }
        assert!(r.w >= 1 && r.h >= 1);
    }

    //  Grid

    #[test]
    fn grid_middle_left_cell_of_3x3() {
        // Scenario: "3x3:r2c1" on a 1200x900 work area.
        let spec = GridSpec {
            cols: 3,
            rows: 3,
            row: 2,
            col: 1,
        };
        let cell = grid_cell(Rect::new(0, 0, 1200, 900), spec).unwrap();
        assert_eq!(cell, Rect::new(0, 300, 400, 300));
    }

    #[test]
    fn grid_last_cell_absorbs_remainder() {
        // 1000 / 3 = 333; the third column gets 1000 - 2*333 = 334.
        let spec = GridSpec {
            cols: 3,
            rows: 1,
            row: 1,
            col: 3,
        };
        let cell = grid_cell(Rect::new(0, 0, 1000, 500), spec).unwrap();
        assert_eq!(cell, Rect::new(666, 0, 334, 500));
    }

    #[test]
    fn grid_cells_tile_exactly() {
        // Union of all cells equals the base; no pair of cells overlaps.
        let rect = Rect::new(13, 7, 1001, 757);
        for (cols, rows) in [(1, 1), (2, 3), (3, 3), (5, 4), (7, 2)] {
            let mut cells = Vec::new();
            for row in 1..=rows {
                for col in 1..=cols {
                    let spec = GridSpec { cols, rows, row, col };
                    cells.push(grid_cell(rect, spec).unwrap());
                }
            }
            let total: i64 = cells.iter().map(|c| c.area()).sum();
            assert_eq!(total, rect.area(), "{}x{} cells must cover the base", cols, rows);
            for (i, a) in cells.iter().enumerate() {
                assert!(rect.contains(a));
                for b in &cells[i + 1..] {
                    assert!(!a.overlaps(b), "{} overlaps {}", a, b);
                }
            }
        }
    }

    #[test]
    fn grid_rejects_zero_dimensions() {
        let spec = GridSpec {
            cols: 0,
            rows: 2,
            row: 1,
            col: 1,
        };
        assert!(grid_cell(base(), spec).is_err());
    }

    #[test]
    fn grid_rejects_out_of_range_cell() {
        let spec = GridSpec {
            cols: 2,
            rows: 2,
            row: 3,
            col: 1,
        };
        assert!(grid_cell(base(), spec).is_err());
        let spec = GridSpec {
            cols: 2,
            rows: 2,
            row: 1,
            col: 0,
        };
        assert!(grid_cell(base(), spec).is_err());
    }

    //  Quadrant

    #[test]
    fn quadrants_equal_their_split_compositions() {
        for (q, dirs) in [
            (Quadrant::TopLeft, [Direction::Top, Direction::Left]),
            (Quadrant::TopRight, [Direction::Top, Direction::Right]),
            (Quadrant::BottomLeft, [Direction::Bottom, Direction::Left]),
            (Quadrant::BottomRight, [Direction::Bottom, Direction::Right]),
        ] {
            assert_eq!(
                quadrant(base(), q, 50),
                split(split(base(), dirs[0], 50), dirs[1], 50)
            );
        }
    }

    #[test]
    fn quadrant_q1_is_top_left_quarter() {
        assert_eq!(
            quadrant(base(), Quadrant::TopLeft, 50),
            Rect::new(0, 0, 960, 540)
        );
    }

    #[test]
    fn quadrant_q4_is_bottom_right_quarter() {
        assert_eq!(
            quadrant(base(), Quadrant::BottomRight, 50),
            Rect::new(960, 540, 960, 540)
        );
    }

    //  Spacer

    #[test]
    fn spacer_zero_is_identity() {
        assert_eq!(spacer(base(), 0), base());
        assert_eq!(spacer(base(), -10), base());
    }

    #[test]
    fn spacer_shrinks_all_sides() {
        let r = spacer(base(), 10);
        assert_eq!(r, Rect::new(10, 10, 1900, 1060));
    }

    #[test]
    fn spacer_floors_tiny_rects_at_one() {
        let r = spacer(Rect::new(0, 0, 5, 5), 100);
        assert_eq!(r.w, 1);
        assert_eq!(r.h, 1);
    }

    //  Fit

    #[test]
    fn fit_exact_returns_region() {
        let region = Rect::new(100, 100, 800, 600);
        assert_eq!(fit(Rect::new(0, 0, 50, 50), region, FitMode::Exact), region);
    }

    #[test]
    fn fit_clamp_keeps_smaller_window_size() {
        let region = Rect::new(100, 100, 800, 600);
        let current = Rect::new(0, 0, 400, 300);
        let r = fit(current, region, FitMode::Clamp);
        assert_eq!((r.w, r.h), (400, 300));
        assert!(region.contains(&r));
    }

    #[test]
    fn fit_clamp_shrinks_oversized_window() {
        let region = Rect::new(100, 100, 800, 600);
        let current = Rect::new(0, 0, 2000, 200);
        let r = fit(current, region, FitMode::Clamp);
        assert_eq!((r.w, r.h), (800, 200));
        assert!(region.contains(&r));
    }
}
