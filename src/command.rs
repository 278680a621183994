//! Commands and types used throughout hyprsnap.
//!
//! This module defines the vocabulary that all components share:
//! [`QuickCommand`] is the structured form of a user's token string
//! (e.g. `"w2d1tl"`), and [`Direction`] / [`GridSpec`] / [`Quadrant`] /
//! [`WindowAction`] provide the supporting data types.
//!
//! Parsing raw token strings into these types lives in
//! [`parser`](crate::parser); this module only describes the shapes.

use std::fmt;

/// One step of a placement direction sequence.
///
/// Each direction tells the geometry engine which edge of the current
/// rectangle to keep when splitting.  `Full` is the identity — it leaves the
/// rectangle untouched and exists so that commands like `"f"` ("fill the
/// work area") have a spellable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
    Full,
}

impl Direction {
    /// Map a direction character to a direction.
    ///
    /// `d` ("down") is an alias for [`Bottom`](Direction::Bottom) and is
    /// substituted here, before the geometry engine ever sees it.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            't' => Some(Direction::Top),
            'b' | 'd' => Some(Direction::Bottom),
            'f' => Some(Direction::Full),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Top => write!(f, "top"),
            Direction::Bottom => write!(f, "bottom"),
            Direction::Full => write!(f, "full"),
        }
    }
}

/// A `colsxrows:rRcC` grid token addressing one cell of an evenly
/// partitioned rectangle.  All fields are 1-based; validation happens in the
/// geometry engine, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
    pub row: u32,
    pub col: u32,
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}:r{}c{}", self.cols, self.rows, self.row, self.col)
    }
}

/// One of the four corner regions, `q1`..`q4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// Top-left (`q1`).
    TopLeft,
    /// Top-right (`q2`).
    TopRight,
    /// Bottom-left (`q3`).
    BottomLeft,
    /// Bottom-right (`q4`).
    BottomRight,
}

impl Quadrant {
    /// Map a quadrant digit (1–4) to a quadrant.
    pub fn from_digit(d: u32) -> Option<Self> {
        match d {
            1 => Some(Quadrant::TopLeft),
            2 => Some(Quadrant::TopRight),
            3 => Some(Quadrant::BottomLeft),
            4 => Some(Quadrant::BottomRight),
            _ => None,
        }
    }

    /// The two-direction split composition this quadrant expands to.
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Quadrant::TopLeft => [Direction::Top, Direction::Left],
            Quadrant::TopRight => [Direction::Top, Direction::Right],
            Quadrant::BottomLeft => [Direction::Bottom, Direction::Left],
            Quadrant::BottomRight => [Direction::Bottom, Direction::Right],
        }
    }
}

/// A window state change requested inline (`max`, `min`, `M`, `m`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    Minimize,
    Maximize,
}

impl fmt::Display for WindowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowAction::Minimize => write!(f, "minimize"),
            WindowAction::Maximize => write!(f, "maximize"),
        }
    }
}

/// How the final target rectangle is formed, after precedence is applied.
///
/// A grid spec overrides a quadrant, which overrides the direction sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Grid(GridSpec),
    Quadrant(Quadrant),
    /// Possibly empty — an empty sequence means "no change to the base
    /// rectangle", i.e. fill the work area.
    Directions(Vec<Direction>),
}

/// The structured form of one quick-command token.
///
/// All fields are optional; an empty command is legal and simply moves the
/// target window to fill the target monitor's work area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickCommand {
    /// 1-based window index (`w2`), if given.
    pub window: Option<usize>,
    /// 1-based monitor index (`d1` / `sd1`), if given.  When several monitor
    /// tokens appear, the last one in the string wins.
    pub monitor: Option<usize>,
    /// Grid spec (`3x3:r2c1`), if given.
    pub grid: Option<GridSpec>,
    /// Quadrant tag (`q1`..`q4`), if given.
    pub quadrant: Option<Quadrant>,
    /// Ordered direction sequence from the residue characters.
    pub directions: Vec<Direction>,
    /// Inline minimize/maximize request.
    pub action: Option<WindowAction>,
    /// Inline activation flag (`activate` or a bare `a`).
    pub activate: bool,
}

impl QuickCommand {
    /// Apply the precedence rules: grid spec, if present, overrides quadrant
    /// and direction sequence entirely; otherwise quadrant overrides the
    /// direction sequence; otherwise the (possibly empty) sequence is used.
    pub fn placement(&self) -> Placement {
        if let Some(grid) = self.grid {
            Placement::Grid(grid)
        } else if let Some(q) = self.quadrant {
            Placement::Quadrant(q)
        } else {
            Placement::Directions(self.directions.clone())
        }
    }

    /// Whether the command carries anything at all — an index, a placement,
    /// an action, or an activation flag.
    pub fn is_empty(&self) -> bool {
        self.window.is_none()
            && self.monitor.is_none()
            && self.grid.is_none()
            && self.quadrant.is_none()
            && self.directions.is_empty()
            && self.action.is_none()
            && !self.activate
    }
}

/// The result of parsing one raw token string.
///
/// `undo` and `redo` short-circuit the whole grammar, so they are separate
/// variants rather than fields on [`QuickCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    Undo,
    Redo,
    Quick(QuickCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_char_aliases_d_to_bottom() {
        assert_eq!(Direction::from_char('d'), Some(Direction::Bottom));
        assert_eq!(Direction::from_char('b'), Some(Direction::Bottom));
    }

    #[test]
    fn direction_from_char_rejects_unknown() {
        assert_eq!(Direction::from_char('x'), None);
        assert_eq!(Direction::from_char('q'), None);
    }

    #[test]
    fn direction_from_char_is_case_insensitive() {
        assert_eq!(Direction::from_char('L'), Some(Direction::Left));
        assert_eq!(Direction::from_char('F'), Some(Direction::Full));
    }

    #[test]
    fn quadrant_digits() {
        assert_eq!(Quadrant::from_digit(1), Some(Quadrant::TopLeft));
        assert_eq!(Quadrant::from_digit(4), Some(Quadrant::BottomRight));
        assert_eq!(Quadrant::from_digit(0), None);
        assert_eq!(Quadrant::from_digit(5), None);
    }

    #[test]
    fn quadrant_expansions() {
        assert_eq!(
            Quadrant::TopLeft.directions(),
            [Direction::Top, Direction::Left]
        );
        assert_eq!(
            Quadrant::TopRight.directions(),
            [Direction::Top, Direction::Right]
        );
        assert_eq!(
            Quadrant::BottomLeft.directions(),
            [Direction::Bottom, Direction::Left]
        );
        assert_eq!(
            Quadrant::BottomRight.directions(),
            [Direction::Bottom, Direction::Right]
        );
    }

    #[test]
    fn grid_spec_display_round_trips_the_token_shape() {
        let g = GridSpec {
            cols: 3,
            rows: 3,
            row: 2,
            col: 1,
        };
        assert_eq!(g.to_string(), "3x3:r2c1");
    }

    #[test]
    fn placement_precedence_grid_wins() {
        let cmd = QuickCommand {
            grid: Some(GridSpec {
                cols: 2,
                rows: 2,
                row: 1,
                col: 1,
            }),
            quadrant: Some(Quadrant::TopLeft),
            directions: vec![Direction::Left],
            ..Default::default()
        };
        assert!(matches!(cmd.placement(), Placement::Grid(_)));
    }

    #[test]
    fn placement_precedence_quadrant_over_directions() {
        let cmd = QuickCommand {
            quadrant: Some(Quadrant::BottomLeft),
            directions: vec![Direction::Left],
            ..Default::default()
        };
        assert!(matches!(
            cmd.placement(),
            Placement::Quadrant(Quadrant::BottomLeft)
        ));
    }

    #[test]
    fn placement_defaults_to_directions() {
        let cmd = QuickCommand::default();
        assert_eq!(cmd.placement(), Placement::Directions(vec![]));
        assert!(cmd.is_empty());
    }
}
