//! hyprsnap — quick-command window placement for Hyprland.
//!
//! Compact tokens drive placements: `w2d1tl` puts window 2 in the top-left
//! quarter of monitor 1, `q3` drops the foreground window into the
//! bottom-left quadrant, `3x3:r2c1` targets a grid cell, and `undo`/`redo`
//! walk the in-process placement history.
//!
//! The crate splits into a pure core (parsing, geometry, resolution,
//! history) and a thin host layer: everything above [`traits`] is
//! compositor-agnostic and tested against mock hosts, while [`host`]
//! contains the Hyprland IPC backend.

pub mod command;
pub mod config;
pub mod dispatcher;
pub mod geometry;
pub mod history;
pub mod host;
pub mod parser;
pub mod rect;
pub mod resolver;
pub mod traits;
