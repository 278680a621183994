//! Concrete [`HostWindowSystem`](crate::traits::HostWindowSystem) backends.
//!
//! Only Hyprland is implemented; the dispatcher never names a backend, so
//! adding another compositor means adding a module here.

pub mod hyprland;

pub use hyprland::{HyprlandError, HyprlandFactory, HyprlandHost};
