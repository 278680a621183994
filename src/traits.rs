//! Core trait that decouples hyprsnap from any specific window system.
//!
//! The dispatcher only depends on [`HostWindowSystem`]; a concrete backend
//! (Hyprland IPC, a test harness, …) implements it.  [`HostFactory`] exists
//! so "reload" means acquiring a fresh backend instance rather than patching
//! a cached one.

use crate::rect::Rect;
use std::fmt;

/// Opaque, process-unique identifier for a window.
///
/// The contained string is whatever address format the backend uses
/// (Hyprland hands out `0x…` client addresses); nothing outside the backend
/// should interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub String);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A visible, titled, top-level window as reported by one enumeration call.
///
/// Not retained across invocations — the handle may go stale at any time,
/// which surfaces as a host error on the next call using it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    /// The [`MonitorInfo::id`] of the monitor this window currently occupies.
    pub monitor_id: String,
}

/// An active display with full and usable bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    /// Backend-unique identifier (e.g. a connector name like `"DP-1"`).
    pub id: String,
    /// Best-effort user-facing display number; `0` means unknown.
    pub display_number: i32,
    pub is_primary: bool,
    /// The full pixel bounds of the display.
    pub full_bounds: Rect,
    /// The usable region, excluding bars and reserved areas.  This is the
    /// base rectangle for all geometry operations.
    pub work_area: Rect,
}

/// Sort monitors into their user-facing order: display number ascending with
/// `0` (unknown) last, ties broken primary-first.
pub fn sort_monitors(monitors: &mut [MonitorInfo]) {
    monitors.sort_by(|a, b| {
        let key = |m: &MonitorInfo| {
            if m.display_number == 0 {
                i64::MAX
            } else {
                m.display_number as i64
            }
        };
        key(a)
            .cmp(&key(b))
            .then_with(|| b.is_primary.cmp(&a.is_primary))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Abstraction over a window system that can enumerate and mutate windows.
///
/// Every method is fallible; the dispatcher treats mutation failures as
/// best-effort (logged, command continues) and enumeration failures as
/// command-aborting.  Nothing here may block beyond a single host call.
pub trait HostWindowSystem {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// Visible, titled, top-level windows only.
    fn list_windows(&self) -> Result<Vec<WindowInfo>, Self::Error>;

    /// All active displays.  Order is backend-defined; callers sort with
    /// [`sort_monitors`].
    fn list_monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error>;

    /// Current geometry of a window.  Fails if the handle is stale.
    fn window_rect(&self, handle: &WindowHandle) -> Result<Rect, Self::Error>;

    /// Move and resize a window in one operation.
    fn move_resize(&self, handle: &WindowHandle, rect: Rect) -> Result<(), Self::Error>;

    /// Bring a window to the foreground.
    fn set_foreground(&self, handle: &WindowHandle) -> Result<(), Self::Error>;

    fn minimize(&self, handle: &WindowHandle) -> Result<(), Self::Error>;

    fn maximize(&self, handle: &WindowHandle) -> Result<(), Self::Error>;

    /// Return a maximized window to its windowed state.
    fn restore(&self, handle: &WindowHandle) -> Result<(), Self::Error>;

    fn is_maximized(&self, handle: &WindowHandle) -> Result<bool, Self::Error>;

    /// The currently focused window, or `None` if the host cannot report one.
    fn foreground_window(&self) -> Result<Option<WindowHandle>, Self::Error>;

    fn window_title(&self, handle: &WindowHandle) -> Result<String, Self::Error>;
}

/// Produces [`HostWindowSystem`] instances.
///
/// `--force-reload` re-acquires through the factory instead of reusing a
/// cached backend, so environment changes (sockets moved, instance
/// restarted) are picked up without touching the dispatcher.
pub trait HostFactory {
    type Host: HostWindowSystem;
    type Error: std::error::Error + Send + 'static;

    fn acquire(&self) -> Result<Self::Host, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(id: &str, number: i32, primary: bool) -> MonitorInfo {
        MonitorInfo {
            id: id.into(),
            display_number: number,
            is_primary: primary,
            full_bounds: Rect::new(0, 0, 1920, 1080),
            work_area: Rect::new(0, 0, 1920, 1040),
        }
    }

    #[test]
    fn sort_orders_by_display_number() {
        let mut mons = vec![
            monitor("HDMI-A-1", 2, false),
            monitor("DP-1", 1, true),
        ];
        sort_monitors(&mut mons);
        assert_eq!(mons[0].id, "DP-1");
        assert_eq!(mons[1].id, "HDMI-A-1");
    }

    #[test]
    fn sort_puts_unknown_numbers_last() {
        let mut mons = vec![
            monitor("UNKNOWN", 0, false),
            monitor("DP-2", 3, false),
            monitor("DP-1", 1, false),
        ];
        sort_monitors(&mut mons);
        let ids: Vec<&str> = mons.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["DP-1", "DP-2", "UNKNOWN"]);
    }

    #[test]
    fn sort_breaks_ties_primary_first() {
        let mut mons = vec![
            monitor("DP-2", 1, false),
            monitor("DP-1", 1, true),
        ];
        sort_monitors(&mut mons);
        assert_eq!(mons[0].id, "DP-1");
        assert!(mons[0].is_primary);
    }

    #[test]
    fn window_handle_displays_its_address() {
        let h = WindowHandle("0x5603beef".into());
        assert_eq!(h.to_string(), "0x5603beef");
    }
}
