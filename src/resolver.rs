//! Maps parsed indices and search results onto concrete windows and
//! monitors.
//!
//! Resolution happens against the host-reported lists for one invocation;
//! nothing is cached.  Monitor resolution must run before any geometry is
//! computed, because the base rectangle for every placement is the *target*
//! monitor's work area — moving a window to another display and applying a
//! direction token positions it relative to the destination, never the
//! origin.

use crate::command::QuickCommand;
use crate::traits::{MonitorInfo, WindowHandle, WindowInfo};
use log::debug;

/// Errors from window/monitor resolution.  All of them abort only the
/// current command; nothing is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("window index {index} out of range ({available} windows listed)")]
    WindowIndexOutOfRange { index: usize, available: usize },

    #[error("monitor index {index} out of range ({available} monitors listed)")]
    MonitorIndexOutOfRange { index: usize, available: usize },

    /// No explicit index, no narrowed search result, and the host could not
    /// report a usable foreground window.
    #[error("no foreground window to target")]
    NoForegroundWindow,

    #[error("no monitors reported by the host")]
    NoMonitors,
}

/// Pick the target window for a command.
///
/// Priority: explicit 1-based index on the command, then a caller-supplied
/// default (used when a prior search narrowed to exactly one match), then
/// the host's foreground window.
pub fn resolve_window<'a>(
    windows: &'a [WindowInfo],
    cmd: &QuickCommand,
    default_single: Option<&'a WindowInfo>,
    foreground: Option<&WindowHandle>,
) -> Result<&'a WindowInfo, ResolveError> {
    if let Some(index) = cmd.window {
        return windows
            .get(index.wrapping_sub(1))
            .filter(|_| index >= 1)
            .ok_or(ResolveError::WindowIndexOutOfRange {
                index,
                available: windows.len(),
            });
    }

    if let Some(win) = default_single {
        debug!("targeting search result {:?}", win.title);
        return Ok(win);
    }

    let handle = foreground.ok_or(ResolveError::NoForegroundWindow)?;
    windows
        .iter()
        .find(|w| &w.handle == handle)
        .ok_or(ResolveError::NoForegroundWindow)
}

/// Pick the target monitor for a command.
///
/// Priority: explicit 1-based index into the *sorted* monitor list, then
/// the monitor the target window currently occupies, then the first monitor
/// in sorted order.
pub fn resolve_monitor<'a>(
    monitors: &'a [MonitorInfo],
    cmd: &QuickCommand,
    target_window: &WindowInfo,
) -> Result<&'a MonitorInfo, ResolveError> {
    if monitors.is_empty() {
        return Err(ResolveError::NoMonitors);
    }

    if let Some(index) = cmd.monitor {
        return monitors
            .get(index.wrapping_sub(1))
            .filter(|_| index >= 1)
            .ok_or(ResolveError::MonitorIndexOutOfRange {
                index,
                available: monitors.len(),
            });
    }

    if let Some(current) = monitors
        .iter()
        .find(|m| m.id == target_window.monitor_id)
    {
        return Ok(current);
    }

    debug!(
        "window {:?} reports unknown monitor {:?}, falling back to first",
        target_window.title, target_window.monitor_id
    );
    Ok(&monitors[0])
}

/// Case-insensitive title filter used by the search modes.
pub fn filter_windows<'a>(windows: &'a [WindowInfo], term: &str) -> Vec<&'a WindowInfo> {
    let needle = term.to_lowercase();
    windows
        .iter()
        .filter(|w| w.title.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Rect;

    fn window(addr: &str, title: &str, monitor: &str) -> WindowInfo {
        WindowInfo {
            handle: WindowHandle(addr.into()),
            title: title.into(),
            monitor_id: monitor.into(),
        }
    }

    fn monitor(id: &str, number: i32) -> MonitorInfo {
        MonitorInfo {
            id: id.into(),
            display_number: number,
            is_primary: number == 1,
            full_bounds: Rect::new(0, 0, 1920, 1080),
            work_area: Rect::new(0, 0, 1920, 1040),
        }
    }

    fn windows() -> Vec<WindowInfo> {
        vec![
            window("0x1", "Terminal", "DP-1"),
            window("0x2", "Firefox", "DP-1"),
            window("0x3", "Editor", "HDMI-A-1"),
        ]
    }

    fn monitors() -> Vec<MonitorInfo> {
        vec![monitor("DP-1", 1), monitor("HDMI-A-1", 2)]
    }

    fn cmd_with_window(index: usize) -> QuickCommand {
        QuickCommand {
            window: Some(index),
            ..Default::default()
        }
    }

    fn cmd_with_monitor(index: usize) -> QuickCommand {
        QuickCommand {
            monitor: Some(index),
            ..Default::default()
        }
    }

    //  Window resolution

    #[test]
    fn explicit_window_index_is_one_based() {
        let wins = windows();
        let w = resolve_window(&wins, &cmd_with_window(2), None, None).unwrap();
        assert_eq!(w.title, "Firefox");
    }

    #[test]
    fn window_index_zero_is_out_of_range() {
        let wins = windows();
        let err = resolve_window(&wins, &cmd_with_window(0), None, None).unwrap_err();
        assert!(matches!(err, ResolveError::WindowIndexOutOfRange { .. }));
    }

    #[test]
    fn window_index_beyond_list_is_out_of_range() {
        let wins = windows();
        let err = resolve_window(&wins, &cmd_with_window(4), None, None).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::WindowIndexOutOfRange {
                index: 4,
                available: 3
            }
        ));
    }

    #[test]
    fn default_single_wins_over_foreground() {
        let wins = windows();
        let fg = WindowHandle("0x1".into());
        let w = resolve_window(
            &wins,
            &QuickCommand::default(),
            Some(&wins[2]),
            Some(&fg),
        )
        .unwrap();
        assert_eq!(w.title, "Editor");
    }

    #[test]
    fn falls_back_to_foreground_window() {
        let wins = windows();
        let fg = WindowHandle("0x2".into());
        let w = resolve_window(&wins, &QuickCommand::default(), None, Some(&fg)).unwrap();
        assert_eq!(w.title, "Firefox");
    }

    #[test]
    fn no_foreground_is_a_resolution_failure() {
        let wins = windows();
        let err = resolve_window(&wins, &QuickCommand::default(), None, None).unwrap_err();
        assert!(matches!(err, ResolveError::NoForegroundWindow));
    }

    #[test]
    fn unlisted_foreground_is_a_resolution_failure() {
        let wins = windows();
        let fg = WindowHandle("0xdead".into());
        let err =
            resolve_window(&wins, &QuickCommand::default(), None, Some(&fg)).unwrap_err();
        assert!(matches!(err, ResolveError::NoForegroundWindow));
    }

    //  Monitor resolution

    #[test]
    fn explicit_monitor_index_is_one_based() {
        let mons = monitors();
        let target = window("0x1", "Terminal", "DP-1");
        let m = resolve_monitor(&mons, &cmd_with_monitor(2), &target).unwrap();
        assert_eq!(m.id, "HDMI-A-1");
    }

    #[test]
    fn monitor_index_out_of_range() {
        let mons = monitors();
        let target = window("0x1", "Terminal", "DP-1");
        let err = resolve_monitor(&mons, &cmd_with_monitor(3), &target).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MonitorIndexOutOfRange {
                index: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn defaults_to_the_windows_monitor() {
        let mons = monitors();
        let target = window("0x3", "Editor", "HDMI-A-1");
        let m = resolve_monitor(&mons, &QuickCommand::default(), &target).unwrap();
        assert_eq!(m.id, "HDMI-A-1");
    }

    #[test]
    fn unknown_window_monitor_falls_back_to_first() {
        let mons = monitors();
        let target = window("0x9", "Orphan", "GONE-1");
        let m = resolve_monitor(&mons, &QuickCommand::default(), &target).unwrap();
        assert_eq!(m.id, "DP-1");
    }

    #[test]
    fn empty_monitor_list_is_an_error() {
        let target = window("0x1", "Terminal", "DP-1");
        let err = resolve_monitor(&[], &QuickCommand::default(), &target).unwrap_err();
        assert!(matches!(err, ResolveError::NoMonitors));
    }

    //  Title filter

    #[test]
    fn filter_is_case_insensitive_substring() {
        let wins = windows();
        let hits = filter_windows(&wins, "fire");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Firefox");
        let hits = filter_windows(&wins, "E");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn filter_with_no_match_is_empty() {
        let wins = windows();
        assert!(filter_windows(&wins, "slack").is_empty());
    }
}
