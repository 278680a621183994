//! [`HostWindowSystem`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any shell command invocation or third-party crate for socket
//! discovery.

use crate::rect::Rect;
use crate::traits::{HostFactory, HostWindowSystem, MonitorInfo, WindowHandle, WindowInfo};
use log::debug;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed host.
///
/// All communication happens over Hyprland's IPC socket
/// (`$XDG_RUNTIME_DIR/hypr/<instance>/.socket.sock`).  No child processes
/// are spawned, and no connection is held between calls.
#[derive(Default)]
pub struct HyprlandHost;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandError(String);

impl HyprlandHost {
    /// Create a new handle.
    ///
    /// No connection is opened eagerly; each method call opens a short-lived
    /// IPC request.
    pub fn new() -> Self {
        Self
    }
}

/// Acquires [`HyprlandHost`] instances, probing the socket each time so a
/// restarted compositor instance is picked up instead of a stale path.
#[derive(Default)]
pub struct HyprlandFactory;

impl HostFactory for HyprlandFactory {
    type Host = HyprlandHost;
    type Error = HyprlandError;

    fn acquire(&self) -> Result<HyprlandHost, HyprlandError> {
        // A version query doubles as a connectivity check.
        let version = ipc_json("version")?;
        debug!("hyprland responded to version probe ({} bytes)", version.len());
        Ok(HyprlandHost::new())
    }
}

//  Direct Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
fn socket_path() -> Result<PathBuf, HyprlandError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandError(format!("utf-8: {}", e)))
}

/// Send a JSON data query (`j/<command>`) and return the raw JSON string.
fn ipc_json(data_command: &str) -> Result<String, HyprlandError> {
    ipc_request(&format!("j/{}", data_command))
}

/// Send a dispatch command and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandError> {
    let response = ipc_request(&format!("/dispatch {}", args))?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandError(format!("dispatch error: {}", response)))
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/monitors`.
#[derive(Deserialize)]
struct MonitorJson {
    id: i64,
    name: String,
    width: i32,
    height: i32,
    x: i32,
    y: i32,
    /// Pixels reserved for bars, as `[left, top, right, bottom]`.
    #[serde(default)]
    reserved: [i32; 4],
}

/// Subset of the JSON object returned by `j/clients`.
#[derive(Deserialize)]
struct ClientJson {
    address: String,
    title: String,
    monitor: i64,
    at: [i32; 2],
    size: [i32; 2],
    #[serde(default)]
    mapped: bool,
    #[serde(default)]
    hidden: bool,
    workspace: WorkspaceJson,
    /// Bool before Hyprland 0.42, fullscreen-mode integer after.
    #[serde(default)]
    fullscreen: serde_json::Value,
}

#[derive(Deserialize)]
struct WorkspaceJson {
    id: i64,
}

/// Subset of the JSON object returned by `j/activewindow`.
#[derive(Deserialize)]
struct ActiveWindowJson {
    address: String,
}

impl MonitorJson {
    fn into_info(self) -> MonitorInfo {
        let [left, top, right, bottom] = self.reserved;
        MonitorInfo {
            // Hyprland has no primary-monitor or display-number concept;
            // its stable id 0 is the first monitor it brought up.
            display_number: (self.id + 1) as i32,
            is_primary: self.id == 0,
            id: self.name,
            full_bounds: Rect::new(self.x, self.y, self.width, self.height),
            work_area: Rect::new(
                self.x + left,
                self.y + top,
                self.width - left - right,
                self.height - top - bottom,
            ),
        }
    }
}

impl ClientJson {
    /// Visible, titled, top-level windows only.  Special workspaces
    /// (negative ids) hold scratchpads and our own minimized windows.
    fn is_listable(&self) -> bool {
        self.mapped && !self.hidden && !self.title.is_empty() && self.workspace.id > 0
    }

    fn is_fullscreen(&self) -> bool {
        match &self.fullscreen {
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
            _ => false,
        }
    }

    fn rect(&self) -> Rect {
        Rect::new(self.at[0], self.at[1], self.size[0], self.size[1])
    }
}

fn parse_monitors(json: &str) -> Result<Vec<MonitorJson>, HyprlandError> {
    serde_json::from_str(json).map_err(|e| HyprlandError(format!("parse monitors: {}", e)))
}

fn parse_clients(json: &str) -> Result<Vec<ClientJson>, HyprlandError> {
    serde_json::from_str(json).map_err(|e| HyprlandError(format!("parse clients: {}", e)))
}

/// Look one client up by address.  Every geometry/state query goes through
/// a fresh `j/clients` round trip; handles are never cached.
fn client_by_address(handle: &WindowHandle) -> Result<ClientJson, HyprlandError> {
    let json = ipc_json("clients")?;
    parse_clients(&json)?
        .into_iter()
        .find(|c| c.address == handle.0)
        .ok_or_else(|| HyprlandError(format!("no client at address {}", handle.0)))
}

/// Look a monitor's name up by its numeric Hyprland id.
fn monitor_name_by_id(monitors: &[MonitorJson], id: i64) -> Option<String> {
    monitors.iter().find(|m| m.id == id).map(|m| m.name.clone())
}

//  HostWindowSystem implementation

impl HostWindowSystem for HyprlandHost {
    type Error = HyprlandError;

    fn list_windows(&self) -> Result<Vec<WindowInfo>, HyprlandError> {
        let monitors = parse_monitors(&ipc_json("monitors")?)?;
        let clients = parse_clients(&ipc_json("clients")?)?;
        Ok(clients
            .into_iter()
            .filter(ClientJson::is_listable)
            .map(|c| WindowInfo {
                monitor_id: monitor_name_by_id(&monitors, c.monitor).unwrap_or_default(),
                handle: WindowHandle(c.address),
                title: c.title,
            })
            .collect())
    }

    fn list_monitors(&self) -> Result<Vec<MonitorInfo>, HyprlandError> {
        let monitors = parse_monitors(&ipc_json("monitors")?)?;
        Ok(monitors.into_iter().map(MonitorJson::into_info).collect())
    }

    fn window_rect(&self, handle: &WindowHandle) -> Result<Rect, HyprlandError> {
        Ok(client_by_address(handle)?.rect())
    }

    fn move_resize(&self, handle: &WindowHandle, rect: Rect) -> Result<(), HyprlandError> {
        // Tiled windows ignore pixel placement, so force floating first.
        ipc_dispatch(&format!("setfloating address:{}", handle.0))?;
        ipc_dispatch(&format!(
            "resizewindowpixel exact {} {},address:{}",
            rect.w, rect.h, handle.0
        ))?;
        ipc_dispatch(&format!(
            "movewindowpixel exact {} {},address:{}",
            rect.x, rect.y, handle.0
        ))
    }

    fn set_foreground(&self, handle: &WindowHandle) -> Result<(), HyprlandError> {
        ipc_dispatch(&format!("focuswindow address:{}", handle.0))
    }

    fn minimize(&self, handle: &WindowHandle) -> Result<(), HyprlandError> {
        // Hyprland has no real minimize; parking the window on a special
        // workspace is the conventional equivalent.
        ipc_dispatch(&format!(
            "movetoworkspacesilent special:minimized,address:{}",
            handle.0
        ))
    }

    fn maximize(&self, handle: &WindowHandle) -> Result<(), HyprlandError> {
        // The fullscreen dispatch toggles, so skip when already maximized.
        if client_by_address(handle)?.is_fullscreen() {
            return Ok(());
        }
        self.set_foreground(handle)?;
        ipc_dispatch("fullscreen 1")
    }

    fn restore(&self, handle: &WindowHandle) -> Result<(), HyprlandError> {
        if !client_by_address(handle)?.is_fullscreen() {
            return Ok(());
        }
        self.set_foreground(handle)?;
        ipc_dispatch("fullscreen 1")
    }

    fn is_maximized(&self, handle: &WindowHandle) -> Result<bool, HyprlandError> {
        Ok(client_by_address(handle)?.is_fullscreen())
    }

    fn foreground_window(&self) -> Result<Option<WindowHandle>, HyprlandError> {
        let json = ipc_json("activewindow")?;
        // Hyprland returns an empty object `{}` when no window is focused.
        if json.trim() == "{}" {
            return Ok(None);
        }
        let w: ActiveWindowJson =
            serde_json::from_str(&json).map_err(|e| HyprlandError(format!("parse: {}", e)))?;
        Ok(Some(WindowHandle(w.address)))
    }

    fn window_title(&self, handle: &WindowHandle) -> Result<String, HyprlandError> {
        Ok(client_by_address(handle)?.title)
    }
}
