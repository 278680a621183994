//! hyprsnap binary: parse the CLI, merge configuration, pick the host
//! backend, and hand everything to the dispatcher.

use clap::Parser;
use hyprsnap::config::Config;
use hyprsnap::dispatcher::{DispatchError, Dispatcher};
use hyprsnap::host::{HyprlandFactory, HyprlandHost};
use hyprsnap::traits::HostFactory;
use log::{debug, warn};
use std::path::PathBuf;
use std::process::ExitCode;

/// Quick-command window placement for Hyprland.
///
/// Tokens like `w2d1tl`, `q3`, or `3x3:r2c1` place a window; a non-command
/// token searches window titles; no token opens a step-by-step menu.
#[derive(Parser, Debug)]
#[command(name = "hyprsnap", version, about)]
struct Cli {
    /// Quick command, a title search term, or a search term followed by a
    /// quick command.
    tokens: Vec<String>,

    /// Print monitors in placement order and exit.
    #[arg(long)]
    list_monitors: bool,

    /// Probe the compositor socket before running instead of trusting the
    /// environment.
    #[arg(long)]
    force_reload: bool,

    /// Let commands focus the window they placed.
    #[arg(long)]
    allow_activation: bool,

    /// Percentage taken by each direction or quadrant split.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=99))]
    split_percent: Option<u8>,

    /// Gap in pixels shaved off every edge of a placement.
    #[arg(long)]
    spacer: Option<i32>,
}

/// `$XDG_CONFIG_HOME/hyprsnap/config.json`, falling back to
/// `~/.config/hyprsnap/config.json`.
fn config_path() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join("hyprsnap/config.json"));
        }
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/hyprsnap/config.json"))
}

/// A missing file means defaults; a broken file is warned about and
/// ignored rather than blocking placement.
fn load_config() -> Config {
    let Some(path) = config_path() else {
        debug!("no config directory resolvable, using defaults");
        return Config::default();
    };
    if !path.exists() {
        debug!("no config at {}, using defaults", path.display());
        return Config::default();
    }
    match Config::load(&path) {
        Ok(config) => {
            debug!("loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("ignoring config at {}: {}", path.display(), e);
            Config::default()
        }
    }
}

fn run(cli: Cli) -> Result<(), DispatchError> {
    let mut config = load_config();
    if let Some(percent) = cli.split_percent {
        config.split_percent = percent;
    }
    if let Some(spacer) = cli.spacer {
        config.spacer = spacer;
    }
    if cli.allow_activation {
        config.allow_activation = true;
    }

    let host = if cli.force_reload {
        HyprlandFactory
            .acquire()
            .map_err(|e| DispatchError::Host(e.to_string()))?
    } else {
        HyprlandHost::new()
    };

    let mut dispatcher = Dispatcher::new(host, &config);
    if cli.list_monitors {
        return dispatcher.print_monitors();
    }

    let stdin = std::io::stdin();
    dispatcher.run(&cli.tokens, &mut stdin.lock())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hyprsnap: {}", e);
            ExitCode::FAILURE
        }
    }
}
