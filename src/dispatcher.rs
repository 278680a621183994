//! The orchestrator that ties parser, resolver, geometry, history, and the
//! host window system together.
//!
//! [`Dispatcher`] owns the [`History`] and reacts to CLI input by selecting
//! a [`Mode`], parsing the quick command, resolving the target window and
//! monitor, computing the destination rectangle, and issuing host calls.
//!
//! Host mutations on the placement path are best-effort: a failed
//! activation or restore is logged and the command carries on, so a
//! partially-degraded host never aborts an otherwise-successful placement.
//! Resolution and validation failures abort the current command only —
//! nothing here is fatal to the process.

use crate::command::{ParsedInput, Placement, QuickCommand, WindowAction};
use crate::config::Config;
use crate::geometry::{self, FitMode, GeometryError};
use crate::history::{History, HistoryEntry};
use crate::parser;
use crate::rect::Rect;
use crate::resolver::{self, ResolveError};
use crate::traits::{sort_monitors, HostWindowSystem, MonitorInfo, WindowHandle};
use log::{debug, info, warn};
use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use std::time::Duration;

/// How long to wait after restoring a maximized window before reading its
/// geometry.  The host applies the restore asynchronously relative to us.
const RESTORE_SETTLE: Duration = Duration::from_millis(150);

/// Possible errors from dispatching a command.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Enumeration failed — without window/monitor lists nothing can run.
    #[error("host error: {0}")]
    Host(String),
}

/// Which entry path a CLI invocation takes, classified from its positional
/// tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// A single token that parses as a quick command; runs against the full
    /// window list, defaulting to the foreground window.
    DirectQuick(String),
    /// Two tokens: a title filter and a quick command.  Executes directly
    /// only if the filter yields exactly one match.
    SearchThenQuick { term: String, command: String },
    /// A single token that is not a recognized quick-command shape: filter,
    /// list the matches, then prompt.
    SearchOnly(String),
    /// No usable input: list everything and prompt step by step.
    InteractiveMenu,
}

impl Mode {
    /// Classify positional CLI tokens into an entry mode.
    pub fn classify(tokens: &[String]) -> Mode {
        let tokens: Vec<&str> = tokens
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        match tokens.as_slice() {
            [] => Mode::InteractiveMenu,
            [one] => {
                if parser::is_quick_command(one) {
                    Mode::DirectQuick(one.to_string())
                } else {
                    Mode::SearchOnly(one.to_string())
                }
            }
            [term, command, rest @ ..] => {
                if !rest.is_empty() {
                    warn!("ignoring extra tokens {:?}", rest);
                }
                Mode::SearchThenQuick {
                    term: term.to_string(),
                    command: command.to_string(),
                }
            }
        }
    }
}

/// Restores the activation flag when an inline override goes out of scope,
/// on every exit path.
struct ActivationOverride {
    flag: Rc<Cell<bool>>,
    prev: bool,
}

impl ActivationOverride {
    fn engage(flag: &Rc<Cell<bool>>, value: bool) -> Self {
        let prev = flag.replace(value);
        Self {
            flag: Rc::clone(flag),
            prev,
        }
    }
}

impl Drop for ActivationOverride {
    fn drop(&mut self) {
        self.flag.set(self.prev);
    }
}

/// Log a failed best-effort host call and carry on.
fn best_effort<T, E: std::error::Error>(what: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("{} failed: {}", what, e);
            None
        }
    }
}

/// Orchestrates one command per invocation.
///
/// Generic over any [`HostWindowSystem`] implementation, making it
/// completely independent of Hyprland or any other concrete backend.
pub struct Dispatcher<H: HostWindowSystem> {
    host: H,
    history: History,
    split_percent: u8,
    spacer: i32,
    allow_activation: Rc<Cell<bool>>,
}

impl<H: HostWindowSystem> Dispatcher<H> {
    /// Create a dispatcher with settings from the merged configuration.
    pub fn new(host: H, config: &Config) -> Self {
        Self {
            host,
            history: History::new(),
            split_percent: config.effective_split_percent(),
            spacer: config.effective_spacer(),
            allow_activation: Rc::new(Cell::new(config.allow_activation)),
        }
    }

    /// Shared view of the history stacks (for inspection and tests).
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Classify `tokens` and run the resulting mode to its terminal state.
    ///
    /// `input` feeds the prompting modes; pass a locked stdin in production.
    pub fn run(&mut self, tokens: &[String], input: &mut dyn BufRead) -> Result<(), DispatchError> {
        match Mode::classify(tokens) {
            Mode::DirectQuick(token) => {
                info!("direct quick command {:?}", token);
                self.run_parsed(parser::parse(&token), None)
            }
            Mode::SearchThenQuick { term, command } => {
                info!("search {:?} then {:?}", term, command);
                self.search(&term, Some(&command), input)
            }
            Mode::SearchOnly(term) => {
                info!("search only {:?}", term);
                self.search(&term, None, input)
            }
            Mode::InteractiveMenu => {
                info!("interactive menu");
                self.interactive(input)
            }
        }
    }

    /// Print the sorted monitor table (`--list-monitors`).
    pub fn print_monitors(&self) -> Result<(), DispatchError> {
        let monitors = self.sorted_monitors()?;
        for (i, m) in monitors.iter().enumerate() {
            println!(
                "{:>2}. {} {} full {} work {}",
                i + 1,
                m.id,
                if m.is_primary { "(primary)" } else { "" },
                m.full_bounds,
                m.work_area
            );
        }
        Ok(())
    }

    //  Mode bodies

    fn run_parsed(
        &mut self,
        parsed: ParsedInput,
        default_single: Option<&WindowHandle>,
    ) -> Result<(), DispatchError> {
        match parsed {
            ParsedInput::Undo => self.undo(),
            ParsedInput::Redo => self.redo(),
            ParsedInput::Quick(cmd) => self.execute(cmd, default_single),
        }
    }

    fn search(
        &mut self,
        term: &str,
        quick_token: Option<&str>,
        input: &mut dyn BufRead,
    ) -> Result<(), DispatchError> {
        let windows = self
            .host
            .list_windows()
            .map_err(|e| DispatchError::Host(e.to_string()))?;
        let matches = resolver::filter_windows(&windows, term);

        if matches.is_empty() {
            println!("no window title matches {:?}", term);
            return Ok(());
        }

        if matches.len() == 1 {
            let handle = matches[0].handle.clone();
            println!("1 match: {}", matches[0].title);
            let token = match quick_token {
                Some(t) => t.to_string(),
                None => match prompt_line("quick command: ", input) {
                    Some(t) => t,
                    None => {
                        println!("cancelled");
                        return Ok(());
                    }
                },
            };
            return self.run_parsed(parser::parse(&token), Some(&handle));
        }

        // Ambiguous search: list the matches and fall back to prompting,
        // even when a quick command was supplied alongside the term.
        println!("{} windows match {:?}:", matches.len(), term);
        for (i, w) in matches.iter().enumerate() {
            println!("{:>2}. {}", i + 1, w.title);
        }
        if quick_token.is_some() {
            println!("search is ambiguous; pick a window first");
        }
        let Some(choice) = prompt_line("window number: ", input) else {
            println!("cancelled");
            return Ok(());
        };
        let Some(win) = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|n| matches.get(n))
        else {
            println!("not a listed window number: {:?}", choice);
            return Ok(());
        };
        let handle = win.handle.clone();
        let token = match quick_token {
            Some(t) => t.to_string(),
            None => match prompt_line("quick command: ", input) {
                Some(t) => t,
                None => {
                    println!("cancelled");
                    return Ok(());
                }
            },
        };
        self.run_parsed(parser::parse(&token), Some(&handle))
    }

    fn interactive(&mut self, input: &mut dyn BufRead) -> Result<(), DispatchError> {
        let windows = self
            .host
            .list_windows()
            .map_err(|e| DispatchError::Host(e.to_string()))?;
        let monitors = self.sorted_monitors()?;

        if windows.is_empty() {
            println!("no windows to place");
            return Ok(());
        }

        println!("windows:");
        for (i, w) in windows.iter().enumerate() {
            println!("{:>2}. {}", i + 1, w.title);
        }
        println!("monitors:");
        for (i, m) in monitors.iter().enumerate() {
            println!(
                "{:>2}. {} {} work {}",
                i + 1,
                m.id,
                if m.is_primary { "(primary)" } else { "" },
                m.work_area
            );
        }

        let Some(win_choice) = prompt_line("window number: ", input) else {
            println!("cancelled");
            return Ok(());
        };
        let Ok(win_index) = win_choice.parse::<usize>() else {
            println!("not a window number: {:?}", win_choice);
            return Ok(());
        };

        // Empty answer keeps the window on its current monitor.
        let mon_index = match prompt_line_allow_empty("monitor number (empty to keep): ", input) {
            None => {
                println!("cancelled");
                return Ok(());
            }
            Some(text) if text.is_empty() => None,
            Some(text) => match text.parse::<usize>() {
                Ok(n) => Some(n),
                Err(_) => {
                    println!("not a monitor number: {:?}", text);
                    return Ok(());
                }
            },
        };

        let Some(token) = prompt_line("placement (e.g. tl, q3, 3x3:r2c1, max): ", input) else {
            println!("cancelled");
            return Ok(());
        };

        match parser::parse(&token) {
            ParsedInput::Undo => self.undo(),
            ParsedInput::Redo => self.redo(),
            ParsedInput::Quick(mut cmd) => {
                // Inline tokens win over the menu choices.
                cmd.window = cmd.window.or(Some(win_index));
                cmd.monitor = cmd.monitor.or(mon_index);
                self.execute(cmd, None)
            }
        }
    }

    //  Command execution

    fn execute(
        &mut self,
        cmd: QuickCommand,
        default_single: Option<&WindowHandle>,
    ) -> Result<(), DispatchError> {
        let monitors = self.sorted_monitors()?;
        let windows = self
            .host
            .list_windows()
            .map_err(|e| DispatchError::Host(e.to_string()))?;

        let foreground = best_effort("foreground query", self.host.foreground_window()).flatten();
        let narrowed = default_single
            .and_then(|handle| windows.iter().find(|w| &w.handle == handle));
        if default_single.is_some() && narrowed.is_none() {
            warn!("search result disappeared before execution");
        }

        let window =
            resolver::resolve_window(&windows, &cmd, narrowed, foreground.as_ref())?.clone();
        // Monitor resolution must precede geometry: the base rectangle is
        // always the *target* monitor's work area.
        let monitor = resolver::resolve_monitor(&monitors, &cmd, &window)?.clone();

        let _activation = cmd
            .activate
            .then(|| ActivationOverride::engage(&self.allow_activation, true));

        if let Some(action) = cmd.action {
            self.apply_action(&window.handle, &window.title, action);
            self.activate_if_allowed(&window.handle);
            return Ok(());
        }

        let base = monitor.work_area;
        let region = match cmd.placement() {
            Placement::Grid(spec) => geometry::grid_cell(base, spec)?,
            Placement::Quadrant(q) => geometry::quadrant(base, q, self.split_percent),
            Placement::Directions(dirs) => {
                geometry::split_sequence(base, &dirs, self.split_percent)
            }
        };
        let region = geometry::spacer(region, self.spacer);

        let from = self.read_windowed_rect(&window.handle);
        let target = fit_target(from, region);

        debug!("placing {:?}: {:?} -> {}", window.title, from, target);
        if best_effort(
            "move/resize",
            self.host.move_resize(&window.handle, target),
        )
        .is_some()
        {
            if let Some(from) = from {
                self.history.record(window.handle.clone(), from, target);
            } else {
                debug!("window rect unreadable before move, not recorded");
            }
            println!("{} -> {} on {}", window.title, target, monitor.id);
        } else {
            println!("failed to place {} (see log)", window.title);
        }

        self.activate_if_allowed(&window.handle);
        Ok(())
    }

    fn apply_action(&mut self, handle: &WindowHandle, title: &str, action: WindowAction) {
        let from = self.read_windowed_rect(handle);
        let ok = match action {
            WindowAction::Minimize => {
                best_effort("minimize", self.host.minimize(handle)).is_some()
            }
            WindowAction::Maximize => {
                best_effort("maximize", self.host.maximize(handle)).is_some()
            }
        };
        if !ok {
            println!("failed to {} {} (see log)", action, title);
            return;
        }
        let after = best_effort("rect after action", self.host.window_rect(handle));
        // State changes are history-tracked only with a readable
        // before/after pair, so undo after a maximize restores the prior
        // windowed bounds.
        if let (Some(from), Some(after)) = (from, after) {
            self.history.record(handle.clone(), from, after);
        }
        println!("{}d {}", action, title);
    }

    //  Undo / redo

    fn undo(&mut self) -> Result<(), DispatchError> {
        let Some(entry) = self.history.pop_undo() else {
            warn!("undo stack is empty");
            println!("nothing to undo");
            return Ok(());
        };
        let before = self
            .read_windowed_rect(&entry.handle)
            .unwrap_or(entry.to);
        best_effort("undo move", self.host.move_resize(&entry.handle, entry.from));
        // The host may clamp or snap, so the redo entry records where the
        // window actually landed, not where we asked it to go.
        let actual = best_effort("rect after undo", self.host.window_rect(&entry.handle))
            .unwrap_or(entry.from);
        self.history
            .push_redo(HistoryEntry::new(entry.handle.clone(), actual, before));
        println!("undid: {} -> {}", before, actual);
        Ok(())
    }

    fn redo(&mut self) -> Result<(), DispatchError> {
        let Some(entry) = self.history.pop_redo() else {
            warn!("redo stack is empty");
            println!("nothing to redo");
            return Ok(());
        };
        let before = self
            .read_windowed_rect(&entry.handle)
            .unwrap_or(entry.from);
        best_effort("redo move", self.host.move_resize(&entry.handle, entry.to));
        let actual = best_effort("rect after redo", self.host.window_rect(&entry.handle))
            .unwrap_or(entry.to);
        self.history
            .push_undo(HistoryEntry::new(entry.handle.clone(), before, actual));
        println!("redid: {} -> {}", before, actual);
        Ok(())
    }

    //  Helpers

    fn sorted_monitors(&self) -> Result<Vec<MonitorInfo>, DispatchError> {
        let mut monitors = self
            .host
            .list_monitors()
            .map_err(|e| DispatchError::Host(e.to_string()))?;
        sort_monitors(&mut monitors);
        Ok(monitors)
    }

    /// Read a window's true windowed geometry.
    ///
    /// A maximized window is restored first (with a settle delay, since the
    /// host applies the restore asynchronously) so the captured rectangle is
    /// real windowed geometry rather than a maximized placeholder.
    fn read_windowed_rect(&self, handle: &WindowHandle) -> Option<Rect> {
        if best_effort("maximized query", self.host.is_maximized(handle)).unwrap_or(false) {
            if best_effort("restore", self.host.restore(handle)).is_some() {
                std::thread::sleep(RESTORE_SETTLE);
            }
        }
        best_effort("window rect", self.host.window_rect(handle))
    }

    fn activate_if_allowed(&self, handle: &WindowHandle) {
        if self.allow_activation.get() {
            best_effort("activation", self.host.set_foreground(handle));
        }
    }
}

/// Placements resize to exactly fill the destination; `Clamp` stays
/// available in the geometry engine for callers that want less intrusion.
fn fit_target(current: Option<Rect>, region: Rect) -> Rect {
    geometry::fit(current.unwrap_or(region), region, FitMode::Exact)
}

fn prompt_line(prompt: &str, input: &mut dyn BufRead) -> Option<String> {
    prompt_line_allow_empty(prompt, input).filter(|t| !t.is_empty())
}

fn prompt_line_allow_empty(prompt: &str, input: &mut dyn BufRead) -> Option<String> {
    print!("{}", prompt);
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(e) => {
            warn!("prompt read failed: {}", e);
            None
        }
    }
}
