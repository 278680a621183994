//! Quick-command tokenizer.
//!
//! Turns a raw token string like `"w2d1tl"` into a [`ParsedInput`].  The
//! grammar is order-sensitive: each extraction rule consumes its match and
//! later rules only see what earlier rules left behind.
//!
//! 1. `undo` / `redo` short-circuit everything.
//! 2. `w<digits>` — window index (first occurrence).
//! 3. `s?d<digits>` — monitor index (all occurrences removed, last wins,
//!    so a user can correct themselves inline: `"d1d2"` targets monitor 2).
//! 4. `<cols>x<rows>:r<row>c<col>` — grid spec.
//! 5. `q1`..`q4` — quadrant.
//! 6. Residue: action words (`maximize`/`max`/bare `M`, `minimize`/`min`/
//!    isolated `m`), then the activation word (`activate` or a bare `a`).
//! 7. Whatever remains, filtered to `{d,l,r,t,b,f}`, is the direction
//!    sequence.  Unrecognized characters are dropped, not an error.
//!
//! Out-of-range window/monitor indices are not a parse failure — the
//! resolver reports those against the actual window/monitor lists.

use crate::command::{
    Direction, GridSpec, ParsedInput, Quadrant, QuickCommand, WindowAction,
};
use log::debug;

/// Parse one raw token string.
///
/// Never fails: unrecognized residue characters are silently dropped (a
/// deliberate leniency, logged at debug level), and an input with nothing
/// recognizable simply yields an empty [`QuickCommand`].
pub fn parse(input: &str) -> ParsedInput {
    parse_with_dropped(input).0
}

/// Whether `input` has the shape of a quick command.
///
/// Used by the dispatcher to tell a command token apart from a search term.
/// True for `undo`/`redo`, for any input that yields an index, grid,
/// quadrant, action, or activation flag, and for inputs made up entirely of
/// direction characters.  A string like `"firefox"` contains direction
/// characters but also unmatched ones, so it is treated as a search term.
pub fn is_quick_command(input: &str) -> bool {
    match parse_with_dropped(input) {
        (ParsedInput::Undo, _) | (ParsedInput::Redo, _) => true,
        (ParsedInput::Quick(cmd), dropped) => {
            if cmd.window.is_some()
                || cmd.monitor.is_some()
                || cmd.grid.is_some()
                || cmd.quadrant.is_some()
                || cmd.action.is_some()
                || cmd.activate
            {
                true
            } else {
                !cmd.directions.is_empty() && dropped == 0
            }
        }
    }
}

fn parse_with_dropped(input: &str) -> (ParsedInput, usize) {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("undo") {
        return (ParsedInput::Undo, 0);
    }
    if trimmed.eq_ignore_ascii_case("redo") {
        return (ParsedInput::Redo, 0);
    }

    let (window, rest) = take_window(trimmed);
    let (monitor, rest) = take_monitor(&rest);
    let (grid, rest) = take_grid(&rest);
    let (quadrant, rest) = take_quadrant(&rest);
    let (action, rest) = take_action(&rest);
    let (activate, rest) = take_activation(&rest);

    let mut directions = Vec::new();
    let mut dropped = Vec::new();
    for c in rest.chars() {
        if c.is_whitespace() {
            continue;
        }
        match Direction::from_char(c) {
            Some(d) => directions.push(d),
            None => dropped.push(c),
        }
    }
    if !dropped.is_empty() {
        // Leniency: a stray character might be a typo for an action or
        // direction, but the grammar drops it rather than failing.
        debug!("dropped unrecognized characters {:?} from {:?}", dropped, input);
    }

    (
        ParsedInput::Quick(QuickCommand {
            window,
            monitor,
            grid,
            quadrant,
            directions,
            action,
            activate,
        }),
        dropped.len(),
    )
}

//  Extraction rules

/// Parse a digit run without overflow panics; saturates at the type max so
/// an absurd index still reaches the resolver as "out of range".
fn digits_to_usize(digits: &[char]) -> usize {
    digits.iter().fold(0usize, |acc, c| {
        acc.saturating_mul(10)
            .saturating_add(c.to_digit(10).unwrap_or(0) as usize)
    })
}

fn digits_to_u32(digits: &[char]) -> u32 {
    digits.iter().fold(0u32, |acc, c| {
        acc.saturating_mul(10)
            .saturating_add(c.to_digit(10).unwrap_or(0))
    })
}

fn remove_span(chars: &[char], start: usize, end: usize) -> String {
    chars[..start].iter().chain(&chars[end..]).collect()
}

/// Rule 2: first `w<digits>` becomes the 1-based window index.
fn take_window(s: &str) -> (Option<usize>, String) {
    let chars: Vec<char> = s.chars().collect();
    for i in 0..chars.len() {
        if chars[i].eq_ignore_ascii_case(&'w')
            && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
        {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            let value = digits_to_usize(&chars[i + 1..j]);
            return (Some(value), remove_span(&chars, i, j));
        }
    }
    (None, s.to_string())
}

/// Rule 3: every `s?d<digits>` is removed; the last occurrence wins.
fn take_monitor(s: &str) -> (Option<usize>, String) {
    let chars: Vec<char> = s.chars().collect();
    let mut keep = vec![true; chars.len()];
    let mut value = None;
    let mut i = 0;
    while i < chars.len() {
        let start = i;
        let mut j = i;
        if chars[j].eq_ignore_ascii_case(&'s')
            && chars.get(j + 1).is_some_and(|c| c.eq_ignore_ascii_case(&'d'))
        {
            j += 1;
        }
        if chars[j].eq_ignore_ascii_case(&'d')
            && chars.get(j + 1).is_some_and(|c| c.is_ascii_digit())
        {
            let mut k = j + 1;
            while k < chars.len() && chars[k].is_ascii_digit() {
                k += 1;
            }
            value = Some(digits_to_usize(&chars[j + 1..k]));
            for slot in &mut keep[start..k] {
                *slot = false;
            }
            i = k;
        } else {
            i = start + 1;
        }
    }
    let rest: String = chars
        .iter()
        .zip(&keep)
        .filter(|(_, k)| **k)
        .map(|(c, _)| *c)
        .collect();
    (value, rest)
}

/// Rule 4: `<cols>x<rows>:r<row>c<col>`.
fn take_grid(s: &str) -> (Option<GridSpec>, String) {
    let chars: Vec<char> = s.chars().collect();

    let read_digits = |from: usize| -> Option<(usize, u32)> {
        let mut j = from;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        (j > from).then(|| (j, digits_to_u32(&chars[from..j])))
    };
    let expect = |at: usize, c: char| -> Option<usize> {
        chars
            .get(at)
            .is_some_and(|g| g.eq_ignore_ascii_case(&c))
            .then_some(at + 1)
    };

    for i in 0..chars.len() {
        let Some((j, cols)) = read_digits(i) else { continue };
        let Some(j) = expect(j, 'x') else { continue };
        let Some((j, rows)) = read_digits(j) else { continue };
        let Some(j) = expect(j, ':') else { continue };
        let Some(j) = expect(j, 'r') else { continue };
        let Some((j, row)) = read_digits(j) else { continue };
        let Some(j) = expect(j, 'c') else { continue };
        let Some((j, col)) = read_digits(j) else { continue };
        let spec = GridSpec { cols, rows, row, col };
        return (Some(spec), remove_span(&chars, i, j));
    }
    (None, s.to_string())
}

/// Rule 5: `q` followed by a digit 1–4.
fn take_quadrant(s: &str) -> (Option<Quadrant>, String) {
    let chars: Vec<char> = s.chars().collect();
    for i in 0..chars.len() {
        if chars[i].eq_ignore_ascii_case(&'q') {
            if let Some(q) = chars
                .get(i + 1)
                .and_then(|c| c.to_digit(10))
                .and_then(Quadrant::from_digit)
            {
                return (Some(q), remove_span(&chars, i, i + 2));
            }
        }
    }
    (None, s.to_string())
}

/// Find a case-insensitive substring; return the consumed remainder.
///
/// Works on chars rather than bytes so arbitrary input (search terms reach
/// this code too) cannot split a multi-byte character.
fn remove_word_ci(s: &str, word: &str) -> Option<String> {
    let chars: Vec<char> = s.chars().collect();
    let w: Vec<char> = word.chars().collect();
    if w.is_empty() || chars.len() < w.len() {
        return None;
    }
    for i in 0..=chars.len() - w.len() {
        if chars[i..i + w.len()]
            .iter()
            .zip(&w)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
        {
            return Some(remove_span(&chars, i, i + w.len()));
        }
    }
    None
}

/// Find an exact-case character with no alphanumeric neighbors.
fn remove_isolated(s: &str, target: char) -> Option<String> {
    let chars: Vec<char> = s.chars().collect();
    for i in 0..chars.len() {
        if chars[i] != target {
            continue;
        }
        let prev_ok = i == 0 || !chars[i - 1].is_ascii_alphanumeric();
        let next_ok = i + 1 == chars.len() || !chars[i + 1].is_ascii_alphanumeric();
        if prev_ok && next_ok {
            return Some(remove_span(&chars, i, i + 1));
        }
    }
    None
}

/// Rule 6 (actions): maximize takes precedence over minimize.  Full words
/// are removed before their abbreviations so `"maximize"` does not leave an
/// `a` behind to collide with the activation flag.
fn take_action(s: &str) -> (Option<WindowAction>, String) {
    for word in ["maximize", "max"] {
        if let Some(rest) = remove_word_ci(s, word) {
            return (Some(WindowAction::Maximize), rest);
        }
    }
    if let Some(rest) = remove_isolated(s, 'M') {
        return (Some(WindowAction::Maximize), rest);
    }
    for word in ["minimize", "min"] {
        if let Some(rest) = remove_word_ci(s, word) {
            return (Some(WindowAction::Minimize), rest);
        }
    }
    if let Some(rest) = remove_isolated(s, 'm') {
        return (Some(WindowAction::Minimize), rest);
    }
    (None, s.to_string())
}

/// Rule 6 (activation): the word `activate`, or a bare lowercase `a` left
/// over once actions are removed.
///
/// The bare-`a` form is known to collide with search-like residue that
/// happens to contain a lone `a`; the behavior is kept as-is rather than
/// guessed around.
fn take_activation(s: &str) -> (bool, String) {
    if let Some(rest) = remove_word_ci(s, "activate") {
        return (true, rest);
    }
    if let Some(rest) = remove_isolated(s, 'a') {
        return (true, rest);
    }
    (false, s.to_string())
}
