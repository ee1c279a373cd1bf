//! Key input for the interactive menu.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// A single key press, reduced to what the menu distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    /// Ctrl+C.
    Interrupt,
    Other,
}

/// Blocking source of key presses.
pub trait InputSource {
    fn read_key(&mut self) -> io::Result<Key>;
}

impl<S: InputSource + ?Sized> InputSource for &mut S {
    fn read_key(&mut self) -> io::Result<Key> {
        (**self).read_key()
    }
}

/// Reads one key press at a time from the terminal.
///
/// Raw mode is only held while waiting for the key, so everything the
/// dispatcher prints goes through a normally configured terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

impl InputSource for TerminalInput {
    fn read_key(&mut self) -> io::Result<Key> {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let Event::Key(key) = event::read()? {
                // Only presses; release/repeat events show up on some platforms.
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                return Ok(translate(key));
            }
        }
    }
}

fn translate(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

/// Replays a fixed sequence of keys, then answers `Escape` forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    keys: VecDeque<Key>,
    consumed: usize,
}

impl ScriptedInput {
    pub fn new<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Keys read so far, including any `Escape` served after the script ran out.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_key(&mut self) -> io::Result<Key> {
        self.consumed += 1;
        Ok(self.keys.pop_front().unwrap_or(Key::Escape))
    }
}
