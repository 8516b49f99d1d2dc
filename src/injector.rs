//! Keystroke delivery. One real backend on the OS input queue, a console
//! backend for dry runs, and a recording backend for tests.

use std::io::{self, Write};

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use tracing::debug;

use crate::error::{Error, Result};

/// Named non-character keys a typing plan can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ControlKey {
    Backspace,
}

/// Synchronous keystroke consumer. Delivery is assumed reliable; errors
/// propagate to the session and are never retried.
pub trait KeySink {
    fn send_char(&mut self, ch: char) -> Result<()>;
    fn press(&mut self, key: ControlKey) -> Result<()>;
}

/// Injects keystrokes into the focused window through the OS input queue.
pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    pub fn new() -> Result<Self> {
        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| Error::SinkUnavailable(e.to_string()))?;
        Ok(Self { enigo })
    }
}

impl KeySink for EnigoSink {
    fn send_char(&mut self, ch: char) -> Result<()> {
        debug!(%ch, "inject");
        self.enigo
            .key(char_to_key(ch), Direction::Click)
            .map_err(|e| Error::Injection(e.to_string()))
    }

    fn press(&mut self, key: ControlKey) -> Result<()> {
        debug!(%key, "inject");
        let mapped = match key {
            ControlKey::Backspace => Key::Backspace,
        };
        self.enigo
            .key(mapped, Direction::Click)
            .map_err(|e| Error::Injection(e.to_string()))
    }
}

/// Whitespace that types as a named key rather than a unicode point.
fn char_to_key(ch: char) -> Key {
    match ch {
        '\n' => Key::Return,
        '\t' => Key::Tab,
        ch => Key::Unicode(ch),
    }
}

/// Dry-run backend: renders keystrokes on stdout instead of injecting them,
/// backspaces erasing in place.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl KeySink for ConsoleSink {
    fn send_char(&mut self, ch: char) -> Result<()> {
        let mut out = io::stdout();
        write!(out, "{ch}")
            .and_then(|_| out.flush())
            .map_err(|e| Error::Injection(e.to_string()))
    }

    fn press(&mut self, key: ControlKey) -> Result<()> {
        let mut out = io::stdout();
        match key {
            ControlKey::Backspace => write!(out, "\u{8} \u{8}"),
        }
        .and_then(|_| out.flush())
        .map_err(|e| Error::Injection(e.to_string()))
    }
}

/// Everything a sink was asked to emit, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    Char(char),
    Control(ControlKey),
}

/// Capturing backend for tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters emitted, typo slips included.
    pub fn chars(&self) -> Vec<char> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Char(ch) => Some(*ch),
                SinkEvent::Control(_) => None,
            })
            .collect()
    }

    /// The text as it would land after backspaces are applied.
    pub fn rendered(&self) -> String {
        let mut text = String::new();
        for event in &self.events {
            match event {
                SinkEvent::Char(ch) => text.push(*ch),
                SinkEvent::Control(ControlKey::Backspace) => {
                    text.pop();
                }
            }
        }
        text
    }
}

impl KeySink for RecordingSink {
    fn send_char(&mut self, ch: char) -> Result<()> {
        self.events.push(SinkEvent::Char(ch));
        Ok(())
    }

    fn press(&mut self, key: ControlKey) -> Result<()> {
        self.events.push(SinkEvent::Control(key));
        Ok(())
    }
}
