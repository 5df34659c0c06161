// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The keys the editor reacts to. Everything else collapses into [`EditorKey::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Char(char),
    Other,
}

/// A key press plus its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: EditorKey,
    pub modifiers: KeyModifiers,
}

impl KeyInput {
    #[must_use]
    pub fn new(key: EditorKey, modifiers: KeyModifiers) -> Self { Self { key, modifiers } }

    #[must_use]
    pub fn plain(key: EditorKey) -> Self { Self::new(key, KeyModifiers::NONE) }

    #[must_use]
    pub fn ctrl(key: EditorKey) -> Self { Self::new(key, KeyModifiers::CONTROL) }

    #[must_use]
    pub fn alt(key: EditorKey) -> Self { Self::new(key, KeyModifiers::ALT) }

    /// Converts a crossterm key event. Release events are dropped, since the terminal
    /// only reports them when keyboard enhancement flags are on.
    #[must_use]
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let key = match event.code {
            KeyCode::Enter => EditorKey::Enter,
            KeyCode::Backspace => EditorKey::Backspace,
            KeyCode::Delete => EditorKey::Delete,
            KeyCode::Left => EditorKey::Left,
            KeyCode::Right => EditorKey::Right,
            KeyCode::Up => EditorKey::Up,
            KeyCode::Down => EditorKey::Down,
            KeyCode::Char(ch) => EditorKey::Char(ch),
            _ => EditorKey::Other,
        };

        Some(Self::new(key, event.modifiers))
    }

    #[must_use]
    pub fn has_ctrl(&self) -> bool { self.modifiers.contains(KeyModifiers::CONTROL) }

    #[must_use]
    pub fn has_alt(&self) -> bool { self.modifiers.contains(KeyModifiers::ALT) }

    #[must_use]
    pub fn has_shift(&self) -> bool { self.modifiers.contains(KeyModifiers::SHIFT) }

    /// The macOS Command key. Terminals report it as either `SUPER` or `META`.
    #[must_use]
    pub fn has_cmd(&self) -> bool {
        self.modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META)
    }

    #[must_use]
    pub fn has_ctrl_or_cmd(&self) -> bool { self.has_ctrl() || self.has_cmd() }

    /// No modifier at all, Shift included.
    #[must_use]
    pub fn is_unmodified(&self) -> bool { self.modifiers.is_empty() }

    /// A char that should go into the buffer: not a control char, and no Ctrl, Alt or
    /// Cmd held. Shift is fine.
    #[must_use]
    pub fn printable_char(&self) -> Option<char> {
        match self.key {
            EditorKey::Char(ch)
                if !ch.is_control() && !self.has_ctrl() && !self.has_alt() && !self.has_cmd() =>
            {
                Some(ch)
            }
            _ => None,
        }
    }
}
