// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{EditorKey, KeyInput};
use strum_macros::Display;

/// What a key press means to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EditorAction {
    Commit,
    CopySelection,
    Paste,
    SelectAll,
    WordLeft,
    WordRight,
    DeleteWordBackward,
    Left,
    Right,
    HistoryUp,
    HistoryDown,
    DeleteBackward,
    EndOfInput,
    Insert(char),
    Ignore,
}

impl EditorAction {
    /// Map a key press to an action. The arms are checked top to bottom and the first
    /// one that matches wins, so more specific chords have to come before the plain
    /// keys they contain.
    ///
    /// `buffer_is_empty` only matters for Ctrl+D, which ends input on an empty line.
    #[must_use]
    pub fn resolve(input: &KeyInput, has_selection: bool, buffer_is_empty: bool) -> Self {
        use EditorKey::{Backspace, Char, Delete, Down, Enter, Left, Right, Up};

        match input.key {
            Enter => Self::Commit,

            Char('c' | 'C') if input.has_ctrl_or_cmd() && has_selection => {
                Self::CopySelection
            }

            Char('v' | 'V') if input.has_ctrl_or_cmd() => Self::Paste,

            Left | Right if input.has_cmd() && input.has_shift() => Self::SelectAll,

            Left if input.has_alt() => Self::WordLeft,
            Right if input.has_alt() => Self::WordRight,

            Delete if input.has_ctrl() => Self::DeleteWordBackward,
            Char('w' | 'W') if input.has_ctrl() => Self::DeleteWordBackward,

            Left if input.is_unmodified() => Self::Left,
            Right if input.is_unmodified() => Self::Right,

            Up => Self::HistoryUp,
            Down => Self::HistoryDown,

            Backspace | Delete if input.is_unmodified() => Self::DeleteBackward,

            Char('d' | 'D') if input.has_ctrl() && buffer_is_empty => Self::EndOfInput,

            _ => match input.printable_char() {
                Some(ch) => Self::Insert(ch),
                None => Self::Ignore,
            },
        }
    }
}
