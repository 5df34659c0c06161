// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SendRawTerminal, ok, queue_commands_no_lock};
use crossterm::{QueueableCommand,
                event::{DisableBracketedPaste, EnableBracketedPaste},
                terminal::{self, disable_raw_mode, enable_raw_mode}};
use std::{fmt::Debug,
          io::{self, Write}};

/// Where the editor paints. The terminal selection lives here too, since only the
/// surface knows what is highlighted.
pub trait DisplaySurface {
    /// Write escape sequences and text. A write also drops the current selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn flush(&mut self) -> io::Result<()>;

    fn has_selection(&self) -> bool;

    fn get_selection(&self) -> Option<String>;

    fn select_all(&mut self, text: &str);

    /// The terminal was resized.
    fn fit(&mut self, cols: u16, rows: u16);
}

/// A [`DisplaySurface`] on a real terminal. Raw mode and bracketed paste are turned on
/// in [`TerminalDisplay::try_new`] and turned off again on [`Drop`].
pub struct TerminalDisplay {
    output: Box<SendRawTerminal>,
    selection: Option<String>,
    size: (u16, u16),
}

impl Debug for TerminalDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalDisplay")
            .field("selection", &self.selection)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl TerminalDisplay {
    /// # Errors
    ///
    /// Returns an error if raw mode can't be enabled, or the terminal size can't be
    /// read.
    pub fn try_new() -> io::Result<Self> {
        Self::try_new_with(Box::new(io::stdout()))
    }

    /// # Errors
    ///
    /// Returns an error if raw mode can't be enabled, or the terminal size can't be
    /// read.
    pub fn try_new_with(output: Box<SendRawTerminal>) -> io::Result<Self> {
        enable_raw_mode()?;
        Self::try_finish_setup(output, terminal::size)
    }

    /// Runs once raw mode is on. An early return drops `it`, which leaves raw mode.
    fn try_finish_setup(
        output: Box<SendRawTerminal>,
        read_size: impl FnOnce() -> io::Result<(u16, u16)>,
    ) -> io::Result<Self> {
        let mut it = Self {
            output,
            selection: None,
            size: (0, 0),
        };
        queue_commands_no_lock!(it.output, EnableBracketedPaste);
        it.output.flush()?;
        it.size = read_size()?;
        tracing::debug!(message = "raw mode on", cols = it.size.0, rows = it.size.1);
        ok!(it)
    }

    #[must_use]
    pub fn size(&self) -> (u16, u16) { self.size }
}

impl DisplaySurface for TerminalDisplay {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.selection = None;
        self.output.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> { self.output.flush() }

    fn has_selection(&self) -> bool { self.selection.is_some() }

    fn get_selection(&self) -> Option<String> { self.selection.clone() }

    fn select_all(&mut self, text: &str) {
        tracing::debug!(message = "select all", selection = %text);
        self.selection = Some(text.to_string());
    }

    fn fit(&mut self, cols: u16, rows: u16) {
        tracing::debug!(message = "fit", cols, rows);
        self.size = (cols, rows);
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        self.output.queue(DisableBracketedPaste).ok();
        self.output.flush().ok();
        if let Err(err) = disable_raw_mode() {
            tracing::error!(message = "could not leave raw mode", error = %err);
        }
    }
}
