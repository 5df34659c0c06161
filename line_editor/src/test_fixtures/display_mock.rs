// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DisplaySurface, StdMutex, StdoutMock};
use std::{io::{self, Write},
          sync::Arc};

/// A [`DisplaySurface`] that records everything in memory. Clones share state, so keep a
/// clone around to inspect what the editor painted after handing one to it.
#[derive(Clone, Debug, Default)]
pub struct DisplayMock {
    pub stdout_mock: StdoutMock,
    pub selection: Arc<StdMutex<Option<String>>>,
    /// How many upcoming writes should fail.
    pub failing_writes: Arc<StdMutex<usize>>,
    pub fit_calls: Arc<StdMutex<Vec<(u16, u16)>>>,
}

#[allow(clippy::missing_panics_doc)]
impl DisplayMock {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Make the next `count` writes fail with [`io::ErrorKind::BrokenPipe`].
    pub fn fail_next_writes(&self, count: usize) {
        *self.failing_writes.lock().unwrap() = count;
    }

    /// Pretend the user highlighted `text` with the mouse.
    pub fn set_selection(&self, text: &str) {
        *self.selection.lock().unwrap() = Some(text.to_string());
    }

    #[must_use]
    pub fn output(&self) -> String { self.stdout_mock.get_copy_of_buffer_as_string() }

    #[must_use]
    pub fn output_strip_ansi(&self) -> String {
        self.stdout_mock.get_copy_of_buffer_as_string_strip_ansi()
    }

    pub fn clear_output(&self) { self.stdout_mock.clear(); }
}

impl DisplaySurface for DisplayMock {
    #[allow(clippy::unwrap_in_result)]
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        {
            let mut failing_writes = self.failing_writes.lock().unwrap();
            if *failing_writes > 0 {
                *failing_writes -= 1;
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
        }
        *self.selection.lock().unwrap() = None;
        self.stdout_mock.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> { self.stdout_mock.flush() }

    fn has_selection(&self) -> bool { self.selection.lock().unwrap().is_some() }

    fn get_selection(&self) -> Option<String> { self.selection.lock().unwrap().clone() }

    fn select_all(&mut self, text: &str) { self.set_selection(text); }

    fn fit(&mut self, cols: u16, rows: u16) { self.fit_calls.lock().unwrap().push((cols, rows)); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn write_clears_selection() {
        let mut display = DisplayMock::new();
        display.select_all("[]> abc");
        assert!(display.has_selection());
        assert_eq!(display.get_selection().as_deref(), Some("[]> abc"));

        display.write(b"x").unwrap();
        assert!(!display.has_selection());
        assert_eq!(display.output(), "x");
    }

    #[test]
    fn scheduled_failures() {
        let mut display = DisplayMock::new();
        let inspector = display.clone();
        display.fail_next_writes(1);

        assert!(display.write(b"lost").is_err());
        display.write(b"kept").unwrap();
        assert_eq!(inspector.output(), "kept");
    }
}
