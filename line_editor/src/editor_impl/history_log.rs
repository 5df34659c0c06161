// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Committed lines, oldest first, plus a recall cursor.
///
/// `cursor == entries.len()` means "at the live line" (nothing recalled). Up moves the
/// cursor toward `0`, Down moves it back toward `entries.len()`. Both stop at the
/// boundary, so repeated presses there are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<String>,
    cursor: usize,
    /// [`None`] means unbounded.
    max_entries: Option<usize>,
}

/// Where a history step landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRecall<'a> {
    /// Load this entry into the buffer.
    Entry(&'a str),
    /// Walked past the newest entry, back to an empty live line.
    LiveLine,
}

impl HistoryLog {
    #[must_use]
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_entries,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] { &self.entries }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Record a committed line. Lines that are empty or only whitespace are not stored.
    /// The recall cursor goes back to the live line either way.
    pub fn push(&mut self, line: &str) {
        if !line.trim().is_empty() {
            self.entries.push(line.to_string());

            // Drop oldest entries over the cap.
            if let Some(max) = self.max_entries {
                let excess = self.entries.len().saturating_sub(max);
                self.entries.drain(..excess);
            }
        }

        self.cursor = self.entries.len();
    }

    /// Step to an older entry. [`None`] when already at the oldest (or there is no
    /// history).
    pub fn up(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Step to a newer entry. [`None`] when already at the live line.
    pub fn down(&mut self) -> Option<HistoryRecall<'_>> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(match self.entries.get(self.cursor) {
            Some(entry) => HistoryRecall::Entry(entry),
            None => HistoryRecall::LiveLine,
        })
    }
}
