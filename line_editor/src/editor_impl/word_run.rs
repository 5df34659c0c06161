// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Word run scanning used by word motion and word deletion.
//!
//! A word run is the text matching `\s*\S+\s*` that touches the cursor. Scanning
//! [`ScanDirection::Backward`] looks at the text *before* the cursor and behaves like the
//! leftmost match of `\s*\S+\s*$`. Scanning [`ScanDirection::Forward`] looks at the text
//! *after* the cursor and behaves like `^\s*\S+\s*`.
//!
//! Whitespace on both sides of the token belongs to the run, so the distance travelled
//! by a word motion is not a pure token boundary:
//!
//! ```text
//! "foo   bar  " + cursor at end
//!     ╰──┬──╯╰┬╯
//!  outer │    inner whitespace (between token and cursor)
//!        token
//! ```

/// Which side of the cursor to scan.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScanDirection {
    /// Scan the pre-cursor text, from its end toward its start.
    Backward,
    /// Scan the post-cursor text, from its start toward its end.
    Forward,
}

/// Char counts of the three parts of a word run. `inner_whitespace` is always the part
/// adjacent to the cursor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WordRun {
    pub inner_whitespace: usize,
    pub token: usize,
    pub outer_whitespace: usize,
}

impl WordRun {
    /// Total number of chars in the run.
    #[must_use]
    pub fn len(&self) -> usize { self.inner_whitespace + self.token + self.outer_whitespace }

    /// A run always contains a token, so it is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.token == 0 }

    /// Number of chars between the cursor and the far edge of the token.
    #[must_use]
    pub fn to_token_far_edge(&self) -> usize { self.inner_whitespace + self.token }
}

/// Find the word run adjacent to the cursor. `text` is the pre-cursor text for
/// [`ScanDirection::Backward`] and the post-cursor text for [`ScanDirection::Forward`].
///
/// Returns [`None`] when `text` has no non-whitespace char.
#[must_use]
pub fn find_word_run(text: &str, direction: ScanDirection) -> Option<WordRun> {
    match direction {
        ScanDirection::Backward => scan(text.chars().rev()),
        ScanDirection::Forward => scan(text.chars()),
    }
}

/// Counts `whitespace*`, `non-whitespace+`, `whitespace*` walking away from the cursor.
fn scan(mut chars: impl Iterator<Item = char>) -> Option<WordRun> {
    let mut run = WordRun {
        inner_whitespace: 0,
        token: 0,
        outer_whitespace: 0,
    };

    let mut next = chars.next();

    while next.is_some_and(char::is_whitespace) {
        run.inner_whitespace += 1;
        next = chars.next();
    }

    while next.is_some_and(|ch| !ch.is_whitespace()) {
        run.token += 1;
        next = chars.next();
    }

    if run.is_empty() {
        return None;
    }

    while next.is_some_and(char::is_whitespace) {
        run.outer_whitespace += 1;
        next = chars.next();
    }

    Some(run)
}
