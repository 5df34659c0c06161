// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::DEFAULT_PROMPT;

/// Settings for one [`crate::LineEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Fixed prefix of the input line. It can't be deleted or moved into.
    pub prompt: String,
    /// Cap on the number of history entries. [`None`] keeps every line.
    pub history_max: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            history_max: None,
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn with_history_max(mut self, history_max: Option<usize>) -> Self {
        // Zero means unbounded.
        self.history_max = history_max.filter(|max| *max > 0);
        self
    }
}
