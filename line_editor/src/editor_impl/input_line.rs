// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ScanDirection, find_word_run};
use unicode_width::UnicodeWidthStr;

/// The prompt plus the editable text that follows it.
///
/// `cursor` is a char index into the *full* line (prompt + buffer), and it always
/// satisfies `prompt_len <= cursor <= prompt_len + buffer_len`. None of the methods
/// below can move it into the prompt or past the end of the buffer. Operations that
/// would violate this are silent no-ops, and report that by returning [`None`].
///
/// The returned `String`s are the text that was crossed or removed, which the reducer
/// needs to compute terminal column deltas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    prompt: String,
    prompt_len: usize,
    buffer: String,
    buffer_len: usize,
    cursor: usize,
}

impl InputLine {
    /// An empty line, with the cursor right after the prompt.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        let prompt_len = prompt.chars().count();
        Self {
            prompt,
            prompt_len,
            buffer: String::new(),
            buffer_len: 0,
            cursor: prompt_len,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str { &self.prompt }

    #[must_use]
    pub fn buffer(&self) -> &str { &self.buffer }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    /// Index of the first char after the prompt.
    #[must_use]
    pub fn prompt_end(&self) -> usize { self.prompt_len }

    /// Char count of prompt + buffer.
    #[must_use]
    pub fn line_len(&self) -> usize { self.prompt_len + self.buffer_len }

    #[must_use]
    pub fn full_line(&self) -> String { format!("{}{}", self.prompt, self.buffer) }

    #[must_use]
    pub fn is_buffer_empty(&self) -> bool { self.buffer_len == 0 }

    #[must_use]
    pub fn is_cursor_at_end(&self) -> bool { self.cursor == self.line_len() }

    /// `true` when the cursor invariant holds. It always should.
    #[must_use]
    pub fn is_cursor_in_bounds(&self) -> bool {
        self.prompt_end() <= self.cursor && self.cursor <= self.line_len()
    }

    /// Display width of everything right of the cursor. This is how far the terminal
    /// caret has to travel back after the whole line was written.
    #[must_use]
    pub fn width_after_cursor(&self) -> usize { self.post_cursor_text().width() }

    #[must_use]
    pub fn pre_cursor_text(&self) -> &str { &self.buffer[..self.cursor_byte_offset()] }

    #[must_use]
    pub fn post_cursor_text(&self) -> &str { &self.buffer[self.cursor_byte_offset()..] }

    pub fn insert_char(&mut self, ch: char) {
        let offset = self.cursor_byte_offset();
        self.buffer.insert(offset, ch);
        self.buffer_len += 1;
        self.cursor += 1;
    }

    /// Insert pasted text at the cursor. Line breaks and tabs become spaces, and other
    /// control chars are dropped, so the line stays a single line. Returns the text that
    /// was actually inserted.
    pub fn insert_str(&mut self, text: &str) -> String {
        let sanitized: String = text
            .replace("\r\n", " ")
            .chars()
            .filter_map(|ch| match ch {
                '\n' | '\r' | '\t' => Some(' '),
                _ if ch.is_control() => None,
                _ => Some(ch),
            })
            .collect();

        let offset = self.cursor_byte_offset();
        let count = sanitized.chars().count();
        self.buffer.insert_str(offset, &sanitized);
        self.buffer_len += count;
        self.cursor += count;
        sanitized
    }

    /// Remove the char right before the cursor.
    pub fn delete_backward(&mut self) -> Option<char> {
        if self.cursor <= self.prompt_end() {
            return None;
        }
        self.cursor -= 1;
        let offset = self.cursor_byte_offset();
        let removed = self.buffer.remove(offset);
        self.buffer_len -= 1;
        Some(removed)
    }

    /// Remove the word run that ends at the cursor (`\s*\S+\s*$` on the pre-cursor
    /// text).
    pub fn delete_word_backward(&mut self) -> Option<String> {
        let run = find_word_run(self.pre_cursor_text(), ScanDirection::Backward)?;
        let end = self.cursor_byte_offset();
        self.cursor -= run.len();
        let start = self.cursor_byte_offset();
        let removed: String = self.buffer.drain(start..end).collect();
        self.buffer_len -= run.len();
        Some(removed)
    }

    pub fn move_left(&mut self) -> Option<char> {
        let crossed = self.pre_cursor_text().chars().next_back()?;
        self.cursor -= 1;
        Some(crossed)
    }

    pub fn move_right(&mut self) -> Option<char> {
        let crossed = self.post_cursor_text().chars().next()?;
        self.cursor += 1;
        Some(crossed)
    }

    /// Land on the first char of the token in the word run before the cursor.
    pub fn move_word_left(&mut self) -> Option<String> {
        let run = find_word_run(self.pre_cursor_text(), ScanDirection::Backward)?;
        let end = self.cursor_byte_offset();
        self.cursor -= run.to_token_far_edge();
        let start = self.cursor_byte_offset();
        Some(self.buffer[start..end].to_string())
    }

    /// Skip over the whole word run after the cursor.
    pub fn move_word_right(&mut self) -> Option<String> {
        let run = find_word_run(self.post_cursor_text(), ScanDirection::Forward)?;
        let start = self.cursor_byte_offset();
        self.cursor += run.len();
        let end = self.cursor_byte_offset();
        Some(self.buffer[start..end].to_string())
    }

    /// Replace the whole buffer (history recall) and put the cursor at the end of it.
    pub fn replace_buffer(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
        self.buffer_len = self.buffer.chars().count();
        self.cursor = self.line_len();
    }

    /// Back to an empty buffer, and return what was in it.
    pub fn take_buffer(&mut self) -> String {
        self.buffer_len = 0;
        self.cursor = self.prompt_len;
        std::mem::take(&mut self.buffer)
    }

    /// Byte offset into `buffer` of the char under the cursor.
    fn cursor_byte_offset(&self) -> usize {
        let buffer_cursor = self.cursor - self.prompt_len;
        self.buffer
            .char_indices()
            .nth(buffer_cursor)
            .map_or(self.buffer.len(), |(offset, _)| offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const PROMPT: &str = "[]> ";

    fn line_with(prompt: &str, text: &str) -> InputLine {
        let mut line = InputLine::new(prompt);
        line.insert_str(text);
        line
    }

    #[test]
    fn new_line_starts_at_prompt_end() {
        let line = InputLine::new(PROMPT);
        assert_eq!(line.cursor(), 4);
        assert_eq!(line.prompt_end(), 4);
        assert!(line.is_buffer_empty());
        assert!(line.is_cursor_at_end());
    }

    #[test]
    fn insert_in_the_middle() {
        let mut line = line_with(PROMPT, "ac");
        line.move_left();
        line.insert_char('b');
        assert_eq!(line.buffer(), "abc");
        assert_eq!(line.cursor(), 6);
        assert_eq!(line.post_cursor_text(), "c");
    }

    #[test]
    fn backspace_at_end_of_abc() {
        let mut line = line_with("", "abc");
        assert_eq!(line.cursor(), 3);
        assert_eq!(line.delete_backward(), Some('c'));
        assert_eq!(line.buffer(), "ab");
        assert_eq!(line.cursor(), 2);
    }

    #[test]
    fn backspace_never_eats_the_prompt() {
        let mut line = line_with(PROMPT, "a");
        assert_eq!(line.delete_backward(), Some('a'));
        assert_eq!(line.delete_backward(), None);
        assert_eq!(line.full_line(), PROMPT);
        assert_eq!(line.cursor(), line.prompt_end());
    }

    #[test]
    fn insert_then_delete_round_trips() {
        let mut line = line_with(PROMPT, "hello");
        line.move_left();
        line.move_left();
        let before = line.clone();

        for ch in "xyz✓".chars() {
            line.insert_char(ch);
        }
        for _ in 0..4 {
            line.delete_backward();
        }

        assert_eq!(line, before);
    }

    #[test]
    fn insert_then_delete_round_trips_from_any_state() {
        let alphabet = ['a', 'b', ' ', '✓', '字'];
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let mut line = InputLine::new(PROMPT);
            for _ in 0..rng.random_range(0..12) {
                line.insert_char(alphabet[rng.random_range(0..alphabet.len())]);
            }
            for _ in 0..rng.random_range(0..12) {
                line.move_left();
            }
            let before = line.clone();

            let count = rng.random_range(1..6);
            for _ in 0..count {
                line.insert_char(alphabet[rng.random_range(0..alphabet.len())]);
            }
            for _ in 0..count {
                line.delete_backward();
            }

            assert_eq!(line, before);
        }
    }

    #[test]
    fn cursor_is_clamped_at_both_ends() {
        let mut line = line_with(PROMPT, "ab");
        assert_eq!(line.move_right(), None);
        assert_eq!(line.cursor(), 6);

        assert_eq!(line.move_left(), Some('b'));
        assert_eq!(line.move_left(), Some('a'));
        assert_eq!(line.move_left(), None);
        assert_eq!(line.cursor(), 4);
        assert!(line.is_cursor_in_bounds());
    }

    #[test]
    fn word_left_from_end_of_foo_bar_lands_on_bar() {
        let mut line = line_with("", "foo bar");
        assert_eq!(line.cursor(), 7);
        assert_eq!(line.move_word_left().as_deref(), Some("bar"));
        assert_eq!(line.cursor(), 4);

        assert_eq!(line.move_word_left().as_deref(), Some("foo "));
        assert_eq!(line.cursor(), 0);
        assert_eq!(line.move_word_left(), None);
    }

    #[test]
    fn word_left_includes_trailing_whitespace() {
        let mut line = line_with(PROMPT, "foo bar   ");
        line.move_word_left();
        assert_eq!(line.cursor(), PROMPT.len() + 4);
    }

    #[test]
    fn word_right_skips_token_and_following_whitespace() {
        let mut line = line_with(PROMPT, "foo  bar baz");
        while line.move_left().is_some() {}

        assert_eq!(line.move_word_right().as_deref(), Some("foo  "));
        assert_eq!(line.cursor(), PROMPT.len() + 5);
        assert_eq!(line.move_word_right().as_deref(), Some("bar "));
        assert_eq!(line.move_word_right().as_deref(), Some("baz"));
        assert!(line.is_cursor_at_end());
        assert_eq!(line.move_word_right(), None);
    }

    #[test]
    fn delete_word_backward_removes_whole_run() {
        let mut line = line_with(PROMPT, "solve x = pm");
        assert_eq!(line.delete_word_backward().as_deref(), Some(" pm"));
        assert_eq!(line.buffer(), "solve x =");
        assert_eq!(line.delete_word_backward().as_deref(), Some(" ="));
        assert_eq!(line.delete_word_backward().as_deref(), Some(" x"));
        assert_eq!(line.delete_word_backward().as_deref(), Some("solve"));
        assert_eq!(line.delete_word_backward(), None);
        assert_eq!(line.cursor(), line.prompt_end());
    }

    #[test]
    fn delete_word_backward_mid_line_keeps_tail() {
        let mut line = line_with(PROMPT, "query m badMapping");
        for _ in 0.."badMapping".len() {
            line.move_left();
        }
        assert_eq!(line.delete_word_backward().as_deref(), Some(" m "));
        assert_eq!(line.buffer(), "querybadMapping");
        assert_eq!(line.cursor(), PROMPT.len() + 5);
    }

    #[test]
    fn paste_is_flattened_to_one_line() {
        let mut line = line_with(PROMPT, "ab");
        line.move_left();
        let inserted = line.insert_str("x\r\ny\tz\u{7}");
        assert_eq!(inserted, "x y z");
        assert_eq!(line.buffer(), "ax y zb");
        assert_eq!(line.cursor(), PROMPT.len() + 6);
    }

    #[test]
    fn replace_and_take_buffer() {
        let mut line = line_with(PROMPT, "draft");
        line.move_left();
        line.replace_buffer("list");
        assert_eq!(line.buffer(), "list");
        assert!(line.is_cursor_at_end());

        assert_eq!(line.take_buffer(), "list");
        assert!(line.is_buffer_empty());
        assert_eq!(line.cursor(), line.prompt_end());
    }

    #[test]
    fn width_after_cursor_counts_wide_chars() {
        let mut line = line_with(PROMPT, "a漢b");
        line.move_left();
        line.move_left();
        assert_eq!(line.width_after_cursor(), 3);
    }
}
