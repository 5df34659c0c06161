// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{EditorAction, HistoryLog, HistoryRecall, InputLine, RenderOp, RenderOps,
            render_ops};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Something the controller has to do outside of the editor state after a reaction is
/// painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEffect {
    /// A line was committed. Forward it to the peer if the channel is open.
    Submit(String),
    /// Copy the display's current selection to the clipboard.
    CopySelection,
    /// Read the clipboard. The text comes back later through
    /// [`EditorState::insert_pasted`].
    RequestPaste,
    /// The user asked to leave (Ctrl+D on an empty line).
    EndOfInput,
}

/// What applying one action produced: bytes to paint, and maybe a side effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reaction {
    pub render_ops: RenderOps,
    pub effect: Option<EditorEffect>,
}

impl Reaction {
    fn paint(render_ops: RenderOps) -> Self {
        Self {
            render_ops,
            effect: None,
        }
    }

    fn effect(effect: EditorEffect) -> Self {
        Self {
            render_ops: RenderOps::default(),
            effect: Some(effect),
        }
    }

    #[must_use]
    pub fn is_noop(&self) -> bool { self.render_ops.is_empty() && self.effect.is_none() }
}

/// The input line and the history, and nothing else. All editing goes through
/// [`EditorState::apply`], which never fails: a key that cannot do anything (Backspace
/// at the prompt, Up on an empty history) just yields an empty [`Reaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub line: InputLine,
    pub history: HistoryLog,
}

impl EditorState {
    #[must_use]
    pub fn new(prompt: impl Into<String>, history_max: Option<usize>) -> Self {
        Self {
            line: InputLine::new(prompt),
            history: HistoryLog::new(history_max),
        }
    }

    pub fn apply(&mut self, action: EditorAction) -> Reaction {
        match action {
            EditorAction::Commit => self.commit(),
            EditorAction::CopySelection => Reaction::effect(EditorEffect::CopySelection),
            EditorAction::Paste => Reaction::effect(EditorEffect::RequestPaste),
            EditorAction::SelectAll => {
                Reaction::paint(render_ops!(@new RenderOp::SelectAll(self.line.full_line())))
            }
            EditorAction::WordLeft => match self.line.move_word_left() {
                Some(crossed) => Reaction::paint(render_ops!(@new RenderOp::CursorLeft(crossed.width()))),
                None => Reaction::default(),
            },
            EditorAction::WordRight => match self.line.move_word_right() {
                Some(crossed) => Reaction::paint(render_ops!(@new RenderOp::CursorRight(crossed.width()))),
                None => Reaction::default(),
            },
            EditorAction::DeleteWordBackward => {
                let was_at_end = self.line.is_cursor_at_end();
                match self.line.delete_word_backward() {
                    Some(removed) => self.after_delete(was_at_end, removed.width()),
                    None => Reaction::default(),
                }
            }
            EditorAction::Left => match self.line.move_left() {
                Some(crossed) => Reaction::paint(render_ops!(@new RenderOp::CursorLeft(char_width(crossed)))),
                None => Reaction::default(),
            },
            EditorAction::Right => match self.line.move_right() {
                Some(crossed) => Reaction::paint(render_ops!(@new RenderOp::CursorRight(char_width(crossed)))),
                None => Reaction::default(),
            },
            EditorAction::HistoryUp => match self.history.up() {
                Some(entry) => {
                    let entry = entry.to_string();
                    self.line.replace_buffer(&entry);
                    Reaction::paint(self.rewrite_line())
                }
                None => Reaction::default(),
            },
            EditorAction::HistoryDown => {
                let recalled = match self.history.down() {
                    Some(HistoryRecall::Entry(entry)) => entry.to_string(),
                    Some(HistoryRecall::LiveLine) => String::new(),
                    None => return Reaction::default(),
                };
                self.line.replace_buffer(&recalled);
                Reaction::paint(self.rewrite_line())
            }
            EditorAction::DeleteBackward => {
                let was_at_end = self.line.is_cursor_at_end();
                match self.line.delete_backward() {
                    Some(removed) => self.after_delete(was_at_end, char_width(removed)),
                    None => Reaction::default(),
                }
            }
            EditorAction::EndOfInput => Reaction {
                render_ops: render_ops!(@new RenderOp::NewLine),
                effect: Some(EditorEffect::EndOfInput),
            },
            EditorAction::Insert(ch) => {
                let was_at_end = self.line.is_cursor_at_end();
                self.line.insert_char(ch);
                self.after_insert(was_at_end, ch.to_string())
            }
            EditorAction::Ignore => Reaction::default(),
        }
    }

    /// Insert clipboard (or bracketed paste) text at the cursor as it is *now*, which
    /// may differ from where it was when the paste was requested.
    pub fn insert_pasted(&mut self, text: &str) -> Reaction {
        let was_at_end = self.line.is_cursor_at_end();
        let inserted = self.line.insert_str(text);
        if inserted.is_empty() {
            return Reaction::default();
        }
        self.after_insert(was_at_end, inserted)
    }

    /// The fresh prompt, for start-up.
    #[must_use]
    pub fn render_prompt(&self) -> RenderOps {
        render_ops!(@new RenderOp::Echo(self.line.prompt().to_string()))
    }

    /// Repaint the whole line and put the caret back where the cursor is. Used after
    /// inbound output, a resize, or a failed write.
    #[must_use]
    pub fn rewrite_line(&self) -> RenderOps {
        render_ops!(@new RenderOp::RewriteLine {
            line: self.line.full_line(),
            cursor_back: self.line.width_after_cursor(),
        })
    }

    fn commit(&mut self) -> Reaction {
        let text = self.line.take_buffer();
        self.history.push(&text);
        Reaction {
            render_ops: render_ops!(
                @new
                RenderOp::NewLine,
                RenderOp::Echo(self.line.prompt().to_string()),
            ),
            effect: Some(EditorEffect::Submit(text)),
        }
    }

    fn after_insert(&self, was_at_end: bool, inserted: String) -> Reaction {
        if was_at_end {
            Reaction::paint(render_ops!(@new RenderOp::Echo(inserted)))
        } else {
            Reaction::paint(self.rewrite_line())
        }
    }

    fn after_delete(&self, was_at_end: bool, removed_cols: usize) -> Reaction {
        if was_at_end {
            Reaction::paint(render_ops!(@new RenderOp::EraseBackward(removed_cols)))
        } else {
            Reaction::paint(self.rewrite_line())
        }
    }
}

fn char_width(ch: char) -> usize { ch.width().unwrap_or(0) }
