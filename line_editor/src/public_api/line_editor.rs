// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ClipboardOutcome, ClipboardOutcomeReceiver, ClipboardOutcomeSender,
            DisplaySurface, EditorAction, EditorConfig, EditorError, EditorEffect, EditorState,
            InboundMessage, KeyInput, OutboundMessage, ReadyState, RenderOp, RenderOps,
            SafeClipboard, Transport, render_ops, spawn_copy, spawn_paste};
use std::{fmt::Debug, io, ops::ControlFlow};
use tokio::sync::mpsc::unbounded_channel;

/// Owns one editing session: the [`EditorState`], and the display, transport and
/// clipboard it talks to. Every input goes through one of the `handle_*` methods, all of
/// which must be called from the same task.
///
/// Display write failures are not returned. They are logged, and the display is marked
/// dirty so that the next paint repaints the whole line instead of a delta.
pub struct LineEditor {
    state: EditorState,
    display: Box<dyn DisplaySurface>,
    transport: Box<dyn Transport>,
    clipboard: SafeClipboard,
    clipboard_sender: ClipboardOutcomeSender,
    is_display_dirty: bool,
}

impl Debug for LineEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor")
            .field("state", &self.state)
            .field("ready_state", &self.transport.ready_state())
            .field("is_display_dirty", &self.is_display_dirty)
            .finish_non_exhaustive()
    }
}

impl LineEditor {
    /// The returned receiver gets the results of clipboard reads and writes. Pass its
    /// items back in with [`LineEditor::handle_clipboard_outcome`].
    pub fn new(
        config: EditorConfig,
        display: Box<dyn DisplaySurface>,
        transport: Box<dyn Transport>,
        clipboard: SafeClipboard,
    ) -> (Self, ClipboardOutcomeReceiver) {
        let (clipboard_sender, clipboard_receiver) = unbounded_channel();
        let it = Self {
            state: EditorState::new(config.prompt, config.history_max),
            display,
            transport,
            clipboard,
            clipboard_sender,
            is_display_dirty: false,
        };
        (it, clipboard_receiver)
    }

    #[must_use]
    pub fn state(&self) -> &EditorState { &self.state }

    #[must_use]
    pub fn ready_state(&self) -> ReadyState { self.transport.ready_state() }

    #[must_use]
    pub fn is_display_dirty(&self) -> bool { self.is_display_dirty }

    /// Paint the initial prompt.
    pub fn render_prompt(&mut self) {
        let render_ops = self.state.render_prompt();
        self.paint(render_ops);
    }

    /// Resolve and apply one key press. Breaks when the user ends input.
    pub fn handle_key(&mut self, input: KeyInput) -> ControlFlow<()> {
        let action = EditorAction::resolve(
            &input,
            self.display.has_selection(),
            self.state.line.is_buffer_empty(),
        );
        tracing::debug!(message = "key", ?input, %action);
        self.apply_action(action)
    }

    pub fn apply_action(&mut self, action: EditorAction) -> ControlFlow<()> {
        let reaction = self.state.apply(action);
        self.paint(reaction.render_ops);
        match reaction.effect {
            Some(effect) => self.run_effect(effect),
            None => ControlFlow::Continue(()),
        }
    }

    pub fn handle_clipboard_outcome(&mut self, outcome: ClipboardOutcome) {
        match outcome {
            ClipboardOutcome::Copied => {
                tracing::debug!(message = "selection copied to clipboard");
            }
            ClipboardOutcome::Pasted(text) => self.handle_paste(&text),
            ClipboardOutcome::Failed { operation, reason } => {
                let err = EditorError::Clipboard(format!("{operation} failed: {reason}"));
                tracing::warn!(message = "clipboard failed", error = %err);
            }
        }
    }

    /// Insert text at the cursor as it is now. Used for clipboard reads and for
    /// bracketed paste from the terminal.
    pub fn handle_paste(&mut self, text: &str) {
        let reaction = self.state.insert_pasted(text);
        self.paint(reaction.render_ops);
    }

    /// Print the peer's text above the input line, then put the input line back.
    pub fn handle_inbound(&mut self, message: InboundMessage) {
        let mut text = message.text.replace("\r\n", "\n").replace('\n', "\r\n");
        if !text.is_empty() && !text.ends_with('\n') {
            text.push_str("\r\n");
        }

        let mut render_ops = render_ops!(
            @new
            RenderOp::RewriteLine {
                line: text,
                cursor_back: 0,
            }
        );
        render_ops.list.extend(self.state.rewrite_line().list);
        self.paint(render_ops);
    }

    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        self.display.fit(cols, rows);
        let render_ops = self.state.rewrite_line();
        self.paint(render_ops);
    }

    fn run_effect(&mut self, effect: EditorEffect) -> ControlFlow<()> {
        match effect {
            EditorEffect::Submit(text) => self.submit(text),
            EditorEffect::CopySelection => {
                if let Some(selection) = self.display.get_selection() {
                    spawn_copy(
                        self.clipboard.clone(),
                        selection,
                        self.clipboard_sender.clone(),
                    );
                }
            }
            EditorEffect::RequestPaste => {
                spawn_paste(self.clipboard.clone(), self.clipboard_sender.clone());
            }
            EditorEffect::EndOfInput => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn submit(&mut self, text: String) {
        let ready_state = self.transport.ready_state();
        if ready_state != ReadyState::Open {
            tracing::debug!(message = "transport not open, line not sent", %ready_state);
            return;
        }
        if let Err(err) = self.transport.send(&OutboundMessage::user(text)) {
            tracing::warn!(message = "could not send line", error = %err);
        }
    }

    /// Execute render ops against the display. When the last paint failed, the caret
    /// position is unknown, so relative ops are dropped and the current line is
    /// rewritten from column 0 instead. Any [`RenderOp::SelectAll`] goes after the
    /// rewrite, since a write drops the selection.
    fn paint(&mut self, render_ops: RenderOps) {
        let render_ops = if self.is_display_dirty {
            let (selections, kept): (Vec<_>, Vec<_>) = render_ops
                .list
                .into_iter()
                .filter(|op| {
                    !matches!(
                        op,
                        RenderOp::Echo(_)
                            | RenderOp::EraseBackward(_)
                            | RenderOp::CursorLeft(_)
                            | RenderOp::CursorRight(_)
                    )
                })
                .partition(|op| matches!(op, RenderOp::SelectAll(_)));
            let mut healed: RenderOps = kept.into();
            healed.list.extend(self.state.rewrite_line().list);
            healed.list.extend(selections);
            healed
        } else {
            render_ops
        };

        if render_ops.is_empty() {
            return;
        }

        match self.try_paint(&render_ops) {
            Ok(()) => self.is_display_dirty = false,
            Err(err) => {
                tracing::warn!(message = "display write failed", error = %err);
                self.is_display_dirty = true;
            }
        }
    }

    fn try_paint(&mut self, render_ops: &RenderOps) -> io::Result<()> {
        let mut acc = Vec::new();
        for op in render_ops {
            if let RenderOp::SelectAll(text) = op {
                self.write_bytes(&mut acc)?;
                self.display.select_all(text);
            } else {
                op.queue_into(&mut acc)?;
            }
        }
        self.write_bytes(&mut acc)?;
        self.display.flush()
    }

    fn write_bytes(&mut self, acc: &mut Vec<u8>) -> io::Result<()> {
        if acc.is_empty() {
            return Ok(());
        }
        let result = self.display.write(acc);
        acc.clear();
        result
    }
}
