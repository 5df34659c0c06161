// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ClipboardOutcomeReceiver, CrosstermEventResult, EditorError, InboundReceiver,
            KeyInput, LineEditor, PinnedInputStream, ok};
use crossterm::event::Event;
use futures_util::StreamExt;
use std::ops::ControlFlow;
use strum_macros::Display;

/// Why [`run_event_loop`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LoopExit {
    /// Ctrl+D on an empty line.
    EndOfInput,
    /// The terminal input stream ended.
    InputClosed,
}

/// Drive `editor` until the user leaves or input ends. Three sources are multiplexed:
/// 1. Terminal events from `input_stream`.
/// 2. Finished clipboard operations from `clipboard_receiver`.
/// 3. Peer messages from `inbound_receiver`. When this closes (peer gone), editing goes
///    on without it.
///
/// # Errors
///
/// Returns an error if the terminal input stream yields one.
pub async fn run_event_loop(
    editor: &mut LineEditor,
    mut input_stream: PinnedInputStream<CrosstermEventResult>,
    mut clipboard_receiver: ClipboardOutcomeReceiver,
    mut inbound_receiver: InboundReceiver,
) -> Result<LoopExit, EditorError> {
    let mut is_inbound_open = true;

    loop {
        tokio::select! {
            maybe_event = input_stream.next() => match maybe_event {
                Some(Ok(event)) => {
                    if handle_event(editor, event).is_break() {
                        return ok!(LoopExit::EndOfInput);
                    }
                }
                Some(Err(err)) => {
                    tracing::error!(message = "terminal input failed", error = %err);
                    return Err(EditorError::IO(err));
                }
                None => return ok!(LoopExit::InputClosed),
            },

            Some(outcome) = clipboard_receiver.recv() => {
                editor.handle_clipboard_outcome(outcome);
            }

            maybe_message = inbound_receiver.recv(), if is_inbound_open => match maybe_message {
                Some(message) => editor.handle_inbound(message),
                None => {
                    tracing::debug!(message = "inbound channel closed");
                    is_inbound_open = false;
                }
            },
        }
    }
}

/// Route one terminal event to the editor.
pub fn handle_event(editor: &mut LineEditor, event: Event) -> ControlFlow<()> {
    match event {
        Event::Key(key_event) => match KeyInput::from_key_event(key_event) {
            Some(input) => editor.handle_key(input),
            None => ControlFlow::Continue(()),
        },
        Event::Resize(cols, rows) => {
            editor.handle_resize(cols, rows);
            ControlFlow::Continue(())
        }
        Event::Paste(text) => {
            editor.handle_paste(&text);
            ControlFlow::Continue(())
        }
        Event::FocusGained | Event::FocusLost | Event::Mouse(_) => {
            ControlFlow::Continue(())
        }
    }
}
