// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end: key events in, escape sequences and JSON lines out.

use crate::{ChannelTransport, ClipboardOutcome, ClipboardOutcomeReceiver, DisplayMock,
            DisplaySurface,
            EditorAction, EditorConfig, EditorKey, InboundMessage, InboundReceiver,
            KeyInput, LineEditor, LoopExit, MockSocket, ReadyState,
            clipboard_test_fixtures::TestClipboard, gen_input_stream,
            gen_input_stream_with_delay, get_mock_socket_halves, key_event,
            new_safe_clipboard, run_event_loop, typed};
use crossterm::event::{Event, KeyCode, KeyModifiers};
use pretty_assertions::assert_eq;
use std::{ops::ControlFlow, time::Duration};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines,
                ReadHalf, WriteHalf};

const PROMPT: &str = "[]> ";

struct Harness {
    editor: LineEditor,
    display: DisplayMock,
    clipboard_receiver: ClipboardOutcomeReceiver,
    inbound_receiver: InboundReceiver,
    server_lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
    server_write: WriteHalf<DuplexStream>,
}

fn connected_harness(clipboard: TestClipboard) -> Harness {
    let MockSocket {
        client_read,
        client_write,
        server_read,
        server_write,
    } = get_mock_socket_halves();
    let (transport, inbound_receiver) = ChannelTransport::spawn(client_read, client_write);

    let display = DisplayMock::new();
    let (editor, clipboard_receiver) = LineEditor::new(
        EditorConfig::default(),
        Box::new(display.clone()),
        Box::new(transport),
        new_safe_clipboard(clipboard),
    );

    Harness {
        editor,
        display,
        clipboard_receiver,
        inbound_receiver,
        server_lines: BufReader::new(server_read).lines(),
        server_write,
    }
}

fn type_text(editor: &mut LineEditor, text: &str) {
    for ch in text.chars() {
        let _ = editor.handle_key(KeyInput::plain(EditorKey::Char(ch)));
    }
}

fn press(editor: &mut LineEditor, input: KeyInput) -> ControlFlow<()> { editor.handle_key(input) }

#[tokio::test]
async fn commit_sends_json_line_and_records_history() {
    let mut harness = connected_harness(TestClipboard::default());
    harness.editor.render_prompt();

    type_text(&mut harness.editor, "solve x");
    let _ = press(&mut harness.editor, KeyInput::plain(EditorKey::Enter));

    assert_eq!(
        harness.server_lines.next_line().await.unwrap().as_deref(),
        Some(r#"{"type":"user","text":"solve x"}"#)
    );
    assert!(harness.editor.state().line.is_buffer_empty());
    assert_eq!(harness.editor.state().history.entries(), ["solve x"]);
    assert_eq!(
        harness.display.output(),
        format!("{PROMPT}solve x\r\n{PROMPT}")
    );
}

#[tokio::test]
async fn closed_transport_still_clears_and_records() {
    let (transport, _inbound_receiver) = ChannelTransport::disconnected();
    let display = DisplayMock::new();
    let (mut editor, _clipboard_receiver) = LineEditor::new(
        EditorConfig::default(),
        Box::new(display.clone()),
        Box::new(transport),
        new_safe_clipboard(TestClipboard::default()),
    );
    assert_eq!(editor.ready_state(), ReadyState::Closed);

    type_text(&mut editor, "lost");
    let _ = press(&mut editor, KeyInput::plain(EditorKey::Enter));

    assert!(editor.state().line.is_buffer_empty());
    assert_eq!(editor.state().history.entries(), ["lost"]);
    assert_eq!(display.output(), format!("lost\r\n{PROMPT}"));
}

#[tokio::test]
async fn whitespace_commit_is_sent_but_not_recorded() {
    let mut harness = connected_harness(TestClipboard::default());

    type_text(&mut harness.editor, "  ");
    let _ = press(&mut harness.editor, KeyInput::plain(EditorKey::Enter));

    assert_eq!(
        harness.server_lines.next_line().await.unwrap().as_deref(),
        Some(r#"{"type":"user","text":"  "}"#)
    );
    assert!(harness.editor.state().history.is_empty());
}

#[tokio::test]
async fn history_walk_repaints_whole_line() {
    let mut harness = connected_harness(TestClipboard::default());
    type_text(&mut harness.editor, "hello");
    let _ = press(&mut harness.editor, KeyInput::plain(EditorKey::Enter));
    type_text(&mut harness.editor, "world");
    let _ = press(&mut harness.editor, KeyInput::plain(EditorKey::Enter));
    harness.display.clear_output();

    let _ = press(&mut harness.editor, KeyInput::plain(EditorKey::Up));
    let _ = press(&mut harness.editor, KeyInput::plain(EditorKey::Up));
    assert_eq!(harness.editor.state().line.buffer(), "hello");

    let _ = press(&mut harness.editor, KeyInput::plain(EditorKey::Down));
    assert_eq!(harness.editor.state().line.buffer(), "world");

    let _ = press(&mut harness.editor, KeyInput::plain(EditorKey::Down));
    assert_eq!(harness.editor.state().line.buffer(), "");

    assert_eq!(
        harness.display.output(),
        format!(
            "\r\x1b[2K{PROMPT}world\r\x1b[2K{PROMPT}hello\r\x1b[2K{PROMPT}world\r\x1b[2K{PROMPT}"
        )
    );
}

#[tokio::test]
async fn word_motion_and_backspace_bytes() {
    let mut harness = connected_harness(TestClipboard::default());
    type_text(&mut harness.editor, "foo bar");
    harness.display.clear_output();

    let _ = press(&mut harness.editor, KeyInput::alt(EditorKey::Left));
    assert_eq!(harness.editor.state().line.cursor(), PROMPT.len() + 4);
    assert_eq!(harness.display.output(), "\x1b[3D");

    harness.display.clear_output();
    let _ = press(&mut harness.editor, KeyInput::plain(EditorKey::Backspace));
    assert_eq!(harness.editor.state().line.buffer(), "foobar");
    assert_eq!(harness.display.output(), format!("\r\x1b[2K{PROMPT}foobar\x1b[3D"));

    harness.display.clear_output();
    let _ = press(&mut harness.editor, KeyInput::ctrl(EditorKey::Char('w')));
    assert_eq!(harness.editor.state().line.buffer(), "bar");
    assert_eq!(harness.display.output(), format!("\r\x1b[2K{PROMPT}bar\x1b[3D"));
}

#[tokio::test]
async fn inbound_text_is_printed_above_the_input_line() {
    let mut harness = connected_harness(TestClipboard::default());
    type_text(&mut harness.editor, "draft");
    harness.display.clear_output();

    harness
        .server_write
        .write_all(b"{\"text\":\"line 1\\nline 2\"}\n")
        .await
        .unwrap();
    let message = harness.inbound_receiver.recv().await.unwrap();
    harness.editor.handle_inbound(message);

    assert_eq!(
        harness.display.output(),
        format!("\r\x1b[2Kline 1\r\nline 2\r\n\r\x1b[2K{PROMPT}draft")
    );
    assert_eq!(harness.editor.state().line.buffer(), "draft");
}

#[tokio::test]
async fn copy_selection_goes_to_clipboard() {
    let mut harness = connected_harness(TestClipboard::default());
    type_text(&mut harness.editor, "abc");

    let cmd_shift_left = KeyInput::new(EditorKey::Left, KeyModifiers::SUPER | KeyModifiers::SHIFT);
    let _ = press(&mut harness.editor, cmd_shift_left);
    assert_eq!(harness.display.get_selection().as_deref(), Some("[]> abc"));

    let _ = press(&mut harness.editor, KeyInput::ctrl(EditorKey::Char('c')));
    assert_eq!(
        harness.clipboard_receiver.recv().await,
        Some(ClipboardOutcome::Copied)
    );

    // Copy does not edit.
    assert_eq!(harness.editor.state().line.buffer(), "abc");
}

#[tokio::test]
async fn paste_inserts_at_cursor_when_it_resolves() {
    let mut harness = connected_harness(TestClipboard {
        content: "XY".into(),
        ..Default::default()
    });
    type_text(&mut harness.editor, "ab");

    let _ = press(&mut harness.editor, KeyInput::ctrl(EditorKey::Char('v')));
    let _ = press(&mut harness.editor, KeyInput::plain(EditorKey::Left));

    let outcome = harness.clipboard_receiver.recv().await.unwrap();
    harness.editor.handle_clipboard_outcome(outcome);

    assert_eq!(harness.editor.state().line.buffer(), "aXYb");
}

#[tokio::test]
async fn failed_paste_leaves_buffer_alone() {
    let mut harness = connected_harness(TestClipboard {
        fail_with: Some("denied".into()),
        ..Default::default()
    });
    type_text(&mut harness.editor, "ab");

    let _ = press(&mut harness.editor, KeyInput::ctrl(EditorKey::Char('v')));
    let outcome = harness.clipboard_receiver.recv().await.unwrap();
    assert!(matches!(outcome, ClipboardOutcome::Failed { .. }));
    harness.editor.handle_clipboard_outcome(outcome);

    assert_eq!(harness.editor.state().line.buffer(), "ab");
}

#[tokio::test]
async fn failed_write_heals_with_full_rewrite() {
    let mut harness = connected_harness(TestClipboard::default());
    type_text(&mut harness.editor, "ab");
    harness.display.clear_output();

    harness.display.fail_next_writes(1);
    type_text(&mut harness.editor, "c");
    assert!(harness.editor.is_display_dirty());
    assert_eq!(harness.display.output(), "");

    type_text(&mut harness.editor, "d");
    assert!(!harness.editor.is_display_dirty());
    assert_eq!(harness.display.output(), format!("\r\x1b[2K{PROMPT}abcd"));
}

#[tokio::test]
async fn select_all_survives_the_heal_rewrite() {
    let mut harness = connected_harness(TestClipboard::default());
    type_text(&mut harness.editor, "ab");

    harness.display.fail_next_writes(1);
    type_text(&mut harness.editor, "c");
    assert!(harness.editor.is_display_dirty());

    let cmd_shift_left = KeyInput::new(EditorKey::Left, KeyModifiers::SUPER | KeyModifiers::SHIFT);
    let _ = press(&mut harness.editor, cmd_shift_left);
    assert!(!harness.editor.is_display_dirty());
    assert_eq!(harness.display.get_selection().as_deref(), Some("[]> abc"));

    let _ = press(&mut harness.editor, KeyInput::ctrl(EditorKey::Char('c')));
    assert_eq!(
        harness.clipboard_receiver.recv().await,
        Some(ClipboardOutcome::Copied)
    );
}

#[tokio::test]
async fn ctrl_d_on_empty_line_breaks() {
    let mut harness = connected_harness(TestClipboard::default());
    type_text(&mut harness.editor, "x");
    assert_eq!(
        press(&mut harness.editor, KeyInput::ctrl(EditorKey::Char('d'))),
        ControlFlow::Continue(())
    );

    let _ = harness.editor.apply_action(EditorAction::DeleteBackward);
    assert_eq!(
        press(&mut harness.editor, KeyInput::ctrl(EditorKey::Char('d'))),
        ControlFlow::Break(())
    );
}

#[tokio::test]
async fn event_loop_runs_until_input_ends() {
    let Harness {
        mut editor,
        display,
        clipboard_receiver,
        inbound_receiver,
        mut server_lines,
        server_write: _server_write,
    } = connected_harness(TestClipboard::default());

    let mut events = typed("hi");
    events.push(key_event(KeyCode::Enter, KeyModifiers::NONE));
    events.push(Ok(Event::Resize(100, 40)));
    events.push(Ok(Event::Paste("pasted".into())));

    let exit = run_event_loop(
        &mut editor,
        gen_input_stream(events),
        clipboard_receiver,
        inbound_receiver,
    )
    .await
    .unwrap();

    assert_eq!(exit, LoopExit::InputClosed);
    assert_eq!(
        server_lines.next_line().await.unwrap().as_deref(),
        Some(r#"{"type":"user","text":"hi"}"#)
    );
    assert_eq!(editor.state().line.buffer(), "pasted");
    assert_eq!(*display.fit_calls.lock().unwrap(), vec![(100, 40)]);
}

#[tokio::test]
async fn event_loop_delivers_inbound_and_stops_on_ctrl_d() {
    let Harness {
        mut editor,
        display,
        clipboard_receiver,
        inbound_receiver,
        server_lines: _server_lines,
        mut server_write,
    } = connected_harness(TestClipboard::default());

    server_write
        .write_all(b"{\"text\":\"welcome\"}\n")
        .await
        .unwrap();

    let events = vec![
        key_event(KeyCode::Char('d'), KeyModifiers::CONTROL),
        key_event(KeyCode::Char('z'), KeyModifiers::NONE),
    ];

    let exit = run_event_loop(
        &mut editor,
        gen_input_stream_with_delay(events, Duration::from_millis(50)),
        clipboard_receiver,
        inbound_receiver,
    )
    .await
    .unwrap();

    assert_eq!(exit, LoopExit::EndOfInput);
    assert!(display.output_strip_ansi().contains("welcome"));
    assert!(editor.state().line.is_buffer_empty());
}

#[tokio::test]
async fn event_loop_survives_peer_hang_up() {
    let Harness {
        mut editor,
        display: _display,
        clipboard_receiver,
        inbound_receiver,
        server_lines,
        server_write,
    } = connected_harness(TestClipboard::default());
    drop(server_lines);
    drop(server_write);

    let mut events = typed("still here");
    events.push(key_event(KeyCode::Enter, KeyModifiers::NONE));

    let exit = run_event_loop(
        &mut editor,
        gen_input_stream_with_delay(events, Duration::from_millis(5)),
        clipboard_receiver,
        inbound_receiver,
    )
    .await
    .unwrap();

    assert_eq!(exit, LoopExit::InputClosed);
    assert_eq!(editor.ready_state(), ReadyState::Closed);
    assert_eq!(editor.state().history.entries(), ["still here"]);
}

#[test]
fn inbound_message_shape() {
    let message = InboundMessage {
        text: "ok".into(),
    };
    assert_eq!(message.text, "ok");
}
