// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::Parser;
use crossterm::event::EventStream;
use r3bl_line_editor::{CLIArg, CONNECT_TIMEOUT, ChannelTransport, CrosstermEventResult,
                       EditorError, LineEditor, PinnedInputStream, SystemClipboard,
                       TerminalDisplay, new_safe_clipboard, ok, run_event_loop,
                       tracing_logging};

const HELP_BANNER: &str = "\
Common commands:
  Enter               send the line
  Up / Down           walk the history
  Alt+Left / Right    move by word
  Ctrl+W              delete the word before the cursor
  Cmd+Shift+Left      select the line, then Ctrl+C to copy
  Ctrl+V              paste
  Ctrl+D              quit (on an empty line)
";

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    if let Some(tracing_config) = cli_arg.tracing_config() {
        tracing_logging::init(tracing_config)?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let (transport, inbound_receiver) =
        match ChannelTransport::try_connect(cli_arg.addr.as_str(), CONNECT_TIMEOUT).await {
            Ok(it) => it,
            Err(report) => {
                tracing::warn!(
                    message = "could not connect, lines will not be sent",
                    addr = %cli_arg.addr,
                    error = %report
                );
                println!("Not connected to {}. Lines will not be sent.", cli_arg.addr);
                ChannelTransport::disconnected()
            }
        };

    println!("{HELP_BANNER}");

    // The editor owns the display, which leaves raw mode when it drops at the end of
    // this block.
    let exit = {
        let display = TerminalDisplay::try_new()
            .map_err(EditorError::from)?;
        let (mut editor, clipboard_receiver) = LineEditor::new(
            cli_arg.editor_config(),
            Box::new(display),
            Box::new(transport),
            new_safe_clipboard(SystemClipboard),
        );
        editor.render_prompt();

        let input_stream: PinnedInputStream<CrosstermEventResult> =
            Box::pin(EventStream::new());
        run_event_loop(&mut editor, input_stream, clipboard_receiver, inbound_receiver)
            .await?
    };

    tracing::debug!(message = "Stop logging...", %exit);
    ok!()
}
