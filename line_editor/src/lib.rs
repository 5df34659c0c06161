// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

//! # r3bl_line_editor
//!
//! A single line editor for a terminal front-end that talks to a remote peer. The user
//! types at a prompt; each committed line is sent to the peer as a JSON message, and
//! whatever the peer sends back is printed above the input line.
//!
//! # Features
//!
//! - A fixed prompt that can't be deleted or moved into.
//! - Char and word motion (`Alt+Left`, `Alt+Right`) and word deletion (`Ctrl+W`,
//!   `Ctrl+Delete`).
//! - In-memory history recall with `Up` and `Down`, optionally capped.
//! - Clipboard copy (`Ctrl+C` / `Cmd+C` with a selection) and paste (`Ctrl+V` /
//!   `Cmd+V`), plus bracketed paste from the terminal. `Cmd+Shift+Left` or
//!   `Cmd+Shift+Right` selects the whole line.
//! - Rendering by deltas: typing or erasing at the end of the line echoes, everything
//!   else rewrites the line. A failed write is healed with a full rewrite on the next
//!   paint.
//! - Newline delimited JSON to the peer: `{"type":"user","text":"..."}` out,
//!   `{"text":"..."}` in.
//!
//! # Architecture
//!
//! ```text
//! crossterm EventStream ──► run_event_loop ──► LineEditor ──► EditorState::apply
//!        clipboard outcomes ──┘     ▲              │  │            │
//!        inbound messages ──────────┘              │  │            ▼
//!                                                  │  │       Reaction { RenderOps, EditorEffect }
//!                                   DisplaySurface ◄┘  └► Transport / ClipboardService
//! ```
//!
//! - [`editor_impl`] is the pure core. It does no I/O and is tested without any mocks.
//! - [`public_api`] holds the seams ([`DisplaySurface`], [`Transport`],
//!   [`ClipboardService`]) and the [`LineEditor`] that drives them.
//! - [`network_io`] is the wire format.
//! - [`test_fixtures`] has in-memory versions of every seam.
//!
//! # Example
//!
//! ```no_run
//! use r3bl_line_editor::*;
//!
//! # async fn run() -> miette::Result<()> {
//! let (transport, inbound_receiver) =
//!     ChannelTransport::try_connect("127.0.0.1:3000", CONNECT_TIMEOUT).await?;
//! let display = TerminalDisplay::try_new().map_err(EditorError::from)?;
//! let (mut editor, clipboard_receiver) = LineEditor::new(
//!     EditorConfig::default(),
//!     Box::new(display),
//!     Box::new(transport),
//!     new_safe_clipboard(SystemClipboard),
//! );
//! editor.render_prompt();
//!
//! let input_stream: PinnedInputStream<CrosstermEventResult> =
//!     Box::pin(crossterm::event::EventStream::new());
//! let exit = run_event_loop(&mut editor, input_stream, clipboard_receiver, inbound_receiver)
//!     .await?;
//! # let _ = exit;
//! # Ok(())
//! # }
//! ```

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(rust_2018_idioms)]
// Enforce strict error handling in production code, but allow unwrap in tests.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod clap_config;
pub mod decl_macros;
pub mod editor_impl;
pub mod network_io;
pub mod public_api;
pub mod test_fixtures;
pub mod tracing_logging;

// Re-export.
pub use clap_config::*;
pub use editor_impl::*;
pub use network_io::*;
pub use public_api::*;
pub use test_fixtures::*;
pub use tracing_logging::*;

use crossterm::event::Event;
use futures_core::Stream;
use std::{io::Error, pin::Pin};

/// The prompt used when none is configured.
pub const DEFAULT_PROMPT: &str = "[]> ";

/// Disambiguate the type of `StdMutex` from stdlib and tokio to avoid conflicts.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Type alias for a `Send`-able output device (raw terminal, [`StdoutMock`], etc).
pub type SendRawTerminal = dyn std::io::Write + Send;

/// Type alias for crossterm streaming (input) event result.
pub type CrosstermEventResult = Result<Event, Error>;

/// Type alias for a pinned stream that is async safe. `T` is usually
/// [`CrosstermEventResult`].
pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T>>>;
