// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ReadyState;
use miette::{Diagnostic, Report};
use std::io;
use thiserror::Error;

/// Errors from the I/O shell around the editor. The editing core itself never fails.
#[derive(Debug, Error, Diagnostic)]
pub enum EditorError {
    /// An internal I/O error occurred, usually writing to the terminal.
    #[error(transparent)]
    #[diagnostic(code(r3bl_line_editor::io))]
    IO(#[from] io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transport(#[from] TransportError),

    #[error("clipboard {0}")]
    #[diagnostic(
        code(r3bl_line_editor::clipboard),
        help("On Linux the clipboard needs a running X11 or Wayland session")
    )]
    Clipboard(String),
}

/// Errors from sending a committed line to the peer.
#[derive(Debug, Error, Diagnostic)]
#[diagnostic(code(r3bl_line_editor::transport))]
pub enum TransportError {
    #[error("could not serialize outbound message: {0}")]
    Serialize(String),

    /// The writer task has exited, so the connection is gone.
    #[error("transport channel closed")]
    ChannelClosed,

    #[error("transport is not open, it is {0}")]
    NotOpen(ReadyState),
}

/// For convenience, convert [`Report`] to [`EditorError`], so that `into_diagnostic()`
/// works.
impl From<Report> for EditorError {
    fn from(report: Report) -> Self { EditorError::IO(io::Error::other(format!("{report}"))) }
}
