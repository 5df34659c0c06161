// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The I/O shell around [`crate::EditorState`]: the display, transport and clipboard
//! seams, the [`LineEditor`] that ties them together, and the event loop that feeds it.

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Attach sources.
pub mod clipboard_service;
pub mod display;
pub mod editor_config;
pub mod editor_error;
pub mod event_loop;
pub mod line_editor;
pub mod transport;

#[cfg(test)]
mod integration_tests;

// Re-export.
pub use clipboard_service::*;
pub use display::*;
pub use editor_config::*;
pub use editor_error::*;
pub use event_loop::*;
pub use line_editor::*;
pub use transport::*;
