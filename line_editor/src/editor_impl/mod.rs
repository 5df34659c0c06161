// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The editing core. Nothing in here does I/O: a key press is resolved to an
//! [`EditorAction`], applied to the [`EditorState`], and the result is a [`Reaction`]
//! made of [`RenderOps`] to paint plus an optional [`EditorEffect`] for the caller.
//!
//! | Module          | Responsibility                                           |
//! |-----------------|----------------------------------------------------------|
//! | `word_run`      | `\s*\S+\s*` scanning on either side of the cursor        |
//! | `input_line`    | Prompt + buffer + cursor, with the cursor invariant      |
//! | `history_log`   | Committed lines and the Up / Down recall cursor          |
//! | `key_input`     | crossterm key events narrowed to what the editor uses    |
//! | `editor_action` | The ordered key binding table                            |
//! | `editor_state`  | The reducer                                              |
//! | `render_op`     | Terminal deltas and their escape sequences               |

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Attach sources.
pub mod editor_action;
pub mod editor_state;
pub mod history_log;
pub mod input_line;
pub mod key_input;
pub mod render_op;
pub mod word_run;

// Re-export.
pub use editor_action::*;
pub use editor_state::*;
pub use history_log::*;
pub use input_line::*;
pub use key_input::*;
pub use render_op::*;
pub use word_run::*;
