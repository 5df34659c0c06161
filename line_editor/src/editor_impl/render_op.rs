// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ok, queue_commands_no_lock};
use crossterm::{cursor::{MoveLeft, MoveRight},
                style::Print,
                terminal::{Clear, ClearType}};
use std::io::{self, Write};

/// One atomic change to the terminal, relative to where the caret currently is.
///
/// Column counts are display widths (a CJK char is 2 columns), not char counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    /// Write text at the caret. Used when typing or pasting at the end of the line.
    Echo(String),
    /// `\b \b` once per column: step back, blank the cell, step back again.
    EraseBackward(usize),
    /// `CSI n D`. Zero columns writes nothing.
    CursorLeft(usize),
    /// `CSI n C`. Zero columns writes nothing.
    CursorRight(usize),
    /// `\r`, `CSI 2K`, the whole line, then walk the caret back `cursor_back` columns.
    /// Used for every edit that is not at the end of the line.
    RewriteLine { line: String, cursor_back: usize },
    /// `\r\n`.
    NewLine,
    /// Not a byte sequence. Handed to the display, which owns the selection.
    SelectAll(String),
}

/// An ordered list of [`RenderOp`]s. Use [`crate::render_ops!`] to build one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOps {
    pub list: Vec<RenderOp>,
}

impl RenderOp {
    /// Queue the escape sequences for this op on `writer`. [`RenderOp::SelectAll`]
    /// queues nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn queue_into<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            RenderOp::Echo(text) => queue_commands_no_lock!(writer, Print(text)),
            RenderOp::EraseBackward(cols) => {
                for _ in 0..*cols {
                    writer.write_all(b"\x08 \x08")?;
                }
            }
            RenderOp::CursorLeft(cols) => queue_cursor_left(writer, *cols)?,
            RenderOp::CursorRight(cols) => {
                if *cols > 0 {
                    queue_commands_no_lock!(writer, MoveRight(clamp_to_u16(*cols)));
                }
            }
            RenderOp::RewriteLine { line, cursor_back } => {
                queue_commands_no_lock!(
                    writer,
                    Print("\r"),
                    Clear(ClearType::CurrentLine),
                    Print(line)
                );
                queue_cursor_left(writer, *cursor_back)?;
            }
            RenderOp::NewLine => queue_commands_no_lock!(writer, Print("\r\n")),
            RenderOp::SelectAll(_) => {}
        }
        ok!()
    }
}

fn queue_cursor_left<W: Write + ?Sized>(writer: &mut W, cols: usize) -> io::Result<()> {
    if cols > 0 {
        queue_commands_no_lock!(writer, MoveLeft(clamp_to_u16(cols)));
    }
    ok!()
}

fn clamp_to_u16(cols: usize) -> u16 { u16::try_from(cols).unwrap_or(u16::MAX) }

impl RenderOps {
    #[must_use]
    pub fn len(&self) -> usize { self.list.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.list.is_empty() }

    pub fn push(&mut self, op: RenderOp) { self.list.push(op); }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderOp> { self.list.iter() }

    /// Escape sequences for every op, in order. [`RenderOp::SelectAll`] contributes no
    /// bytes.
    ///
    /// # Errors
    ///
    /// Only if queueing into a `Vec` fails, which it does not in practice.
    pub fn try_to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut acc = Vec::new();
        for op in &self.list {
            op.queue_into(&mut acc)?;
        }
        ok!(acc)
    }
}

impl<'a> IntoIterator for &'a RenderOps {
    type Item = &'a RenderOp;
    type IntoIter = std::slice::Iter<'a, RenderOp>;

    fn into_iter(self) -> Self::IntoIter { self.list.iter() }
}

impl From<Vec<RenderOp>> for RenderOps {
    fn from(list: Vec<RenderOp>) -> Self { Self { list } }
}
