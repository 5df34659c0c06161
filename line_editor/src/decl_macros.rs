// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Simple macro to create a [`Result`] with an [`Ok`] variant. It is just syntactic sugar
/// that helps having to write `Ok(())`.
/// - If no arg is passed in then it will return `Ok(())`.
/// - If an arg is passed in then it will return `Ok($arg)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Build or extend a [`crate::RenderOps`].
///
/// ```
/// use r3bl_line_editor::*;
///
/// let mut ops = render_ops!(@new RenderOp::Echo("a".into()));
/// render_ops!(@add_to ops => RenderOp::CursorLeft(1), RenderOp::NewLine);
/// assert_eq!(ops.len(), 3);
/// ```
#[macro_export]
macro_rules! render_ops {
    // Empty.
    () => {
        $crate::RenderOps::default()
    };

    // @new: Create a RenderOps and push every op that is passed in.
    (@new $($arg_render_op:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut render_ops = $crate::RenderOps::default();
        $(
            render_ops.list.push($arg_render_op);
        )*
        render_ops
    }};

    // @add_to: Push every op that is passed in to an existing RenderOps.
    (@add_to $arg_render_ops:expr => $($arg_render_op:expr),* $(,)?) => {{
        $(
            $arg_render_ops.list.push($arg_render_op);
        )*
    }};
}

/// Queue crossterm commands on a writer that is already in hand, and bail with the
/// [`std::io::Error`] on the first one that fails. Nothing is flushed.
#[macro_export]
macro_rules! queue_commands_no_lock {
    ($writer:expr $(, $command:expr)* $(,)?) => {{
        use ::crossterm::QueueableCommand as _;
        $(
            $writer.queue($command)?;
        )*
    }};
}
