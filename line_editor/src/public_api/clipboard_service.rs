// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::StdMutex;
use copypasta_ext::{copypasta::ClipboardProvider, x11_fork::ClipboardContext};
use std::{error::Error, sync::Arc};
use strum_macros::Display;
use tokio::{sync::mpsc::{UnboundedReceiver, UnboundedSender},
            task::JoinHandle};

pub type ClipboardResult<T> = Result<T, Box<dyn Error + Send + Sync + 'static>>;

pub type SafeClipboard = Arc<StdMutex<dyn ClipboardService + Send>>;

pub type ClipboardOutcomeSender = UnboundedSender<ClipboardOutcome>;
pub type ClipboardOutcomeReceiver = UnboundedReceiver<ClipboardOutcome>;

/// Abstraction for the clipboard service for dependency injection. This trait is
/// implemented by both a test clipboard service and a system clipboard service.
///
/// Both calls block, so run them with [`spawn_copy`] and [`spawn_paste`].
pub trait ClipboardService {
    fn try_to_put_content_into_clipboard(
        &mut self,
        content: String,
    ) -> ClipboardResult<()>;
    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClipboardOperation {
    Copy,
    Paste,
}

/// Delivered back to the event loop once a blocking clipboard call finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardOutcome {
    Copied,
    Pasted(String),
    Failed {
        operation: ClipboardOperation,
        reason: String,
    },
}

#[derive(Debug)]
pub struct SystemClipboard;

impl ClipboardService for SystemClipboard {
    fn try_to_put_content_into_clipboard(
        &mut self,
        content: String,
    ) -> ClipboardResult<()> {
        let mut ctx = ClipboardContext::new()?;
        ctx.set_contents(content)?;
        Ok(())
    }

    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String> {
        let mut ctx = ClipboardContext::new()?;
        let content = ctx.get_contents()?;

        Ok(content)
    }
}

#[must_use]
pub fn new_safe_clipboard(clipboard: impl ClipboardService + Send + 'static) -> SafeClipboard {
    Arc::new(StdMutex::new(clipboard))
}

/// Copy `content` on the blocking pool. The result arrives on `sender`. If the event
/// loop is gone by then, the outcome is dropped.
pub fn spawn_copy(
    clipboard: SafeClipboard,
    content: String,
    sender: ClipboardOutcomeSender,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let outcome = match lock_and(&clipboard, |it| {
            it.try_to_put_content_into_clipboard(content)
        }) {
            Ok(()) => ClipboardOutcome::Copied,
            Err(reason) => ClipboardOutcome::Failed {
                operation: ClipboardOperation::Copy,
                reason,
            },
        };
        sender.send(outcome).ok();
    })
}

/// Read the clipboard on the blocking pool. The text arrives on `sender`.
pub fn spawn_paste(
    clipboard: SafeClipboard,
    sender: ClipboardOutcomeSender,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let outcome = match lock_and(&clipboard, |it| {
            it.try_to_get_content_from_clipboard()
        }) {
            Ok(text) => ClipboardOutcome::Pasted(text),
            Err(reason) => ClipboardOutcome::Failed {
                operation: ClipboardOperation::Paste,
                reason,
            },
        };
        sender.send(outcome).ok();
    })
}

fn lock_and<T>(
    clipboard: &SafeClipboard,
    op: impl FnOnce(&mut (dyn ClipboardService + Send)) -> ClipboardResult<T>,
) -> Result<T, String> {
    let mut guard = clipboard.lock().map_err(|err| err.to_string())?;
    op(&mut *guard).map_err(|err| err.to_string())
}

pub mod clipboard_test_fixtures {
    use super::{ClipboardResult, ClipboardService};

    #[derive(Debug, Default)]
    pub struct TestClipboard {
        pub content: String,
        /// When set, every call fails with this message.
        pub fail_with: Option<String>,
    }

    impl ClipboardService for TestClipboard {
        fn try_to_put_content_into_clipboard(
            &mut self,
            content: String,
        ) -> ClipboardResult<()> {
            if let Some(reason) = &self.fail_with {
                return Err(reason.clone().into());
            }
            self.content = content;
            Ok(())
        }

        fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String> {
            if let Some(reason) = &self.fail_with {
                return Err(reason.clone().into());
            }
            Ok(self.content.clone())
        }
    }
}
