// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CrosstermEventResult, PinnedInputStream};
use async_stream::stream;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

pub fn gen_input_stream<T>(generator_vec: Vec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

pub fn gen_input_stream_with_delay<T>(
    generator_vec: Vec<T>,
    delay: Duration,
) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            tokio::time::sleep(delay).await;
            yield item;
        }
    };
    Box::pin(it)
}

/// A key press, as crossterm's event stream would deliver it.
#[must_use]
pub fn key_event(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEventResult {
    Ok(Event::Key(KeyEvent::new(code, modifiers)))
}

/// One unmodified key press per char of `text`.
#[must_use]
pub fn typed(text: &str) -> Vec<CrosstermEventResult> {
    text.chars()
        .map(|ch| key_event(KeyCode::Char(ch), KeyModifiers::NONE))
        .collect()
}
