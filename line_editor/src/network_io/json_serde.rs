// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Buffer, BufferAtom};
use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize};

/// # Errors
///
/// Returns an error if `data` can't be represented as JSON.
pub fn try_serialize<T: Serialize>(data: &T) -> miette::Result<Buffer> {
    serde_json::to_vec(data).into_diagnostic()
}

/// # Errors
///
/// Returns an error if `buffer` is not valid JSON for `T`.
pub fn try_deserialize<T: for<'de> Deserialize<'de>>(
    buffer: &[BufferAtom],
) -> miette::Result<T> {
    serde_json::from_slice(buffer).into_diagnostic()
}
