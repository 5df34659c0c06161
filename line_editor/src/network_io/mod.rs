// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod json_serde;
pub mod line_protocol;
pub mod protocol_types;

// Re-export.
pub use line_protocol::*;
pub use protocol_types::*;
