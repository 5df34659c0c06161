// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mocks for the I/O seams, so the editor can be driven end to end in tests without a
//! terminal, a clipboard, or a network peer.

// Attach sources.
pub mod async_input_stream_mock;
pub mod display_mock;
pub mod mock_socket;
pub mod stdout_mock;

// Re-export.
pub use async_input_stream_mock::*;
pub use display_mock::*;
pub use mock_socket::*;
pub use stdout_mock::*;
