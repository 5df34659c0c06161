// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tokio::io::{DuplexStream, ReadHalf, WriteHalf, duplex, split};

/// Two connected ends of an in-memory socket. Whatever is written to `client_write`
/// can be read from `server_read`, and vice versa.
#[derive(Debug)]
pub struct MockSocket {
    pub client_read: ReadHalf<DuplexStream>,
    pub client_write: WriteHalf<DuplexStream>,
    pub server_read: ReadHalf<DuplexStream>,
    pub server_write: WriteHalf<DuplexStream>,
}

#[must_use]
pub fn get_mock_socket_halves() -> MockSocket {
    let (client_stream, server_stream) = duplex(1024);

    let (client_read, client_write) = split(client_stream);

    let (server_read, server_write) = split(server_stream);

    MockSocket {
        client_read,
        client_write,
        server_read,
        server_write,
    }
}
